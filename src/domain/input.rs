//! Normalized request input
//!
//! Create and update requests may arrive as multipart form data, urlencoded
//! forms, or JSON (including JSON sent under a content type the framework
//! would not parse on its own). The API layer resolves the body into one
//! [`RequestBody`] variant before any field is read, so alias lookup always
//! runs over a de-serialized body, never raw bytes.

use std::collections::HashMap;

use bytes::Bytes;

/// Aliases accepted for the canonical `name` field, in lookup order
pub const NAME_ALIASES: &[&str] = &["name", "nombre", "Name", "Nombre"];

/// Aliases accepted for the canonical `city` field, in lookup order
pub const CITY_ALIASES: &[&str] = &["city", "ciudad", "City", "Ciudad"];

/// Field names under which an uploaded logo file is recognized
pub const LOGO_FILE_ALIASES: &[&str] = &[
    "logo", "Logo", "file", "File", "logoFile", "LogoFile", "imagen", "Imagen", "image", "Image",
];

/// Field names under which a string-valued logo (data URI or URL) is recognized
pub const LOGO_VALUE_ALIASES: &[&str] = &["logo", "Logo", "logo_url", "LogoUrl", "logoUrl"];

/// A binary part uploaded with a multipart request
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Form field the part arrived under
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Request body resolved once per request into its shape
#[derive(Debug, Clone)]
pub enum RequestBody {
    Multipart {
        fields: HashMap<String, String>,
        files: Vec<UploadedFile>,
    },
    Form(HashMap<String, String>),
    Json(HashMap<String, String>),
}

impl RequestBody {
    /// An empty body; create/update handlers treat it as "no fields supplied"
    pub fn empty() -> Self {
        Self::Json(HashMap::new())
    }

    fn fields(&self) -> &HashMap<String, String> {
        match self {
            Self::Multipart { fields, .. } => fields,
            Self::Form(fields) | Self::Json(fields) => fields,
        }
    }

    /// First non-empty (after trimming) value found under any of the aliases
    pub fn lookup(&self, aliases: &[&str]) -> Option<&str> {
        let fields = self.fields();
        aliases
            .iter()
            .filter_map(|alias| fields.get(*alias))
            .map(|value| value.trim())
            .find(|value| !value.is_empty())
    }

    /// First uploaded binary part found under any of the aliases.
    ///
    /// Only multipart bodies can carry files; zero-length parts are skipped
    /// the same way empty string fields are.
    pub fn lookup_file(&self, aliases: &[&str]) -> Option<&UploadedFile> {
        let Self::Multipart { files, .. } = self else {
            return None;
        };
        aliases.iter().find_map(|alias| {
            files
                .iter()
                .find(|file| file.field == *alias && !file.data.is_empty())
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.lookup(NAME_ALIASES)
    }

    pub fn city(&self) -> Option<&str> {
        self.lookup(CITY_ALIASES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(pairs: &[(&str, &str)]) -> RequestBody {
        RequestBody::Json(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_lookup_canonical_first() {
        let body = body(&[("name", "Lions"), ("nombre", "Leones")]);
        assert_eq!(body.name(), Some("Lions"));
    }

    #[test]
    fn test_lookup_spanish_alias() {
        let body = body(&[("nombre", "Leones"), ("ciudad", "Metro")]);
        assert_eq!(body.name(), Some("Leones"));
        assert_eq!(body.city(), Some("Metro"));
    }

    #[test]
    fn test_lookup_trims_whitespace() {
        let body = body(&[("name", "  Lions  ")]);
        assert_eq!(body.name(), Some("Lions"));
    }

    #[test]
    fn test_lookup_skips_blank_values() {
        let body = body(&[("name", "   "), ("Nombre", "Leones")]);
        assert_eq!(body.name(), Some("Leones"));
    }

    #[test]
    fn test_lookup_absent() {
        let body = body(&[("other", "x")]);
        assert_eq!(body.name(), None);
        assert_eq!(body.city(), None);
    }

    #[test]
    fn test_lookup_file_only_in_multipart() {
        let form = body(&[("logo", "whatever")]);
        assert!(form.lookup_file(LOGO_FILE_ALIASES).is_none());

        let multipart = RequestBody::Multipart {
            fields: HashMap::new(),
            files: vec![UploadedFile {
                field: "imagen".to_string(),
                file_name: Some("crest.png".to_string()),
                content_type: Some("image/png".to_string()),
                data: Bytes::from_static(b"png-bytes"),
            }],
        };
        let found = multipart.lookup_file(LOGO_FILE_ALIASES).unwrap();
        assert_eq!(found.field, "imagen");
    }

    #[test]
    fn test_lookup_file_skips_empty_parts() {
        let multipart = RequestBody::Multipart {
            fields: HashMap::new(),
            files: vec![UploadedFile {
                field: "logo".to_string(),
                file_name: Some("crest.png".to_string()),
                content_type: None,
                data: Bytes::new(),
            }],
        };
        assert!(multipart.lookup_file(LOGO_FILE_ALIASES).is_none());
    }
}
