//! Logo resolution
//!
//! Turns whatever a request supplied for the team logo into a final public
//! URL, persisting uploaded or inline image bytes through the blob store.

use std::sync::Arc;

use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use uuid::Uuid;

use crate::domain::input::{RequestBody, UploadedFile, LOGO_FILE_ALIASES, LOGO_VALUE_ALIASES};
use crate::domain::team::is_public_logo_url;
use crate::domain::{BlobStore, DomainError};

/// Namespace all generated logo keys live under
const LOGO_KEY_PREFIX: &str = "logos";

static DATA_URI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:([a-zA-Z0-9.+-]+/[a-zA-Z0-9.+-]+);base64,(.+)$")
        .expect("data URI pattern is valid")
});

/// Fixed MIME-to-extension table for inline logos
fn extension_for_mime(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "bin",
    }
}

/// Extension for an uploaded part: the filename's own extension when it has
/// one, else a guess from the declared content type, else `bin`
fn extension_for_upload(file: &UploadedFile) -> String {
    if let Some(name) = &file.file_name {
        if let Some((_, ext)) = name.rsplit_once('.') {
            if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
                return ext.to_ascii_lowercase();
            }
        }
    }

    file.content_type
        .as_deref()
        .and_then(|ct| mime_guess::get_mime_extensions_str(ct))
        .and_then(|exts| exts.first())
        .map(|ext| ext.to_string())
        .unwrap_or_else(|| "bin".to_string())
}

fn generate_key(extension: &str) -> String {
    format!("{LOGO_KEY_PREFIX}/{}.{extension}", Uuid::new_v4())
}

/// Resolves a request's logo input to a public URL.
///
/// Exactly one source is honored per request, in order: uploaded file,
/// base64 data URI, direct URL pass-through. `None` means "nothing supplied,
/// leave any existing value alone".
#[derive(Debug, Clone)]
pub struct LogoResolver {
    blob_store: Arc<dyn BlobStore>,
}

impl LogoResolver {
    pub fn new(blob_store: Arc<dyn BlobStore>) -> Self {
        Self { blob_store }
    }

    pub async fn resolve(&self, body: &RequestBody) -> Result<Option<String>, DomainError> {
        if let Some(file) = body.lookup_file(LOGO_FILE_ALIASES) {
            let key = generate_key(&extension_for_upload(file));
            let url = self.blob_store.put(&key, &file.data).await?;
            return Ok(Some(url));
        }

        let Some(value) = body.lookup(LOGO_VALUE_ALIASES) else {
            return Ok(None);
        };

        if let Some(captures) = DATA_URI.captures(value) {
            let mime = &captures[1];
            let payload = &captures[2];

            // Malformed base64 means "no logo provided", never a request error
            let bytes = match base64::engine::general_purpose::STANDARD.decode(payload) {
                Ok(bytes) => bytes,
                Err(e) => {
                    debug!("Discarding undecodable data-URI logo: {e}");
                    return Ok(None);
                }
            };

            let key = generate_key(extension_for_mime(mime));
            let url = self.blob_store.put(&key, &bytes).await?;
            return Ok(Some(url));
        }

        if is_public_logo_url(value) {
            return Ok(Some(value.to_string()));
        }

        Ok(None)
    }
}
