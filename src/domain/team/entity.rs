//! Team entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// URL prefixes a stored logo must carry to be exposed to clients
pub const PUBLIC_LOGO_PREFIXES: &[&str] = &["http://", "https://", "/storage/"];

/// Returns true when the value is safe to hand out as a logo URL
pub fn is_public_logo_url(value: &str) -> bool {
    PUBLIC_LOGO_PREFIXES.iter().any(|p| value.starts_with(p))
}

/// A team record as persisted by the record store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Server-assigned identifier
    pub id: i64,
    pub name: String,
    pub city: Option<String>,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    /// The logo URL if it passes the public-prefix check, otherwise `None`.
    ///
    /// Malformed stored values (bare filesystem paths and the like) are
    /// suppressed rather than leaked to clients.
    pub fn sanitized_logo_url(&self) -> Option<&str> {
        self.logo_url
            .as_deref()
            .filter(|url| is_public_logo_url(url))
    }
}

/// Field values for a team about to be inserted
#[derive(Debug, Clone)]
pub struct NewTeam {
    pub name: String,
    pub city: Option<String>,
    pub logo_url: Option<String>,
}

/// Partial update: absent fields leave the stored value unchanged
#[derive(Debug, Clone, Default)]
pub struct TeamPatch {
    pub name: Option<String>,
    pub city: Option<String>,
    pub logo_url: Option<String>,
}

impl TeamPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.city.is_none() && self.logo_url.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team_with_logo(logo_url: Option<&str>) -> Team {
        Team {
            id: 1,
            name: "Lions".to_string(),
            city: Some("Metro".to_string()),
            logo_url: logo_url.map(String::from),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_public_logo_prefixes() {
        assert!(is_public_logo_url("http://cdn.example.com/a.png"));
        assert!(is_public_logo_url("https://cdn.example.com/a.png"));
        assert!(is_public_logo_url("/storage/logos/a.png"));
        assert!(!is_public_logo_url("logos/a.png"));
        assert!(!is_public_logo_url("/tmp/a.png"));
        assert!(!is_public_logo_url("ftp://host/a.png"));
    }

    #[test]
    fn test_sanitized_logo_url_passthrough() {
        let team = team_with_logo(Some("/storage/logos/a.png"));
        assert_eq!(team.sanitized_logo_url(), Some("/storage/logos/a.png"));
    }

    #[test]
    fn test_sanitized_logo_url_suppresses_bare_path() {
        let team = team_with_logo(Some("/var/tmp/a.png"));
        assert_eq!(team.sanitized_logo_url(), None);
    }

    #[test]
    fn test_sanitized_logo_url_absent() {
        let team = team_with_logo(None);
        assert_eq!(team.sanitized_logo_url(), None);
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(TeamPatch::default().is_empty());
        let patch = TeamPatch {
            city: Some("Metro".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
