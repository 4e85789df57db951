//! Response DTO for team records

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::Team;

/// Team shaped for client consumption.
///
/// English keys are canonical; Spanish (`nombre`, `ciudad`) and legacy
/// (`logo`) duplicates are kept for backward-compatible clients. The logo
/// URL is sanitized before inclusion and omitted when the stored value is
/// not a public URL.
#[derive(Debug, Clone, Serialize)]
pub struct TeamDto {
    pub id: i64,
    pub name: String,
    pub city: Option<String>,
    #[serde(rename = "logoUrl", skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub nombre: String,
    pub ciudad: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<&Team> for TeamDto {
    fn from(team: &Team) -> Self {
        let logo_url = team.sanitized_logo_url().map(String::from);

        Self {
            id: team.id,
            name: team.name.clone(),
            city: team.city.clone(),
            logo_url: logo_url.clone(),
            nombre: team.name.clone(),
            ciudad: team.city.clone(),
            logo: logo_url,
            created_at: team.created_at,
            updated_at: team.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(logo_url: Option<&str>) -> Team {
        Team {
            id: 7,
            name: "Lions".to_string(),
            city: Some("Metro".to_string()),
            logo_url: logo_url.map(String::from),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_dto_duplicates_spanish_and_legacy_keys() {
        let dto = TeamDto::from(&team(Some("/storage/logos/a.png")));
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "Lions");
        assert_eq!(json["nombre"], "Lions");
        assert_eq!(json["city"], "Metro");
        assert_eq!(json["ciudad"], "Metro");
        assert_eq!(json["logoUrl"], "/storage/logos/a.png");
        assert_eq!(json["logo"], "/storage/logos/a.png");
        assert!(json["createdAt"].is_string());
        assert!(json["updatedAt"].is_string());
    }

    #[test]
    fn test_dto_suppresses_non_public_logo() {
        let dto = TeamDto::from(&team(Some("/var/uploads/a.png")));
        let json = serde_json::to_value(&dto).unwrap();

        assert!(json.get("logoUrl").is_none());
        assert!(json.get("logo").is_none());
    }

    #[test]
    fn test_dto_absent_logo_omitted() {
        let dto = TeamDto::from(&team(None));
        let json = serde_json::to_value(&dto).unwrap();

        assert!(json.get("logoUrl").is_none());
        assert_eq!(json["city"], "Metro");
    }
}
