//! Team field validation

use thiserror::Error;

use crate::domain::error::DomainError;

/// Errors that can occur during team validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("name is required")]
    EmptyName,

    #[error("name cannot exceed {0} characters")]
    NameTooLong(usize),

    #[error("city cannot exceed {0} characters")]
    CityTooLong(usize),
}

impl TeamValidationError {
    /// The input field this error refers to
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong(_) => "name",
            Self::CityTooLong(_) => "city",
        }
    }
}

pub const MAX_NAME_LENGTH: usize = 120;
pub const MAX_CITY_LENGTH: usize = 120;

/// Validate a team name
pub fn validate_name(name: &str) -> Result<(), TeamValidationError> {
    if name.is_empty() {
        return Err(TeamValidationError::EmptyName);
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(TeamValidationError::NameTooLong(MAX_NAME_LENGTH));
    }

    Ok(())
}

/// Validate a team city
pub fn validate_city(city: &str) -> Result<(), TeamValidationError> {
    if city.chars().count() > MAX_CITY_LENGTH {
        return Err(TeamValidationError::CityTooLong(MAX_CITY_LENGTH));
    }

    Ok(())
}

fn field_error(e: TeamValidationError) -> DomainError {
    DomainError::validation_field(e.field(), e.to_string())
}

/// Validate the full field set of a create; `name` is required
pub fn validate_new_team(name: Option<&str>, city: Option<&str>) -> Result<(), DomainError> {
    let name = name.ok_or_else(|| DomainError::validation_field("name", "name is required"))?;
    validate_name(name).map_err(field_error)?;

    if let Some(city) = city {
        validate_city(city).map_err(field_error)?;
    }

    Ok(())
}

/// Validate only the fields a partial update supplies
pub fn validate_team_patch(name: Option<&str>, city: Option<&str>) -> Result<(), DomainError> {
    if let Some(name) = name {
        validate_name(name).map_err(field_error)?;
    }

    if let Some(city) = city {
        validate_city(city).map_err(field_error)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_name() {
        assert!(validate_name("Lions").is_ok());
        assert!(validate_name(&"a".repeat(120)).is_ok());
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(validate_name(""), Err(TeamValidationError::EmptyName));
    }

    #[test]
    fn test_name_too_long() {
        let long = "a".repeat(121);
        assert_eq!(
            validate_name(&long),
            Err(TeamValidationError::NameTooLong(120))
        );
    }

    #[test]
    fn test_valid_city() {
        assert!(validate_city("Metro").is_ok());
        assert!(validate_city("").is_ok());
    }

    #[test]
    fn test_city_too_long() {
        let long = "a".repeat(121);
        assert_eq!(
            validate_city(&long),
            Err(TeamValidationError::CityTooLong(120))
        );
    }

    #[test]
    fn test_error_field_attribution() {
        assert_eq!(TeamValidationError::EmptyName.field(), "name");
        assert_eq!(TeamValidationError::NameTooLong(120).field(), "name");
        assert_eq!(TeamValidationError::CityTooLong(120).field(), "city");
    }

    #[test]
    fn test_new_team_requires_name() {
        let error = validate_new_team(None, Some("Metro")).unwrap_err();
        match error {
            DomainError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("name")),
            _ => panic!("expected validation error"),
        }
    }

    #[test]
    fn test_new_team_valid() {
        assert!(validate_new_team(Some("Lions"), None).is_ok());
        assert!(validate_new_team(Some("Lions"), Some("Metro")).is_ok());
    }

    #[test]
    fn test_patch_skips_absent_fields() {
        assert!(validate_team_patch(None, None).is_ok());
    }

    #[test]
    fn test_patch_rejects_long_city() {
        let long = "a".repeat(121);
        let error = validate_team_patch(None, Some(&long)).unwrap_err();
        match error {
            DomainError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("city")),
            _ => panic!("expected validation error"),
        }
    }
}
