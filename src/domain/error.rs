use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation {
        field: Option<String>,
        message: String,
    },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Validation error attributed to a single input field
    pub fn validation_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("Team '42' not found");
        assert_eq!(error.to_string(), "Not found: Team '42' not found");
    }

    #[test]
    fn test_validation_error_with_field() {
        let error = DomainError::validation_field("name", "name is required");
        match error {
            DomainError::Validation { field, message } => {
                assert_eq!(field.as_deref(), Some("name"));
                assert_eq!(message, "name is required");
            }
            _ => panic!("expected validation error"),
        }
    }

    #[test]
    fn test_conflict_error() {
        let error = DomainError::conflict("Team already exists");
        assert_eq!(error.to_string(), "Conflict: Team already exists");
    }
}
