//! Validation error types

use std::fmt;

/// Validation error for domain models
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Required field absent from the request body
    Missing { field: &'static str },

    /// Field is empty when it shouldn't be
    Empty { field: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "the {} field is required", field),
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Unwrap a required request field, rejecting absent and blank values.
pub(crate) fn required(
    field: &'static str,
    value: Option<String>,
) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::Missing { field })?;
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::Missing { field: "climate" };
        assert_eq!(err.to_string(), "the climate field is required");

        let err = ValidationError::Empty { field: "name" };
        assert_eq!(err.to_string(), "name cannot be empty");
    }

    #[test]
    fn required_accepts_present_value() {
        assert_eq!(required("name", Some("Tatooine".into())).unwrap(), "Tatooine");
    }

    #[test]
    fn required_rejects_absent() {
        let err = required("name", None).unwrap_err();
        assert!(matches!(err, ValidationError::Missing { field: "name" }));
    }

    #[test]
    fn required_rejects_blank() {
        let err = required("name", Some("   ".into())).unwrap_err();
        assert!(matches!(err, ValidationError::Empty { field: "name" }));
    }
}
