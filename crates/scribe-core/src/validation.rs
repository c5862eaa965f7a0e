//! Validation utilities.

use crate::{FieldError, ScribeError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the value and returns a `ScribeError` on failure.
    fn validate_entity(&self) -> Result<(), ScribeError> {
        self.validate().map_err(validation_errors_to_scribe_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

/// Converts `validator::ValidationErrors` to `ScribeError`.
#[must_use]
pub fn validation_errors_to_scribe_error(errors: ValidationErrors) -> ScribeError {
    let message = field_errors(&errors)
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    ScribeError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not empty.
    pub fn not_empty(value: &str) -> Result<(), ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::new("not_empty"));
        }
        Ok(())
    }

    /// Validates that a string is usable as a SQL identifier
    /// (ASCII letter or underscore first, then letters, digits, underscores).
    pub fn sql_identifier(value: &str) -> Result<(), ValidationError> {
        let mut chars = value.chars();
        let valid_head = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        if !valid_head || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ValidationError::new("sql_identifier"));
        }
        if value.len() > 64 {
            return Err(ValidationError::new("sql_identifier_too_long"));
        }
        Ok(())
    }
}
