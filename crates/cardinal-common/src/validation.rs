//! Input validation utilities.
//!
//! Centralized validation helpers used across API routes.

use validator::Validate;

use crate::error::CardinalError;

/// Validate a request body, returning a CardinalError::Validation on failure.
pub fn validate_request<T: Validate>(body: &T) -> Result<(), CardinalError> {
    body.validate().map_err(|e| CardinalError::Validation {
        message: format_validation_errors(e),
    })
}

/// Format validation errors into a human-readable string.
fn format_validation_errors(errors: validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for '{field}'"))
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Reject empty or whitespace-only display names.
pub fn validate_name(name: &str) -> Result<(), CardinalError> {
    if name.trim().is_empty() {
        return Err(CardinalError::Validation {
            message: "Name cannot be empty or whitespace only".into(),
        });
    }
    Ok(())
}
