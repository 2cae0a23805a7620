//! Required-field helpers used by the entity orchestrators.
//!
//! Request DTOs model every field as `Option` so a missing required field
//! becomes a 400 with a message naming the field, rather than a
//! deserialization rejection.

use crate::error::CoreError;

/// Unwrap a required field or fail validation naming it.
pub fn require<T>(value: Option<T>, field: &str) -> Result<T, CoreError> {
    value.ok_or_else(|| CoreError::Validation(format!("Missing required field '{field}'")))
}

/// Unwrap a required string field, additionally rejecting empty values.
pub fn require_non_empty(value: Option<String>, field: &str) -> Result<String, CoreError> {
    let value = require(value, field)?;
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!(
            "Field '{field}' must not be empty"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn require_names_the_missing_field() {
        let err = require::<String>(None, "name").unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("'name'"));
        assert_eq!(require(Some(1), "n").unwrap(), 1);
    }

    #[test]
    fn require_non_empty_rejects_blank() {
        assert_matches!(
            require_non_empty(Some("   ".to_string()), "name"),
            Err(CoreError::Validation(_))
        );
        assert_eq!(
            require_non_empty(Some("libfoo".to_string()), "name").unwrap(),
            "libfoo"
        );
    }
}
