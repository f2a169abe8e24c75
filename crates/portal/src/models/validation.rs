//! Field validation shared by repositories and services.

use thiserror::Error;

/// A required field is missing or malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Name of the offending field (wire name).
    pub field: &'static str,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    /// Build an error for `field`.
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Trim `value`, failing if nothing is left.
///
/// # Errors
///
/// Returns `ValidationError` when the trimmed value is empty.
pub fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, "this field is required"));
    }
    Ok(trimmed.to_owned())
}

/// Split trimmed entries, dropping empty ones.
#[must_use]
pub fn clean_list<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| v.as_ref().trim().to_owned())
        .filter(|v| !v.is_empty())
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims() {
        assert_eq!(required("name", "  Milo ").unwrap(), "Milo");
    }

    #[test]
    fn test_required_rejects_blank() {
        let err = required("name", " \t").unwrap_err();
        assert_eq!(err.field, "name");
    }

    #[test]
    fn test_clean_list() {
        assert_eq!(
            clean_list([" a ", "", "  ", "b"]),
            vec!["a".to_owned(), "b".to_owned()]
        );
    }
}
