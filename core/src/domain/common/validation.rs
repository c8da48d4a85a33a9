use crate::domain::common::entities::app_errors::CoreError;

/// Trims `value` and checks it is non-empty and at most `max_chars` long.
pub fn required_text(field: &str, value: &str, max_chars: Option<usize>) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation(format!("{field} must not be empty")));
    }
    if let Some(max) = max_chars
        && trimmed.chars().count() > max
    {
        return Err(CoreError::validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(trimmed.to_string())
}

pub fn optional_text(
    field: &str,
    value: Option<String>,
    max_chars: Option<usize>,
) -> Result<Option<String>, CoreError> {
    value
        .map(|v| required_text(field, &v, max_chars))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_trims() {
        assert_eq!(required_text("title", "  Bistro ", Some(100)).unwrap(), "Bistro");
    }

    #[test]
    fn test_required_text_rejects_blank() {
        let err = required_text("title", "   ", None).unwrap_err();
        assert_eq!(err, CoreError::Validation("title must not be empty".to_string()));
    }

    #[test]
    fn test_required_text_counts_chars_not_bytes() {
        let name = "щ".repeat(50);
        assert!(required_text("tg_username", &name, Some(50)).is_ok());
        assert!(required_text("tg_username", &format!("{name}щ"), Some(50)).is_err());
    }

    #[test]
    fn test_optional_text_passes_none() {
        assert_eq!(optional_text("description", None, None).unwrap(), None);
    }
}
