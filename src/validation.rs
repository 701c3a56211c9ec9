use crate::error::{SantaError, SantaResult};

/// Validates that a string is not blank (empty or whitespace-only).
/// Returns the trimmed string on success.
pub fn non_blank(value: &str, field: &str) -> SantaResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        Err(SantaError::BlankField {
            field: field.to_string(),
        })
    } else {
        Ok(trimmed)
    }
}

/// Validates that an amount is positive (> 0) and fits a budget.
pub fn positive(value: i64, field: &str) -> SantaResult<u32> {
    if value <= 0 {
        return Err(SantaError::NonPositive {
            field: field.to_string(),
        });
    }
    u32::try_from(value).map_err(|_| SantaError::Other(format!("{} is too large", field)))
}

/// Validates an optional amount (None is valid, Some(n) must be positive).
pub fn optional_positive(value: Option<i64>, field: &str) -> SantaResult<Option<u32>> {
    match value {
        None => Ok(None),
        Some(n) => positive(n, field).map(Some),
    }
}

/// Trims an optional string, returning None if blank.
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Case-insensitive name comparison used for duplicate checks.
pub fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_blank_accepts_valid_string() {
        assert_eq!(non_blank("Ana", "name").unwrap(), "Ana");
    }

    #[test]
    fn non_blank_trims_whitespace() {
        assert_eq!(non_blank("  Ana  ", "name").unwrap(), "Ana");
    }

    #[test]
    fn non_blank_rejects_whitespace_only() {
        assert!(matches!(
            non_blank("   ", "name"),
            Err(SantaError::BlankField { .. })
        ));
    }

    #[test]
    fn positive_accepts_positive() {
        assert_eq!(positive(30000, "budget").unwrap(), 30000);
    }

    #[test]
    fn positive_rejects_zero_and_negative() {
        assert!(positive(0, "budget").is_err());
        assert!(positive(-5, "budget").is_err());
    }

    #[test]
    fn positive_rejects_overflow() {
        assert!(positive(i64::from(u32::MAX) + 1, "budget").is_err());
    }

    #[test]
    fn optional_positive_accepts_none() {
        assert_eq!(optional_positive(None, "budget").unwrap(), None);
    }

    #[test]
    fn optional_positive_rejects_zero() {
        assert!(optional_positive(Some(0), "budget").is_err());
    }

    #[test]
    fn trim_optional_returns_none_for_blank() {
        assert_eq!(trim_optional(Some("   ")), None);
        assert_eq!(trim_optional(None), None);
        assert_eq!(trim_optional(Some(" x ")), Some("x".to_string()));
    }

    #[test]
    fn same_name_ignores_case_and_padding() {
        assert!(same_name("Tía Rosa", " tía rosa "));
        assert!(!same_name("Rosa", "Rosario"));
    }
}
