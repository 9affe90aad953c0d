//! Input validation utilities.
//!
//! Field-level checks used when constructing a [`Patient`](crate::Patient). Each check returns
//! a [`FieldViolation`] rather than failing fast so that a payload is reported in one pass.

use std::fmt;

/// One rule broken by one input field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A rejected record payload. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            violations: vec![FieldViolation::new(field, message)],
        }
    }

    /// Returns `Ok(())` when `violations` is empty.
    pub fn check(violations: Vec<FieldViolation>) -> Result<(), Self> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Self { violations })
        }
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.violations.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Rejects empty or whitespace-only text.
pub fn require_non_empty(field: &'static str, value: &str) -> Option<FieldViolation> {
    if value.trim().is_empty() {
        return Some(FieldViolation::new(field, "cannot be empty"));
    }
    None
}

/// Rejects values outside the open interval `(low, high)`.
pub fn require_open_range(
    field: &'static str,
    value: i64,
    low: i64,
    high: i64,
) -> Option<FieldViolation> {
    if value <= low || value >= high {
        return Some(FieldViolation::new(
            field,
            format!("must be greater than {low} and less than {high}"),
        ));
    }
    None
}

/// Rejects zero, negative and non-finite values.
pub fn require_positive(field: &'static str, value: f64) -> Option<FieldViolation> {
    if !value.is_finite() || value <= 0.0 {
        return Some(FieldViolation::new(field, "must be greater than 0"));
    }
    None
}

/// Rejects values not in `allowed`.
pub fn require_one_of(
    field: &'static str,
    value: &str,
    allowed: &[&str],
) -> Option<FieldViolation> {
    if !allowed.contains(&value) {
        return Some(FieldViolation::new(
            field,
            format!("must be one of {allowed:?}"),
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_text_is_rejected() {
        assert!(require_non_empty("name", "  \t").is_some());
        assert!(require_non_empty("name", "Ana").is_none());
    }

    #[test]
    fn open_range_excludes_both_bounds() {
        assert!(require_open_range("age", 0, 0, 120).is_some());
        assert!(require_open_range("age", 120, 0, 120).is_some());
        assert!(require_open_range("age", 1, 0, 120).is_none());
        assert!(require_open_range("age", 119, 0, 120).is_none());
    }

    #[test]
    fn positive_rejects_zero_and_nan() {
        assert!(require_positive("height", 0.0).is_some());
        assert!(require_positive("height", -1.2).is_some());
        assert!(require_positive("height", f64::NAN).is_some());
        assert!(require_positive("height", 1.6).is_none());
    }

    #[test]
    fn one_of_is_case_sensitive() {
        let allowed = ["male", "female", "others"];
        assert!(require_one_of("gender", "Male", &allowed).is_some());
        assert!(require_one_of("gender", "female", &allowed).is_none());
    }

    #[test]
    fn error_display_joins_violations() {
        let err = ValidationError::check(vec![
            FieldViolation::new("age", "must be greater than 0 and less than 120"),
            FieldViolation::new("weight", "must be greater than 0"),
        ])
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "age: must be greater than 0 and less than 120; weight: must be greater than 0"
        );
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn check_passes_without_violations() {
        assert!(ValidationError::check(vec![]).is_ok());
    }
}
