//! Validation error types

use std::fmt;

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Amount must be strictly positive
    NotPositive { field: &'static str, value: i64 },

    /// Amount exceeds the accepted maximum
    TooLarge { field: &'static str, max: i64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::NotPositive { field, value } => {
                write!(f, "{} must be greater than zero (got {})", field, value)
            }
            Self::TooLarge { field, max } => {
                write!(f, "{} must be at most {}", field, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trim `s` and check it is non-empty and at most `max` characters.
pub(crate) fn bounded_text(
    s: &str,
    field: &'static str,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(trimmed.to_owned())
}
