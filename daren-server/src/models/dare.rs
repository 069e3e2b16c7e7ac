//! Dare input validation

use super::validation::bounded_text;
use super::ValidationError;

/// Maximum length for dare titles
const MAX_TITLE_LEN: usize = 128;

/// Maximum length for dare text
const MAX_TEXT_LEN: usize = 1000;

/// Maximum length for the author field
const MAX_AUTHOR_LEN: usize = 64;

/// Stored when a dare is submitted without an author
pub const ANONYMOUS: &str = "anonymous";

/// Validated dare title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DareTitle(String);

impl DareTitle {
    /// Create a new dare title.
    ///
    /// # Rules
    /// - Non-empty (after trimming whitespace)
    /// - Max 128 characters
    ///
    /// # Example
    /// ```
    /// use daren_server::models::DareTitle;
    ///
    /// assert!(DareTitle::new("Karaoke").is_ok());
    /// assert!(DareTitle::new("   ").is_err());  // whitespace only
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded_text(s, "title", MAX_TITLE_LEN).map(Self)
    }

    /// Get the title as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated dare text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DareText(String);

impl DareText {
    /// Create new dare text: non-empty after trimming, max 1000 characters.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded_text(s, "text", MAX_TEXT_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Who submitted a dare
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author(String);

impl Author {
    /// Missing or blank authors become "anonymous".
    pub fn new(s: Option<&str>) -> Result<Self, ValidationError> {
        let trimmed = s.map(str::trim).unwrap_or_default();

        if trimmed.is_empty() {
            return Ok(Self(ANONYMOUS.to_owned()));
        }

        if trimmed.chars().count() > MAX_AUTHOR_LEN {
            return Err(ValidationError::TooLong {
                field: "addedBy",
                max: MAX_AUTHOR_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_trimmed() {
        let title = DareTitle::new("  Sing loudly  ").unwrap();
        assert_eq!(title.as_str(), "Sing loudly");
    }

    #[test]
    fn rejects_empty_title() {
        let err = DareTitle::new("").unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "title" });
    }

    #[test]
    fn title_max_length() {
        assert!(DareTitle::new(&"a".repeat(128)).is_ok());

        let err = DareTitle::new(&"a".repeat(129)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 128, .. }));
    }

    #[test]
    fn text_max_length() {
        assert!(DareText::new(&"x".repeat(1000)).is_ok());
        assert!(DareText::new(&"x".repeat(1001)).is_err());
        assert!(DareText::new("\n\t").is_err());
    }

    #[test]
    fn blank_author_is_anonymous() {
        assert_eq!(Author::new(None).unwrap().as_str(), ANONYMOUS);
        assert_eq!(Author::new(Some("   ")).unwrap().as_str(), ANONYMOUS);
        assert_eq!(Author::new(Some(" sam ")).unwrap().as_str(), "sam");
    }

    #[test]
    fn long_author_rejected() {
        let err = Author::new(Some(&"z".repeat(65))).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { field: "addedBy", .. }));
    }
}
