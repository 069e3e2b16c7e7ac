//! Payback input validation: participant and trip names, amounts

use once_cell::sync::Lazy;
use regex::Regex;

use super::validation::bounded_text;
use super::ValidationError;

/// Maximum length for participant names
const MAX_PARTICIPANT_NAME_LEN: usize = 64;

/// Maximum length for trip names
const MAX_TRIP_NAME_LEN: usize = 128;

/// Maximum length for purchase descriptions
const MAX_DESCRIPTION_LEN: usize = 256;

/// Starts with a letter or digit, then letters, digits, spaces and ' . _ -
static NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{L}\p{N}][\p{L}\p{N} '._-]*$").expect("invalid participant name regex")
});

/// Validated participant name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParticipantName(String);

impl ParticipantName {
    /// Create a new participant name.
    ///
    /// # Rules
    /// - Trimmed, non-empty, max 64 characters
    /// - Letters, digits, spaces and `' . _ -`
    /// - Must start with a letter or digit
    ///
    /// # Example
    /// ```
    /// use daren_server::models::ParticipantName;
    ///
    /// assert!(ParticipantName::new("Anne-Marie O'Neil").is_ok());
    /// assert!(ParticipantName::new("-dash").is_err());
    /// assert!(ParticipantName::new("<script>").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let name = bounded_text(s, "participant name", MAX_PARTICIPANT_NAME_LEN)?;

        if !NAME_RE.is_match(&name) {
            return Err(ValidationError::InvalidFormat {
                field: "participant name",
                reason: "must start with a letter or digit and contain only letters, digits, spaces and ' . _ -",
            });
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ParticipantName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated trip name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripName(String);

impl TripName {
    /// Trimmed, non-empty, max 128 characters.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded_text(s, "trip name", MAX_TRIP_NAME_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated purchase description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    /// Trimmed, non-empty, max 256 characters.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded_text(s, "description", MAX_DESCRIPTION_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Largest accepted purchase total: ten billion in major units
pub const MAX_CENTS: i64 = 1_000_000_000_000;

/// Amount of money in cents, in `1..=MAX_CENTS`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cents(i64);

impl Cents {
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value <= 0 {
            return Err(ValidationError::NotPositive {
                field: "total_amount",
                value,
            });
        }

        if value > MAX_CENTS {
            return Err(ValidationError::TooLarge {
                field: "total_amount",
                max: MAX_CENTS,
            });
        }

        Ok(Self(value))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_participant_names() {
        assert!(ParticipantName::new("Sam").is_ok());
        assert!(ParticipantName::new("sam.k").is_ok());
        assert!(ParticipantName::new("José Álvarez").is_ok());
        assert!(ParticipantName::new("4th_roommate").is_ok());
    }

    #[test]
    fn participant_name_is_trimmed() {
        let name = ParticipantName::new("  Robin  ").unwrap();
        assert_eq!(name.as_str(), "Robin");
    }

    #[test]
    fn rejects_bad_participant_names() {
        let err = ParticipantName::new("").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));

        let err = ParticipantName::new("'quoted'").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));

        let err = ParticipantName::new("a;b").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));

        let err = ParticipantName::new(&"n".repeat(65)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 64, .. }));
    }

    #[test]
    fn trip_name_allows_punctuation() {
        assert!(TripName::new("Lisbon (spring '25)!").is_ok());
        assert!(TripName::new(" ").is_err());
    }

    #[test]
    fn cents_must_be_positive() {
        assert_eq!(Cents::new(1).unwrap().get(), 1);
        assert!(matches!(
            Cents::new(0).unwrap_err(),
            ValidationError::NotPositive { value: 0, .. }
        ));
        assert!(Cents::new(-250).is_err());
    }

    #[test]
    fn cents_are_capped() {
        assert_eq!(Cents::new(MAX_CENTS).unwrap().get(), MAX_CENTS);
        assert!(matches!(
            Cents::new(MAX_CENTS + 1).unwrap_err(),
            ValidationError::TooLarge { max: MAX_CENTS, .. }
        ));
        assert!(Cents::new(5_000_000_000_000_000_000).is_err());
    }

    #[test]
    fn description_bounds() {
        assert!(Description::new("Dinner").is_ok());
        assert!(Description::new("").is_err());
        assert!(Description::new(&"d".repeat(257)).is_err());
    }
}
