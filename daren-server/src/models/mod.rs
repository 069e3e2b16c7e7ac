//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod dare;
pub mod payback;
pub mod validation;

pub use dare::{Author, DareText, DareTitle, ANONYMOUS};
pub use payback::{Cents, Description, ParticipantName, TripName, MAX_CENTS};
pub use validation::ValidationError;
