//! daren-core: shared domain logic for the daren workspace
//!
//! - `split`: equal-split arithmetic for payback purchases and balance tallies
//! - `config`: TOML + environment configuration
//! - `error`: structured errors for the above

pub mod config;
pub mod error;
pub mod split;

pub use config::{DarenConfig, DatabaseSettings, ServerSettings};
pub use error::{DarenError, Result};
pub use split::{split_purchase, tally, Balance, ParticipantId, Share, SplitError};
