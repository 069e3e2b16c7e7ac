//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Uses JOINs for list operations (no N+1)
//! - Handles conflicts via ON CONFLICT (no check-then-insert)
//! - Uses transactions for multi-step operations

pub mod dares;
pub mod ledger;
pub mod participants;
pub mod purchases;
pub mod trips;

pub use dares::{Dare, DareRepo};
pub use ledger::{LedgerRepo, ParticipantBalance};
pub use participants::{Participant, ParticipantRepo};
pub use purchases::{Debt, NewPurchase, Purchase, PurchaseRepo};
pub use trips::{Trip, TripRepo, TripWithParticipants};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("conflict: {resource} {reason}")]
    Conflict { resource: &'static str, reason: String },

    /// Request is well-formed but inconsistent with stored data
    #[error("invalid: {reason}")]
    Invalid { reason: String },
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

pub(crate) const TRIP_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM trips WHERE trip_id = ?)";
pub(crate) const PARTICIPANT_EXISTS: &str =
    "SELECT EXISTS(SELECT 1 FROM participants WHERE participant_id = ?)";
pub(crate) const PURCHASE_EXISTS: &str =
    "SELECT EXISTS(SELECT 1 FROM original_purchases WHERE purchase_id = ?)";

/// Run one of the `*_EXISTS` queries on a pool or inside a transaction.
pub(crate) async fn row_exists<'e, E>(
    executor: E,
    sql: &'static str,
    id: i64,
) -> Result<bool, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let (exists,): (bool,) = sqlx::query_as(sql).bind(id).fetch_one(executor).await?;
    Ok(exists)
}
