//! Ledger queries over stored debts
//!
//! Read-only views: who owes what within a trip, and the per-person
//! balance computed by `daren_core::tally`.

use sqlx::{FromRow, SqlitePool};

use super::purchases::DEBT_SELECT;
use super::{row_exists, DbError, Debt, PARTICIPANT_EXISTS, TRIP_EXISTS};

/// Paid, owed and net amounts for one participant in a trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantBalance {
    pub participant_id: i64,
    pub name: String,
    pub paid: i64,
    pub owed: i64,
    pub net: i64,
}

#[derive(FromRow)]
struct NameRow {
    participant_id: i64,
    name: String,
}

/// Ledger repository
pub struct LedgerRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> LedgerRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Debts the participant owes on purchases of this trip.
    pub async fn debts_of(&self, trip_id: i64, participant_id: i64) -> Result<Vec<Debt>, DbError> {
        self.ensure_trip_and_participant(trip_id, participant_id).await?;

        let debts = sqlx::query_as(&format!(
            r#"{DEBT_SELECT}
            WHERE p.trip_id = ? AND d.debtor_participant_id = ?
            ORDER BY p.purchase_date DESC, d.debt_id"#
        ))
        .bind(trip_id)
        .bind(participant_id)
        .fetch_all(self.pool)
        .await?;

        Ok(debts)
    }

    /// Debts others owe the participant for purchases they paid on this trip.
    pub async fn credits_of(
        &self,
        trip_id: i64,
        participant_id: i64,
    ) -> Result<Vec<Debt>, DbError> {
        self.ensure_trip_and_participant(trip_id, participant_id).await?;

        let debts = sqlx::query_as(&format!(
            r#"{DEBT_SELECT}
            WHERE p.trip_id = ?
              AND p.payer_participant_id = ?
              AND d.debtor_participant_id != p.payer_participant_id
            ORDER BY p.purchase_date DESC, d.debt_id"#
        ))
        .bind(trip_id)
        .bind(participant_id)
        .fetch_all(self.pool)
        .await?;

        Ok(debts)
    }

    /// Balance per person for a trip, ordered by name.
    ///
    /// Covers current members plus anyone who paid or owes in the trip.
    pub async fn balances(&self, trip_id: i64) -> Result<Vec<ParticipantBalance>, DbError> {
        if !row_exists(self.pool, TRIP_EXISTS, trip_id).await? {
            return Err(DbError::not_found("trip", trip_id));
        }

        let paid: Vec<(i64, i64)> = sqlx::query_as(
            "SELECT payer_participant_id, total_amount FROM original_purchases WHERE trip_id = ?",
        )
        .bind(trip_id)
        .fetch_all(self.pool)
        .await?;

        let owed: Vec<(i64, i64)> = sqlx::query_as(
            r#"
            SELECT d.debtor_participant_id, d.amount_owed
            FROM individual_debts d
            JOIN original_purchases p ON p.purchase_id = d.original_purchase_id
            WHERE p.trip_id = ?
            "#,
        )
        .bind(trip_id)
        .fetch_all(self.pool)
        .await?;

        let names: Vec<NameRow> = sqlx::query_as(
            r#"
            SELECT participant_id, name FROM participants
            WHERE participant_id IN (
                SELECT participant_id FROM trip_participants WHERE trip_id = ?1
                UNION
                SELECT payer_participant_id FROM original_purchases WHERE trip_id = ?1
                UNION
                SELECT d.debtor_participant_id
                FROM individual_debts d
                JOIN original_purchases p ON p.purchase_id = d.original_purchase_id
                WHERE p.trip_id = ?1
            )
            ORDER BY name, participant_id
            "#,
        )
        .bind(trip_id)
        .fetch_all(self.pool)
        .await?;

        let totals = daren_core::tally(paid, owed).map_err(|e| DbError::Invalid {
            reason: e.to_string(),
        })?;

        Ok(names
            .into_iter()
            .map(|row| {
                let balance = totals.get(&row.participant_id).copied().unwrap_or_default();
                ParticipantBalance {
                    participant_id: row.participant_id,
                    name: row.name,
                    paid: balance.paid,
                    owed: balance.owed,
                    net: balance.net,
                }
            })
            .collect())
    }

    async fn ensure_trip_and_participant(
        &self,
        trip_id: i64,
        participant_id: i64,
    ) -> Result<(), DbError> {
        if !row_exists(self.pool, TRIP_EXISTS, trip_id).await? {
            return Err(DbError::not_found("trip", trip_id));
        }
        if !row_exists(self.pool, PARTICIPANT_EXISTS, participant_id).await? {
            return Err(DbError::not_found("participant", participant_id));
        }
        Ok(())
    }
}
