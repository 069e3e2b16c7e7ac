//! Purchase repository
//!
//! A purchase and its debts are written in one transaction. The split
//! itself comes from `daren_core::split_purchase`, so the stored debts
//! always add up to the purchase total.

use chrono::{DateTime, Utc};
use daren_core::{split_purchase, SplitError};
use sqlx::{FromRow, SqliteConnection, SqlitePool};

use super::{row_exists, DbError, PARTICIPANT_EXISTS, PURCHASE_EXISTS, TRIP_EXISTS};
use crate::models::{Cents, Description};

/// Input for a new purchase
#[derive(Debug, Clone)]
pub struct NewPurchase {
    pub trip_id: i64,
    pub payer_id: i64,
    pub total: Cents,
    pub description: Description,
    pub purchase_date: DateTime<Utc>,
    /// Who shares the cost, in order. Empty means the payer alone.
    pub debtor_ids: Vec<i64>,
}

/// Purchase record with trip and payer names
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Purchase {
    pub id: i64,
    pub trip_id: i64,
    pub trip_name: String,
    pub payer_participant_id: i64,
    pub payer_name: String,
    pub total_amount: i64,
    pub description: String,
    pub purchase_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// One debtor's share of a purchase
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Debt {
    pub id: i64,
    pub purchase_id: i64,
    pub debtor_participant_id: i64,
    pub debtor_name: String,
    pub amount_owed: i64,
    pub created_at: DateTime<Utc>,
}

const PURCHASE_SELECT: &str = r#"
    SELECT p.purchase_id AS id, p.trip_id, t.name AS trip_name,
           p.payer_participant_id, payer.name AS payer_name,
           p.total_amount, p.description, p.purchase_date, p.created_at
    FROM original_purchases p
    JOIN trips t ON t.trip_id = p.trip_id
    JOIN participants payer ON payer.participant_id = p.payer_participant_id
"#;

/// Debt columns joined with the debtor name; callers add `p` (the purchase)
/// when they need to filter on it.
pub(super) const DEBT_SELECT: &str = r#"
    SELECT d.debt_id AS id, d.original_purchase_id AS purchase_id,
           d.debtor_participant_id, debtor.name AS debtor_name,
           d.amount_owed, d.created_at
    FROM individual_debts d
    JOIN participants debtor ON debtor.participant_id = d.debtor_participant_id
    JOIN original_purchases p ON p.purchase_id = d.original_purchase_id
"#;

/// Purchase repository
pub struct PurchaseRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PurchaseRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a purchase and split it into debts.
    ///
    /// Runs in a transaction; nothing is written unless every check passes.
    pub async fn create(&self, new: NewPurchase) -> Result<(Purchase, Vec<Debt>), DbError> {
        let mut tx = self.pool.begin().await?;

        if !row_exists(&mut *tx, TRIP_EXISTS, new.trip_id).await? {
            return Err(DbError::not_found("trip", new.trip_id));
        }

        let people = std::iter::once(new.payer_id).chain(new.debtor_ids.iter().copied());
        for id in people.clone() {
            if !row_exists(&mut *tx, PARTICIPANT_EXISTS, id).await? {
                return Err(DbError::not_found("participant", id));
            }
        }
        for id in people {
            if !is_member(&mut tx, new.trip_id, id).await? {
                return Err(DbError::Invalid {
                    reason: format!("participant {} is not on trip {}", id, new.trip_id),
                });
            }
        }

        let shares = split_purchase(new.payer_id, new.total.get(), &new.debtor_ids).map_err(
            |e: SplitError| DbError::Invalid {
                reason: e.to_string(),
            },
        )?;

        let now = Utc::now();
        let (purchase_id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO original_purchases
                (trip_id, payer_participant_id, total_amount, description, purchase_date, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING purchase_id
            "#,
        )
        .bind(new.trip_id)
        .bind(new.payer_id)
        .bind(new.total.get())
        .bind(new.description.as_str())
        .bind(new.purchase_date)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        for share in &shares {
            sqlx::query(
                r#"
                INSERT INTO individual_debts
                    (original_purchase_id, debtor_participant_id, amount_owed, created_at)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(purchase_id)
            .bind(share.participant_id)
            .bind(share.amount)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        let purchase: Purchase = sqlx::query_as(&format!("{PURCHASE_SELECT} WHERE p.purchase_id = ?"))
            .bind(purchase_id)
            .fetch_one(&mut *tx)
            .await?;
        let debts = fetch_debts(&mut tx, purchase_id).await?;

        tx.commit().await?;

        tracing::debug!(
            purchase_id,
            trip_id = new.trip_id,
            debts = debts.len(),
            "purchase recorded"
        );
        Ok((purchase, debts))
    }

    /// Get a purchase by ID.
    pub async fn get(&self, id: i64) -> Result<Purchase, DbError> {
        sqlx::query_as(&format!("{PURCHASE_SELECT} WHERE p.purchase_id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("purchase", id))
    }

    /// Purchases of a trip, most recent purchase date first.
    pub async fn list_for_trip(&self, trip_id: i64) -> Result<Vec<Purchase>, DbError> {
        if !row_exists(self.pool, TRIP_EXISTS, trip_id).await? {
            return Err(DbError::not_found("trip", trip_id));
        }

        let purchases = sqlx::query_as(&format!(
            "{PURCHASE_SELECT} WHERE p.trip_id = ? ORDER BY p.purchase_date DESC, p.purchase_id DESC"
        ))
        .bind(trip_id)
        .fetch_all(self.pool)
        .await?;

        Ok(purchases)
    }

    /// Debts of one purchase in insertion order.
    pub async fn debts_for_purchase(&self, purchase_id: i64) -> Result<Vec<Debt>, DbError> {
        if !row_exists(self.pool, PURCHASE_EXISTS, purchase_id).await? {
            return Err(DbError::not_found("purchase", purchase_id));
        }

        let mut conn = self.pool.acquire().await?;
        fetch_debts(&mut conn, purchase_id).await
    }
}

async fn is_member(
    conn: &mut SqliteConnection,
    trip_id: i64,
    participant_id: i64,
) -> Result<bool, sqlx::Error> {
    let (member,): (bool,) = sqlx::query_as(
        "SELECT EXISTS(SELECT 1 FROM trip_participants WHERE trip_id = ? AND participant_id = ?)",
    )
    .bind(trip_id)
    .bind(participant_id)
    .fetch_one(conn)
    .await?;

    Ok(member)
}

async fn fetch_debts(conn: &mut SqliteConnection, purchase_id: i64) -> Result<Vec<Debt>, DbError> {
    let debts = sqlx::query_as(&format!(
        "{DEBT_SELECT} WHERE d.original_purchase_id = ? ORDER BY d.debt_id"
    ))
    .bind(purchase_id)
    .fetch_all(conn)
    .await?;

    Ok(debts)
}
