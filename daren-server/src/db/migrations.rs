//! Schema creation for dares and payback tables
//!
//! Every statement is idempotent, so `run` is safe on every start.

use sqlx::SqlitePool;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS dares (
        dare_id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        dare_text TEXT NOT NULL,
        added_by TEXT NOT NULL,
        seen INTEGER NOT NULL DEFAULT 0 CHECK (seen IN (0, 1)),
        created_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_dares_seen ON dares (seen)",
    r#"
    CREATE TABLE IF NOT EXISTS participants (
        participant_id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS trips (
        trip_id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS trip_participants (
        trip_id INTEGER NOT NULL REFERENCES trips (trip_id) ON DELETE CASCADE,
        participant_id INTEGER NOT NULL REFERENCES participants (participant_id) ON DELETE CASCADE,
        PRIMARY KEY (trip_id, participant_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS original_purchases (
        purchase_id INTEGER PRIMARY KEY AUTOINCREMENT,
        trip_id INTEGER NOT NULL REFERENCES trips (trip_id) ON DELETE CASCADE,
        payer_participant_id INTEGER NOT NULL REFERENCES participants (participant_id),
        total_amount INTEGER NOT NULL CHECK (total_amount >= 0),
        description TEXT NOT NULL,
        purchase_date TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_purchases_trip ON original_purchases (trip_id)",
    r#"
    CREATE TABLE IF NOT EXISTS individual_debts (
        debt_id INTEGER PRIMARY KEY AUTOINCREMENT,
        original_purchase_id INTEGER NOT NULL REFERENCES original_purchases (purchase_id) ON DELETE CASCADE,
        debtor_participant_id INTEGER NOT NULL REFERENCES participants (participant_id),
        amount_owed INTEGER NOT NULL CHECK (amount_owed >= 0),
        created_at TEXT NOT NULL,
        UNIQUE (original_purchase_id, debtor_participant_id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_debts_debtor ON individual_debts (debtor_participant_id)",
];

/// Create all tables and indexes
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Running schema migrations...");

    for statement in SCHEMA {
        sqlx::query(*statement).execute(pool).await?;
    }

    tracing::info!("Schema migrations complete");
    Ok(())
}
