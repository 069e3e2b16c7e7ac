//! Dare repository
//!
//! - create: plain INSERT, seen starts false
//! - take_random_unseen: pick + flag seen in one UPDATE ... RETURNING

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use super::DbError;
use crate::models::{Author, DareText, DareTitle};

/// Dare record from database
#[derive(Debug, Clone, FromRow)]
pub struct Dare {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub added_by: String,
    pub seen: bool,
    pub created_at: DateTime<Utc>,
}

const DARE_COLUMNS: &str =
    "dare_id AS id, title, dare_text AS text, added_by, seen, created_at";

/// Dare repository
pub struct DareRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> DareRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a new, unseen dare.
    pub async fn create(
        &self,
        title: DareTitle,
        text: DareText,
        author: Author,
    ) -> Result<Dare, DbError> {
        let dare: Dare = sqlx::query_as(&format!(
            r#"
            INSERT INTO dares (title, dare_text, added_by, seen, created_at)
            VALUES (?, ?, ?, 0, ?)
            RETURNING {DARE_COLUMNS}
            "#
        ))
        .bind(title.as_str())
        .bind(text.as_str())
        .bind(author.as_str())
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(dare_id = dare.id, "dare created");
        Ok(dare)
    }

    /// Get a single dare by ID.
    pub async fn get(&self, id: i64) -> Result<Dare, DbError> {
        sqlx::query_as(&format!("SELECT {DARE_COLUMNS} FROM dares WHERE dare_id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("dare", id))
    }

    /// List every dare in creation order.
    pub async fn list(&self) -> Result<Vec<Dare>, DbError> {
        let dares = sqlx::query_as(&format!(
            "SELECT {DARE_COLUMNS} FROM dares ORDER BY dare_id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(dares)
    }

    /// Pick a random unseen dare and flag it seen.
    ///
    /// Selection and update are one statement, so concurrent callers never
    /// receive the same dare. Returns `None` once every dare has been seen.
    pub async fn take_random_unseen(&self) -> Result<Option<Dare>, DbError> {
        let dare: Option<Dare> = sqlx::query_as(&format!(
            r#"
            UPDATE dares SET seen = 1
            WHERE dare_id = (
                SELECT dare_id FROM dares
                WHERE seen = 0
                ORDER BY RANDOM()
                LIMIT 1
            )
            RETURNING {DARE_COLUMNS}
            "#
        ))
        .fetch_optional(self.pool)
        .await?;

        if let Some(ref d) = dare {
            tracing::debug!(dare_id = d.id, "dare marked seen");
        }
        Ok(dare)
    }

    /// Delete a dare by ID.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM dares WHERE dare_id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("dare", id));
        }

        tracing::debug!(dare_id = id, "dare deleted");
        Ok(())
    }
}
