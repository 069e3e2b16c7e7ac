//! Participant repository
//!
//! Names are unique; a second create with the same name is a Conflict.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use super::DbError;
use crate::models::ParticipantName;

/// Participant record from database
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Participant {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Participant repository
pub struct ParticipantRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ParticipantRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a participant. Fails with Conflict if the name is taken.
    pub async fn create(&self, name: ParticipantName) -> Result<Participant, DbError> {
        let participant: Option<Participant> = sqlx::query_as(
            r#"
            INSERT INTO participants (name, created_at) VALUES (?, ?)
            ON CONFLICT (name) DO NOTHING
            RETURNING participant_id AS id, name, created_at
            "#,
        )
        .bind(name.as_str())
        .bind(Utc::now())
        .fetch_optional(self.pool)
        .await?;

        let participant = participant.ok_or_else(|| DbError::Conflict {
            resource: "participant",
            reason: format!("'{}' already exists", name.as_str()),
        })?;

        tracing::debug!(participant_id = participant.id, "participant created");
        Ok(participant)
    }

    /// Get a participant by ID.
    pub async fn get(&self, id: i64) -> Result<Participant, DbError> {
        sqlx::query_as(
            "SELECT participant_id AS id, name, created_at FROM participants WHERE participant_id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("participant", id))
    }

    /// Get a participant by exact name.
    pub async fn get_by_name(&self, name: &str) -> Result<Participant, DbError> {
        sqlx::query_as(
            "SELECT participant_id AS id, name, created_at FROM participants WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("participant", name))
    }

    /// List all participants ordered by name.
    pub async fn list(&self) -> Result<Vec<Participant>, DbError> {
        let participants = sqlx::query_as(
            "SELECT participant_id AS id, name, created_at FROM participants ORDER BY name, participant_id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(participants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn name(s: &str) -> ParticipantName {
        ParticipantName::new(s).unwrap()
    }

    #[tokio::test]
    async fn create_and_lookup() {
        let pool = test_pool().await;
        let repo = ParticipantRepo::new(&pool);

        let sam = repo.create(name("Sam")).await.unwrap();

        assert_eq!(repo.get(sam.id).await.unwrap(), sam);
        assert_eq!(repo.get_by_name("Sam").await.unwrap(), sam);
    }

    #[tokio::test]
    async fn duplicate_name_conflicts() {
        let pool = test_pool().await;
        let repo = ParticipantRepo::new(&pool);

        repo.create(name("Robin")).await.unwrap();
        let err = repo.create(name("Robin")).await.unwrap_err();

        assert!(matches!(err, DbError::Conflict { resource: "participant", .. }));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_participant() {
        let pool = test_pool().await;
        let repo = ParticipantRepo::new(&pool);

        assert!(matches!(repo.get(7).await, Err(DbError::NotFound { .. })));
        assert!(matches!(
            repo.get_by_name("nobody").await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn list_sorted_by_name() {
        let pool = test_pool().await;
        let repo = ParticipantRepo::new(&pool);
        for n in ["Zoe", "Alex", "Mia"] {
            repo.create(name(n)).await.unwrap();
        }

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Alex", "Mia", "Zoe"]);
    }
}
