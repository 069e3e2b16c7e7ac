//! Trip repository
//!
//! Trips own a participant roster through `trip_participants`. Listing
//! loads every roster with one JOIN instead of a query per trip.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use super::{row_exists, DbError, Participant, PARTICIPANT_EXISTS, TRIP_EXISTS};
use crate::models::TripName;

/// Trip record from database
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Trip {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Trip with its participant roster
#[derive(Debug, Clone)]
pub struct TripWithParticipants {
    pub trip: Trip,
    pub participants: Vec<Participant>,
}

/// Roster row: participant plus the trip it belongs to
#[derive(FromRow)]
struct RosterRow {
    trip_id: i64,
    #[sqlx(flatten)]
    participant: Participant,
}

/// Trip repository
pub struct TripRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TripRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a trip with an empty roster.
    pub async fn create(&self, name: TripName) -> Result<Trip, DbError> {
        let trip: Trip = sqlx::query_as(
            r#"
            INSERT INTO trips (name, created_at) VALUES (?, ?)
            RETURNING trip_id AS id, name, created_at
            "#,
        )
        .bind(name.as_str())
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(trip_id = trip.id, "trip created");
        Ok(trip)
    }

    /// Get a trip with its participants.
    pub async fn get(&self, id: i64) -> Result<TripWithParticipants, DbError> {
        let trip: Trip = sqlx::query_as(
            "SELECT trip_id AS id, name, created_at FROM trips WHERE trip_id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("trip", id))?;

        let participants = self.roster(id).await?;
        Ok(TripWithParticipants { trip, participants })
    }

    /// List all trips ordered by name, each with its participants.
    ///
    /// Two queries total: trips, then every roster row.
    pub async fn list(&self) -> Result<Vec<TripWithParticipants>, DbError> {
        let trips: Vec<Trip> = sqlx::query_as(
            "SELECT trip_id AS id, name, created_at FROM trips ORDER BY name, trip_id",
        )
        .fetch_all(self.pool)
        .await?;

        let rows: Vec<RosterRow> = sqlx::query_as(
            r#"
            SELECT tp.trip_id, p.participant_id AS id, p.name, p.created_at
            FROM trip_participants tp
            JOIN participants p ON p.participant_id = tp.participant_id
            ORDER BY p.name, p.participant_id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let mut rosters: HashMap<i64, Vec<Participant>> = HashMap::new();
        for row in rows {
            rosters.entry(row.trip_id).or_default().push(row.participant);
        }

        Ok(trips
            .into_iter()
            .map(|trip| TripWithParticipants {
                participants: rosters.remove(&trip.id).unwrap_or_default(),
                trip,
            })
            .collect())
    }

    /// Link a participant to a trip.
    ///
    /// NotFound if either side is missing, Conflict if already linked.
    pub async fn add_participant(&self, trip_id: i64, participant_id: i64) -> Result<(), DbError> {
        if !row_exists(self.pool, TRIP_EXISTS, trip_id).await? {
            return Err(DbError::not_found("trip", trip_id));
        }
        if !row_exists(self.pool, PARTICIPANT_EXISTS, participant_id).await? {
            return Err(DbError::not_found("participant", participant_id));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO trip_participants (trip_id, participant_id) VALUES (?, ?)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(trip_id)
        .bind(participant_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::Conflict {
                resource: "trip participant",
                reason: format!("participant {} is already on trip {}", participant_id, trip_id),
            });
        }

        tracing::debug!(trip_id, participant_id, "participant added to trip");
        Ok(())
    }

    /// Unlink a participant from a trip. NotFound if they were not linked.
    pub async fn remove_participant(
        &self,
        trip_id: i64,
        participant_id: i64,
    ) -> Result<(), DbError> {
        let result = sqlx::query(
            "DELETE FROM trip_participants WHERE trip_id = ? AND participant_id = ?",
        )
        .bind(trip_id)
        .bind(participant_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(
                "trip participant",
                format!("{}/{}", trip_id, participant_id),
            ));
        }

        tracing::debug!(trip_id, participant_id, "participant removed from trip");
        Ok(())
    }

    /// Participants of a trip ordered by name. NotFound if the trip is missing.
    pub async fn participants(&self, trip_id: i64) -> Result<Vec<Participant>, DbError> {
        if !row_exists(self.pool, TRIP_EXISTS, trip_id).await? {
            return Err(DbError::not_found("trip", trip_id));
        }

        self.roster(trip_id).await
    }

    async fn roster(&self, trip_id: i64) -> Result<Vec<Participant>, DbError> {
        let participants = sqlx::query_as(
            r#"
            SELECT p.participant_id AS id, p.name, p.created_at
            FROM participants p
            JOIN trip_participants tp ON tp.participant_id = p.participant_id
            WHERE tp.trip_id = ?
            ORDER BY p.name, p.participant_id
            "#,
        )
        .bind(trip_id)
        .fetch_all(self.pool)
        .await?;

        Ok(participants)
    }
}
