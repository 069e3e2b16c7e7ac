//! Payback participant endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::repos::{Participant, ParticipantRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidPath};
use crate::http::server::AppState;
use crate::models::ParticipantName;

/// Create participant request
#[derive(Deserialize)]
pub struct CreateParticipantRequest {
    pub name: String,
}

/// Participant response
#[derive(Debug, Serialize)]
pub struct ParticipantResponse {
    pub id: i64,
    pub name: String,
    pub created_at: String,
}

impl From<Participant> for ParticipantResponse {
    fn from(p: Participant) -> Self {
        Self {
            id: p.id,
            name: p.name,
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

/// POST /participants - 409 if the name is taken
async fn create_participant(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateParticipantRequest>,
) -> Result<(StatusCode, Json<ParticipantResponse>), ApiError> {
    let name = ParticipantName::new(&req.name)?;
    let participant = ParticipantRepo::new(&state.pool).create(name).await?;

    Ok((StatusCode::CREATED, Json(ParticipantResponse::from(participant))))
}

/// GET /participants
async fn list_participants(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ParticipantResponse>>, ApiError> {
    let participants = ParticipantRepo::new(&state.pool).list().await?;
    Ok(Json(participants.into_iter().map(ParticipantResponse::from).collect()))
}

/// GET /participants/{participant_id}
async fn get_participant(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
) -> Result<Json<ParticipantResponse>, ApiError> {
    let participant = ParticipantRepo::new(&state.pool).get(id).await?;
    Ok(Json(ParticipantResponse::from(participant)))
}

/// Participant routes, relative to /api/v1/payback
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/participants", get(list_participants).post(create_participant))
        .route("/participants/{participant_id}", get(get_participant))
}
