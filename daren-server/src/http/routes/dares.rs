//! Dare JSON endpoints and the /api/v1 welcome

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::db::repos::{Dare, DareRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidPath};
use crate::http::server::AppState;
use crate::models::{Author, DareText, DareTitle};

/// Create dare request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDareRequest {
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub added_by: Option<String>,
}

/// Dare response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DareResponse {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub added_by: String,
    pub seen: bool,
    pub created_at: String,
}

impl From<Dare> for DareResponse {
    fn from(d: Dare) -> Self {
        Self {
            id: d.id,
            title: d.title,
            text: d.text,
            added_by: d.added_by,
            seen: d.seen,
            created_at: d.created_at.to_rfc3339(),
        }
    }
}

/// Delete confirmation
#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

/// GET /api/v1
async fn index() -> Json<Value> {
    Json(json!({ "hello": "Welcome to Daren's API" }))
}

/// POST /dare/create
async fn create_dare(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateDareRequest>,
) -> Result<(StatusCode, Json<DareResponse>), ApiError> {
    let title = DareTitle::new(&req.title)?;
    let text = DareText::new(&req.text)?;
    let author = Author::new(req.added_by.as_deref())?;

    let dare = DareRepo::new(&state.pool).create(title, text, author).await?;
    Ok((StatusCode::CREATED, Json(DareResponse::from(dare))))
}

/// GET /dare/id/{id}
async fn get_dare(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
) -> Result<Json<DareResponse>, ApiError> {
    let dare = DareRepo::new(&state.pool).get(id).await?;
    Ok(Json(DareResponse::from(dare)))
}

/// DELETE /dare/id/{id}
async fn delete_dare(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    DareRepo::new(&state.pool).delete(id).await?;
    Ok(Json(DeleteResponse {
        success: true,
        message: format!("dare {} deleted", id),
    }))
}

/// GET /dare/random - marks the returned dare seen
async fn random_dare(State(state): State<Arc<AppState>>) -> Result<Json<DareResponse>, ApiError> {
    DareRepo::new(&state.pool)
        .take_random_unseen()
        .await?
        .map(|d| Json(DareResponse::from(d)))
        .ok_or(ApiError::Exhausted {
            message: "no dares available",
        })
}

/// GET /dare/all
async fn all_dares(State(state): State<Arc<AppState>>) -> Result<Json<Vec<DareResponse>>, ApiError> {
    let dares = DareRepo::new(&state.pool).list().await?;
    Ok(Json(dares.into_iter().map(DareResponse::from).collect()))
}

/// Dare routes, relative to /api/v1
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/dare/create", post(create_dare))
        .route("/dare/id/{id}", get(get_dare).delete(delete_dare))
        .route("/dare/random", get(random_dare))
        .route("/dare/all", get(all_dares))
}
