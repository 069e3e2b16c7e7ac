//! Payback trip endpoints: rosters, per-person ledgers and balances

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::participants::ParticipantResponse;
use super::purchases::{debt_list, DebtResponse};
use crate::db::repos::{LedgerRepo, ParticipantBalance, TripRepo, TripWithParticipants};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidPath};
use crate::http::server::AppState;
use crate::models::TripName;

/// Create trip request
#[derive(Deserialize)]
pub struct CreateTripRequest {
    pub name: String,
}

/// Add participant to trip request
#[derive(Deserialize)]
pub struct AddParticipantRequest {
    pub participant_id: i64,
}

/// Trip response, roster included
#[derive(Debug, Serialize)]
pub struct TripResponse {
    pub id: i64,
    pub name: String,
    pub created_at: String,
    pub participants: Vec<ParticipantResponse>,
}

impl From<TripWithParticipants> for TripResponse {
    fn from(t: TripWithParticipants) -> Self {
        Self {
            id: t.trip.id,
            name: t.trip.name,
            created_at: t.trip.created_at.to_rfc3339(),
            participants: t
                .participants
                .into_iter()
                .map(ParticipantResponse::from)
                .collect(),
        }
    }
}

/// Balance response
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub participant_id: i64,
    pub name: String,
    pub paid: i64,
    pub owed: i64,
    pub net: i64,
}

impl From<ParticipantBalance> for BalanceResponse {
    fn from(b: ParticipantBalance) -> Self {
        Self {
            participant_id: b.participant_id,
            name: b.name,
            paid: b.paid,
            owed: b.owed,
            net: b.net,
        }
    }
}

/// POST /trips
async fn create_trip(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateTripRequest>,
) -> Result<(StatusCode, Json<TripResponse>), ApiError> {
    let name = TripName::new(&req.name)?;
    let trip = TripRepo::new(&state.pool).create(name).await?;

    let response = TripResponse::from(TripWithParticipants {
        trip,
        participants: Vec::new(),
    });
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /trips
async fn list_trips(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TripResponse>>, ApiError> {
    let trips = TripRepo::new(&state.pool).list().await?;
    Ok(Json(trips.into_iter().map(TripResponse::from).collect()))
}

/// GET /trips/{trip_id}
async fn get_trip(
    State(state): State<Arc<AppState>>,
    ValidPath(trip_id): ValidPath<i64>,
) -> Result<Json<TripResponse>, ApiError> {
    let trip = TripRepo::new(&state.pool).get(trip_id).await?;
    Ok(Json(TripResponse::from(trip)))
}

/// POST /trips/{trip_id}/participants - returns the updated trip
async fn add_participant(
    State(state): State<Arc<AppState>>,
    ValidPath(trip_id): ValidPath<i64>,
    ValidJson(req): ValidJson<AddParticipantRequest>,
) -> Result<(StatusCode, Json<TripResponse>), ApiError> {
    let repo = TripRepo::new(&state.pool);
    repo.add_participant(trip_id, req.participant_id).await?;
    let trip = repo.get(trip_id).await?;

    Ok((StatusCode::CREATED, Json(TripResponse::from(trip))))
}

/// GET /trips/{trip_id}/participants
async fn trip_participants(
    State(state): State<Arc<AppState>>,
    ValidPath(trip_id): ValidPath<i64>,
) -> Result<Json<Vec<ParticipantResponse>>, ApiError> {
    let participants = TripRepo::new(&state.pool).participants(trip_id).await?;
    Ok(Json(participants.into_iter().map(ParticipantResponse::from).collect()))
}

/// DELETE /trips/{trip_id}/participants/{participant_id}
async fn remove_participant(
    State(state): State<Arc<AppState>>,
    ValidPath((trip_id, participant_id)): ValidPath<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    TripRepo::new(&state.pool)
        .remove_participant(trip_id, participant_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /trips/{trip_id}/participants/{participant_id}/debts
async fn participant_debts(
    State(state): State<Arc<AppState>>,
    ValidPath((trip_id, participant_id)): ValidPath<(i64, i64)>,
) -> Result<Json<Vec<DebtResponse>>, ApiError> {
    let debts = LedgerRepo::new(&state.pool)
        .debts_of(trip_id, participant_id)
        .await?;
    Ok(debt_list(debts))
}

/// GET /trips/{trip_id}/participants/{participant_id}/credits
async fn participant_credits(
    State(state): State<Arc<AppState>>,
    ValidPath((trip_id, participant_id)): ValidPath<(i64, i64)>,
) -> Result<Json<Vec<DebtResponse>>, ApiError> {
    let credits = LedgerRepo::new(&state.pool)
        .credits_of(trip_id, participant_id)
        .await?;
    Ok(debt_list(credits))
}

/// GET /trips/{trip_id}/balances
async fn trip_balances(
    State(state): State<Arc<AppState>>,
    ValidPath(trip_id): ValidPath<i64>,
) -> Result<Json<Vec<BalanceResponse>>, ApiError> {
    let balances = LedgerRepo::new(&state.pool).balances(trip_id).await?;
    Ok(Json(balances.into_iter().map(BalanceResponse::from).collect()))
}

/// Trip routes, relative to /api/v1/payback
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/trips", get(list_trips).post(create_trip))
        .route("/trips/{trip_id}", get(get_trip))
        .route(
            "/trips/{trip_id}/participants",
            get(trip_participants).post(add_participant),
        )
        .route(
            "/trips/{trip_id}/participants/{participant_id}",
            delete(remove_participant),
        )
        .route(
            "/trips/{trip_id}/participants/{participant_id}/debts",
            get(participant_debts),
        )
        .route(
            "/trips/{trip_id}/participants/{participant_id}/credits",
            get(participant_credits),
        )
        .route("/trips/{trip_id}/balances", get(trip_balances))
}
