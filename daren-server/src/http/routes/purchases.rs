//! Payback purchase endpoints
//!
//! Creating a purchase also writes its debts; see `PurchaseRepo::create`.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::repos::{Debt, NewPurchase, Purchase, PurchaseRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidPath};
use crate::http::server::AppState;
use crate::models::{Cents, Description};

/// Create purchase request
#[derive(Deserialize)]
pub struct CreatePurchaseRequest {
    pub trip_id: i64,
    pub payer_participant_id: i64,
    pub total_amount: i64,
    pub description: String,
    /// Defaults to now
    #[serde(default)]
    pub purchase_date: Option<DateTime<Utc>>,
    /// Empty or missing: the payer owes the whole amount
    #[serde(default)]
    pub debtor_ids: Vec<i64>,
}

/// Purchase response
#[derive(Debug, Serialize)]
pub struct PurchaseResponse {
    pub id: i64,
    pub trip_id: i64,
    pub trip_name: String,
    pub payer_participant_id: i64,
    pub payer_name: String,
    pub total_amount: i64,
    pub description: String,
    pub purchase_date: String,
    pub created_at: String,
}

impl From<Purchase> for PurchaseResponse {
    fn from(p: Purchase) -> Self {
        Self {
            id: p.id,
            trip_id: p.trip_id,
            trip_name: p.trip_name,
            payer_participant_id: p.payer_participant_id,
            payer_name: p.payer_name,
            total_amount: p.total_amount,
            description: p.description,
            purchase_date: p.purchase_date.to_rfc3339(),
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

/// Debt response
#[derive(Debug, Serialize)]
pub struct DebtResponse {
    pub id: i64,
    pub original_purchase_id: i64,
    pub debtor_participant_id: i64,
    pub debtor_name: String,
    pub amount_owed: i64,
    pub created_at: String,
}

impl From<Debt> for DebtResponse {
    fn from(d: Debt) -> Self {
        Self {
            id: d.id,
            original_purchase_id: d.purchase_id,
            debtor_participant_id: d.debtor_participant_id,
            debtor_name: d.debtor_name,
            amount_owed: d.amount_owed,
            created_at: d.created_at.to_rfc3339(),
        }
    }
}

/// Purchase together with the debts it created
#[derive(Debug, Serialize)]
pub struct PurchaseWithDebts {
    pub purchase: PurchaseResponse,
    pub debts: Vec<DebtResponse>,
}

pub(crate) fn debt_list(debts: Vec<Debt>) -> Json<Vec<DebtResponse>> {
    Json(debts.into_iter().map(DebtResponse::from).collect())
}

/// POST /purchases
async fn create_purchase(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreatePurchaseRequest>,
) -> Result<(StatusCode, Json<PurchaseWithDebts>), ApiError> {
    let new = NewPurchase {
        trip_id: req.trip_id,
        payer_id: req.payer_participant_id,
        total: Cents::new(req.total_amount)?,
        description: Description::new(&req.description)?,
        purchase_date: req.purchase_date.unwrap_or_else(Utc::now),
        debtor_ids: req.debtor_ids,
    };

    let (purchase, debts) = PurchaseRepo::new(&state.pool).create(new).await?;

    Ok((
        StatusCode::CREATED,
        Json(PurchaseWithDebts {
            purchase: PurchaseResponse::from(purchase),
            debts: debts.into_iter().map(DebtResponse::from).collect(),
        }),
    ))
}

/// GET /purchases/{purchase_id}
async fn get_purchase(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
) -> Result<Json<PurchaseResponse>, ApiError> {
    let purchase = PurchaseRepo::new(&state.pool).get(id).await?;
    Ok(Json(PurchaseResponse::from(purchase)))
}

/// GET /purchases/{purchase_id}/debts
async fn purchase_debts(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i64>,
) -> Result<Json<Vec<DebtResponse>>, ApiError> {
    let debts = PurchaseRepo::new(&state.pool).debts_for_purchase(id).await?;
    Ok(debt_list(debts))
}

/// GET /trips/{trip_id}/purchases
async fn trip_purchases(
    State(state): State<Arc<AppState>>,
    ValidPath(trip_id): ValidPath<i64>,
) -> Result<Json<Vec<PurchaseResponse>>, ApiError> {
    let purchases = PurchaseRepo::new(&state.pool).list_for_trip(trip_id).await?;
    Ok(Json(purchases.into_iter().map(PurchaseResponse::from).collect()))
}

/// Purchase routes, relative to /api/v1/payback
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/purchases", post(create_purchase))
        .route("/purchases/{purchase_id}", get(get_purchase))
        .route("/purchases/{purchase_id}/debts", get(purchase_debts))
        .route("/trips/{trip_id}/purchases", get(trip_purchases))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults() {
        let req: CreatePurchaseRequest = serde_json::from_str(
            r#"{"trip_id":1,"payer_participant_id":2,"total_amount":500,"description":"Taxi"}"#,
        )
        .unwrap();
        assert!(req.debtor_ids.is_empty());
        assert!(req.purchase_date.is_none());
    }

    #[test]
    fn request_accepts_rfc3339_date() {
        let req: CreatePurchaseRequest = serde_json::from_str(
            r#"{"trip_id":1,"payer_participant_id":2,"total_amount":500,
                "description":"Taxi","purchase_date":"2024-05-01T18:30:00Z","debtor_ids":[2,3]}"#,
        )
        .unwrap();
        assert_eq!(req.debtor_ids, vec![2, 3]);
        assert_eq!(
            req.purchase_date.unwrap().to_rfc3339(),
            "2024-05-01T18:30:00+00:00"
        );
    }
}
