//! Route handlers organized by resource

pub mod dares;
pub mod health;
pub mod pages;
pub mod participants;
pub mod purchases;
pub mod trips;

use std::sync::Arc;

use axum::Router;

use crate::http::server::AppState;

/// Everything mounted under /api/v1
pub fn api_router() -> Router<Arc<AppState>> {
    let payback = Router::new()
        .merge(participants::router())
        .merge(trips::router())
        .merge(purchases::router());

    Router::new()
        .merge(dares::router())
        .nest("/payback", payback)
}
