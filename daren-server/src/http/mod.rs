//! HTTP server layer
//!
//! Axum server with:
//! - HTML pages for dares
//! - JSON API under /api/v1
//! - Request tracing and CORS
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod html;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
