//! daren-server: dares and payback over HTTP
//!
//! - `db`: SQLite pool, schema and repositories
//! - `models`: validated input newtypes
//! - `http`: axum router, HTML pages and the JSON API

pub mod db;
pub mod http;
pub mod models;

pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
