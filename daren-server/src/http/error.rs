//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.
//! Every body has the shape `{"error": <kind>, "message": <text>}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Malformed body or path, or input inconsistent with stored data (400)
    BadRequest { message: String },

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Nothing left to hand out (404)
    Exhausted { message: &'static str },

    /// Unique constraint or duplicate link (409)
    Conflict { resource: &'static str, reason: String },

    /// Database error (500, logged)
    Database(DbError),
}

impl ApiError {
    fn status_and_body(&self) -> (StatusCode, serde_json::Value) {
        match self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": e.to_string()
                }),
            ),
            Self::BadRequest { message } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "bad_request",
                    "message": message
                }),
            ),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("{} '{}' not found", resource, id)
                }),
            ),
            Self::Exhausted { message } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": message
                }),
            ),
            Self::Conflict { resource, reason } => (
                StatusCode::CONFLICT,
                json!({
                    "error": "conflict",
                    "message": format!("{}: {}", resource, reason)
                }),
            ),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::Conflict { resource, reason } => Self::Conflict { resource, reason },
            DbError::Invalid { reason } => Self::BadRequest { message: reason },
            _ => Self::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::Empty { field: "title" });
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let err = ApiError::NotFound {
            resource: "dare",
            id: "9".into(),
        };
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "dare '9' not found");
    }

    #[tokio::test]
    async fn db_errors_map_by_kind() {
        let conflict: ApiError = DbError::Conflict {
            resource: "participant",
            reason: "'Sam' already exists".into(),
        }
        .into();
        assert_eq!(conflict.into_response().status(), StatusCode::CONFLICT);

        let invalid: ApiError = DbError::Invalid {
            reason: "participant 3 is not on trip 1".into(),
        }
        .into();
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn database_error_hides_detail() {
        let err: ApiError = DbError::Sqlx(sqlx::Error::RowNotFound).into();
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "an internal error occurred");
    }
}
