//! HTML pages for dares

use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;

use crate::db::repos::DareRepo;
use crate::http::error::ApiError;
use crate::http::html::{self, FormState};
use crate::http::server::AppState;
use crate::models::{Author, DareText, DareTitle, ValidationError};

/// Fields posted by the create form
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DareForm {
    pub title: String,
    pub text: String,
    #[serde(rename = "addedBy")]
    pub added_by: String,
}

impl DareForm {
    fn validate(&self) -> Result<(DareTitle, DareText, Author), ValidationError> {
        Ok((
            DareTitle::new(&self.title)?,
            DareText::new(&self.text)?,
            Author::new(Some(&self.added_by))?,
        ))
    }
}

/// GET /
async fn index() -> Html<String> {
    html::index()
}

/// GET /create
async fn create_form() -> Html<String> {
    html::create_form(&FormState::default())
}

/// POST /create - redirect on success, re-render with the error otherwise
async fn create_submit(
    State(state): State<Arc<AppState>>,
    form: Result<Form<DareForm>, FormRejection>,
) -> Result<Response, ApiError> {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            let page = html::create_form(&FormState {
                error: Some(rejection.body_text()),
                ..FormState::default()
            });
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
    };

    let (title, text, author) = match form.validate() {
        Ok(valid) => valid,
        Err(e) => {
            let page = html::create_form(&FormState {
                title: &form.title,
                text: &form.text,
                added_by: &form.added_by,
                error: Some(e.to_string()),
            });
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
    };

    DareRepo::new(&state.pool).create(title, text, author).await?;
    Ok(Redirect::to("/success").into_response())
}

/// GET /success
async fn success() -> Html<String> {
    html::success()
}

/// GET /all
async fn all(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let dares = DareRepo::new(&state.pool).list().await?;
    Ok(html::all(&dares))
}

/// GET /random - an exhausted pool is a normal page, not an error
async fn random(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let dare = DareRepo::new(&state.pool).take_random_unseen().await?;
    Ok(html::random(dare.as_ref()))
}

/// Page routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/create", get(create_form).post(create_submit))
        .route("/success", get(success))
        .route("/all", get(all))
        .route("/random", get(random))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_author_is_allowed() {
        let form = DareForm {
            title: "Sing".into(),
            text: "loudly".into(),
            added_by: "  ".into(),
        };
        let (_, _, author) = form.validate().unwrap();
        assert_eq!(author.as_str(), crate::models::ANONYMOUS);
    }

    #[test]
    fn first_invalid_field_is_reported() {
        let form = DareForm {
            title: String::new(),
            text: String::new(),
            added_by: String::new(),
        };
        assert_eq!(
            form.validate().unwrap_err(),
            ValidationError::Empty { field: "title" }
        );
    }
}
