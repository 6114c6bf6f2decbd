use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extract::{self, CommentsPayload};
use crate::http::routes::{ThreadParamError, parse_thread_param};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CommentsParams {
    pub url: Option<String>,
}

#[derive(Debug, Error)]
pub enum CommentsApiError {
    #[error("url is required")]
    MissingUrl,
    #[error("not a reddit thread page")]
    NotAThreadPage,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Returns the flattened comments together with the supplementary post
/// fields the fetch surfaced, so callers can hand both straight to a save.
pub async fn get_comments(
    State(state): State<AppState>,
    Query(params): Query<CommentsParams>,
) -> Result<Json<CommentsPayload>, CommentsApiError> {
    let thread = parse_thread_param(params.url)?;
    let payload = extract::thread_comments(&state, &thread).await;
    Ok(Json(payload))
}

impl From<ThreadParamError> for CommentsApiError {
    fn from(err: ThreadParamError) -> Self {
        match err {
            ThreadParamError::Missing => CommentsApiError::MissingUrl,
            ThreadParamError::Ineligible => CommentsApiError::NotAThreadPage,
        }
    }
}

impl IntoResponse for CommentsApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            CommentsApiError::MissingUrl | CommentsApiError::NotAThreadPage => {
                StatusCode::BAD_REQUEST
            }
        };
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
