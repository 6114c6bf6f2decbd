use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extract::{self, ExtractError};
use crate::http::routes::{ThreadParamError, parse_thread_param};
use crate::state::AppState;
use threadstash_core::domain::post::PostMetadata;

#[derive(Debug, Deserialize)]
pub struct PostParams {
    pub url: Option<String>,
}

#[derive(Debug, Error)]
pub enum PostApiError {
    #[error("url is required")]
    MissingUrl,
    #[error("not a reddit thread page")]
    NotAThreadPage,
    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub async fn get_post(
    State(state): State<AppState>,
    Query(params): Query<PostParams>,
) -> Result<Json<PostMetadata>, PostApiError> {
    let thread = parse_thread_param(params.url)?;
    let metadata = extract::post_metadata(&state, &thread).await?;
    Ok(Json(metadata))
}

impl From<ThreadParamError> for PostApiError {
    fn from(err: ThreadParamError) -> Self {
        match err {
            ThreadParamError::Missing => PostApiError::MissingUrl,
            ThreadParamError::Ineligible => PostApiError::NotAThreadPage,
        }
    }
}

impl IntoResponse for PostApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            PostApiError::MissingUrl | PostApiError::NotAThreadPage => StatusCode::BAD_REQUEST,
            PostApiError::Extract(_) => StatusCode::BAD_GATEWAY,
        };
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
