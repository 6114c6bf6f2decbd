use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::http::routes::{ThreadParamError, parse_thread_param};
use crate::save::{self, SaveError};
use crate::state::AppState;
use threadstash_core::domain::post::{PostMetadata, PostRecord};

/// Body of the save trigger. `metadata` is optional: when present it is the
/// cached result of an earlier metadata call and only the comments are
/// refetched; when absent the full pipeline runs.
#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub url: Option<String>,
    #[serde(default)]
    pub metadata: Option<PostMetadata>,
}

#[derive(Debug, Error)]
pub enum SaveApiError {
    #[error("url is required")]
    MissingUrl,
    #[error("not a reddit thread page")]
    NotAThreadPage,
    #[error("save failed: {0}")]
    Save(#[from] SaveError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub async fn post_save(
    State(state): State<AppState>,
    Json(request): Json<SaveRequest>,
) -> Result<Json<PostRecord>, SaveApiError> {
    let thread = parse_thread_param(request.url)?;
    let record = match request.metadata {
        Some(metadata) => save::save_with_metadata(&state, &thread, metadata).await?,
        None => save::save_thread(&state, &thread).await?,
    };
    Ok(Json(record))
}

impl From<ThreadParamError> for SaveApiError {
    fn from(err: ThreadParamError) -> Self {
        match err {
            ThreadParamError::Missing => SaveApiError::MissingUrl,
            ThreadParamError::Ineligible => SaveApiError::NotAThreadPage,
        }
    }
}

impl IntoResponse for SaveApiError {
    fn into_response(self) -> axum::response::Response {
        warn!(error = %self, "save api error");
        let status = match &self {
            SaveApiError::MissingUrl | SaveApiError::NotAThreadPage => StatusCode::BAD_REQUEST,
            SaveApiError::Save(SaveError::Extract(_)) => StatusCode::BAD_GATEWAY,
            SaveApiError::Save(SaveError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
