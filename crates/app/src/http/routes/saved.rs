use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use thiserror::Error;

use crate::state::AppState;
use threadstash_core::domain::post::PostRecord;
use threadstash_infra::store::StoreError;

#[derive(Debug, Error)]
pub enum SavedApiError {
    #[error("post not found")]
    NotFound,
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Serialize)]
pub struct DeletedBody {
    pub deleted: bool,
}

/// All saved records, most recently saved first.
pub async fn list_saved(State(state): State<AppState>) -> Json<Vec<PostRecord>> {
    Json(state.store.list().await)
}

pub async fn get_saved(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PostRecord>, SavedApiError> {
    match state.store.get(&id).await {
        Some(record) => Ok(Json(record)),
        None => Err(SavedApiError::NotFound),
    }
}

pub async fn delete_saved(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedBody>, SavedApiError> {
    if state.store.delete(&id).await? {
        Ok(Json(DeletedBody { deleted: true }))
    } else {
        Err(SavedApiError::NotFound)
    }
}

impl IntoResponse for SavedApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            SavedApiError::NotFound => StatusCode::NOT_FOUND,
            SavedApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
