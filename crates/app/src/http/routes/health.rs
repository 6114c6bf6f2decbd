use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub modules: HealthModules,
}

#[derive(Debug, Serialize)]
pub struct HealthModules {
    pub store: StoreStatus,
    pub cors: CorsStatus,
}

#[derive(Debug, Serialize)]
pub struct StoreStatus {
    pub path: String,
    pub posts: usize,
}

#[derive(Debug, Serialize)]
pub struct CorsStatus {
    pub enabled: bool,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let posts = state.store.load().await.len();
    Json(HealthResponse {
        status: "ok",
        modules: HealthModules {
            store: StoreStatus {
                path: state.store.path().display().to_string(),
                posts,
            },
            cors: CorsStatus {
                enabled: !state.config.cors_allow_origins.is_empty(),
            },
        },
    })
}
