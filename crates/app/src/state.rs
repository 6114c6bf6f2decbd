use std::sync::Arc;

use reqwest::Client;

use crate::config::AppConfig;
use threadstash_infra::reddit::ThreadApiClient;
use threadstash_infra::store::SavedPostStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub http_client: Client,
    pub api_client: ThreadApiClient,
    pub store: SavedPostStore,
}
