use std::sync::Arc;

use reqwest::Client;
use thiserror::Error;

use crate::config::AppConfig;
use crate::state::AppState;
use threadstash_infra::reddit::ThreadApiClient;
use threadstash_infra::store::SavedPostStore;

#[derive(Debug, Error)]
pub enum WiringError {
    #[error("http client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub fn build_state(config: AppConfig) -> Result<AppState, WiringError> {
    let client = Client::builder().timeout(config.request_timeout).build()?;
    let api_client = ThreadApiClient::new(client.clone(), config.user_agent.clone());
    let store = SavedPostStore::new(&config.data_file);
    Ok(AppState {
        config: Arc::new(config),
        http_client: client,
        api_client,
        store,
    })
}
