use reqwest::header::USER_AGENT;
use thiserror::Error;
use tracing::debug;

use crate::reddit::listing::{ApiComment, ApiPost, ApiThread, Listing};
use threadstash_core::types::thread_url::ThreadUrl;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected payload shape: {0}")]
    Shape(&'static str),
}

/// Fetches the `.json` twin of a thread page. One request, no retries; the
/// caller never sees a failure, only the absence of data.
#[derive(Debug, Clone)]
pub struct ThreadApiClient {
    http: reqwest::Client,
    user_agent: String,
}

impl ThreadApiClient {
    pub fn new(http: reqwest::Client, user_agent: impl Into<String>) -> Self {
        Self {
            http,
            user_agent: user_agent.into(),
        }
    }

    /// Best-effort fetch of the thread's API representation. Network errors,
    /// bad statuses, malformed JSON, and shape mismatches all collapse to
    /// `None`; extraction then leans on the page markup.
    pub async fn fetch_thread(&self, thread: &ThreadUrl) -> Option<ApiThread> {
        match self.try_fetch(thread).await {
            Ok(data) => Some(data),
            Err(err) => {
                debug!(url = %thread, error = %err, "thread api fetch failed");
                None
            }
        }
    }

    async fn try_fetch(&self, thread: &ThreadUrl) -> Result<ApiThread, ApiError> {
        let endpoint = thread.json_endpoint();
        let response = self
            .http
            .get(&endpoint)
            .header(USER_AGENT, self.user_agent.as_str())
            .send()
            .await?
            .error_for_status()?;
        let (posts, comments): (Listing<ApiPost>, Listing<ApiComment>) = response.json().await?;
        let post = posts
            .data
            .children
            .into_iter()
            .next()
            .ok_or(ApiError::Shape("post listing has no children"))?
            .data;
        let comments = comments
            .data
            .children
            .into_iter()
            .map(|thing| thing.data)
            .collect();
        Ok(ApiThread { post, comments })
    }
}
