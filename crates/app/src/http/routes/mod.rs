pub mod comments;
pub mod health;
pub mod posts;
pub mod save;
pub mod saved;
pub mod viewer;

use threadstash_core::types::thread_url::ThreadUrl;

const MAX_URL_LEN: usize = 2048;

/// Shared validation for the `url` parameter the trigger actions take.
pub(crate) fn parse_thread_param(value: Option<String>) -> Result<ThreadUrl, ThreadParamError> {
    let raw = value.unwrap_or_default();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ThreadParamError::Missing);
    }
    if trimmed.len() > MAX_URL_LEN {
        return Err(ThreadParamError::Ineligible);
    }
    ThreadUrl::try_from(trimmed).map_err(|_| ThreadParamError::Ineligible)
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ThreadParamError {
    Missing,
    Ineligible,
}
