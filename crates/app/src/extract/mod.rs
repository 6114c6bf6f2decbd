//! The extraction pipeline: api-first, markup-fallback, merged per field.

pub mod comments;
pub mod dom;
pub mod reconcile;
pub mod rules;

use chrono::{DateTime, Utc};
use reqwest::header::USER_AGENT;
use scraper::Html;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::state::AppState;
use threadstash_core::domain::post::{CommentRecord, PostMetadata, PostSupplement};
use threadstash_core::types::thread_url::ThreadUrl;
use threadstash_infra::reddit::ApiThread;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no data available from the api or the page markup")]
    NoData,
}

/// Comments plus the post fields recovered on the way; the supplement rides
/// along explicitly so a later save can merge it without any shared state.
#[derive(Debug, Clone, Serialize)]
pub struct CommentsPayload {
    pub comments: Vec<CommentRecord>,
    pub post: PostSupplement,
}

/// Everything one trigger gathers from the network. Both halves are
/// best-effort; extraction decides per field what absence means.
pub(crate) struct ThreadSources {
    pub api: Option<ApiThread>,
    pub page_html: Option<String>,
}

/// "Get post metadata" action.
pub async fn post_metadata(
    state: &AppState,
    thread: &ThreadUrl,
) -> Result<PostMetadata, ExtractError> {
    let sources = gather(state, thread).await;
    metadata_from_sources(thread, &sources, Utc::now())
}

/// "Get comments" action.
pub async fn thread_comments(state: &AppState, thread: &ThreadUrl) -> CommentsPayload {
    let sources = gather(state, thread).await;
    comments_from_sources(&sources, Utc::now().timestamp())
}

pub(crate) async fn gather(state: &AppState, thread: &ThreadUrl) -> ThreadSources {
    let api = state.api_client.fetch_thread(thread).await;
    let page_html = fetch_page(state, thread.as_str()).await;
    ThreadSources { api, page_html }
}

async fn fetch_page(state: &AppState, url: &str) -> Option<String> {
    let response = state
        .http_client
        .get(url)
        .header(USER_AGENT, state.config.user_agent.as_str())
        .send()
        .await;
    let response = match response.and_then(|resp| resp.error_for_status()) {
        Ok(resp) => resp,
        Err(err) => {
            debug!(url, error = %err, "page fetch failed");
            return None;
        }
    };
    match response.text().await {
        Ok(body) => Some(body),
        Err(err) => {
            debug!(url, error = %err, "page body read failed");
            None
        }
    }
}

pub(crate) fn metadata_from_sources(
    thread: &ThreadUrl,
    sources: &ThreadSources,
    now: DateTime<Utc>,
) -> Result<PostMetadata, ExtractError> {
    if sources.api.is_none() && sources.page_html.is_none() {
        return Err(ExtractError::NoData);
    }
    let scraped = sources
        .page_html
        .as_deref()
        .map(|html| dom::scrape_post(&Html::parse_document(html)))
        .unwrap_or_default();
    Ok(reconcile::merge_post(
        thread,
        sources.api.as_ref().map(|data| &data.post),
        &scraped,
        now,
    ))
}

/// The api path wins whenever api data exists at all, even with zero
/// comments; the markup path is only for pages whose `.json` twin never
/// arrived.
pub(crate) fn comments_from_sources(sources: &ThreadSources, now_utc: i64) -> CommentsPayload {
    if let Some(api) = &sources.api {
        return CommentsPayload {
            comments: comments::flatten_api_comments(&api.comments, now_utc),
            post: reconcile::supplement_from_api(&api.post),
        };
    }
    let scraped = sources
        .page_html
        .as_deref()
        .map(|html| dom::scrape_comments(&Html::parse_document(html)))
        .unwrap_or_default();
    CommentsPayload {
        comments: comments::flatten_dom_comments(scraped, now_utc),
        post: PostSupplement::default(),
    }
}
