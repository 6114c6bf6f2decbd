//! Record assembly and persistence.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use crate::extract::{self, CommentsPayload, ExtractError};
use crate::state::AppState;
use threadstash_core::domain::post::{PostMetadata, PostRecord};
use threadstash_core::types::thread_url::ThreadUrl;
use threadstash_infra::store::StoreError;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Full-pipeline save: extract everything fresh and persist. The in-page
/// (context menu) entry point.
pub async fn save_thread(state: &AppState, thread: &ThreadUrl) -> Result<PostRecord, SaveError> {
    let sources = extract::gather(state, thread).await;
    let now = Utc::now();
    let metadata = extract::metadata_from_sources(thread, &sources, now)?;
    let payload = extract::comments_from_sources(&sources, now.timestamp());
    persist(state, metadata, payload, now).await
}

/// Save with metadata a caller already holds from an earlier metadata call:
/// only the comments (and their supplement) are refetched. Produces the same
/// record shape as [`save_thread`].
pub async fn save_with_metadata(
    state: &AppState,
    thread: &ThreadUrl,
    metadata: PostMetadata,
) -> Result<PostRecord, SaveError> {
    let sources = extract::gather(state, thread).await;
    let now = Utc::now();
    let payload = extract::comments_from_sources(&sources, now.timestamp());
    persist(state, metadata, payload, now).await
}

async fn persist(
    state: &AppState,
    metadata: PostMetadata,
    payload: CommentsPayload,
    saved_at: DateTime<Utc>,
) -> Result<PostRecord, SaveError> {
    let record = build_record(metadata, payload, saved_at);
    state.store.upsert(record.clone()).await?;
    info!(id = %record.id, comments = record.comments.len(), "post saved");
    Ok(record)
}

/// Both entry points converge here. The supplement's fields win over the
/// cached metadata when non-empty, matching the precedence the comments
/// fetch established; `comment_count` is the flattened sequence length.
pub(crate) fn build_record(
    metadata: PostMetadata,
    payload: CommentsPayload,
    saved_at: DateTime<Utc>,
) -> PostRecord {
    let CommentsPayload { comments, post } = payload;
    PostRecord {
        id: metadata.id,
        title: metadata.title,
        subreddit: metadata.subreddit,
        author: metadata.author,
        score: metadata.score,
        url: metadata.url,
        selftext: prefer(post.selftext, metadata.selftext),
        image_url: prefer(post.image_url, metadata.image_url),
        comment_count: comments.len(),
        comments,
        saved_at,
    }
}

fn prefer(supplement: String, cached: String) -> String {
    if supplement.is_empty() { cached } else { supplement }
}
