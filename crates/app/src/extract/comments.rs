//! Reply-tree flattening into the depth-annotated comment sequence.

use rand::Rng;

use threadstash_core::domain::post::CommentRecord;
use threadstash_core::types::relative_time::relative_age;
use threadstash_infra::reddit::ApiComment;

use super::dom::DomComment;

const DELETED_BODY: &str = "[deleted]";
const SECONDS_PER_DAY: i64 = 86_400;

/// Depth-first pre-order fold of the API reply tree. A node whose body is
/// missing, empty, or `[deleted]` produces nothing and its subtree is not
/// visited; every emitted record precedes its children.
pub fn flatten_api_comments(comments: &[ApiComment], now_utc: i64) -> Vec<CommentRecord> {
    comments
        .iter()
        .flat_map(|comment| flatten_node(comment, 0, now_utc))
        .collect()
}

fn flatten_node(comment: &ApiComment, depth: u32, now_utc: i64) -> Vec<CommentRecord> {
    let Some(body) = usable_body(comment) else {
        return Vec::new();
    };
    let created_utc = comment.created_utc as i64;
    let mut records = vec![CommentRecord {
        id: comment.id.clone(),
        author: comment.author.clone(),
        body,
        score: comment.score,
        depth,
        time_ago: relative_age(created_utc, now_utc),
        created_utc,
        time_estimated: false,
    }];
    for reply in comment.reply_children() {
        records.extend(flatten_node(&reply, depth + 1, now_utc));
    }
    records
}

fn usable_body(comment: &ApiComment) -> Option<String> {
    let body = comment.body.as_deref().unwrap_or_default();
    if body.is_empty() || body == DELETED_BODY {
        None
    } else {
        Some(body.to_string())
    }
}

/// Document-order mapping of scraped comment elements. The markup exposes no
/// timestamps, so `created_utc` is synthesized within the last 24 hours and
/// every record carries `time_estimated`.
pub fn flatten_dom_comments(comments: Vec<DomComment>, now_utc: i64) -> Vec<CommentRecord> {
    let mut rng = rand::thread_rng();
    comments
        .into_iter()
        .enumerate()
        .map(|(index, comment)| {
            let hours_ago: i64 = rng.gen_range(0..24);
            let offset: i64 = rng.gen_range(0..SECONDS_PER_DAY);
            CommentRecord {
                id: format!("dom_{index}"),
                author: comment.author.unwrap_or_else(|| "unknown".to_string()),
                body: comment.body,
                score: comment.score,
                depth: comment.depth,
                time_ago: format!("{hours_ago}h ago"),
                created_utc: now_utc - offset,
                time_estimated: true,
            }
        })
        .collect()
}
