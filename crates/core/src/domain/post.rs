use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical saved-thread record, keyed by `id` in the store. Field names on
/// the wire stay camelCase so stored snapshots remain readable by any
/// existing consumer of the `savedPosts` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub id: String,
    pub title: String,
    pub subreddit: String,
    pub author: String,
    pub score: i64,
    pub url: String,
    pub selftext: String,
    pub image_url: String,
    pub comment_count: usize,
    pub comments: Vec<CommentRecord>,
    pub saved_at: DateTime<Utc>,
}

/// One flattened comment. `depth` alone encodes the tree shape; the sequence
/// order is the depth-first pre-order of the original reply tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    pub id: String,
    pub author: String,
    pub body: String,
    pub score: i64,
    pub depth: u32,
    pub time_ago: String,
    pub created_utc: i64,
    /// True when `created_utc` was synthesized (markup-only extraction has no
    /// real timestamps to offer).
    #[serde(default)]
    pub time_estimated: bool,
}

/// Post fields as seen before comments are attached; what the "get post
/// metadata" action returns and what a caller may hand back to the save
/// action as cached input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMetadata {
    pub id: String,
    pub title: String,
    pub subreddit: String,
    pub author: String,
    pub score: i64,
    pub url: String,
    pub selftext: String,
    pub image_url: String,
    pub comment_count: usize,
}

/// Post fields recovered as a side product of the comments fetch, returned
/// explicitly with the comments payload instead of living in a shared slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSupplement {
    pub selftext: String,
    pub url: String,
    pub image_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_record() -> PostRecord {
        PostRecord {
            id: "abc123".to_string(),
            title: "Hello".to_string(),
            subreddit: "r/test".to_string(),
            author: "alice".to_string(),
            score: -3,
            url: "https://www.reddit.com/r/test/comments/abc123/hello/".to_string(),
            selftext: String::new(),
            image_url: "https://i.redd.it/x.jpg".to_string(),
            comment_count: 1,
            comments: vec![CommentRecord {
                id: "c1".to_string(),
                author: "bob".to_string(),
                body: "nice post".to_string(),
                score: 5,
                depth: 0,
                time_ago: "2h ago".to_string(),
                created_utc: 1_700_000_000,
                time_estimated: false,
            }],
            saved_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn serializes_with_camel_case_names() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert!(json.get("imageUrl").is_some());
        assert!(json.get("commentCount").is_some());
        assert!(json.get("savedAt").is_some());
        let comment = &json["comments"][0];
        assert!(comment.get("timeAgo").is_some());
        assert!(comment.get("createdUtc").is_some());
        assert!(comment.get("timeEstimated").is_some());
    }

    #[test]
    fn round_trip_is_lossless() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let back: PostRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn time_estimated_defaults_to_false() {
        let json = r#"{"id":"c1","author":"bob","body":"hi","score":1,"depth":0,
                       "timeAgo":"1h ago","createdUtc":1700000000}"#;
        let comment: CommentRecord = serde_json::from_str(json).unwrap();
        assert!(!comment.time_estimated);
    }
}
