use serde::Deserialize;
use serde_json::Value;

/// Parsed result of the thread's `.json` endpoint: the post listing's single
/// child plus the comment listing's children.
#[derive(Debug, Clone)]
pub struct ApiThread {
    pub post: ApiPost,
    pub comments: Vec<ApiComment>,
}

/// One element of the two-element array the endpoint returns.
#[derive(Debug, Clone, Deserialize)]
pub struct Listing<T> {
    pub data: ListingData<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingData<T> {
    #[serde(default = "Vec::new")]
    pub children: Vec<Thing<T>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thing<T> {
    pub data: T,
}

/// Post fields as reddit serves them. Everything is optional: a link post
/// has no selftext, a text post has no preview, and the reconciler treats
/// each gap independently.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiPost {
    pub id: Option<String>,
    pub title: Option<String>,
    pub subreddit_name_prefixed: Option<String>,
    pub author: Option<String>,
    pub score: Option<i64>,
    pub selftext: Option<String>,
    pub url: Option<String>,
    pub preview: Option<Preview>,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Preview {
    pub images: Vec<PreviewImage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PreviewImage {
    pub source: Option<PreviewSource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PreviewSource {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiComment {
    pub id: String,
    pub author: String,
    pub body: Option<String>,
    pub score: i64,
    pub created_utc: f64,
    /// Reddit sends `""` for leaf comments and a full listing object
    /// otherwise; kept raw and decoded lazily by [`ApiComment::reply_children`].
    pub replies: Value,
}

impl ApiComment {
    /// Child replies in original order; any shape other than a listing with
    /// children yields an empty vec.
    pub fn reply_children(&self) -> Vec<ApiComment> {
        self.replies
            .get("data")
            .and_then(|data| data.get("children"))
            .and_then(Value::as_array)
            .map(|children| {
                children
                    .iter()
                    .filter_map(|child| child.get("data"))
                    .filter_map(|data| serde_json::from_value(data.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}
