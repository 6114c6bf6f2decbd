//! Field-by-field merge of the two sources.
//!
//! Precedence for every post field: API value if present and non-empty, then
//! the scraped value, then a computed default. A page can have API data for
//! some fields and need markup for others; each field decides alone.

use chrono::{DateTime, Utc};

use threadstash_core::domain::post::{PostMetadata, PostSupplement};
use threadstash_core::types::thread_url::ThreadUrl;
use threadstash_infra::reddit::ApiPost;

use super::dom::{DomPost, strip_user_prefix};

const IMAGE_HOSTS: &[&str] = &["i.redd.it", "i.imgur.com"];
const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif"];
const THUMBNAIL_SENTINELS: &[&str] = &["self", "default"];

pub fn merge_post(
    thread: &ThreadUrl,
    api: Option<&ApiPost>,
    dom: &DomPost,
    now: DateTime<Utc>,
) -> PostMetadata {
    let url_subreddit = thread.prefixed_subreddit();
    PostMetadata {
        id: pick_id(api, thread, now),
        title: pick(api.and_then(|post| post.title.as_deref()), dom.title.as_deref())
            .unwrap_or_default(),
        subreddit: pick(
            api.and_then(|post| post.subreddit_name_prefixed.as_deref()),
            Some(url_subreddit.as_str()),
        )
        .unwrap_or_else(|| "r/unknown".to_string()),
        author: pick(
            api.and_then(|post| post.author.as_deref()),
            dom.author.as_deref(),
        )
        .map(|author| strip_user_prefix(&author))
        .unwrap_or_else(|| "unknown".to_string()),
        score: pick_score(api, dom),
        url: thread.as_str().to_string(),
        selftext: pick(
            api.and_then(|post| post.selftext.as_deref()),
            dom.selftext.as_deref(),
        )
        .unwrap_or_default(),
        image_url: resolve_image(api, dom),
        comment_count: dom.comment_count,
    }
}

/// The API fields worth carrying alongside a comments payload; what the
/// original popup merged back in at save time.
pub fn supplement_from_api(post: &ApiPost) -> PostSupplement {
    PostSupplement {
        selftext: post.selftext.clone().unwrap_or_default(),
        url: post.url.clone().unwrap_or_default(),
        image_url: api_image(post).unwrap_or_default(),
    }
}

fn pick(api: Option<&str>, dom: Option<&str>) -> Option<String> {
    non_empty(api).or_else(|| non_empty(dom))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn pick_id(api: Option<&ApiPost>, thread: &ThreadUrl, now: DateTime<Utc>) -> String {
    if let Some(id) = non_empty(api.and_then(|post| post.id.as_deref())) {
        return id;
    }
    if !thread.post_id().is_empty() {
        return thread.post_id().to_string();
    }
    now.timestamp_millis().to_string()
}

/// A zero API score falls through to the markup scan (vote counts hidden by
/// the API read as zero); a negative score is a real value and sticks.
fn pick_score(api: Option<&ApiPost>, dom: &DomPost) -> i64 {
    match api.and_then(|post| post.score).filter(|score| *score != 0) {
        Some(score) => score,
        None => dom.score,
    }
}

/// Image resolution: direct-image API url, then the first preview source
/// (HTML-entity unescaped), then a non-sentinel thumbnail, then the markup
/// selector chain.
fn resolve_image(api: Option<&ApiPost>, dom: &DomPost) -> String {
    api.and_then(api_image)
        .or_else(|| dom.image_url.clone())
        .unwrap_or_default()
}

fn api_image(post: &ApiPost) -> Option<String> {
    if let Some(url) = post.url.as_deref() {
        if is_direct_image_url(url) {
            return Some(url.to_string());
        }
    }
    if let Some(source) = post
        .preview
        .as_ref()
        .and_then(|preview| preview.images.first())
        .and_then(|image| image.source.as_ref())
        .and_then(|source| source.url.as_deref())
    {
        return Some(source.replace("&amp;", "&"));
    }
    if let Some(thumbnail) = post.thumbnail.as_deref() {
        if !thumbnail.is_empty() && !THUMBNAIL_SENTINELS.contains(&thumbnail) {
            return Some(thumbnail.to_string());
        }
    }
    None
}

fn is_direct_image_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    IMAGE_HOSTS.iter().any(|host| lower.contains(host))
        || IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thread() -> ThreadUrl {
        ThreadUrl::try_from("https://www.reddit.com/r/test/comments/abc123/hello/").unwrap()
    }

    fn now() -> DateTime<Utc> {
        chrono::TimeZone::with_ymd_and_hms(&Utc, 2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn full_api() -> ApiPost {
        ApiPost {
            id: Some("api_id".to_string()),
            title: Some("Api Title".to_string()),
            subreddit_name_prefixed: Some("r/api".to_string()),
            author: Some("api_author".to_string()),
            score: Some(42),
            selftext: Some("api body".to_string()),
            url: Some("https://example.com/article".to_string()),
            ..ApiPost::default()
        }
    }

    fn full_dom() -> DomPost {
        DomPost {
            title: Some("Dom Title".to_string()),
            author: Some("dom_author".to_string()),
            score: 7,
            selftext: Some("dom body".to_string()),
            image_url: Some("https://i.redd.it/dom.jpg".to_string()),
            comment_count: 3,
        }
    }

    #[test]
    fn api_values_beat_dom_values_field_by_field() {
        let merged = merge_post(&thread(), Some(&full_api()), &full_dom(), now());
        assert_eq!(merged.id, "api_id");
        assert_eq!(merged.title, "Api Title");
        assert_eq!(merged.subreddit, "r/api");
        assert_eq!(merged.author, "api_author");
        assert_eq!(merged.score, 42);
        assert_eq!(merged.selftext, "api body");
    }

    #[test]
    fn partial_api_falls_back_per_field() {
        let api = ApiPost {
            title: Some("Api Title".to_string()),
            selftext: Some(String::new()),
            ..ApiPost::default()
        };
        let merged = merge_post(&thread(), Some(&api), &full_dom(), now());
        assert_eq!(merged.title, "Api Title");
        assert_eq!(merged.selftext, "dom body");
        assert_eq!(merged.author, "dom_author");
        assert_eq!(merged.score, 7);
        assert_eq!(merged.id, "abc123");
        assert_eq!(merged.subreddit, "r/test");
    }

    #[test]
    fn defaults_apply_when_both_sources_are_empty() {
        let merged = merge_post(&thread(), None, &DomPost::default(), now());
        assert_eq!(merged.title, "");
        assert_eq!(merged.subreddit, "r/test");
        assert_eq!(merged.author, "unknown");
        assert_eq!(merged.score, 0);
        assert_eq!(merged.selftext, "");
        assert_eq!(merged.image_url, "");
        assert_eq!(merged.id, "abc123");
    }

    #[test]
    fn url_is_always_the_page_url() {
        let merged = merge_post(&thread(), Some(&full_api()), &full_dom(), now());
        assert_eq!(merged.url, thread().as_str());
    }

    #[test]
    fn zero_api_score_consults_the_markup_scan() {
        let api = ApiPost {
            score: Some(0),
            ..full_api()
        };
        let merged = merge_post(&thread(), Some(&api), &full_dom(), now());
        assert_eq!(merged.score, 7);
    }

    #[test]
    fn negative_api_score_is_kept() {
        let api = ApiPost {
            score: Some(-12),
            ..full_api()
        };
        let merged = merge_post(&thread(), Some(&api), &full_dom(), now());
        assert_eq!(merged.score, -12);
    }

    #[test]
    fn direct_image_url_wins() {
        let api = ApiPost {
            url: Some("https://i.redd.it/x.jpg".to_string()),
            ..ApiPost::default()
        };
        assert_eq!(api_image(&api).as_deref(), Some("https://i.redd.it/x.jpg"));
    }

    #[test]
    fn preview_source_is_unescaped() {
        let json = r#"{
            "url": "https://example.com/article",
            "preview": {"images": [{"source": {"url": "https://preview.redd.it/a.jpg?w=1&amp;s=b"}}]}
        }"#;
        let api: ApiPost = serde_json::from_str(json).unwrap();
        assert_eq!(
            api_image(&api).as_deref(),
            Some("https://preview.redd.it/a.jpg?w=1&s=b")
        );
    }

    #[test]
    fn sentinel_thumbnails_are_skipped() {
        for sentinel in ["self", "default"] {
            let api = ApiPost {
                thumbnail: Some(sentinel.to_string()),
                ..ApiPost::default()
            };
            assert!(api_image(&api).is_none());
        }
        let api = ApiPost {
            thumbnail: Some("https://b.thumbs.redditmedia.com/t.jpg".to_string()),
            ..ApiPost::default()
        };
        assert!(api_image(&api).is_some());
    }

    #[test]
    fn dom_image_is_the_last_resort() {
        let merged = merge_post(&thread(), Some(&full_api()), &full_dom(), now());
        assert_eq!(merged.image_url, "https://i.redd.it/dom.jpg");
    }

    #[test]
    fn supplement_carries_api_fields_explicitly() {
        let supplement = supplement_from_api(&ApiPost {
            selftext: Some("body".to_string()),
            url: Some("https://i.imgur.com/z.png".to_string()),
            ..ApiPost::default()
        });
        assert_eq!(supplement.selftext, "body");
        assert_eq!(supplement.url, "https://i.imgur.com/z.png");
        assert_eq!(supplement.image_url, "https://i.imgur.com/z.png");
    }
}
