use std::fmt;

use crate::error::CoreError;

/// A reddit thread page URL whose path matches `/r/<subreddit>/comments/<id>`.
///
/// Parsing is the eligibility gate for the whole pipeline: anything that does
/// not carry both markers is rejected before any extraction is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadUrl {
    url: String,
    subreddit: String,
    post_id: String,
}

impl ThreadUrl {
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// Subreddit name without the `r/` prefix.
    pub fn subreddit(&self) -> &str {
        &self.subreddit
    }

    /// Subreddit in the canonical `r/<name>` form.
    pub fn prefixed_subreddit(&self) -> String {
        format!("r/{}", self.subreddit)
    }

    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    /// JSON endpoint for the same page: query/fragment dropped, trailing
    /// slash stripped, `.json` appended.
    pub fn json_endpoint(&self) -> String {
        let base = self
            .url
            .split(|ch| ch == '?' || ch == '#')
            .next()
            .unwrap_or(&self.url);
        let base = base.strip_suffix('/').unwrap_or(base);
        format!("{base}.json")
    }
}

impl TryFrom<&str> for ThreadUrl {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() || !trimmed.contains("reddit.com/r/") {
            return Err(CoreError::NotAThreadPage(trimmed.to_string()));
        }
        let subreddit = segment_after(trimmed, "/r/")
            .ok_or_else(|| CoreError::NotAThreadPage(trimmed.to_string()))?;
        let post_id = segment_after(trimmed, "/comments/")
            .ok_or_else(|| CoreError::NotAThreadPage(trimmed.to_string()))?;
        Ok(ThreadUrl {
            url: trimmed.to_string(),
            subreddit,
            post_id,
        })
    }
}

impl fmt::Display for ThreadUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

fn segment_after(url: &str, marker: &str) -> Option<String> {
    let start = url.find(marker)? + marker.len();
    let rest = &url[start..];
    let segment: String = rest
        .chars()
        .take_while(|ch| !matches!(ch, '/' | '?' | '#'))
        .collect();
    if segment.is_empty() {
        None
    } else {
        Some(segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_thread_url() {
        let url = ThreadUrl::try_from("https://www.reddit.com/r/rust/comments/abc123/some_title/")
            .unwrap();
        assert_eq!(url.subreddit(), "rust");
        assert_eq!(url.prefixed_subreddit(), "r/rust");
        assert_eq!(url.post_id(), "abc123");
    }

    #[test]
    fn parse_thread_url_without_title_segment() {
        let url = ThreadUrl::try_from("https://old.reddit.com/r/test/comments/xyz9").unwrap();
        assert_eq!(url.post_id(), "xyz9");
        assert_eq!(url.subreddit(), "test");
    }

    #[test]
    fn reject_listing_page() {
        assert!(ThreadUrl::try_from("https://www.reddit.com/r/rust/").is_err());
    }

    #[test]
    fn reject_non_reddit_url() {
        assert!(ThreadUrl::try_from("https://example.com/r/rust/comments/abc").is_err());
        assert!(ThreadUrl::try_from("").is_err());
    }

    #[test]
    fn json_endpoint_strips_trailing_slash() {
        let url = ThreadUrl::try_from("https://www.reddit.com/r/rust/comments/abc123/title/")
            .unwrap();
        assert_eq!(
            url.json_endpoint(),
            "https://www.reddit.com/r/rust/comments/abc123/title.json"
        );
    }

    #[test]
    fn json_endpoint_without_trailing_slash() {
        let url = ThreadUrl::try_from("https://www.reddit.com/r/rust/comments/abc123").unwrap();
        assert_eq!(
            url.json_endpoint(),
            "https://www.reddit.com/r/rust/comments/abc123.json"
        );
    }

    #[test]
    fn json_endpoint_drops_query() {
        let url = ThreadUrl::try_from(
            "https://www.reddit.com/r/rust/comments/abc123/title/?utm_source=share",
        )
        .unwrap();
        assert_eq!(
            url.json_endpoint(),
            "https://www.reddit.com/r/rust/comments/abc123/title.json"
        );
        assert_eq!(url.post_id(), "abc123");
    }
}
