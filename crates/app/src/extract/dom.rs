//! Field scraping from thread page markup.
//!
//! Every accessor is best-effort: a missing field is `None` (or a zero
//! count), never an error. The reconciler decides what absence means.

use scraper::{ElementRef, Html, Selector};

use super::rules;

/// Pixels of left offset that equal one nesting level in reddit's layout.
const INDENT_PX_PER_LEVEL: i64 = 30;

#[derive(Debug, Clone, Default)]
pub struct DomPost {
    pub title: Option<String>,
    pub author: Option<String>,
    pub score: i64,
    pub selftext: Option<String>,
    pub image_url: Option<String>,
    pub comment_count: usize,
}

#[derive(Debug, Clone)]
pub struct DomComment {
    pub author: Option<String>,
    pub body: String,
    pub score: i64,
    pub depth: u32,
}

pub fn scrape_post(html: &Html) -> DomPost {
    DomPost {
        title: scrape_title(html),
        author: scrape_author(html),
        score: rules::max_score(html, rules::SCORE_RULES),
        selftext: scrape_selftext(html),
        image_url: scrape_image(html),
        comment_count: rules::select_all(html, rules::COMMENT_RULES).len(),
    }
}

fn scrape_title(html: &Html) -> Option<String> {
    if let Some(title) = rules::first_text(html, rules::TITLE_RULES) {
        return Some(title);
    }
    // Document title carries "<post> : <subreddit>" on thread pages.
    let selector = Selector::parse("title").expect("selector");
    let raw = rules::element_text(html.select(&selector).next()?);
    let head = raw.split(" : ").next().unwrap_or(&raw).trim().to_string();
    if head.is_empty() { None } else { Some(head) }
}

fn scrape_author(html: &Html) -> Option<String> {
    rules::first_text(html, rules::AUTHOR_RULES).map(|author| strip_user_prefix(&author))
}

fn scrape_selftext(html: &Html) -> Option<String> {
    rules::first_text(html, rules::SELFTEXT_RULES)
}

/// Per rule, only the first match is considered; a decorative hit (emoji or
/// icon sprite) advances the chain rather than scanning siblings.
fn scrape_image(html: &Html) -> Option<String> {
    for rule in rules::IMAGE_RULES {
        let selector = Selector::parse(rule).expect("selector");
        if let Some(element) = html.select(&selector).next() {
            if let Some(src) = element.value().attr("src") {
                if !src.is_empty() && !src.contains("emoji") && !src.contains("icon") {
                    return Some(src.to_string());
                }
            }
        }
    }
    None
}

/// Comment elements in document order; blank-bodied entries are dropped here
/// so downstream only ever sees displayable comments.
pub fn scrape_comments(html: &Html) -> Vec<DomComment> {
    rules::select_all(html, rules::COMMENT_RULES)
        .into_iter()
        .filter_map(scrape_comment)
        .collect()
}

fn scrape_comment(element: ElementRef<'_>) -> Option<DomComment> {
    let body = rules::first_element_text(element, rules::COMMENT_BODY_RULES)?;
    if body.is_empty() {
        return None;
    }
    let author = rules::first_element_text(element, rules::COMMENT_AUTHOR_RULES)
        .map(|author| strip_user_prefix(&author))
        .filter(|author| !author.is_empty());
    Some(DomComment {
        author,
        body,
        score: rules::first_score(element, rules::COMMENT_SCORE_RULES),
        depth: indent_depth(element.value().attr("style")),
    })
}

pub fn strip_user_prefix(author: &str) -> String {
    author.strip_prefix("u/").unwrap_or(author).to_string()
}

/// Nesting level inferred from inline left offset: (margin-left +
/// padding-left) / 30px, floored, clamped at zero. A heuristic only; when a
/// theme indents differently the depth is wrong but extraction still works.
pub fn indent_depth(style: Option<&str>) -> u32 {
    let style = style.unwrap_or_default();
    let offset = style_px(style, "margin-left") + style_px(style, "padding-left");
    (offset / INDENT_PX_PER_LEVEL).max(0) as u32
}

fn style_px(style: &str, property: &str) -> i64 {
    style
        .split(';')
        .find_map(|declaration| {
            let (name, value) = declaration.split_once(':')?;
            if name.trim() != property {
                return None;
            }
            leading_int(value.trim())
        })
        .unwrap_or(0)
}

fn leading_int(value: &str) -> Option<i64> {
    let negative = value.starts_with('-');
    let digits: String = value
        .trim_start_matches('-')
        .chars()
        .take_while(|ch| ch.is_ascii_digit())
        .collect();
    let parsed: i64 = digits.parse().ok()?;
    Some(if negative { -parsed } else { parsed })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODERN_PAGE: &str = r#"
        <html><head><title>Fallback : r_test</title></head><body>
        <div data-test-id="post-content">
            <h1>A modern thread title</h1>
            <div data-click-id="text">First paragraph of the body.</div>
            <img src="https://i.redd.it/emoji-face.png">
        </div>
        <a data-testid="author-link" href="/user/alice/">u/alice</a>
        <div id="vote-arrows-0"><span>256</span></div>
        <img alt="Post image" src="https://i.redd.it/real-content.jpg">
        <div data-testid="comment" style="margin-left: 0px">
            <a data-testid="author-link">u/bob</a>
            <div data-testid="comment-body-text">Top level reply</div>
            <span class="score">12 points</span>
        </div>
        <div data-testid="comment" style="margin-left: 30px; padding-left: 15px">
            <a data-testid="author-link">u/carol</a>
            <div data-testid="comment-body-text">Nested reply</div>
        </div>
        </body></html>"#;

    #[test]
    fn scrape_post_reads_every_field() {
        let html = Html::parse_document(MODERN_PAGE);
        let post = scrape_post(&html);
        assert_eq!(post.title.as_deref(), Some("A modern thread title"));
        assert_eq!(post.author.as_deref(), Some("alice"));
        assert_eq!(post.score, 256);
        assert_eq!(
            post.selftext.as_deref(),
            Some("First paragraph of the body.")
        );
        assert_eq!(post.comment_count, 2);
    }

    #[test]
    fn image_rejects_emoji_and_icon_candidates() {
        let html = Html::parse_document(MODERN_PAGE);
        let post = scrape_post(&html);
        assert_eq!(
            post.image_url.as_deref(),
            Some("https://i.redd.it/real-content.jpg")
        );
    }

    #[test]
    fn title_falls_back_to_document_title() {
        let html =
            Html::parse_document("<html><head><title>Bare Title : r_pics</title></head></html>");
        let post = scrape_post(&html);
        assert_eq!(post.title.as_deref(), Some("Bare Title"));
    }

    #[test]
    fn scrape_comments_reads_author_score_and_depth() {
        let html = Html::parse_document(MODERN_PAGE);
        let comments = scrape_comments(&html);
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].author.as_deref(), Some("bob"));
        assert_eq!(comments[0].score, 12);
        assert_eq!(comments[0].depth, 0);
        assert_eq!(comments[1].author.as_deref(), Some("carol"));
        assert_eq!(comments[1].score, 0);
        assert_eq!(comments[1].depth, 1);
    }

    #[test]
    fn blank_comment_bodies_are_dropped() {
        let html = Html::parse_document(
            r#"<div data-testid="comment">
                   <div data-testid="comment-body-text">   </div>
               </div>
               <div data-testid="comment">
                   <div data-testid="comment-body-text">kept</div>
               </div>"#,
        );
        let comments = scrape_comments(&html);
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].body, "kept");
    }

    #[test]
    fn legacy_markup_is_scraped_through_fallback_rules() {
        let html = Html::parse_document(
            r#"<div class="commentarea">
                   <div class="thing" style="padding-left: 60px">
                       <a class="author">dave</a>
                       <div class="usertext-body">old reddit comment</div>
                       <span class="score">7 points</span>
                   </div>
               </div>"#,
        );
        let comments = scrape_comments(&html);
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].author.as_deref(), Some("dave"));
        assert_eq!(comments[0].body, "old reddit comment");
        assert_eq!(comments[0].score, 7);
        assert_eq!(comments[0].depth, 2);
    }

    #[test]
    fn indent_depth_floors_and_clamps() {
        assert_eq!(indent_depth(None), 0);
        assert_eq!(indent_depth(Some("margin-left: 29px")), 0);
        assert_eq!(indent_depth(Some("margin-left: 30px")), 1);
        assert_eq!(indent_depth(Some("margin-left: 45px; padding-left: 45px")), 3);
        assert_eq!(indent_depth(Some("margin-left: -60px")), 0);
        assert_eq!(indent_depth(Some("color: red")), 0);
    }
}
