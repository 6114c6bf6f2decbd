//! Read-only HTML rendering of one saved record.
//!
//! Selftext carries reddit's lightweight markup (`**bold**`, `*italic*`,
//! `[text](url)`, blank-line paragraphs); everything is HTML-escaped before
//! the markup transforms run, so stored text can never inject tags.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use chrono::Utc;

use crate::state::AppState;
use threadstash_core::domain::post::{CommentRecord, PostRecord};
use threadstash_core::types::relative_time::relative_age;

const MAX_DEPTH_CLASS: u32 = 5;

const PAGE_STYLE: &str = r#"
    body { font-family: sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }
    .post-meta, .comment-header { color: #555; font-size: 0.9rem; }
    .post-meta span, .comment-header span { margin-right: 0.75rem; }
    .negative { color: #b00020; }
    .post-image img { max-width: 100%; }
    .comment { border-left: 2px solid #ddd; padding-left: 0.75rem; margin: 0.75rem 0; }
    .depth-1 { margin-left: 1.5rem; }
    .depth-2 { margin-left: 3rem; }
    .depth-3 { margin-left: 4.5rem; }
    .depth-4 { margin-left: 6rem; }
    .depth-5 { margin-left: 7.5rem; }
    .estimated { font-style: italic; }
"#;

pub async fn view_post(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store.get(&id).await {
        Some(record) => {
            Html(render_post_page(&record, Utc::now().timestamp())).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Html(render_message_page("Post not found")),
        )
            .into_response(),
    }
}

fn render_post_page(post: &PostRecord, now_utc: i64) -> String {
    let mut body = String::new();
    body.push_str("<div class=\"post-container\">\n");
    body.push_str(&format!("<h1>{}</h1>\n", escape_html(&post.title)));
    body.push_str(&render_post_meta(post, now_utc));
    body.push_str(&render_post_content(post));
    body.push_str("</div>\n");
    body.push_str(&format!(
        "<div class=\"comments-section\">\n<h2>Comments ({})</h2>\n",
        post.comments.len()
    ));
    for comment in &post.comments {
        body.push_str(&render_comment(comment));
    }
    body.push_str("</div>\n");
    page(&post.title, &body)
}

fn render_message_page(message: &str) -> String {
    page(
        message,
        &format!("<div class=\"error\"><h1>{}</h1></div>", escape_html(message)),
    )
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_html(title),
        PAGE_STYLE,
        body
    )
}

fn render_post_meta(post: &PostRecord, now_utc: i64) -> String {
    let score_class = if post.score < 0 { " negative" } else { "" };
    format!(
        "<div class=\"post-meta\">\
         <span class=\"score{}\">{} points</span>\
         <span class=\"subreddit\">{}</span>\
         <span class=\"author\">u/{}</span>\
         <span class=\"comment-count\">{} comments</span>\
         <span class=\"saved-at\">Saved {}</span>\
         </div>\n",
        score_class,
        post.score,
        escape_html(&post.subreddit),
        escape_html(&post.author),
        post.comment_count,
        relative_age(post.saved_at.timestamp(), now_utc),
    )
}

fn render_post_content(post: &PostRecord) -> String {
    let mut content = String::new();
    if !post.image_url.is_empty() {
        content.push_str(&format!(
            "<div class=\"post-image\"><img src=\"{}\" alt=\"Post image\" loading=\"lazy\"></div>\n",
            escape_html(&post.image_url)
        ));
    }
    if !post.selftext.trim().is_empty() {
        content.push_str(&format!(
            "<div class=\"post-content\">{}</div>\n",
            format_post_text(&post.selftext)
        ));
    }
    if !post.url.is_empty() && !post.url.contains("reddit.com") && post.image_url.is_empty() {
        content.push_str(&format!(
            "<div class=\"post-link\"><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></div>\n",
            escape_html(&post.url),
            escape_html(&post.url)
        ));
    }
    content
}

fn render_comment(comment: &CommentRecord) -> String {
    let depth_class = format!("depth-{}", comment.depth.min(MAX_DEPTH_CLASS));
    let score_class = if comment.score < 0 { " negative" } else { "" };
    let estimated = if comment.time_estimated {
        " <span class=\"estimated\">(estimated)</span>"
    } else {
        ""
    };
    format!(
        "<div class=\"comment {}\">\
         <div class=\"comment-header\">\
         <span class=\"comment-author\">u/{}</span>\
         <span class=\"comment-score{}\">{}</span>\
         <span class=\"comment-time\">{}{}</span>\
         </div>\
         <div class=\"comment-body\">{}</div>\
         </div>\n",
        depth_class,
        escape_html(&comment.author),
        score_class,
        comment.score,
        escape_html(&comment.time_ago),
        estimated,
        format_comment_body(&comment.body),
    )
}

/// Paragraphs on blank lines; bold, italic, and links inside each paragraph;
/// single newlines become line breaks.
fn format_post_text(text: &str) -> String {
    text.split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(|paragraph| {
            let escaped = escape_html(paragraph);
            let marked = apply_links(&apply_span(
                &apply_span(&escaped, "**", "strong"),
                "*",
                "em",
            ));
            format!("<p>{}</p>", marked.replace('\n', "<br>"))
        })
        .collect()
}

/// Comment bodies render line by line, escaped, with no markup transforms.
fn format_comment_body(text: &str) -> String {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("<p>{}</p>", escape_html(line)))
        .collect()
}

fn escape_html(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            _ => output.push(ch),
        }
    }
    output
}

/// Wraps every delimited span in the given tag; unpaired delimiters pass
/// through unchanged.
fn apply_span(text: &str, delimiter: &str, tag: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(delimiter) {
        let after = &rest[start + delimiter.len()..];
        match after.find(delimiter) {
            Some(end) => {
                output.push_str(&rest[..start]);
                output.push_str(&format!("<{tag}>{}</{tag}>", &after[..end]));
                rest = &after[end + delimiter.len()..];
            }
            None => {
                output.push_str(&rest[..start + delimiter.len()]);
                rest = after;
            }
        }
    }
    output.push_str(rest);
    output
}

fn apply_links(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open_bracket) = rest.find('[') {
        let Some(link) = match_link(&rest[open_bracket..]) else {
            output.push_str(&rest[..open_bracket + 1]);
            rest = &rest[open_bracket + 1..];
            continue;
        };
        output.push_str(&rest[..open_bracket]);
        output.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
            link.href, link.label
        ));
        rest = &rest[open_bracket + link.consumed..];
    }
    output.push_str(rest);
    output
}

struct LinkMatch<'a> {
    label: &'a str,
    href: &'a str,
    consumed: usize,
}

/// `[label](href)` with non-empty label and href, starting at `[`.
fn match_link(text: &str) -> Option<LinkMatch<'_>> {
    let close_bracket = text.find(']')?;
    let label = &text[1..close_bracket];
    let after_bracket = &text[close_bracket + 1..];
    if label.is_empty() || !after_bracket.starts_with('(') {
        return None;
    }
    let close_paren = after_bracket.find(')')?;
    let href = &after_bracket[1..close_paren];
    if href.is_empty() {
        return None;
    }
    Some(LinkMatch {
        label,
        href,
        consumed: close_bracket + 1 + close_paren + 1,
    })
}
