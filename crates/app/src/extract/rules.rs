//! Ordered selector-rule chains for every scraped field.
//!
//! Each chain lists one CSS selector per known markup variant, newest first;
//! the first rule yielding a non-empty value wins. A fresh layout variant is
//! handled by prepending a rule here, never by touching the extraction code.

use scraper::{ElementRef, Html, Selector};

pub const TITLE_RULES: &[&str] = &[
    r#"[data-test-id="post-content"] h1"#,
    r#"[slot="title"]"#,
    r#"h1[data-adclicklocation="title"]"#,
];

pub const AUTHOR_RULES: &[&str] = &[
    r#"[data-testid="author-link"]"#,
    r#"[data-click-id="user"]"#,
    r#"[href*="/user/"]"#,
    r#"a[href*="/u/"]"#,
];

pub const SCORE_RULES: &[&str] = &[
    r#"[aria-label*="upvote"]"#,
    r#"[id*="vote-arrows"] span"#,
    r#"[data-testid*="upvote"]"#,
];

pub const SELFTEXT_RULES: &[&str] = &[
    r#"[data-test-id="post-content"] [data-click-id="text"]"#,
    r#"[data-adclicklocation="post_body"]"#,
    ".usertext-body .md",
    r#"[data-testid="post-content-text"]"#,
    r#"[data-click-id="text"] p"#,
];

pub const IMAGE_RULES: &[&str] = &[
    r#"[data-test-id="post-content"] img[src*="i.redd.it"]"#,
    r#"[data-test-id="post-content"] img[src*="preview.redd.it"]"#,
    r#"img[alt*="Post image"]"#,
    r#"[data-click-id="media"] img"#,
    ".media-element img",
    r#"img[src*="i.imgur.com"]"#,
];

pub const COMMENT_RULES: &[&str] = &[
    r#"[data-testid="comment"]"#,
    ".Comment",
    r#"[id*="comment-"]"#,
    r#"[data-type="comment"]"#,
    ".commentarea .thing",
    r#"[data-kind="t1"]"#,
];

pub const COMMENT_BODY_RULES: &[&str] = &[
    r#"[data-testid="comment-body-text"]"#,
    ".md",
    ".usertext-body",
    r#"[data-click-id="text"]"#,
    "p",
    ".text",
];

pub const COMMENT_AUTHOR_RULES: &[&str] = &[
    r#"[data-testid="author-link"]"#,
    r#"[data-click-id="user"]"#,
    r#"a[href*="/u/"]"#,
    r#"a[href*="/user/"]"#,
    ".author",
];

pub const COMMENT_SCORE_RULES: &[&str] = &[
    r#"[aria-label*="upvote"]"#,
    r#"[data-testid*="upvote"]"#,
    ".score",
    r#"[id*="vote-arrows"] span"#,
];

fn parse(rule: &str) -> Selector {
    Selector::parse(rule).expect("selector")
}

/// First rule whose first match carries non-empty text.
pub fn first_text(html: &Html, rules: &[&str]) -> Option<String> {
    for rule in rules {
        if let Some(element) = html.select(&parse(rule)).next() {
            let text = element_text(element);
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// Same chain walk, scoped to one element's descendants. The first *present*
/// match settles the chain even when its text is empty, mirroring how the
/// body rules decide that a comment is blank rather than differently marked
/// up.
pub fn first_element_text(element: ElementRef<'_>, rules: &[&str]) -> Option<String> {
    for rule in rules {
        if let Some(found) = element.select(&parse(rule)).next() {
            return Some(element_text(found));
        }
    }
    None
}

/// Largest numeric value across every candidate the score rules match.
/// Decorative vote arrows with empty or non-numeric text simply contribute
/// nothing, and a stray "0" never beats a real count.
pub fn max_score(html: &Html, rules: &[&str]) -> i64 {
    let mut score = 0;
    for rule in rules {
        for element in html.select(&parse(rule)) {
            if let Some(num) = parse_score(&element_text(element)) {
                if num > score {
                    score = num;
                }
            }
        }
    }
    score
}

/// First rule (in order) whose match yields a parsable number; comments keep
/// the first hit rather than scanning for a maximum.
pub fn first_score(element: ElementRef<'_>, rules: &[&str]) -> i64 {
    for rule in rules {
        if let Some(found) = element.select(&parse(rule)).next() {
            if let Some(num) = leading_number(&element_text(found)) {
                return num;
            }
        }
    }
    0
}

/// All matches of the first rule that matches anything at all; one markup
/// generation's comment elements, in document order.
pub fn select_all<'a>(html: &'a Html, rules: &[&str]) -> Vec<ElementRef<'a>> {
    for rule in rules {
        let matches: Vec<ElementRef<'a>> = html.select(&parse(rule)).collect();
        if !matches.is_empty() {
            return matches;
        }
    }
    Vec::new()
}

pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<Vec<_>>().join("").trim().to_string()
}

/// Digits (and sign) squeezed out of decorated text: "1,234 points" -> 1234.
fn parse_score(text: &str) -> Option<i64> {
    let digits: String = text
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '-')
        .collect();
    digits.parse().ok()
}

/// First contiguous `[0-9-]+` run in the text.
fn leading_number(text: &str) -> Option<i64> {
    let start = text.find(|ch: char| ch.is_ascii_digit() || ch == '-')?;
    let run: String = text[start..]
        .chars()
        .take_while(|ch| ch.is_ascii_digit() || *ch == '-')
        .collect();
    run.parse().ok()
}
