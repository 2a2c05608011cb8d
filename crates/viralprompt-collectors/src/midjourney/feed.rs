//! Regex scan of the community feed page.
//!
//! The feed is mostly rendered client-side, so a plain fetch often yields no
//! containers at all. Whatever server-rendered markup is present is read as
//! `div.image-container` blocks holding an `img` and a `div.prompt`.

use std::sync::LazyLock;

use regex::Regex;

static CLASSED_DIV_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<div\b[^>]*?\bclass\s*=\s*["']([^"']*)["'][^>]*>"#)
        .expect("valid div regex")
});

static CLOSE_DIV_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</div\s*>").expect("valid close div regex"));

static IMG_SRC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<img\b[^>]*?\bsrc\s*=\s*["']([^"']+)["']"#).expect("valid img regex")
});

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedImage {
    pub image_url: String,
    pub prompt: String,
}

fn has_class(classes: &str, name: &str) -> bool {
    classes.split_whitespace().any(|c| c == name)
}

fn decode_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

fn text_content(inner_html: &str) -> String {
    let stripped = TAG_RE.replace_all(inner_html, " ");
    decode_entities(&stripped)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of the first `div.prompt` at any depth in `block`, up to its first
/// closing tag.
fn prompt_text(block: &str) -> Option<String> {
    let open = CLASSED_DIV_RE
        .captures_iter(block)
        .find(|c| c.get(1).is_some_and(|m| has_class(m.as_str(), "prompt")))?
        .get(0)?;
    let rest = &block[open.end()..];
    let inner = CLOSE_DIV_RE.find(rest).map_or(rest, |close| &rest[..close.start()]);
    Some(text_content(inner)).filter(|p| !p.is_empty())
}

fn parse_block(block: &str) -> Option<FeedImage> {
    let image_url = IMG_SRC_RE.captures(block)?.get(1)?.as_str().to_string();
    let prompt = prompt_text(block)?;
    Some(FeedImage {
        image_url: decode_entities(&image_url),
        prompt,
    })
}

/// Up to `max_images` image/prompt pairs, in page order. Containers missing
/// either part are skipped.
#[must_use]
pub fn parse_feed_html(html: &str, max_images: usize) -> Vec<FeedImage> {
    let containers: Vec<(usize, usize)> = CLASSED_DIV_RE
        .captures_iter(html)
        .filter(|c| c.get(1).is_some_and(|m| has_class(m.as_str(), "image-container")))
        .filter_map(|c| c.get(0))
        .map(|m| (m.start(), m.end()))
        .collect();

    containers
        .iter()
        .take(max_images)
        .enumerate()
        .filter_map(|(i, &(_, body_start))| {
            let body_end = containers.get(i + 1).map_or(html.len(), |&(next, _)| next);
            parse_block(&html[body_start..body_end])
        })
        .collect()
}
