//! Instagram Graph API collector and the manual collection guide.
//!
//! The Graph API only lists media owned by the authenticated business
//! account; broad hashtag discovery is left to the manual workflow.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::{Client, Url};
use serde::Deserialize;
use viralprompt_core::{Platform, SocialPost, TextFields};
use viralprompt_extract::{Heuristics, Variant};

use crate::error::CollectorError;
use crate::http::{build_client, join, parse_base_url, send_json};

const DEFAULT_BASE_URL: &str = "https://graph.facebook.com/v18.0/";
const MEDIA_FIELDS: &str =
    "id,caption,media_type,media_url,permalink,timestamp,like_count,comments_count,owner";
const PAGE_LIMIT: &str = "100";
const CAPTION_LIMIT: usize = 500;
const HASHTAG_LIMIT: usize = 10;

pub const GUIDE_FILE_NAME: &str = "instagram_manual_guide.txt";

/// Hashtags worth browsing by hand, most productive first.
pub const INSTAGRAM_HASHTAGS: &[&str] = &[
    "aiart",
    "aigenerated",
    "aivideo",
    "runwayml",
    "midjourney",
    "stablediffusion",
    "pikalabs",
    "aianimation",
    "texttoimage",
    "aiartcommunity",
    "generativeart",
    "neuralart",
    "deeplearningart",
    "machinelearningart",
    "artificialintelligenceart",
    "soraai",
    "lumaai",
    "klingai",
    "haiperai",
    "gen3",
    "gen2",
];

static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\w+)").expect("valid hashtag regex"));

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MediaPage {
    pub data: Vec<MediaItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaItem {
    pub id: String,
    #[serde(default)]
    pub caption: String,
    pub media_type: Option<String>,
    pub media_url: Option<String>,
    pub permalink: Option<String>,
    pub timestamp: Option<String>,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub comments_count: u64,
}

/// Hashtags in `caption` in order of appearance, without the `#`, capped at ten.
#[must_use]
pub fn caption_hashtags(caption: &str) -> Vec<String> {
    HASHTAG_RE
        .captures_iter(caption)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .take(HASHTAG_LIMIT)
        .collect()
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Client for the business account media listing.
pub struct InstagramGraphClient {
    client: Client,
    access_token: String,
    base_url: Url,
}

impl InstagramGraphClient {
    /// # Errors
    ///
    /// Returns [`CollectorError::Http`] if the HTTP client cannot be built.
    pub fn new(
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, CollectorError> {
        Self::with_base_url(access_token, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`CollectorError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, CollectorError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            access_token: access_token.to_owned(),
            base_url: parse_base_url(base_url)?,
        })
    }

    /// The first page (up to 100 items) of the account's media.
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError`] on network failure, non-2xx status, or an
    /// unexpected body.
    pub async fn fetch_media(&self, account_id: &str) -> Result<MediaPage, CollectorError> {
        let url = join(&self.base_url, &format!("{account_id}/media"))?;
        let request = self.client.get(url).query(&[
            ("fields", MEDIA_FIELDS),
            ("access_token", self.access_token.as_str()),
            ("limit", PAGE_LIMIT),
        ]);
        send_json(request, &format!("{account_id}/media")).await
    }
}

/// Turn a media item into a record if it is a video or reel whose caption
/// (or, failing that, its hashtags) mentions an AI tool.
#[must_use]
pub fn media_to_post(item: MediaItem, heuristics: &Heuristics) -> Option<SocialPost> {
    let media_type = item.media_type.unwrap_or_default();
    if media_type != "VIDEO" && media_type != "REEL" {
        return None;
    }

    let hashtags = caption_hashtags(&item.caption);
    let text_fields = TextFields {
        title: None,
        body: truncate_chars(&item.caption, CAPTION_LIMIT),
        hashtags,
    };
    let matched = heuristics.is_ai_related(Variant::Caption, &item.caption)
        || heuristics.is_ai_related(Variant::Caption, &text_fields.hashtag_text());
    if !matched {
        return None;
    }

    let mut post = SocialPost::new(
        Platform::Instagram,
        item.id,
        item.permalink.unwrap_or_default(),
    );
    post.extracted_prompt = heuristics.extract_prompt(Variant::Caption, &item.caption);
    post.is_ai_related = true;
    post.text_fields = text_fields;
    post.engagement.likes = item.like_count;
    post.engagement.comments = item.comments_count;
    post.published_at = item.timestamp;
    post.media_urls = item.media_url.into_iter().collect();
    post.details.insert(
        "media_type".to_string(),
        serde_json::Value::String(media_type),
    );
    Some(post)
}

/// Collect AI reels from the account's own media. A failed request is logged
/// and yields no records.
pub async fn collect_instagram(
    client: &InstagramGraphClient,
    heuristics: &Heuristics,
    account_id: &str,
) -> Vec<SocialPost> {
    tracing::info!(platform = "instagram", account_id, "fetching media");
    let page = match client.fetch_media(account_id).await {
        Ok(page) => page,
        Err(e) => {
            tracing::warn!(
                platform = "instagram",
                error = %e,
                "graph api request failed; check the token is valid, the account is a \
                 business or creator account, and the token has instagram_basic and \
                 pages_show_list permissions"
            );
            return Vec::new();
        }
    };

    let posts: Vec<SocialPost> = page
        .data
        .into_iter()
        .filter_map(|item| media_to_post(item, heuristics))
        .collect();
    tracing::info!(platform = "instagram", count = posts.len(), "matched");
    viralprompt_core::finalize(posts)
}

/// Step-by-step workflow for collecting reels by hand.
#[must_use]
pub fn manual_guide() -> String {
    let rule = "-".repeat(70);
    let hashtags = INSTAGRAM_HASHTAGS
        .iter()
        .take(15)
        .enumerate()
        .map(|(i, tag)| format!("  {:2}. #{tag}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "INSTAGRAM MANUAL COLLECTION GUIDE\n{rule}\n\n\
         The Graph API only lists media from your own business account, so\n\
         viral reels from other creators have to be gathered by hand.\n\n\
         STEP 1: Browse these hashtags\n{rule}\n\
         {hashtags}\n\n\
         STEP 2: Pick the top reels\n{rule}\n\
         Look for 100k+ views, strong likes and comments, visible AI\n\
         watermarks or tool mentions, and prompts in the caption.\n\n\
         STEP 3: Record each reel\n{rule}\n\
         URL, caption, like count, view count, creator, and post date.\n\n\
         STEP 4: Save as JSON\n{rule}\n\
         Save as ai_reels_data/instagram_manual_YYYYMMDD.json, an array of\n\
         records shaped like the collector output:\n\n\
         [\n  {{\n    \"platform\": \"Instagram\",\n    \"id\": \"ABC123\",\n    \
         \"url\": \"https://instagram.com/p/ABC123/\",\n    \
         \"text_fields\": {{ \"body\": \"Amazing AI video! Prompt: ...\", \"hashtags\": [] }},\n    \
         \"engagement\": {{ \"views\": 500000, \"likes\": 50000, \"comments\": 1200, \"shares\": 0 }},\n    \
         \"extracted_prompt\": \"cinematic shot of...\",\n    \
         \"is_ai_related\": true\n  }}\n]\n\n\
         RATE LIMITS\n{rule}\n\
         Keep a 2-5 second delay between page loads or Instagram will block\n\
         the session.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(media_type: &str, caption: &str) -> MediaItem {
        MediaItem {
            id: "17900".to_string(),
            caption: caption.to_string(),
            media_type: Some(media_type.to_string()),
            media_url: Some("https://cdn.example/v.mp4".to_string()),
            permalink: Some("https://www.instagram.com/reel/ABC/".to_string()),
            timestamp: Some("2024-05-01T00:00:00+0000".to_string()),
            like_count: 420,
            comments_count: 7,
        }
    }

    #[test]
    fn hashtags_in_order_capped_at_ten() {
        let caption = (0..12).map(|i| format!("#t{i}")).collect::<Vec<_>>().join(" ");
        let tags = caption_hashtags(&caption);
        assert_eq!(tags.len(), 10);
        assert_eq!(tags[0], "t0");
        assert_eq!(tags[9], "t9");
    }

    #[test]
    fn images_are_skipped() {
        let h = Heuristics::builtin();
        assert!(media_to_post(item("IMAGE", "midjourney magic"), &h).is_none());
        assert!(media_to_post(item("CAROUSEL_ALBUM", "midjourney magic"), &h).is_none());
    }

    #[test]
    fn reel_with_prompt_in_caption() {
        let h = Heuristics::builtin();
        let post = media_to_post(
            item("REEL", "Made in Kling. prompt: a koi pond under neon rain #aivideo #kling"),
            &h,
        )
        .unwrap();
        assert_eq!(post.url, "https://www.instagram.com/reel/ABC/");
        assert_eq!(
            post.extracted_prompt.as_deref(),
            Some("a koi pond under neon rain")
        );
        assert_eq!(post.text_fields.hashtags, vec!["aivideo", "kling"]);
        assert_eq!(post.engagement.likes, 420);
        assert_eq!(post.engagement.comments, 7);
        assert_eq!(post.media_urls, vec!["https://cdn.example/v.mp4".to_string()]);
        assert_eq!(post.details["media_type"], "REEL");
    }

    #[test]
    fn unrelated_caption_is_skipped() {
        let h = Heuristics::builtin();
        assert!(media_to_post(item("VIDEO", "beach day #summer"), &h).is_none());
    }

    #[test]
    fn caption_is_truncated_by_chars() {
        let h = Heuristics::builtin();
        let caption = format!("sora {}", "é".repeat(600));
        let post = media_to_post(item("VIDEO", &caption), &h).unwrap();
        assert_eq!(post.text_fields.body.chars().count(), CAPTION_LIMIT);
    }

    #[test]
    fn guide_lists_first_fifteen_hashtags() {
        let guide = manual_guide();
        assert!(guide.contains("#aiart"));
        assert!(guide.contains("#artificialintelligenceart"));
        assert!(!guide.contains("#soraai"));
        assert!(guide.contains("STEP 1: Browse these hashtags\n"));
        assert!(guide.contains("\n   1. #aiart\n   2. #aigenerated\n"));
        assert!(guide.contains("\"platform\": \"Instagram\""));
    }
}
