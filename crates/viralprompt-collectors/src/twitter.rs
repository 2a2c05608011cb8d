//! X (Twitter) API v2 recent-search collector.

use std::collections::HashMap;

use reqwest::{Client, Url};
use serde::Deserialize;
use viralprompt_core::{Platform, SocialPost, TextFields};
use viralprompt_extract::{Heuristics, Variant};

use crate::error::CollectorError;
use crate::http::{build_client, join, parse_base_url, send_json};

const DEFAULT_BASE_URL: &str = "https://api.twitter.com/2/";
const TWEET_FIELDS: &str = "created_at,public_metrics,attachments,entities";
const EXPANSIONS: &str = "attachments.media_keys,author_id";
const MEDIA_FIELDS: &str = "url,preview_image_url,type,variants,public_metrics";

/// The recent-search endpoint accepts 10 to 100 results per page.
const MIN_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 100;

pub const DEFAULT_QUERIES: &[&str] = &[
    "AI generated video has:media -is:retweet",
    "runway gen-3 has:media min_faves:1000",
    "sora AI video has:media min_retweets:100",
    "text to video AI has:media viral",
    "midjourney animation has:media",
];

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub data: Vec<Tweet>,
    pub includes: Includes,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Includes {
    pub media: Vec<Media>,
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    pub id: String,
    #[serde(default)]
    pub text: String,
    pub author_id: Option<String>,
    pub created_at: Option<String>,
    #[serde(default)]
    pub public_metrics: PublicMetrics,
    #[serde(default)]
    pub attachments: Attachments,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct PublicMetrics {
    pub like_count: u64,
    pub retweet_count: u64,
    pub reply_count: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Attachments {
    pub media_keys: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Media {
    pub media_key: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub variants: Vec<MediaVariant>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaVariant {
    pub url: Option<String>,
    pub content_type: Option<String>,
    pub bit_rate: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
}

/// Highest-bitrate `video/mp4` variant URL. Ties keep the first listed.
#[must_use]
pub fn best_mp4_url(variants: &[MediaVariant]) -> Option<&str> {
    let mut best: Option<&MediaVariant> = None;
    for v in variants
        .iter()
        .filter(|v| v.content_type.as_deref() == Some("video/mp4"))
    {
        let rate = v.bit_rate.unwrap_or(0);
        if best.is_none_or(|b| rate > b.bit_rate.unwrap_or(0)) {
            best = Some(v);
        }
    }
    best.and_then(|v| v.url.as_deref())
}

/// Bearer-authenticated client for `tweets/search/recent`.
pub struct XClient {
    client: Client,
    bearer_token: String,
    base_url: Url,
}

impl XClient {
    /// # Errors
    ///
    /// Returns [`CollectorError::Http`] if the HTTP client cannot be built.
    pub fn new(
        bearer_token: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, CollectorError> {
        Self::with_base_url(bearer_token, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`CollectorError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        bearer_token: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, CollectorError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            bearer_token: bearer_token.to_owned(),
            base_url: parse_base_url(base_url)?,
        })
    }

    /// One page of recent tweets for `query` with media and author expansions.
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError`] on network failure, non-2xx status, or an
    /// unexpected body.
    pub async fn search_recent(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<SearchResponse, CollectorError> {
        let url = join(&self.base_url, "tweets/search/recent")?;
        let max_results = max_results.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE).to_string();
        let request = self
            .client
            .get(url)
            .bearer_auth(&self.bearer_token)
            .query(&[
                ("query", query),
                ("max_results", max_results.as_str()),
                ("tweet.fields", TWEET_FIELDS),
                ("expansions", EXPANSIONS),
                ("media.fields", MEDIA_FIELDS),
            ]);

        send_json(request, &format!("tweets/search/recent(query={query})")).await
    }
}

#[derive(Debug, Clone)]
pub struct XOptions {
    pub max_results: u32,
    pub min_likes: u64,
    pub queries: Vec<String>,
}

impl Default for XOptions {
    fn default() -> Self {
        Self {
            max_results: 100,
            min_likes: 1000,
            queries: DEFAULT_QUERIES.iter().map(|q| (*q).to_string()).collect(),
        }
    }
}

/// Records for every tweet in `page` that clears `min_likes` and mentions an
/// AI tool.
#[must_use]
pub fn page_to_posts(
    page: SearchResponse,
    query: &str,
    heuristics: &Heuristics,
    min_likes: u64,
) -> Vec<SocialPost> {
    let media: HashMap<&str, &Media> = page
        .includes
        .media
        .iter()
        .map(|m| (m.media_key.as_str(), m))
        .collect();
    let users: HashMap<&str, &str> = page
        .includes
        .users
        .iter()
        .map(|u| (u.id.as_str(), u.username.as_str()))
        .collect();

    let mut posts = Vec::new();
    for tweet in page.data {
        let metrics = tweet.public_metrics;
        if metrics.like_count < min_likes {
            continue;
        }
        if !heuristics.is_ai_related(Variant::Description, &tweet.text) {
            continue;
        }

        let media_urls: Vec<String> = tweet
            .attachments
            .media_keys
            .iter()
            .filter_map(|key| media.get(key.as_str()))
            .filter(|m| m.kind.as_deref() == Some("video"))
            .filter_map(|m| best_mp4_url(&m.variants))
            .map(str::to_string)
            .collect();

        let author = tweet
            .author_id
            .as_deref()
            .and_then(|id| users.get(id))
            .map_or("unknown", |name| *name);

        let mut post = SocialPost::new(
            Platform::X,
            tweet.id.clone(),
            format!("https://twitter.com/i/status/{}", tweet.id),
        );
        post.extracted_prompt = heuristics.extract_prompt(Variant::Description, &tweet.text);
        post.is_ai_related = true;
        post.text_fields = TextFields {
            title: None,
            body: tweet.text,
            hashtags: Vec::new(),
        };
        post.engagement.likes = metrics.like_count;
        post.engagement.shares = metrics.retweet_count;
        post.engagement.comments = metrics.reply_count;
        post.author = Some(author.to_string());
        post.published_at = tweet.created_at;
        post.search_query = Some(query.to_string());
        post.media_urls = media_urls;
        posts.push(post);
    }
    posts
}

/// Run every query in `options`; failed queries are logged and skipped.
pub async fn collect_x(
    client: &XClient,
    heuristics: &Heuristics,
    options: &XOptions,
) -> Vec<SocialPost> {
    let mut posts = Vec::new();

    for query in &options.queries {
        tracing::info!(platform = "x", query = query.as_str(), "searching");
        match client.search_recent(query, options.max_results).await {
            Ok(page) => {
                let found = page_to_posts(page, query, heuristics, options.min_likes);
                tracing::info!(platform = "x", query = query.as_str(), count = found.len(), "matched");
                posts.extend(found);
            }
            Err(e) => {
                tracing::warn!(platform = "x", query = query.as_str(), error = %e, "search failed");
            }
        }
    }

    viralprompt_core::finalize(posts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(content_type: &str, bit_rate: Option<u64>, url: &str) -> MediaVariant {
        MediaVariant {
            url: Some(url.to_string()),
            content_type: Some(content_type.to_string()),
            bit_rate,
        }
    }

    #[test]
    fn best_mp4_prefers_highest_bitrate() {
        let variants = vec![
            variant("application/x-mpegURL", None, "https://v/playlist.m3u8"),
            variant("video/mp4", Some(832_000), "https://v/low.mp4"),
            variant("video/mp4", Some(2_176_000), "https://v/high.mp4"),
            variant("video/mp4", Some(2_176_000), "https://v/high-dup.mp4"),
        ];
        assert_eq!(best_mp4_url(&variants), Some("https://v/high.mp4"));
    }

    #[test]
    fn best_mp4_none_without_mp4() {
        let variants = vec![variant("application/x-mpegURL", None, "https://v/p.m3u8")];
        assert_eq!(best_mp4_url(&variants), None);
        assert_eq!(best_mp4_url(&[]), None);
    }

    fn page() -> SearchResponse {
        serde_json::from_value(serde_json::json!({
            "data": [
                {
                    "id": "1",
                    "text": "Sora AI is wild. prompt: \"a fox made of smoke\"",
                    "author_id": "u1",
                    "created_at": "2024-05-01T00:00:00.000Z",
                    "public_metrics": {"like_count": 5000, "retweet_count": 300, "reply_count": 12},
                    "attachments": {"media_keys": ["m1", "m2"]}
                },
                {
                    "id": "2",
                    "text": "runway gen-3 test",
                    "author_id": "ghost",
                    "public_metrics": {"like_count": 1500}
                },
                {
                    "id": "3",
                    "text": "sora again",
                    "public_metrics": {"like_count": 10}
                },
                {
                    "id": "4",
                    "text": "my lunch",
                    "public_metrics": {"like_count": 90000}
                }
            ],
            "includes": {
                "media": [
                    {"media_key": "m1", "type": "video", "variants": [
                        {"content_type": "video/mp4", "bit_rate": 256000, "url": "https://v/1.mp4"}
                    ]},
                    {"media_key": "m2", "type": "photo"}
                ],
                "users": [{"id": "u1", "username": "creator"}]
            }
        }))
        .unwrap()
    }

    #[test]
    fn page_filters_by_likes_and_keywords() {
        let h = Heuristics::builtin();
        let posts = page_to_posts(page(), "q", &h, 1000);
        let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn page_maps_metrics_media_and_author() {
        let h = Heuristics::builtin();
        let posts = page_to_posts(page(), "q", &h, 1000);

        let first = &posts[0];
        assert_eq!(first.url, "https://twitter.com/i/status/1");
        assert_eq!(first.author.as_deref(), Some("creator"));
        assert_eq!(first.engagement.likes, 5000);
        assert_eq!(first.engagement.shares, 300);
        assert_eq!(first.engagement.comments, 12);
        assert_eq!(first.media_urls, vec!["https://v/1.mp4".to_string()]);
        assert_eq!(first.extracted_prompt.as_deref(), Some("a fox made of smoke"));

        let second = &posts[1];
        assert_eq!(second.author.as_deref(), Some("unknown"));
        assert!(second.media_urls.is_empty());
        assert!(second.extracted_prompt.is_none());
    }

    #[test]
    fn empty_page_deserializes() {
        let page: SearchResponse = serde_json::from_str(r#"{"meta":{"result_count":0}}"#).unwrap();
        assert!(page.data.is_empty());
    }
}
