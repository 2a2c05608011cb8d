//! `YouTube` Data API v3 collector for viral AI-generated shorts.

use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, Url};
use serde::Deserialize;
use viralprompt_core::{Platform, SocialPost, TextFields};
use viralprompt_extract::{Heuristics, Variant};

use crate::error::CollectorError;
use crate::http::{build_client, join, parse_base_url, send_json};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

pub const DEFAULT_QUERIES: &[&str] = &[
    "AI generated video viral",
    "runway gen-3 viral",
    "sora AI video",
    "AI animation viral",
    "text to video AI",
    "midjourney video",
    "pika labs viral",
    "AI generated music viral",
    "Suno ai audio",
    "eleven labs ai audio",
    "ai influencer openart prompts",
];

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<Video>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub id: String,
    #[serde(default)]
    pub snippet: VideoSnippet,
    #[serde(default)]
    pub statistics: VideoStatistics,
    #[serde(default, rename = "contentDetails")]
    pub content_details: ContentDetails,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoSnippet {
    pub title: String,
    pub description: String,
    pub published_at: Option<String>,
    pub channel_title: Option<String>,
}

/// The API reports counts as decimal strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoStatistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub comment_count: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContentDetails {
    pub duration: Option<String>,
}

fn count(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.parse().ok()).unwrap_or(0)
}

/// Client for the two Data API endpoints the collector needs.
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl YouTubeClient {
    /// # Errors
    ///
    /// Returns [`CollectorError::Http`] if the HTTP client cannot be built.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, CollectorError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Point the client at a different API root (a mock server in tests).
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, CollectorError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            api_key: api_key.to_owned(),
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Short videos matching `query`, most viewed first, published after
    /// `published_after` (RFC 3339).
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError`] on network failure, non-2xx status, or an
    /// unexpected body.
    pub async fn search_video_ids(
        &self,
        query: &str,
        max_results: u32,
        published_after: &str,
    ) -> Result<Vec<String>, CollectorError> {
        let url = join(&self.base_url, "search")?;
        let max_results = max_results.to_string();
        let request = self.client.get(url).query(&[
            ("part", "snippet"),
            ("q", query),
            ("type", "video"),
            ("order", "viewCount"),
            ("maxResults", max_results.as_str()),
            ("publishedAfter", published_after),
            ("key", self.api_key.as_str()),
            ("videoDuration", "short"),
        ]);

        let body: SearchResponse = send_json(request, &format!("search(q={query})")).await?;
        Ok(body
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect())
    }

    /// Statistics, snippet, and content details for up to 50 ids.
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError`] on network failure, non-2xx status, or an
    /// unexpected body.
    pub async fn fetch_videos(&self, ids: &[String]) -> Result<Vec<Video>, CollectorError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let url = join(&self.base_url, "videos")?;
        let joined = ids.join(",");
        let request = self.client.get(url).query(&[
            ("part", "statistics,snippet,contentDetails"),
            ("id", joined.as_str()),
            ("key", self.api_key.as_str()),
        ]);

        let body: VideosResponse = send_json(request, "videos").await?;
        Ok(body.items)
    }
}

#[derive(Debug, Clone)]
pub struct YouTubeOptions {
    pub max_results: u32,
    pub days_back: i64,
    pub min_views: u64,
    pub queries: Vec<String>,
}

impl Default for YouTubeOptions {
    fn default() -> Self {
        Self {
            max_results: 50,
            days_back: 30,
            min_views: 100_000,
            queries: DEFAULT_QUERIES.iter().map(|q| (*q).to_string()).collect(),
        }
    }
}

/// Lower bound for `publishedAfter`, `days_back` days before `now`.
///
/// # Errors
///
/// Returns [`CollectorError::InvalidOption`] if `days_back` is negative or
/// reaches past the representable date range.
pub fn published_after(now: DateTime<Utc>, days_back: i64) -> Result<String, CollectorError> {
    Duration::try_days(days_back)
        .filter(|_| days_back >= 0)
        .and_then(|window| now.checked_sub_signed(window))
        .map(|after| after.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .ok_or_else(|| CollectorError::InvalidOption {
            name: "days_back",
            reason: format!("{days_back} days is out of range"),
        })
}

/// Turn a video into a record if it clears `min_views` and looks AI-made.
#[must_use]
pub fn video_to_post(
    video: Video,
    query: &str,
    heuristics: &Heuristics,
    min_views: u64,
) -> Option<SocialPost> {
    let views = count(video.statistics.view_count.as_deref());
    if views < min_views {
        return None;
    }

    let text_fields = TextFields {
        title: Some(video.snippet.title),
        body: video.snippet.description,
        hashtags: Vec::new(),
    };
    if !heuristics.is_ai_related(Variant::Description, &text_fields.combined()) {
        return None;
    }

    let mut post = SocialPost::new(
        Platform::YouTube,
        video.id.clone(),
        format!("https://www.youtube.com/watch?v={}", video.id),
    );
    post.extracted_prompt = heuristics.extract_prompt(Variant::Description, &text_fields.body);
    post.is_ai_related = true;
    post.text_fields = text_fields;
    post.engagement.views = views;
    post.engagement.likes = count(video.statistics.like_count.as_deref());
    post.engagement.comments = count(video.statistics.comment_count.as_deref());
    post.author = video.snippet.channel_title;
    post.published_at = video.snippet.published_at;
    post.search_query = Some(query.to_string());
    if let Some(duration) = video.content_details.duration {
        post.details
            .insert("duration".to_string(), serde_json::Value::String(duration));
    }
    Some(post)
}

/// Run every query in `options`, returning deduplicated records ranked by views.
///
/// A query whose search or stats call fails is logged and skipped.
///
/// # Errors
///
/// Returns [`CollectorError::InvalidOption`] if `options.days_back` is out of
/// range. No request is sent in that case.
pub async fn collect_youtube(
    client: &YouTubeClient,
    heuristics: &Heuristics,
    options: &YouTubeOptions,
) -> Result<Vec<SocialPost>, CollectorError> {
    let after = published_after(Utc::now(), options.days_back)?;
    let mut posts = Vec::new();

    for query in &options.queries {
        tracing::info!(platform = "youtube", query = query.as_str(), "searching");

        let ids = match client
            .search_video_ids(query, options.max_results, &after)
            .await
        {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!(platform = "youtube", query = query.as_str(), error = %e, "search failed");
                continue;
            }
        };
        if ids.is_empty() {
            continue;
        }

        let videos = match client.fetch_videos(&ids).await {
            Ok(videos) => videos,
            Err(e) => {
                tracing::warn!(platform = "youtube", query = query.as_str(), error = %e, "video stats failed");
                continue;
            }
        };

        for video in videos {
            if let Some(post) = video_to_post(video, query, heuristics, options.min_views) {
                tracing::info!(
                    platform = "youtube",
                    id = post.id.as_str(),
                    views = post.engagement.views,
                    "found"
                );
                posts.push(post);
            }
        }
    }

    Ok(viralprompt_core::finalize(posts))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn video(id: &str, views: &str, title: &str, description: &str) -> Video {
        Video {
            id: id.to_string(),
            snippet: VideoSnippet {
                title: title.to_string(),
                description: description.to_string(),
                published_at: Some("2024-05-01T00:00:00Z".to_string()),
                channel_title: Some("Creator".to_string()),
            },
            statistics: VideoStatistics {
                view_count: Some(views.to_string()),
                like_count: Some("12".to_string()),
                comment_count: None,
            },
            content_details: ContentDetails {
                duration: Some("PT45S".to_string()),
            },
        }
    }

    #[test]
    fn published_after_is_rfc3339_utc() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
        assert_eq!(published_after(now, 30).unwrap(), "2024-03-01T12:00:00Z");
        assert_eq!(published_after(now, 0).unwrap(), "2024-03-31T12:00:00Z");
    }

    #[test]
    fn published_after_rejects_out_of_range_windows() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
        for days in [-1, 1_000_000_000, i64::MAX] {
            assert!(
                matches!(
                    published_after(now, days),
                    Err(CollectorError::InvalidOption { name: "days_back", .. })
                ),
                "days_back {days}"
            );
        }
    }

    #[test]
    fn below_min_views_is_dropped() {
        let h = Heuristics::builtin();
        let v = video("a", "999", "Sora AI video", "");
        assert!(video_to_post(v, "q", &h, 1_000).is_none());
    }

    #[test]
    fn non_ai_video_is_dropped() {
        let h = Heuristics::builtin();
        let v = video("a", "5000", "Cat compilation", "funny cats");
        assert!(video_to_post(v, "q", &h, 1_000).is_none());
    }

    #[test]
    fn keyword_in_description_is_enough() {
        let h = Heuristics::builtin();
        let v = video("a", "5000", "Wow", "made with runway gen-3");
        assert!(video_to_post(v, "q", &h, 1_000).is_some());
    }

    #[test]
    fn builds_record_with_prompt_from_description() {
        let h = Heuristics::builtin();
        let v = video(
            "abc",
            "250000",
            "Sora AI short",
            "Prompt: \"a paper boat sailing through a storm\"\nmore soon",
        );
        let post = video_to_post(v, "sora AI video", &h, 100_000).unwrap();
        assert_eq!(post.url, "https://www.youtube.com/watch?v=abc");
        assert_eq!(post.engagement.views, 250_000);
        assert_eq!(post.engagement.likes, 12);
        assert_eq!(post.engagement.comments, 0);
        assert_eq!(
            post.extracted_prompt.as_deref(),
            Some("a paper boat sailing through a storm")
        );
        assert!(post.is_ai_related);
        assert_eq!(post.author.as_deref(), Some("Creator"));
        assert_eq!(post.search_query.as_deref(), Some("sora AI video"));
        assert_eq!(post.details["duration"], "PT45S");
    }

    #[test]
    fn unparsable_counts_default_to_zero() {
        assert_eq!(count(Some("n/a")), 0);
        assert_eq!(count(None), 0);
        assert_eq!(count(Some("42")), 42);
    }
}
