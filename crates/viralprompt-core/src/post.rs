use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// Free-text fields of a post that are searched for AI signal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFields {
    /// Video title. Absent for tweets and captions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description, caption, or tweet text.
    #[serde(default)]
    pub body: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hashtags: Vec<String>,
}

impl TextFields {
    /// Title and body joined by a single space, the text the keyword
    /// classifier runs over.
    #[must_use]
    pub fn combined(&self) -> String {
        match &self.title {
            Some(title) => format!("{title} {}", self.body),
            None => self.body.clone(),
        }
    }

    /// Hashtags rendered as `#tag #tag ...`.
    #[must_use]
    pub fn hashtag_text(&self) -> String {
        self.hashtags
            .iter()
            .map(|tag| format!("#{tag}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Engagement counts. Each platform fills the subset it reports; the rest
/// stay at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    /// Shares, retweets, or reposts depending on the platform.
    #[serde(default)]
    pub shares: u64,
}

/// One collected post, video, or image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPost {
    pub platform: Platform,
    /// Platform-native identifier (video id, tweet id, shortcode, image id).
    pub id: String,
    pub url: String,
    pub text_fields: TextFields,
    pub engagement: Engagement,
    pub extracted_prompt: Option<String>,
    pub is_ai_related: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media_urls: Vec<String>,
    /// Platform-specific extras (duration, media type, model parameters).
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl SocialPost {
    /// Creates a record with empty text and zero engagement.
    pub fn new(platform: Platform, id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            platform,
            id: id.into(),
            url: url.into(),
            text_fields: TextFields::default(),
            engagement: Engagement::default(),
            extracted_prompt: None,
            is_ai_related: false,
            author: None,
            published_at: None,
            search_query: None,
            media_urls: Vec::new(),
            details: serde_json::Map::new(),
        }
    }

    /// Score used to rank records within one run.
    ///
    /// `YouTube` ranks by views, X by `likes + 2 * reposts`, everything else
    /// by likes.
    #[must_use]
    pub fn engagement_score(&self) -> u64 {
        let e = &self.engagement;
        match self.platform {
            Platform::YouTube => e.views,
            Platform::X => e.likes.saturating_add(e.shares.saturating_mul(2)),
            Platform::TikTok | Platform::Instagram | Platform::Midjourney => e.likes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_joins_title_and_body() {
        let fields = TextFields {
            title: Some("Sora test".to_string()),
            body: "made in a day".to_string(),
            hashtags: vec![],
        };
        assert_eq!(fields.combined(), "Sora test made in a day");
    }

    #[test]
    fn combined_without_title_is_body() {
        let fields = TextFields {
            title: None,
            body: "just text".to_string(),
            hashtags: vec![],
        };
        assert_eq!(fields.combined(), "just text");
    }

    #[test]
    fn hashtag_text_prefixes_each_tag() {
        let fields = TextFields {
            hashtags: vec!["aiart".to_string(), "runwayml".to_string()],
            ..TextFields::default()
        };
        assert_eq!(fields.hashtag_text(), "#aiart #runwayml");
    }

    #[test]
    fn x_score_weights_reposts_double() {
        let mut post = SocialPost::new(Platform::X, "1", "https://twitter.com/i/status/1");
        post.engagement.likes = 100;
        post.engagement.shares = 10;
        assert_eq!(post.engagement_score(), 120);
    }

    #[test]
    fn youtube_score_is_views() {
        let mut post = SocialPost::new(Platform::YouTube, "v", "https://youtu.be/v");
        post.engagement.views = 5_000;
        post.engagement.likes = 99;
        assert_eq!(post.engagement_score(), 5_000);
    }

    #[test]
    fn empty_optionals_are_omitted_from_json() {
        let post = SocialPost::new(Platform::Instagram, "abc", "https://instagram.com/p/abc/");
        let value = serde_json::to_value(&post).unwrap();
        assert!(value.get("author").is_none());
        assert!(value.get("details").is_none());
        assert_eq!(value["extracted_prompt"], serde_json::Value::Null);
        assert_eq!(value["platform"], "Instagram");
    }
}
