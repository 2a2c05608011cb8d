use serde::{Deserialize, Serialize};

/// Social platform a record was collected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "YouTube")]
    YouTube,
    #[serde(rename = "TikTok")]
    TikTok,
    #[serde(rename = "X (Twitter)")]
    X,
    #[serde(rename = "Instagram")]
    Instagram,
    #[serde(rename = "Midjourney")]
    Midjourney,
}

impl Platform {
    /// Stem used for the timestamped results file of this platform.
    #[must_use]
    pub fn output_stem(self) -> &'static str {
        match self {
            Platform::YouTube => "youtube_ai_reels",
            Platform::TikTok => "tiktok_ai_reels",
            Platform::X => "twitter_ai_reels",
            Platform::Instagram => "instagram_ai_reels",
            Platform::Midjourney => "midjourney_gallery",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::YouTube => write!(f, "YouTube"),
            Platform::TikTok => write!(f, "TikTok"),
            Platform::X => write!(f, "X (Twitter)"),
            Platform::Instagram => write!(f, "Instagram"),
            Platform::Midjourney => write!(f, "Midjourney"),
        }
    }
}
