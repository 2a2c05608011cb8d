//! TikTok placeholder. Search needs Research API approval, so this collector
//! only points at the hashtags and access routes worth pursuing.

use viralprompt_core::SocialPost;

pub const TIKTOK_HASHTAGS: &[&str] = &[
    "#AIgenerated",
    "#AIart",
    "#AIvideo",
    "#RunwayML",
    "#MidjourneyAI",
    "#PikaLabs",
    "#TextToVideo",
    "#AIanimation",
];

pub const ACCESS_OPTIONS: &[&str] = &[
    "TikTok Research API (https://developers.tiktok.com/), requires approval",
    "TikTok Creative Center trending pages, browsed by hand",
    "third-party TikTok endpoints (for example via RapidAPI)",
];

/// Log where TikTok data can come from. Always returns no records.
#[must_use]
pub fn collect_tiktok() -> Vec<SocialPost> {
    tracing::warn!(platform = "tiktok", "search requires API access; no records collected");
    for option in ACCESS_OPTIONS {
        tracing::info!(platform = "tiktok", option, "access route");
    }
    tracing::info!(
        platform = "tiktok",
        hashtags = %TIKTOK_HASHTAGS.join(", "),
        "hashtags to monitor"
    );
    Vec::new()
}
