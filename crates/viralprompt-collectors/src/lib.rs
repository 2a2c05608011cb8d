//! Per-platform collectors for viral AI-generated posts.
//!
//! Every collector follows the same batch shape: run each search query in
//! turn, keep items over the engagement threshold that the keyword
//! classifier flags, recover a prompt where possible, then dedup by native
//! id and rank by engagement. A failed query is logged and skipped; nothing
//! is retried.

pub mod error;
pub mod instagram;
pub mod midjourney;
pub mod output;
pub mod tiktok;
pub mod twitter;
pub mod youtube;

mod http;

pub use error::CollectorError;
pub use instagram::InstagramGraphClient;
pub use midjourney::{MidjourneyApiClient, MidjourneyFeedClient};
pub use output::{write_guide, write_results, RunSummary};
pub use twitter::XClient;
pub use youtube::YouTubeClient;
