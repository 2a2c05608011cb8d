//! Core record types and configuration shared by the `ViralPrompt` collectors.

pub mod app_config;
pub mod config;
pub mod platform;
pub mod post;
pub mod rank;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, require_credential};
pub use platform::Platform;
pub use post::{Engagement, SocialPost, TextFields};
pub use rank::{dedup_by_id, finalize, sort_by_engagement};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
