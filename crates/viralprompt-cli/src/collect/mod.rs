//! Collection command handlers for the CLI.
//!
//! Each handler builds its platform client from config, runs the collector,
//! and saves whatever it found. Query-level failures are already logged and
//! skipped inside the collectors; only setup errors (missing credentials,
//! unwritable output directory) reach the caller.

mod report;
mod runner;

use clap::{Subcommand, ValueEnum};
use viralprompt_core::AppConfig;
use viralprompt_extract::Heuristics;

/// Sub-commands available under `collect`.
#[derive(Debug, Subcommand)]
pub enum CollectCommands {
    /// Most-viewed AI shorts from the YouTube Data API
    Youtube {
        /// Results per search query
        #[arg(long, default_value_t = 50)]
        max_results: u32,

        /// Only videos published within this many days (0 to 3650)
        #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(i64).range(0..=3650))]
        days_back: i64,

        /// Minimum view count
        #[arg(long, default_value_t = 50_000)]
        min_views: u64,
    },
    /// Popular AI video posts from X recent search
    X {
        /// Results per search query (the API accepts 10 to 100)
        #[arg(long, default_value_t = 100)]
        max_results: u32,

        /// Minimum like count
        #[arg(long, default_value_t = 500)]
        min_likes: u64,
    },
    /// Log TikTok access options and hashtags to monitor
    Tiktok,
    /// AI reels from an Instagram business account, or a manual guide
    Instagram {
        #[arg(long, value_enum, default_value_t = InstagramMethod::Manual)]
        method: InstagramMethod,

        /// Graph API token (falls back to `INSTAGRAM_ACCESS_TOKEN`)
        #[arg(long)]
        access_token: Option<String>,

        /// Business account id (falls back to `INSTAGRAM_ACCOUNT_ID`)
        #[arg(long)]
        account_id: Option<String>,
    },
    /// Midjourney images and prompts, or collection guides
    Midjourney {
        #[arg(long, value_enum, default_value_t = MidjourneyMethod::Manual)]
        method: MidjourneyMethod,

        /// Maximum images to fetch
        #[arg(long, default_value_t = viralprompt_collectors::midjourney::DEFAULT_MAX_IMAGES)]
        max_images: u32,

        /// Gallery API key (falls back to `MIDJOURNEY_API_KEY`)
        #[arg(long)]
        api_key: Option<String>,
    },
    /// YouTube, X, and TikTok in sequence; platforms without credentials are skipped
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InstagramMethod {
    GraphApi,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MidjourneyMethod {
    Web,
    Api,
    Discord,
    Databases,
    Manual,
}

/// Dispatch a `collect` sub-command.
///
/// # Errors
///
/// Returns an error if a required credential is missing, a client cannot be
/// built, or results cannot be written.
pub(crate) async fn run(
    config: &AppConfig,
    heuristics: &Heuristics,
    command: CollectCommands,
) -> anyhow::Result<()> {
    match command {
        CollectCommands::Youtube {
            max_results,
            days_back,
            min_views,
        } => {
            let options = viralprompt_collectors::youtube::YouTubeOptions {
                max_results,
                days_back,
                min_views,
                ..Default::default()
            };
            runner::run_youtube(config, heuristics, &options).await
        }
        CollectCommands::X {
            max_results,
            min_likes,
        } => {
            let options = viralprompt_collectors::twitter::XOptions {
                max_results,
                min_likes,
                ..Default::default()
            };
            runner::run_x(config, heuristics, &options).await
        }
        CollectCommands::Tiktok => {
            runner::run_tiktok();
            Ok(())
        }
        CollectCommands::Instagram {
            method,
            access_token,
            account_id,
        } => match method {
            InstagramMethod::GraphApi => {
                runner::run_instagram_graph(
                    config,
                    heuristics,
                    access_token.as_deref(),
                    account_id.as_deref(),
                )
                .await
            }
            InstagramMethod::Manual => runner::run_instagram_manual(config),
        },
        CollectCommands::Midjourney {
            method,
            max_images,
            api_key,
        } => match method {
            MidjourneyMethod::Web => runner::run_midjourney_web(config, max_images).await,
            MidjourneyMethod::Api => {
                runner::run_midjourney_api(config, api_key.as_deref(), max_images).await
            }
            MidjourneyMethod::Discord => runner::run_midjourney_discord(config),
            MidjourneyMethod::Databases => {
                runner::run_midjourney_databases();
                Ok(())
            }
            MidjourneyMethod::Manual => runner::run_midjourney_manual(config),
        },
        CollectCommands::All => run_all(config, heuristics).await,
    }
}

async fn run_all(config: &AppConfig, heuristics: &Heuristics) -> anyhow::Result<()> {
    if config.youtube_api_key.is_some() {
        let options = viralprompt_collectors::youtube::YouTubeOptions {
            min_views: 50_000,
            ..Default::default()
        };
        runner::run_youtube(config, heuristics, &options).await?;
    } else {
        tracing::warn!(platform = "youtube", "YOUTUBE_API_KEY not set; skipping");
    }

    if config.twitter_bearer_token.is_some() {
        let options = viralprompt_collectors::twitter::XOptions {
            min_likes: 500,
            ..Default::default()
        };
        runner::run_x(config, heuristics, &options).await?;
    } else {
        tracing::warn!(platform = "x", "TWITTER_BEARER_TOKEN not set; skipping");
    }

    runner::run_tiktok();
    Ok(())
}

#[cfg(test)]
#[path = "collect_test.rs"]
mod tests;
