use viralprompt_collectors::{
    instagram, midjourney, tiktok, twitter, youtube, InstagramGraphClient, MidjourneyApiClient,
    MidjourneyFeedClient, XClient, YouTubeClient,
};
use viralprompt_core::{require_credential, AppConfig, Platform};
use viralprompt_extract::Heuristics;

use super::report::{print_summary, save_guide};

pub(super) async fn run_youtube(
    config: &AppConfig,
    heuristics: &Heuristics,
    options: &youtube::YouTubeOptions,
) -> anyhow::Result<()> {
    let api_key = require_credential(config.youtube_api_key.as_deref(), "YOUTUBE_API_KEY")?;
    let client = YouTubeClient::new(api_key, config.http_timeout_secs, &config.user_agent)
        .map_err(|e| anyhow::anyhow!("failed to build YouTube client: {e}"))?;

    let records = youtube::collect_youtube(&client, heuristics, options).await?;
    print_summary(config, Platform::YouTube, &records)
}

pub(super) async fn run_x(
    config: &AppConfig,
    heuristics: &Heuristics,
    options: &twitter::XOptions,
) -> anyhow::Result<()> {
    let token = require_credential(
        config.twitter_bearer_token.as_deref(),
        "TWITTER_BEARER_TOKEN",
    )?;
    let client = XClient::new(token, config.http_timeout_secs, &config.user_agent)
        .map_err(|e| anyhow::anyhow!("failed to build X client: {e}"))?;

    let records = twitter::collect_x(&client, heuristics, options).await;
    print_summary(config, Platform::X, &records)
}

pub(super) fn run_tiktok() {
    let records = tiktok::collect_tiktok();
    println!(
        "TikTok: {} records. Monitor these hashtags: {}",
        records.len(),
        tiktok::TIKTOK_HASHTAGS.join(", ")
    );
}

pub(super) async fn run_instagram_graph(
    config: &AppConfig,
    heuristics: &Heuristics,
    access_token: Option<&str>,
    account_id: Option<&str>,
) -> anyhow::Result<()> {
    let access_token = require_credential(
        access_token.or(config.instagram_access_token.as_deref()),
        "INSTAGRAM_ACCESS_TOKEN",
    )?;
    let account_id = require_credential(
        account_id.or(config.instagram_account_id.as_deref()),
        "INSTAGRAM_ACCOUNT_ID",
    )?;
    let client =
        InstagramGraphClient::new(access_token, config.http_timeout_secs, &config.user_agent)
            .map_err(|e| anyhow::anyhow!("failed to build Instagram client: {e}"))?;

    let records = instagram::collect_instagram(&client, heuristics, account_id).await;
    print_summary(config, Platform::Instagram, &records)
}

pub(super) fn run_instagram_manual(config: &AppConfig) -> anyhow::Result<()> {
    save_guide(
        config,
        instagram::GUIDE_FILE_NAME,
        &instagram::manual_guide(),
    )
}

pub(super) async fn run_midjourney_api(
    config: &AppConfig,
    api_key: Option<&str>,
    max_images: u32,
) -> anyhow::Result<()> {
    let api_key = require_credential(
        api_key.or(config.midjourney_api_key.as_deref()),
        "MIDJOURNEY_API_KEY",
    )?;
    let client = MidjourneyApiClient::new(api_key, config.http_timeout_secs, &config.user_agent)
        .map_err(|e| anyhow::anyhow!("failed to build Midjourney API client: {e}"))?;

    let records = midjourney::collect_midjourney_api(&client, max_images).await;
    print_summary(config, Platform::Midjourney, &records)
}

pub(super) async fn run_midjourney_web(config: &AppConfig, max_images: u32) -> anyhow::Result<()> {
    let client = MidjourneyFeedClient::new(config.http_timeout_secs)
        .map_err(|e| anyhow::anyhow!("failed to build Midjourney feed client: {e}"))?;

    let records = midjourney::collect_midjourney_feed(&client, max_images).await;
    print_summary(config, Platform::Midjourney, &records)
}

pub(super) fn run_midjourney_discord(config: &AppConfig) -> anyhow::Result<()> {
    save_guide(
        config,
        midjourney::DISCORD_GUIDE_FILE_NAME,
        &midjourney::discord_guide(),
    )
}

pub(super) fn run_midjourney_manual(config: &AppConfig) -> anyhow::Result<()> {
    save_guide(
        config,
        midjourney::MANUAL_GUIDE_FILE_NAME,
        &midjourney::manual_guide(),
    )
}

pub(super) fn run_midjourney_databases() {
    println!("{}", midjourney::databases_listing());
}
