use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_OUTPUT_DIR: &str = "ai_reels_data";
pub const DEFAULT_USER_AGENT: &str = "viralprompt/0.1 (ai-content-research)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build configuration from the provided env-var lookup function so tests
/// can drive it with a plain map.
///
/// Every platform credential is optional; a collector whose credential is
/// absent is skipped at run time rather than failing config loading.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        optional(var).unwrap_or_else(|| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let http_timeout_secs = parse_u64("VIRALPROMPT_HTTP_TIMEOUT_SECS", "30")?;
    if http_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "VIRALPROMPT_HTTP_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        youtube_api_key: optional("YOUTUBE_API_KEY"),
        twitter_bearer_token: optional("TWITTER_BEARER_TOKEN"),
        instagram_access_token: optional("INSTAGRAM_ACCESS_TOKEN"),
        instagram_account_id: optional("INSTAGRAM_ACCOUNT_ID"),
        midjourney_api_key: optional("MIDJOURNEY_API_KEY"),
        output_dir: PathBuf::from(or_default("VIRALPROMPT_OUTPUT_DIR", DEFAULT_OUTPUT_DIR)),
        log_level: or_default("VIRALPROMPT_LOG_LEVEL", "info"),
        http_timeout_secs,
        user_agent: or_default("VIRALPROMPT_USER_AGENT", DEFAULT_USER_AGENT),
        heuristics_path: optional("VIRALPROMPT_HEURISTICS_PATH").map(PathBuf::from),
    })
}

/// Resolve a credential that a command cannot run without.
///
/// # Errors
///
/// Returns [`ConfigError::MissingEnvVar`] naming `var` when `value` is `None`.
pub fn require_credential<'a>(value: Option<&'a str>, var: &str) -> Result<&'a str, ConfigError> {
    value.ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
