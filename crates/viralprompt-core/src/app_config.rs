use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub youtube_api_key: Option<String>,
    pub twitter_bearer_token: Option<String>,
    pub instagram_access_token: Option<String>,
    pub instagram_account_id: Option<String>,
    pub midjourney_api_key: Option<String>,
    pub output_dir: PathBuf,
    pub log_level: String,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    pub heuristics_path: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |secret: &Option<String>| secret.as_ref().map(|_| "[redacted]");
        f.debug_struct("AppConfig")
            .field("youtube_api_key", &redact(&self.youtube_api_key))
            .field("twitter_bearer_token", &redact(&self.twitter_bearer_token))
            .field(
                "instagram_access_token",
                &redact(&self.instagram_access_token),
            )
            .field("instagram_account_id", &self.instagram_account_id)
            .field("midjourney_api_key", &redact(&self.midjourney_api_key))
            .field("output_dir", &self.output_dir)
            .field("log_level", &self.log_level)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("heuristics_path", &self.heuristics_path)
            .finish()
    }
}
