//! Midjourney gallery collection: a third-party gallery API, a community feed
//! scrape, and written guides for the Discord and manual workflows.

pub mod feed;
pub mod params;

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::{Map, Value};
use viralprompt_core::{Platform, SocialPost, TextFields};

use crate::error::CollectorError;
use crate::http::{build_client, join, parse_base_url, send_json, send_text};

pub use feed::{parse_feed_html, FeedImage};
pub use params::{extract_discord_prompt, parse_command, ParsedCommand};

const DEFAULT_API_BASE_URL: &str = "https://api.useapi.net/v1/";
const DEFAULT_FEED_URL: &str = "https://www.midjourney.com/app/feed/";
/// The feed rejects non-browser agents outright.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

pub const DEFAULT_MAX_IMAGES: u32 = 100;
pub const DISCORD_GUIDE_FILE_NAME: &str = "midjourney_discord_guide.txt";
pub const MANUAL_GUIDE_FILE_NAME: &str = "midjourney_manual_guide.txt";

/// Public prompt collections worth browsing by hand.
pub const PROMPT_DATABASES: &[(&str, &str)] = &[
    ("PromptBase", "https://promptbase.com/marketplace?model=midjourney"),
    ("PublicPrompts", "https://publicprompts.art/"),
    ("PromptHero", "https://prompthero.com/midjourney-prompts"),
    ("Lexica.art", "https://lexica.art/?q=midjourney"),
    ("PromptFolder", "https://promptfolder.com/midjourney-prompts/"),
    (
        "GitHub Collections",
        "https://github.com/search?q=midjourney+prompts",
    ),
];

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GalleryResponse {
    pub images: Vec<GalleryImage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GalleryImage {
    pub id: Option<String>,
    pub url: Option<String>,
    pub prompt: Option<String>,
    pub full_prompt: Option<String>,
    pub upscaled: bool,
    pub variation: Option<Value>,
    pub grid_index: Option<Value>,
    pub created_at: Option<String>,
    pub user_id: Option<String>,
    pub likes: u64,
    pub model_version: Option<String>,
    pub parameters: Map<String, Value>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Map a gallery item to a record. Items with neither an id nor a URL are
/// dropped since they cannot be deduplicated.
#[must_use]
pub fn gallery_image_to_post(image: GalleryImage) -> Option<SocialPost> {
    let url = non_empty(image.url);
    let id = non_empty(image.id).or_else(|| url.clone())?;
    let full_prompt = non_empty(image.full_prompt);
    let parsed = full_prompt.as_deref().map(parse_command);

    let prompt = non_empty(image.prompt)
        .or_else(|| parsed.as_ref().map(|p| p.prompt.clone()))
        .filter(|p| !p.is_empty());
    let parameters = if image.parameters.is_empty() {
        parsed
            .as_ref()
            .map(|p| p.parameters.clone())
            .unwrap_or_default()
    } else {
        image.parameters
    };
    let model_version = non_empty(image.model_version)
        .or_else(|| parsed.as_ref().and_then(ParsedCommand::model_version));

    let mut post = SocialPost::new(Platform::Midjourney, id, url.clone().unwrap_or_default());
    post.text_fields = TextFields {
        title: None,
        body: full_prompt.clone().or_else(|| prompt.clone()).unwrap_or_default(),
        hashtags: Vec::new(),
    };
    post.extracted_prompt = prompt;
    post.is_ai_related = true;
    post.engagement.likes = image.likes;
    post.author = image.user_id;
    post.published_at = image.created_at;
    post.media_urls = url.into_iter().collect();

    let details = &mut post.details;
    details.insert("source".into(), Value::from("third_party_api"));
    if let Some(full) = full_prompt {
        details.insert("full_prompt".into(), Value::from(full));
    }
    if let Some(version) = model_version {
        details.insert("model_version".into(), Value::from(version));
    }
    details.insert("parameters".into(), Value::Object(parameters));
    details.insert("upscaled".into(), Value::Bool(image.upscaled));
    if let Some(variation) = image.variation {
        details.insert("variation".into(), variation);
    }
    if let Some(grid_index) = image.grid_index {
        details.insert("grid_index".into(), grid_index);
    }
    Some(post)
}

/// Map a scraped feed entry to a record keyed by its image URL.
#[must_use]
pub fn feed_image_to_post(image: FeedImage) -> SocialPost {
    let parsed = parse_command(&image.prompt);
    let mut post = SocialPost::new(
        Platform::Midjourney,
        image.image_url.clone(),
        image.image_url.clone(),
    );
    post.extracted_prompt = Some(image.prompt.clone());
    post.is_ai_related = true;
    post.text_fields = TextFields {
        title: None,
        body: image.prompt,
        hashtags: Vec::new(),
    };
    post.media_urls = vec![image.image_url];
    post.details
        .insert("source".into(), Value::from("community_feed"));
    if !parsed.parameters.is_empty() {
        if let Some(version) = parsed.model_version() {
            post.details
                .insert("model_version".into(), Value::from(version));
        }
        post.details
            .insert("parameters".into(), Value::Object(parsed.parameters));
    }
    post
}

/// Bearer-authenticated client for a third-party gallery wrapper.
pub struct MidjourneyApiClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl MidjourneyApiClient {
    /// # Errors
    ///
    /// Returns [`CollectorError::Http`] if the HTTP client cannot be built.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, CollectorError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_API_BASE_URL)
    }

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

    /// Trending gallery images, up to `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError`] on network failure, non-2xx status, or an
    /// unexpected body.
    pub async fn fetch_gallery(&self, limit: u32) -> Result<GalleryResponse, CollectorError> {
        let url = join(&self.base_url, "midjourney/gallery")?;
        let limit = limit.to_string();
        let request = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .query(&[("limit", limit.as_str()), ("sort", "trending")]);
        send_json(request, "midjourney/gallery").await
    }
}

/// Fetches the community feed page with a browser user agent.
pub struct MidjourneyFeedClient {
    client: Client,
    feed_url: Url,
}

impl MidjourneyFeedClient {
    /// # Errors
    ///
    /// Returns [`CollectorError::Http`] if the HTTP client cannot be built.
    pub fn new(timeout_secs: u64) -> Result<Self, CollectorError> {
        Self::with_feed_url(timeout_secs, DEFAULT_FEED_URL)
    }

    /// # Errors
    ///
    /// Returns [`CollectorError::InvalidBaseUrl`] if `feed_url` does not parse.
    pub fn with_feed_url(timeout_secs: u64, feed_url: &str) -> Result<Self, CollectorError> {
        Ok(Self {
            client: build_client(timeout_secs, BROWSER_USER_AGENT)?,
            feed_url: Url::parse(feed_url).map_err(|e| CollectorError::InvalidBaseUrl {
                base_url: feed_url.to_string(),
                reason: e.to_string(),
            })?,
        })
    }

    /// # Errors
    ///
    /// Returns [`CollectorError`] on network failure or non-2xx status.
    pub async fn fetch_html(&self) -> Result<String, CollectorError> {
        send_text(self.client.get(self.feed_url.clone())).await
    }
}

/// Collect trending images from the gallery API. A failed request is logged
/// and yields no records.
pub async fn collect_midjourney_api(
    client: &MidjourneyApiClient,
    max_images: u32,
) -> Vec<SocialPost> {
    tracing::info!(platform = "midjourney", max_images, "fetching gallery");
    let gallery = match client.fetch_gallery(max_images).await {
        Ok(gallery) => gallery,
        Err(e) => {
            tracing::warn!(
                platform = "midjourney",
                error = %e,
                "gallery request failed; check the API key, remaining credits, and endpoint"
            );
            return Vec::new();
        }
    };

    let posts: Vec<SocialPost> = gallery
        .images
        .into_iter()
        .filter_map(gallery_image_to_post)
        .collect();
    tracing::info!(platform = "midjourney", count = posts.len(), "extracted");
    viralprompt_core::finalize(posts)
}

/// Collect image/prompt pairs from the community feed HTML.
pub async fn collect_midjourney_feed(
    client: &MidjourneyFeedClient,
    max_images: u32,
) -> Vec<SocialPost> {
    tracing::info!(platform = "midjourney", "fetching community feed");
    let html = match client.fetch_html().await {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!(platform = "midjourney", error = %e, "community feed fetch failed");
            return Vec::new();
        }
    };

    let limit = usize::try_from(max_images).unwrap_or(usize::MAX);
    let images = parse_feed_html(&html, limit);
    if images.is_empty() {
        tracing::warn!(
            platform = "midjourney",
            "no image containers in feed HTML; the page is likely rendered client-side"
        );
    }
    let posts = images.into_iter().map(feed_image_to_post).collect();
    viralprompt_core::finalize(posts)
}

/// Listing of [`PROMPT_DATABASES`] for manual browsing.
#[must_use]
pub fn databases_listing() -> String {
    let rule = "-".repeat(70);
    let entries: String = PROMPT_DATABASES
        .iter()
        .map(|(name, url)| format!("\n{name}\n  URL: {url}\n  Method: manual browsing\n"))
        .collect();
    format!(
        "PUBLIC MIDJOURNEY PROMPT RESOURCES\n{rule}\n{entries}\n\
         Filter each site by trending or popular, copy prompts and image\n\
         URLs, and save them using the JSON layout from the manual guide.\n"
    )
}

/// Setting up a Discord bot that records Midjourney generations.
#[must_use]
pub fn discord_guide() -> String {
    let rule = "-".repeat(70);
    format!(
        "MIDJOURNEY DISCORD MONITORING\n{rule}\n\n\
         Midjourney runs through Discord; every generation message carries its\n\
         prompt in bold followed by the requesting user.\n\n\
         STEP 1: Create a bot\n{rule}\n\
         1. Open https://discord.com/developers/applications\n\
         2. Create an application and add a bot\n\
         3. Enable the Message Content intent and copy the token\n\n\
         STEP 2: Listen for Midjourney bot messages\n{rule}\n\
         Only handle messages from the Midjourney bot (user id 936929561302675456)\n\
         that have an attachment. The message format is:\n\n\
         \x20   **<prompt> --v 6 --ar 16:9** - <@user_id> (fast)\n\n\
         The bold span is the full command; split it at the first --flag to get\n\
         the base prompt and its parameters. Record the first attachment URL,\n\
         message id, channel id, and timestamp alongside it.\n\n\
         STEP 3: Invite the bot\n{rule}\n\
         Generate an OAuth2 URL with the bot scope and the View Channels\n\
         permission. The bot cannot join the official Midjourney server, so use\n\
         servers where Midjourney is invited and you have permission.\n\n\
         PARAMETERS\n{rule}\n\
         --v 6          model version 6\n\
         --niji 5       Niji model version 5\n\
         --ar 16:9      aspect ratio\n\
         --chaos 50     variation level (0-100)\n\
         --stylize 100  style strength (0-1000)\n\
         --quality 2    image quality (.25, .5, 1, 2)\n\
         --seed 12345   reproducible results\n\
         --tile         seamless patterns\n\
         --style raw    less opinionated generations\n\n\
         ETIQUETTE\n{rule}\n\
         Respect the Discord terms of service, never auto-post, and credit\n\
         prompt authors when sharing.\n"
    )
}

/// Collecting viral images and prompts by hand.
#[must_use]
pub fn manual_guide() -> String {
    let rule = "-".repeat(70);
    format!(
        "MIDJOURNEY MANUAL COLLECTION GUIDE\n{rule}\n\n\
         SOURCES\n{rule}\n\
         1. Showcase: https://www.midjourney.com/showcase\n\
         2. Community feed: https://www.midjourney.com/app/feed/ (sort by Hot)\n\
         3. Discord: discord.gg/midjourney public showcase channels\n\
         4. Creator profiles: https://www.midjourney.com/app/users/<username>/\n\n\
         STEPS\n{rule}\n\
         1. Open a trending image and copy the full command, parameters included\n\
         2. Copy the image address (usually cdn.midjourney.com/...)\n\
         3. Note likes, creator, creation date, and upscale or variation info\n\
         4. Save as ai_reels_data/midjourney_manual_YYYYMMDD.json\n\n\
         RECORD LAYOUT\n{rule}\n\
         [\n  {{\n    \"platform\": \"Midjourney\",\n    \
         \"id\": \"https://cdn.midjourney.com/...\",\n    \
         \"url\": \"https://cdn.midjourney.com/...\",\n    \
         \"extracted_prompt\": \"cinematic portrait of a cyberpunk warrior in neon city\",\n    \
         \"engagement\": {{ \"views\": 0, \"likes\": 250, \"comments\": 0, \"shares\": 0 }},\n    \
         \"details\": {{\n      \
         \"full_prompt\": \"cinematic portrait of a cyberpunk warrior in neon city --v 6 --ar 16:9 --chaos 30\",\n      \
         \"model_version\": \"v6\",\n      \
         \"parameters\": {{ \"version\": \"6\", \"aspect_ratio\": \"16:9\", \"chaos\": 30 }}\n    \
         }}\n  }}\n]\n\n\
         WHAT TO LOOK FOR\n{rule}\n\
         100+ likes, a clear subject, and prompts whose style, lighting, and\n\
         camera keywords you can reuse. Batch 20 to 50 images per session.\n"
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn gallery_item_with_explicit_fields() {
        let image: GalleryImage = serde_json::from_value(json!({
            "id": "img-1",
            "url": "https://cdn.midjourney.com/img-1.png",
            "prompt": "a lighthouse in a teacup",
            "full_prompt": "a lighthouse in a teacup --v 6 --ar 3:2",
            "upscaled": true,
            "likes": 87,
            "model_version": "v6",
            "parameters": {"aspect_ratio": "3:2"},
            "user_id": "u9"
        }))
        .unwrap();
        let post = gallery_image_to_post(image).unwrap();
        assert_eq!(post.id, "img-1");
        assert_eq!(post.extracted_prompt.as_deref(), Some("a lighthouse in a teacup"));
        assert_eq!(post.engagement.likes, 87);
        assert_eq!(post.author.as_deref(), Some("u9"));
        assert_eq!(post.details["parameters"], json!({"aspect_ratio": "3:2"}));
        assert_eq!(post.details["upscaled"], json!(true));
        assert_eq!(post.details["source"], json!("third_party_api"));
    }

    #[test]
    fn gallery_item_parameters_parsed_from_full_prompt() {
        let image = GalleryImage {
            url: Some("https://cdn.midjourney.com/x.png".to_string()),
            full_prompt: Some("koi pond at dusk --niji 5 --s 250".to_string()),
            ..GalleryImage::default()
        };
        let post = gallery_image_to_post(image).unwrap();
        assert_eq!(post.id, "https://cdn.midjourney.com/x.png");
        assert_eq!(post.extracted_prompt.as_deref(), Some("koi pond at dusk"));
        assert_eq!(post.details["model_version"], json!("niji 5"));
        assert_eq!(post.details["parameters"]["stylize"], json!(250));
    }

    #[test]
    fn gallery_item_without_id_or_url_is_dropped() {
        let image = GalleryImage {
            prompt: Some("orphan".to_string()),
            ..GalleryImage::default()
        };
        assert!(gallery_image_to_post(image).is_none());
    }

    #[test]
    fn feed_image_keyed_by_url() {
        let post = feed_image_to_post(FeedImage {
            image_url: "https://cdn.midjourney.com/a.webp".to_string(),
            prompt: "paper cranes --ar 9:16".to_string(),
        });
        assert_eq!(post.id, post.url);
        assert_eq!(post.extracted_prompt.as_deref(), Some("paper cranes --ar 9:16"));
        assert_eq!(post.details["parameters"]["aspect_ratio"], json!("9:16"));
        assert_eq!(post.details["source"], json!("community_feed"));
    }

    #[test]
    fn listings_name_every_database() {
        let listing = databases_listing();
        for (name, url) in PROMPT_DATABASES {
            assert!(listing.contains(name));
            assert!(listing.contains(url));
        }
        assert!(listing.starts_with("PUBLIC MIDJOURNEY PROMPT RESOURCES\n"));
        assert!(listing.contains("\nPromptBase\n  URL: https://promptbase.com/"));
    }

    #[test]
    fn guides_mention_their_key_steps() {
        assert!(discord_guide().contains("936929561302675456"));
        assert!(manual_guide().contains("midjourney_manual_YYYYMMDD.json"));
    }
}
