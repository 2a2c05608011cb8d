//! Shared HTTP plumbing for the platform clients.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::error::CollectorError;

pub(crate) fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, CollectorError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Parse `base_url` so that relative joins append to its path instead of
/// replacing the last segment.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, CollectorError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| CollectorError::InvalidBaseUrl {
        base_url: base_url.to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn join(base: &Url, path: &str) -> Result<Url, CollectorError> {
    base.join(path).map_err(|e| CollectorError::InvalidBaseUrl {
        base_url: base.to_string(),
        reason: format!("cannot join \"{path}\": {e}"),
    })
}

/// Strip the query so API keys passed as parameters never reach logs.
/// Transport errors drop their URL entirely via [`reqwest::Error::without_url`].
pub(crate) fn redact(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}

/// Send `request`, require a 2xx status, and decode the body as `T`.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    context: &str,
) -> Result<T, CollectorError> {
    let response = request.send().await.map_err(reqwest::Error::without_url)?;
    let status = response.status();
    if !status.is_success() {
        return Err(CollectorError::UnexpectedStatus {
            status: status.as_u16(),
            url: redact(response.url()),
        });
    }

    let body = response.text().await.map_err(reqwest::Error::without_url)?;
    serde_json::from_str(&body).map_err(|e| CollectorError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}

/// Send `request`, require a 2xx status, and return the body as text.
pub(crate) async fn send_text(request: RequestBuilder) -> Result<String, CollectorError> {
    let response = request.send().await.map_err(reqwest::Error::without_url)?;
    let status = response.status();
    if !status.is_success() {
        return Err(CollectorError::UnexpectedStatus {
            status: status.as_u16(),
            url: redact(response.url()),
        });
    }
    Ok(response.text().await.map_err(reqwest::Error::without_url)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_single_trailing_slash() {
        let base = parse_base_url("https://www.googleapis.com/youtube/v3//").unwrap();
        assert_eq!(base.as_str(), "https://www.googleapis.com/youtube/v3/");
        let url = join(&base, "search").unwrap();
        assert_eq!(url.as_str(), "https://www.googleapis.com/youtube/v3/search");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            parse_base_url("not a url"),
            Err(CollectorError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn redact_drops_query() {
        let url = Url::parse("https://api.example.com/videos?key=secret&id=1").unwrap();
        assert_eq!(redact(&url), "https://api.example.com/videos");
    }
}
