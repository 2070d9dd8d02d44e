//! Shared HTTP client construction for the provider adapters.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::SentimentError;

/// Build a client with the run's request timeout and user agent.
///
/// # Errors
///
/// Returns [`SentimentError::Http`] if the client cannot be constructed.
pub(crate) fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, SentimentError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Join `path` onto `base`, tolerating a trailing slash on `base`.
///
/// # Errors
///
/// Returns [`SentimentError::InvalidUrl`] if the result does not parse.
pub(crate) fn join_url(base: &str, path: &str) -> Result<Url, SentimentError> {
    let raw = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&raw).map_err(|e| SentimentError::InvalidUrl {
        url: raw.clone(),
        reason: e.to_string(),
    })
}

/// First 200 characters of a response body, for error messages.
pub(crate) fn snippet(body: &str) -> String {
    body.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_strips_duplicate_slashes() {
        let url = join_url("https://serpapi.com/", "/search.json").unwrap();
        assert_eq!(url.as_str(), "https://serpapi.com/search.json");
    }

    #[test]
    fn join_url_keeps_base_path() {
        let url = join_url("http://localhost:1234/v1", "chat/completions").unwrap();
        assert_eq!(url.as_str(), "http://localhost:1234/v1/chat/completions");
    }

    #[test]
    fn join_url_rejects_garbage() {
        let err = join_url("not a url", "x").unwrap_err();
        assert!(matches!(err, SentimentError::InvalidUrl { .. }));
    }

    #[test]
    fn snippet_truncates_long_bodies() {
        let body = "x".repeat(500);
        assert_eq!(snippet(&body).len(), 200);
        assert_eq!(snippet("short"), "short");
    }
}
