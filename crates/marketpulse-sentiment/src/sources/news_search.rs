//! SerpAPI Google News search adapter.

use marketpulse_core::AppConfig;
use reqwest::{Client, Url};
use serde::Deserialize;

use super::MAX_RESULTS;
use crate::error::SentimentError;
use crate::http::{build_client, join_url, snippet};
use crate::types::NewsQuery;

const PROVIDER: &str = "SerpAPI";

/// SerpAPI answers an empty search with HTTP 200 and this text in `error`.
const NO_RESULTS_MARKER: &str = "hasn't returned any results";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    news_results: Vec<NewsResult>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsResult {
    title: Option<String>,
}

/// Client for the SerpAPI `search.json` endpoint in news mode.
pub struct SerpApiClient {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl SerpApiClient {
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the HTTP client cannot be built or
    /// [`SentimentError::InvalidUrl`] if the base URL is malformed.
    pub fn new(config: &AppConfig) -> Result<Self, SentimentError> {
        let client = build_client(config.request_timeout_secs, &config.user_agent)?;
        Self::with_client(client, &config.serpapi_api_key, &config.serpapi_base_url)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`SerpApiClient::new`].
    pub fn with_base_url(
        api_key: &str,
        base_url: &str,
        timeout_secs: u64,
    ) -> Result<Self, SentimentError> {
        let client = build_client(timeout_secs, "marketpulse-test/0.1")?;
        Self::with_client(client, api_key, base_url)
    }

    fn with_client(client: Client, api_key: &str, base_url: &str) -> Result<Self, SentimentError> {
        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint: join_url(base_url, "search.json")?,
        })
    }

    /// Search news for the query triple and return up to five headline titles.
    ///
    /// Results without a title, or with a blank one, are dropped.
    ///
    /// # Errors
    ///
    /// - [`SentimentError::Http`] on network failure or timeout.
    /// - [`SentimentError::Api`] on a non-2xx status or an `error` field in
    ///   the body, except SerpAPI's "no results" message, which is `Ok` and
    ///   empty.
    /// - [`SentimentError::Deserialize`] if the body is not the expected JSON.
    pub async fn search_headlines(&self, query: &NewsQuery) -> Result<Vec<String>, SentimentError> {
        let url = self.build_url(&query.query_string());
        tracing::debug!(query = %query.query_string(), "searching news");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let parsed: Result<SearchResponse, _> = serde_json::from_str(&body);
        if let Ok(SearchResponse {
            error: Some(message),
            ..
        }) = &parsed
        {
            if is_no_results(message) {
                tracing::debug!(message = %message, "news search returned no results");
                return Ok(Vec::new());
            }
            return Err(SentimentError::Api {
                provider: PROVIDER,
                message: message.clone(),
            });
        }
        if !status.is_success() {
            return Err(SentimentError::Api {
                provider: PROVIDER,
                message: format!("status {status}: {}", snippet(&body)),
            });
        }

        let parsed = parsed.map_err(|e| SentimentError::Deserialize {
            context: "news search".to_string(),
            source: e,
        })?;

        Ok(parsed
            .news_results
            .into_iter()
            .filter_map(|r| r.title)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .take(MAX_RESULTS)
            .collect())
    }

    fn build_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("engine", "google")
            .append_pair("q", query)
            .append_pair("tbm", "nws")
            .append_pair("num", &MAX_RESULTS.to_string())
            .append_pair("api_key", &self.api_key);
        url
    }
}

fn is_no_results(message: &str) -> bool {
    message.to_ascii_lowercase().contains(NO_RESULTS_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> SerpApiClient {
        SerpApiClient::with_base_url("test-key", base_url, 30)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_constructs_news_query() {
        let client = test_client("https://serpapi.com");
        let url = client.build_url("Apple US");
        assert_eq!(
            url.as_str(),
            "https://serpapi.com/search.json?engine=google&q=Apple+US&tbm=nws&num=5&api_key=test-key"
        );
    }

    #[test]
    fn build_url_encodes_special_characters() {
        let client = test_client("https://serpapi.com/");
        let url = client.build_url("Should I buy Apple stock?");
        assert!(
            url.as_str().contains("q=Should+I+buy+Apple+stock%3F"),
            "query should be percent-encoded: {url}"
        );
    }

    #[test]
    fn no_results_message_is_recognized() {
        assert!(is_no_results(
            "Google hasn't returned any results for this query."
        ));
        assert!(!is_no_results("Invalid API key."));
        assert!(!is_no_results("Your account has run out of searches."));
    }
}
