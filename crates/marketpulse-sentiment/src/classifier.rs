//! Headline sentiment classification via an OpenAI-compatible chat endpoint.

use std::future::Future;

use marketpulse_core::AppConfig;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::SentimentError;
use crate::http::{build_client, join_url, snippet};
use crate::types::SentimentLabel;

const PROVIDER: &str = "OpenAI";

const SYSTEM_PROMPT: &str = "Analyze the sentiment of the given financial news headline. \
Reply with only one word: Positive, Negative, or Neutral.";

/// Something that can label one headline.
///
/// Implementations make exactly one provider call per headline.
pub trait HeadlineClassifier {
    fn classify(
        &self,
        headline: &str,
    ) -> impl Future<Output = Result<SentimentLabel, SentimentError>>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Classifier backed by `POST {base}/chat/completions`.
pub struct OpenAiClassifier {
    client: Client,
    api_key: String,
    model: String,
    endpoint: Url,
}

impl OpenAiClassifier {
    /// Build a classifier from the run configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the HTTP client cannot be built or
    /// [`SentimentError::InvalidUrl`] if the base URL is malformed.
    pub fn new(config: &AppConfig) -> Result<Self, SentimentError> {
        let client = build_client(config.request_timeout_secs, &config.user_agent)?;
        Self::with_client(
            client,
            &config.openai_api_key,
            &config.openai_model,
            &config.openai_base_url,
        )
    }

    /// Build a classifier against a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`OpenAiClassifier::new`].
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        base_url: &str,
        timeout_secs: u64,
    ) -> Result<Self, SentimentError> {
        let client = build_client(timeout_secs, "marketpulse-test/0.1")?;
        Self::with_client(client, api_key, model, base_url)
    }

    fn with_client(
        client: Client,
        api_key: &str,
        model: &str,
        base_url: &str,
    ) -> Result<Self, SentimentError> {
        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            endpoint: join_url(base_url, "chat/completions")?,
        })
    }

    async fn request_label(&self, headline: &str) -> Result<SentimentLabel, SentimentError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: headline,
                },
            ],
            temperature: 0.0,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SentimentError::Api {
                provider: PROVIDER,
                message: format!("status {status}: {}", snippet(&body)),
            });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| SentimentError::Deserialize {
                context: "chat completion".to_string(),
                source: e,
            })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| SentimentError::Api {
                provider: PROVIDER,
                message: "completion contained no message content".to_string(),
            })?;

        content.parse()
    }
}

impl HeadlineClassifier for OpenAiClassifier {
    async fn classify(&self, headline: &str) -> Result<SentimentLabel, SentimentError> {
        let label = self.request_label(headline).await?;
        tracing::debug!(headline, label = %label, "headline classified");
        Ok(label)
    }
}
