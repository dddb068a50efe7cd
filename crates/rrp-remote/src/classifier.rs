//! Category classification through an OpenAI-compatible chat completions API.

use std::fmt::Write as _;
use std::time::Duration;

use reqwest::Client;
use rrp_core::{AppConfig, CategoryClassifier, CategoryError};
use serde::{Deserialize, Serialize};

use crate::error::RemoteError;
use crate::retry::retry_with_backoff;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const MAX_TOKENS: u32 = 60;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Asks a chat model to pick exactly one category from a list.
///
/// The reply is returned as-is; callers validate it against the candidates.
pub struct OpenAiClassifier {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    marketplace: Option<String>,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl OpenAiClassifier {
    /// Creates a classifier pointed at the public OpenAI API.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, RemoteError> {
        Self::with_base_url(api_key, DEFAULT_MODEL, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a classifier with a custom base URL (for testing with wiremock
    /// or for compatible gateways).
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Http`] if the client cannot be built, or
    /// [`RemoteError::InvalidUrl`] if `base_url` is not an http(s) URL.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, RemoteError> {
        let trimmed = base_url.trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(RemoteError::InvalidUrl {
                url: base_url.to_string(),
                reason: "expected an http(s) URL".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("rrp/0.1 (category-classifier)")
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint: format!("{trimmed}/chat/completions"),
            model: model.to_owned(),
            marketplace: None,
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Builds a classifier from configuration. Returns `None` when no API key
    /// is configured.
    ///
    /// # Errors
    ///
    /// Propagates construction errors from [`OpenAiClassifier::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, RemoteError> {
        let Some(api_key) = config
            .classifier_api_key
            .as_deref()
            .filter(|_| config.classifier_enabled())
        else {
            return Ok(None);
        };

        let classifier = Self::with_base_url(
            api_key,
            &config.classifier_model,
            config.classifier_timeout_secs,
            &config.classifier_base_url,
        )?
        .with_retry(
            config.classifier_max_retries,
            config.classifier_retry_backoff_base_ms,
        );
        Ok(Some(classifier))
    }

    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Names the marketplace in the system prompt.
    #[must_use]
    pub fn with_marketplace(mut self, marketplace: &str) -> Self {
        self.marketplace = Some(marketplace.to_owned());
        self
    }

    fn messages(&self, name: &str, candidates: &[String]) -> Vec<ChatMessage> {
        let marketplace = self.marketplace.as_deref().unwrap_or("маркетплейса");
        let mut list = String::new();
        for candidate in candidates {
            let _ = writeln!(list, "- {candidate}");
        }
        vec![
            ChatMessage {
                role: "system".to_string(),
                content: format!(
                    "Ты классификатор товаров для маркетплейса {marketplace}. \
                     Выбери ОДНУ категорию из списка. Ответь ТОЛЬКО её названием."
                ),
            },
            ChatMessage {
                role: "user".to_string(),
                content: format!("Товар: {name}\nКатегории:\n{list}"),
            },
        ]
    }

    async fn request(&self, name: &str, candidates: &[String]) -> Result<String, RemoteError> {
        let body = ChatRequest {
            model: &self.model,
            messages: self.messages(name, candidates),
            max_tokens: MAX_TOKENS,
            temperature: 0.0,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        let text = response.text().await?;

        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| RemoteError::Deserialize {
                context: "chat completion".to_string(),
                source: e,
            })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(RemoteError::EmptyReply)
    }

    /// Classify with retries, returning the raw remote error on failure.
    ///
    /// # Errors
    ///
    /// Returns the last [`RemoteError`] once retries are exhausted.
    pub async fn classify_raw(
        &self,
        name: &str,
        candidates: &[String],
    ) -> Result<String, RemoteError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.request(name, candidates)
        })
        .await
    }
}

impl CategoryClassifier for OpenAiClassifier {
    async fn classify(&self, name: &str, candidates: &[String]) -> Result<String, CategoryError> {
        self.classify_raw(name, candidates)
            .await
            .map_err(|e| CategoryError::Classifier(e.to_string()))
    }
}
