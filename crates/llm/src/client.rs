use std::time::Duration;

use tabclust_core::ApiKey;

use crate::ai_types::{CompletionRequest, CompletionResponse};
use crate::error::LlmError;

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: usize = 3;
/// Backoff multipliers applied to the delay unit, indexed by attempt.
const RETRY_BACKOFF: [u32; 4] = [0, 1, 2, 4];

/// Client for an OpenAI-compatible `/v1/completions` endpoint.
#[derive(Clone)]
pub struct LlmClient {
    client: reqwest::Client,
    api_key: ApiKey,
    base_url: String,
    max_retries: usize,
    retry_delay_unit: Duration,
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient")
            .field("client", &self.client)
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl LlmClient {
    /// Creates a new LLM client reading the key from `api_key` on every request.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(api_key: ApiKey, base_url: &str) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(LlmError::ClientInit)?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_owned(),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_unit: Duration::from_secs(1),
        })
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Scales the backoff schedule (0, 1, 2, 4 units).
    #[must_use]
    pub fn with_retry_delay_unit(mut self, unit: Duration) -> Self {
        self.retry_delay_unit = unit;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a completion request and return the first choice's text.
    ///
    /// # Errors
    /// Returns an error if no key is configured, the HTTP request fails, the
    /// API returns a non-success status, the body cannot be parsed, or the
    /// choices array is empty. Transient failures are retried first.
    pub async fn completion(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let api_key = self.api_key.get().ok_or(LlmError::MissingApiKey)?;
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let factor = RETRY_BACKOFF.get(attempt).copied().unwrap_or(4);
                let delay = self.retry_delay_unit.saturating_mul(factor);
                tokio::time::sleep(delay).await;
                tracing::warn!("LLM retry attempt {attempt}/{} after {delay:?}", self.max_retries);
            }

            let response_result = self
                .client
                .post(format!("{}/v1/completions", self.base_url))
                .bearer_auth(&api_key)
                .json(request)
                .send()
                .await;

            let response = match response_result {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Transport(e));
                    continue;
                },
            };

            let status = response.status();
            if status.is_success() {
                let body = match response.text().await {
                    Ok(b) => b,
                    Err(e) => {
                        last_error = Some(LlmError::Transport(e));
                        continue;
                    },
                };

                let parsed: CompletionResponse =
                    serde_json::from_str(&body).map_err(|source| LlmError::Malformed {
                        body: truncate(&body, 200).to_owned(),
                        source,
                    })?;

                let first_choice = parsed.choices.into_iter().next().ok_or(LlmError::NoChoices)?;
                return Ok(first_choice.text);
            }

            let body =
                response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
            let err = LlmError::Status { code: status.as_u16(), body };
            if err.is_transient() {
                last_error = Some(err);
                continue;
            }
            return Err(err);
        }

        Err(LlmError::RetriesExhausted {
            attempts: self.max_retries.saturating_add(1),
            last: Box::new(last_error.unwrap_or(LlmError::NoChoices)),
        })
    }
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
