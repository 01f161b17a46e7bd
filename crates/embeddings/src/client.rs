use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tabclust_core::constants::{DEFAULT_EMBEDDING_MODEL, DEFAULT_MAX_WORDS};
use tabclust_core::{ApiKey, Embedding};

use crate::{EmbeddingError, EmbeddingProvider, truncate_words};

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a str,
    model: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Client for an OpenAI-compatible embeddings endpoint.
#[derive(Debug, Clone)]
pub struct EmbeddingClient {
    client: reqwest::Client,
    api_key: ApiKey,
    base_url: String,
    model: String,
    max_words: usize,
}

impl EmbeddingClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(api_key: ApiKey, base_url: &str) -> Result<Self, EmbeddingError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| EmbeddingError::ClientInit(e.to_string()))?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_owned(),
            model: DEFAULT_EMBEDDING_MODEL.to_owned(),
            max_words: DEFAULT_MAX_WORDS,
        })
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Input longer than `max_words` words is cut before sending.
    #[must_use]
    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words.max(1);
        self
    }
}

#[async_trait]
impl EmbeddingProvider for EmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let input = truncate_words(text, self.max_words);
        if input.is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }
        let api_key = self.api_key.get().ok_or(EmbeddingError::MissingApiKey)?;

        let response = self
            .client
            .post(format!("{}/v1/embeddings", self.base_url))
            .bearer_auth(api_key)
            .json(&EmbeddingRequest { input: &input, model: &self.model })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body =
                response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
            return Err(EmbeddingError::HttpStatus { code: status.as_u16(), body });
        }

        let body = response.text().await?;
        let parsed: EmbeddingResponse = serde_json::from_str(&body)
            .map_err(|e| EmbeddingError::MalformedResponse(e.to_string()))?;
        let embedding = parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| EmbeddingError::MalformedResponse("empty data array".to_owned()))?;
        if embedding.is_empty() {
            return Err(EmbeddingError::MalformedResponse("empty embedding vector".to_owned()));
        }

        tracing::debug!(dimension = embedding.len(), model = %self.model, "embedding generated");
        Ok(embedding)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> EmbeddingClient {
        EmbeddingClient::new(ApiKey::new(Some("test-key".to_owned())), &server.uri()).unwrap()
    }

    #[tokio::test]
    async fn test_embed_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_partial_json(json!({ "input": "Rust book", "model": "text-embedding-3-small" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "embedding": [0.25, -0.5, 1.0] }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let embedding = client_for(&server).embed("Rust book").await.unwrap();
        assert_eq!(embedding, vec![0.25, -0.5, 1.0]);
    }

    #[tokio::test]
    async fn test_embed_truncates_input_words() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .and(body_partial_json(json!({ "input": "one two" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "embedding": [1.0] }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).with_max_words(2);
        assert!(client.embed("one two three").await.is_ok());
    }

    #[tokio::test]
    async fn test_embed_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client_for(&server).embed("hello").await.unwrap_err();
        assert!(matches!(err, EmbeddingError::HttpStatus { code: 500, .. }));
    }

    #[tokio::test]
    async fn test_embed_malformed_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .mount(&server)
            .await;

        let err = client_for(&server).embed("hello").await.unwrap_err();
        assert!(matches!(err, EmbeddingError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_embed_rejects_blank_input_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server).embed("  \n ").await.unwrap_err();
        assert!(matches!(err, EmbeddingError::EmptyInput));
    }

    #[tokio::test]
    async fn test_embed_without_api_key() {
        let server = MockServer::start().await;
        let client = EmbeddingClient::new(ApiKey::default(), &server.uri()).unwrap();
        let err = client.embed("hello").await.unwrap_err();
        assert!(matches!(err, EmbeddingError::MissingApiKey));
    }
}
