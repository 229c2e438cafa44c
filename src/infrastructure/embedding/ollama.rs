//! Ollama embedding provider implementation

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::embedding::{Embedding, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse};
use crate::domain::DomainError;
use crate::infrastructure::llm::HttpClientTrait;

pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Known local embedding models and their dimensions
const EMBEDDING_MODELS: &[(&str, usize)] = &[
    ("all-minilm", 384),
    ("all-minilm:latest", 384),
    ("nomic-embed-text", 768),
    ("mxbai-embed-large", 1024),
];

/// Embeddings from a local Ollama server via `POST /api/embed`
#[derive(Debug)]
pub struct OllamaEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    base_url: String,
}

impl<C: HttpClientTrait> OllamaEmbeddingProvider<C> {
    pub fn new(client: C) -> Self {
        Self::with_base_url(client, DEFAULT_OLLAMA_BASE_URL)
    }

    pub fn with_base_url(client: C, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn embed_url(&self) -> String {
        format!("{}/api/embed", self.base_url)
    }

    fn build_request(&self, request: &EmbeddingRequest) -> serde_json::Value {
        serde_json::json!({
            "model": request.model(),
            "input": request.inputs(),
        })
    }

    fn parse_response(
        &self,
        request: &EmbeddingRequest,
        json: serde_json::Value,
    ) -> Result<EmbeddingResponse, DomainError> {
        let response: OllamaEmbedResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("ollama", format!("Failed to parse embedding response: {}", e))
        })?;

        if response.embeddings.len() != request.len() {
            return Err(DomainError::provider(
                "ollama",
                format!(
                    "Expected {} embeddings, got {}",
                    request.len(),
                    response.embeddings.len()
                ),
            ));
        }

        let embeddings = response
            .embeddings
            .into_iter()
            .enumerate()
            .map(|(index, vector)| Embedding::new(index, vector))
            .collect();

        let model = response.model.unwrap_or_else(|| request.model().to_string());
        Ok(EmbeddingResponse::new(model, embeddings))
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for OllamaEmbeddingProvider<C> {
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
        if request.is_empty() {
            return Ok(EmbeddingResponse::new(request.model().to_string(), Vec::new()));
        }

        let url = self.embed_url();
        let body = self.build_request(&request);

        let response = self
            .client
            .post_json(&url, vec![("Content-Type", "application/json")], &body)
            .await?;

        self.parse_response(&request, response)
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }

    fn dimensions(&self, model: &str) -> Option<usize> {
        EMBEDDING_MODELS
            .iter()
            .find(|(name, _)| *name == model)
            .map(|(_, dims)| *dims)
    }
}

#[derive(Debug, Deserialize)]
struct OllamaEmbedResponse {
    model: Option<String>,
    embeddings: Vec<Vec<f32>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::llm::MockHttpClient;

    const TEST_URL: &str = "http://localhost:11434/api/embed";

    #[tokio::test]
    async fn test_embed_batch() {
        let client = MockHttpClient::new().with_response(
            TEST_URL,
            serde_json::json!({
                "model": "all-minilm",
                "embeddings": [[0.1, 0.2, 0.3], [0.4, 0.5, 0.6]]
            }),
        );
        let provider = OllamaEmbeddingProvider::new(client);

        let request = EmbeddingRequest::batch("all-minilm", vec!["a".into(), "b".into()]);
        let response = provider.embed(request).await.unwrap();

        assert_eq!(response.model(), "all-minilm");
        let vectors = response.into_vectors();
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[1], vec![0.4, 0.5, 0.6]);

        let sent = &provider.client.requests()[0].1;
        assert_eq!(sent["model"], "all-minilm");
        assert_eq!(sent["input"], serde_json::json!(["a", "b"]));
    }

    #[tokio::test]
    async fn test_count_mismatch_is_an_error() {
        let client = MockHttpClient::new()
            .with_response(TEST_URL, serde_json::json!({ "embeddings": [[0.1]] }));
        let provider = OllamaEmbeddingProvider::new(client);

        let request = EmbeddingRequest::batch("all-minilm", vec!["a".into(), "b".into()]);
        let error = provider.embed(request).await.unwrap_err();

        assert!(error.to_string().contains("Expected 2 embeddings, got 1"));
    }

    #[tokio::test]
    async fn test_empty_request_skips_the_network() {
        let provider = OllamaEmbeddingProvider::new(MockHttpClient::new());

        let response = provider
            .embed(EmbeddingRequest::batch("all-minilm", Vec::new()))
            .await
            .unwrap();

        assert!(response.embeddings().is_empty());
        assert!(provider.client.requests().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let client = MockHttpClient::new().with_error(TEST_URL, "connection refused");
        let provider = OllamaEmbeddingProvider::new(client);

        let result = provider.embed(EmbeddingRequest::single("all-minilm", "hi")).await;
        assert!(matches!(result, Err(DomainError::Provider { .. })));
    }

    #[test]
    fn test_known_dimensions() {
        let provider = OllamaEmbeddingProvider::new(MockHttpClient::new());
        assert_eq!(provider.dimensions("all-minilm"), Some(384));
        assert_eq!(provider.dimensions("unknown"), None);
    }
}
