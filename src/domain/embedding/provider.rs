//! Embedding provider trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use super::{EmbeddingRequest, EmbeddingResponse};
use crate::domain::DomainError;

/// Trait for embedding providers (Ollama, hosted APIs, ...)
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Generate embeddings for the given input
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;

    /// Get the embedding dimensions for a model
    fn dimensions(&self, model: &str) -> Option<usize>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::embedding::Embedding;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Bag-of-words embedder: each lower-cased word is hashed onto one axis,
    /// so texts sharing words end up close in cosine space.
    #[derive(Debug)]
    pub struct MockEmbeddingProvider {
        name: &'static str,
        dimensions: usize,
        error: Option<String>,
        calls: AtomicUsize,
    }

    impl MockEmbeddingProvider {
        pub fn new(name: &'static str, dimensions: usize) -> Self {
            Self {
                name,
                dimensions,
                error: None,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn vectorize(&self, text: &str) -> Vec<f32> {
            let mut vector = vec![0.0; self.dimensions];

            for word in text.split(|c: char| !c.is_alphanumeric()) {
                if word.is_empty() {
                    continue;
                }

                let hash = word
                    .to_lowercase()
                    .bytes()
                    .fold(7u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
                vector[(hash % self.dimensions as u64) as usize] += 1.0;
            }

            vector
        }
    }

    #[async_trait]
    impl EmbeddingProvider for MockEmbeddingProvider {
        async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if let Some(ref error) = self.error {
                return Err(DomainError::provider(self.name, error));
            }

            let embeddings = request
                .inputs()
                .iter()
                .enumerate()
                .map(|(idx, text)| Embedding::new(idx, self.vectorize(text)))
                .collect();

            Ok(EmbeddingResponse::new(request.model().to_string(), embeddings))
        }

        fn provider_name(&self) -> &'static str {
            self.name
        }

        fn dimensions(&self, _model: &str) -> Option<usize> {
            Some(self.dimensions)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::domain::embedding::cosine_similarity;

        #[tokio::test]
        async fn test_mock_provider_batch_input() {
            let provider = MockEmbeddingProvider::new("test", 384);
            let request = EmbeddingRequest::batch("mock", vec!["Hello".into(), "World".into()]);

            let response = provider.embed(request).await.unwrap();

            assert_eq!(response.embeddings().len(), 2);
            assert_eq!(response.embeddings()[0].dimensions(), 384);
            assert_eq!(provider.calls(), 1);
        }

        #[tokio::test]
        async fn test_shared_words_are_closer() {
            let provider = MockEmbeddingProvider::new("test", 384);
            let request = EmbeddingRequest::batch(
                "mock",
                vec![
                    "healthcare software services".into(),
                    "software for healthcare".into(),
                    "mountain hiking trails".into(),
                ],
            );

            let vectors = provider.embed(request).await.unwrap().into_vectors();

            assert!(
                cosine_similarity(&vectors[0], &vectors[1])
                    > cosine_similarity(&vectors[0], &vectors[2])
            );
        }

        #[tokio::test]
        async fn test_mock_provider_error() {
            let provider = MockEmbeddingProvider::new("test", 384).with_error("model not pulled");
            let result = provider.embed(EmbeddingRequest::single("mock", "Hello")).await;

            assert!(result.is_err());
        }
    }
}
