//! Embedding provider implementations

mod ollama;

pub use ollama::{OllamaEmbeddingProvider, DEFAULT_OLLAMA_BASE_URL};
