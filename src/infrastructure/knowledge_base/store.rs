//! Retriever over a single document, built once at startup

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use super::InMemoryVectorIndex;
use crate::domain::embedding::{EmbeddingProvider, EmbeddingRequest};
use crate::domain::ingestion::{ChunkingConfig, ChunkingStrategy, ParserInput};
use crate::domain::knowledge_base::{Passage, PassageRetriever, RetrievedPassage, SearchParams};
use crate::domain::DomainError;
use crate::infrastructure::ingestion::{ParserFactory, RecursiveChunker};

pub const DEFAULT_EMBED_BATCH_SIZE: usize = 32;

/// Settings for [`DocumentKnowledgeBase::build`]
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub chunking: ChunkingConfig,
    pub embedding_model: String,
    pub dimensions: usize,
    pub batch_size: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            chunking: ChunkingConfig::default(),
            embedding_model: "all-minilm".to_string(),
            dimensions: 384,
            batch_size: DEFAULT_EMBED_BATCH_SIZE,
        }
    }
}

/// Passages of one document with their embeddings
#[derive(Debug)]
pub struct DocumentKnowledgeBase {
    index: InMemoryVectorIndex,
    embedder: Arc<dyn EmbeddingProvider>,
    embedding_model: String,
}

impl DocumentKnowledgeBase {
    /// Load, split and embed the document at `path`
    ///
    /// Fails when the file is missing, cannot be parsed, yields no text, or
    /// the embedding service rejects a batch.
    #[instrument(skip(path, options, embedder), fields(path = %path.display()))]
    pub async fn build(
        path: &Path,
        options: BuildOptions,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self, DomainError> {
        options.chunking.validate()?;
        if options.batch_size == 0 {
            return Err(DomainError::validation("batch_size must be greater than 0"));
        }

        match embedder.dimensions(&options.embedding_model) {
            Some(reported) if reported != options.dimensions => {
                return Err(DomainError::configuration(format!(
                    "Embedding model '{}' produces {}-dimension vectors, index expects {}",
                    options.embedding_model, reported, options.dimensions
                )));
            }
            Some(_) => {}
            None => debug!(
                model = %options.embedding_model,
                provider = embedder.provider_name(),
                "Embedding dimensions unknown, relying on index checks"
            ),
        }

        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(DomainError::not_found(format!(
                "Document '{}' not found",
                path.display()
            )));
        }

        let parser = ParserFactory::for_path(path)?;
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            DomainError::ingestion(format!("Failed to read '{}': {}", path.display(), e))
        })?;

        let source = path.display().to_string();
        let document = parser
            .parse(ParserInput::from_bytes(bytes).with_filename(source.clone()))
            .await?;
        info!(pages = document.page_count(), "Loaded document");

        let chunker = RecursiveChunker::new();
        let mut passages = Vec::new();
        for page in &document.pages {
            for chunk in chunker.chunk(&page.text, &options.chunking)? {
                let index = passages.len();
                passages.push(
                    Passage::new(chunk.content, source.clone(), page.number)
                        .with_offsets(chunk.metadata.char_start, chunk.metadata.char_end)
                        .with_chunk_index(index),
                );
            }
        }

        if passages.is_empty() {
            return Err(DomainError::ingestion(format!(
                "Document '{}' contains no extractable text",
                source
            )));
        }

        let mut index = InMemoryVectorIndex::new(options.dimensions);
        let total = passages.len();
        let mut remaining = passages.into_iter().peekable();

        while remaining.peek().is_some() {
            let batch: Vec<Passage> = remaining.by_ref().take(options.batch_size).collect();
            let texts = batch.iter().map(|p| p.text.clone()).collect();

            let vectors = embedder
                .embed(EmbeddingRequest::batch(options.embedding_model.clone(), texts))
                .await?
                .into_vectors();

            if vectors.len() != batch.len() {
                return Err(DomainError::provider(
                    embedder.provider_name(),
                    format!("Expected {} embeddings, got {}", batch.len(), vectors.len()),
                ));
            }

            for (passage, vector) in batch.into_iter().zip(vectors) {
                index.insert(passage, vector)?;
            }
            debug!(indexed = index.len(), total, "Embedded batch");
        }

        info!(
            passages = index.len(),
            model = %options.embedding_model,
            "Knowledge base ready"
        );

        Ok(Self {
            index,
            embedder,
            embedding_model: options.embedding_model,
        })
    }

    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }
}

#[async_trait]
impl PassageRetriever for DocumentKnowledgeBase {
    async fn search(&self, params: SearchParams) -> Result<Vec<RetrievedPassage>, DomainError> {
        let response = self
            .embedder
            .embed(EmbeddingRequest::single(
                self.embedding_model.clone(),
                params.query.clone(),
            ))
            .await?;

        let query_vector = response
            .into_vectors()
            .into_iter()
            .next()
            .ok_or_else(|| {
                DomainError::provider(self.embedder.provider_name(), "No embedding returned for query")
            })?;

        self.index.search(&query_vector, params.top_k)
    }

    fn passage_count(&self) -> usize {
        self.index.len()
    }
}
