//! Retrieval trait used by the document-QA branch

use std::fmt::Debug;

use async_trait::async_trait;

use super::RetrievedPassage;
use crate::domain::DomainError;

/// Number of passages handed to the answer generator by default
pub const DEFAULT_TOP_K: usize = 3;

/// Search parameters for knowledge base queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Query text to search for
    pub query: String,
    /// Number of results to return
    pub top_k: usize,
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}

/// Similarity search over a fixed corpus
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PassageRetriever: Send + Sync + Debug {
    /// Return up to `top_k` passages, most similar first
    async fn search(&self, params: SearchParams) -> Result<Vec<RetrievedPassage>, DomainError>;

    /// Number of passages in the corpus
    fn passage_count(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_params_defaults() {
        let params = SearchParams::new("Tell me about the company");

        assert_eq!(params.top_k, 3);
        assert_eq!(params.with_top_k(5).top_k, 5);
    }
}
