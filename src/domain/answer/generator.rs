use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::knowledge_base::RetrievedPassage;
use crate::domain::DomainError;

/// A generated answer together with the passages it was conditioned on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResult {
    pub answer: String,
    pub supporting_passages: Vec<RetrievedPassage>,
}

impl AnswerResult {
    pub fn new(answer: impl Into<String>, supporting_passages: Vec<RetrievedPassage>) -> Self {
        Self {
            answer: answer.into(),
            supporting_passages,
        }
    }
}

/// Produces an answer to a question from retrieved context
///
/// Model failures are returned as errors; no fallback answer is invented.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerGenerator: Send + Sync + Debug {
    async fn answer(
        &self,
        query: &str,
        passages: Vec<RetrievedPassage>,
    ) -> Result<AnswerResult, DomainError>;
}
