use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::domain::answer::{AnswerGenerator, AnswerResult};
use crate::domain::knowledge_base::RetrievedPassage;
use crate::domain::prompt::PromptTemplate;
use crate::domain::{DomainError, LlmProvider, LlmRequest};

pub const DEFAULT_ANSWER_TEMPERATURE: f32 = 0.2;

/// Fills the document-QA prompt with retrieved context and asks the model
#[derive(Debug, Clone)]
pub struct LlmAnswerGenerator {
    llm: Arc<dyn LlmProvider>,
    model: String,
    temperature: f32,
    template: PromptTemplate,
}

impl LlmAnswerGenerator {
    pub fn new(llm: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
            temperature: DEFAULT_ANSWER_TEMPERATURE,
            template: PromptTemplate::document_qa(),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn render_prompt(&self, query: &str, passages: &[RetrievedPassage]) -> Result<String, DomainError> {
        let context = passages
            .iter()
            .map(RetrievedPassage::text)
            .collect::<Vec<_>>()
            .join("\n\n");

        let values = HashMap::from([("context", context), ("input", query.to_string())]);

        self.template
            .render(&values)
            .map_err(|e| DomainError::internal(format!("Failed to render prompt: {}", e)))
    }
}

#[async_trait]
impl AnswerGenerator for LlmAnswerGenerator {
    #[instrument(skip(self, passages), fields(model = %self.model, passages = passages.len()))]
    async fn answer(
        &self,
        query: &str,
        passages: Vec<RetrievedPassage>,
    ) -> Result<AnswerResult, DomainError> {
        let prompt = self.render_prompt(query, &passages)?;

        let request = LlmRequest::builder()
            .user(prompt)
            .temperature(self.temperature)
            .build();

        let response = self.llm.chat(&self.model, request).await?;
        let usage = response.usage.clone().unwrap_or_default();
        debug!(
            finish_reason = ?response.finish_reason,
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            total_tokens = usage.total_tokens,
            "Model answered"
        );

        Ok(AnswerResult::new(response.content(), passages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::knowledge_base::Passage;
    use crate::domain::llm::MockLlmProvider;
    use crate::domain::{LlmResponse, Message, MessageRole, Usage};

    fn passages() -> Vec<RetrievedPassage> {
        vec![
            RetrievedPassage::new(Passage::new("LogicLoom was founded in 2015.", "p.pdf", 1), 0.9),
            RetrievedPassage::new(Passage::new("It serves hospitals in India.", "p.pdf", 2), 0.7),
        ]
    }

    #[tokio::test]
    async fn test_prompt_contains_context_and_question() {
        let llm = Arc::new(MockLlmProvider::new("groq").with_response(LlmResponse::new(
            "id".to_string(),
            "llama".to_string(),
            Message::assistant("In 2015."),
        )));
        let generator = LlmAnswerGenerator::new(llm.clone(), "llama-3.1-8b-instant");

        let result = generator
            .answer("When was LogicLoom founded?", passages())
            .await
            .unwrap();

        assert_eq!(result.answer, "In 2015.");
        assert_eq!(result.supporting_passages, passages());

        let requests = llm.requests();
        assert_eq!(requests.len(), 1);
        let (model, request) = &requests[0];
        assert_eq!(model, "llama-3.1-8b-instant");
        assert_eq!(request.temperature, Some(0.2));
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, MessageRole::User);

        let prompt = request.messages[0].content_text();
        assert!(prompt.contains("Answer the question based only on the provided context."));
        assert!(prompt.contains(
            "Context: LogicLoom was founded in 2015.\n\nIt serves hospitals in India."
        ));
        assert!(prompt.contains("Question: When was LogicLoom founded?"));
        assert!(prompt.trim_end().ends_with("Answer:"));
    }

    #[tokio::test]
    async fn test_llm_failure_propagates() {
        let llm = Arc::new(MockLlmProvider::new("groq").with_error("rate limited"));
        let generator = LlmAnswerGenerator::new(llm, "llama-3.1-8b-instant");

        let result = generator.answer("Anything?", passages()).await;

        assert!(matches!(result, Err(DomainError::Provider { .. })));
    }

    #[tokio::test]
    async fn test_answer_with_token_usage() {
        let llm = Arc::new(MockLlmProvider::new("groq").with_response(
            LlmResponse::new("id".to_string(), "m".to_string(), Message::assistant("Pune."))
                .with_usage(Usage::new(412, 3)),
        ));
        let generator = LlmAnswerGenerator::new(llm, "m");

        let result = generator.answer("Where is the office?", passages()).await.unwrap();

        assert_eq!(result.answer, "Pune.");
    }

    #[tokio::test]
    async fn test_custom_temperature() {
        let llm = Arc::new(MockLlmProvider::new("groq").with_response(LlmResponse::new(
            "id".to_string(),
            "m".to_string(),
            Message::assistant("ok"),
        )));
        let generator = LlmAnswerGenerator::new(llm.clone(), "m").with_temperature(0.7);

        generator.answer("q", Vec::new()).await.unwrap();

        assert_eq!(llm.requests()[0].1.temperature, Some(0.7));
    }
}
