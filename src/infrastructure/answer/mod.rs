//! Answer generation backed by a chat model

mod llm_generator;

pub use llm_generator::{LlmAnswerGenerator, DEFAULT_ANSWER_TEMPERATURE};
