//! Domain layer - Core types, traits and the routing agent

pub mod agent;
pub mod answer;
pub mod embedding;
pub mod error;
pub mod ingestion;
pub mod knowledge_base;
pub mod llm;
pub mod prompt;
pub mod weather;

pub use agent::{AgentResult, QueryAgent, RoutingDecision, ToolResults};
pub use error::DomainError;
pub use llm::{FinishReason, LlmProvider, LlmRequest, LlmResponse, Message, MessageRole, Usage};
