//! Infrastructure layer - External service implementations

pub mod answer;
pub mod embedding;
pub mod ingestion;
pub mod knowledge_base;
pub mod llm;
pub mod logging;
pub mod weather;
