//! Weather + document RAG agent
//!
//! Each query is routed by keyword either to a live weather lookup or to
//! retrieval-augmented answering over a single document:
//! - Weather via wttr.in
//! - Embeddings via a local Ollama server
//! - Answers via an OpenAI-compatible chat model (Groq)

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use domain::{DomainError, QueryAgent};
use infrastructure::{
    answer::LlmAnswerGenerator,
    embedding::OllamaEmbeddingProvider,
    knowledge_base::DocumentKnowledgeBase,
    llm::{HttpClient, OpenAiProvider},
    weather::WttrWeatherProvider,
};
use tracing::info;

/// Validate the configuration and build the agent, indexing the document
///
/// This is the only initialisation entry point; the returned agent is
/// read-only and meant to be shared behind an `Arc`.
pub async fn build_agent(config: &AppConfig) -> Result<QueryAgent, DomainError> {
    config.validate()?;

    let weather = WttrWeatherProvider::new(
        &config.weather.base_url,
        &config.weather.user_agent,
        config.weather.timeout(),
    )?;

    let embedder = OllamaEmbeddingProvider::with_base_url(
        HttpClient::with_timeout(Duration::from_secs(config.embedding.timeout_secs))?,
        &config.embedding.base_url,
    );

    info!(
        document = %config.knowledge_base.document_path.display(),
        "Building knowledge base"
    );
    let knowledge_base = DocumentKnowledgeBase::build(
        &config.knowledge_base.document_path,
        config.build_options(),
        Arc::new(embedder),
    )
    .await?;

    let llm = OpenAiProvider::with_base_url(
        HttpClient::with_timeout(Duration::from_secs(config.llm.timeout_secs))?,
        &config.llm.api_key,
        &config.llm.base_url,
    );
    let generator = LlmAnswerGenerator::new(Arc::new(llm), &config.llm.model)
        .with_temperature(config.llm.temperature);

    Ok(QueryAgent::new(
        Arc::new(weather),
        Arc::new(knowledge_base),
        Arc::new(generator),
    )
    .with_top_k(config.knowledge_base.top_k))
}

/// Load configuration from files and environment, after reading `.env`
pub fn load_config() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();
    Ok(AppConfig::load()?)
}
