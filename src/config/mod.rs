//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, EmbeddingConfig, KnowledgeBaseConfig, LlmConfig, LogFormat, LoggingConfig,
    ServerConfig, WeatherConfig,
};
