use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::ingestion::ChunkingConfig;
use crate::domain::DomainError;
use crate::infrastructure::embedding::DEFAULT_OLLAMA_BASE_URL;
use crate::infrastructure::knowledge_base::{BuildOptions, DEFAULT_EMBED_BATCH_SIZE};
use crate::infrastructure::llm::DEFAULT_GROQ_BASE_URL;
use crate::infrastructure::weather::{DEFAULT_USER_AGENT, DEFAULT_WTTR_BASE_URL};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub weather: WeatherConfig,
    pub embedding: EmbeddingConfig,
    pub llm: LlmConfig,
    pub knowledge_base: KnowledgeBaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Ollama server
    pub base_url: String,
    pub model: String,
    pub dimensions: usize,
    pub batch_size: usize,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// OpenAI-compatible endpoint; Groq by default
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KnowledgeBaseConfig {
    pub document_path: PathBuf,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_WTTR_BASE_URL.to_string(),
            timeout_secs: 15,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_BASE_URL.to_string(),
            model: "all-minilm".to_string(),
            dimensions: 384,
            batch_size: DEFAULT_EMBED_BATCH_SIZE,
            timeout_secs: 60,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            api_key: String::new(),
            model: "llama-3.1-8b-instant".to_string(),
            temperature: 0.2,
            timeout_secs: 60,
        }
    }
}

impl Default for KnowledgeBaseConfig {
    fn default() -> Self {
        Self {
            document_path: PathBuf::from("LogicLoom_Company_Profile_Healthcare.pdf"),
            chunk_size: 1000,
            chunk_overlap: 200,
            top_k: 3,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, DomainError> {
        let ip: IpAddr = self.host.parse().map_err(|e| {
            DomainError::configuration(format!("Invalid server host '{}': {}", self.host, e))
        })?;

        Ok(SocketAddr::from((ip, self.port)))
    }
}

impl WeatherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl KnowledgeBaseConfig {
    pub fn chunking(&self) -> ChunkingConfig {
        ChunkingConfig::new(self.chunk_size, self.chunk_overlap)
    }
}

impl AppConfig {
    /// Layered load: `config/default`, `config/local`, then `APP__*` env vars
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Reject settings that would only fail later, at query time
    pub fn validate(&self) -> Result<(), DomainError> {
        self.server.socket_addr()?;

        self.knowledge_base
            .chunking()
            .validate()
            .map_err(|e| DomainError::configuration(e.to_string()))?;

        if self.knowledge_base.top_k == 0 {
            return Err(DomainError::configuration("knowledge_base.top_k must be at least 1"));
        }

        if self.embedding.dimensions == 0 {
            return Err(DomainError::configuration("embedding.dimensions must be at least 1"));
        }

        if self.embedding.batch_size == 0 {
            return Err(DomainError::configuration("embedding.batch_size must be at least 1"));
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(DomainError::configuration(
                "llm.temperature must be between 0.0 and 2.0",
            ));
        }

        if self.llm.api_key.trim().is_empty() {
            return Err(DomainError::configuration(
                "llm.api_key is required (set APP__LLM__API_KEY)",
            ));
        }

        Ok(())
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            chunking: self.knowledge_base.chunking(),
            embedding_model: self.embedding.model.clone(),
            dimensions: self.embedding.dimensions,
            batch_size: self.embedding.batch_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.llm.api_key = "gsk_test".to_string();
        config
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.weather.base_url, "https://wttr.in");
        assert_eq!(config.weather.timeout(), Duration::from_secs(15));
        assert_eq!(config.embedding.model, "all-minilm");
        assert_eq!(config.embedding.dimensions, 384);
        assert_eq!(config.llm.model, "llama-3.1-8b-instant");
        assert!((config.llm.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.knowledge_base.top_k, 3);
        assert_eq!(config.knowledge_base.chunking(), ChunkingConfig::new(1000, 200));
    }

    #[test]
    fn test_partial_sections_fall_back_to_defaults() {
        let config: AppConfig = config::Config::builder()
            .set_override("knowledge_base.top_k", 5)
            .unwrap()
            .set_override("logging.format", "json")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.knowledge_base.top_k, 5);
        assert_eq!(config.knowledge_base.chunk_size, 1000);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_validate_accepts_defaults_with_key() {
        assert_ok!(valid_config().validate());
    }

    #[test]
    fn test_validate_requires_api_key() {
        let error = AppConfig::default().validate().unwrap_err();
        assert!(error.to_string().contains("api_key"));
    }

    #[test]
    fn test_validate_rejects_bad_chunking() {
        let mut config = valid_config();
        config.knowledge_base.chunk_overlap = 1000;

        assert!(matches!(
            config.validate(),
            Err(DomainError::Configuration { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_host() {
        let mut config = valid_config();
        config.server.host = "not-an-ip".to_string();

        assert_err!(config.validate());
    }

    #[test]
    fn test_build_options() {
        let mut config = valid_config();
        config.embedding.batch_size = 8;

        let options = config.build_options();

        assert_eq!(options.batch_size, 8);
        assert_eq!(options.dimensions, 384);
        assert_eq!(options.embedding_model, "all-minilm");
    }
}
