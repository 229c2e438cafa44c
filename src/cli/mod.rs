//! CLI module
//!
//! Subcommands:
//! - `serve`: HTTP server with the query form and JSON API
//! - `ask`: answer one query and exit
//! - `chat`: answer queries read line by line from stdin

pub mod ask;
pub mod chat;
pub mod serve;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::AppConfig;
use crate::domain::QueryAgent;
use crate::infrastructure::logging;

/// Routes questions to a live weather lookup or to answers over a company document
#[derive(Parser)]
#[command(name = "weather-rag-agent")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Answer a single query
    Ask(ask::AskArgs),

    /// Interactive loop over stdin
    Chat,
}

/// Shared startup: configuration, logging, then the agent with its index
pub(crate) async fn bootstrap() -> anyhow::Result<(AppConfig, QueryAgent)> {
    let config = crate::load_config()?;
    logging::init_logging(&config.logging);

    let agent = crate::build_agent(&config).await?;
    info!(
        passages = agent.retriever().passage_count(),
        top_k = agent.top_k(),
        "Agent ready"
    );

    Ok((config, agent))
}
