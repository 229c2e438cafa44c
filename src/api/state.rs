//! Application state shared by the handlers

use std::sync::Arc;

use crate::domain::QueryAgent;

/// Cheap to clone; the agent itself is shared read-only
#[derive(Debug, Clone)]
pub struct AppState {
    pub agent: Arc<QueryAgent>,
    pub embedding_model: String,
}

impl AppState {
    pub fn new(agent: Arc<QueryAgent>, embedding_model: impl Into<String>) -> Self {
        Self {
            agent,
            embedding_model: embedding_model.into(),
        }
    }
}
