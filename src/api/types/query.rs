use serde::{Deserialize, Serialize};

/// Body of `POST /v1/query`; the response is the agent result itself
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}
