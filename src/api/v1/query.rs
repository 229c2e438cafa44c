//! `POST /v1/query` - run one query through the agent

use axum::extract::State;
use tracing::{debug, info};

use crate::api::middleware::truncate_for_log;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, QueryRequest};
use crate::domain::AgentResult;

pub async fn run_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<AgentResult>, ApiError> {
    let query = request.query.trim();

    if query.is_empty() {
        return Err(ApiError::bad_request("query must not be empty").with_param("query"));
    }

    debug!(query = %truncate_for_log(query, 200), "Running query");
    let result = state.agent.run(query).await?;
    info!(routing_decision = %result.routing_decision(), "Query answered");

    Ok(Json(result))
}
