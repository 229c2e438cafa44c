//! Per-query agent output

use serde::Serialize;

use super::RoutingDecision;
use crate::domain::answer::AnswerResult;
use crate::domain::weather::WeatherResult;

/// Raw record of the document-QA branch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentQaOutcome {
    pub input: String,
    #[serde(flatten)]
    pub result: AnswerResult,
}

/// Structured output of whichever branch ran
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolResults {
    Weather(WeatherResult),
    DocumentQa(DocumentQaOutcome),
}

impl ToolResults {
    pub fn routing_decision(&self) -> RoutingDecision {
        match self {
            Self::Weather(_) => RoutingDecision::Weather,
            Self::DocumentQa(_) => RoutingDecision::DocumentQa,
        }
    }

    fn final_answer(&self) -> String {
        match self {
            Self::Weather(result) => result.answer(),
            Self::DocumentQa(outcome) => outcome.result.answer.clone(),
        }
    }
}

/// Everything produced for one query
///
/// The routing decision and final answer are derived from the branch record,
/// so they can never disagree with it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentResult {
    query: String,
    routing_decision: RoutingDecision,
    final_answer: String,
    tool_results: ToolResults,
}

impl AgentResult {
    pub fn new(query: impl Into<String>, tool_results: ToolResults) -> Self {
        Self {
            query: query.into(),
            routing_decision: tool_results.routing_decision(),
            final_answer: tool_results.final_answer(),
            tool_results,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn routing_decision(&self) -> RoutingDecision {
        self.routing_decision
    }

    pub fn final_answer(&self) -> &str {
        &self.final_answer
    }

    pub fn tool_results(&self) -> &ToolResults {
        &self.tool_results
    }
}
