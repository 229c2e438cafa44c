//! Keyword router

use std::fmt;

use serde::{Deserialize, Serialize};

/// Substrings that send a query to the weather branch
pub const WEATHER_KEYWORDS: [&str; 4] = ["weather", "temperature", "forecast", "climate"];

/// Which branch handles a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingDecision {
    Weather,
    DocumentQa,
}

impl RoutingDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weather => "weather",
            Self::DocumentQa => "document_qa",
        }
    }

    /// Display label, e.g. `DOCUMENT QA`
    pub fn label(&self) -> String {
        self.as_str().to_uppercase().replace('_', " ")
    }
}

impl fmt::Display for RoutingDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a query by case-insensitive substring match on [`WEATHER_KEYWORDS`].
///
/// Matching is plain substring search: words that merely
/// contain a keyword ("climate change policy", "temperatures") also route to
/// the weather branch.
pub fn classify(query: &str) -> RoutingDecision {
    let query = query.to_lowercase();

    if WEATHER_KEYWORDS.iter().any(|keyword| query.contains(keyword)) {
        RoutingDecision::Weather
    } else {
        RoutingDecision::DocumentQa
    }
}
