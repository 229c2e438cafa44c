//! Query routing agent: classify a query, run exactly one branch

mod city;
mod dispatcher;
mod result;
mod routing;

pub use city::{extract_city, CITY_INDICATORS, DEFAULT_CITY};
pub use dispatcher::QueryAgent;
pub use result::{AgentResult, DocumentQaOutcome, ToolResults};
pub use routing::{classify, RoutingDecision, WEATHER_KEYWORDS};
