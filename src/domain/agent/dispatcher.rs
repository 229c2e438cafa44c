//! Two-branch dispatcher

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::{classify, extract_city, AgentResult, DocumentQaOutcome, RoutingDecision, ToolResults};
use crate::domain::answer::AnswerGenerator;
use crate::domain::knowledge_base::{PassageRetriever, SearchParams, DEFAULT_TOP_K};
use crate::domain::weather::WeatherProvider;
use crate::domain::DomainError;

/// Routes each query to the weather lookup or to retrieval + generation.
///
/// Built once at startup and shared read-only; it holds no per-query state.
#[derive(Debug, Clone)]
pub struct QueryAgent {
    weather: Arc<dyn WeatherProvider>,
    retriever: Arc<dyn PassageRetriever>,
    generator: Arc<dyn AnswerGenerator>,
    top_k: usize,
}

impl QueryAgent {
    pub fn new(
        weather: Arc<dyn WeatherProvider>,
        retriever: Arc<dyn PassageRetriever>,
        generator: Arc<dyn AnswerGenerator>,
    ) -> Self {
        Self {
            weather,
            retriever,
            generator,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn retriever(&self) -> &Arc<dyn PassageRetriever> {
        &self.retriever
    }

    /// Answer one query.
    ///
    /// The weather branch always succeeds (lookup failures become part of the
    /// answer). Retrieval and generation failures are returned as errors.
    #[instrument(skip(self), fields(routing_decision = tracing::field::Empty))]
    pub async fn run(&self, query: &str) -> Result<AgentResult, DomainError> {
        let decision = classify(query);
        tracing::Span::current().record("routing_decision", decision.as_str());
        info!("Routing to: {}", decision);

        let tool_results = match decision {
            RoutingDecision::Weather => self.run_weather(query).await,
            RoutingDecision::DocumentQa => self.run_document_qa(query).await?,
        };

        Ok(AgentResult::new(query, tool_results))
    }

    async fn run_weather(&self, query: &str) -> ToolResults {
        let city = extract_city(query);
        debug!(city = %city, provider = self.weather.provider_name(), "Fetching weather");

        let result = self.weather.fetch_weather(&city).await;

        if let Some(error) = result.error() {
            warn!(city = %city, error = %error, "Weather lookup failed");
        }

        ToolResults::Weather(result)
    }

    async fn run_document_qa(&self, query: &str) -> Result<ToolResults, DomainError> {
        let passages = self
            .retriever
            .search(SearchParams::new(query).with_top_k(self.top_k))
            .await?;

        debug!(passages = passages.len(), "Retrieved passages");

        let result = self.generator.answer(query, passages).await?;

        Ok(ToolResults::DocumentQa(DocumentQaOutcome {
            input: query.to_string(),
            result,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::answer::{AnswerResult, MockAnswerGenerator};
    use crate::domain::knowledge_base::{MockPassageRetriever, Passage, RetrievedPassage};
    use crate::domain::weather::{MockWeatherProvider, WeatherError, WeatherReport, WeatherResult};

    fn london_report() -> WeatherResult {
        WeatherResult::Success(WeatherReport {
            city: "London?".into(),
            temperature: "14".into(),
            feels_like: "13".into(),
            humidity: "72".into(),
            description: "Partly cloudy".into(),
            wind_speed: "8".into(),
        })
    }

    fn company_passages() -> Vec<RetrievedPassage> {
        vec![
            RetrievedPassage::new(Passage::new("LogicLoom is a healthcare IT firm.", "p.pdf", 1), 0.91),
            RetrievedPassage::new(Passage::new("Founded in 2015.", "p.pdf", 1), 0.74),
            RetrievedPassage::new(Passage::new("Offices in Pune.", "p.pdf", 2), 0.52),
        ]
    }

    fn untouched_retriever() -> MockPassageRetriever {
        let mut retriever = MockPassageRetriever::new();
        retriever.expect_search().times(0);
        retriever
    }

    fn untouched_generator() -> MockAnswerGenerator {
        let mut generator = MockAnswerGenerator::new();
        generator.expect_answer().times(0);
        generator
    }

    #[tokio::test]
    async fn test_weather_query_never_touches_document_branch() {
        let weather = Arc::new(MockWeatherProvider::new(london_report()));
        let agent = QueryAgent::new(
            weather.clone(),
            Arc::new(untouched_retriever()),
            Arc::new(untouched_generator()),
        );

        let result = agent.run("What's the weather in London?").await.unwrap();

        assert_eq!(result.routing_decision(), RoutingDecision::Weather);
        assert_eq!(weather.requested_cities(), vec!["London?".to_string()]);
        assert!(result.final_answer().contains("Weather in London"));
        assert!(result.final_answer().contains("- Humidity: 72%"));
    }

    #[tokio::test]
    async fn test_document_query_never_touches_weather() {
        let weather = Arc::new(MockWeatherProvider::new(london_report()));

        let mut retriever = MockPassageRetriever::new();
        retriever
            .expect_search()
            .withf(|params| params.query == "Tell me about the company" && params.top_k == 3)
            .times(1)
            .returning(|_| Ok(company_passages()));

        let mut generator = MockAnswerGenerator::new();
        generator
            .expect_answer()
            .withf(|query, passages| query == "Tell me about the company" && passages.len() == 3)
            .times(1)
            .returning(|_, passages| {
                Ok(AnswerResult::new(
                    "LogicLoom is a healthcare IT firm founded in 2015.",
                    passages,
                ))
            });

        let agent = QueryAgent::new(weather.clone(), Arc::new(retriever), Arc::new(generator));

        let result = agent.run("Tell me about the company").await.unwrap();

        assert_eq!(result.routing_decision(), RoutingDecision::DocumentQa);
        assert_eq!(
            result.final_answer(),
            "LogicLoom is a healthcare IT firm founded in 2015."
        );
        assert!(weather.requested_cities().is_empty());

        match result.tool_results() {
            ToolResults::DocumentQa(outcome) => {
                assert_eq!(outcome.result.supporting_passages, company_passages());
            }
            other => panic!("unexpected tool results: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_weather_failure_is_reported_in_answer() {
        let weather = Arc::new(MockWeatherProvider::new(WeatherResult::Failure(
            WeatherError::Network("dns error: no such host".into()),
        )));
        let agent = QueryAgent::new(
            weather,
            Arc::new(untouched_retriever()),
            Arc::new(untouched_generator()),
        );

        let result = agent.run("forecast for Oslo").await.unwrap();

        assert!(result.final_answer().starts_with("Failed to fetch weather data:"));
        assert!(result.final_answer().contains("dns error: no such host"));
        assert!(matches!(
            result.tool_results(),
            ToolResults::Weather(WeatherResult::Failure(_))
        ));
    }

    #[tokio::test]
    async fn test_generation_failure_propagates() {
        let mut retriever = MockPassageRetriever::new();
        retriever
            .expect_search()
            .returning(|_| Ok(company_passages()));

        let mut generator = MockAnswerGenerator::new();
        generator
            .expect_answer()
            .returning(|_, _| Err(DomainError::provider("groq", "rate limit reached")));

        let agent = QueryAgent::new(
            Arc::new(MockWeatherProvider::new(london_report())),
            Arc::new(retriever),
            Arc::new(generator),
        );

        let error = agent.run("Who are the founders?").await.unwrap_err();

        assert!(error.to_string().contains("rate limit reached"));
    }

    #[tokio::test]
    async fn test_retrieval_failure_skips_generation() {
        let mut retriever = MockPassageRetriever::new();
        retriever
            .expect_search()
            .returning(|_| Err(DomainError::provider("ollama", "connection refused")));

        let agent = QueryAgent::new(
            Arc::new(MockWeatherProvider::new(london_report())),
            Arc::new(retriever),
            Arc::new(untouched_generator()),
        )
        .with_top_k(5);

        assert!(agent.run("What services are offered?").await.is_err());
        assert_eq!(agent.top_k(), 5);
    }
}
