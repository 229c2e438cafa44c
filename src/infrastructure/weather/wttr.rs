//! wttr.in weather provider

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde_json::Value;
use tracing::debug;

use crate::domain::weather::{
    title_case, WeatherError, WeatherProvider, WeatherReport, WeatherResult, NOT_AVAILABLE,
};
use crate::domain::DomainError;

pub const DEFAULT_WTTR_BASE_URL: &str = "https://wttr.in";

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const UNKNOWN_DESCRIPTION: &str = "Unknown";

/// Current conditions from `GET {base_url}/{city}?format=j1`
#[derive(Debug, Clone)]
pub struct WttrWeatherProvider {
    client: reqwest::Client,
    base_url: Url,
}

impl WttrWeatherProvider {
    pub fn new(
        base_url: &str,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            DomainError::configuration(format!("Invalid weather base URL '{}': {}", base_url, e))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(DomainError::configuration(format!(
                "Weather base URL '{}' cannot carry a path",
                base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    fn forecast_url(&self, city: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(city);
        }
        url.query_pairs_mut().append_pair("format", "j1");
        url
    }

    async fn lookup(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let url = self.forecast_url(city);
        debug!(url = %url, "Requesting current conditions");

        let response = self.client.get(url).send().await.map_err(classify_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(WeatherError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(classify_error)?;
        let json: Value =
            serde_json::from_str(&body).map_err(|_| WeatherError::MalformedResponse)?;

        parse_report(city, &json)
    }
}

#[async_trait]
impl WeatherProvider for WttrWeatherProvider {
    async fn fetch_weather(&self, city: &str) -> WeatherResult {
        let city = city.trim();
        self.lookup(city).await.into()
    }

    fn provider_name(&self) -> &'static str {
        "wttr.in"
    }
}

fn classify_error(error: reqwest::Error) -> WeatherError {
    if error.is_timeout() {
        WeatherError::Timeout
    } else {
        WeatherError::Network(error.to_string())
    }
}

fn parse_report(city: &str, json: &Value) -> Result<WeatherReport, WeatherError> {
    let current = json
        .get("current_condition")
        .and_then(Value::as_array)
        .and_then(|conditions| conditions.first())
        .ok_or(WeatherError::InvalidData)?;

    let description = current
        .get("weatherDesc")
        .and_then(Value::as_array)
        .and_then(|descriptions| descriptions.first())
        .and_then(|entry| entry.get("value"))
        .and_then(scalar)
        .unwrap_or_else(|| UNKNOWN_DESCRIPTION.to_string());

    Ok(WeatherReport {
        city: title_case(city),
        temperature: field(current, "temp_C"),
        feels_like: field(current, "FeelsLikeC"),
        humidity: field(current, "humidity"),
        description,
        wind_speed: field(current, "windspeedMiles"),
    })
}

fn field(current: &Value, key: &str) -> String {
    current
        .get(key)
        .and_then(scalar)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// wttr.in delivers numbers as strings; accept either
fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
