use serde::ser::{Serialize, SerializeMap, Serializer};

use super::WeatherError;

/// Placeholder for fields the weather service omitted
pub const NOT_AVAILABLE: &str = "N/A";

/// Current conditions for one city, values as delivered by the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherReport {
    pub city: String,
    pub temperature: String,
    pub feels_like: String,
    pub humidity: String,
    pub description: String,
    pub wind_speed: String,
}

impl WeatherReport {
    /// Multi-line summary shown as the agent's answer
    pub fn summary(&self) -> String {
        format!(
            "Weather in {}:\n\
             - Temperature: {}°C (feels like {}°C)\n\
             - Condition: {}\n\
             - Humidity: {}%\n\
             - Wind Speed: {} mph",
            self.city,
            self.temperature,
            self.feels_like,
            self.description,
            self.humidity,
            self.wind_speed
        )
    }
}

/// Outcome of a weather lookup
///
/// Serializes to the flat `{success, ...}` record used in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherResult {
    Success(WeatherReport),
    Failure(WeatherError),
}

impl WeatherResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        match self {
            Self::Success(report) => Some(report),
            Self::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&WeatherError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// Human-readable answer for either outcome
    pub fn answer(&self) -> String {
        match self {
            Self::Success(report) => report.summary(),
            Self::Failure(error) => format!("Failed to fetch weather data: {}", error),
        }
    }
}

impl From<Result<WeatherReport, WeatherError>> for WeatherResult {
    fn from(result: Result<WeatherReport, WeatherError>) -> Self {
        match result {
            Ok(report) => Self::Success(report),
            Err(error) => Self::Failure(error),
        }
    }
}

impl Serialize for WeatherResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success(report) => {
                let mut map = serializer.serialize_map(Some(7))?;
                map.serialize_entry("success", &true)?;
                map.serialize_entry("city", &report.city)?;
                map.serialize_entry("temperature", &report.temperature)?;
                map.serialize_entry("feels_like", &report.feels_like)?;
                map.serialize_entry("humidity", &report.humidity)?;
                map.serialize_entry("description", &report.description)?;
                map.serialize_entry("wind_speed", &report.wind_speed)?;
                map.end()
            }
            Self::Failure(error) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", &error.to_string())?;
                map.end()
            }
        }
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_alphabetic = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_alphabetic {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_alphabetic = true;
        } else {
            result.push(c);
            previous_alphabetic = false;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn london() -> WeatherReport {
        WeatherReport {
            city: "London".into(),
            temperature: "12".into(),
            feels_like: "10".into(),
            humidity: "81".into(),
            description: "Light rain".into(),
            wind_speed: "9".into(),
        }
    }

    #[test]
    fn test_summary_format() {
        let summary = london().summary();

        assert_eq!(
            summary,
            "Weather in London:\n\
             - Temperature: 12°C (feels like 10°C)\n\
             - Condition: Light rain\n\
             - Humidity: 81%\n\
             - Wind Speed: 9 mph"
        );
    }

    #[test]
    fn test_failure_answer() {
        let result = WeatherResult::Failure(WeatherError::Timeout);

        assert_eq!(
            result.answer(),
            "Failed to fetch weather data: Request timeout - please try again"
        );
        assert!(!result.is_success());
        assert!(result.report().is_none());
    }

    #[test]
    fn test_success_serializes_flat() {
        let json = serde_json::to_value(WeatherResult::Success(london())).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["city"], "London");
        assert_eq!(json["wind_speed"], "9");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failure_serializes_error_message() {
        let json = serde_json::to_value(WeatherResult::Failure(WeatherError::Status(404))).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(
            json["error"],
            "City not found or service unavailable (Status: 404)"
        );
        assert!(json.get("city").is_none());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("london?"), "London?");
        assert_eq!(title_case("new YORK city"), "New York City");
        assert_eq!(title_case("saint-étienne"), "Saint-Étienne");
        assert_eq!(title_case(""), "");
    }
}
