use thiserror::Error;

/// Failures of a single weather lookup
///
/// None of these are fatal: they are folded into an unsuccessful
/// [`WeatherResult`](super::WeatherResult) and shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("City not found or service unavailable (Status: {0})")]
    Status(u16),

    #[error("Invalid response from weather service")]
    MalformedResponse,

    #[error("Invalid weather data received")]
    InvalidData,

    #[error("Request timeout - please try again")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_carries_code() {
        assert_eq!(
            WeatherError::Status(404).to_string(),
            "City not found or service unavailable (Status: 404)"
        );
    }

    #[test]
    fn test_network_message_carries_cause() {
        let error = WeatherError::Network("connection refused".into());
        assert_eq!(error.to_string(), "Network error: connection refused");
    }
}
