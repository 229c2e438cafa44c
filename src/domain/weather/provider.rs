use async_trait::async_trait;
use std::fmt::Debug;

use super::WeatherResult;

/// Source of current weather conditions
///
/// Lookups never fail at the type level: every upstream problem is
/// reported through [`WeatherResult::Failure`].
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_weather(&self, city: &str) -> WeatherResult;

    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Returns a canned result and records the requested cities
    #[derive(Debug)]
    pub struct MockWeatherProvider {
        result: WeatherResult,
        cities: Mutex<Vec<String>>,
    }

    impl MockWeatherProvider {
        pub fn new(result: WeatherResult) -> Self {
            Self {
                result,
                cities: Mutex::new(Vec::new()),
            }
        }

        pub fn requested_cities(&self) -> Vec<String> {
            self.cities.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WeatherProvider for MockWeatherProvider {
        async fn fetch_weather(&self, city: &str) -> WeatherResult {
            self.cities.lock().unwrap().push(city.to_string());
            self.result.clone()
        }

        fn provider_name(&self) -> &'static str {
            "mock"
        }
    }
}
