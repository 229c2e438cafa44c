//! Weather lookup domain types

mod error;
mod provider;
mod report;

pub use error::WeatherError;
pub use provider::WeatherProvider;
pub use report::{title_case, WeatherReport, WeatherResult, NOT_AVAILABLE};

#[cfg(test)]
pub use provider::mock::MockWeatherProvider;
