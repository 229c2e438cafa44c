//! Weather provider implementations

mod wttr;

pub use wttr::{WttrWeatherProvider, DEFAULT_USER_AGENT, DEFAULT_WTTR_BASE_URL};
