//! `FloodAid` - flood relief assistant
//!
//! Relief center listings, current weather for a place, a threshold-based
//! flood risk level derived from it, and canned answers to help requests.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod relief;
pub mod responder;
pub mod risk;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::FloodAidConfig;
pub use error::FloodAidError;
pub use models::{CenterCategory, Location, ReliefCenter, WeatherObservation, WeatherReport};
pub use pipeline::{CityStatus, FloodWatch, RiskAssessment};
pub use relief::{City, ReliefDirectory};
pub use responder::{Topic, respond};
pub use risk::{RiskLevel, classify};
pub use weather::{ForecastFetcher, Geocoder, OpenMeteoClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, FloodAidError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
