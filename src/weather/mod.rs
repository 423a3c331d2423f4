//! Geocoding and current-conditions lookups
//!
//! Both operations follow the same contract: any failure (no match, timeout,
//! transport error, unusable response) comes back as `None`. Callers treat
//! absence uniformly and never inspect why a lookup failed; the cause is
//! only recorded in the logs.

use async_trait::async_trait;

use crate::models::{Location, WeatherObservation};

pub mod open_meteo;

pub use open_meteo::{OpenMeteoClient, weather_code_to_description};

/// Resolves a free-text place name to coordinates
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// First match for `place_name`, or `None` when there is none or the
    /// lookup failed.
    async fn resolve(&self, place_name: &str) -> Option<Location>;
}

/// Retrieves current atmospheric conditions for a resolved place
#[async_trait]
pub trait ForecastFetcher: Send + Sync {
    async fn fetch(&self, location: &Location) -> Option<WeatherObservation>;
}
