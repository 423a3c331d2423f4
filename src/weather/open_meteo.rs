//! Open-Meteo geocoding and forecast client
//!
//! One outbound request per call, bounded by the configured timeout, no
//! retries. Neither endpoint needs an API key.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::{ForecastFetcher, Geocoder};
use crate::config::WeatherConfig;
use crate::models::{Location, WeatherObservation};
use crate::{FloodAidError, Result};

const USER_AGENT: &str = concat!("floodaid/", env!("CARGO_PKG_VERSION"));

/// Fields requested from the `current` section of the forecast endpoint
pub const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,precipitation,weather_code,wind_speed_10m";

/// HTTP client for the Open-Meteo geocoding and forecast APIs
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    geocoding_url: String,
    forecast_url: String,
    language: String,
}

impl OpenMeteoClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            geocoding_url: config.geocoding_url.trim_end_matches('/').to_string(),
            forecast_url: config.forecast_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
        })
    }

    fn search_url(&self, place_name: &str) -> String {
        format!(
            "{}/search?name={}&count=1&language={}&format=json",
            self.geocoding_url,
            urlencoding::encode(place_name),
            urlencoding::encode(&self.language)
        )
    }

    fn current_url(&self, location: &Location) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&current={}&timezone=auto",
            self.forecast_url, location.latitude, location.longitude, CURRENT_FIELDS
        )
    }

    async fn get_body(&self, url: &str) -> Result<String> {
        let start_time = Instant::now();
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        debug!(
            "Open-Meteo responded in {:.3}s ({} bytes)",
            start_time.elapsed().as_secs_f64(),
            body.len()
        );
        Ok(body)
    }

    #[instrument(skip(self))]
    async fn try_resolve(&self, place_name: &str) -> Result<Option<Location>> {
        let place_name = place_name.trim();
        if place_name.is_empty() {
            return Err(FloodAidError::validation("place name is blank"));
        }

        let body = self.get_body(&self.search_url(place_name)).await?;
        let location = parse_geocoding(&body)?;

        match &location {
            Some(found) => debug!(
                "Resolved '{}' to {} ({})",
                place_name,
                found.display_name(),
                found.format_coordinates()
            ),
            None => debug!("No geocoding match for '{}'", place_name),
        }
        Ok(location)
    }

    #[instrument(skip(self, location), fields(lat = location.latitude, lon = location.longitude))]
    async fn try_fetch(&self, location: &Location) -> Result<WeatherObservation> {
        let body = self.get_body(&self.current_url(location)).await?;
        parse_current(&body)
    }
}

#[async_trait]
impl Geocoder for OpenMeteoClient {
    async fn resolve(&self, place_name: &str) -> Option<Location> {
        self.try_resolve(place_name).await.unwrap_or_else(|e| {
            warn!("Geocoding '{}' failed: {}", place_name, e);
            None
        })
    }
}

#[async_trait]
impl ForecastFetcher for OpenMeteoClient {
    async fn fetch(&self, location: &Location) -> Option<WeatherObservation> {
        match self.try_fetch(location).await {
            Ok(observation) => Some(observation),
            Err(e) => {
                warn!(
                    "Fetching current weather for {} failed: {}",
                    location.display_name(),
                    e
                );
                None
            }
        }
    }
}

/// Geocoding response from `OpenMeteo`
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
}

impl From<GeocodingResult> for Location {
    fn from(result: GeocodingResult) -> Self {
        Location {
            latitude: result.latitude,
            longitude: result.longitude,
            name: result.name,
            country: result.country,
        }
    }
}

/// Forecast response; only the `current` section is of interest
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentData>,
}

#[derive(Debug, Deserialize)]
struct CurrentData {
    time: Option<String>,
    #[serde(rename = "temperature_2m")]
    temperature: f64,
    #[serde(rename = "relative_humidity_2m")]
    humidity: f64,
    precipitation: f64,
    weather_code: Option<u8>,
    #[serde(rename = "wind_speed_10m")]
    wind_speed: Option<f64>,
}

/// First candidate of a geocoding search body. An absent or empty
/// `results` array means no match.
pub fn parse_geocoding(body: &str) -> Result<Option<Location>> {
    let response: GeocodingResponse = serde_json::from_str(body)
        .map_err(|e| FloodAidError::api(format!("Invalid geocoding response: {e}")))?;

    Ok(response
        .results
        .unwrap_or_default()
        .into_iter()
        .next()
        .map(Location::from))
}

/// Extract the observation from the `current` section of a forecast body
pub fn parse_current(body: &str) -> Result<WeatherObservation> {
    let response: ForecastResponse = serde_json::from_str(body)
        .map_err(|e| FloodAidError::api(format!("Invalid forecast response: {e}")))?;

    let current = response
        .current
        .ok_or_else(|| FloodAidError::api("Forecast response has no current section"))?;

    let observation = WeatherObservation {
        temperature_c: current.temperature,
        humidity_pct: current.humidity,
        precipitation_mm: current.precipitation,
        wind_kph: current.wind_speed,
        conditions: current
            .weather_code
            .map(|code| weather_code_to_description(code).to_string()),
        observed_at: current
            .time
            .as_deref()
            .and_then(|time| NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M").ok()),
    };
    observation.validate()?;

    Ok(observation)
}

/// Convert a WMO weather code to a human-readable description
#[must_use]
pub fn weather_code_to_description(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 | 48 => "Fog",
        51 | 53 | 55 => "Drizzle",
        56 | 57 => "Freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 | 67 => "Freezing rain",
        71 | 73 | 75 | 77 => "Snow",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 | 86 => "Snow showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm with hail",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAHORE_SEARCH: &str = r#"{
        "results": [
            {"id": 1172451, "name": "Lahore", "latitude": 31.558, "longitude": 74.35071,
             "country": "Pakistan", "country_code": "PK", "admin1": "Punjab"},
            {"id": 1, "name": "Lahore", "latitude": 38.2, "longitude": -77.9, "country": "United States"}
        ],
        "generationtime_ms": 0.6
    }"#;

    const KARACHI_CURRENT: &str = r#"{
        "latitude": 24.875,
        "longitude": 67.0,
        "timezone": "Asia/Karachi",
        "current_units": {"temperature_2m": "°C", "relative_humidity_2m": "%"},
        "current": {
            "time": "2025-08-14T15:45",
            "interval": 900,
            "temperature_2m": 31.4,
            "relative_humidity_2m": 79,
            "precipitation": 2.6,
            "weather_code": 63,
            "wind_speed_10m": 18.7
        }
    }"#;

    fn test_config(base: &str) -> WeatherConfig {
        WeatherConfig {
            geocoding_url: format!("{base}/"),
            forecast_url: base.to_string(),
            language: "en".to_string(),
            timeout_seconds: 1,
        }
    }

    #[test]
    fn test_parse_geocoding_takes_first_candidate() {
        let location = parse_geocoding(LAHORE_SEARCH).unwrap().unwrap();
        assert_eq!(location.name, "Lahore");
        assert_eq!(location.country.as_deref(), Some("Pakistan"));
        assert_eq!(location.latitude, 31.558);
        assert_eq!(location.longitude, 74.35071);
    }

    #[test]
    fn test_parse_geocoding_no_results() {
        assert!(parse_geocoding(r#"{"generationtime_ms": 0.3}"#).unwrap().is_none());
        assert!(parse_geocoding(r#"{"results": []}"#).unwrap().is_none());
    }

    #[test]
    fn test_parse_geocoding_country_is_optional() {
        let body = r#"{"results": [{"name": "Atlantis", "latitude": 1.0, "longitude": 2.0}]}"#;
        let location = parse_geocoding(body).unwrap().unwrap();
        assert!(location.country.is_none());
    }

    #[test]
    fn test_parse_geocoding_malformed() {
        assert!(parse_geocoding("<html>busy</html>").is_err());
        assert!(parse_geocoding(r#"{"results": [{"name": "NoCoords"}]}"#).is_err());
    }

    #[test]
    fn test_parse_current() {
        let obs = parse_current(KARACHI_CURRENT).unwrap();
        assert_eq!(obs.temperature_c, 31.4);
        assert_eq!(obs.humidity_pct, 79.0);
        assert_eq!(obs.precipitation_mm, 2.6);
        assert_eq!(obs.wind_kph, Some(18.7));
        assert_eq!(obs.conditions.as_deref(), Some("Moderate rain"));
        assert_eq!(
            obs.observed_at.unwrap().format("%Y-%m-%d %H:%M").to_string(),
            "2025-08-14 15:45"
        );
    }

    #[test]
    fn test_parse_current_optional_fields() {
        let body = r#"{"current": {"temperature_2m": 20.0, "relative_humidity_2m": 40, "precipitation": 0.0}}"#;
        let obs = parse_current(body).unwrap();
        assert!(obs.wind_kph.is_none());
        assert!(obs.conditions.is_none());
        assert!(obs.observed_at.is_none());
    }

    #[test]
    fn test_parse_current_missing_section_or_field() {
        assert!(parse_current(r#"{"latitude": 1.0}"#).is_err());
        let no_humidity = r#"{"current": {"temperature_2m": 20.0, "precipitation": 0.0}}"#;
        assert!(parse_current(no_humidity).is_err());
    }

    #[test]
    fn test_parse_current_rejects_impossible_values() {
        let body = r#"{"current": {"temperature_2m": 20.0, "relative_humidity_2m": 140, "precipitation": 0.0}}"#;
        assert!(parse_current(body).is_err());
    }

    #[test]
    fn test_request_urls() {
        let client = OpenMeteoClient::new(&test_config("https://geo.example")).unwrap();
        assert_eq!(
            client.search_url("Dera Ismail Khan"),
            "https://geo.example/search?name=Dera%20Ismail%20Khan&count=1&language=en&format=json"
        );

        let location = Location::new(34.0151, 71.5249, "Peshawar".into());
        assert_eq!(
            client.current_url(&location),
            "https://geo.example/forecast?latitude=34.0151&longitude=71.5249\
             &current=temperature_2m,relative_humidity_2m,precipitation,weather_code,wind_speed_10m\
             &timezone=auto"
        );
    }

    #[test]
    fn test_weather_code_to_description() {
        assert_eq!(weather_code_to_description(0), "Clear sky");
        assert_eq!(weather_code_to_description(65), "Heavy rain");
        assert_eq!(weather_code_to_description(99), "Thunderstorm with hail");
        assert_eq!(weather_code_to_description(200), "Unknown");
    }

    #[tokio::test]
    async fn test_blank_place_name_resolves_to_none() {
        let client = OpenMeteoClient::new(&test_config("http://127.0.0.1:1")).unwrap();
        assert!(client.resolve("   ").await.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_service_collapses_to_none() {
        let client = OpenMeteoClient::new(&test_config("http://127.0.0.1:1")).unwrap();
        assert!(client.resolve("Lahore").await.is_none());

        let location = Location::new(31.5204, 74.3587, "Lahore".into());
        assert!(client.fetch(&location).await.is_none());
    }
}
