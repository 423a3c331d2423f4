//! Weather-to-risk pipeline
//!
//! `resolve` then `fetch` then `classify`, awaited strictly in sequence.
//! Every invocation is independent: nothing is cached or shared between
//! calls, and upstream failures surface as `Unknown` risk, never as errors.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::Result;
use crate::config::WeatherConfig;
use crate::models::WeatherReport;
use crate::relief::{City, ReliefDirectory};
use crate::risk::{RiskLevel, classify};
use crate::weather::{ForecastFetcher, Geocoder, OpenMeteoClient};

/// Risk for one place, with the weather it was derived from when available
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub place: String,
    pub report: Option<WeatherReport>,
    pub risk: RiskLevel,
    pub advisory: &'static str,
}

impl fmt::Display for RiskAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.report {
            Some(report) => write!(f, "{report}")?,
            None => writeln!(
                f,
                "{}: no weather data available. Check your connection.",
                self.place
            )?,
        }
        writeln!(f, "{}", self.risk)
    }
}

/// One dashboard row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityStatus {
    pub city: City,
    pub temperature_c: Option<f64>,
    pub risk: RiskLevel,
    pub centers: usize,
}

impl fmt::Display for CityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let temperature = self
            .temperature_c
            .map_or_else(|| "--".to_string(), |t| format!("{t:.1}°C"));
        write!(
            f,
            "{:<10} {:>8}  {} {:<12} {}",
            self.city.name(),
            temperature,
            self.risk.indicator(),
            self.risk.label(),
            self.centers
        )
    }
}

/// Runs the weather pipeline against a geocoder and a forecast source
#[derive(Clone)]
pub struct FloodWatch {
    geocoder: Arc<dyn Geocoder>,
    forecaster: Arc<dyn ForecastFetcher>,
}

impl FloodWatch {
    pub fn new(geocoder: Arc<dyn Geocoder>, forecaster: Arc<dyn ForecastFetcher>) -> Self {
        Self {
            geocoder,
            forecaster,
        }
    }

    /// Pipeline backed by the Open-Meteo services
    pub fn open_meteo(config: &WeatherConfig) -> Result<Self> {
        let client = Arc::new(OpenMeteoClient::new(config)?);
        Ok(Self::new(client.clone(), client))
    }

    /// Current weather at `place`. No forecast request is made when the
    /// place cannot be resolved.
    #[instrument(skip(self))]
    pub async fn current_conditions(&self, place: &str) -> Option<WeatherReport> {
        let Some(location) = self.geocoder.resolve(place).await else {
            debug!("'{}' did not resolve, skipping forecast", place);
            return None;
        };

        let observation = self.forecaster.fetch(&location).await?;
        Some(WeatherReport {
            location,
            observation,
        })
    }

    /// Weather plus derived risk for `place`
    pub async fn assess(&self, place: &str) -> RiskAssessment {
        let report = self.current_conditions(place).await;
        let risk = classify(report.as_ref().map(|r| &r.observation));
        info!("Flood risk for '{}': {}", place, risk.label());

        RiskAssessment {
            place: place.to_string(),
            report,
            risk,
            advisory: risk.advisory(),
        }
    }

    /// Status of every city in `directory`, one city after another
    pub async fn dashboard(&self, directory: &ReliefDirectory) -> Vec<CityStatus> {
        let mut rows = Vec::new();
        for city in directory.cities() {
            let assessment = self.assess(city.name()).await;
            rows.push(CityStatus {
                city,
                temperature_c: assessment
                    .report
                    .as_ref()
                    .map(|r| r.observation.temperature_c),
                risk: assessment.risk,
                centers: directory.centers(city).len(),
            });
        }
        rows
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{FakeForecast, FakeGeocoder};
    use super::*;
    use crate::models::WeatherObservation;
    use crate::relief::directory;

    fn watch(geocoder: FakeGeocoder, forecast: Arc<FakeForecast>) -> FloodWatch {
        FloodWatch::new(Arc::new(geocoder), forecast)
    }

    #[tokio::test]
    async fn test_unresolvable_place_skips_fetch() {
        let forecast = Arc::new(FakeForecast::default());
        let watch = watch(FakeGeocoder::default(), forecast.clone());

        assert!(watch.current_conditions("Atlantis").await.is_none());
        assert_eq!(forecast.fetch_count(), 0);

        let assessment = watch.assess("Atlantis").await;
        assert_eq!(assessment.risk, RiskLevel::Unknown);
        assert!(assessment.report.is_none());
        assert!(assessment.advisory.starts_with("Insufficient data"));
    }

    #[tokio::test]
    async fn test_failed_fetch_is_unknown() {
        let forecast = Arc::new(FakeForecast::default());
        let geocoder = FakeGeocoder::default().with("Lahore", "Pakistan", 31.55, 74.35);
        let watch = watch(geocoder, forecast.clone());

        let assessment = watch.assess("Lahore").await;
        assert_eq!(forecast.fetch_count(), 1);
        assert_eq!(assessment.risk, RiskLevel::Unknown);
    }

    #[tokio::test]
    async fn test_assess_heavy_rain() {
        let forecast = Arc::new(
            FakeForecast::default().with("Karachi", WeatherObservation::new(29.0, 70.0, 62.0)),
        );
        let geocoder = FakeGeocoder::default().with("Karachi", "Pakistan", 24.86, 67.0);
        let watch = watch(geocoder, forecast);

        let assessment = watch.assess("Karachi").await;
        assert_eq!(assessment.risk, RiskLevel::High);
        assert_eq!(assessment.advisory, "Evacuate immediately.");

        let report = assessment.report.as_ref().unwrap();
        assert_eq!(report.location.display_name(), "Karachi, Pakistan");

        let text = assessment.to_string();
        assert!(text.contains("Rain: 62.0 mm"));
        assert!(text.contains("HIGH RISK"));
    }

    #[tokio::test]
    async fn test_dashboard_keeps_rows_without_weather() {
        let forecast = Arc::new(
            FakeForecast::default()
                .with("Peshawar", WeatherObservation::new(35.0, 40.0, 0.0))
                .with("Karachi", WeatherObservation::new(31.0, 80.0, 1.0)),
        );
        let geocoder = FakeGeocoder::default()
            .with("Peshawar", "Pakistan", 34.0, 71.5)
            .with("Karachi", "Pakistan", 24.86, 67.0);
        let watch = watch(geocoder, forecast);

        let rows = watch.dashboard(directory()).await;
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].city, City::Peshawar);
        assert_eq!(rows[0].risk, RiskLevel::Low);
        assert_eq!(rows[0].temperature_c, Some(35.0));
        assert_eq!(rows[0].centers, 3);

        assert_eq!(rows[1].city, City::Lahore);
        assert_eq!(rows[1].risk, RiskLevel::Unknown);
        assert_eq!(rows[1].temperature_c, None);
        assert!(rows[1].to_string().contains("--"));

        assert_eq!(rows[2].risk, RiskLevel::Medium);
    }

    #[tokio::test]
    async fn test_dashboard_looks_cities_up_in_order() {
        let geocoder = Arc::new(FakeGeocoder::default());
        let watch = FloodWatch::new(geocoder.clone(), Arc::new(FakeForecast::default()));

        watch.dashboard(directory()).await;
        assert_eq!(
            *geocoder.lookups.lock().unwrap(),
            vec!["Peshawar", "Lahore", "Karachi"]
        );
    }
}
