//! Flood risk classification
//!
//! Threshold rules over rainfall and humidity. Each threshold upgrades the
//! level on its own (OR semantics); there is no weighted score. Comparisons
//! are strict, so a reading exactly on a threshold stays in the lower band.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::WeatherObservation;

pub const HIGH_PRECIPITATION_MM: f64 = 50.0;
pub const HIGH_HUMIDITY_PCT: f64 = 90.0;
pub const MEDIUM_PRECIPITATION_MM: f64 = 20.0;
pub const MEDIUM_HUMIDITY_PCT: f64 = 75.0;

/// Discrete flood danger level. Ordered from least to most severe, with
/// `Unknown` below everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Unknown,
    Low,
    Medium,
    High,
}

impl RiskLevel {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Low => "LOW RISK",
            Self::Medium => "MEDIUM RISK",
            Self::High => "HIGH RISK",
        }
    }

    /// Fixed instruction shown alongside the level
    #[must_use]
    pub const fn advisory(self) -> &'static str {
        match self {
            Self::Unknown => {
                "Insufficient data. Check your internet connection and try again."
            }
            Self::Low => "Safe for now, keep monitoring.",
            Self::Medium => "Stay alert, prepare to evacuate.",
            Self::High => "Evacuate immediately.",
        }
    }

    #[must_use]
    pub const fn indicator(self) -> &'static str {
        match self {
            Self::Unknown => "⚪",
            Self::Low => "🟢",
            Self::Medium => "🟠",
            Self::High => "🔴",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} - {}", self.indicator(), self.label(), self.advisory())
    }
}

/// Map an observation, or its absence, to a risk level. Never fails.
#[must_use]
pub fn classify(observation: Option<&WeatherObservation>) -> RiskLevel {
    let Some(obs) = observation else {
        return RiskLevel::Unknown;
    };

    if obs.precipitation_mm > HIGH_PRECIPITATION_MM || obs.humidity_pct > HIGH_HUMIDITY_PCT {
        RiskLevel::High
    } else if obs.precipitation_mm > MEDIUM_PRECIPITATION_MM
        || obs.humidity_pct > MEDIUM_HUMIDITY_PCT
    {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(60.0, 50.0, RiskLevel::High)]
    #[case(0.0, 95.0, RiskLevel::High)]
    #[case(25.0, 50.0, RiskLevel::Medium)]
    #[case(0.0, 80.0, RiskLevel::Medium)]
    #[case(0.0, 0.0, RiskLevel::Low)]
    #[case(50.0, 90.0, RiskLevel::Medium)]
    #[case(20.0, 75.0, RiskLevel::Low)]
    #[case(20.1, 0.0, RiskLevel::Medium)]
    #[case(50.1, 0.0, RiskLevel::High)]
    #[case(10.0, 90.5, RiskLevel::High)]
    fn test_classify(#[case] precipitation: f64, #[case] humidity: f64, #[case] expected: RiskLevel) {
        let obs = WeatherObservation::new(30.0, humidity, precipitation);
        assert_eq!(classify(Some(&obs)), expected);
    }

    #[test]
    fn test_classify_without_observation() {
        assert_eq!(classify(None), RiskLevel::Unknown);
        assert!(RiskLevel::Unknown.advisory().starts_with("Insufficient data"));
    }

    #[test]
    fn test_classify_is_pure() {
        let obs = WeatherObservation::new(28.0, 82.0, 4.0);
        let first = classify(Some(&obs));
        let second = classify(Some(&obs));
        assert_eq!(first, second);
        assert_eq!(first, RiskLevel::Medium);
    }

    #[test]
    fn test_temperature_and_wind_do_not_matter() {
        let mut obs = WeatherObservation::new(48.0, 10.0, 0.0);
        obs.wind_kph = Some(120.0);
        assert_eq!(classify(Some(&obs)), RiskLevel::Low);
    }

    #[test]
    fn test_ordering_and_serialization() {
        assert!(RiskLevel::Unknown < RiskLevel::Low);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"high\"");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            RiskLevel::High.to_string(),
            "🔴 HIGH RISK - Evacuate immediately."
        );
    }
}
