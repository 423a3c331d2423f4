//! Current weather observation and display methods

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Location;
use crate::{FloodAidError, Result};

/// Current conditions at one place, taken from a single forecast call
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherObservation {
    /// Air temperature at 2 m in Celsius
    pub temperature_c: f64,
    /// Relative humidity at 2 m, 0-100
    pub humidity_pct: f64,
    /// Precipitation in mm
    pub precipitation_mm: f64,
    /// Wind speed at 10 m in km/h
    pub wind_kph: Option<f64>,
    /// Human-readable description of the WMO weather code
    pub conditions: Option<String>,
    /// Service-local time of the reading
    pub observed_at: Option<NaiveDateTime>,
}

impl WeatherObservation {
    /// Observation with only the fields the risk classifier needs
    #[must_use]
    pub fn new(temperature_c: f64, humidity_pct: f64, precipitation_mm: f64) -> Self {
        Self {
            temperature_c,
            humidity_pct,
            precipitation_mm,
            wind_kph: None,
            conditions: None,
            observed_at: None,
        }
    }

    /// Reject readings no weather station can produce
    pub fn validate(&self) -> Result<()> {
        if !self.temperature_c.is_finite() {
            return Err(FloodAidError::api("temperature is not a finite number"));
        }
        if !(0.0..=100.0).contains(&self.humidity_pct) {
            return Err(FloodAidError::api(format!(
                "humidity {} is outside 0-100%",
                self.humidity_pct
            )));
        }
        if !(self.precipitation_mm >= 0.0) {
            return Err(FloodAidError::api(format!(
                "precipitation {} is negative",
                self.precipitation_mm
            )));
        }
        if let Some(wind) = self.wind_kph {
            if !(wind >= 0.0) {
                return Err(FloodAidError::api(format!("wind speed {wind} is negative")));
            }
        }
        Ok(())
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°C", self.temperature_c)
    }

    #[must_use]
    pub fn format_humidity(&self) -> String {
        format!("{:.0}%", self.humidity_pct)
    }

    #[must_use]
    pub fn format_rainfall(&self) -> String {
        format!("{:.1} mm", self.precipitation_mm)
    }

    /// Wind speed, or "n/a" when the service did not report it
    #[must_use]
    pub fn format_wind(&self) -> String {
        self.wind_kph
            .map_or_else(|| "n/a".to_string(), |wind| format!("{wind:.1} km/h"))
    }
}

/// A successful run of the weather pipeline: where, and what it is like there
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherReport {
    pub location: Location,
    pub observation: WeatherObservation,
}

impl fmt::Display for WeatherReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let obs = &self.observation;
        writeln!(f, "{} ({})", self.location.display_name(), self.location.format_coordinates())?;
        if let Some(conditions) = &obs.conditions {
            writeln!(f, "   ⛅ Conditions: {conditions}")?;
        }
        writeln!(f, "   🌡️ Temp: {}", obs.format_temperature())?;
        writeln!(f, "   💧 Humidity: {}", obs.format_humidity())?;
        writeln!(f, "   🌧️ Rain: {}", obs.format_rainfall())?;
        writeln!(f, "   💨 Wind: {}", obs.format_wind())?;
        if let Some(observed_at) = obs.observed_at {
            writeln!(f, "   🕒 Observed: {}", observed_at.format("%Y-%m-%d %H:%M"))?;
        }
        Ok(())
    }
}
