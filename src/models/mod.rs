//! Data models for `FloodAid`
//!
//! - Location: a place name resolved to coordinates
//! - Weather: current observation and the pipeline's weather report
//! - Relief: relief center reference data

pub mod location;
pub mod relief;
pub mod weather;

pub use location::Location;
pub use relief::{CenterCategory, Coordinates, ReliefCenter};
pub use weather::{WeatherObservation, WeatherReport};
