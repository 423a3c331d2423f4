//! Static relief center directory
//!
//! Reference data built once on first use and never mutated. Cities form a
//! closed set; anything outside it is rejected at parse time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::FloodAidError;
use crate::models::{CenterCategory, Coordinates, ReliefCenter};

/// National Disaster Management Authority helpline
pub const NDMA_HELPLINE: &str = "1-800-NDMA-911";
/// Rescue / ambulance number
pub const RESCUE_HELPLINE: &str = "1122";

/// Default zoom level for a city map
pub const MAP_ZOOM: u8 = 12;

static DIRECTORY: LazyLock<ReliefDirectory> = LazyLock::new(ReliefDirectory::builtin);

/// The process-wide relief center directory
#[must_use]
pub fn directory() -> &'static ReliefDirectory {
    &DIRECTORY
}

/// Cities covered by the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    Peshawar,
    Lahore,
    Karachi,
}

impl City {
    /// Display order
    pub const ALL: [City; 3] = [City::Peshawar, City::Lahore, City::Karachi];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Peshawar => "Peshawar",
            Self::Lahore => "Lahore",
            Self::Karachi => "Karachi",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = FloodAidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        City::ALL
            .into_iter()
            .find(|city| city.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                FloodAidError::validation(format!(
                    "'{wanted}' is not a covered city. Choose one of: {}",
                    City::ALL.map(City::name).join(", ")
                ))
            })
    }
}

/// One marker on a city map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub color: &'static str,
    pub popup: String,
}

/// Data for the interactive map layer of one city
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub city: City,
    /// Centroid of the located centers
    pub center: Option<Coordinates>,
    pub zoom: u8,
    pub markers: Vec<MapMarker>,
}

#[derive(Debug)]
pub struct ReliefDirectory {
    entries: Vec<(City, Vec<ReliefCenter>)>,
}

impl ReliefDirectory {
    /// Build a directory from explicit entries. Cities appear in the given order.
    #[must_use]
    pub fn new(entries: Vec<(City, Vec<ReliefCenter>)>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn cities(&self) -> Vec<City> {
        self.entries.iter().map(|(city, _)| *city).collect()
    }

    /// Centers for `city`; empty if the directory has none
    #[must_use]
    pub fn centers(&self, city: City) -> &[ReliefCenter] {
        self.entries
            .iter()
            .find(|(c, _)| *c == city)
            .map(|(_, centers)| centers.as_slice())
            .unwrap_or(&[])
    }

    #[must_use]
    pub fn total_centers(&self) -> usize {
        self.entries.iter().map(|(_, centers)| centers.len()).sum()
    }

    /// Markers and centroid for the city's located centers
    #[must_use]
    pub fn map_view(&self, city: City) -> MapView {
        let markers: Vec<MapMarker> = self
            .centers(city)
            .iter()
            .filter_map(|center| {
                center.coordinates.map(|coords| MapMarker {
                    name: center.name.clone(),
                    latitude: coords.latitude,
                    longitude: coords.longitude,
                    color: center.category.marker_color(),
                    popup: format!(
                        "{}\nType: {}\nContact: {}",
                        center.name, center.category, center.contact
                    ),
                })
            })
            .collect();

        let center = (!markers.is_empty()).then(|| {
            let count = markers.len() as f64;
            Coordinates {
                latitude: markers.iter().map(|m| m.latitude).sum::<f64>() / count,
                longitude: markers.iter().map(|m| m.longitude).sum::<f64>() / count,
            }
        });

        MapView {
            city,
            center,
            zoom: MAP_ZOOM,
            markers,
        }
    }

    fn builtin() -> Self {
        Self::new(vec![
            (
                City::Peshawar,
                vec![
                    center("Peshawar Relief Camp A", CenterCategory::Shelter, "0300-123-4567", (34.0151, 71.5249), 500),
                    center("Lady Reading Hospital", CenterCategory::Medical, "091-9210-261", (34.0056, 71.5194), 200),
                    center("Food Distribution Center", CenterCategory::FoodWater, "0300-456-7890", (34.0200, 71.5300), 1000),
                ],
            ),
            (
                City::Lahore,
                vec![
                    center("Lahore Relief Camp", CenterCategory::Shelter, "0300-111-2222", (31.5204, 74.3587), 800),
                    center("Mayo Hospital", CenterCategory::Medical, "042-9230-5000", (31.5582, 74.3137), 300),
                ],
            ),
            (
                City::Karachi,
                vec![
                    center("Karachi Emergency Shelter", CenterCategory::Shelter, "0300-555-6666", (24.8607, 67.0011), 1200),
                    center("JPMC Hospital", CenterCategory::Medical, "021-9926-1300", (24.9643, 67.0802), 400),
                ],
            ),
        ])
    }
}

fn center(
    name: &str,
    category: CenterCategory,
    contact: &str,
    (latitude, longitude): (f64, f64),
    capacity: u32,
) -> ReliefCenter {
    ReliefCenter {
        name: name.to_string(),
        category,
        contact: contact.to_string(),
        coordinates: Some(Coordinates { latitude, longitude }),
        capacity: Some(capacity),
    }
}
