//! Relief center reference data types

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a relief center provides
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CenterCategory {
    Shelter,
    Medical,
    #[serde(rename = "Food/Water")]
    FoodWater,
}

impl CenterCategory {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Shelter => "Shelter",
            Self::Medical => "Medical",
            Self::FoodWater => "Food/Water",
        }
    }

    /// Marker colour used on the map layer
    #[must_use]
    pub const fn marker_color(self) -> &'static str {
        match self {
            Self::Shelter => "blue",
            Self::Medical => "red",
            Self::FoodWater => "green",
        }
    }
}

impl fmt::Display for CenterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A shelter, hospital or distribution point
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReliefCenter {
    pub name: String,
    pub category: CenterCategory,
    pub contact: String,
    pub coordinates: Option<Coordinates>,
    /// Number of people the center can take in
    pub capacity: Option<u32>,
}

impl fmt::Display for ReliefCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "• {} ({}) - Contact: {}", self.name, self.category, self.contact)?;
        if let Some(capacity) = self.capacity {
            write!(f, " - Capacity: {capacity}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_with_slash() {
        let json = serde_json::to_string(&CenterCategory::FoodWater).unwrap();
        assert_eq!(json, "\"Food/Water\"");
        let back: CenterCategory = serde_json::from_str("\"Food/Water\"").unwrap();
        assert_eq!(back, CenterCategory::FoodWater);
    }

    #[test]
    fn test_center_display() {
        let center = ReliefCenter {
            name: "Mayo Hospital".into(),
            category: CenterCategory::Medical,
            contact: "042-9230-5000".into(),
            coordinates: None,
            capacity: Some(300),
        };
        assert_eq!(
            center.to_string(),
            "• Mayo Hospital (Medical) - Contact: 042-9230-5000 - Capacity: 300"
        );
    }
}
