//! Canned answers to free-text help requests
//!
//! Keyword groups are checked in the order of [`Topic::ALL`]; the first group
//! with any keyword occurring as a substring of the lower-cased question
//! wins. Anything else gets the emergency contacts.

use serde::{Deserialize, Serialize};

/// Advisory returned when no keyword group matches
pub const DEFAULT_ADVISORY: &str =
    "📞 NDMA: 1-800-NDMA-911 | Rescue: 1122. Call for any emergency.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Food,
    Water,
    Medical,
    Shelter,
    Relief,
    Flood,
}

impl Topic {
    /// Matching priority, highest first.
    ///
    /// Keywords match as raw substrings, so `eat` also hits "weather" and
    /// "great": "Is the weather dangerous?" gets the food advisory because
    /// Food outranks Flood.
    pub const ALL: [Topic; 6] = [
        Topic::Relief,
        Topic::Food,
        Topic::Medical,
        Topic::Shelter,
        Topic::Water,
        Topic::Flood,
    ];

    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Food => &["food", "eat", "hunger"],
            Self::Water => &["water", "drink"],
            Self::Medical => &["medical", "hospital", "doctor", "sick"],
            Self::Shelter => &["shelter", "stay", "home"],
            Self::Relief => &["relief", "camp"],
            Self::Flood => &["flood", "danger", "risk"],
        }
    }

    #[must_use]
    pub const fn advisory(self) -> &'static str {
        match self {
            Self::Food => "Food distribution at relief centers. Visit the nearest center.",
            Self::Water => "Safe water is being distributed at relief centers. Boil water if none is available.",
            Self::Medical => "Medical facilities are listed for each city. Call 1122 for an ambulance.",
            Self::Shelter => "Emergency shelters are open 24/7. Go to the nearest relief camp.",
            Self::Relief => "Relief camps are available. Check the map. Call NDMA: 1-800-NDMA-911.",
            Self::Flood => "Check the flood alerts for your city. Move to higher ground if water is rising.",
        }
    }

    fn matches(self, lowered: &str) -> bool {
        self.keywords().iter().any(|keyword| lowered.contains(keyword))
    }
}

/// First topic whose keywords appear in `question`
#[must_use]
pub fn match_topic(question: &str) -> Option<Topic> {
    let lowered = question.to_lowercase();
    Topic::ALL.into_iter().find(|topic| topic.matches(&lowered))
}

/// Advisory for `question`. Total: always returns a non-empty string.
#[must_use]
pub fn respond(question: &str) -> &'static str {
    match_topic(question).map_or(DEFAULT_ADVISORY, Topic::advisory)
}
