use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// --- Feed envelope ---

/// Response body of `GET /neo/rest/v1/feed`.
///
/// Objects are kept as raw JSON so that one malformed entry does not fail the
/// whole page; callers decode each one into [`RawNeo`] individually.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub element_count: Option<u64>,
    /// Date string (`YYYY-MM-DD`) to the objects approaching on that date.
    #[serde(default)]
    pub near_earth_objects: BTreeMap<String, Vec<serde_json::Value>>,
}

impl FeedResponse {
    /// True when the upstream returned no dates at all.
    pub fn is_empty(&self) -> bool {
        self.near_earth_objects.is_empty()
    }
}

// --- Per-object wire types ---

/// A single near-earth object as listed in the feed.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawNeo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub nasa_jpl_url: Option<String>,
    #[serde(default)]
    pub absolute_magnitude_h: Option<f64>,
    pub estimated_diameter: EstimatedDiameter,
    #[serde(default)]
    pub is_potentially_hazardous_asteroid: Option<bool>,
    pub close_approach_data: Vec<CloseApproach>,
}

/// Diameter ranges by unit. Only kilometres are consumed.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EstimatedDiameter {
    pub kilometers: DiameterRange,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct DiameterRange {
    pub estimated_diameter_min: f64,
    pub estimated_diameter_max: f64,
}

/// One close-approach observation. Numeric fields arrive as strings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CloseApproach {
    #[serde(default)]
    pub close_approach_date: Option<String>,
    #[serde(default)]
    pub close_approach_date_full: Option<String>,
    pub relative_velocity: RelativeVelocity,
    pub miss_distance: MissDistance,
    #[serde(default)]
    pub orbiting_body: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RelativeVelocity {
    pub kilometers_per_hour: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MissDistance {
    pub kilometers: String,
}
