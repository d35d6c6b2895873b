//! Project constants and the exported project snapshot

use crate::Season;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

#[cfg(feature = "typescript")]
use tsify::Tsify;

pub const PROJECT_NAME: &str = "Urban Heat Island Mitigation Analysis";
pub const PROJECT_LOCATION: &str = "Vancouver Region";
/// Dissemination areas in the study region
pub const STUDY_AREA_COUNT: u32 = 1660;
/// Environmental features used by the model
pub const FEATURE_COUNT: u32 = 8;

/// Static project information captured for export.
///
/// This is a snapshot of the selected season plus fixed constants; it does
/// not query any dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(Tsify))]
pub struct ProjectSnapshot {
    pub season: Season,
    #[serde(serialize_with = "iso_millis")]
    #[cfg_attr(feature = "typescript", tsify(type = "string"))]
    pub timestamp: DateTime<Utc>,
    pub project: String,
    pub location: String,
    pub areas: u32,
    pub features: u32,
}

impl ProjectSnapshot {
    pub fn capture(season: Season, now: DateTime<Utc>) -> Self {
        Self {
            season,
            timestamp: now,
            project: PROJECT_NAME.to_string(),
            location: PROJECT_LOCATION.to_string(),
            areas: STUDY_AREA_COUNT,
            features: FEATURE_COUNT,
        }
    }

    /// `urban_heat_island_info_<SEASON>_<YYYY-MM-DD>.json`
    pub fn file_name(&self) -> String {
        format!(
            "urban_heat_island_info_{}_{}.json",
            self.season.code(),
            self.timestamp.format("%Y-%m-%d")
        )
    }

    /// JSON body with two-space indentation
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix
fn iso_millis<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}
