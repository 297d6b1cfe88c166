//! Facilities and per-facility lookup results.

use serde::{Deserialize, Serialize};

use crate::intervals::IntervalSet;
use crate::schedule::Schedule;

/// A facility listed in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facility {
    pub name: String,
    /// Absolute URL of the facility's detail page.
    pub source_id: String,
}

impl Facility {
    pub fn new(name: impl Into<String>, source_id: impl Into<String>) -> Self {
        Self { name: name.into(), source_id: source_id.into() }
    }

    /// Case-insensitive substring match on the name.
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.trim().to_lowercase())
    }
}

/// What the per-facility cache stores: the raw intervals, not a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityRecord {
    pub name: String,
    pub intervals: IntervalSet,
}

/// Result of a schedule request.
///
/// `Unavailable` means no data could be obtained. A facility that is closed
/// every day of the week is still `Available`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScheduleLookup {
    Available { name: String, source_id: String, schedule: Schedule },
    Unavailable { source_id: String, reason: String },
}

impl ScheduleLookup {
    pub fn is_available(&self) -> bool {
        matches!(self, ScheduleLookup::Available { .. })
    }

    pub fn schedule(&self) -> Option<&Schedule> {
        match self {
            ScheduleLookup::Available { schedule, .. } => Some(schedule),
            ScheduleLookup::Unavailable { .. } => None,
        }
    }
}
