//! Plan types: skeleton, schedule, weather, checklist, and the run result

use std::path::PathBuf;

use chrono::NaiveDate;
use planstore::UserProfile;
use serde::{Deserialize, Serialize};

use super::{Budget, EvaluationResult};

/// A time-of-day slot within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Morning,
    Afternoon,
    Evening,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Morning, Slot::Afternoon, Slot::Evening];

    /// Title-cased label for rendering
    pub fn title(&self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Morning => write!(f, "morning"),
            Self::Afternoon => write!(f, "afternoon"),
            Self::Evening => write!(f, "evening"),
        }
    }
}

/// An empty segment in the skeleton, before POIs are assigned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkeletonSegment {
    pub slot: Slot,
    pub notes: Vec<String>,
}

/// One day of the skeleton
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkeletonDay {
    pub date: NaiveDate,
    pub city: String,
    pub pace: String,
    pub segments: Vec<SkeletonSegment>,
}

/// The empty day/segment structure produced fresh per run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skeleton {
    pub city: String,
    pub days: Vec<SkeletonDay>,
}

/// A named place with a summary and source citation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub title: String,
    pub summary: String,
    /// Reference/citation URL
    pub source: String,
}

/// A segment with its assigned activity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledSegment {
    pub slot: Slot,
    /// Always present; placeholder when no POI remained
    pub activity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// One populated day of the schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledDay {
    pub date: NaiveDate,
    pub city: String,
    pub segments: Vec<ScheduledSegment>,
}

/// Output of the scheduling stage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub schedule: Vec<ScheduledDay>,
    /// POIs actually placed into a segment, in placement order
    pub stops: Vec<PointOfInterest>,
}

/// Daily forecast arrays as returned by the weather provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    #[serde(default)]
    pub temperature_2m_max: Vec<f64>,
    #[serde(default)]
    pub temperature_2m_min: Vec<f64>,
    #[serde(default)]
    pub precipitation_probability_max: Vec<i64>,
}

impl WeatherSummary {
    /// Deterministic summary returned when the provider is unreachable
    pub fn fallback() -> Self {
        Self {
            temperature_2m_max: vec![24.0],
            temperature_2m_min: vec![18.0],
            precipitation_probability_max: vec![20],
        }
    }

    /// One-line human-readable note. Temperatures come from the first index
    /// (a single-date request returns single-element arrays); precipitation
    /// is the maximum over the array.
    pub fn note(&self) -> Option<String> {
        let high = self.temperature_2m_max.first()?;
        let low = self.temperature_2m_min.first()?;
        let precip = self
            .precipitation_probability_max
            .iter()
            .copied()
            .max()
            .unwrap_or(0);
        Some(format!(
            "Chance of precipitation: {precip}% | Temps: {low}°C – {high}°C"
        ))
    }
}

/// Packing and preparation lists
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Checklist {
    /// Deduplicated and sorted
    pub packing: Vec<String>,
    pub tasks: Vec<String>,
}

/// Everything the evaluator and presenter see about one drafted plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSnapshot {
    pub schedule: Vec<ScheduledDay>,
    pub stops: Vec<PointOfInterest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_note: Option<String>,
    pub budget: Budget,
    pub checklist: Checklist,
}

/// In-memory result of one pipeline execution
#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    /// Derived from start_date and city; same-day same-city reruns share it
    pub run_id: String,
    pub plan: PlanSnapshot,
    pub evaluation: EvaluationResult,
    pub artifact_path: PathBuf,
    pub profile: Option<UserProfile>,
    pub passed: bool,
}
