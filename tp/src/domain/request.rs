//! TripRequest - immutable input to a planning run

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors in the caller-supplied request, rejected before the pipeline runs
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("user_id must not be empty")]
    EmptyUserId,

    #[error("city must not be empty")]
    EmptyCity,

    #[error("duration_days must be at least 1")]
    ZeroDuration,

    #[error("unknown budget tier '{0}' (expected low, mid, or high)")]
    UnknownBudget(String),
}

/// Budget tier attached to a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Budget {
    Low,
    #[default]
    Mid,
    High,
}

impl std::str::FromStr for Budget {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "mid" => Ok(Self::Mid),
            "high" => Ok(Self::High),
            other => Err(RequestError::UnknownBudget(other.to_string())),
        }
    }
}

impl std::fmt::Display for Budget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Mid => write!(f, "mid"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Coordinates for the weather lookup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Immutable input to one planning run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequest {
    pub user_id: String,
    pub city: String,
    /// First day of the trip
    pub start_date: NaiveDate,
    pub duration_days: u32,
    /// Desired pace (e.g. "leisurely", "balanced", "packed"); a stored
    /// profile preference overrides this at run time
    pub pace: String,
    /// When absent the weather stage is skipped entirely
    pub weather_coordinates: Option<Coordinates>,
    pub budget: Budget,
}

impl TripRequest {
    /// Reject malformed input before the pipeline runs
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.user_id.trim().is_empty() {
            return Err(RequestError::EmptyUserId);
        }
        if self.city.trim().is_empty() {
            return Err(RequestError::EmptyCity);
        }
        if self.duration_days == 0 {
            return Err(RequestError::ZeroDuration);
        }
        Ok(())
    }
}
