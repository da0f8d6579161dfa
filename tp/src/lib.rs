//! Tripdraft - multi-day trip itinerary drafting pipeline
//!
//! Tripdraft chains six replaceable stages into one planning run: skeleton
//! planning, point-of-interest research (fanned out concurrently over wiki
//! lookups), schedule assembly, weather-aware checklist generation,
//! rule-based evaluation, and Markdown rendering. Every remote-facing stage
//! is wrapped in a telemetry span, and results persist to a SQLite store
//! shared with the `planstore` crate.
//!
//! # Core Concepts
//!
//! - **One run, one record**: `Pipeline::run` turns a `TripRequest` into a
//!   `RunRecord`, threading partial data (missing weather, short POI lists)
//!   through without failing the run
//! - **Spans always land**: a stage error is recorded in its span before it
//!   propagates to the caller
//! - **Collaborators absorb transport failures**: wiki and weather clients
//!   return deterministic fallbacks instead of raising
//!
//! # Modules
//!
//! - [`domain`] - request, plan, and evaluation types
//! - [`agents`] - the six content stages
//! - [`tools`] - wiki/weather lookups, clustering, artifact export
//! - [`telemetry`] - span recording around stage invocations
//! - [`pipeline`] - the orchestration core
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod agents;
pub mod cli;
pub mod config;
pub mod domain;
pub mod pipeline;
pub mod telemetry;
pub mod tools;

// Re-export commonly used types
pub use agents::{ChecklistBuilder, Planner, Presenter, Researcher, Scheduler, evaluator};
pub use config::Config;
pub use domain::{
    Budget, Checklist, Coordinates, EvaluationResult, PlanSnapshot, PointOfInterest,
    RequestError, RunRecord, ScheduleResult, ScheduledDay, ScheduledSegment, Skeleton,
    SkeletonDay, SkeletonSegment, Slot, TripRequest, WeatherSummary,
};
pub use pipeline::Pipeline;
pub use telemetry::Telemetry;
pub use tools::{OpenMeteoClient, SearchHit, WeatherApi, WikiApi, WikiClient, WikiPage};
