//! Domain types for planning runs
//!
//! - [`request`] - immutable run input and its validation
//! - [`plan`] - skeleton, schedule, weather, checklist, and run result types
//! - [`evaluation`] - rubric result with the derived pass threshold

mod evaluation;
mod plan;
mod request;

pub use evaluation::EvaluationResult;
pub use plan::{
    Checklist, PlanSnapshot, PointOfInterest, RunRecord, ScheduleResult, ScheduledDay,
    ScheduledSegment, Skeleton, SkeletonDay, SkeletonSegment, Slot, WeatherSummary,
};
pub use request::{Budget, Coordinates, RequestError, TripRequest};
