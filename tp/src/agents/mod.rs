//! The six content stages invoked by the pipeline
//!
//! Each stage is a small, replaceable unit taking structured input and
//! returning structured output. Only the researcher touches the network
//! (through the `WikiApi` seam); everything else is pure.

mod checklist;
pub mod evaluator;
mod planner;
mod presenter;
mod researcher;
mod scheduler;

pub use checklist::ChecklistBuilder;
pub use planner::Planner;
pub use presenter::Presenter;
pub use researcher::{DEFAULT_MAX_RESULTS, Researcher};
pub use scheduler::{PLACEHOLDER_ACTIVITY, Scheduler};
