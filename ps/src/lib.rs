//! PlanStore - durable storage for the trip planning pipeline
//!
//! Three tables back the pipeline: `users` (upsert keyed by user_id),
//! `itineraries` (append-only history of rendered plans), and `telemetry`
//! (append-only span rows, one per wrapped stage invocation). Schema is
//! applied idempotently on every open, so callers can treat `open` as
//! "open or create" and concurrent runs can each hold their own connection.

pub mod cli;
mod store;

pub use store::{ItineraryRow, PlanStore, SpanRow, UserProfile};

use std::path::PathBuf;

/// Default database location: `~/.local/share/tripdraft/tripdraft.sqlite`
pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tripdraft")
        .join("tripdraft.sqlite")
}
