//! CLI argument parsing for the planstore inspection tool

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "planstore")]
#[command(author, version, about = "Inspect the tripdraft plan store", long_about = None)]
pub struct Cli {
    /// Path to the SQLite database
    #[arg(long)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the most recent itineraries for a user
    History {
        /// User to look up
        #[arg(required = true)]
        user_id: String,

        /// Maximum rows to return
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },

    /// Show telemetry spans recorded for a run
    Spans {
        /// Run id, e.g. "run-2026-09-01-Lisbon"
        #[arg(required = true)]
        run_id: String,
    },

    /// Create or update a user profile
    SetProfile {
        /// User to upsert
        #[arg(required = true)]
        user_id: String,

        /// Budget tier (low, mid, high)
        #[arg(long)]
        budget_tier: Option<String>,

        /// Pace preference (e.g. leisurely, balanced, packed)
        #[arg(long)]
        pace_preference: Option<String>,

        /// Focus hint appended to research queries
        #[arg(long)]
        must_avoid: Option<String>,
    },
}
