//! CLI command definitions and subcommands

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Tripdraft - multi-day itinerary planner
#[derive(Parser)]
#[command(name = "tp", about = "Research, schedule and render multi-day trip itineraries")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Plan an itinerary and render it to Markdown
    Plan {
        /// User the plan belongs to
        #[arg(long)]
        user_id: String,

        /// Destination city
        #[arg(long)]
        city: String,

        /// First day of the trip (YYYY-MM-DD)
        #[arg(long)]
        start_date: NaiveDate,

        /// Trip length in days
        #[arg(long, default_value_t = 1)]
        duration_days: u32,

        /// Requested pace, overridden by a stored profile preference
        #[arg(long, default_value = "balanced")]
        pace: String,

        /// Budget tier (low, mid, high)
        #[arg(long, default_value = "mid")]
        budget: String,

        /// Latitude for the weather forecast
        #[arg(long)]
        lat: Option<f64>,

        /// Longitude for the weather forecast
        #[arg(long)]
        lon: Option<f64>,
    },

    /// Show the most recent itineraries for a user
    History {
        /// User to look up
        #[arg(long)]
        user_id: String,

        /// Maximum rows to show
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
}
