use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use planstore::cli::{Cli, Command};
use planstore::{PlanStore, UserProfile, default_db_path};

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let db_path = cli.db.unwrap_or_else(default_db_path);

    info!("planstore starting");

    let store = PlanStore::open(&db_path)?;

    match cli.command {
        Command::History { user_id, limit } => {
            let rows = store.fetch_last_itineraries(&user_id, limit)?;
            if rows.is_empty() {
                println!("No itineraries found for {}", user_id.cyan());
            } else {
                for row in rows {
                    println!(
                        "{} {} ({} days) -> {}",
                        row.start_date.yellow(),
                        row.city.cyan(),
                        row.duration_days,
                        row.artifact_path
                    );
                }
            }
        }
        Command::Spans { run_id } => {
            let spans = store.spans_for_run(&run_id)?;
            if spans.is_empty() {
                println!("No spans found for {}", run_id.cyan());
            } else {
                for span in spans {
                    let status = match &span.error {
                        Some(err) => format!("error: {}", err).red(),
                        None => "ok".green(),
                    };
                    println!(
                        "{}/{} {}ms {}",
                        span.agent.cyan(),
                        span.tool,
                        span.latency_ms.to_string().dimmed(),
                        status
                    );
                }
            }
        }
        Command::SetProfile {
            user_id,
            budget_tier,
            pace_preference,
            must_avoid,
        } => {
            let profile = UserProfile {
                user_id: user_id.clone(),
                budget_tier,
                pace_preference,
                must_avoid,
            };
            store.upsert_user_profile(&profile)?;
            println!("{} Updated profile: {}", "✓".green(), user_id.cyan());
        }
    }

    Ok(())
}
