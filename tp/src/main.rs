//! Tripdraft CLI entry point

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};

use planstore::PlanStore;
use tripdraft::cli::{Cli, Command};
use tripdraft::{Budget, Config, Coordinates, Pipeline, TripRequest};

fn setup_logging(cli_log_level: Option<&str>) {
    let level = match cli_log_level.map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("WARN" | "WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) if other != "INFO" => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
        _ => tracing::Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_level.as_deref());

    let config = Config::load(cli.config.as_ref())?;

    match cli.command {
        Command::Plan {
            user_id,
            city,
            start_date,
            duration_days,
            pace,
            budget,
            lat,
            lon,
        } => {
            let weather_coordinates = match (lat, lon) {
                (Some(lat), Some(lon)) => Some(Coordinates { lat, lon }),
                (None, None) => None,
                _ => {
                    return Err(eyre::eyre!("--lat and --lon must be provided together"));
                }
            };
            let budget: Budget = budget.parse()?;

            let request = TripRequest {
                user_id,
                city,
                start_date,
                duration_days,
                pace,
                weather_coordinates,
                budget,
            };
            request.validate()?;

            let pipeline = Pipeline::from_config(&config)?;
            let record = pipeline
                .run(&request)
                .await
                .wrap_err("Itinerary run failed")?;

            println!(
                "{} {}",
                "✓".green().bold(),
                format!("Itinerary for {} ({} days)", request.city, request.duration_days)
            );
            println!("  Run: {}", record.run_id);
            println!(
                "  Artifact: {}",
                record.artifact_path.display().to_string().cyan()
            );
            println!(
                "  Score: {}/{} ({})",
                record.evaluation.score,
                record.evaluation.max,
                if record.passed {
                    "passed".green()
                } else {
                    "needs work".yellow()
                }
            );
            if let Some(note) = &record.plan.weather_note {
                println!("  Weather: {}", note);
            }
        }

        Command::History { user_id, limit } => {
            let store = PlanStore::open(&config.storage.db_path)?;
            let rows = store.fetch_last_itineraries(&user_id, limit)?;
            if rows.is_empty() {
                println!("No itineraries found for {}", user_id.bold());
            } else {
                println!("Recent itineraries for {}:", user_id.bold());
                for row in rows {
                    println!(
                        "  {} {} ({} days) -> {}",
                        row.start_date.cyan(),
                        row.city,
                        row.duration_days,
                        row.artifact_path
                    );
                }
            }
        }
    }

    Ok(())
}
