//! Sequential trip planning pipeline
//!
//! Runs the stages in a fixed order: profile lookup, skeleton planning,
//! POI research, schedule assembly, optional weather forecast, checklist,
//! rubric evaluation, Markdown rendering, and persistence. Every stage
//! that does IO or judgement runs inside a telemetry span.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use eyre::{Context, Result};
use tracing::{debug, info};

use planstore::PlanStore;

use crate::agents::{ChecklistBuilder, Planner, Presenter, Researcher, Scheduler, evaluator};
use crate::config::Config;
use crate::domain::{PlanSnapshot, RunRecord, TripRequest};
use crate::telemetry::Telemetry;
use crate::tools::{OpenMeteoClient, WeatherApi, WikiClient};

const RESEARCHER_AGENT: &str = "researcher";
const WEATHER_AGENT: &str = "weather";
const EVALUATOR_AGENT: &str = "evaluator";
const PRESENTER_AGENT: &str = "presenter";

/// Orchestrates one itinerary run end to end
pub struct Pipeline {
    planner: Planner,
    researcher: Researcher,
    scheduler: Scheduler,
    checklist: ChecklistBuilder,
    presenter: Presenter,
    weather: Arc<dyn WeatherApi>,
    db_path: PathBuf,
    telemetry: Telemetry,
}

impl Pipeline {
    /// Assemble a pipeline with injected lookup seams
    pub fn new(
        researcher: Researcher,
        weather: Arc<dyn WeatherApi>,
        presenter: Presenter,
        db_path: impl Into<PathBuf>,
    ) -> Self {
        let db_path = db_path.into();
        Self {
            planner: Planner,
            researcher,
            scheduler: Scheduler,
            checklist: ChecklistBuilder,
            presenter,
            weather,
            telemetry: Telemetry::new(&db_path),
            db_path,
        }
    }

    /// Assemble a pipeline against the real Wikipedia and Open-Meteo APIs
    pub fn from_config(config: &Config) -> Result<Self> {
        let timeout: Duration = config.http.timeout();
        let wiki = WikiClient::new(
            config.research.wiki_base_url.clone(),
            timeout,
            &config.http.user_agent,
        );
        let weather = OpenMeteoClient::new(
            config.weather.base_url.clone(),
            timeout,
            &config.http.user_agent,
        );
        let researcher =
            Researcher::new(Arc::new(wiki)).with_max_results(config.research.max_results);
        let presenter = Presenter::new(&config.output.dir)?;

        Ok(Self::new(
            researcher,
            Arc::new(weather),
            presenter,
            &config.storage.db_path,
        ))
    }

    /// Run the full pipeline for one request
    ///
    /// The run id is derived from the start date and city, so re-planning
    /// the same trip reuses the same id and its spans accumulate.
    pub async fn run(&self, request: &TripRequest) -> Result<RunRecord> {
        let run_id = format!(
            "run-{}-{}",
            request.start_date,
            request.city.replace(' ', "_")
        );
        info!(%run_id, user_id = %request.user_id, city = %request.city, "starting run");

        let profile = {
            let store = PlanStore::open(&self.db_path)?;
            store.get_user_profile(&request.user_id)?
        };
        let effective_pace = profile
            .as_ref()
            .and_then(|p| p.pace_preference.as_deref())
            .unwrap_or(&request.pace);
        let focus = profile.as_ref().and_then(|p| p.must_avoid.as_deref());

        let skeleton = self.planner.plan(
            &request.city,
            request.start_date,
            request.duration_days,
            effective_pace,
        );
        debug!(days = skeleton.days.len(), "skeleton planned");

        let pois = self
            .telemetry
            .record(Some(&run_id), RESEARCHER_AGENT, "wiki", async {
                self.researcher.research(&request.city, focus).await
            })
            .await?;

        let schedule = self.scheduler.assign(&skeleton, &pois);

        let weather = match request.weather_coordinates {
            Some(coords) => Some(
                self.telemetry
                    .record(Some(&run_id), WEATHER_AGENT, "open-meteo", async {
                        Ok(self
                            .weather
                            .forecast(coords.lat, coords.lon, request.start_date)
                            .await)
                    })
                    .await?,
            ),
            None => None,
        };
        let weather_note = weather.as_ref().and_then(|summary| summary.note());

        let checklist = self.checklist.build(&schedule.schedule, weather.as_ref());

        let plan = PlanSnapshot {
            schedule: schedule.schedule,
            stops: schedule.stops,
            weather_note,
            budget: request.budget,
            checklist,
        };

        let evaluation = self
            .telemetry
            .record_sync(Some(&run_id), EVALUATOR_AGENT, "rule-rubric", || {
                Ok(evaluator::evaluate(&plan))
            })?;
        let passed = evaluation.passed();
        info!(score = evaluation.score, max = evaluation.max, passed, "plan evaluated");

        let filename = format!(
            "{}_{}.md",
            request.start_date,
            request.city.replace(' ', "_").to_lowercase()
        );
        let artifact_path = self
            .telemetry
            .record_sync(Some(&run_id), PRESENTER_AGENT, "md_export", || {
                self.presenter.present(
                    &filename,
                    &plan.schedule,
                    &plan.stops,
                    &plan.checklist,
                    plan.weather_note.as_deref(),
                )
            })?;

        let store = PlanStore::open(&self.db_path)?;
        store
            .record_itinerary(
                &request.user_id,
                &request.city,
                &request.start_date.to_string(),
                request.duration_days,
                &artifact_path.to_string_lossy(),
            )
            .wrap_err("Failed to record itinerary")?;

        info!(%run_id, artifact = %artifact_path.display(), "run complete");
        Ok(RunRecord {
            run_id,
            plan,
            evaluation,
            artifact_path,
            profile,
            passed,
        })
    }
}
