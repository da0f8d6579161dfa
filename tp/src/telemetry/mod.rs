//! Telemetry span recording around stage invocations
//!
//! Every wrapped operation appends exactly one row to the `telemetry`
//! table, success or failure, before its error (if any) propagates to the
//! caller. Each write opens its own store connection, so spans from
//! concurrent runs interleave safely at the row level.

use std::future::Future;
use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use eyre::Result;
use tracing::{debug, warn};
use uuid::Uuid;

use planstore::{PlanStore, SpanRow};

/// Current unix timestamp in milliseconds
fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Records one span row per wrapped stage invocation
#[derive(Debug, Clone)]
pub struct Telemetry {
    db_path: PathBuf,
}

impl Telemetry {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Wrap an async stage invocation in a span.
    ///
    /// The row is written after the future settles, whatever the outcome,
    /// and the original error is re-surfaced unchanged. A missing `run_id`
    /// gets a random identifier.
    pub async fn record<T, F>(
        &self,
        run_id: Option<&str>,
        agent: &str,
        tool: &str,
        op: F,
    ) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let start_ts = now_ms();
        let started = Instant::now();
        let result = op.await;
        self.finish(run_id, agent, tool, start_ts, started, result)
    }

    /// Wrap a synchronous stage invocation in a span
    pub fn record_sync<T, F>(
        &self,
        run_id: Option<&str>,
        agent: &str,
        tool: &str,
        op: F,
    ) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let start_ts = now_ms();
        let started = Instant::now();
        let result = op();
        self.finish(run_id, agent, tool, start_ts, started, result)
    }

    fn finish<T>(
        &self,
        run_id: Option<&str>,
        agent: &str,
        tool: &str,
        start_ts: i64,
        started: Instant,
        result: Result<T>,
    ) -> Result<T> {
        let row = SpanRow {
            run_id: run_id
                .map(str::to_string)
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            agent: agent.to_string(),
            tool: tool.to_string(),
            start_ts,
            end_ts: now_ms(),
            latency_ms: started.elapsed().as_millis() as i64,
            error: result.as_ref().err().map(|e| e.to_string()),
        };
        debug!(
            run_id = %row.run_id,
            agent,
            tool,
            latency_ms = row.latency_ms,
            ok = row.error.is_none(),
            "recording span"
        );

        let write = PlanStore::open(&self.db_path).and_then(|store| store.record_span(&row));
        match (result, write) {
            (Ok(value), Ok(())) => Ok(value),
            // Storage errors are pipeline-fatal on the success path
            (Ok(_), Err(write_err)) => Err(write_err),
            (Err(stage_err), Ok(())) => Err(stage_err),
            // The stage error must not be masked by a failing span write
            (Err(stage_err), Err(write_err)) => {
                warn!(%write_err, "span write failed while recording a stage error");
                Err(stage_err)
            }
        }
    }
}
