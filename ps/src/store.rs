//! Core PlanStore implementation

use std::fs;
use std::path::Path;

use eyre::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A traveller profile, owned by the store and read at run start
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique key
    pub user_id: String,
    /// Preferred budget tier ("low" | "mid" | "high")
    pub budget_tier: Option<String>,
    /// Preferred pace; overrides the request pace when present
    pub pace_preference: Option<String>,
    /// Free-text focus hint appended to the research query
    pub must_avoid: Option<String>,
}

impl UserProfile {
    /// Create an empty profile for a user
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Default::default()
        }
    }
}

/// One row of itinerary history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryRow {
    pub city: String,
    /// First day of the trip (ISO date)
    pub start_date: String,
    pub duration_days: u32,
    pub artifact_path: String,
}

/// One telemetry span: a timed, named record of a stage's execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanRow {
    pub run_id: String,
    /// Stage name, e.g. "researcher"
    pub agent: String,
    /// Tool name, e.g. "wiki"
    pub tool: String,
    /// Start timestamp (unix ms)
    pub start_ts: i64,
    /// End timestamp (unix ms)
    pub end_ts: i64,
    pub latency_ms: i64,
    /// Error message when the wrapped operation failed
    pub error: Option<String>,
}

/// SQLite-backed store for profiles, itinerary history, and telemetry
pub struct PlanStore {
    conn: Connection,
}

impl PlanStore {
    /// Open (or create) the store at the given path, applying the schema
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).wrap_err("Failed to create store directory")?;
        }
        let conn = Connection::open(path)
            .wrap_err_with(|| format!("Failed to open database: {}", path.display()))?;
        let store = Self { conn };
        store.init_schema()?;
        debug!(path = %path.display(), "Opened plan store");
        Ok(store)
    }

    /// Open an in-memory store (tests)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Apply the schema. Safe to run against an already-initialized store.
    pub fn init_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS users (
                    user_id TEXT PRIMARY KEY,
                    budget_tier TEXT,
                    pace_preference TEXT,
                    must_avoid TEXT
                );

                CREATE TABLE IF NOT EXISTS itineraries (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    user_id TEXT NOT NULL,
                    city TEXT NOT NULL,
                    start_date TEXT NOT NULL,
                    duration_days INTEGER NOT NULL,
                    artifact_path TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS telemetry (
                    run_id TEXT NOT NULL,
                    agent TEXT NOT NULL,
                    tool TEXT NOT NULL,
                    start_ts INTEGER NOT NULL,
                    end_ts INTEGER NOT NULL,
                    latency_ms INTEGER NOT NULL,
                    error TEXT
                );

                CREATE INDEX IF NOT EXISTS idx_itineraries_user ON itineraries(user_id, id DESC);
                CREATE INDEX IF NOT EXISTS idx_telemetry_run ON telemetry(run_id);
                "#,
            )
            .wrap_err("Failed to apply schema")?;
        Ok(())
    }

    /// Fetch a profile, or `None` when the user is unknown
    pub fn get_user_profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        let profile = self
            .conn
            .query_row(
                "SELECT user_id, budget_tier, pace_preference, must_avoid FROM users WHERE user_id = ?1",
                params![user_id],
                |row| {
                    Ok(UserProfile {
                        user_id: row.get(0)?,
                        budget_tier: row.get(1)?,
                        pace_preference: row.get(2)?,
                        must_avoid: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(profile)
    }

    /// Insert or replace a profile. Concurrent writers are last-write-wins.
    pub fn upsert_user_profile(&self, profile: &UserProfile) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO users(user_id, budget_tier, pace_preference, must_avoid)
            VALUES(?1, ?2, ?3, ?4)
            ON CONFLICT(user_id) DO UPDATE SET
                budget_tier = excluded.budget_tier,
                pace_preference = excluded.pace_preference,
                must_avoid = excluded.must_avoid
            "#,
            params![
                profile.user_id,
                profile.budget_tier,
                profile.pace_preference,
                profile.must_avoid
            ],
        )?;
        debug!(user_id = %profile.user_id, "Upserted user profile");
        Ok(())
    }

    /// Append one itinerary history row
    pub fn record_itinerary(
        &self,
        user_id: &str,
        city: &str,
        start_date: &str,
        duration_days: u32,
        artifact_path: &str,
    ) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO itineraries(user_id, city, start_date, duration_days, artifact_path)
            VALUES(?1, ?2, ?3, ?4, ?5)
            "#,
            params![user_id, city, start_date, duration_days, artifact_path],
        )?;
        debug!(user_id, city, start_date, "Recorded itinerary");
        Ok(())
    }

    /// Most recent itineraries for a user, newest first
    pub fn fetch_last_itineraries(&self, user_id: &str, limit: usize) -> Result<Vec<ItineraryRow>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT city, start_date, duration_days, artifact_path
            FROM itineraries
            WHERE user_id = ?1
            ORDER BY id DESC
            LIMIT ?2
            "#,
        )?;
        let rows = stmt
            .query_map(params![user_id, limit as i64], |row| {
                Ok(ItineraryRow {
                    city: row.get(0)?,
                    start_date: row.get(1)?,
                    duration_days: row.get(2)?,
                    artifact_path: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Append one telemetry span row
    pub fn record_span(&self, span: &SpanRow) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO telemetry(run_id, agent, tool, start_ts, end_ts, latency_ms, error)
            VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                span.run_id,
                span.agent,
                span.tool,
                span.start_ts,
                span.end_ts,
                span.latency_ms,
                span.error
            ],
        )?;
        Ok(())
    }

    /// All spans recorded for a run, in insertion order
    pub fn spans_for_run(&self, run_id: &str) -> Result<Vec<SpanRow>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT run_id, agent, tool, start_ts, end_ts, latency_ms, error
            FROM telemetry
            WHERE run_id = ?1
            ORDER BY rowid
            "#,
        )?;
        let rows = stmt
            .query_map(params![run_id], |row| {
                Ok(SpanRow {
                    run_id: row.get(0)?,
                    agent: row.get(1)?,
                    tool: row.get(2)?,
                    start_ts: row.get(3)?,
                    end_ts: row.get(4)?,
                    latency_ms: row.get(5)?,
                    error: row.get(6)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Count itinerary rows (used by schema-idempotency checks)
    pub fn itinerary_count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM itineraries", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_span(run_id: &str, agent: &str, error: Option<&str>) -> SpanRow {
        SpanRow {
            run_id: run_id.to_string(),
            agent: agent.to_string(),
            tool: "wiki".to_string(),
            start_ts: 1_000,
            end_ts: 1_250,
            latency_ms: 250,
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn test_missing_profile_is_none() {
        let store = PlanStore::open_in_memory().unwrap();
        assert!(store.get_user_profile("nobody").unwrap().is_none());
    }

    #[test]
    fn test_profile_upsert_is_last_write_wins() {
        let store = PlanStore::open_in_memory().unwrap();

        let mut profile = UserProfile::new("ada");
        profile.pace_preference = Some("leisurely".to_string());
        store.upsert_user_profile(&profile).unwrap();

        profile.pace_preference = Some("packed".to_string());
        profile.must_avoid = Some("crowds".to_string());
        store.upsert_user_profile(&profile).unwrap();

        let fetched = store.get_user_profile("ada").unwrap().unwrap();
        assert_eq!(fetched.pace_preference.as_deref(), Some("packed"));
        assert_eq!(fetched.must_avoid.as_deref(), Some("crowds"));
        assert!(fetched.budget_tier.is_none());
    }

    #[test]
    fn test_itinerary_roundtrip_newest_first() {
        let store = PlanStore::open_in_memory().unwrap();
        store
            .record_itinerary("ada", "Lisbon", "2026-09-01", 2, "plans/a.md")
            .unwrap();
        store
            .record_itinerary("ada", "Porto", "2026-09-10", 3, "plans/b.md")
            .unwrap();
        store
            .record_itinerary("grace", "Oslo", "2026-09-12", 1, "plans/c.md")
            .unwrap();

        let rows = store.fetch_last_itineraries("ada", 5).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].city, "Porto");
        assert_eq!(rows[1].city, "Lisbon");

        let limited = store.fetch_last_itineraries("ada", 1).unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].artifact_path, "plans/b.md");
    }

    #[test]
    fn test_span_roundtrip() {
        let store = PlanStore::open_in_memory().unwrap();
        store
            .record_span(&sample_span("run-1", "researcher", None))
            .unwrap();
        store
            .record_span(&sample_span("run-1", "presenter", Some("disk full")))
            .unwrap();
        store
            .record_span(&sample_span("run-2", "researcher", None))
            .unwrap();

        let spans = store.spans_for_run("run-1").unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].agent, "researcher");
        assert!(spans[0].error.is_none());
        assert_eq!(spans[1].error.as_deref(), Some("disk full"));
    }

    #[test]
    fn test_schema_is_idempotent_across_reopens() {
        let temp = TempDir::new().unwrap();
        let db_path = temp.path().join("store.sqlite");

        let store = PlanStore::open(&db_path).unwrap();
        store
            .record_itinerary("ada", "Lisbon", "2026-09-01", 2, "plans/a.md")
            .unwrap();
        store.init_schema().unwrap();
        drop(store);

        let reopened = PlanStore::open(&db_path).unwrap();
        assert_eq!(reopened.itinerary_count().unwrap(), 1);
        let rows = reopened.fetch_last_itineraries("ada", 5).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let db_path = temp.path().join("nested").join("dir").join("store.sqlite");
        PlanStore::open(&db_path).unwrap();
        assert!(db_path.exists());
    }
}
