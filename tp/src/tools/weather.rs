//! Daily forecast lookup via the Open-Meteo public API

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::WeatherSummary;

/// Public Open-Meteo forecast endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Weather collaborator. Never raises: implementations absorb transport
/// failures into a deterministic fallback summary so downstream stages
/// (checklist, presenter) stay runnable.
#[async_trait]
pub trait WeatherApi: Send + Sync {
    async fn forecast(&self, lat: f64, lon: f64, date: NaiveDate) -> WeatherSummary;
}

/// reqwest-backed Open-Meteo client
pub struct OpenMeteoClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    daily: WeatherSummary,
}

impl OpenMeteoClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration, user_agent: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn fetch(&self, lat: f64, lon: f64, date: NaiveDate) -> Result<WeatherSummary> {
        let date = date.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", lat.to_string().as_str()),
                ("longitude", lon.to_string().as_str()),
                (
                    "daily",
                    "temperature_2m_max,temperature_2m_min,precipitation_probability_max",
                ),
                ("timezone", "auto"),
                ("start_date", &date),
                ("end_date", &date),
            ])
            .send()
            .await?
            .error_for_status()?;
        let payload: ForecastResponse = response.json().await?;
        Ok(payload.daily)
    }
}

#[async_trait]
impl WeatherApi for OpenMeteoClient {
    async fn forecast(&self, lat: f64, lon: f64, date: NaiveDate) -> WeatherSummary {
        match self.fetch(lat, lon, date).await {
            Ok(summary) => {
                debug!(lat, lon, %date, "weather forecast succeeded");
                summary
            }
            Err(err) => {
                warn!(lat, lon, %date, %err, "weather forecast failed, serving fallback");
                WeatherSummary::fallback()
            }
        }
    }
}
