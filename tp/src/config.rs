//! Tripdraft configuration types and loading

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::agents::DEFAULT_MAX_RESULTS;
use crate::tools::{weather, wiki};

/// Main Tripdraft configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration
    pub storage: StorageConfig,

    /// Artifact output configuration
    pub output: OutputConfig,

    /// Research lookup configuration
    pub research: ResearchConfig,

    /// Weather forecast configuration
    pub weather: WeatherConfig,

    /// Shared HTTP client configuration
    pub http: HttpConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path)
                .context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .tripdraft.yml
        let local_config = PathBuf::from(".tripdraft.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/tripdraft/tripdraft.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("tripdraft").join("tripdraft.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!(
                            "Failed to load config from {}: {}",
                            user_config.display(),
                            e
                        );
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the SQLite database
    #[serde(rename = "db-path")]
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: planstore::default_db_path(),
        }
    }
}

/// Artifact output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory where rendered itineraries are written
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("plans"),
        }
    }
}

/// Research lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchConfig {
    /// Maximum number of points of interest to research per run
    #[serde(rename = "max-results")]
    pub max_results: usize,

    /// MediaWiki API endpoint
    #[serde(rename = "wiki-base-url")]
    pub wiki_base_url: String,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            wiki_base_url: wiki::DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Weather forecast configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Open-Meteo forecast endpoint
    #[serde(rename = "base-url")]
    pub base_url: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: weather::DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Shared HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            user_agent: "tripdraft/0.1 (itinerary research)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.research.max_results, DEFAULT_MAX_RESULTS);
        assert_eq!(config.research.wiki_base_url, wiki::DEFAULT_BASE_URL);
        assert_eq!(config.weather.base_url, weather::DEFAULT_BASE_URL);
        assert_eq!(config.http.timeout(), Duration::from_secs(15));
        assert_eq!(config.output.dir, PathBuf::from("plans"));
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = r#"
output:
  dir: /tmp/itineraries
research:
  max-results: 3
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.output.dir, PathBuf::from("/tmp/itineraries"));
        assert_eq!(config.research.max_results, 3);
        // Untouched sections keep their defaults.
        assert_eq!(config.weather.base_url, weather::DEFAULT_BASE_URL);
        assert_eq!(config.http.timeout_secs, 15);
    }

    #[test]
    fn test_load_explicit_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("tripdraft.yml");
        std::fs::write(&path, "http:\n  timeout-secs: 2\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.http.timeout_secs, 2);
    }

    #[test]
    fn test_load_explicit_missing_path_errors() {
        let missing = PathBuf::from("/nonexistent/tripdraft.yml");
        assert!(Config::load(Some(&missing)).is_err());
    }
}
