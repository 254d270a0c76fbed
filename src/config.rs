//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local development.

use crate::models::AppLanguage;
use std::env;
use std::path::PathBuf;

/// Default file name for the persisted marker list.
pub const DEFAULT_MARKER_FILE: &str = "tree_markers.json";

/// Default coverage circle radius in meters.
pub const DEFAULT_COVERAGE_RADIUS: f64 = 150.0;

/// Directory name created under the platform data directory.
const APP_DIR_NAME: &str = "tree-quest";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the marker file
    pub data_dir: PathBuf,
    /// Marker file name inside `data_dir`
    pub marker_file: String,
    /// Coverage zone radius (meters)
    pub coverage_radius: f64,
    /// Explicit merge distance (meters); `None` means 0.6 × radius
    pub merge_distance: Option<f64>,
    /// UI language used for string keys
    pub language: AppLanguage,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            data_dir: env::temp_dir().join(APP_DIR_NAME),
            marker_file: DEFAULT_MARKER_FILE.to_string(),
            coverage_radius: DEFAULT_COVERAGE_RADIUS,
            merge_distance: None,
            language: AppLanguage::English,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let data_dir = match env::var("TREE_QUEST_DATA_DIR") {
            Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir.trim()),
            _ => default_data_dir(),
        };

        let coverage_radius = match env::var("TREE_QUEST_COVERAGE_RADIUS") {
            Ok(raw) => parse_distance("TREE_QUEST_COVERAGE_RADIUS", &raw)?,
            Err(_) => DEFAULT_COVERAGE_RADIUS,
        };

        let merge_distance = env::var("TREE_QUEST_MERGE_DISTANCE")
            .ok()
            .map(|raw| parse_distance("TREE_QUEST_MERGE_DISTANCE", &raw))
            .transpose()?;

        let language = match env::var("TREE_QUEST_LANGUAGE") {
            Ok(code) => AppLanguage::resolve([code.as_str()]),
            Err(_) => {
                // POSIX locales look like "de_DE.UTF-8"
                let lang = env::var("LANG").unwrap_or_default().replace('_', "-");
                AppLanguage::resolve([lang.as_str()])
            }
        };

        Ok(Self {
            data_dir,
            marker_file: env::var("TREE_QUEST_MARKER_FILE")
                .unwrap_or_else(|_| DEFAULT_MARKER_FILE.to_string()),
            coverage_radius,
            merge_distance,
            language,
        })
    }

    /// Full path of the persisted marker file.
    pub fn marker_path(&self) -> PathBuf {
        self.data_dir.join(&self.marker_file)
    }
}

/// Platform application-data directory, falling back to documents and then
/// the temp directory.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::document_dir)
        .unwrap_or_else(env::temp_dir)
        .join(APP_DIR_NAME)
}

/// Parse a distance in meters that must be finite and positive.
pub fn parse_distance(var: &'static str, raw: &str) -> Result<f64, ConfigError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => Err(ConfigError::Invalid {
            var,
            value: raw.to_string(),
        }),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}
