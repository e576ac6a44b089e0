use crate::error::AppError;
use std::env;
use std::path::{Path, PathBuf};

pub const STATS_FILE: &str = "ow2_stats.json";
pub const MATCH_LOG_FILE: &str = "match_log.json";
pub const HEROES_FILE: &str = "heroes.json";
pub const MAPS_FILE: &str = "maps.json";

const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let data_dir = match env::var("OW2_TRACKER_DATA_DIR") {
            Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => dirs::home_dir()
                .ok_or_else(|| {
                    AppError::ConfigError(
                        "no home directory; set OW2_TRACKER_DATA_DIR".to_string(),
                    )
                })?
                .join(".ow2_tracker"),
        };

        let log_filter =
            env::var("OW2_TRACKER_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        Ok(Config {
            data_dir,
            log_filter,
        })
    }

    /// Config rooted at an explicit directory, used by tests and `--data-dir`.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Config {
            data_dir: data_dir.into(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }

    pub fn stats_path(&self) -> PathBuf {
        self.data_dir.join(STATS_FILE)
    }

    pub fn match_log_path(&self) -> PathBuf {
        self.data_dir.join(MATCH_LOG_FILE)
    }

    pub fn heroes_path(&self) -> PathBuf {
        self.data_dir.join(HEROES_FILE)
    }

    pub fn maps_path(&self) -> PathBuf {
        self.data_dir.join(MAPS_FILE)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
