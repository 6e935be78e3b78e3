//! Process configuration loaded from `JOBBOARD_*` environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `JOBBOARD_DB_PATH` | `jobboard.sqlite3` |
//! | `JOBBOARD_LOG_LEVEL` | `debug` in debug builds, `info` in release |
//! | `JOBBOARD_LOG_DIR` | `<system temp>/jobboard-logs` |

use crate::logging::default_log_level;
use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

pub const ENV_PREFIX: &str = "JOBBOARD";
const DEFAULT_DB_FILE: &str = "jobboard.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "jobboard-logs";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BoardConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl BoardConfig {
    /// Loads configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(Environment::with_prefix(ENV_PREFIX))
    }

    /// Loads configuration from an explicit variable map instead of the
    /// process environment.
    pub fn load_from(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::build(Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
    }

    fn build(environment: Environment) -> Result<Self, ConfigError> {
        let default_log_dir = std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME);
        Config::builder()
            .set_default("db_path", DEFAULT_DB_FILE)?
            .set_default("log_level", default_log_level())?
            .set_default("log_dir", default_log_dir.to_string_lossy().into_owned())?
            .add_source(environment)
            .build()?
            .try_deserialize()
    }
}
