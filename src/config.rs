// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::storage::LocalStorage;
use crate::store::DEFAULT_UNDO_LIMIT;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_true() -> bool {
    true
}

fn default_undo_limit() -> usize {
    DEFAULT_UNDO_LIMIT
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Overrides the task file location (defaults to `tasks.json` in the data dir).
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    /// Seed a fresh installation with example tasks.
    #[serde(default = "default_true")]
    pub load_sample_data: bool,
    #[serde(default = "default_undo_limit")]
    pub undo_limit: usize,
    /// One of off, error, warn, info, debug, trace.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            load_sample_data: true,
            undo_limit: DEFAULT_UNDO_LIMIT,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Loads `config.toml`. A missing file yields the defaults.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })
    }

    /// Where tasks are stored for this configuration.
    pub fn task_file_path(&self, ctx: &dyn AppContext) -> Result<PathBuf> {
        match &self.data_file {
            Some(path) => Ok(path.clone()),
            None => ctx.get_task_file_path(),
        }
    }

    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
