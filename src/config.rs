//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `--config <path>`, else `$XDG_CONFIG_HOME/offspring/offspring.toml`
//! 3. Environment variables: `OFFSPRING_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::QUEUE_SIZE;

/// Unified configuration for offspring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Interactive prompt (default: "offspring> ")
    pub prompt: String,
    /// Initial capacity and growth step of traversal queues
    pub queue_increment: usize,
    /// Colored error output and prompt
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prompt: "offspring> ".into(),
            queue_increment: QUEUE_SIZE,
            color: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → inherit from base).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub prompt: Option<String>,
    pub queue_increment: Option<usize>,
    pub color: Option<bool>,
}

/// Get the XDG config directory for offspring.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "offspring").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("offspring.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            prompt: overlay.prompt.clone().unwrap_or_else(|| self.prompt.clone()),
            queue_increment: overlay.queue_increment.unwrap_or(self.queue_increment),
            color: overlay.color.unwrap_or(self.color),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// An explicit `config_path` must exist; the global file is optional.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        match config_path {
            Some(path) => {
                current = Self::load_file(path)?;
            }
            None => {
                if let Some(global_path) = global_config_path() {
                    if global_path.exists() {
                        debug!("loading {}", global_path.display());
                        current = current.merge_with(&load_raw_settings(&global_path)?);
                    }
                }
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;
        Ok(current)
    }

    /// Load settings from a file only, ignoring global config and environment.
    pub fn load_file(path: &Path) -> Result<Self, ApplicationError> {
        let settings = Self::default().merge_with(&load_raw_settings(path)?);
        settings.validate()?;
        Ok(settings)
    }

    /// Apply OFFSPRING_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("OFFSPRING")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("prompt") {
            settings.prompt = val;
        }
        if let Ok(val) = config.get_int("queue_increment") {
            settings.queue_increment = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("queue_increment must not be negative: {}", val),
            })?;
        }
        if let Ok(val) = config.get_bool("color") {
            settings.color = val;
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.queue_increment == 0 {
            return Err(ApplicationError::Config {
                message: "queue_increment must be at least 1".into(),
            });
        }
        Ok(())
    }
}
