//! Configuration handling for Inkan
//!
//! Configuration is read from `inkan.toml` (project, searched upward from the
//! current directory) and `config.toml` in the platform config directory
//! (global, e.g. `~/.config/inkan/config.toml`). Set `INKAN_CONFIG_DIR` to
//! use a different global directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::SectionPolicy;

/// Project config file name
pub const PROJECT_CONFIG_FILE: &str = "inkan.toml";

/// Environment variable overriding the global config directory
pub const CONFIG_DIR_ENV: &str = "INKAN_CONFIG_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Configuration for the generation hand-off
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct GenerateConfig {
    /// External generator program; snapshots go to stdout when unset
    pub command: Option<String>,

    /// Arguments passed to the generator program
    pub args: Vec<String>,

    /// Which sections to hand off (all or complete)
    pub sections: SectionPolicy,
}

impl GenerateConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(command) = &self.command {
            if command.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "generate.command must not be empty".to_string(),
                ));
            }
        }
        if self.command.is_none() && !self.args.is_empty() {
            return Err(ConfigError::Invalid(
                "generate.args requires generate.command".to_string(),
            ));
        }
        Ok(())
    }
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ProjectConfig {
    /// Generation settings
    pub generate: GenerateConfig,
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,

    /// Pretty-print JSON snapshots
    pub pretty: bool,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    pub project_file: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from default locations
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;
        let project_file = std::env::current_dir()
            .ok()
            .and_then(|dir| Self::find_project_file(&dir));

        let project = match &project_file {
            Some(path) => Self::load_project_config(path)?,
            None => ProjectConfig::default(),
        };

        Ok(Self {
            project,
            global,
            project_file,
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Some(PathBuf::from(dir));
        }
        ProjectDirs::from("dev", "inkan", "inkan").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    /// Loads project configuration from a specific file
    pub fn load_project_config(config_path: &Path) -> Result<ProjectConfig> {
        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read project config: {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse project config")?;

        config
            .generate
            .validate()
            .with_context(|| format!("Invalid project config: {}", config_path.display()))?;

        Ok(config)
    }

    /// Finds `inkan.toml` in `start` or its nearest ancestor
    pub fn find_project_file(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(PROJECT_CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }
}
