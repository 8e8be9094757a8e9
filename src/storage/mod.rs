//! # Storage Layer
//!
//! File inputs for Inkan. Drafts themselves live only in memory; this layer
//! reads configuration and edit scripts.
//!
//! ## Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Project config | TOML | `inkan.toml` (current directory or an ancestor) |
//! | Global config | TOML | `<config dir>/inkan/config.toml` |
//! | Edit scripts | JSONL (one edit per line) | any path, `-` for stdin |
//!
//! ## Key Types
//!
//! - [`Config`] - Project and global configuration
//! - [`EditScript`] - Reads and replays edit scripts

mod config;
mod script;

pub use config::{
    Config, ConfigError, GenerateConfig, GlobalConfig, OutputFormat, ProjectConfig,
    CONFIG_DIR_ENV, PROJECT_CONFIG_FILE,
};
pub use script::{parse_edits, EditScript};
