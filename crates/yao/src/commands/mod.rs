//! Command implementations for the yao CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod check;
pub mod completions;
pub mod config;
pub mod presets;
pub mod run;
pub mod test;

use std::path::PathBuf;

use yao_organizer_rs::{ConfigError, SnapshotStoreError};

use crate::cli::Cli;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Organizer configuration could not be loaded or resolved.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Config file location or editor problem.
    #[error("configuration error: {0}")]
    Setup(String),

    /// Filter definition error.
    #[error("filter error: {0}")]
    Filter(#[from] yao_filter_rs::filter::FilterError),

    /// Snapshot file error.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotStoreError),

    /// Invalid command-line argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An organizer run stopped before processing every source.
    #[error("run aborted: {0}")]
    Aborted(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
    /// Config file given with `--config` or `YAO_CONFIG`.
    pub config_override: Option<PathBuf>,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color,
            quiet: cli.quiet,
            verbose: cli.verbose,
            config_override: cli.config.clone(),
        }
    }
}
