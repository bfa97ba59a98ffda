//! Organizer configuration files.
//!
//! Configuration is TOML:
//!
//! ```toml
//! version = 1
//! ignore = [{ preset = "jewelry" }]
//!
//! [options]
//! and_operator = "&"
//! reserved_space = 5
//!
//! [[organizer]]
//! name = "Wands"
//! source = "backpack"
//! destinations = [0x40001234, "bank"]
//! filters = ["wand & unidentified", 0x0EB3]
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use yao_filter_rs::filter::{parse_and_operator, to_specs, FilterDef, FilterError, ShorthandResolver};
use yao_filter_rs::Filter;

use crate::capacity::DEFAULT_RESERVED_SPACE;
use crate::organizer::{ContainerRef, Organizer};

/// Current config file version. Increment when making breaking changes to schema.
pub const CONFIG_VERSION: u32 = 1;

/// Default number of pathfinding attempts when walking to a container.
pub const DEFAULT_MAX_PATH_ATTEMPTS: u32 = 50;

/// Errors that can occur while loading or building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error while reading the file.
    #[error("failed to read config file '{path}': {source}")]
    Read {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file is not valid TOML or does not match the schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A filter definition could not be converted.
    #[error("{context}: {source}")]
    Filter {
        /// Where the definition appeared.
        context: String,
        /// The underlying filter error.
        #[source]
        source: FilterError,
    },

    /// An organizer names `$Prompt` as a destination.
    #[error("organizer '{organizer}': \"$Prompt\" can only be used as a source")]
    PromptDestination {
        /// Label of the offending organizer.
        organizer: String,
    },
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration file structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizerConfig {
    /// Config schema version for migrations.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Run options.
    #[serde(default)]
    pub options: OrganizerOptions,

    /// Items matching any of these filters are never moved.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<FilterDef>,

    /// Organizers in priority order.
    #[serde(default, rename = "organizer", skip_serializing_if = "Vec::is_empty")]
    pub organizers: Vec<OrganizerDef>,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for OrganizerConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            options: OrganizerOptions::default(),
            ignore: Vec::new(),
            organizers: Vec::new(),
        }
    }
}

/// Options controlling an organizer run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizerOptions {
    /// Descend into containers found in the source instead of moving them.
    pub open_child_containers: bool,

    /// Walk to each destination before moving an item into it.
    pub move_to_destination: bool,

    /// Tell the operator about every move.
    pub output_item_move_messages: bool,

    /// Log the resolved filter summaries of every organizer.
    pub log_filter_summary: bool,

    /// Shorthand AND operator. An empty string disables splitting.
    pub and_operator: String,

    /// Slots kept free in every destination.
    pub reserved_space: u32,

    /// Pathfinding attempts before giving up on reaching a container.
    pub max_path_attempts: u32,
}

impl Default for OrganizerOptions {
    fn default() -> Self {
        Self {
            open_child_containers: true,
            move_to_destination: true,
            output_item_move_messages: true,
            log_filter_summary: false,
            and_operator: "&".to_string(),
            reserved_space: DEFAULT_RESERVED_SPACE,
            max_path_attempts: DEFAULT_MAX_PATH_ATTEMPTS,
        }
    }
}

/// One `[[organizer]]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizerDef {
    /// Optional label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Container to take items from.
    pub source: ContainerRef,

    /// Destinations in priority order.
    #[serde(default)]
    pub destinations: Vec<ContainerRef>,

    /// Filter definitions; any passing filter selects the item.
    #[serde(default)]
    pub filters: Vec<FilterDef>,
}

impl OrganizerDef {
    fn label(&self, index: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("organizer #{}", index + 1))
    }
}

/// A configuration with every filter resolved.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Run options.
    pub options: OrganizerOptions,
    /// Organizers in priority order.
    pub organizers: Vec<Organizer>,
    /// Combined ignore filter, if any ignore filters are configured.
    pub ignored: Option<Filter>,
}

impl OrganizerConfig {
    /// Parses a configuration from TOML and migrates it to the current version.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: OrganizerConfig = toml::from_str(content)?;
        Ok(config.migrate())
    }

    /// Loads the configuration from disk.
    ///
    /// Returns the default configuration when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Migrates config to current version if needed.
    fn migrate(mut self) -> Self {
        // Version 1 is the initial schema
        self.version = CONFIG_VERSION;
        self
    }

    /// The configured AND operator, or `None` when splitting is disabled.
    pub fn and_operator(&self) -> Result<Option<char>> {
        parse_and_operator(&self.options.and_operator).map_err(|source| ConfigError::Filter {
            context: "options.and_operator".to_string(),
            source,
        })
    }

    /// Converts and resolves every filter in the configuration.
    pub fn build(&self) -> Result<ResolvedConfig> {
        let resolver = ShorthandResolver::new(self.and_operator()?);

        let ignore_specs = to_specs(&self.ignore).map_err(|source| ConfigError::Filter {
            context: "ignore".to_string(),
            source,
        })?;
        let ignore_filters = resolver.resolve_all(ignore_specs);
        let ignored = if ignore_filters.is_empty() {
            None
        } else {
            Some(Filter::any(ignore_filters))
        };

        let mut organizers = Vec::with_capacity(self.organizers.len());
        for (index, def) in self.organizers.iter().enumerate() {
            let label = def.label(index);
            if def.destinations.contains(&ContainerRef::Prompt) {
                return Err(ConfigError::PromptDestination { organizer: label });
            }

            let specs = to_specs(&def.filters).map_err(|source| ConfigError::Filter {
                context: format!("organizer '{label}'"),
                source,
            })?;
            let mut organizer =
                Organizer::new(def.source, def.destinations.clone(), resolver.resolve_all(specs));
            organizer.name = def.name.clone();

            if self.options.log_filter_summary {
                info!(organizer = %label, filters = ?organizer.summaries(), "filter summary");
            }
            organizers.push(organizer);
        }

        Ok(ResolvedConfig {
            options: self.options.clone(),
            organizers,
            ignored,
        })
    }
}
