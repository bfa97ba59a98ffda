//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the yao CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// yao - Yet Another Organizer for game inventories
#[derive(Parser, Debug)]
#[command(name = "yao")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Organizer config file (default: ~/.config/yao/organizer.toml)
    #[arg(long, global = true, env = "YAO_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the config and print each organizer's filters
    #[command(alias = "c")]
    Check {
        /// Also check destination capacity against this snapshot
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },

    /// Evaluate filters against the items of a snapshot
    #[command(alias = "t")]
    Test {
        /// Snapshot file (JSON)
        snapshot: PathBuf,

        /// Filter shorthand, e.g. "wand & unidentified" or 0x0EB3 (repeatable)
        #[arg(short, long = "filter", action = clap::ArgAction::Append, required = true)]
        filters: Vec<String>,

        /// Only items directly inside this container (serial, "backpack" or "bank")
        #[arg(long)]
        container: Option<String>,
    },

    /// Run the configured organizers against a snapshot
    #[command(alias = "r")]
    Run {
        /// Snapshot file (JSON), updated in place unless --dry-run
        snapshot: PathBuf,

        /// Container to use for "$Prompt" sources
        #[arg(short, long)]
        source: Option<String>,

        /// Report the moves without saving the snapshot
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// List the built-in filter presets
    Presets,

    /// View and edit configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Open config in $EDITOR
    Edit,

    /// Print config file path
    Path,

    /// Write a commented default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["yao", "--verbose", "presets"]);
        assert!(cli.verbose);
        assert!(!cli.quiet);
        assert!(!cli.json);

        let cli = Cli::parse_from(["yao", "--quiet", "--json", "presets"]);
        assert!(!cli.verbose);
        assert!(cli.quiet);
        assert!(cli.json);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["yao", "-q", "-v", "presets"]).is_err());
    }

    #[test]
    fn test_config_flag() {
        let cli = Cli::parse_from(["yao", "--config", "/tmp/organizer.toml", "check"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/organizer.toml")));
    }

    #[test]
    fn test_test_command_collects_filters() {
        let cli = Cli::parse_from([
            "yao",
            "test",
            "inventory.json",
            "-f",
            "wand & unidentified",
            "--filter",
            "0x0EB3",
            "--container",
            "backpack",
        ]);
        match cli.command {
            Some(Commands::Test {
                snapshot,
                filters,
                container,
            }) => {
                assert_eq!(snapshot, PathBuf::from("inventory.json"));
                assert_eq!(filters, vec!["wand & unidentified", "0x0EB3"]);
                assert_eq!(container.as_deref(), Some("backpack"));
            }
            other => panic!("Expected Test command, got {other:?}"),
        }
    }

    #[test]
    fn test_test_command_requires_filter() {
        assert!(Cli::try_parse_from(["yao", "test", "inventory.json"]).is_err());
    }

    #[test]
    fn test_run_command() {
        let cli = Cli::parse_from(["yao", "r", "inventory.json", "-n", "--source", "0x40001234"]);
        match cli.command {
            Some(Commands::Run {
                snapshot,
                source,
                dry_run,
            }) => {
                assert_eq!(snapshot, PathBuf::from("inventory.json"));
                assert_eq!(source.as_deref(), Some("0x40001234"));
                assert!(dry_run);
            }
            other => panic!("Expected Run command, got {other:?}"),
        }
    }

    #[test]
    fn test_check_alias() {
        let cli = Cli::parse_from(["yao", "c"]);
        assert!(matches!(cli.command, Some(Commands::Check { snapshot: None })));
    }

    #[test]
    fn test_config_init_force() {
        let cli = Cli::parse_from(["yao", "config", "init", "--force"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                command: Some(ConfigCommands::Init { force: true })
            })
        ));
    }

    #[test]
    fn test_completions_command() {
        let cli = Cli::parse_from(["yao", "completions", "zsh"]);
        if let Some(Commands::Completions { shell }) = cli.command {
            assert!(matches!(shell, Shell::Zsh));
        } else {
            panic!("Expected Completions command");
        }
    }
}
