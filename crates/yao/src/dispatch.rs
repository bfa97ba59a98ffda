//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Commands that only touch local files and stdout run synchronously;
//! commands that load snapshots or spawn an editor run on the tokio runtime.

use std::io::{self, IsTerminal};

use crate::cli::{Cli, Commands, ConfigCommands, Shell};
use crate::commands::check::CheckOptions;
use crate::commands::run::RunOptions;
use crate::commands::test::TestOptions;
use crate::commands::{self, CommandContext, CommandError, Result};

/// Trait for commands that complete without the async runtime.
pub trait SyncCommand {
    /// Execute the command.
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that need the async runtime.
#[allow(async_fn_in_trait)]
pub trait AsyncCommand {
    /// Execute the command.
    async fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Synchronous commands.
pub enum SyncDispatch<'a> {
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    Presets,
    Help,
}

impl<'a> SyncDispatch<'a> {
    /// Try to create a sync dispatch from the CLI command.
    /// Returns None if the command needs the async runtime.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Config {
                command: Some(ConfigCommands::Edit),
            }) => None,
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(shell)),
            Some(Commands::Presets) => Some(Self::Presets),
            None => Some(Self::Help),
            _ => None,
        }
    }
}

impl SyncCommand for SyncDispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Presets => commands::presets::execute(ctx),
            Self::Help => {
                if !ctx.quiet {
                    println!("yao - item organizer");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch synchronous config subcommands.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
        Some(ConfigCommands::Init { force }) => commands::config::execute_init(ctx, *force),
        Some(ConfigCommands::Edit) => Err(CommandError::Setup(
            "edit requires async context".to_string(),
        )),
    }
}

/// Commands that run on the async runtime.
pub enum AsyncDispatch<'a> {
    Check(CheckOptions<'a>),
    Test(TestOptions<'a>),
    Run(RunOptions<'a>),
    ConfigEdit,
}

impl<'a> AsyncDispatch<'a> {
    /// Create an async dispatch from the CLI command.
    /// Returns None for commands handled by [`SyncDispatch`].
    pub fn from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Check { snapshot }) => Some(Self::Check(CheckOptions {
                snapshot: snapshot.as_deref(),
            })),
            Some(Commands::Test {
                snapshot,
                filters,
                container,
            }) => Some(Self::Test(TestOptions {
                snapshot,
                filters,
                container: container.as_deref(),
            })),
            Some(Commands::Run {
                snapshot,
                source,
                dry_run,
            }) => Some(Self::Run(RunOptions {
                snapshot,
                source: source.as_deref(),
                dry_run: *dry_run,
                interactive: io::stdin().is_terminal(),
            })),
            Some(Commands::Config {
                command: Some(ConfigCommands::Edit),
            }) => Some(Self::ConfigEdit),
            _ => None,
        }
    }
}

impl AsyncCommand for AsyncDispatch<'_> {
    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Check(opts) => commands::check::execute(ctx, opts).await,
            Self::Test(opts) => commands::test::execute(ctx, opts).await,
            Self::Run(opts) => commands::run::execute(ctx, opts).await,
            Self::ConfigEdit => commands::config::execute_edit(ctx).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(args)
    }

    #[test]
    fn test_sync_commands() {
        assert!(matches!(
            SyncDispatch::try_from_cli(&parse(&["yao", "presets"])),
            Some(SyncDispatch::Presets)
        ));
        assert!(matches!(
            SyncDispatch::try_from_cli(&parse(&["yao", "config", "path"])),
            Some(SyncDispatch::Config(_))
        ));
        assert!(matches!(
            SyncDispatch::try_from_cli(&parse(&["yao"])),
            Some(SyncDispatch::Help)
        ));
    }

    #[test]
    fn test_config_edit_is_async() {
        let cli = parse(&["yao", "config", "edit"]);
        assert!(SyncDispatch::try_from_cli(&cli).is_none());
        assert!(matches!(
            AsyncDispatch::from_cli(&cli),
            Some(AsyncDispatch::ConfigEdit)
        ));
    }

    #[test]
    fn test_async_commands() {
        let cli = parse(&["yao", "run", "inventory.json", "--dry-run"]);
        assert!(SyncDispatch::try_from_cli(&cli).is_none());
        match AsyncDispatch::from_cli(&cli) {
            Some(AsyncDispatch::Run(opts)) => {
                assert!(opts.dry_run);
                assert!(opts.source.is_none());
            }
            _ => panic!("Expected Run dispatch"),
        }

        let cli = parse(&["yao", "check", "--snapshot", "inventory.json"]);
        match AsyncDispatch::from_cli(&cli) {
            Some(AsyncDispatch::Check(opts)) => assert!(opts.snapshot.is_some()),
            _ => panic!("Expected Check dispatch"),
        }
    }
}
