use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod dispatch;
mod logging;
mod output;

use cli::Cli;
use commands::{CommandContext, CommandError};
use dispatch::{AsyncCommand, AsyncDispatch, SyncCommand, SyncDispatch};
use yao_organizer_rs::ConfigError;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(&cli);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                match serde_json::to_string_pretty(&error_json) {
                    Ok(json) => eprintln!("{json}"),
                    Err(_) => eprintln!("Error: {e}"),
                }
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

async fn run(cli: &Cli) -> commands::Result<()> {
    let ctx = CommandContext::from_cli(cli);

    if let Some(dispatch) = SyncDispatch::try_from_cli(cli) {
        return dispatch.execute(&ctx);
    }

    if let Some(dispatch) = AsyncDispatch::from_cli(cli) {
        return dispatch.execute(&ctx).await;
    }

    Err(CommandError::InvalidArgument(format!(
        "unhandled command: {:?}",
        cli.command
    )))
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Config(ConfigError::Filter { .. }) => "FILTER_ERROR",
        CommandError::Config(_) | CommandError::Setup(_) => "CONFIG_ERROR",
        CommandError::Filter(_) => "FILTER_ERROR",
        CommandError::Snapshot(_) => "SNAPSHOT_ERROR",
        CommandError::InvalidArgument(_) => "INVALID_ARGUMENT",
        CommandError::Aborted(_) => "RUN_ABORTED",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    match e {
        CommandError::Config(_) | CommandError::Setup(_) => ExitCode::from(5),
        CommandError::Filter(_) => ExitCode::from(1),
        CommandError::InvalidArgument(_) => ExitCode::from(1),
        CommandError::Aborted(_) => ExitCode::from(4),
        CommandError::Snapshot(_) => ExitCode::from(3),
        CommandError::Io(_) => ExitCode::from(3),
        CommandError::Json(_) => ExitCode::from(1),
    }
}
