//! Check command implementation.
//!
//! Loads and resolves the organizer configuration, printing each
//! organizer's filters. With a snapshot, also reports organizers none of
//! whose destinations currently has room.

use std::path::Path;

use yao_organizer_rs::{OrganizerRunner, SnapshotClient, SnapshotStore};

use super::config::load_config;
use super::{CommandContext, Result};
use crate::output::{format_check_json, format_check_table};

/// Options for the check command.
#[derive(Debug)]
pub struct CheckOptions<'a> {
    /// Snapshot to validate destination capacity against.
    pub snapshot: Option<&'a Path>,
}

/// Executes the check command.
pub async fn execute(ctx: &CommandContext, opts: &CheckOptions<'_>) -> Result<()> {
    let config = load_config(ctx)?.build()?;

    let issues = match opts.snapshot {
        Some(path) => {
            let snapshot = SnapshotStore::new(path).load_async().await?;
            let client = SnapshotClient::new(snapshot);
            let runner = OrganizerRunner::new(config.options.clone());
            Some(runner.validate(&client, &config.organizers))
        }
        None => None,
    };

    if let Some(issues) = &issues {
        for issue in issues {
            tracing::warn!(organizer = %issue.organizer, "no destination with capacity");
        }
    }

    if ctx.json_output {
        println!("{}", format_check_json(&config, issues.as_deref())?);
    } else if !ctx.quiet {
        print!("{}", format_check_table(&config, issues.as_deref(), ctx.use_colors));
    }

    Ok(())
}
