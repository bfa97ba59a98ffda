//! Run command implementation.
//!
//! Plays the configured organizers against a snapshot and writes the
//! rearranged snapshot back unless `--dry-run` is given.

use std::collections::BTreeSet;
use std::io;
use std::path::Path;

use dialoguer::Select;
use owo_colors::OwoColorize;
use yao_organizer_rs::{ContainerRef, OrganizerRunner, Snapshot, SnapshotClient, SnapshotStore};

use super::config::load_config;
use super::{CommandContext, CommandError, Result};
use crate::output::helpers::format_serial;
use crate::output::{format_run_report_json, format_run_report_table};

/// Options for the run command.
#[derive(Debug)]
pub struct RunOptions<'a> {
    /// Snapshot to organize.
    pub snapshot: &'a Path,
    /// Container for `$Prompt` sources.
    pub source: Option<&'a str>,
    /// Skip writing the snapshot back.
    pub dry_run: bool,
    /// Whether the operator can be asked to pick a `$Prompt` source.
    pub interactive: bool,
}

/// Resolves `--source` against the snapshot.
fn source_serial(snapshot: &Snapshot, arg: &str) -> Result<u32> {
    let container: ContainerRef = arg
        .parse()
        .map_err(|e| CommandError::InvalidArgument(format!("{e}")))?;

    match container {
        ContainerRef::Backpack => Ok(snapshot.backpack),
        ContainerRef::Bank => Ok(snapshot.bank),
        ContainerRef::Serial(serial) => Ok(serial),
        ContainerRef::Prompt => Err(CommandError::InvalidArgument(
            "--source must name a container, not $Prompt".to_string(),
        )),
    }
}

/// Containers the operator can pick for a `$Prompt` source: the backpack,
/// the bank, and every item that holds items or reports its contents.
fn container_choices(snapshot: &Snapshot) -> Vec<(u32, String)> {
    let mut seen = BTreeSet::new();
    let mut choices = vec![
        (snapshot.backpack, "Backpack".to_string()),
        (snapshot.bank, "Bank Box".to_string()),
    ];
    seen.insert(snapshot.backpack);
    seen.insert(snapshot.bank);

    let holders: BTreeSet<u32> = snapshot.items.iter().filter_map(|i| i.container).collect();
    for item in &snapshot.items {
        let reports_contents = item
            .name_and_properties
            .as_deref()
            .is_some_and(|text| text.to_lowercase().contains("contents:"));
        if (reports_contents || holders.contains(&item.serial)) && seen.insert(item.serial) {
            choices.push((item.serial, item.name.clone()));
        }
    }

    choices
}

/// Asks the operator which container to use for `$Prompt` sources.
fn prompt_for_source(snapshot: &Snapshot) -> Result<u32> {
    let choices = container_choices(snapshot);
    let labels: Vec<String> = choices
        .iter()
        .map(|(serial, name)| format!("{} {}", format_serial(*serial), name))
        .collect();

    let selection = Select::new()
        .with_prompt("Select the source container")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| CommandError::Io(io::Error::other(e.to_string())))?;

    Ok(choices[selection].0)
}

/// Executes the run command.
pub async fn execute(ctx: &CommandContext, opts: &RunOptions<'_>) -> Result<()> {
    let config = load_config(ctx)?.build()?;
    let store = SnapshotStore::new(opts.snapshot);
    let snapshot = store.load_async().await?;

    let needs_prompt = config
        .organizers
        .iter()
        .any(|o| o.source == ContainerRef::Prompt);

    let mut runner = OrganizerRunner::new(config.options.clone());
    if let Some(arg) = opts.source {
        runner = runner.with_prompt_serial(source_serial(&snapshot, arg)?);
    } else if needs_prompt
        && snapshot.prompt_target.is_none()
        && !ctx.json_output
        && opts.interactive
    {
        runner = runner.with_prompt_serial(prompt_for_source(&snapshot)?);
    }

    let mut client = SnapshotClient::new(snapshot);
    let report = runner.process(&mut client, &config.organizers, config.ignored.as_ref());

    if ctx.verbose && !ctx.json_output {
        for message in client.messages() {
            eprintln!("{message}");
        }
    }

    let saved = !opts.dry_run && !report.moves.is_empty();
    if saved {
        store.save_async(client.snapshot()).await?;
        tracing::info!(path = %store.path().display(), moves = report.moves.len(), "saved snapshot");
    }

    if ctx.json_output {
        println!("{}", format_run_report_json(&report, opts.dry_run, saved)?);
    } else if !ctx.quiet {
        print!("{}", format_run_report_table(&report, opts.dry_run, ctx.use_colors));
        if saved {
            let line = format!("Saved {}", store.path().display());
            if ctx.use_colors {
                println!("{}", line.green());
            } else {
                println!("{line}");
            }
        }
    }

    match report.aborted {
        Some(reason) => Err(CommandError::Aborted(reason)),
        None => Ok(()),
    }
}
