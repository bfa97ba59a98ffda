//! Test command implementation.
//!
//! Resolves filter shorthand given on the command line and lists the items
//! of a snapshot that any of the filters match.

use std::path::Path;

use yao_filter_rs::filter::ShorthandResolver;
use yao_filter_rs::{parse_integer, FilterSpec, Item};
use yao_organizer_rs::{ContainerRef, Snapshot, SnapshotStore};

use super::config::load_config;
use super::{CommandContext, CommandError, Result};
use crate::output::{format_filter_test_json, format_filter_test_table};

/// Options for the test command.
#[derive(Debug)]
pub struct TestOptions<'a> {
    /// Snapshot holding the items to test.
    pub snapshot: &'a Path,
    /// Filter shorthand, one filter per entry.
    pub filters: &'a [String],
    /// Restrict to items directly inside this container.
    pub container: Option<&'a str>,
}

/// Turns a command-line filter into a spec.
///
/// Values that read as an integer in the serial/graphic range become
/// numeric shorthand; everything else is text shorthand.
pub fn spec_from_arg(arg: &str) -> FilterSpec {
    match parse_integer(arg.trim()).and_then(|n| u32::try_from(n).ok()) {
        Some(number) => FilterSpec::Number(number),
        None => FilterSpec::Text(arg.to_string()),
    }
}

/// Resolves a container argument to a serial within `snapshot`.
fn container_serial(snapshot: &Snapshot, arg: &str) -> Result<u32> {
    let container: ContainerRef = arg
        .parse()
        .map_err(|e| CommandError::InvalidArgument(format!("{e}")))?;

    match container {
        ContainerRef::Backpack => Ok(snapshot.backpack),
        ContainerRef::Bank => Ok(snapshot.bank),
        ContainerRef::Serial(serial) => Ok(serial),
        ContainerRef::Prompt => snapshot.prompt_target.ok_or_else(|| {
            CommandError::InvalidArgument("snapshot has no prompt target".to_string())
        }),
    }
}

/// Executes the test command.
pub async fn execute(ctx: &CommandContext, opts: &TestOptions<'_>) -> Result<()> {
    let config = load_config(ctx)?;
    let resolver = ShorthandResolver::new(config.and_operator()?);
    let specs = opts.filters.iter().map(|f| spec_from_arg(f)).collect();
    let filters = resolver.resolve_all(specs);

    let snapshot = SnapshotStore::new(opts.snapshot).load_async().await?;

    let candidates: Vec<&Item> = match opts.container {
        Some(arg) => {
            let serial = container_serial(&snapshot, arg)?;
            snapshot.items_in(serial).collect()
        }
        None => snapshot.items.iter().collect(),
    };

    let matched: Vec<&Item> = candidates
        .iter()
        .copied()
        .filter(|item| filters.iter().any(|filter| filter.matches(item)))
        .collect();

    tracing::debug!(
        examined = candidates.len(),
        matched = matched.len(),
        "evaluated filters"
    );

    if ctx.json_output {
        println!(
            "{}",
            format_filter_test_json(&filters, candidates.len(), &matched)?
        );
    } else if !ctx.quiet {
        print!(
            "{}",
            format_filter_test_table(
                &filters,
                candidates.len(),
                &matched,
                ctx.verbose,
                ctx.use_colors
            )
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn ctx(config: PathBuf) -> CommandContext {
        CommandContext {
            json_output: false,
            use_colors: false,
            quiet: true,
            verbose: false,
            config_override: Some(config),
        }
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            backpack: 1,
            bank: 2,
            prompt_target: None,
            items: vec![
                Item::new(10, 0x0DF2, "Unidentified Wand").in_container(1),
                Item::new(11, 0x108A, "Gold Ring").in_container(2),
            ],
        }
    }

    #[test]
    fn test_spec_from_arg() {
        assert_eq!(spec_from_arg("0x0EB3"), FilterSpec::Number(0x0EB3));
        assert_eq!(spec_from_arg("3763"), FilterSpec::Number(3763));
        assert_eq!(
            spec_from_arg("wand & unidentified"),
            FilterSpec::Text("wand & unidentified".to_string())
        );
        assert_eq!(spec_from_arg("-1"), FilterSpec::Text("-1".to_string()));
    }

    #[test]
    fn test_container_serial() {
        let snapshot = snapshot();
        assert_eq!(container_serial(&snapshot, "backpack").unwrap(), 1);
        assert_eq!(container_serial(&snapshot, "bank").unwrap(), 2);
        assert_eq!(container_serial(&snapshot, "0x40").unwrap(), 0x40);
        assert!(matches!(
            container_serial(&snapshot, "$Prompt"),
            Err(CommandError::InvalidArgument(_))
        ));
        assert!(matches!(
            container_serial(&snapshot, "chest"),
            Err(CommandError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_execute_against_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let snapshot_path = temp_dir.path().join("inventory.json");
        SnapshotStore::new(&snapshot_path).save(&snapshot()).unwrap();

        let filters = vec!["wand".to_string()];
        let opts = TestOptions {
            snapshot: &snapshot_path,
            filters: &filters,
            container: Some("backpack"),
        };
        let result = execute(&ctx(temp_dir.path().join("organizer.toml")), &opts).await;
        assert!(result.is_ok(), "{result:?}");
    }

    #[tokio::test]
    async fn test_execute_missing_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let snapshot_path = temp_dir.path().join("missing.json");
        let filters = vec!["wand".to_string()];
        let opts = TestOptions {
            snapshot: &snapshot_path,
            filters: &filters,
            container: None,
        };

        let err = execute(&ctx(temp_dir.path().join("organizer.toml")), &opts)
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Snapshot(_)), "{err}");
    }
}
