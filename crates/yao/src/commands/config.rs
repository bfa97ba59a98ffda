//! Config command implementation.
//!
//! View and manage the organizer configuration.
//! Config file is located at ~/.config/yao/organizer.toml.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tokio::process::Command;

use directories::BaseDirs;
use owo_colors::OwoColorize;
use yao_organizer_rs::OrganizerConfig;

use super::{CommandContext, CommandError, Result};

/// Config file name inside the config directory.
const CONFIG_FILENAME: &str = "organizer.toml";

/// Application directory name.
const APPLICATION: &str = "yao";

/// Default config file contents.
pub const DEFAULT_CONFIG: &str = r#"# yao - item organizer configuration

# Config schema version (do not modify)
version = 1

# Items matching any of these filters are never moved
# ignore = [{ preset = "jewelry" }, "blessed"]

[options]
# open_child_containers = true       # Sort the contents of bags found in the source
# move_to_destination = true         # Walk to each destination before moving
# output_item_move_messages = true   # Report every move
# log_filter_summary = false         # Log resolved filters before running
# and_operator = "&"                 # Shorthand AND; "" disables splitting
# reserved_space = 5                 # Slots kept free in every destination
# max_path_attempts = 50             # Pathfinding attempts per container

# Each organizer moves items from `source` to the first destination with
# room. Containers are serials or "backpack", "bank" and "$Prompt".
#
# Filters are shorthand strings, serials/graphics, or tables:
#   "wand & unidentified"                    name or property, all terms
#   0x0EB3                                   serial or graphic
#   { not = "blessed" }
#   { any = ["ring", "bracelet"] }
#   { property = { value = "slayer", hue = 33 } }
#   { property_value = { property = "amount", value = 100 } }
#   { type_range = [0x0DF0, 0x0DF5] }
#   { preset = "slayers" }

# [[organizer]]
# name = "Wands"
# source = "backpack"
# destinations = [0x40001234, "bank"]
# filters = ["wand & unidentified"]
"#;

/// Gets the config directory path.
/// Uses XDG-style paths: ~/.config/yao/ on all platforms.
fn get_config_dir() -> Result<PathBuf> {
    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        if !xdg_config.is_empty() {
            return Ok(PathBuf::from(xdg_config).join(APPLICATION));
        }
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join(APPLICATION))
        .ok_or_else(|| CommandError::Setup("Could not determine config directory".to_string()))
}

/// Gets the config file path: `--config`/`YAO_CONFIG` first, then the
/// XDG config directory.
pub fn get_config_path(ctx: &CommandContext) -> Result<PathBuf> {
    if let Some(path) = &ctx.config_override {
        return Ok(path.clone());
    }

    Ok(get_config_dir()?.join(CONFIG_FILENAME))
}

/// Loads the configuration from disk.
///
/// A missing file yields the default (empty) configuration.
pub fn load_config(ctx: &CommandContext) -> Result<OrganizerConfig> {
    let path = get_config_path(ctx)?;
    Ok(OrganizerConfig::load(&path)?)
}

/// Writes the default config file if it does not exist yet.
///
/// Returns true if the file was created.
fn write_default_config(path: &Path, overwrite: bool) -> Result<bool> {
    if path.exists() && !overwrite {
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| CommandError::Setup(format!("Failed to create config directory: {}", e)))?;
    }

    fs::write(path, DEFAULT_CONFIG)
        .map_err(|e| CommandError::Setup(format!("Failed to create config file: {}", e)))?;
    Ok(true)
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let config = load_config(ctx)?;
    let path = get_config_path(ctx)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        let options = &config.options;
        println!("[options]");
        println!("  open_child_containers: {}", options.open_child_containers);
        println!("  move_to_destination: {}", options.move_to_destination);
        println!("  output_item_move_messages: {}", options.output_item_move_messages);
        println!("  log_filter_summary: {}", options.log_filter_summary);
        println!("  and_operator: {:?}", options.and_operator);
        println!("  reserved_space: {}", options.reserved_space);
        println!("  max_path_attempts: {}", options.max_path_attempts);

        println!("\nignore: {} filter(s)", config.ignore.len());
        println!("organizers: {}", config.organizers.len());

        if !path.exists() {
            println!("\n(No config file exists. Run 'yao config init' to create one.)");
        }
    }

    Ok(())
}

/// Executes the config init command.
pub fn execute_init(ctx: &CommandContext, force: bool) -> Result<()> {
    let path = get_config_path(ctx)?;
    let created = write_default_config(&path, force)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": if created { "created" } else { "exists" },
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        if created {
            println!("Created default config at: {}", path.display());
        } else {
            println!(
                "Config already exists at: {} (use --force to overwrite)",
                path.display()
            );
        }
    }

    Ok(())
}

/// Executes the config edit command.
pub async fn execute_edit(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path(ctx)?;

    if write_default_config(&path, false)? && !ctx.quiet && !ctx.json_output {
        eprintln!("Created default config at: {}", path.display());
    }

    // Get editor from environment
    let editor = env::var("EDITOR")
        .or_else(|_| env::var("VISUAL"))
        .unwrap_or_else(|_| "vi".to_string());

    tracing::debug!(path = %path.display(), %editor, "opening config in editor");

    // Open editor (async to avoid blocking the tokio runtime)
    let status = Command::new(&editor)
        .arg(&path)
        .status()
        .await
        .map_err(|e| CommandError::Setup(format!("Failed to open editor '{}': {}", editor, e)))?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": if status.success() { "success" } else { "error" },
            "editor": editor,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        if status.success() {
            println!("Config saved.");
        } else {
            eprintln!("Editor exited with error");
        }
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path(ctx)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn ctx(config_override: Option<PathBuf>) -> CommandContext {
        CommandContext {
            json_output: false,
            use_colors: false,
            quiet: true,
            verbose: false,
            config_override,
        }
    }

    #[test]
    fn test_default_config_parses_and_builds() {
        let config = OrganizerConfig::from_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, OrganizerConfig::default());
        assert!(config.build().is_ok());
    }

    #[test]
    fn test_config_path_override() {
        let path = PathBuf::from("/tmp/yao-test/custom.toml");
        assert_eq!(get_config_path(&ctx(Some(path.clone()))).unwrap(), path);
    }

    #[test]
    #[serial]
    fn test_config_path_uses_xdg_config_home() {
        let original = env::var("XDG_CONFIG_HOME").ok();
        env::set_var("XDG_CONFIG_HOME", "/tmp/yao-xdg");

        let path = get_config_path(&ctx(None));

        match original {
            Some(val) => env::set_var("XDG_CONFIG_HOME", val),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }

        assert_eq!(path.unwrap(), PathBuf::from("/tmp/yao-xdg/yao/organizer.toml"));
    }

    #[test]
    #[serial]
    fn test_config_path_default_is_under_home() {
        let original = env::var("XDG_CONFIG_HOME").ok();
        env::remove_var("XDG_CONFIG_HOME");

        let path = get_config_path(&ctx(None));

        if let Some(val) = original {
            env::set_var("XDG_CONFIG_HOME", val);
        }

        let path = path.unwrap();
        assert!(path.ends_with(".config/yao/organizer.toml"), "{}", path.display());
    }

    #[test]
    fn test_init_writes_default_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("organizer.toml");
        let ctx = ctx(Some(path.clone()));

        execute_init(&ctx, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);

        fs::write(&path, "version = 1\n").unwrap();
        execute_init(&ctx, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "version = 1\n");

        execute_init(&ctx, true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }

    #[test]
    fn test_load_config_missing_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = ctx(Some(temp_dir.path().join("organizer.toml")));
        assert_eq!(load_config(&ctx).unwrap(), OrganizerConfig::default());
    }

    #[test]
    fn test_load_config_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("organizer.toml");
        fs::write(&path, "[[organizer]]\nsource = \"chest\"\n").unwrap();

        let err = load_config(&ctx(Some(path))).unwrap_err();
        assert!(matches!(err, CommandError::Config(_)), "{err}");
    }
}
