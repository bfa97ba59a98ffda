//! Preset output formatting.

use serde::Serialize;
use yao_filter_rs::filter::presets::Preset;

use super::helpers::{header_line, truncate_str};

/// JSON output structure for the presets command.
#[derive(Serialize)]
pub struct PresetsListOutput {
    pub presets: Vec<PresetOutput>,
}

/// JSON output structure for a single preset.
#[derive(Serialize)]
pub struct PresetOutput {
    pub name: &'static str,
    pub description: &'static str,
    pub filter: String,
}

/// Formats presets as JSON.
pub fn format_presets_json(presets: &[Preset]) -> Result<String, serde_json::Error> {
    let output = PresetsListOutput {
        presets: presets
            .iter()
            .map(|p| PresetOutput {
                name: p.name,
                description: p.description,
                filter: p.filter().to_string(),
            })
            .collect(),
    };

    serde_json::to_string_pretty(&output)
}

/// Formats presets as a table.
pub fn format_presets_table(presets: &[Preset], verbose: bool, use_colors: bool) -> String {
    if presets.is_empty() {
        return "No presets available.\n".to_string();
    }

    let mut output = header_line(&format!("{:<12} {}", "Name", "Description"), use_colors);

    for preset in presets {
        output.push_str(&format!(
            "{:<12} {}\n",
            preset.name,
            truncate_str(preset.description, 64)
        ));
        if verbose {
            for line in preset.filter().to_string().lines() {
                output.push_str(&format!("{:<12} {}\n", "", line));
            }
        }
    }

    output
}
