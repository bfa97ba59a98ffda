//! Organizer output formatting for the check command.

use owo_colors::OwoColorize;
use serde::Serialize;
use yao_organizer_rs::{ContainerRef, ResolvedConfig, ValidationIssue};

use super::helpers::title_line;

/// JSON output structure for the check command.
#[derive(Serialize)]
pub struct CheckOutput<'a> {
    pub organizers: Vec<OrganizerOutput<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<&'a [ValidationIssue]>,
}

/// JSON output structure for a single organizer.
#[derive(Serialize)]
pub struct OrganizerOutput<'a> {
    pub label: String,
    pub source: &'a ContainerRef,
    pub destinations: &'a [ContainerRef],
    pub filters: Vec<String>,
}

/// Formats a resolved configuration as JSON.
///
/// `issues` is `None` when no snapshot was checked.
pub fn format_check_json(
    config: &ResolvedConfig,
    issues: Option<&[ValidationIssue]>,
) -> Result<String, serde_json::Error> {
    let output = CheckOutput {
        organizers: config
            .organizers
            .iter()
            .map(|o| OrganizerOutput {
                label: o.label(),
                source: &o.source,
                destinations: &o.destinations,
                filters: o.summaries(),
            })
            .collect(),
        ignore: config.ignored.as_ref().map(ToString::to_string),
        issues,
    };

    serde_json::to_string_pretty(&output)
}

/// Formats a resolved configuration for humans.
pub fn format_check_table(
    config: &ResolvedConfig,
    issues: Option<&[ValidationIssue]>,
    use_colors: bool,
) -> String {
    let mut output = String::new();

    if config.organizers.is_empty() {
        output.push_str("No organizers configured.\n");
    }

    for (index, organizer) in config.organizers.iter().enumerate() {
        let title = format!("{}. {}", index + 1, organizer.label());
        output.push_str(&title_line(&title, use_colors));

        let destinations: Vec<String> = organizer.destinations.iter().map(ToString::to_string).collect();
        output.push_str(&format!("   source:       {}\n", organizer.source));
        output.push_str(&format!("   destinations: {}\n", destinations.join(", ")));

        if organizer.filters.is_empty() {
            output.push_str("   filters:      (none, never matches)\n");
        }
        for (n, summary) in organizer.summaries().iter().enumerate() {
            let prefix = if n == 0 { "   filters:      " } else { "                 " };
            let mut lines = summary.lines();
            if let Some(first) = lines.next() {
                output.push_str(&format!("{prefix}{first}\n"));
            }
            for line in lines {
                output.push_str(&format!("                 {line}\n"));
            }
        }
        output.push('\n');
    }

    if let Some(ignored) = &config.ignored {
        output.push_str(&title_line("Ignored", use_colors));
        for line in ignored.to_string().lines() {
            output.push_str(&format!("   {line}\n"));
        }
        output.push('\n');
    }

    match issues {
        Some([]) => output.push_str("Every organizer has a destination with room.\n"),
        Some(issues) => {
            for issue in issues {
                let destinations: Vec<String> = issue.destinations.iter().map(ToString::to_string).collect();
                let line = format!(
                    "No destination with capacity for {} ({})",
                    issue.organizer,
                    destinations.join(", ")
                );
                if use_colors {
                    output.push_str(&format!("{}\n", line.yellow()));
                } else {
                    output.push_str(&line);
                    output.push('\n');
                }
            }
        }
        None => {}
    }

    output
}
