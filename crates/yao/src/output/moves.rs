//! Run report output formatting.

use owo_colors::OwoColorize;
use serde::Serialize;
use yao_organizer_rs::RunReport;

use super::helpers::{format_serial, header_line, truncate_str};

/// JSON output structure for the run command.
#[derive(Serialize)]
pub struct RunOutput<'a> {
    pub status: &'static str,
    pub dry_run: bool,
    pub saved: bool,
    #[serde(flatten)]
    pub report: &'a RunReport,
}

/// Formats a run report as JSON.
pub fn format_run_report_json(
    report: &RunReport,
    dry_run: bool,
    saved: bool,
) -> Result<String, serde_json::Error> {
    let output = RunOutput {
        status: if report.completed() { "completed" } else { "aborted" },
        dry_run,
        saved,
        report,
    };

    serde_json::to_string_pretty(&output)
}

/// Formats a run report as a table of moves followed by a summary.
pub fn format_run_report_table(report: &RunReport, dry_run: bool, use_colors: bool) -> String {
    let mut output = String::new();

    if report.moves.is_empty() {
        output.push_str("No items moved.\n");
    } else {
        output.push_str(&header_line(
            &format!("{:<12} {:<32} {:<12} {}", "Serial", "Name", "Destination", "Organizer"),
            use_colors,
        ));
        for record in &report.moves {
            output.push_str(&format!(
                "{:<12} {:<32} {:<12} {}\n",
                format_serial(record.serial),
                truncate_str(&record.name, 32),
                format_serial(record.destination),
                record.organizer
            ));
        }
    }

    for failure in &report.failures {
        let line = format!(
            "Failed to move {} ({}) to {}: {}",
            failure.name,
            format_serial(failure.serial),
            format_serial(failure.destination),
            failure.reason
        );
        if use_colors {
            output.push_str(&format!("{}\n", line.red()));
        } else {
            output.push_str(&line);
            output.push('\n');
        }
    }

    let verb = if dry_run { "would move" } else { "moved" };
    output.push_str(&format!(
        "\n{} examined, {} {}, {} ignored, {} unmatched, {} without room, {} failed\n",
        report.examined,
        verb,
        report.moves.len(),
        report.ignored,
        report.unmatched,
        report.no_capacity,
        report.failures.len()
    ));

    if let Some(reason) = &report.aborted {
        let line = format!("Run aborted: {reason}");
        if use_colors {
            output.push_str(&format!("{}\n", line.red().bold()));
        } else {
            output.push_str(&line);
            output.push('\n');
        }
    }

    output
}
