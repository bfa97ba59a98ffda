//! Item output formatting for filter tests.

use owo_colors::OwoColorize;
use serde::Serialize;
use yao_filter_rs::{Filter, Item};

use super::helpers::{format_graphic, format_hue, format_serial, header_line, title_line, truncate_str};

/// JSON output structure for the test command.
#[derive(Serialize)]
pub struct FilterTestOutput<'a> {
    pub filters: Vec<String>,
    pub examined: usize,
    pub matched: Vec<ItemOutput<'a>>,
}

/// JSON output structure for a single item.
#[derive(Serialize)]
pub struct ItemOutput<'a> {
    pub serial: u32,
    pub graphic: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hue: Option<u16>,
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<u32>,
    pub amount: u32,
}

impl<'a> From<&'a Item> for ItemOutput<'a> {
    fn from(item: &'a Item) -> Self {
        Self {
            serial: item.serial,
            graphic: item.graphic,
            hue: item.hue,
            name: &item.name,
            container: item.container,
            amount: item.amount,
        }
    }
}

/// Formats the result of a filter test as JSON.
pub fn format_filter_test_json(
    filters: &[Filter],
    examined: usize,
    matched: &[&Item],
) -> Result<String, serde_json::Error> {
    let output = FilterTestOutput {
        filters: filters.iter().map(|f| f.to_string()).collect(),
        examined,
        matched: matched.iter().map(|item| ItemOutput::from(*item)).collect(),
    };

    serde_json::to_string_pretty(&output)
}

/// Formats the result of a filter test as a table.
///
/// With `verbose`, the resolved filter trees are printed above the table.
pub fn format_filter_test_table(
    filters: &[Filter],
    examined: usize,
    matched: &[&Item],
    verbose: bool,
    use_colors: bool,
) -> String {
    let mut output = String::new();

    if verbose {
        output.push_str(&title_line("Filters", use_colors));
        for filter in filters {
            for line in filter.to_string().lines() {
                output.push_str(&format!("  {line}\n"));
            }
        }
        output.push('\n');
    }

    if matched.is_empty() {
        output.push_str(&format!("No items matched ({examined} examined).\n"));
        return output;
    }

    output.push_str(&header_line(
        &format!(
            "{:<12} {:<8} {:<6} {:<32} {}",
            "Serial", "Graphic", "Hue", "Name", "Container"
        ),
        use_colors,
    ));

    for item in matched {
        let container = item.container.map(format_serial).unwrap_or_default();
        let name = truncate_str(&item.name, 32);
        let name = if use_colors {
            name.green().to_string()
        } else {
            name
        };
        output.push_str(&format!(
            "{:<12} {:<8} {:<6} {:<32} {}\n",
            format_serial(item.serial),
            format_graphic(item.graphic),
            format_hue(item.hue),
            name,
            container
        ));
    }

    output.push_str(&format!("\n{} of {} items matched.\n", matched.len(), examined));
    output
}
