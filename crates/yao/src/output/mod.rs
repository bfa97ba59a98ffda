//! Output formatting utilities for the yao CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules by entity type:
//!
//! - [`organizers`] - Resolved configuration output (check)
//! - [`items`] - Filter test results (test)
//! - [`moves`] - Run reports (run)
//! - [`presets`] - Built-in preset listing (presets)
//! - [`helpers`] - Common formatting utilities (serials, hues, truncation)

pub mod helpers;
mod items;
mod moves;
mod organizers;
mod presets;

pub use items::{format_filter_test_json, format_filter_test_table};
pub use moves::{format_run_report_json, format_run_report_table};
pub use organizers::{format_check_json, format_check_table};
pub use presets::{format_presets_json, format_presets_table};
