//! Common helper functions for output formatting.

use owo_colors::OwoColorize;

/// Formats a serial or graphic the way the game client prints them.
pub fn format_serial(serial: u32) -> String {
    format!("0x{serial:08X}")
}

/// Formats a graphic id.
pub fn format_graphic(graphic: u32) -> String {
    format!("0x{graphic:04X}")
}

/// Formats an optional hue; items without a hue show nothing.
pub fn format_hue(hue: Option<u16>) -> String {
    hue.map(|h| h.to_string()).unwrap_or_default()
}

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Renders a table header line, dimmed when colors are on.
pub fn header_line(header: &str, use_colors: bool) -> String {
    if use_colors {
        format!("{}\n", header.dimmed())
    } else {
        format!("{header}\n")
    }
}

/// Renders a section title, bold when colors are on.
pub fn title_line(title: &str, use_colors: bool) -> String {
    if use_colors {
        format!("{}\n", title.bold())
    } else {
        format!("{title}\n")
    }
}
