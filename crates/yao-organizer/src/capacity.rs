//! Container capacity checks.
//!
//! Containers report their fill level as a property line of the form
//! `Contents: 123/125 Items`.

/// Default number of slots kept free in every destination.
pub const DEFAULT_RESERVED_SPACE: u32 = 5;

/// Fill level parsed from a `Contents:` property line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contents {
    /// Items currently inside.
    pub current: u32,
    /// Maximum items the container holds.
    pub max: u32,
}

impl Contents {
    /// Returns true if there is room for another item after keeping
    /// `reserved_space` slots free.
    pub fn has_room(&self, reserved_space: u32) -> bool {
        i64::from(self.current) < i64::from(self.max) - i64::from(reserved_space)
    }
}

/// Outcome of reading a property block for a `Contents:` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentsLine {
    /// No `Contents` line present.
    Missing,
    /// A `Contents` line that could not be parsed.
    Unreadable,
    /// A parsed fill level.
    Parsed(Contents),
}

/// Finds and parses the first `Contents` line of a property block.
///
/// The first line of the block is the item name and is skipped.
pub fn parse_contents(name_and_properties: &str) -> ContentsLine {
    let line = name_and_properties
        .lines()
        .skip(1)
        .map(str::trim)
        .find(|line| line.starts_with("Contents"));

    match line {
        None => ContentsLine::Missing,
        Some(line) => parse_contents_line(line).map_or(ContentsLine::Unreadable, ContentsLine::Parsed),
    }
}

fn parse_contents_line(line: &str) -> Option<Contents> {
    let (_, counts) = line.split_once(':')?;
    let (current, rest) = counts.trim().split_once('/')?;
    let max = rest.split_whitespace().next()?;
    Some(Contents {
        current: current.trim().parse().ok()?,
        max: max.trim().parse().ok()?,
    })
}

/// Decides whether a container with the given property block has room.
///
/// A missing block, a missing `Contents` line, or an unreadable one all
/// assume capacity.
pub fn has_capacity(name_and_properties: Option<&str>, reserved_space: u32) -> bool {
    match name_and_properties.filter(|block| !block.is_empty()) {
        None => true,
        Some(block) => match parse_contents(block) {
            ContentsLine::Parsed(contents) => contents.has_room(reserved_space),
            ContentsLine::Missing | ContentsLine::Unreadable => true,
        },
    }
}
