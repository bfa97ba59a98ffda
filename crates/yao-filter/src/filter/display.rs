//! Human-readable filter summaries.

use std::fmt;

use super::ast::{Filter, MatchMode};
use crate::item::AttributeValue;

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Name {
                value,
                hue,
                match_mode,
            } => {
                let label = match match_mode {
                    MatchMode::Partial => "Partial Name",
                    MatchMode::Exact => "Name",
                };
                write!(f, "{label} ({})", value.to_lowercase())?;
                write_hue(f, *hue)
            }
            Filter::Property {
                value,
                hue,
                match_mode,
            } => {
                let label = match match_mode {
                    MatchMode::Partial => "Partial Prop",
                    MatchMode::Exact => "Prop",
                };
                write!(f, "{label} ({})", value.to_lowercase())?;
                write_hue(f, *hue)
            }
            Filter::PropertyValue {
                property, value, ..
            } => match value {
                AttributeValue::Number(n) => write!(f, "# Prop Val ({property} = {n})"),
                AttributeValue::Text(s) => write!(f, "Str Prop Val ({property} = {s})"),
            },
            Filter::Serial(serial) => write!(f, "Serial (0x{serial:x})"),
            Filter::Type { graphic, hue } => {
                write!(f, "Type (0x{graphic:x})")?;
                write_hue(f, *hue)
            }
            Filter::TypeRange { start, end } => write!(f, "Type Range (0x{start:x} to 0x{end:x})"),
            Filter::MaxPropertyCount(max) => write!(f, "Max Props ({max})"),
            Filter::All(children) => write_children(f, "All", children),
            Filter::Any(children) => write_children(f, "Any", children),
            Filter::Not(inner) => write!(f, "Not: {inner}"),
        }
    }
}

fn write_hue(f: &mut fmt::Formatter<'_>, hue: Option<u16>) -> fmt::Result {
    match hue {
        Some(hue) => write!(f, " [hue {hue}]"),
        None => Ok(()),
    }
}

fn write_children(f: &mut fmt::Formatter<'_>, label: &str, children: &[Filter]) -> fmt::Result {
    write!(f, "{label}(")?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{child}")?;
    }
    f.write_str(")")
}
