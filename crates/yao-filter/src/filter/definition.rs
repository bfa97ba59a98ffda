//! Declarative filter definitions.
//!
//! Definitions are the serde-facing form of [`FilterSpec`] used by
//! configuration files. Each definition is either a shorthand literal or a
//! single-key table naming the filter kind:
//!
//! ```toml
//! filters = [
//!     "wand & unidentified",
//!     0x0EB3,
//!     { all = ["artifact", { not = "weapon" }] },
//!     { name = { value = "ring", exact = true, hue = 33 } },
//!     { type_range = [0x13b0, 0x13ff] },
//!     { property_value = { property = "Amount", value = 500 } },
//!     { preset = "jewelry" },
//! ]
//! ```

use serde::{Deserialize, Serialize};

use super::ast::{Filter, FilterSpec, MatchMode};
use super::error::{FilterError, FilterResult};
use super::presets;
use crate::item::{hue_from_raw, AttributeValue};

/// A filter as written in a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterDef {
    /// Numeric shorthand.
    Number(u32),
    /// Text shorthand.
    Text(String),
    /// Explicit filter.
    Node(Box<NodeDef>),
}

/// An explicit filter definition, keyed by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeDef {
    /// Every child must match.
    All(Vec<FilterDef>),
    /// At least one child must match.
    Any(Vec<FilterDef>),
    /// Inverts the child.
    Not(FilterDef),
    /// Name match.
    Name(TextDef),
    /// Property line match.
    Property(TextDef),
    /// Attribute comparison.
    PropertyValue(PropertyValueDef),
    /// Serial match.
    Serial(u32),
    /// Graphic match.
    Type(TypeDef),
    /// Inclusive graphic range.
    TypeRange([u32; 2]),
    /// Property count limit.
    MaxProperties(usize),
    /// Named preset.
    Preset(String),
}

/// Definition of a name or property match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextDef {
    /// Partial match with no hue gate.
    Value(String),
    /// Fully specified match.
    Detailed {
        /// Text to look for.
        value: String,
        /// Required hue, `-1` for none.
        #[serde(default = "no_hue")]
        hue: i64,
        /// Require full equality instead of substring containment.
        #[serde(default)]
        exact: bool,
    },
}

/// Definition of a graphic match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeDef {
    /// Graphic with no hue gate.
    Graphic(u32),
    /// Graphic with an optional hue gate.
    Detailed {
        /// Required graphic.
        graphic: u32,
        /// Required hue, `-1` for none.
        #[serde(default = "no_hue")]
        hue: i64,
    },
}

/// Definition of an attribute comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyValueDef {
    /// Attribute name.
    pub property: String,
    /// Expected value.
    pub value: AttributeValue,
    /// Compare text case-sensitively.
    #[serde(default)]
    pub case_sensitive: bool,
}

fn no_hue() -> i64 {
    -1
}

impl FilterDef {
    /// Converts the definition into a spec ready for resolution.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidHue` for hues outside `-1..=65535`,
    /// `FilterError::InvalidTypeRange` for inverted ranges and
    /// `FilterError::UnknownPreset` for unknown preset names.
    pub fn to_spec(&self) -> FilterResult<FilterSpec> {
        match self {
            FilterDef::Number(value) => Ok(FilterSpec::Number(*value)),
            FilterDef::Text(value) => Ok(FilterSpec::Text(value.clone())),
            FilterDef::Node(node) => node.to_spec(),
        }
    }
}

impl NodeDef {
    fn to_spec(&self) -> FilterResult<FilterSpec> {
        let filter = match self {
            NodeDef::All(children) => return Ok(FilterSpec::All(to_specs(children)?)),
            NodeDef::Any(children) => return Ok(FilterSpec::Any(to_specs(children)?)),
            NodeDef::Not(inner) => return Ok(FilterSpec::Not(Box::new(inner.to_spec()?))),
            NodeDef::Name(text) => {
                let (value, hue, match_mode) = text.parts()?;
                Filter::Name {
                    value,
                    hue,
                    match_mode,
                }
            }
            NodeDef::Property(text) => {
                let (value, hue, match_mode) = text.parts()?;
                Filter::Property {
                    value,
                    hue,
                    match_mode,
                }
            }
            NodeDef::PropertyValue(def) => Filter::PropertyValue {
                property: def.property.clone(),
                value: def.value.clone(),
                case_sensitive: def.case_sensitive,
            },
            NodeDef::Serial(serial) => Filter::Serial(*serial),
            NodeDef::Type(TypeDef::Graphic(graphic)) => Filter::type_id(*graphic),
            NodeDef::Type(TypeDef::Detailed { graphic, hue }) => Filter::Type {
                graphic: *graphic,
                hue: convert_hue(*hue)?,
            },
            NodeDef::TypeRange([start, end]) => {
                if start > end {
                    return Err(FilterError::InvalidTypeRange {
                        start: *start,
                        end: *end,
                    });
                }
                Filter::type_range(*start, *end)
            }
            NodeDef::MaxProperties(max) => Filter::MaxPropertyCount(*max),
            NodeDef::Preset(name) => presets::lookup(name)?.filter(),
        };
        Ok(FilterSpec::Filter(filter))
    }
}

impl TextDef {
    fn parts(&self) -> FilterResult<(String, Option<u16>, MatchMode)> {
        match self {
            TextDef::Value(value) => Ok((value.clone(), None, MatchMode::Partial)),
            TextDef::Detailed { value, hue, exact } => {
                let mode = if *exact {
                    MatchMode::Exact
                } else {
                    MatchMode::Partial
                };
                Ok((value.clone(), convert_hue(*hue)?, mode))
            }
        }
    }
}

fn convert_hue(raw: i64) -> FilterResult<Option<u16>> {
    let raw = i32::try_from(raw).map_err(|_| FilterError::invalid_hue(raw))?;
    hue_from_raw(raw).map_err(|value| FilterError::invalid_hue(i64::from(value)))
}

/// Converts a list of definitions into specs, stopping at the first error.
pub fn to_specs(defs: &[FilterDef]) -> FilterResult<Vec<FilterSpec>> {
    defs.iter().map(FilterDef::to_spec).collect()
}

/// Parses an AND operator setting. An empty string disables splitting.
///
/// # Errors
///
/// Returns `FilterError::InvalidAndOperator` when the value has more than
/// one character.
pub fn parse_and_operator(value: &str) -> FilterResult<Option<char>> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(None),
        (Some(c), None) => Ok(Some(c)),
        _ => Err(FilterError::invalid_and_operator(value)),
    }
}
