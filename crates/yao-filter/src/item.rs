//! Item records as seen by the filter engine.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Raw hue value meaning "no hue".
pub const NO_HUE: i32 = -1;

/// An item as reported by the game client.
///
/// The engine only ever reads items. `name_and_properties` carries the
/// property block exactly as the client reports it: the first line is the
/// item name, every following line is one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique item identity.
    pub serial: u32,

    /// Type (appearance) code.
    pub graphic: u32,

    /// Color variant. `None` when the client reports no hue (`-1`).
    #[serde(default, with = "hue_serde")]
    pub hue: Option<u16>,

    /// Display name.
    pub name: String,

    /// Newline-delimited name line followed by property lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_and_properties: Option<String>,

    /// Serial of the container holding this item, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<u32>,

    /// Stack size.
    #[serde(default = "default_amount")]
    pub amount: u32,

    /// Extra named attributes, looked up by `PropertyValue` filters.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, AttributeValue>,
}

fn default_amount() -> u32 {
    1
}

impl Item {
    /// Creates an item with no hue, no property block and no container.
    pub fn new(serial: u32, graphic: u32, name: impl Into<String>) -> Self {
        Self {
            serial,
            graphic,
            hue: None,
            name: name.into(),
            name_and_properties: None,
            container: None,
            amount: 1,
            attributes: BTreeMap::new(),
        }
    }

    /// Sets the hue.
    pub fn with_hue(mut self, hue: u16) -> Self {
        self.hue = Some(hue);
        self
    }

    /// Sets the property lines. The name line is prepended automatically.
    pub fn with_properties<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut block = self.name.clone();
        for property in properties {
            block.push('\n');
            block.push_str(property.as_ref());
        }
        self.name_and_properties = Some(block);
        self
    }

    /// Sets the stack size.
    pub fn with_amount(mut self, amount: u32) -> Self {
        self.amount = amount;
        self
    }

    /// Places the item inside a container.
    pub fn in_container(mut self, container: u32) -> Self {
        self.container = Some(container);
        self
    }

    /// Adds an extra attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Iterates the property lines, skipping the leading name line.
    ///
    /// Yields nothing when the item has no property block.
    pub fn property_lines(&self) -> impl Iterator<Item = &str> {
        self.name_and_properties
            .as_deref()
            .into_iter()
            .flat_map(|block| block.lines().skip(1))
    }

    /// Number of property lines, or `None` when no property block is known.
    pub fn property_count(&self) -> Option<usize> {
        self.name_and_properties
            .as_deref()
            .map(|block| block.lines().count().saturating_sub(1))
    }

    /// Looks up a named attribute (case-insensitive).
    ///
    /// Built-in fields take precedence over the extra attribute map.
    pub fn attribute(&self, key: &str) -> Option<AttributeValue> {
        let builtin = match key.to_ascii_lowercase().as_str() {
            "serial" => Some(AttributeValue::Number(i64::from(self.serial))),
            "graphic" => Some(AttributeValue::Number(i64::from(self.graphic))),
            "hue" => Some(AttributeValue::Number(
                self.hue.map_or(i64::from(NO_HUE), i64::from),
            )),
            "name" => Some(AttributeValue::Text(self.name.clone())),
            "container" => self.container.map(|c| AttributeValue::Number(i64::from(c))),
            "amount" => Some(AttributeValue::Number(i64::from(self.amount))),
            _ => None,
        };

        builtin.or_else(|| {
            self.attributes
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(key))
                .map(|(_, value)| value.clone())
        })
    }

    /// Returns true if any property line contains `needle` (case-insensitive).
    pub fn has_property(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.property_lines()
            .any(|line| line.to_lowercase().contains(&needle))
    }
}

/// Value of a named item attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Integer attribute.
    Number(i64),
    /// String attribute.
    Text(String),
}

impl AttributeValue {
    /// Coerces the value to an integer.
    ///
    /// Strings are parsed as decimal or `0x`-prefixed hex. Returns `None`
    /// when the text is not a number.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AttributeValue::Number(n) => Some(*n),
            AttributeValue::Text(s) => parse_integer(s),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Number(n) => write!(f, "{n}"),
            AttributeValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Number(value)
    }
}

impl From<u32> for AttributeValue {
    fn from(value: u32) -> Self {
        AttributeValue::Number(i64::from(value))
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

/// Parses a decimal or `0x`-prefixed hexadecimal integer.
///
/// One leading `-` is allowed; a second sign, or a sign after `0x`, is not.
pub fn parse_integer(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let signed = |s: &str| s.starts_with(['-', '+']);
    if negative && signed(digits) {
        return None;
    }

    let value = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) if signed(hex) => return None,
        Some(hex) => i64::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<i64>().ok()?,
    };

    Some(if negative { -value } else { value })
}

/// Converts a raw hue (where `-1` means none) into an optional hue.
///
/// Returns `Err` with the raw value when it is neither `-1` nor a valid hue.
pub fn hue_from_raw(raw: i32) -> Result<Option<u16>, i32> {
    if raw == NO_HUE {
        return Ok(None);
    }
    u16::try_from(raw).map(Some).map_err(|_| raw)
}

mod hue_serde {
    use super::*;

    pub fn serialize<S: Serializer>(hue: &Option<u16>, serializer: S) -> Result<S::Ok, S::Error> {
        match hue {
            Some(h) => serializer.serialize_i32(i32::from(*h)),
            None => serializer.serialize_i32(NO_HUE),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u16>, D::Error> {
        let raw = Option::<i32>::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(raw) => hue_from_raw(raw).map_err(|value| {
                serde::de::Error::custom(format!("invalid hue {value} (expected -1 or 0-65535)"))
            }),
        }
    }
}
