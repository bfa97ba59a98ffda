//! Organizer definitions and container references.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use yao_filter_rs::{Filter, Item};

/// Configuration keyword that asks the operator to pick the container.
pub const PROMPT_KEYWORD: &str = "$Prompt";

/// Configuration keyword for the player's backpack.
pub const BACKPACK_KEYWORD: &str = "backpack";

/// Configuration keyword for the player's bank box.
pub const BANK_KEYWORD: &str = "bank";

/// A container named in an organizer definition.
///
/// In configuration files a container is either a serial (integer, or a
/// decimal/`0x` hex string) or one of the keywords `"$Prompt"`,
/// `"backpack"` and `"bank"` (case-insensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawContainerRef", into = "RawContainerRef")]
pub enum ContainerRef {
    /// Ask the operator to target the container, once per run.
    Prompt,
    /// The player's backpack.
    Backpack,
    /// The player's bank box.
    Bank,
    /// A specific container serial.
    Serial(u32),
}

/// Error returned when a container reference cannot be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid container '{value}': expected a serial, \"$Prompt\", \"backpack\" or \"bank\"")]
pub struct ParseContainerRefError {
    /// The rejected input.
    pub value: String,
}

impl FromStr for ContainerRef {
    type Err = ParseContainerRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(PROMPT_KEYWORD) || trimmed.eq_ignore_ascii_case("prompt") {
            return Ok(ContainerRef::Prompt);
        }
        if trimmed.eq_ignore_ascii_case(BACKPACK_KEYWORD) {
            return Ok(ContainerRef::Backpack);
        }
        if trimmed.eq_ignore_ascii_case(BANK_KEYWORD) {
            return Ok(ContainerRef::Bank);
        }

        yao_filter_rs::parse_integer(trimmed)
            .and_then(|n| u32::try_from(n).ok())
            .map(ContainerRef::Serial)
            .ok_or_else(|| ParseContainerRefError {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerRef::Prompt => f.write_str(PROMPT_KEYWORD),
            ContainerRef::Backpack => f.write_str(BACKPACK_KEYWORD),
            ContainerRef::Bank => f.write_str(BANK_KEYWORD),
            ContainerRef::Serial(serial) => write!(f, "0x{serial:x}"),
        }
    }
}

/// Wire form of [`ContainerRef`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawContainerRef {
    Serial(u32),
    Text(String),
}

impl TryFrom<RawContainerRef> for ContainerRef {
    type Error = ParseContainerRefError;

    fn try_from(raw: RawContainerRef) -> Result<Self, Self::Error> {
        match raw {
            RawContainerRef::Serial(serial) => Ok(ContainerRef::Serial(serial)),
            RawContainerRef::Text(text) => text.parse(),
        }
    }
}

impl From<ContainerRef> for RawContainerRef {
    fn from(value: ContainerRef) -> Self {
        match value {
            ContainerRef::Serial(serial) => RawContainerRef::Serial(serial),
            other => RawContainerRef::Text(other.to_string()),
        }
    }
}

/// Moves items matching any of its filters from a source to the first
/// destination with room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organizer {
    /// Optional label used in logs and reports.
    pub name: Option<String>,
    /// Container the items are taken from.
    pub source: ContainerRef,
    /// Candidate destinations in priority order.
    pub destinations: Vec<ContainerRef>,
    /// Resolved filters. The organizer passes an item when any filter does.
    pub filters: Vec<Filter>,
}

impl Organizer {
    /// Creates an unnamed organizer.
    pub fn new(source: ContainerRef, destinations: Vec<ContainerRef>, filters: Vec<Filter>) -> Self {
        Self {
            name: None,
            source,
            destinations,
            filters,
        }
    }

    /// Sets the label.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns true if any filter passes the item.
    ///
    /// An organizer without filters never passes.
    pub fn test(&self, item: &Item) -> bool {
        self.filters.iter().any(|filter| filter.matches(item))
    }

    /// Label for logs: the name if set, otherwise the destinations.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => {
                let destinations: Vec<String> =
                    self.destinations.iter().map(ToString::to_string).collect();
                format!("{} -> [{}]", self.source, destinations.join(", "))
            }
        }
    }

    /// Filter summaries, one per filter.
    pub fn summaries(&self) -> Vec<String> {
        self.filters.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    struct Holder {
        container: ContainerRef,
    }

    #[test]
    fn test_container_ref_from_str() {
        assert_eq!("$Prompt".parse(), Ok(ContainerRef::Prompt));
        assert_eq!("$prompt".parse(), Ok(ContainerRef::Prompt));
        assert_eq!("Backpack".parse(), Ok(ContainerRef::Backpack));
        assert_eq!("BANK".parse(), Ok(ContainerRef::Bank));
        assert_eq!("0x40001234".parse(), Ok(ContainerRef::Serial(0x4000_1234)));
        assert_eq!("1234".parse(), Ok(ContainerRef::Serial(1234)));
    }

    #[test]
    fn test_container_ref_rejects_garbage() {
        assert!("chest".parse::<ContainerRef>().is_err());
        assert!("-5".parse::<ContainerRef>().is_err());
        assert!("0x1_0000_0000".parse::<ContainerRef>().is_err());
    }

    #[test]
    fn test_container_ref_deserialize() {
        let holder: Holder = toml::from_str("container = 1073746484").unwrap();
        assert_eq!(holder.container, ContainerRef::Serial(0x4000_1234));

        let holder: Holder = toml::from_str(r#"container = "0x40001234""#).unwrap();
        assert_eq!(holder.container, ContainerRef::Serial(0x4000_1234));

        let holder: Holder = toml::from_str(r#"container = "$Prompt""#).unwrap();
        assert_eq!(holder.container, ContainerRef::Prompt);

        assert!(toml::from_str::<Holder>(r#"container = "chest""#).is_err());
    }

    #[test]
    fn test_container_ref_serialize() {
        let json = serde_json::to_string(&Holder {
            container: ContainerRef::Bank,
        })
        .unwrap();
        assert_eq!(json, r#"{"container":"bank"}"#);

        let json = serde_json::to_string(&Holder {
            container: ContainerRef::Serial(7),
        })
        .unwrap();
        assert_eq!(json, r#"{"container":7}"#);
    }

    #[test]
    fn test_container_ref_display() {
        assert_eq!(ContainerRef::Prompt.to_string(), "$Prompt");
        assert_eq!(ContainerRef::Serial(0x4000_1234).to_string(), "0x40001234");
    }

    #[test]
    fn test_organizer_any_filter_passes() {
        let organizer = Organizer::new(
            ContainerRef::Backpack,
            vec![ContainerRef::Serial(1)],
            vec![Filter::name("wand"), Filter::type_id(0x0EB3)],
        );
        assert!(organizer.test(&Item::new(1, 0x0DF2, "Wand")));
        assert!(organizer.test(&Item::new(2, 0x0EB3, "Lute")));
        assert!(!organizer.test(&Item::new(3, 0x108A, "Ring")));
    }

    #[test]
    fn test_organizer_without_filters_never_passes() {
        let organizer = Organizer::new(ContainerRef::Backpack, vec![ContainerRef::Bank], vec![]);
        assert!(!organizer.test(&Item::new(1, 1, "Anything")));
    }

    #[test]
    fn test_organizer_label() {
        let organizer = Organizer::new(
            ContainerRef::Backpack,
            vec![ContainerRef::Bank, ContainerRef::Serial(0x10)],
            vec![],
        );
        assert_eq!(organizer.label(), "backpack -> [bank, 0x10]");
        assert_eq!(organizer.named("Gems").label(), "Gems");
    }
}
