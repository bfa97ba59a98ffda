//! Named preset filters.
//!
//! Presets are text-based lists that come up often enough to be worth
//! shipping. They are referenced from configuration by name.

use super::ast::Filter;
use super::error::{FilterError, FilterResult};

/// Minimum similarity for a preset name suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// A named preset.
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    /// Lookup name (lowercase).
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    build: fn() -> Filter,
}

impl Preset {
    /// Builds the preset's filter.
    pub fn filter(&self) -> Filter {
        (self.build)()
    }
}

/// All known presets.
pub const PRESETS: &[Preset] = &[
    Preset {
        name: "jewelry",
        description: "Earrings, beads, amulets, necklaces, bracelets and rings",
        build: jewelry,
    },
    Preset {
        name: "slayers",
        description: "Items carrying a slayer property",
        build: slayers,
    },
];

/// Looks up a preset by name (case-insensitive).
///
/// # Errors
///
/// Returns `FilterError::UnknownPreset` with the closest known name when
/// the preset does not exist.
pub fn lookup(name: &str) -> FilterResult<&'static Preset> {
    let wanted = name.trim().to_lowercase();
    if let Some(preset) = PRESETS.iter().find(|p| p.name == wanted) {
        return Ok(preset);
    }

    let suggestion = PRESETS
        .iter()
        .map(|p| (p.name, strsim::jaro_winkler(&wanted, p.name)))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(name, _)| name.to_string());

    Err(FilterError::unknown_preset(name, suggestion))
}

fn slayers() -> Filter {
    Filter::any(
        [
            "Giant Killer",
            "Supernatural Vanquishing",
            "Weed Ruin",
            "Serpentaur Execution",
            "Orcish Demise",
            "Ogre Extinction",
            "Golem Destruction",
        ]
        .into_iter()
        .map(Filter::property),
    )
}

fn jewelry() -> Filter {
    Filter::any([
        Filter::name("earring"),
        Filter::name("beads"),
        Filter::name("amulet"),
        Filter::name("necklace"),
        Filter::name("bracelet"),
        // "ring" alone also matches "string", so require a word boundary
        // and exclude items with requirements (weapons and the like).
        Filter::all([
            Filter::any([Filter::name(" ring"), Filter::name("ring ")]),
            Filter::negate(Filter::property("requirement")),
        ]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(lookup("Jewelry").unwrap().name, "jewelry");
        assert_eq!(lookup(" SLAYERS ").unwrap().name, "slayers");
    }

    #[test]
    fn test_lookup_suggests_close_name() {
        let err = lookup("jewelery").unwrap_err();
        assert_eq!(
            err,
            FilterError::unknown_preset("jewelery", Some("jewelry".to_string()))
        );
    }

    #[test]
    fn test_lookup_unknown_without_suggestion() {
        let err = lookup("zzz").unwrap_err();
        assert_eq!(err, FilterError::unknown_preset("zzz", None));
    }

    #[test]
    fn test_slayers_matches_property() {
        let filter = lookup("slayers").unwrap().filter();
        let item = Item::new(1, 0x13b9, "Viking Sword").with_properties(["Orcish Demise"]);
        assert!(filter.matches(&item));

        let plain = Item::new(2, 0x13b9, "Viking Sword").with_properties(["Durability 40 / 40"]);
        assert!(!filter.matches(&plain));
    }

    #[test]
    fn test_jewelry_ring_rules() {
        let filter = lookup("jewelry").unwrap().filter();

        let ring = Item::new(1, 0x108a, "Gold Ring of Power").with_properties(["Luck 40"]);
        assert!(filter.matches(&ring));

        let bow_string = Item::new(2, 0x13b2, "bowstring").with_properties(["Weight 1"]);
        assert!(!filter.matches(&bow_string));

        let ring_mail = Item::new(3, 0x13ec, "ring mail tunic")
            .with_properties(["Strength Requirement 40"]);
        assert!(!filter.matches(&ring_mail));

        let amulet = Item::new(4, 0x1088, "Amulet");
        assert!(filter.matches(&amulet));
    }
}
