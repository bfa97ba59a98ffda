//! Filter evaluation against items.
//!
//! Evaluation is pure and never fails: anything that cannot be compared
//! (a missing attribute, a missing property block, a non-numeric value
//! compared numerically) simply does not match.
//!
//! # Example
//!
//! ```
//! use yao_filter_rs::filter::{Filter, FilterEvaluator};
//! use yao_filter_rs::Item;
//!
//! let filter = Filter::type_range(100, 200);
//! let evaluator = FilterEvaluator::new(&filter);
//!
//! assert!(evaluator.matches(&Item::new(1, 200, "Shirt")));
//! assert!(!evaluator.matches(&Item::new(1, 201, "Shirt")));
//! ```

use tracing::trace;

use super::ast::{Filter, MatchMode};
use crate::item::{AttributeValue, Item};

/// Evaluates a resolved filter against items.
#[derive(Debug, Clone, Copy)]
pub struct FilterEvaluator<'a> {
    filter: &'a Filter,
}

impl<'a> FilterEvaluator<'a> {
    /// Creates a new filter evaluator.
    pub fn new(filter: &'a Filter) -> Self {
        Self { filter }
    }

    /// Returns true if the item matches the filter.
    pub fn matches(&self, item: &Item) -> bool {
        self.filter.matches(item)
    }

    /// Filters a slice of items, returning only those that match.
    pub fn filter_items<'b>(&self, items: &'b [Item]) -> Vec<&'b Item> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

impl Filter {
    /// Returns true if the item matches this filter.
    pub fn matches(&self, item: &Item) -> bool {
        match self {
            // Leaf filters
            Filter::Name {
                value,
                hue,
                match_mode,
            } => hue_allows(*hue, item) && text_matches(&item.name, value, *match_mode),
            Filter::Property {
                value,
                hue,
                match_mode,
            } => {
                hue_allows(*hue, item)
                    && item
                        .property_lines()
                        .any(|line| text_matches(line, value, *match_mode))
            }
            Filter::PropertyValue {
                property,
                value,
                case_sensitive,
            } => attribute_matches(item, property, value, *case_sensitive),
            Filter::Serial(serial) => item.serial == *serial,
            Filter::Type { graphic, hue } => hue_allows(*hue, item) && item.graphic == *graphic,
            Filter::TypeRange { start, end } => (*start..=*end).contains(&item.graphic),
            Filter::MaxPropertyCount(max) => item.property_count().map_or(true, |count| count <= *max),

            // Combinators
            Filter::All(children) => children.iter().all(|child| child.matches(item)),
            Filter::Any(children) => children.iter().any(|child| child.matches(item)),
            Filter::Not(inner) => !inner.matches(item),
        }
    }
}

/// The hue gate: `None` allows any item.
fn hue_allows(required: Option<u16>, item: &Item) -> bool {
    required.map_or(true, |hue| item.hue == Some(hue))
}

/// Case-insensitive text comparison.
fn text_matches(haystack: &str, needle: &str, mode: MatchMode) -> bool {
    let haystack = haystack.to_lowercase();
    let needle = needle.to_lowercase();
    match mode {
        MatchMode::Partial => haystack.contains(&needle),
        MatchMode::Exact => haystack == needle,
    }
}

/// Compares a named attribute, failing closed when it is missing or cannot
/// be coerced.
fn attribute_matches(item: &Item, property: &str, expected: &AttributeValue, case_sensitive: bool) -> bool {
    let Some(actual) = item.attribute(property) else {
        trace!(serial = item.serial, property, "attribute missing");
        return false;
    };

    match expected {
        AttributeValue::Number(expected) => match actual.as_integer() {
            Some(actual) => actual == *expected,
            None => {
                trace!(serial = item.serial, property, value = %actual, "attribute is not numeric");
                false
            }
        },
        AttributeValue::Text(expected) => {
            let actual = actual.to_string();
            if case_sensitive {
                actual == *expected
            } else {
                actual.to_lowercase() == expected.to_lowercase()
            }
        }
    }
}
