//! Filter expressions for selecting items.
//!
//! Filters are built from configuration in two steps. First, a list of
//! [`FilterSpec`] values is assembled, mixing explicit filters with
//! shorthand literals. Then the specs are resolved once into concrete
//! [`Filter`] trees, which can be evaluated any number of times.
//!
//! # Shorthand
//!
//! - A number matches an item's serial or graphic.
//! - A string matches an item's name or any of its property lines.
//! - With an AND operator (default `&`), `"wand & unidentified"` requires
//!   both terms to match.
//!
//! # Leaf Filters
//! - [`Filter::Name`] - name contains (or equals) a value, optionally hue-gated
//! - [`Filter::Property`] - a property line contains (or equals) a value
//! - [`Filter::PropertyValue`] - a named attribute equals a value
//! - [`Filter::Serial`], [`Filter::Type`], [`Filter::TypeRange`]
//! - [`Filter::MaxPropertyCount`]
//!
//! # Combinators
//! - [`Filter::All`] - AND, true when empty
//! - [`Filter::Any`] - OR, false when empty
//! - [`Filter::Not`] - NOT
//!
//! # Example
//!
//! ```
//! use yao_filter_rs::filter::{all, not, resolve, FilterEvaluator};
//! use yao_filter_rs::Item;
//!
//! // Every non-weapon artifact, plus unidentified wands
//! let filters = resolve(
//!     vec![all(["artifact".into(), not("weapon")]), "wand & unidentified".into()],
//!     Some('&'),
//! );
//!
//! let wand = Item::new(0x4000_0001, 0xdf2, "Unidentified Wand");
//! assert!(!FilterEvaluator::new(&filters[0]).matches(&wand));
//! assert!(FilterEvaluator::new(&filters[1]).matches(&wand));
//! ```

mod ast;
mod definition;
mod display;
mod error;
mod evaluator;
pub mod presets;
mod shorthand;

pub use ast::{all, any, not, Filter, FilterSpec, MatchMode};
pub use definition::{
    parse_and_operator, to_specs, FilterDef, NodeDef, PropertyValueDef, TextDef, TypeDef,
};
pub use error::{FilterError, FilterResult};
pub use evaluator::FilterEvaluator;
pub use shorthand::{resolve, split_terms, ShorthandResolver, DEFAULT_AND_OPERATOR};

#[cfg(test)]
mod tests;
