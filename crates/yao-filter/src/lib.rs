//! Filter engine for sorting game inventory items.
//!
//! This crate provides the item model and a small predicate language used to
//! decide which items an organizer should move:
//!
//! - [`Item`] - the read-only item record reported by the game client
//! - [`filter`] - filter trees, shorthand resolution, evaluation and the
//!   serde-facing filter definitions used by configuration files
//!
//! # Example
//!
//! ```
//! use yao_filter_rs::filter::resolve;
//! use yao_filter_rs::Item;
//!
//! let filters = resolve(vec!["wand & unidentified".into()], Some('&'));
//!
//! assert!(filters[0].matches(&Item::new(1, 0xdf2, "Unidentified Wand")));
//! assert!(!filters[0].matches(&Item::new(2, 0xdf2, "Wand")));
//! ```

pub mod filter;
mod item;

pub use filter::{Filter, FilterSpec};
pub use item::{hue_from_raw, parse_integer, AttributeValue, Item, NO_HUE};
