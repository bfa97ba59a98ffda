//! Shorthand resolution.
//!
//! Turns [`FilterSpec`] trees, which may contain bare strings and numbers,
//! into fully concrete [`Filter`] trees.
//!
//! # Shorthand Grammar
//!
//! ```text
//! number          ::= Any(Serial(number), Type(number))
//! text            ::= Any(Name(text), Property(text))          (no and-operator)
//! text            ::= All(term ("&" term)*)                    (with and-operator)
//! term            ::= Any(Name(term), Property(term))
//! ```
//!
//! Terms are trimmed and empty terms are dropped, so `"a && b"`, `"a & & b"`
//! and `"& a & b &"` all produce exactly the terms `a` and `b`.

use tracing::{debug, warn};

use super::ast::{Filter, FilterSpec};

/// The default AND operator character.
pub const DEFAULT_AND_OPERATOR: char = '&';

/// Resolves shorthand specs into concrete filters.
///
/// Resolution is infallible and idempotent: a [`FilterSpec::Filter`] is
/// returned unchanged, so resolving an already-resolved list yields the
/// same trees.
///
/// # Example
///
/// ```
/// use yao_filter_rs::filter::{Filter, FilterSpec, ShorthandResolver};
///
/// let resolver = ShorthandResolver::new(Some('&'));
/// let filter = resolver.resolve("wand & unidentified".into());
///
/// assert_eq!(
///     filter,
///     Filter::all([Filter::implicit_text("wand"), Filter::implicit_text("unidentified")])
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShorthandResolver {
    and_operator: Option<char>,
}

impl Default for ShorthandResolver {
    fn default() -> Self {
        Self::new(Some(DEFAULT_AND_OPERATOR))
    }
}

impl ShorthandResolver {
    /// Creates a resolver. `None` disables splitting text on an AND operator.
    pub fn new(and_operator: Option<char>) -> Self {
        Self { and_operator }
    }

    /// The configured AND operator.
    pub fn and_operator(&self) -> Option<char> {
        self.and_operator
    }

    /// Resolves every spec, element for element.
    pub fn resolve_all(&self, specs: Vec<FilterSpec>) -> Vec<Filter> {
        specs.into_iter().map(|spec| self.resolve(spec)).collect()
    }

    /// Resolves a single spec, depth-first.
    pub fn resolve(&self, spec: FilterSpec) -> Filter {
        match spec {
            FilterSpec::Filter(filter) => filter,
            FilterSpec::Number(value) => Filter::implicit_number(value),
            FilterSpec::Text(value) => self.resolve_text(&value),
            FilterSpec::All(children) => Filter::All(self.resolve_all(children)),
            FilterSpec::Any(children) => Filter::Any(self.resolve_all(children)),
            FilterSpec::Not(inner) => Filter::negate(self.resolve(*inner)),
        }
    }

    /// Resolves a text shorthand.
    ///
    /// Text without any usable term resolves to a filter that never
    /// matches.
    fn resolve_text(&self, value: &str) -> Filter {
        let Some(operator) = self.and_operator else {
            return Filter::implicit_text(value);
        };

        let terms = split_terms(value, operator);
        if terms.is_empty() {
            warn!(shorthand = value, "shorthand has no terms; it will never match");
            return Filter::never();
        }

        debug!(shorthand = value, terms = ?terms, "resolved shorthand");
        Filter::All(terms.into_iter().map(Filter::implicit_text).collect())
    }
}

/// Splits `value` into trimmed, non-empty terms on `operator`.
///
/// Adjacent operators collapse into a single boundary and leading or
/// trailing operators are ignored, so `"&foo"` yields the single term
/// `foo` rather than no filter at all. There is no escape for a literal
/// operator character.
///
/// # Example
///
/// ```
/// use yao_filter_rs::filter::split_terms;
///
/// assert_eq!(split_terms("wand & unidentified", '&'), vec!["wand", "unidentified"]);
/// assert_eq!(split_terms("a && b", '&'), vec!["a", "b"]);
/// assert_eq!(split_terms("&foo", '&'), vec!["foo"]);
/// assert!(split_terms(" & ", '&').is_empty());
/// ```
pub fn split_terms(value: &str, operator: char) -> Vec<&str> {
    value
        .split(operator)
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .collect()
}

/// Resolves `specs` with the given AND operator.
///
/// Shorthand for `ShorthandResolver::new(and_operator).resolve_all(specs)`.
pub fn resolve(specs: Vec<FilterSpec>, and_operator: Option<char>) -> Vec<Filter> {
    ShorthandResolver::new(and_operator).resolve_all(specs)
}
