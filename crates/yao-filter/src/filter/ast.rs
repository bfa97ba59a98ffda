//! Filter trees: resolved filters and unresolved shorthand specs.

use crate::item::AttributeValue;

/// How a text filter compares against its target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MatchMode {
    /// Case-insensitive substring containment.
    #[default]
    Partial,
    /// Case-insensitive full equality.
    Exact,
}

/// A resolved filter.
///
/// Leaves test an item directly; `All`, `Any` and `Not` combine other
/// resolved filters. A `Filter` never contains shorthand, so it can be
/// evaluated as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    // ==================== Leaf Filters ====================
    /// Matches against the item name.
    Name {
        /// Text to look for.
        value: String,
        /// Required hue, if any.
        hue: Option<u16>,
        /// Substring or exact comparison.
        match_mode: MatchMode,
    },

    /// Matches against the item's property lines (the name line excluded).
    Property {
        /// Text to look for.
        value: String,
        /// Required hue, if any.
        hue: Option<u16>,
        /// Substring or exact comparison.
        match_mode: MatchMode,
    },

    /// Exact comparison against a named item attribute.
    PropertyValue {
        /// Attribute name, looked up case-insensitively.
        property: String,
        /// Expected value. Numbers compare numerically.
        value: AttributeValue,
        /// Compare text values case-sensitively.
        case_sensitive: bool,
    },

    /// Matches a single item serial.
    Serial(u32),

    /// Matches an item graphic.
    Type {
        /// Required graphic.
        graphic: u32,
        /// Required hue, if any.
        hue: Option<u16>,
    },

    /// Matches graphics in `start..=end`.
    TypeRange {
        /// First graphic in the range.
        start: u32,
        /// Last graphic in the range (inclusive).
        end: u32,
    },

    /// Matches items with at most this many property lines.
    MaxPropertyCount(usize),

    // ==================== Combinators ====================
    /// Every child must match. Empty is true.
    All(Vec<Filter>),

    /// At least one child must match. Empty is false.
    Any(Vec<Filter>),

    /// Inverts the child.
    Not(Box<Filter>),
}

impl Filter {
    /// Partial, case-insensitive name match.
    pub fn name(value: impl Into<String>) -> Self {
        Filter::Name {
            value: value.into(),
            hue: None,
            match_mode: MatchMode::Partial,
        }
    }

    /// Exact, case-insensitive name match.
    pub fn name_exact(value: impl Into<String>) -> Self {
        Filter::Name {
            value: value.into(),
            hue: None,
            match_mode: MatchMode::Exact,
        }
    }

    /// Partial, case-insensitive property match.
    pub fn property(value: impl Into<String>) -> Self {
        Filter::Property {
            value: value.into(),
            hue: None,
            match_mode: MatchMode::Partial,
        }
    }

    /// Exact, case-insensitive property line match.
    pub fn property_exact(value: impl Into<String>) -> Self {
        Filter::Property {
            value: value.into(),
            hue: None,
            match_mode: MatchMode::Exact,
        }
    }

    /// Case-insensitive attribute comparison.
    pub fn property_value(property: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Filter::PropertyValue {
            property: property.into(),
            value: value.into(),
            case_sensitive: false,
        }
    }

    /// Serial match.
    pub fn serial(serial: u32) -> Self {
        Filter::Serial(serial)
    }

    /// Graphic match.
    pub fn type_id(graphic: u32) -> Self {
        Filter::Type { graphic, hue: None }
    }

    /// Graphic range match (inclusive on both ends).
    pub fn type_range(start: u32, end: u32) -> Self {
        Filter::TypeRange { start, end }
    }

    /// Property count limit.
    pub fn max_property_count(max: usize) -> Self {
        Filter::MaxPropertyCount(max)
    }

    /// AND over `filters`.
    ///
    /// # Example
    ///
    /// ```
    /// use yao_filter_rs::filter::Filter;
    ///
    /// let filter = Filter::all([Filter::name("wand"), Filter::property("unidentified")]);
    /// assert!(matches!(filter, Filter::All(ref children) if children.len() == 2));
    /// ```
    pub fn all(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::All(filters.into_iter().collect())
    }

    /// OR over `filters`.
    pub fn any(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::Any(filters.into_iter().collect())
    }

    /// Negation of `inner`.
    pub fn negate(inner: Filter) -> Self {
        Filter::Not(Box::new(inner))
    }

    /// A filter that never matches.
    pub fn never() -> Self {
        Filter::Any(Vec::new())
    }

    /// Adds a hue gate to `Name`, `Property` and `Type` filters.
    ///
    /// Other variants are returned unchanged.
    pub fn with_hue(self, required: u16) -> Self {
        match self {
            Filter::Name {
                value, match_mode, ..
            } => Filter::Name {
                value,
                hue: Some(required),
                match_mode,
            },
            Filter::Property {
                value, match_mode, ..
            } => Filter::Property {
                value,
                hue: Some(required),
                match_mode,
            },
            Filter::Type { graphic, .. } => Filter::Type {
                graphic,
                hue: Some(required),
            },
            other => other,
        }
    }

    /// Makes a `PropertyValue` comparison case-sensitive.
    pub fn case_sensitive(self) -> Self {
        match self {
            Filter::PropertyValue {
                property, value, ..
            } => Filter::PropertyValue {
                property,
                value,
                case_sensitive: true,
            },
            other => other,
        }
    }

    /// Returns true for `All`, `Any` and `Not`.
    pub fn is_combinator(&self) -> bool {
        matches!(self, Filter::All(_) | Filter::Any(_) | Filter::Not(_))
    }

    /// The implicit filter for a text shorthand: name or property contains `value`.
    pub fn implicit_text(value: &str) -> Self {
        Filter::any([Filter::name(value), Filter::property(value)])
    }

    /// The implicit filter for a numeric shorthand: serial or graphic equals `value`.
    pub fn implicit_number(value: u32) -> Self {
        Filter::any([Filter::serial(value), Filter::type_id(value)])
    }
}

/// An unresolved filter as written in configuration.
///
/// Specs may mix concrete filters with shorthand literals at any depth.
/// Resolution turns a spec into a [`Filter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSpec {
    /// An already-resolved filter. Passes through resolution unchanged.
    Filter(Filter),

    /// Numeric shorthand: serial or graphic.
    Number(u32),

    /// Text shorthand: name or property, optionally `&`-joined.
    Text(String),

    /// AND over unresolved children.
    All(Vec<FilterSpec>),

    /// OR over unresolved children.
    Any(Vec<FilterSpec>),

    /// Negation of an unresolved child.
    Not(Box<FilterSpec>),
}

impl From<Filter> for FilterSpec {
    fn from(filter: Filter) -> Self {
        FilterSpec::Filter(filter)
    }
}

impl From<u32> for FilterSpec {
    fn from(value: u32) -> Self {
        FilterSpec::Number(value)
    }
}

impl From<&str> for FilterSpec {
    fn from(value: &str) -> Self {
        FilterSpec::Text(value.to_string())
    }
}

impl From<String> for FilterSpec {
    fn from(value: String) -> Self {
        FilterSpec::Text(value)
    }
}

/// Builds an AND spec.
///
/// # Example
///
/// ```
/// use yao_filter_rs::filter::{all, not, FilterSpec};
///
/// // Every non-weapon artifact
/// let spec = all(["Artifact".into(), not("Weapon")]);
/// assert!(matches!(spec, FilterSpec::All(_)));
/// ```
pub fn all(specs: impl IntoIterator<Item = FilterSpec>) -> FilterSpec {
    FilterSpec::All(specs.into_iter().collect())
}

/// Builds an OR spec.
pub fn any(specs: impl IntoIterator<Item = FilterSpec>) -> FilterSpec {
    FilterSpec::Any(specs.into_iter().collect())
}

/// Builds a NOT spec.
pub fn not(spec: impl Into<FilterSpec>) -> FilterSpec {
    FilterSpec::Not(Box::new(spec.into()))
}
