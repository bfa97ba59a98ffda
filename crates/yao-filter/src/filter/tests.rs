//! Tests for shorthand resolution.

use super::*;

fn text_pair(value: &str) -> Filter {
    Filter::implicit_text(value)
}

// ==================== Term Splitting Tests ====================

#[test]
fn test_split_terms_simple() {
    assert_eq!(split_terms("wand & unidentified", '&'), vec!["wand", "unidentified"]);
}

#[test]
fn test_split_terms_single_term() {
    assert_eq!(split_terms("  gold coin ", '&'), vec!["gold coin"]);
}

#[test]
fn test_split_terms_double_operator_is_one_boundary() {
    assert_eq!(split_terms("a && b", '&'), vec!["a", "b"]);
    assert_eq!(split_terms("a&&&b", '&'), vec!["a", "b"]);
}

#[test]
fn test_split_terms_spaced_operators() {
    assert_eq!(split_terms("a & & b", '&'), vec!["a", "b"]);
}

#[test]
fn test_split_terms_leading_and_trailing_operator() {
    assert_eq!(split_terms("& a", '&'), vec!["a"]);
    assert_eq!(split_terms("&foo", '&'), vec!["foo"]);
    assert_eq!(split_terms("a &", '&'), vec!["a"]);
    assert_eq!(split_terms("&a&", '&'), vec!["a"]);
}

#[test]
fn test_split_terms_empty() {
    assert!(split_terms("", '&').is_empty());
    assert!(split_terms("   ", '&').is_empty());
    assert!(split_terms("&&", '&').is_empty());
    assert!(split_terms(" & & ", '&').is_empty());
}

#[test]
fn test_split_terms_custom_operator() {
    assert_eq!(split_terms("wand + charges", '+'), vec!["wand", "charges"]);
    // The default operator is just text when another one is configured
    assert_eq!(split_terms("salt & pepper", '+'), vec!["salt & pepper"]);
}

#[test]
fn test_split_terms_multibyte() {
    assert_eq!(split_terms("épée § bâton", '§'), vec!["épée", "bâton"]);
}

// ==================== Shorthand Resolution Tests ====================

#[test]
fn test_resolve_number_shorthand() {
    let filters = resolve(vec![FilterSpec::Number(0x0EB3)], Some('&'));
    assert_eq!(
        filters,
        vec![Filter::any([Filter::serial(0x0EB3), Filter::type_id(0x0EB3)])]
    );
}

#[test]
fn test_resolve_number_ignores_and_operator() {
    assert_eq!(
        resolve(vec![0x26u32.into()], None),
        resolve(vec![0x26u32.into()], Some('&'))
    );
}

#[test]
fn test_resolve_text_without_operator() {
    let filters = resolve(vec!["wand & unidentified".into()], None);
    assert_eq!(filters, vec![text_pair("wand & unidentified")]);
}

#[test]
fn test_resolve_text_with_operator() {
    let filters = resolve(vec!["wand & unidentified".into()], Some('&'));
    assert_eq!(
        filters,
        vec![Filter::all([text_pair("wand"), text_pair("unidentified")])]
    );
}

#[test]
fn test_resolve_single_term_keeps_all_wrapper() {
    let filters = resolve(vec!["wand".into()], Some('&'));
    assert_eq!(filters, vec![Filter::all([text_pair("wand")])]);
}

#[test]
fn test_resolve_double_operator() {
    let filters = resolve(vec!["a && b".into()], Some('&'));
    assert_eq!(filters, vec![Filter::all([text_pair("a"), text_pair("b")])]);
}

#[test]
fn test_resolve_empty_text_never_matches() {
    let filters = resolve(vec!["".into(), " && ".into()], Some('&'));
    assert_eq!(filters, vec![Filter::never(), Filter::never()]);
}

#[test]
fn test_resolve_empty_text_without_operator_is_plain_pair() {
    // Without splitting there is nothing to drop; the empty string is a
    // substring of every name.
    let filters = resolve(vec!["".into()], None);
    assert_eq!(filters, vec![text_pair("")]);
}

#[test]
fn test_resolve_leaf_passes_through() {
    let leaf = Filter::type_range(100, 200);
    let filters = resolve(vec![leaf.clone().into()], Some('&'));
    assert_eq!(filters, vec![leaf]);
}

#[test]
fn test_resolve_nested_combinators() {
    let spec = all([
        "artifact".into(),
        not("weapon"),
        any([FilterSpec::Number(0x0EB3), FilterSpec::from(Filter::serial(7))]),
    ]);
    let filters = resolve(vec![spec], None);
    assert_eq!(
        filters,
        vec![Filter::all([
            text_pair("artifact"),
            Filter::negate(text_pair("weapon")),
            Filter::any([Filter::implicit_number(0x0EB3), Filter::serial(7)]),
        ])]
    );
}

#[test]
fn test_resolve_not_of_not() {
    let filters = resolve(vec![not(not("gold"))], None);
    assert_eq!(
        filters,
        vec![Filter::negate(Filter::negate(text_pair("gold")))]
    );
}

#[test]
fn test_resolve_preserves_order() {
    let filters = resolve(vec!["a".into(), 1u32.into(), "b".into()], None);
    assert_eq!(
        filters,
        vec![text_pair("a"), Filter::implicit_number(1), text_pair("b")]
    );
}

#[test]
fn test_resolve_empty_combinators() {
    let filters = resolve(vec![FilterSpec::All(vec![]), FilterSpec::Any(vec![])], Some('&'));
    assert_eq!(filters, vec![Filter::All(vec![]), Filter::Any(vec![])]);
}

#[test]
fn test_resolve_is_idempotent() {
    let specs = vec![
        "wand & unidentified".into(),
        0x0EB3u32.into(),
        all(["artifact".into(), not("weapon")]),
        Filter::property("slayer").with_hue(33).into(),
    ];
    let once = resolve(specs, Some('&'));
    let twice = resolve(once.iter().cloned().map(FilterSpec::from).collect(), Some('&'));
    assert_eq!(once, twice);

    // Even with a different operator, resolved filters are left alone
    let other = resolve(once.iter().cloned().map(FilterSpec::from).collect(), None);
    assert_eq!(once, other);
}

#[test]
fn test_resolver_default_operator() {
    let resolver = ShorthandResolver::default();
    assert_eq!(resolver.and_operator(), Some(DEFAULT_AND_OPERATOR));
    assert_eq!(
        resolver.resolve("a & b".into()),
        Filter::all([text_pair("a"), text_pair("b")])
    );
}

#[test]
fn test_combinator_helpers() {
    assert!(Filter::All(vec![]).is_combinator());
    assert!(Filter::negate(Filter::serial(1)).is_combinator());
    assert!(!Filter::serial(1).is_combinator());
}

#[test]
fn test_with_hue_ignores_ungated_variants() {
    assert_eq!(Filter::serial(5).with_hue(33), Filter::serial(5));
    assert_eq!(
        Filter::type_range(1, 2).with_hue(33),
        Filter::type_range(1, 2)
    );
}
