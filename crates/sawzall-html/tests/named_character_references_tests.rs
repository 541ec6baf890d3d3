//! Integration tests for named character reference lookup.

use sawzall_html::tokenizer::named_character_references::{any_entity_has_prefix, lookup_entity};

#[test]
fn test_lookup_common_entities() {
    assert_eq!(lookup_entity("amp;"), Some("&"));
    assert_eq!(lookup_entity("lt;"), Some("<"));
    assert_eq!(lookup_entity("nbsp;"), Some("\u{00A0}"));
    assert_eq!(lookup_entity("hellip;"), Some("\u{2026}"));
}

#[test]
fn test_lookup_is_case_sensitive() {
    assert_eq!(lookup_entity("AMP;"), Some("&"));
    assert_eq!(lookup_entity("Amp;"), None);
    assert_eq!(lookup_entity("Alpha;"), Some("\u{391}"));
    assert_eq!(lookup_entity("alpha;"), Some("\u{3B1}"));
}

#[test]
fn test_legacy_entities_without_semicolon() {
    assert_eq!(lookup_entity("copy"), Some("\u{A9}"));
    // Only the legacy set is recognized without the semicolon.
    assert_eq!(lookup_entity("hellip"), None);
}

#[test]
fn test_multi_code_point_entity() {
    assert_eq!(lookup_entity("NotEqualTilde;"), Some("\u{2242}\u{338}"));
}

#[test]
fn test_astral_entity() {
    assert_eq!(lookup_entity("Afr;"), Some("\u{1D504}"));
}

#[test]
fn test_prefix_matching() {
    assert!(any_entity_has_prefix("no"));
    assert!(any_entity_has_prefix("notin"));
    assert!(any_entity_has_prefix("amp;"));
    assert!(!any_entity_has_prefix("ampx"));
    assert!(!any_entity_has_prefix("xyz"));
}
