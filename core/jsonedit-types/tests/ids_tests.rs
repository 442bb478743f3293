use jsonedit_types::{RecordId, UserId, VersionId};
use proptest::prelude::*;
use std::collections::HashSet;
use std::str::FromStr;

// ── RecordId ─────────────────────────────────────────────────────

#[test]
fn record_id_generate_is_unique() {
    let a = RecordId::generate();
    let b = RecordId::generate();
    assert_ne!(a, b);
}

#[test]
fn record_id_generated_is_hyphenless() {
    let id = RecordId::generate();
    assert_eq!(id.as_str().len(), 32);
    assert!(!id.as_str().contains('-'));
}

#[test]
fn record_id_accepts_arbitrary_strings() {
    let id = RecordId::parse("42").unwrap();
    assert_eq!(id.as_str(), "42");
    assert_eq!(id.to_string(), "42");
}

#[test]
fn record_id_parse_rejects_blank() {
    assert!(RecordId::parse("").is_err());
    assert!(RecordId::from_str("   ").is_err());
}

#[test]
fn record_id_empty_is_empty() {
    assert!(RecordId::empty().is_empty());
    assert!(RecordId::default().is_empty());
    assert!(RecordId::new(" ").is_empty());
    assert!(!RecordId::new("1").is_empty());
}

#[test]
fn record_id_serializes_transparently() {
    let id = RecordId::new("abc");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    let back: RecordId = serde_json::from_str("\"abc\"").unwrap();
    assert_eq!(back, id);
}

#[test]
fn record_id_hash_and_eq() {
    let id = RecordId::new("x");
    let mut set = HashSet::new();
    set.insert(id.clone());
    set.insert(id);
    assert_eq!(set.len(), 1);
}

// ── VersionId ────────────────────────────────────────────────────

#[test]
fn version_id_generate_is_unique() {
    assert_ne!(VersionId::generate(), VersionId::generate());
    assert!(VersionId::default().is_empty());
}

// ── UserId ───────────────────────────────────────────────────────

#[test]
fn user_id_trims_input() {
    let id = UserId::parse("  admin ").unwrap();
    assert_eq!(id.as_str(), "admin");
}

#[test]
fn user_id_rejects_blank() {
    assert!(UserId::parse("").is_err());
}

proptest! {
    #[test]
    fn record_id_parse_roundtrips_non_blank(s in "[a-zA-Z0-9]{1,24}") {
        let id = RecordId::parse(&s).unwrap();
        prop_assert_eq!(id.to_string(), s);
    }
}
