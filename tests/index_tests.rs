//! Index Tests
//!
//! Tests verify:
//! - Replay overwrites unconditionally
//! - Tombstone accounting
//! - Live snapshot ordering used by vacuum
//! - Tombstone purge

use serde_json::json;
use slatekv::index::{Entry, Index};
use slatekv::log::Record;

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_new_index_is_empty() {
    let index = Index::new();

    assert!(index.is_empty());
    assert_eq!(index.len(), 0);
    assert_eq!(index.live_count(), 0);
    assert_eq!(index.tombstone_count(), 0);
}

#[test]
fn test_apply_overwrites() {
    let mut index = Index::new();

    index.apply(Record::live(5, "k", json!("first")));
    index.apply(Record::live(3, "k", json!("second")));

    assert_eq!(index.len(), 1);
    assert_eq!(index.get("k"), Some(&Entry::live(3, json!("second"))));
}

#[test]
fn test_tombstone_hidden_from_get_live() {
    let mut index = Index::new();

    index.apply(Record::live(1, "k", json!(1)));
    index.apply(Record::tombstone(2, "k"));

    assert!(index.get_live("k").is_none());
    assert_eq!(index.get("k"), Some(&Entry::tombstone(2)));
    assert_eq!(index.live_count(), 0);
    assert_eq!(index.tombstone_count(), 1);
}

// =============================================================================
// Snapshot Tests
// =============================================================================

#[test]
fn test_live_records_sorted_by_timestamp_then_key() {
    let mut index = Index::new();
    index.insert("c".to_string(), Entry::live(30, json!("c")));
    index.insert("b".to_string(), Entry::live(10, json!("b")));
    index.insert("a".to_string(), Entry::live(10, json!("a")));
    index.insert("dead".to_string(), Entry::tombstone(5));

    let keys: Vec<String> = index.live_records().into_iter().map(|r| r.key).collect();

    assert_eq!(keys, vec!["a", "b", "c"]);
}

#[test]
fn test_purge_tombstones() {
    let mut index = Index::new();
    index.insert("live".to_string(), Entry::live(1, json!(true)));
    index.insert("dead1".to_string(), Entry::tombstone(2));
    index.insert("dead2".to_string(), Entry::tombstone(3));

    let purged = index.purge_tombstones();

    assert_eq!(purged, 2);
    assert_eq!(index.len(), 1);
    assert!(index.get("dead1").is_none());
    assert!(index.get_live("live").is_some());
}
