//! Content-addressed caching for generated calendar documents.
//!
//! Keys are hex SHA-256 digests over the canonical serialization of
//! everything that influences a document: the teacher identity, the table
//! fingerprint, the column mapping, whether shared rows are appended, and
//! the shared inclusion map. Identical requests hit, any edit misses. The
//! cache itself is a plain map with manual invalidation.

use anyhow::{Context, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};

use crate::parsing::{ColumnMap, RawTable};

/// Calculate SHA-256 checksum of serialized content.
///
/// Returns the hexadecimal string representation of the hash.
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}

/// Fingerprint of a loaded table: the checksum of its serialized form.
pub fn table_fingerprint(table: &RawTable) -> Result<String> {
    let serialized =
        serde_json::to_string(table).context("Failed to serialize table for fingerprinting")?;
    Ok(calculate_checksum(&serialized))
}

/// Everything that influences the bytes of one generated document.
///
/// The inclusion map is keyed by original row index; a `BTreeMap` keeps
/// the serialization independent of insertion order.
#[derive(Debug, Serialize)]
struct CacheKeyInput<'a> {
    teacher: &'a str,
    table: &'a str,
    columns: &'a ColumnMap,
    include_shared: bool,
    inclusion: BTreeMap<usize, bool>,
}

/// Compute the cache key for one document request.
pub fn document_cache_key(
    teacher: &str,
    fingerprint: &str,
    columns: &ColumnMap,
    include_shared: bool,
    inclusion: &HashMap<usize, bool>,
) -> Result<String> {
    let input = CacheKeyInput {
        teacher,
        table: fingerprint,
        columns,
        include_shared,
        inclusion: inclusion.iter().map(|(idx, keep)| (*idx, *keep)).collect(),
    };

    let serialized =
        serde_json::to_string(&input).context("Failed to serialize cache key input")?;
    Ok(calculate_checksum(&serialized))
}

/// In-memory store of generated calendar documents.
#[derive(Debug, Default)]
pub struct CalendarCache {
    entries: HashMap<String, String>,
}

impl CalendarCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: String, document: String) {
        self.entries.insert(key, document);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached document.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::CellValue;

    fn sample_table() -> RawTable {
        RawTable::new(
            vec!["Datum".to_string(), "Docenten".to_string()],
            vec![
                vec![
                    CellValue::Text("11-03-2024".to_string()),
                    CellValue::Text("jan".to_string()),
                ],
                vec![
                    CellValue::Text("18-03-2024".to_string()),
                    CellValue::Text("piet".to_string()),
                ],
            ],
        )
    }

    #[test]
    fn test_checksum_consistency() {
        let content = "BEGIN:VCALENDAR";
        assert_eq!(calculate_checksum(content), calculate_checksum(content));
    }

    #[test]
    fn test_different_content_different_checksum() {
        assert_ne!(calculate_checksum("a"), calculate_checksum("b"));
    }

    /// Identical requests map to the same key.
    #[test]
    fn test_same_inputs_share_a_key() {
        let fingerprint = table_fingerprint(&sample_table()).unwrap();
        let columns = ColumnMap::default();
        let inclusion = HashMap::from([(0, true), (3, false)]);

        let a = document_cache_key("jan", &fingerprint, &columns, true, &inclusion).unwrap();
        let b = document_cache_key("jan", &fingerprint, &columns, true, &inclusion).unwrap();
        assert_eq!(a, b);
    }

    /// Insertion order of the inclusion map does not leak into the key.
    #[test]
    fn test_inclusion_insertion_order_is_irrelevant() {
        let fingerprint = table_fingerprint(&sample_table()).unwrap();
        let columns = ColumnMap::default();

        let mut forward = HashMap::new();
        forward.insert(0, true);
        forward.insert(5, false);
        let mut backward = HashMap::new();
        backward.insert(5, false);
        backward.insert(0, true);

        let a = document_cache_key("jan", &fingerprint, &columns, false, &forward).unwrap();
        let b = document_cache_key("jan", &fingerprint, &columns, false, &backward).unwrap();
        assert_eq!(a, b);
    }

    /// Any switch that changes the output must change the key.
    #[test]
    fn test_options_change_the_key() {
        let fingerprint = table_fingerprint(&sample_table()).unwrap();
        let columns = ColumnMap::default();
        let inclusion = HashMap::new();

        let base = document_cache_key("jan", &fingerprint, &columns, false, &inclusion).unwrap();

        let shared = document_cache_key("jan", &fingerprint, &columns, true, &inclusion).unwrap();
        assert_ne!(base, shared);

        let other_teacher =
            document_cache_key("piet", &fingerprint, &columns, false, &inclusion).unwrap();
        assert_ne!(base, other_teacher);

        let toggled = HashMap::from([(1, false)]);
        let excluded = document_cache_key("jan", &fingerprint, &columns, false, &toggled).unwrap();
        assert_ne!(base, excluded);
    }

    /// Editing one cell gives the table a new fingerprint.
    #[test]
    fn test_edited_cell_changes_the_fingerprint() {
        let original = sample_table();
        let edited = RawTable::new(
            vec!["Datum".to_string(), "Docenten".to_string()],
            vec![
                vec![
                    CellValue::Text("11-03-2024".to_string()),
                    CellValue::Text("jan".to_string()),
                ],
                vec![
                    CellValue::Text("18-03-2024".to_string()),
                    CellValue::Text("klaas".to_string()),
                ],
            ],
        );

        assert_ne!(
            table_fingerprint(&original).unwrap(),
            table_fingerprint(&edited).unwrap()
        );
    }

    /// Documents round-trip through the cache until it is cleared.
    #[test]
    fn test_cache_round_trip_and_clear() {
        let mut cache = CalendarCache::new();
        assert!(cache.is_empty());

        cache.insert("key".to_string(), "BEGIN:VCALENDAR".to_string());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("key").map(String::as_str), Some("BEGIN:VCALENDAR"));
        assert!(cache.get("other").is_none());

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get("key").is_none());
    }
}
