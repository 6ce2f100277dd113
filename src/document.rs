//! Document type, id handling, and lookup-table construction.
//!
//! Documents are open-ended JSON objects identified by their [`ID_FIELD`]
//! (`_id`) value. The join operations build transient lookup tables from
//! ids to documents here; nothing in this module is ever persisted.

use std::collections::HashMap;

use serde_json::Value;

/// A document: an open mapping from field name to JSON value.
pub type Document = serde_json::Map<String, Value>;

/// The field that uniquely identifies a document.
pub const ID_FIELD: &str = "_id";

/// Coerce an id value to its lookup key.
///
/// Strings key as themselves; numbers key by their canonical rendering,
/// matching the string-keyed lookup tables of document stores that
/// accept numeric ids. Any other value is not a usable id.
pub fn id_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A document's own `_id` value, if it carries a usable one.
pub fn doc_id(doc: &Document) -> Option<&Value> {
    doc.get(ID_FIELD).filter(|v| id_key(v).is_some())
}

/// Build a lookup table from fetched documents, keyed by their own `_id`.
///
/// Documents without a usable `_id` are skipped. If two documents share
/// an id, the later one in iteration order wins; getters for
/// identity-style fetches are expected to return at most one document
/// per id, so the tie-break is implementation-defined behavior rather
/// than a contract.
pub fn index_by_id(docs: Vec<Document>) -> HashMap<String, Document> {
    let mut by_id = HashMap::with_capacity(docs.len());
    for doc in docs {
        if let Some(key) = doc.get(ID_FIELD).and_then(id_key) {
            by_id.insert(key, doc);
        }
    }
    by_id
}

/// Index items by `_id`, mapping to their position in the slice.
///
/// The reverse joins mutate items while iterating the fetched documents,
/// so they address items by position instead of holding borrows.
pub(crate) fn index_items(items: &[Document]) -> HashMap<String, usize> {
    let mut by_id = HashMap::with_capacity(items.len());
    for (pos, item) in items.iter().enumerate() {
        if let Some(key) = item.get(ID_FIELD).and_then(id_key) {
            by_id.insert(key, pos);
        }
    }
    by_id
}

/// Append `doc` to the array field `field` of `item`, creating the array
/// on first use.
///
/// A pre-existing non-array value under `field` is replaced by a fresh
/// array holding the attachment.
pub(crate) fn push_attachment(item: &mut Document, field: &str, doc: &Document) {
    let attached = Value::Object(doc.clone());
    match item
        .entry(field.to_string())
        .or_insert_with(|| Value::Array(Vec::new()))
    {
        Value::Array(arr) => arr.push(attached),
        slot => *slot = Value::Array(vec![attached]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().expect("object fixture").clone()
    }

    #[test]
    fn test_id_key_strings_and_numbers() {
        assert_eq!(id_key(&json!("south-street")), Some("south-street".into()));
        assert_eq!(id_key(&json!(42)), Some("42".into()));
        // Arrays, objects, null, booleans are not usable ids
        assert_eq!(id_key(&json!(null)), None);
        assert_eq!(id_key(&json!(true)), None);
        assert_eq!(id_key(&json!(["a"])), None);
    }

    #[test]
    fn test_index_by_id_skips_missing_ids() {
        let docs = vec![doc(json!({ "_id": "a" })), doc(json!({ "name": "no id" }))];
        let by_id = index_by_id(docs);
        assert_eq!(by_id.len(), 1);
        assert!(by_id.contains_key("a"));
    }

    #[test]
    fn test_index_by_id_last_duplicate_wins() {
        let docs = vec![
            doc(json!({ "_id": "a", "rev": 1 })),
            doc(json!({ "_id": "a", "rev": 2 })),
        ];
        let by_id = index_by_id(docs);
        assert_eq!(by_id["a"]["rev"], json!(2));
    }

    #[test]
    fn test_index_items_maps_positions() {
        let items = vec![
            doc(json!({ "_id": "x" })),
            doc(json!({})),
            doc(json!({ "_id": "y" })),
        ];
        let by_id = index_items(&items);
        assert_eq!(by_id.get("x"), Some(&0));
        assert_eq!(by_id.get("y"), Some(&2));
        assert_eq!(by_id.len(), 2);
    }

    #[test]
    fn test_push_attachment_creates_array_lazily() {
        let mut item = doc(json!({ "_id": "x" }));
        let other = doc(json!({ "_id": "o" }));
        assert!(item.get("_others").is_none());
        push_attachment(&mut item, "_others", &other);
        push_attachment(&mut item, "_others", &other);
        assert_eq!(item["_others"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_push_attachment_replaces_non_array_value() {
        let mut item = doc(json!({ "_id": "x", "_others": "stale" }));
        let other = doc(json!({ "_id": "o" }));
        push_attachment(&mut item, "_others", &other);
        assert_eq!(item["_others"], json!([{ "_id": "o" }]));
    }
}
