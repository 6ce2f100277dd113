//! Scalar-key joins: `by_one` and `by_one_reverse`.

use serde_json::Value;

use crate::document::{id_key, index_by_id, index_items, push_attachment, Document};
use crate::error::JoinError;
use crate::field::FieldSpec;
use crate::getter::Getter;
use crate::join::collect_item_ids;

/// One-to-one join with related documents, forward key.
///
/// If you have events and wish to bring a place document into a
/// `_place` field of each event based on a `placeId` field, this is
/// what you want.
///
/// For each item where `id_field` is present, the id is collected
/// (duplicates and all) and the whole list is handed to `getter` in a
/// single fetch. Each item whose id matched a returned document gets
/// that document under `object_field`; items whose id is absent or
/// unmatched are left untouched. If no item contributes an id, the
/// getter is never called.
///
/// ```
/// use docjoin::{by_one, Document, FieldSpec, JoinError};
/// use serde_json::{json, Value};
///
/// let mut events: Vec<Document> = vec![
///     json!({ "_id": "junto", "placeId": "punk-avenue" })
///         .as_object().unwrap().clone(),
/// ];
/// by_one(
///     &mut events,
///     &FieldSpec::path("placeId"),
///     "_place",
///     |_ids: &[Value]| -> Result<Vec<Document>, JoinError> {
///         Ok(vec![json!({ "_id": "punk-avenue" }).as_object().unwrap().clone()])
///     },
/// )?;
/// assert_eq!(events[0]["_place"]["_id"], json!("punk-avenue"));
/// # Ok::<(), JoinError>(())
/// ```
///
/// # Errors
///
/// Forwards the getter's error unchanged; no attachment is performed in
/// that case.
pub fn by_one<G>(
    items: &mut [Document],
    id_field: &FieldSpec,
    object_field: &str,
    mut getter: G,
) -> Result<(), JoinError>
where
    G: Getter,
{
    let mut other_ids = Vec::new();
    for item in items.iter() {
        if let Some(id) = id_field.resolve_present(item) {
            other_ids.push(id);
        }
    }
    if other_ids.is_empty() {
        return Ok(());
    }
    log::trace!("by_one: fetching {} related id(s)", other_ids.len());
    let others_by_id = index_by_id(getter.fetch(&other_ids)?);
    for item in items.iter_mut() {
        let Some(key) = id_field.resolve_present(item).and_then(|id| id_key(&id)) else {
            continue;
        };
        if let Some(other) = others_by_id.get(&key) {
            item.insert(object_field.to_string(), Value::Object(other.clone()));
        }
    }
    Ok(())
}

/// One-to-many join where the *related* documents carry the foreign
/// key.
///
/// If you have places and wish to retrieve all the events whose
/// `placeId` refers to those places into an `_events` array, this is
/// what you want. `id_field` is resolved against the related documents
/// and names the owning item.
///
/// The getter receives the ids of all items (items without an `_id`
/// contribute nothing; if none has one, the getter is never called).
/// Each returned document whose key names a known item is appended to
/// that item's `objects_field` array, which is created on first match —
/// items with zero matches end up with no field at all. Append order
/// follows the getter's return order. Returned documents naming no
/// known item are silently dropped.
///
/// # Errors
///
/// Forwards the getter's error unchanged; no attachment is performed in
/// that case.
pub fn by_one_reverse<G>(
    items: &mut [Document],
    id_field: &FieldSpec,
    objects_field: &str,
    mut getter: G,
) -> Result<(), JoinError>
where
    G: Getter,
{
    let item_ids = collect_item_ids(items);
    if item_ids.is_empty() {
        return Ok(());
    }
    log::trace!("by_one_reverse: fetching for {} item id(s)", item_ids.len());
    let others = getter.fetch(&item_ids)?;
    let items_by_id = index_items(items);
    for other in &others {
        let Some(key) = id_field.resolve_present(other).and_then(|id| id_key(&id)) else {
            continue;
        };
        if let Some(&pos) = items_by_id.get(&key) {
            push_attachment(&mut items[pos], objects_field, other);
        }
    }
    Ok(())
}
