//! Array-key joins: `by_array` and `by_array_reverse`.

use serde_json::Value;

use crate::document::{id_key, index_by_id, index_items, push_attachment, Document};
use crate::error::JoinError;
use crate::field::FieldSpec;
use crate::getter::Getter;
use crate::join::collect_item_ids;

/// One-to-many join via an array field of the items.
///
/// If you have users and wish to bring all associated groups into a
/// `_groups` array based on a `groupIds` array field, this is what you
/// want.
///
/// Every item's id array is concatenated — duplicates preserved, absent
/// or non-array values contributing nothing — into one candidate list
/// for a single fetch; an empty list means the getter is never called.
/// Each item then walks its own id array in order and appends the match
/// (if any) for each id to `objects_field`, created on first append.
/// Per-item result order therefore mirrors the item's own id array, not
/// the getter's return order, and duplicate ids yield duplicate
/// attachments.
///
/// # Errors
///
/// Forwards the getter's error unchanged; no attachment is performed in
/// that case.
pub fn by_array<G>(
    items: &mut [Document],
    ids_field: &FieldSpec,
    objects_field: &str,
    mut getter: G,
) -> Result<(), JoinError>
where
    G: Getter,
{
    let mut other_ids = Vec::new();
    for item in items.iter() {
        if let Some(Value::Array(ids)) = ids_field.resolve_present(item) {
            other_ids.extend(ids);
        }
    }
    if other_ids.is_empty() {
        return Ok(());
    }
    log::trace!("by_array: fetching {} related id(s)", other_ids.len());
    let others_by_id = index_by_id(getter.fetch(&other_ids)?);
    for item in items.iter_mut() {
        let Some(Value::Array(ids)) = ids_field.resolve_present(item) else {
            continue;
        };
        for id in &ids {
            if let Some(other) = id_key(id).and_then(|key| others_by_id.get(&key)) {
                push_attachment(item, objects_field, other);
            }
        }
    }
    Ok(())
}

/// One-to-many join via an array field of the *related* documents.
///
/// If you have groups and wish to bring all associated users into a
/// `_users` array based on a `groupIds` array field of those users,
/// this is what you want. `ids_field` is resolved against the related
/// documents and yields item ids.
///
/// The getter receives the ids of all items (none usable → trivial
/// success, no fetch). For each returned document, every occurrence of
/// a known item id in its array appends that document to the item's
/// `objects_field`; a document referencing several items is attached to
/// all of them. Per-item order follows the getter's return order.
///
/// # Errors
///
/// Forwards the getter's error unchanged; no attachment is performed in
/// that case.
pub fn by_array_reverse<G>(
    items: &mut [Document],
    ids_field: &FieldSpec,
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
    log::trace!(
        "by_array_reverse: fetching for {} item id(s)",
        item_ids.len()
    );
    let others = getter.fetch(&item_ids)?;
    let items_by_id = index_items(items);
    for other in &others {
        let Some(Value::Array(ids)) = ids_field.resolve_present(other) else {
            continue;
        };
        for id in &ids {
            if let Some(&pos) = id_key(id).and_then(|key| items_by_id.get(&key)) {
                push_attachment(&mut items[pos], objects_field, other);
            }
        }
    }
    Ok(())
}
