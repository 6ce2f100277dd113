//! Join operations over in-memory document collections.
//!
//! Four variants, distinguished by which side carries the foreign key
//! and whether the key is a scalar or an array:
//! - [`by_one`]: item holds a scalar key, one related document attached
//!   per item (events → their place).
//! - [`by_one_reverse`]: related documents hold a scalar key back to
//!   the item, an array of them attached per item (places → their
//!   events).
//! - [`by_array`]: item holds an array of keys (users → their groups).
//! - [`by_array_reverse`]: related documents hold an array of keys back
//!   to items (groups → their users).
//!
//! All four share one shape: extract the candidate ids from one side,
//! short-circuit on an empty set, fetch once through the injected
//! [`Getter`](crate::Getter), build an id lookup table, attach. They
//! mutate the passed-in items in place, touch no state of their own,
//! and are freely reentrant: independent calls may run concurrently.

mod array;
mod one;

#[doc(inline)]
pub use array::{by_array, by_array_reverse};
#[doc(inline)]
pub use one::{by_one, by_one_reverse};

use serde_json::Value;

use crate::document::{doc_id, Document};

/// Collect the `_id` of every item for a reverse join's fetch. Items
/// without a usable `_id` contribute nothing.
fn collect_item_ids(items: &[Document]) -> Vec<Value> {
    items.iter().filter_map(|item| doc_id(item).cloned()).collect()
}
