//! The `Getter` trait — the injected fetch seam.
//!
//! Join operations never query a data store themselves. They hand the
//! candidate id list to a [`Getter`] supplied by the caller and attach
//! whatever documents come back. Any resolution strategy — a database
//! `$in` query, a cache, a fixture table in tests — plugs in behind
//! this trait.

use serde_json::Value;

use crate::document::Document;
use crate::error::JoinError;

/// Resolves a batch of ids to the matching documents.
///
/// Each join operation calls [`fetch`](Getter::fetch) at most once per
/// invocation, with the full candidate id list. Implementations may
/// return the documents in any order and are not required to
/// deduplicate; each returned document should carry its own `_id`.
///
/// The trait is blanket-implemented for closures, so the usual call
/// site passes a closure directly:
///
/// ```
/// use docjoin::{by_one, Document, FieldSpec, JoinError};
/// use serde_json::{json, Value};
///
/// let mut events: Vec<Document> = vec![];
/// by_one(
///     &mut events,
///     &FieldSpec::path("placeId"),
///     "_place",
///     |ids: &[Value]| -> Result<Vec<Document>, JoinError> {
///         // e.g. places.find({ _id: { $in: ids } })
///         Ok(vec![])
///     },
/// )
/// .unwrap();
/// ```
///
/// # Errors
///
/// A failed fetch is reported as [`JoinError`]; the join operation
/// forwards it to its caller unchanged without attaching anything.
pub trait Getter {
    /// Fetch the documents matching `ids`.
    fn fetch(&mut self, ids: &[Value]) -> Result<Vec<Document>, JoinError>;
}

impl<F> Getter for F
where
    F: FnMut(&[Value]) -> Result<Vec<Document>, JoinError>,
{
    fn fetch(&mut self, ids: &[Value]) -> Result<Vec<Document>, JoinError> {
        self(ids)
    }
}
