//! # Docjoin
//!
//! In-memory relational joins for collections of JSON documents.
//!
//! The crate never talks to a data store. Callers hand it documents they
//! have already fetched plus a [`Getter`] that resolves a batch of ids;
//! the join operations extract the foreign keys, fetch once, and attach
//! the related documents onto the originals in place.

pub mod document;
pub mod error;
pub mod field;
pub mod getter;
pub mod join;

pub use document::{Document, ID_FIELD};
pub use error::JoinError;
pub use field::FieldSpec;
pub use getter::Getter;
pub use join::{by_array, by_array_reverse, by_one, by_one_reverse};
