//! Field specifications: how a join operation reads a key off a document.
//!
//! A [`FieldSpec`] is either a dot-delimited path (`"placeId"`,
//! `"settings.groupIds"`) or an arbitrary accessor function, for
//! relations whose key is not a literal path. Path traversal tolerates
//! missing intermediate levels: a path into structure the document does
//! not have resolves to absent rather than failing, since input
//! documents routinely lack optional nested fields.

use std::fmt;

use serde_json::Value;

use crate::document::Document;

/// Identifies the field of a document that carries a join key.
pub enum FieldSpec {
    /// A dot-delimited path, pre-split into segments.
    Path(Vec<String>),
    /// A caller-supplied accessor; semantics are entirely the caller's.
    Accessor(Box<dyn Fn(&Document) -> Option<Value> + Send + Sync>),
}

impl FieldSpec {
    /// Build a path spec from a dot-delimited string.
    ///
    /// ```
    /// use docjoin::FieldSpec;
    ///
    /// let spec = FieldSpec::path("settings.groupIds");
    /// ```
    pub fn path(path: &str) -> Self {
        FieldSpec::Path(path.split('.').map(str::to_owned).collect())
    }

    /// Build an accessor spec from a function.
    ///
    /// ```
    /// use docjoin::FieldSpec;
    ///
    /// let spec = FieldSpec::accessor(|doc| doc.get("placeId").cloned());
    /// ```
    pub fn accessor<F>(accessor: F) -> Self
    where
        F: Fn(&Document) -> Option<Value> + Send + Sync + 'static,
    {
        FieldSpec::Accessor(Box::new(accessor))
    }

    /// Resolve this spec against a document.
    ///
    /// Path traversal walks one segment at a time; a missing key or a
    /// non-object intermediate value short-circuits to `None`. No error
    /// is ever raised for a missing nested path.
    pub fn resolve(&self, doc: &Document) -> Option<Value> {
        match self {
            FieldSpec::Path(segments) => {
                let mut segments = segments.iter();
                let mut current = doc.get(segments.next()?)?;
                for segment in segments {
                    current = current.get(segment)?;
                }
                Some(current.clone())
            }
            FieldSpec::Accessor(accessor) => accessor(doc),
        }
    }

    /// True iff the spec resolves to a value with at least one id to
    /// contribute.
    ///
    /// Null, `false`, zero, the empty string, and the empty array all
    /// count as absent; an empty array in particular contributes no ids
    /// to a join.
    pub fn present(&self, doc: &Document) -> bool {
        self.resolve_present(doc).is_some()
    }

    /// Resolve, filtered to present values.
    pub(crate) fn resolve_present(&self, doc: &Document) -> Option<Value> {
        self.resolve(doc).filter(is_truthy)
    }
}

impl From<&str> for FieldSpec {
    fn from(path: &str) -> Self {
        FieldSpec::path(path)
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSpec::Path(segments) => {
                write!(f, "FieldSpec::Path({:?})", segments.join("."))
            }
            FieldSpec::Accessor(_) => write!(f, "FieldSpec::Accessor(..)"),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(_) => true,
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
    fn test_resolve_top_level_path() {
        let event = doc(json!({ "_id": "junto", "placeId": "punk-avenue" }));
        let spec = FieldSpec::path("placeId");
        assert_eq!(spec.resolve(&event), Some(json!("punk-avenue")));
    }

    #[test]
    fn test_resolve_nested_path() {
        let jane = doc(json!({
            "_id": "jane",
            "settings": { "groupIds": ["admins"] }
        }));
        let spec = FieldSpec::path("settings.groupIds");
        assert_eq!(spec.resolve(&jane), Some(json!(["admins"])));
    }

    #[test]
    fn test_resolve_missing_intermediate_is_absent() {
        let jherek = doc(json!({ "_id": "jherek", "settings": {} }));
        let spec = FieldSpec::path("settings.groupIds");
        assert_eq!(spec.resolve(&jherek), None);

        // No settings object at all, and a path reaching further down
        let bare = doc(json!({ "_id": "bare" }));
        let deep = FieldSpec::path("settings.nested.groupIds");
        assert_eq!(deep.resolve(&bare), None);
    }

    #[test]
    fn test_resolve_through_non_object_is_absent() {
        let odd = doc(json!({ "_id": "odd", "settings": "compact" }));
        let spec = FieldSpec::path("settings.groupIds");
        assert_eq!(spec.resolve(&odd), None);
    }

    #[test]
    fn test_accessor_delegates() {
        let event = doc(json!({ "_id": "junto", "venue": { "ref": "punk-avenue" } }));
        let spec = FieldSpec::accessor(|d| {
            d.get("venue").and_then(|v| v.get("ref")).cloned()
        });
        assert_eq!(spec.resolve(&event), Some(json!("punk-avenue")));
    }

    #[test]
    fn test_present_truthiness() {
        let spec = FieldSpec::path("v");
        assert!(spec.present(&doc(json!({ "v": "x" }))));
        assert!(spec.present(&doc(json!({ "v": ["a"] }))));
        assert!(spec.present(&doc(json!({ "v": 1 }))));
        assert!(spec.present(&doc(json!({ "v": {} }))));

        assert!(!spec.present(&doc(json!({}))));
        assert!(!spec.present(&doc(json!({ "v": null }))));
        assert!(!spec.present(&doc(json!({ "v": false }))));
        assert!(!spec.present(&doc(json!({ "v": 0 }))));
        assert!(!spec.present(&doc(json!({ "v": "" }))));
        // An empty array has no ids to contribute
        assert!(!spec.present(&doc(json!({ "v": [] }))));
    }

    #[test]
    fn test_from_str_builds_path() {
        let spec: FieldSpec = "settings.groupIds".into();
        match spec {
            FieldSpec::Path(segments) => assert_eq!(segments, vec!["settings", "groupIds"]),
            FieldSpec::Accessor(_) => panic!("expected path variant"),
        }
    }
}
