use serde_json::{Map, Value};

/// Structural classification used by [`merge_deep`].
///
/// Only [`Shape::Record`] values are merged key by key; sequences and scalars
/// are opaque and replace whatever they are merged onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// String-keyed object
    Record,
    /// Array
    Sequence,
    /// Null, bool, number or string
    Scalar,
}

impl Shape {
    #[inline]
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => Shape::Record,
            Value::Array(_) => Shape::Sequence,
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Shape::Scalar,
        }
    }
}

/// Deep-merge `source` onto `target`, returning a new value.
///
/// Rules, applied per key of `source`:
/// - both sides are records: merged recursively
/// - the key is new: the source value is copied in
/// - otherwise the source value replaces the target value, so arrays are
///   replaced wholesale and never concatenated or zipped
///
/// If either argument is not a record the result is a copy of `target`. This
/// holds when recursing too: a record in `source` never replaces a non-record
/// already present in `target`, so `{"a": 5}` merged with `{"a": {"x": 1}}`
/// stays `{"a": 5}` rather than becoming `{"a": {}}` as a shallow
/// assign-onto-empty copy would produce.
///
/// Keys of `target` keep their position; keys introduced by `source` are
/// appended in `source` order. Neither argument is modified.
///
/// ```
/// use brisk::merge::merge_deep;
/// use serde_json::json;
///
/// let merged = merge_deep(&json!({"a": 1, "b": {"c": 2}}), &json!({"b": {"d": 3}, "e": 4}));
/// assert_eq!(merged, json!({"a": 1, "b": {"c": 2, "d": 3}, "e": 4}));
/// ```
#[must_use]
pub fn merge_deep(target: &Value, source: &Value) -> Value {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => Value::Object(merge_records(target, source)),
        _ => target.clone(),
    }
}

fn merge_records(target: &Map<String, Value>, source: &Map<String, Value>) -> Map<String, Value> {
    let mut output = target.clone();

    for (key, value) in source {
        let merged = match (Shape::of(value), target.get(key)) {
            (Shape::Record, Some(existing)) => merge_deep(existing, value),
            _ => value.clone(),
        };
        // Map::insert keeps the slot of an existing key under preserve_order
        output.insert(key.clone(), merged);
    }

    output
}

/// Identity pass-through kept for API parity with the framework's `clone`
/// helper, which never performed a deep copy.
#[inline]
#[must_use]
pub fn clone<T>(value: T) -> T {
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_records_merge() {
        let merged = merge_deep(&json!({"a": 1, "b": {"c": 2}}), &json!({"b": {"d": 3}, "e": 4}));
        assert_eq!(merged, json!({"a": 1, "b": {"c": 2, "d": 3}, "e": 4}));
    }

    #[test]
    fn test_arrays_replace() {
        let merged = merge_deep(&json!({"a": [1, 2]}), &json!({"a": [3, 4]}));
        assert_eq!(merged, json!({"a": [3, 4]}));
    }

    #[test]
    fn test_array_replaces_record() {
        let merged = merge_deep(&json!({"a": {"x": 1}}), &json!({"a": [1]}));
        assert_eq!(merged, json!({"a": [1]}));
    }

    #[test]
    fn test_null_overwrites() {
        let merged = merge_deep(&json!({"a": {"x": 1}}), &json!({"a": null}));
        assert_eq!(merged, json!({"a": null}));
    }

    #[test]
    fn test_record_does_not_replace_scalar() {
        let merged = merge_deep(&json!({"a": 5}), &json!({"a": {"x": 1}}));
        assert_eq!(merged, json!({"a": 5}));
    }

    #[test]
    fn test_non_record_inputs_return_target() {
        assert_eq!(merge_deep(&json!(1), &json!({"a": 1})), json!(1));
        assert_eq!(merge_deep(&json!({"a": 1}), &json!([1, 2])), json!({"a": 1}));
        assert_eq!(merge_deep(&json!("x"), &json!("y")), json!("x"));
    }

    #[test]
    fn test_key_order_target_first() {
        let merged = merge_deep(&json!({"z": 1, "a": 2}), &json!({"m": 3, "a": 4, "b": 5}));
        let keys: Vec<&str> = merged
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["z", "a", "m", "b"]);
        assert_eq!(merged["a"], json!(4));
    }

    #[test]
    fn test_inputs_not_mutated() {
        let target = json!({"a": {"b": [1, 2]}, "c": "x"});
        let source = json!({"a": {"d": true}, "e": {"f": 1}});
        let (t0, s0) = (target.clone(), source.clone());
        let _ = merge_deep(&target, &source);
        assert_eq!(target, t0);
        assert_eq!(source, s0);
    }

    #[test]
    fn test_merge_with_empty_is_idempotent() {
        let merged = merge_deep(&json!({"a": {"b": 1}}), &json!({"a": {"c": 2}, "d": [1]}));
        assert_eq!(merge_deep(&merged, &json!({})), merged);
    }

    #[test]
    fn test_shape_classification() {
        assert_eq!(Shape::of(&json!({})), Shape::Record);
        assert_eq!(Shape::of(&json!([])), Shape::Sequence);
        assert_eq!(Shape::of(&json!(null)), Shape::Scalar);
        assert_eq!(Shape::of(&json!("s")), Shape::Scalar);
    }

    #[test]
    fn test_clone_is_identity() {
        let v = json!({"a": 1});
        assert_eq!(clone(v.clone()), v);
    }
}
