use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Field name holding the trimmed text-node contents of an element
pub const TEXT_FIELD: &str = "_text";

/// Values captured at one path: attribute name (or [`TEXT_FIELD`]) to the
/// values seen there, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeRecord {
    fields: IndexMap<String, Vec<Value>>,
}

impl NodeRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value to the list for `field`
    pub fn push(&mut self, field: impl Into<String>, value: Value) {
        self.fields.entry(field.into()).or_default().push(value);
    }

    /// Move every value of `other` onto the end of this record's lists
    pub fn append(&mut self, other: NodeRecord) {
        for (field, values) in other.fields {
            self.fields.entry(field).or_default().extend(values);
        }
    }

    pub fn get(&self, field: &str) -> Option<&[Value]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Reduce the record to its collapsed form.
    ///
    /// Returns `None` when nothing non-empty remains, the sole field's value
    /// when exactly one field remains, and the field mapping otherwise.
    pub fn collapse(self) -> Option<Value> {
        let fields: Map<String, Value> = self
            .fields
            .into_iter()
            .map(|(name, values)| (name, Value::Array(values)))
            .collect();
        collapse_fields(fields)
    }
}

/// Path-keyed accumulator for one extraction call
#[derive(Debug, Clone, Default)]
pub struct PathMap {
    records: IndexMap<String, NodeRecord>,
}

impl PathMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The record at `path`, created empty on first visit
    pub fn record_mut(&mut self, path: &str) -> &mut NodeRecord {
        self.records.entry(path.to_string()).or_default()
    }

    pub fn get(&self, path: &str) -> Option<&NodeRecord> {
        self.records.get(path)
    }

    /// Paths in first-visit order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Collapse every record, drop the empty ones, and unwrap a lone path.
    ///
    /// An element that captured nothing collapses to an empty object.
    pub fn collapse(self) -> Value {
        let output: Map<String, Value> = self
            .records
            .into_iter()
            .filter_map(|(path, record)| record.collapse().map(|value| (path, value)))
            .collect();

        if output.len() == 1 {
            return output.into_iter().next().map(|(_, value)| value).unwrap_or_default();
        }
        Value::Object(output)
    }
}

/// Reduce the list values of a field mapping by one level.
///
/// Single-element lists become their element, multi-element lists are kept,
/// and fields left empty (empty list, empty string, null) are dropped.
/// Field values are never lists of lists, so applying this twice is the same
/// as applying it once.
pub fn reduce_fields(fields: Map<String, Value>) -> Map<String, Value> {
    fields
        .into_iter()
        .filter_map(|(name, value)| {
            let reduced = match value {
                Value::Array(mut values) if values.len() == 1 => values.remove(0),
                other => other,
            };
            (!is_empty_value(&reduced)).then_some((name, reduced))
        })
        .collect()
}

/// [`reduce_fields`], then unwrap a single remaining field
pub fn collapse_fields(fields: Map<String, Value>) -> Option<Value> {
    let reduced = reduce_fields(fields);
    match reduced.len() {
        0 => None,
        1 => reduced.into_iter().next().map(|(_, value)| value),
        _ => Some(Value::Object(reduced)),
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(values) => values.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_record_push_keeps_order() {
        let mut record = NodeRecord::new();
        record.push("href", json!("/a"));
        record.push(TEXT_FIELD, json!("A"));
        record.push("href", json!("/b"));

        assert_eq!(record.len(), 2);
        assert_eq!(record.get("href"), Some(&[json!("/a"), json!("/b")][..]));
    }

    #[test]
    fn test_record_append() {
        let mut first = NodeRecord::new();
        first.push(TEXT_FIELD, json!("a"));

        let mut second = NodeRecord::new();
        second.push("title", json!("t"));
        second.push(TEXT_FIELD, json!("b"));

        first.append(second);
        assert_eq!(first.get(TEXT_FIELD), Some(&[json!("a"), json!("b")][..]));
        assert_eq!(first.get("title"), Some(&[json!("t")][..]));
    }

    #[test]
    fn test_record_collapse_single_field() {
        let mut record = NodeRecord::new();
        record.push(TEXT_FIELD, json!("Hi"));
        assert_eq!(record.collapse(), Some(json!("Hi")));
    }

    #[test]
    fn test_record_collapse_multiple_fields() {
        let mut record = NodeRecord::new();
        record.push("href", json!("/a"));
        record.push(TEXT_FIELD, json!("A"));
        record.push(TEXT_FIELD, json!("B"));

        assert_eq!(
            record.collapse(),
            Some(json!({"href": "/a", "_text": ["A", "B"]}))
        );
    }

    #[test]
    fn test_empty_record_is_pruned() {
        assert_eq!(NodeRecord::new().collapse(), None);

        let mut blank = NodeRecord::new();
        blank.push("alt", json!(""));
        assert_eq!(blank.collapse(), None);
    }

    #[test]
    fn test_path_map_drops_empty_paths() {
        let mut paths = PathMap::new();
        paths.record_mut("div.card");
        paths.record_mut("div.card/span").push(TEXT_FIELD, json!("x"));
        paths.record_mut("div.card/a").push("href", json!("/y"));

        assert_eq!(paths.len(), 3);
        assert_eq!(
            paths.collapse(),
            json!({"div.card/span": "x", "div.card/a": "/y"})
        );
    }

    #[test]
    fn test_path_map_root_collapse() {
        let mut paths = PathMap::new();
        paths.record_mut("p");
        paths.record_mut("p/b").push(TEXT_FIELD, json!("bold"));

        assert_eq!(paths.collapse(), json!("bold"));
    }

    #[test]
    fn test_path_map_nothing_captured() {
        let mut paths = PathMap::new();
        paths.record_mut("div");
        assert_eq!(paths.collapse(), json!({}));
    }

    #[test]
    fn test_reduce_fields_idempotent() {
        let fields = map(json!({
            "href": ["/a"],
            "data-x": [{"k": [1]}],
            "_text": ["A", "B"],
            "alt": [""],
            "title": []
        }));

        let once = reduce_fields(fields);
        let twice = reduce_fields(once.clone());

        assert_eq!(Value::Object(once.clone()), json!({
            "href": "/a",
            "data-x": {"k": [1]},
            "_text": ["A", "B"]
        }));
        assert_eq!(once, twice);
    }
}
