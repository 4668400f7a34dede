//! Schema-agnostic answer sets.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

/// A single answer value. Any JSON value is accepted.
pub type AnswerValue = serde_json::Value;

/// Field values entered for one questionnaire within one report.
///
/// The store does not validate the contents; it only guarantees faithful,
/// isolated round-tripping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, AnswerValue>);

impl AnswerSet {
    /// Create an empty answer set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an answer set from a JSON object.
    ///
    /// Returns `None` if `value` is not an object.
    pub fn from_json(value: AnswerValue) -> Option<Self> {
        match value {
            AnswerValue::Object(map) => Some(Self(map.into_iter().collect())),
            _ => None,
        }
    }

    /// Convert into a JSON object value.
    pub fn into_json(self) -> AnswerValue {
        AnswerValue::Object(self.0.into_iter().collect())
    }

    pub fn get(&self, field: &str) -> Option<&AnswerValue> {
        self.0.get(field)
    }

    pub fn get_mut(&mut self, field: &str) -> Option<&mut AnswerValue> {
        self.0.get_mut(field)
    }

    /// Set a field, returning the previous value.
    pub fn insert(
        &mut self,
        field: impl Into<String>,
        value: impl Into<AnswerValue>,
    ) -> Option<AnswerValue> {
        self.0.insert(field.into(), value.into())
    }

    pub fn remove(&mut self, field: &str) -> Option<AnswerValue> {
        self.0.remove(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, AnswerValue> {
        self.0.iter()
    }

    /// Field keys in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl From<BTreeMap<String, AnswerValue>> for AnswerSet {
    fn from(map: BTreeMap<String, AnswerValue>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>> FromIterator<(K, AnswerValue)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (K, AnswerValue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl IntoIterator for AnswerSet {
    type Item = (String, AnswerValue);
    type IntoIter = btree_map::IntoIter<String, AnswerValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a AnswerSet {
    type Item = (&'a String, &'a AnswerValue);
    type IntoIter = btree_map::Iter<'a, String, AnswerValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_requires_object() {
        let answers = AnswerSet::from_json(json!({"q1field": "x", "count": 3})).unwrap();
        assert_eq!(answers.len(), 2);
        assert_eq!(answers.get("q1field"), Some(&json!("x")));
        assert_eq!(answers.into_json(), json!({"q1field": "x", "count": 3}));

        assert!(AnswerSet::from_json(json!(["not", "an", "object"])).is_none());
        assert!(AnswerSet::from_json(json!("scalar")).is_none());
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let answers: AnswerSet = [("b", json!(2)), ("a", json!({"nested": [1, 2]}))]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&answers).unwrap();
        assert_eq!(json, r#"{"a":{"nested":[1,2]},"b":2}"#);
    }

    #[test]
    fn test_insert_replaces_previous_value() {
        let mut answers = AnswerSet::new();
        assert!(answers.insert("field", "first").is_none());
        assert_eq!(answers.insert("field", "second"), Some(json!("first")));
        assert_eq!(answers.fields().collect::<Vec<_>>(), vec!["field"]);
    }
}
