//! Selection Map and Initial Values
//!
//! `SelectionMap` is what the selector reports to its owner. `InitialValues`
//! is what the owner hands in to pre-populate the selector; producers are not
//! consistent about its shape, so every entry is normalized to value strings.

use indexmap::IndexMap;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::node::OptionNode;

/// Current selection keyed by category, root level first.
///
/// An absent key means the level was never selected; a present key with an
/// empty list means the user cleared it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionMap(IndexMap<String, Vec<OptionNode>>);

impl SelectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, category: String, options: Vec<OptionNode>) {
        self.0.insert(category, options);
    }

    pub fn get(&self, category: &str) -> Option<&[OptionNode]> {
        self.0.get(category).map(Vec::as_slice)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.0.contains_key(category)
    }

    /// Selected values of a category, in pick order
    pub fn values(&self, category: &str) -> Vec<&str> {
        self.get(category)
            .map(|opts| opts.iter().map(|o| o.value.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[OptionNode])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> IndexMap<String, Vec<OptionNode>> {
        self.0
    }
}

/// One element of an initial value as supplied by the caller
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum InitialEntry {
    Value(String),
    Number(i64),
    Node(OptionNode),
    /// Anything else; contributes nothing
    Malformed(IgnoredAny),
}

impl InitialEntry {
    fn value(&self) -> Option<String> {
        match self {
            InitialEntry::Value(v) => Some(v.clone()),
            InitialEntry::Number(n) => Some(n.to_string()),
            InitialEntry::Node(node) => Some(node.value.clone()),
            InitialEntry::Malformed(_) => None,
        }
    }
}

/// Initial value for one category: a single entry or a list of them
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum InitialValue {
    Many(Vec<InitialEntry>),
    One(InitialEntry),
}

impl InitialValue {
    /// Normalized value strings, empty strings and malformed entries dropped
    pub fn values(&self) -> Vec<String> {
        let entries: &[InitialEntry] = match self {
            InitialValue::Many(entries) => entries,
            InitialValue::One(entry) => std::slice::from_ref(entry),
        };
        let mut out: Vec<String> = Vec::new();
        for value in entries.iter().filter_map(InitialEntry::value) {
            if !value.is_empty() && !out.contains(&value) {
                out.push(value);
            }
        }
        out
    }
}

impl From<&str> for InitialValue {
    fn from(value: &str) -> Self {
        InitialValue::One(InitialEntry::Value(value.to_string()))
    }
}

impl From<String> for InitialValue {
    fn from(value: String) -> Self {
        InitialValue::One(InitialEntry::Value(value))
    }
}

impl From<Vec<&str>> for InitialValue {
    fn from(values: Vec<&str>) -> Self {
        InitialValue::Many(values.into_iter().map(|v| InitialEntry::Value(v.to_string())).collect())
    }
}

impl From<Vec<String>> for InitialValue {
    fn from(values: Vec<String>) -> Self {
        InitialValue::Many(values.into_iter().map(InitialEntry::Value).collect())
    }
}

impl From<OptionNode> for InitialValue {
    fn from(node: OptionNode) -> Self {
        InitialValue::One(InitialEntry::Node(node))
    }
}

impl From<Vec<OptionNode>> for InitialValue {
    fn from(nodes: Vec<OptionNode>) -> Self {
        InitialValue::Many(nodes.into_iter().map(InitialEntry::Node).collect())
    }
}

/// Caller supplied pre-selection, keyed by category
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct InitialValues(IndexMap<String, InitialValue>);

impl InitialValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, category: &str, value: impl Into<InitialValue>) -> Self {
        self.0.insert(category.to_string(), value.into());
        self
    }

    pub fn values_for(&self, category: &str) -> Vec<String> {
        self.0.get(category).map(InitialValue::values).unwrap_or_default()
    }

    /// Categories with at least one usable value, with those values
    pub fn normalized(&self) -> IndexMap<String, Vec<String>> {
        self.0
            .iter()
            .map(|(category, value)| (category.clone(), value.values()))
            .filter(|(_, values)| !values.is_empty())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.normalized().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_values_accept_mixed_shapes() {
        let initial: InitialValues = serde_json::from_str(
            r#"{
                "residence": "12",
                "etage": [{"id": 4, "category": "etage", "label_category": "Étage", "value": "2", "label": "Étage 2", "parent_value": "12"}],
                "chambre": ["204", 205, {"unexpected": true}],
                "aile": 3.5,
                "cuisine": []
            }"#,
        )
        .unwrap();

        assert_eq!(initial.values_for("residence"), vec!["12"]);
        assert_eq!(initial.values_for("etage"), vec!["2"]);
        assert_eq!(initial.values_for("chambre"), vec!["204", "205"]);
        assert!(initial.values_for("aile").is_empty());

        let normalized = initial.normalized();
        let keys: Vec<_> = normalized.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["residence", "etage", "chambre"]);
    }

    #[test]
    fn test_initial_values_builder() {
        let initial = InitialValues::new()
            .with("residence", vec!["12", "12", ""])
            .with("etage", Vec::<String>::new());
        assert_eq!(initial.values_for("residence"), vec!["12"]);
        assert!(!initial.is_empty());
        assert!(InitialValues::new().with("etage", Vec::<&str>::new()).is_empty());
    }

    #[test]
    fn test_selection_map_serializes_in_level_order() {
        let mut map = SelectionMap::new();
        map.insert("residence".into(), vec![OptionNode::new(1, "residence", "12", "Les Tilleuls")]);
        map.insert("etage".into(), Vec::new());
        let json = serde_json::to_string(&map).unwrap();
        assert!(json.starts_with(r#"{"residence":"#));
        assert!(json.ends_with(r#""etage":[]}"#));
        assert_eq!(map.values("residence"), vec!["12"]);
        assert!(map.contains("etage"));
        assert!(map.values("chambre").is_empty());
    }
}
