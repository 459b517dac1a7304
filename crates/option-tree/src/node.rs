//! Option Node
//!
//! A single selectable node of the option tree.

use serde::{Deserialize, Serialize};

/// Id reserved for the synthetic "select all" node
pub const SELECT_ALL_ID: i64 = -1;

/// Value reserved for the synthetic "select all" node
pub const SELECT_ALL_VALUE: &str = "ALL";

/// One selectable node (a residence, a floor, a room...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionNode {
    pub id: i64,
    /// Level/table key, e.g. "residence"
    pub category: String,
    /// Human readable category name, shown as the level label
    pub label_category: String,
    /// Stable identifier used for parent/child linkage
    pub value: String,
    pub label: String,
    /// `None` marks a root of its category
    #[serde(default)]
    pub parent_value: Option<String>,
}

impl OptionNode {
    pub fn new(id: i64, category: &str, value: &str, label: &str) -> Self {
        Self {
            id,
            category: category.to_string(),
            label_category: category.to_string(),
            value: value.to_string(),
            label: label.to_string(),
            parent_value: None,
        }
    }

    pub fn with_parent(mut self, parent_value: &str) -> Self {
        self.parent_value = Some(parent_value.to_string());
        self
    }

    pub fn with_label_category(mut self, label_category: &str) -> Self {
        self.label_category = label_category.to_string();
        self
    }

    /// Build the synthetic node prepended to every loaded level
    pub fn select_all(category: &str, label_category: &str, label: String) -> Self {
        Self {
            id: SELECT_ALL_ID,
            category: category.to_string(),
            label_category: label_category.to_string(),
            value: SELECT_ALL_VALUE.to_string(),
            label,
            parent_value: None,
        }
    }

    pub fn is_select_all(&self) -> bool {
        self.id == SELECT_ALL_ID && self.value == SELECT_ALL_VALUE
    }

    /// `(value, category)` equality used when resolving external references
    pub fn matches(&self, category: &str, value: &str) -> bool {
        !self.is_select_all() && self.category == category && self.value == value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_all_node() {
        let all = OptionNode::select_all("etage", "Étage", "Tous (Étage)".to_string());
        assert!(all.is_select_all());
        assert_eq!(all.id, SELECT_ALL_ID);
        assert!(all.parent_value.is_none());
        assert!(!all.matches("etage", SELECT_ALL_VALUE));
    }

    #[test]
    fn test_matches_requires_category() {
        let node = OptionNode::new(4, "etage", "2", "2ème étage").with_parent("12");
        assert!(node.matches("etage", "2"));
        assert!(!node.matches("chambre", "2"));
        assert_eq!(node.parent_value.as_deref(), Some("12"));
    }
}
