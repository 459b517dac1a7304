//! Option Entity
//!
//! One node of an option tree (residence, etage, chambre...). Nodes link to
//! their parent through `parent_value`; a node without parent is a root of
//! its category.

use serde::{Deserialize, Serialize};
use super::entity::{DomainError, DomainResult, Entity};

/// Value reserved for the synthetic "select all" node of the selector
pub const RESERVED_VALUE: &str = "ALL";

/// A selectable option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionNode {
    pub id: i64,
    pub category: String,
    pub label_category: String,
    pub value: String,
    pub label: String,
    pub parent_value: Option<String>,
}

impl OptionNode {
    pub fn new(id: i64, category: String, value: String, label: String) -> Self {
        Self {
            id,
            label_category: category.clone(),
            category,
            value,
            label,
            parent_value: None,
        }
    }

    pub fn with_parent(mut self, parent_value: Option<String>) -> Self {
        self.parent_value = parent_value.filter(|p| !p.trim().is_empty());
        self
    }

    pub fn with_label_category(mut self, label_category: Option<String>) -> Self {
        if let Some(lc) = label_category.filter(|l| !l.trim().is_empty()) {
            self.label_category = lc;
        }
        self
    }

    /// Check the fields a stored option must satisfy
    pub fn validate(&self) -> DomainResult<()> {
        if self.category.trim().is_empty() {
            return Err(DomainError::InvalidInput("category must not be empty".into()));
        }
        if self.value.trim().is_empty() {
            return Err(DomainError::InvalidInput("value must not be empty".into()));
        }
        if self.label.trim().is_empty() {
            return Err(DomainError::InvalidInput("label must not be empty".into()));
        }
        if self.value == RESERVED_VALUE {
            return Err(DomainError::InvalidInput(format!("value '{}' is reserved", RESERVED_VALUE)));
        }
        if self.parent_value.as_deref() == Some(self.value.as_str()) {
            return Err(DomainError::InvalidInput("an option cannot be its own parent".into()));
        }
        Ok(())
    }
}

impl Entity for OptionNode {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chambre() -> OptionNode {
        OptionNode::new(0, "chambre".into(), "204".into(), "Chambre 204".into())
    }

    #[test]
    fn test_option_creation() {
        let node = chambre()
            .with_parent(Some("2".into()))
            .with_label_category(Some("Chambre".into()));
        assert_eq!(node.id(), 0);
        assert_eq!(node.parent_value.as_deref(), Some("2"));
        assert_eq!(node.label_category, "Chambre");
        assert!(node.validate().is_ok());
    }

    #[test]
    fn test_blank_parent_and_label_category_ignored() {
        let node = chambre().with_parent(Some("  ".into())).with_label_category(Some("".into()));
        assert!(node.parent_value.is_none());
        assert_eq!(node.label_category, "chambre");
    }

    #[test]
    fn test_validation_rejects_reserved_and_empty() {
        let mut node = chambre();
        node.value = RESERVED_VALUE.into();
        assert!(matches!(node.validate(), Err(DomainError::InvalidInput(_))));

        let mut node = chambre();
        node.label = " ".into();
        assert!(node.validate().is_err());

        let node = chambre().with_parent(Some("204".into()));
        assert!(node.validate().is_err());
    }
}
