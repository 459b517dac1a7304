//! Selector configuration surface.

use serde::{Deserialize, Serialize};

/// Single choice (dropdown) or multiple choice (multi-select) per level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectMode {
    #[default]
    Single,
    Multiple,
}

/// Options recognised by the selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Category whose parentless options form the first level
    pub root_category: String,
    /// Never fetch or render child levels
    #[serde(default)]
    pub only_parent: bool,
    /// Read-only rendering; selections are rejected
    #[serde(default)]
    pub disabled: bool,
    #[serde(default = "default_true")]
    pub show_label: bool,
    #[serde(default)]
    pub mode: SelectMode,
}

fn default_true() -> bool {
    true
}

impl SelectorConfig {
    pub fn new(root_category: &str) -> Self {
        Self {
            root_category: root_category.to_string(),
            only_parent: false,
            disabled: false,
            show_label: true,
            mode: SelectMode::Single,
        }
    }

    pub fn only_parent(mut self) -> Self {
        self.only_parent = true;
        self
    }

    pub fn multiple(mut self) -> Self {
        self.mode = SelectMode::Multiple;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn show_label(mut self, show_label: bool) -> Self {
        self.show_label = show_label;
        self
    }

    pub fn is_multiple(&self) -> bool {
        self.mode == SelectMode::Multiple
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_defaults() {
        let config: SelectorConfig = serde_json::from_str(r#"{"root_category":"residence"}"#).unwrap();
        assert_eq!(config, SelectorConfig::new("residence"));
        assert!(config.show_label);
    }

    #[test]
    fn test_deserialize_multiple() {
        let config: SelectorConfig =
            serde_json::from_str(r#"{"root_category":"residence","mode":"multiple","only_parent":true}"#).unwrap();
        assert!(config.is_multiple());
        assert!(config.only_parent);
    }
}
