//! Levels
//!
//! A level is one rank of the hierarchy. Its first option is always the
//! synthetic "select all" node, followed by the concrete options in label order.

use std::collections::HashSet;

use crate::label::AllLabelPolicy;
use crate::node::{OptionNode, SELECT_ALL_ID};

/// Loading state of a level slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelState {
    Unloaded,
    Loading,
    Loaded,
}

/// What is chosen inside one level
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every concrete option of the level
    All,
    /// Explicit picks by option id, in pick order
    Subset(Vec<i64>),
}

impl Selection {
    /// Build a selection from raw picks. Picking the synthetic node anywhere
    /// in the set means everything; duplicates keep their first position.
    pub fn from_picks(picked: &[i64], single: bool) -> Self {
        if picked.contains(&SELECT_ALL_ID) {
            return Selection::All;
        }
        let mut seen = HashSet::new();
        let mut ids: Vec<i64> = picked.iter().copied().filter(|id| seen.insert(*id)).collect();
        if single && ids.len() > 1 {
            // last pick wins in single mode
            ids = ids.split_off(ids.len() - 1);
        }
        Selection::Subset(ids)
    }

    /// Concrete options this selection stands for in `level`
    pub fn resolve(&self, level: &Level) -> Vec<OptionNode> {
        match self {
            Selection::All => level.concrete().to_vec(),
            Selection::Subset(ids) => ids
                .iter()
                .filter_map(|id| level.concrete().iter().find(|o| o.id == *id))
                .cloned()
                .collect(),
        }
    }
}

/// One rank of the option tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    category: String,
    label_category: String,
    options: Vec<OptionNode>,
}

impl Level {
    /// Build a level from fetched rows.
    ///
    /// Rows are de-duplicated on `(category, value)`, stray synthetic rows are
    /// dropped and the rest is ordered by label. Category and label come from
    /// the first row, or `fallback_category` when nothing was fetched.
    pub fn new(fallback_category: &str, rows: Vec<OptionNode>, policy: &dyn AllLabelPolicy) -> Self {
        let mut seen = HashSet::new();
        let mut concrete: Vec<OptionNode> = rows
            .into_iter()
            .filter(|o| !o.is_select_all())
            .filter(|o| seen.insert((o.category.clone(), o.value.clone())))
            .collect();
        concrete.sort_by(|a, b| a.label.cmp(&b.label));

        let (category, label_category) = match concrete.first() {
            Some(first) => (first.category.clone(), first.label_category.clone()),
            None => (fallback_category.to_string(), fallback_category.to_string()),
        };

        let all = OptionNode::select_all(
            &category,
            &label_category,
            policy.all_label(&category, &label_category),
        );
        let mut options = Vec::with_capacity(concrete.len() + 1);
        options.push(all);
        options.extend(concrete);

        Self { category, label_category, options }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn label_category(&self) -> &str {
        &self.label_category
    }

    /// All options, synthetic node first
    pub fn options(&self) -> &[OptionNode] {
        &self.options
    }

    /// Options without the synthetic node
    pub fn concrete(&self) -> &[OptionNode] {
        &self.options[1..]
    }

    pub fn select_all_node(&self) -> &OptionNode {
        &self.options[0]
    }

    pub fn find(&self, id: i64) -> Option<&OptionNode> {
        self.options.iter().find(|o| o.id == id)
    }

    pub fn find_value(&self, category: &str, value: &str) -> Option<&OptionNode> {
        self.concrete().iter().find(|o| o.matches(category, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::GenderedAllLabel;

    fn floors() -> Vec<OptionNode> {
        vec![
            OptionNode::new(3, "etage", "2", "Étage 2").with_parent("12"),
            OptionNode::new(2, "etage", "1", "Étage 1").with_parent("12"),
            OptionNode::new(2, "etage", "1", "Étage 1").with_parent("12"),
        ]
    }

    #[test]
    fn test_level_prepends_select_all_and_sorts() {
        let level = Level::new("x", floors(), &GenderedAllLabel);
        assert_eq!(level.category(), "etage");
        assert_eq!(level.options().len(), 3);
        assert!(level.options()[0].is_select_all());
        assert_eq!(level.options()[0].label, "Tous (etage)");
        let labels: Vec<_> = level.concrete().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Étage 1", "Étage 2"]);
    }

    #[test]
    fn test_empty_level_uses_fallback_category() {
        let level = Level::new("residence", Vec::new(), &GenderedAllLabel);
        assert_eq!(level.category(), "residence");
        assert_eq!(level.label_category(), "residence");
        assert!(level.concrete().is_empty());
        assert_eq!(level.select_all_node().label, "Toutes (residence)");
    }

    #[test]
    fn test_selection_from_picks() {
        assert_eq!(Selection::from_picks(&[3, -1], false), Selection::All);
        assert_eq!(Selection::from_picks(&[3, 2, 3], false), Selection::Subset(vec![3, 2]));
        assert_eq!(Selection::from_picks(&[3, 2], true), Selection::Subset(vec![2]));
    }

    #[test]
    fn test_selection_resolve_keeps_pick_order() {
        let level = Level::new("etage", floors(), &GenderedAllLabel);
        let picked = Selection::Subset(vec![3, 2, 99]).resolve(&level);
        let values: Vec<_> = picked.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["2", "1"]);
        assert_eq!(Selection::All.resolve(&level).len(), 2);
    }
}
