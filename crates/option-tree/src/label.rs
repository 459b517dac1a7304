//! Select-all label wording.

/// Wording of the synthetic "select all" node of a level
pub trait AllLabelPolicy {
    fn all_label(&self, category: &str, label_category: &str) -> String;
}

impl<F> AllLabelPolicy for F
where
    F: Fn(&str, &str) -> String,
{
    fn all_label(&self, category: &str, label_category: &str) -> String {
        self(category, label_category)
    }
}

/// Category names that take the feminine "Toutes"
const FEMININE_KEYWORDS: &[&str] = &[
    "residence",
    "résidence",
    "chambre",
    "salle",
    "aile",
    "maison",
    "cuisine",
    "categorie",
    "catégorie",
    "option",
];

/// French wording: "Toutes (Chambre)" / "Tous (Étage)"
#[derive(Debug, Clone, Copy, Default)]
pub struct GenderedAllLabel;

impl GenderedAllLabel {
    pub fn is_feminine(category: &str) -> bool {
        let lowered = category.to_lowercase();
        FEMININE_KEYWORDS.iter().any(|k| lowered.contains(k))
    }
}

impl AllLabelPolicy for GenderedAllLabel {
    fn all_label(&self, category: &str, label_category: &str) -> String {
        let word = if Self::is_feminine(category) { "Toutes" } else { "Tous" };
        format!("{} ({})", word, label_category)
    }
}
