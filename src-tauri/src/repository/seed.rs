//! Demo data inserted on first start.

use crate::domain::{DomainResult, OptionNode};
use super::option::OptionRepository;
use super::traits::Repository;

/// (category, label_category, value, label, parent_value)
const DEMO_TREE: &[(&str, &str, &str, &str, Option<&str>)] = &[
    ("residence", "Résidence", "12", "Les Tilleuls", None),
    ("residence", "Résidence", "7", "Les Érables", None),
    ("residence", "Résidence", "15", "Annexe", None),
    ("etage", "Étage", "1", "Étage 1", Some("12")),
    ("etage", "Étage", "2", "Étage 2", Some("12")),
    ("etage", "Étage", "7-0", "Rez-de-chaussée", Some("7")),
    ("etage", "Étage", "7-1", "Premier étage", Some("7")),
    ("chambre", "Chambre", "101", "Chambre 101", Some("1")),
    ("chambre", "Chambre", "102", "Chambre 102", Some("1")),
    ("chambre", "Chambre", "204", "Chambre 204", Some("2")),
    ("chambre", "Chambre", "205", "Chambre 205", Some("2")),
    ("chambre", "Chambre", "7-01", "Chambre 01", Some("7-0")),
    ("chambre", "Chambre", "7-11", "Chambre 11", Some("7-1")),
];

/// Insert the demo residence tree when the table is empty.
/// Returns the number of inserted options.
pub async fn seed_if_empty(repo: &OptionRepository) -> DomainResult<usize> {
    if repo.count().await? > 0 {
        return Ok(0);
    }

    for (category, label_category, value, label, parent) in DEMO_TREE {
        let node = OptionNode::new(0, category.to_string(), value.to_string(), label.to_string())
            .with_label_category(Some(label_category.to_string()))
            .with_parent(parent.map(str::to_string));
        repo.create(&node).await?;
    }

    tracing::info!(count = DEMO_TREE.len(), "seeded demo option tree");
    Ok(DEMO_TREE.len())
}
