//! Repository Integration Tests
//!
//! Tests for OptionRepository with in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::domain::{DomainError, OptionNode};
    use crate::repository::{
        seed_if_empty, DbState, OptionHierarchyOperations, OptionRepository, Repository,
    };
    use std::path::Path;

    async fn setup_test_db() -> OptionRepository {
        // Use in-memory database for tests
        let db_state = DbState::new();
        db_state.open(Path::new(":memory:")).await.expect("Failed to init test DB");
        OptionRepository::new(db_state.connection())
    }

    fn option(category: &str, value: &str, label: &str, parent: Option<&str>) -> OptionNode {
        OptionNode::new(0, category.to_string(), value.to_string(), label.to_string())
            .with_parent(parent.map(str::to_string))
    }

    async fn seeded() -> OptionRepository {
        let repo = setup_test_db().await;
        seed_if_empty(&repo).await.expect("Seed failed");
        repo
    }

    fn values(options: &[OptionNode]) -> Vec<&str> {
        options.iter().map(|o| o.value.as_str()).collect()
    }

    #[tokio::test]
    async fn test_create_option() {
        let repo = setup_test_db().await;

        let created = repo
            .create(&option("residence", "12", "Les Tilleuls", None))
            .await
            .expect("Failed to create");

        assert!(created.id > 0);
        assert_eq!(created.label_category, "residence");
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repo = setup_test_db().await;

        let created = repo.create(&option("residence", "12", "Les Tilleuls", None)).await.unwrap();

        let found = repo.find_by_id(created.id).await.expect("Find failed");
        assert_eq!(found, Some(created));
        assert!(repo.find_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let repo = setup_test_db().await;

        let reserved = repo.create(&option("residence", "ALL", "Tout", None)).await;
        assert!(matches!(reserved, Err(DomainError::InvalidInput(_))));

        let empty = repo.create(&option("residence", "3", "", None)).await;
        assert!(matches!(empty, Err(DomainError::InvalidInput(_))));

        let orphan = repo.create(&option("etage", "1", "Étage 1", Some("404"))).await;
        assert!(matches!(orphan, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_duplicate_value_in_category_conflicts() {
        let repo = setup_test_db().await;

        repo.create(&option("residence", "12", "Les Tilleuls", None)).await.unwrap();
        let duplicate = repo.create(&option("residence", "12", "Autre", None)).await;
        assert!(matches!(duplicate, Err(DomainError::Conflict(_))));

        // Same value in another category is fine
        repo.create(&option("batiment", "12", "Bâtiment 12", None)).await.unwrap();
    }

    #[tokio::test]
    async fn test_seed_runs_once() {
        let repo = setup_test_db().await;

        let inserted = seed_if_empty(&repo).await.unwrap();
        assert!(inserted > 0);
        assert_eq!(seed_if_empty(&repo).await.unwrap(), 0);
        assert_eq!(repo.count().await.unwrap(), inserted as i64);
    }

    #[tokio::test]
    async fn test_roots_sorted_by_label() {
        let repo = seeded().await;

        let roots = repo.roots("residence").await.unwrap();
        // Annexe, Les Tilleuls, Les Érables (byte order puts É after T)
        assert_eq!(values(&roots), vec!["15", "12", "7"]);
        assert!(roots.iter().all(|o| o.label_category == "Résidence"));

        assert!(repo.roots("etage").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_children_of() {
        let repo = seeded().await;

        let floors = repo.children_of("12").await.unwrap();
        assert_eq!(values(&floors), vec!["1", "2"]);
        assert!(repo.children_of("15").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_children_of_any() {
        let repo = seeded().await;

        let rooms = repo
            .children_of_any(&["1".to_string(), "2".to_string()])
            .await
            .unwrap();
        assert_eq!(values(&rooms), vec!["101", "102", "204", "205"]);
        assert!(repo.children_of_any(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_descendants() {
        let repo = seeded().await;

        let below = repo.descendants("7").await.unwrap();
        let mut found = values(&below);
        found.sort();
        assert_eq!(found, vec!["7-0", "7-01", "7-1", "7-11"]);
    }

    #[tokio::test]
    async fn test_update_renames_children_parent() {
        let repo = seeded().await;

        let mut floor = repo.children_of("12").await.unwrap().remove(0);
        assert_eq!(floor.value, "1");
        floor.value = "12-1".to_string();
        floor.label = "Premier".to_string();

        let updated = repo.update(&floor).await.expect("Update failed");
        assert_eq!(updated.label, "Premier");

        assert!(repo.children_of("1").await.unwrap().is_empty());
        assert_eq!(values(&repo.children_of("12-1").await.unwrap()), vec!["101", "102"]);
    }

    #[tokio::test]
    async fn test_update_missing_option() {
        let repo = setup_test_db().await;

        let mut ghost = option("residence", "12", "Les Tilleuls", None);
        ghost.id = 42;
        assert!(matches!(repo.update(&ghost).await, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_removes_subtree() {
        let repo = seeded().await;
        let before = repo.count().await.unwrap();

        let residence = repo
            .roots("residence")
            .await
            .unwrap()
            .into_iter()
            .find(|o| o.value == "12")
            .unwrap();
        repo.delete(residence.id).await.expect("Delete failed");

        // residence 12, two floors, four rooms
        assert_eq!(repo.count().await.unwrap(), before - 7);
        assert!(repo.children_of("12").await.unwrap().is_empty());
        assert!(repo.children_of_any(&["1".to_string(), "2".to_string()]).await.unwrap().is_empty());
        assert_eq!(repo.children_of("7").await.unwrap().len(), 2);

        assert!(matches!(repo.delete(residence.id).await, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_uninitialized_database() {
        let repo = OptionRepository::new(DbState::new().connection());
        assert!(matches!(repo.list().await, Err(DomainError::Internal(_))));
    }
}
