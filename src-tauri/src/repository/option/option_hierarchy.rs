//! Option Hierarchy Operations
//!
//! Lookups following the `parent_value` links between options.

use async_trait::async_trait;
use rusqlite::{params, params_from_iter};

use crate::domain::{DomainResult, OptionNode};
use super::option_repo::{connection, row_to_option, OPTION_COLUMNS};

/// Trait for option hierarchy operations
#[async_trait]
pub trait OptionHierarchyOperations {
    /// Options of `category` without parent, sorted by label
    async fn roots(&self, category: &str) -> DomainResult<Vec<OptionNode>>;

    /// Direct children of `parent_value`, sorted by label
    async fn children_of(&self, parent_value: &str) -> DomainResult<Vec<OptionNode>>;

    /// Direct children of any of `parent_values`, sorted by label
    async fn children_of_any(&self, parent_values: &[String]) -> DomainResult<Vec<OptionNode>>;

    /// Every option below `value`, at any depth, sorted by label
    async fn descendants(&self, value: &str) -> DomainResult<Vec<OptionNode>>;
}

#[async_trait]
impl OptionHierarchyOperations for super::option_repo::OptionRepository {
    async fn roots(&self, category: &str) -> DomainResult<Vec<OptionNode>> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let query = format!(
            "SELECT {} FROM options
             WHERE category = ? AND (parent_value IS NULL OR parent_value = '')
             ORDER BY label",
            OPTION_COLUMNS
        );
        let mut stmt = conn.prepare(&query)?;
        let options = stmt
            .query_map(params![category], row_to_option)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(options)
    }

    async fn children_of(&self, parent_value: &str) -> DomainResult<Vec<OptionNode>> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let query = format!(
            "SELECT {} FROM options WHERE parent_value = ? ORDER BY label",
            OPTION_COLUMNS
        );
        let mut stmt = conn.prepare(&query)?;
        let options = stmt
            .query_map(params![parent_value], row_to_option)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(options)
    }

    async fn children_of_any(&self, parent_values: &[String]) -> DomainResult<Vec<OptionNode>> {
        if parent_values.is_empty() {
            return Ok(Vec::new());
        }

        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let placeholders = vec!["?"; parent_values.len()].join(", ");
        let query = format!(
            "SELECT {} FROM options WHERE parent_value IN ({}) ORDER BY label",
            OPTION_COLUMNS, placeholders
        );
        let mut stmt = conn.prepare(&query)?;
        let options = stmt
            .query_map(params_from_iter(parent_values.iter()), row_to_option)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(options)
    }

    async fn descendants(&self, value: &str) -> DomainResult<Vec<OptionNode>> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let query = format!(
            "WITH RECURSIVE subtree(id, value) AS (
                SELECT id, value FROM options WHERE parent_value = ?1
                UNION
                SELECT o.id, o.value FROM options o JOIN subtree s ON o.parent_value = s.value
            )
            SELECT {} FROM options WHERE id IN (SELECT id FROM subtree) ORDER BY label",
            OPTION_COLUMNS
        );
        let mut stmt = conn.prepare(&query)?;
        let options = stmt
            .query_map(params![value], row_to_option)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(options)
    }
}
