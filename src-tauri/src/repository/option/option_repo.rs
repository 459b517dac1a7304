//! Option Repository - Core CRUD Operations
//!
//! SQLite-backed implementation for OptionNode CRUD operations.
//! Parent-child lookups are in option_hierarchy.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{DomainError, DomainResult, OptionNode};
use super::super::db::SharedConnection;
use super::super::traits::Repository;

/// Columns read by `row_to_option`, in order
pub(super) const OPTION_COLUMNS: &str =
    "id, category, COALESCE(label_category, category), value, label, parent_value";

/// SQLite implementation of the option repository
pub struct OptionRepository {
    pub(super) conn: SharedConnection,
}

impl OptionRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Number of stored options
    pub async fn count(&self) -> DomainResult<i64> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;
        Ok(conn.query_row("SELECT COUNT(*) FROM options", [], |row| row.get(0))?)
    }
}

pub(super) fn connection(guard: &Option<Connection>) -> DomainResult<&Connection> {
    guard
        .as_ref()
        .ok_or_else(|| DomainError::Internal("Database not initialized".to_string()))
}

fn parent_exists(conn: &Connection, parent_value: &str) -> DomainResult<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT id FROM options WHERE value = ? LIMIT 1",
            params![parent_value],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

#[async_trait]
impl Repository<OptionNode> for OptionRepository {
    async fn create(&self, entity: &OptionNode) -> DomainResult<OptionNode> {
        entity.validate()?;

        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        if let Some(parent) = &entity.parent_value {
            if !parent_exists(conn, parent)? {
                return Err(DomainError::NotFound(format!("parent option '{}'", parent)));
            }
        }

        let now = chrono::Utc::now().timestamp_millis();
        conn.execute(
            "INSERT INTO options (category, label_category, value, label, parent_value, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                entity.category,
                entity.label_category,
                entity.value,
                entity.label,
                entity.parent_value,
                now,
                now
            ],
        )?;

        let mut option = entity.clone();
        option.id = conn.last_insert_rowid();
        tracing::debug!(id = option.id, category = %option.category, value = %option.value, "option created");
        Ok(option)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<OptionNode>> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let query = format!("SELECT {} FROM options WHERE id = ?", OPTION_COLUMNS);
        Ok(conn.query_row(&query, params![id], row_to_option).optional()?)
    }

    async fn list(&self) -> DomainResult<Vec<OptionNode>> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let query = format!("SELECT {} FROM options ORDER BY category, label", OPTION_COLUMNS);
        let mut stmt = conn.prepare(&query)?;
        let options = stmt
            .query_map([], row_to_option)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(options)
    }

    async fn update(&self, entity: &OptionNode) -> DomainResult<OptionNode> {
        entity.validate()?;

        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let previous: String = conn
            .query_row("SELECT value FROM options WHERE id = ?", params![entity.id], |row| row.get(0))
            .optional()?
            .ok_or_else(|| DomainError::NotFound(format!("option {}", entity.id)))?;

        if let Some(parent) = &entity.parent_value {
            if !parent_exists(conn, parent)? {
                return Err(DomainError::NotFound(format!("parent option '{}'", parent)));
            }
        }

        // Children reference the parent by value, so a renamed value moves them along
        let tx = conn.unchecked_transaction()?;
        let now = chrono::Utc::now().timestamp_millis();
        tx.execute(
            "UPDATE options SET category = ?, label_category = ?, value = ?, label = ?, parent_value = ?, updated_at = ?
             WHERE id = ?",
            params![
                entity.category,
                entity.label_category,
                entity.value,
                entity.label,
                entity.parent_value,
                now,
                entity.id
            ],
        )?;
        if previous != entity.value {
            let moved = tx.execute(
                "UPDATE options SET parent_value = ?, updated_at = ? WHERE parent_value = ?",
                params![entity.value, now, previous],
            )?;
            tracing::debug!(from = %previous, to = %entity.value, moved, "option value renamed");
        }
        tx.commit()?;

        Ok(entity.clone())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        // UNION (not UNION ALL) stops on parent cycles
        let removed = conn.execute(
            "WITH RECURSIVE subtree(id, value) AS (
                SELECT id, value FROM options WHERE id = ?1
                UNION
                SELECT o.id, o.value FROM options o JOIN subtree s ON o.parent_value = s.value
            )
            DELETE FROM options WHERE id IN (SELECT id FROM subtree)",
            params![id],
        )?;

        if removed == 0 {
            return Err(DomainError::NotFound(format!("option {}", id)));
        }
        tracing::debug!(id, removed, "option subtree deleted");
        Ok(())
    }
}

/// Convert a database row to OptionNode
pub(super) fn row_to_option(row: &rusqlite::Row) -> rusqlite::Result<OptionNode> {
    Ok(OptionNode {
        id: row.get(0)?,
        category: row.get(1)?,
        label_category: row.get(2)?,
        value: row.get(3)?,
        label: row.get(4)?,
        parent_value: row.get::<_, Option<String>>(5)?.filter(|p| !p.is_empty()),
    })
}
