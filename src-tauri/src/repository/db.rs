//! Database Connection and Setup
//!
//! Manages SQLite database connection and migrations.

use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::DomainError;

/// Shared connection handle; `None` until `DbState::open` finished
pub type SharedConnection = Arc<Mutex<Option<Connection>>>;

/// Database state wrapper
#[derive(Clone, Default)]
pub struct DbState {
    conn: SharedConnection,
}

impl DbState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle given to repositories
    pub fn connection(&self) -> SharedConnection {
        self.conn.clone()
    }

    pub async fn is_ready(&self) -> bool {
        self.conn.lock().await.is_some()
    }

    /// Open the database at `db_path` (":memory:" for tests), run migrations
    /// and install the connection
    pub async fn open(&self, db_path: &Path) -> Result<(), String> {
        let conn = open_connection(db_path)?;
        *self.conn.lock().await = Some(conn);
        Ok(())
    }
}

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        match e {
            rusqlite::Error::QueryReturnedNoRows => DomainError::NotFound("no matching row".to_string()),
            rusqlite::Error::SqliteFailure(err, msg)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                DomainError::Conflict(msg.unwrap_or_else(|| err.to_string()))
            }
            other => DomainError::Internal(other.to_string()),
        }
    }
}

fn open_connection(db_path: &Path) -> Result<Connection, String> {
    let conn = if db_path.as_os_str() == ":memory:" {
        Connection::open_in_memory()
    } else {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| format!("Failed to create db dir: {}", e))?;
        }
        Connection::open(db_path)
    }
    .map_err(|e| format!("Failed to open db: {}", e))?;

    run_migrations(&conn)?;
    tracing::info!(path = %db_path.display(), "database ready");
    Ok(conn)
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
    let query = format!("PRAGMA table_info({})", table);
    let Ok(mut stmt) = conn.prepare(&query) else {
        return false;
    };
    let Ok(names) = stmt.query_map([], |row| row.get::<_, String>(1)) else {
        return false;
    };
    names.flatten().any(|name| name == column)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS options (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            category TEXT NOT NULL,
            value TEXT NOT NULL,
            label TEXT NOT NULL,
            parent_value TEXT,
            created_at INTEGER NOT NULL DEFAULT 0,
            updated_at INTEGER NOT NULL DEFAULT 0,
            UNIQUE (category, value)
        )",
        [],
    )
    .map_err(|e| e.to_string())?;

    // Display name of the category, added after the first release
    if !column_exists(conn, "options", "label_category") {
        conn.execute("ALTER TABLE options ADD COLUMN label_category TEXT", [])
            .map_err(|e| format!("Failed to add label_category: {}", e))?;
    }

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_options_parent ON options(parent_value)",
        [],
    )
    .map_err(|e| e.to_string())?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_options_category ON options(category)",
        [],
    )
    .map_err(|e| e.to_string())?;

    Ok(())
}
