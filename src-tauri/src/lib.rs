//! Foyer Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and implementations
//! - commands: Tauri command handlers

use std::path::PathBuf;
use tauri::{Emitter, Manager};

mod domain;
mod repository;
mod commands;

use repository::{seed_if_empty, DbState, OptionRepository};

/// Application state shared across commands
pub struct AppState {
    pub db_state: DbState,
}

/// Get database path from app handle
fn get_db_path(app_handle: &tauri::AppHandle) -> Result<PathBuf, String> {
    let app_dir = app_handle.path().app_data_dir().map_err(|e| e.to_string())?;
    Ok(app_dir.join("foyer.db"))
}

/// Open the database, seed it when empty and install the connection
async fn initialize_database(db_state: DbState, db_path: PathBuf) -> Result<(), String> {
    db_state.open(&db_path).await?;

    let repo = OptionRepository::new(db_state.connection());
    let seeded = seed_if_empty(&repo).await.map_err(|e| e.to_string())?;
    if seeded > 0 {
        let _ = rolling_logger::info(&format!("Seeded {} demo options", seeded));
    }
    Ok(())
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .setup(|app| {
            let app_handle = app.handle().clone();

            // Initialize logging
            let log_dir = app_handle.path().app_log_dir()?;
            if let Err(e) = rolling_logger::init_logger(log_dir, "Foyer") {
                eprintln!("failed to init rolling logger: {}", e);
            }

            let db_path = get_db_path(&app_handle)?;
            tracing::info!(path = %db_path.display(), "app setup starting");

            // Create initial empty DbState (managed)
            let db_state = DbState::new();

            // Manage state IMMEDIATELY
            app.manage(AppState {
                db_state: db_state.clone(),
            });

            // Initialize database asynchronously in background
            tauri::async_runtime::spawn(async move {
                match initialize_database(db_state, db_path).await {
                    Ok(()) => {
                        let _ = rolling_logger::info("Async DB init success");
                        // Emit event to notify frontend
                        if let Err(e) = app_handle.emit("db-initialized", ()) {
                            tracing::warn!(error = %e, "failed to emit db-initialized");
                        }
                    }
                    Err(e) => {
                        let _ = rolling_logger::error(&format!("Async DB init failed: {}", e));
                    }
                }
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Option tree
            commands::fetch_options,
            commands::list_options,
            commands::get_option,
            commands::create_option,
            commands::update_option,
            commands::delete_option,
            commands::list_descendants,
            // Status
            commands::is_db_ready,
            commands::recent_logs,
            commands::log_message,
        ])
        .run(tauri::generate_context!())
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "error while running tauri application");
            std::process::exit(1);
        });
}
