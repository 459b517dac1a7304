//! Application Status Commands
//!
//! Readiness check and log access for the frontend.

use tauri::State;
use crate::AppState;

/// Whether the background database initialization finished
#[tauri::command]
pub async fn is_db_ready(state: State<'_, AppState>) -> Result<bool, String> {
    Ok(state.db_state.is_ready().await)
}

/// Last lines written by the rolling logger
#[tauri::command]
pub fn recent_logs() -> Vec<String> {
    rolling_logger::recent_lines()
}

/// Forward a frontend message to the application log
#[tauri::command]
pub fn log_message(level: String, message: String) -> Result<(), String> {
    let message = format!("[ui] {}", message);
    let result = match level.as_str() {
        "error" => rolling_logger::error(&message),
        "warn" => rolling_logger::warn(&message),
        _ => rolling_logger::info(&message),
    };
    result.map_err(|e| e.to_string())
}
