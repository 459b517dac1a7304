//! Application Commands
//!
//! Readiness check and log forwarding.

use wasm_bindgen::prelude::*;
use serde::Serialize;
use super::{invoke, rejection};

#[derive(Serialize)]
struct LogArgs<'a> {
    level: &'a str,
    message: &'a str,
}

pub async fn is_db_ready() -> Result<bool, String> {
    let result = invoke("is_db_ready", JsValue::NULL).await.map_err(rejection)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn recent_logs() -> Result<Vec<String>, String> {
    let result = invoke("recent_logs", JsValue::NULL).await.map_err(rejection)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

/// Write a line to the backend log file
pub async fn log_message(level: &str, message: &str) -> Result<(), String> {
    let js_args = serde_wasm_bindgen::to_value(&LogArgs { level, message }).map_err(|e| e.to_string())?;
    invoke("log_message", js_args).await.map_err(rejection)?;
    Ok(())
}
