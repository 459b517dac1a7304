//! Commands Layer
//!
//! Tauri command handlers that bridge frontend to backend services.

mod app_cmd;
mod option_cmd;

pub use app_cmd::*;
pub use option_cmd::*;
