//! Tauri Command Wrappers
//!
//! Frontend bindings to backend commands, organized by domain.

mod app;
mod option;

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Rejected invocations (command returned `Err`) surface as `Err(JsValue)`
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

/// Readable message out of a rejected invocation
fn rejection(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

// Re-export all public items
pub use app::*;
pub use option::*;
