//! Browser console logging.
//!
//! `tracing` events from the UI and the selector core go to the devtools
//! console through `tracing-wasm`, filtered by `RUST_LOG`-style directives.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_wasm::{WASMLayer, WASMLayerConfigBuilder};

/// Install the console subscriber; `directives` as in `RUST_LOG`
pub fn init(directives: &str) {
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"));
    let console = WASMLayer::new(
        WASMLayerConfigBuilder::new()
            .set_report_logs_in_timings(false)
            .set_max_level(tracing::Level::DEBUG)
            .build(),
    );
    if tracing_subscriber::registry().with(filter).with(console).try_init().is_err() {
        web_sys::console::warn_1(&"tracing subscriber already installed".into());
    }
}
