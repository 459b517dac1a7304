//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Backend database finished its background initialization
    pub db_ready: ReadSignal<bool>,
    set_db_ready: WriteSignal<bool>,
    /// Bumped whenever options are created, renamed or deleted - read
    pub options_version: ReadSignal<u32>,
    /// Bumped whenever options are created, renamed or deleted - write
    set_options_version: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(
        db_ready: (ReadSignal<bool>, WriteSignal<bool>),
        options_version: (ReadSignal<u32>, WriteSignal<u32>),
    ) -> Self {
        Self {
            db_ready: db_ready.0,
            set_db_ready: db_ready.1,
            options_version: options_version.0,
            set_options_version: options_version.1,
        }
    }

    pub fn mark_ready(&self) {
        self.set_db_ready.set(true);
    }

    /// Signal that stored options changed, so mounted selectors reload
    pub fn options_changed(&self) {
        self.set_options_version.update(|v| *v += 1);
    }
}
