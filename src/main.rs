//! Foyer Frontend Entry Point

mod commands;
mod context;
mod source;
mod logging;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logging::init("info,option_tree=debug");
    mount_to_body(App);
}
