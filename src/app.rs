//! Foyer Frontend App
//!
//! Room declaration (single choice, restored from the stored declaration),
//! report filter (multiple choice) and option maintenance.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use option_tree::{InitialValues, SelectionMap};

use crate::commands;
use crate::components::{CascadingSelect, LogPanel, OptionAdmin, SelectionSummary};
use crate::context::AppContext;

/// Poll interval while the backend opens the database
const DB_POLL_MS: u32 = 100;

/// Room the resident declared last time
fn stored_declaration() -> InitialValues {
    InitialValues::new()
        .with("residence", "12")
        .with("etage", "2")
        .with("chambre", "204")
}

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new(signal(false), signal(0u32));
    provide_context(ctx);

    // Wait for the background database initialization
    spawn_local(async move {
        loop {
            match commands::is_db_ready().await {
                Ok(true) => {
                    tracing::info!("database ready");
                    ctx.mark_ready();
                    break;
                }
                Ok(false) => {}
                Err(e) => tracing::warn!(error = %e, "readiness check failed"),
            }
            TimeoutFuture::new(DB_POLL_MS).await;
        }
    });

    let (room, set_room) = signal(SelectionMap::new());
    let (filter, set_filter) = signal(SelectionMap::new());

    view! {
        <main class="foyer">
            <h1>"Foyer"</h1>

            <Show
                when=move || ctx.db_ready.get()
                fallback=|| view! { <p class="loading">"Ouverture de la base…"</p> }
            >
                <section class="panel">
                    <h2>"Déclaration de chambre"</h2>
                    <CascadingSelect
                        root_category="residence"
                        initial_values=stored_declaration()
                        on_change=move |map: SelectionMap| set_room.set(map)
                    />
                    <SelectionSummary selection=room />
                </section>

                <section class="panel">
                    <h2>"Filtre du rapport"</h2>
                    <CascadingSelect
                        root_category="residence"
                        multiple=true
                        on_change=move |map: SelectionMap| set_filter.set(map)
                    />
                    <SelectionSummary selection=filter />
                </section>

                <section class="panel">
                    <h2>"Résidences seules"</h2>
                    <CascadingSelect root_category="residence" only_parent=true show_label=false />
                </section>

                <OptionAdmin />
            </Show>

            <LogPanel />
        </main>
    }
}
