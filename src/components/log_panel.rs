//! Log Panel Component
//!
//! Tail of the backend log, refreshed on demand.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;

#[component]
pub fn LogPanel() -> impl IntoView {
    let (lines, set_lines) = signal(Vec::<String>::new());
    let (open, set_open) = signal(false);

    let refresh = move || {
        spawn_local(async move {
            match commands::recent_logs().await {
                Ok(loaded) => set_lines.set(loaded),
                Err(e) => tracing::warn!(error = %e, "failed to load recent logs"),
            }
        });
    };

    view! {
        <section class="log-panel">
            <button
                class="log-toggle"
                on:click=move |_| {
                    let now_open = !open.get();
                    set_open.set(now_open);
                    if now_open {
                        refresh();
                    }
                }
            >
                {move || if open.get() { "Masquer le journal" } else { "Afficher le journal" }}
            </button>
            <Show when=move || open.get()>
                <button class="log-refresh" on:click=move |_| refresh()>"Actualiser"</button>
                <pre class="log-lines">
                    {move || lines.get().join("")}
                </pre>
            </Show>
        </section>
    }
}
