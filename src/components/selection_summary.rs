//! Selection Summary Component
//!
//! Read-only listing of a selection map, one line per category.

use leptos::prelude::*;
use option_tree::SelectionMap;

#[component]
pub fn SelectionSummary(selection: ReadSignal<SelectionMap>) -> impl IntoView {
    let rows = move || {
        selection.with(|map| {
            map.iter()
                .map(|(category, nodes)| {
                    let category = category.to_string();
                    let labels = if nodes.is_empty() {
                        "—".to_string()
                    } else {
                        nodes.iter().map(|n| n.label.as_str()).collect::<Vec<_>>().join(", ")
                    };
                    view! {
                        <dt>{category}</dt>
                        <dd>{labels}</dd>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <Show
            when=move || selection.with(|map| !map.is_empty())
            fallback=|| view! { <p class="selection-empty">"Aucune sélection"</p> }
        >
            <dl class="selection-summary">{rows}</dl>
        </Show>
    }
}
