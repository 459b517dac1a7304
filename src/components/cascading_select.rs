//! Cascading Select Component
//!
//! Renders one `<select>` per loaded level of a `CascadeSelector`. Every
//! level starts with the synthetic "Tous / Toutes" entry; picking options on a
//! level drops the levels below it and loads the children of the new choice.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::HtmlSelectElement;

use option_tree::{
    CascadeSelector, InitialValues, Selection, SelectionMap, SelectorConfig, SELECT_ALL_ID,
};

use crate::commands;
use crate::context::AppContext;
use crate::source::TauriOptionSource;

/// Ids of the options currently selected in the `<select>` that fired `ev`
fn picked_ids(ev: &leptos::ev::Event) -> Vec<i64> {
    let Some(select) = ev.target().and_then(|t| t.dyn_into::<HtmlSelectElement>().ok()) else {
        return Vec::new();
    };
    let options = select.selected_options();
    (0..options.length())
        .filter_map(|i| options.item(i))
        .filter_map(|el| el.get_attribute("value"))
        .filter_map(|v| v.parse().ok())
        .collect()
}

/// Current choice expressed as initial values, so a reload lands on it again
fn carried_over(map: &SelectionMap) -> Option<InitialValues> {
    if map.is_empty() {
        return None;
    }
    let initial = map.iter().fold(InitialValues::new(), |acc, (category, nodes)| {
        acc.with(category, nodes.iter().map(|n| n.value.clone()).collect::<Vec<String>>())
    });
    Some(initial)
}

fn report(message: String) {
    tracing::warn!("{}", message);
    spawn_local(async move {
        let _ = commands::log_message("warn", &message).await;
    });
}

#[component]
pub fn CascadingSelect(
    /// Category whose parentless options form the first level
    #[prop(into)]
    root_category: String,
    /// Show only the first level
    #[prop(optional)]
    only_parent: bool,
    /// Preselected values per category, back-filled on mount
    #[prop(optional)]
    initial_values: Option<InitialValues>,
    #[prop(optional)]
    disabled: bool,
    #[prop(default = true)]
    show_label: bool,
    /// Multi-select per level instead of a dropdown
    #[prop(optional)]
    multiple: bool,
    /// Called with the full selection after every change
    #[prop(optional, into)]
    on_change: Option<Callback<SelectionMap>>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let mut config = SelectorConfig::new(&root_category).disabled(disabled).show_label(show_label);
    if only_parent {
        config = config.only_parent();
    }
    if multiple {
        config = config.multiple();
    }

    // Last emitted selection; survives selector rebuilds
    let chosen = StoredValue::new(SelectionMap::new());

    let build = move |after_epoch: Option<u64>| {
        let on_change = on_change.clone();
        let selector = CascadeSelector::new(config.clone()).on_change(move |map| {
            chosen.set_value(map.clone());
            if let Some(callback) = &on_change {
                callback.run(map.clone());
            }
        });
        match after_epoch {
            Some(epoch) => selector.resume_after(epoch),
            None => selector,
        }
    };

    let selector = StoredValue::new_local(build(None));
    // Bumped after every state change; the view re-renders from the selector
    let (version, set_version) = signal(0u32);

    // (Re)mount once the database is ready and whenever stored options change
    Effect::new(move |_| {
        if !ctx.db_ready.get() {
            return;
        }
        let _ = ctx.options_version.get();

        let initial = chosen.with_value(carried_over).or_else(|| initial_values.clone());
        let epoch = selector.with_value(|s| s.epoch());
        selector.set_value(build(Some(epoch)));

        let backfill = selector
            .try_update_value(|s| initial.as_ref().and_then(|i| s.begin_backfill(i)))
            .flatten();
        if let Some(request) = backfill {
            spawn_local(async move {
                let response = request.run(&TauriOptionSource).await;
                selector.update_value(|s| {
                    s.apply_backfill(response);
                });
                set_version.update(|v| *v += 1);
            });
        } else if let Some(request) = selector.try_update_value(|s| s.begin_root_load()).flatten() {
            let category = root_category.clone();
            spawn_local(async move {
                let response = request.run(&TauriOptionSource).await;
                if response.failed() {
                    report(format!("failed to load {} options", category));
                }
                selector.update_value(|s| {
                    s.apply_level(response);
                });
                set_version.update(|v| *v += 1);
            });
        }
        set_version.update(|v| *v += 1);
    });

    let pick = move |level: usize, ids: Vec<i64>| {
        let outcome = selector.try_update_value(|s| {
            if ids.is_empty() {
                s.clear(level).map(|_| None)
            } else {
                s.select(level, &ids)
            }
        });
        set_version.update(|v| *v += 1);

        match outcome {
            Some(Ok(Some(request))) => spawn_local(async move {
                let response = request.run(&TauriOptionSource).await;
                if response.failed() {
                    report(format!("failed to load children of level {}", level));
                }
                selector.update_value(|s| {
                    s.apply_level(response);
                });
                set_version.update(|v| *v += 1);
            }),
            Some(Err(e)) => report(format!("selection rejected: {}", e)),
            _ => {}
        }
    };

    let levels = move || {
        let _ = version.get();
        selector.with_value(|s| {
            s.levels()
                .iter()
                .enumerate()
                .map(|(index, level)| {
                    let selected: Vec<i64> = match s.level_selection(index) {
                        Some(Selection::All) => vec![SELECT_ALL_ID],
                        Some(Selection::Subset(ids)) => ids.clone(),
                        None => Vec::new(),
                    };
                    let options: Vec<(i64, String, bool)> = level
                        .options()
                        .iter()
                        .map(|o| (o.id, o.label.clone(), selected.contains(&o.id)))
                        .collect();
                    let label = level.label_category().to_string();

                    view! {
                        <div class="cascade-level">
                            {show_label.then(|| view! { <label class="cascade-label">{label}</label> })}
                            <select
                                class="cascade-select"
                                multiple=multiple
                                disabled=disabled
                                on:change=move |ev| pick(index, picked_ids(&ev))
                            >
                                {(!multiple).then(|| view! {
                                    <option value="" selected=selected.is_empty()>"—"</option>
                                })}
                                {options.into_iter().map(|(id, label, is_selected)| view! {
                                    <option value=id.to_string() selected=is_selected>{label}</option>
                                }).collect_view()}
                            </select>
                        </div>
                    }
                    .into_any()
                })
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class=move || if disabled { "cascading-select disabled" } else { "cascading-select" }>
            {levels}
            <Show when=move || { version.get(); selector.with_value(|s| s.is_loading()) }>
                <span class="cascade-loading">"Chargement…"</span>
            </Show>
        </div>
    }
}
