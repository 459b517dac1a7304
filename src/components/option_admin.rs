//! Option Admin Component
//!
//! Maintenance screen for the stored option tree: add, rename and delete
//! options. Every change bumps `AppContext::options_version` so mounted
//! selectors reload.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use option_tree::OptionNode;

use crate::commands::{self, CreateOptionArgs, UpdateOptionArgs};
use crate::components::DeleteConfirmButton;
use crate::context::AppContext;

fn input_value(ev: &leptos::ev::Event) -> String {
    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

#[component]
pub fn OptionAdmin() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (options, set_options) = signal(Vec::<OptionNode>::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (editing, set_editing) = signal::<Option<OptionNode>>(None);

    let (category, set_category) = signal(String::new());
    let (label_category, set_label_category) = signal(String::new());
    let (value, set_value) = signal(String::new());
    let (label, set_label) = signal(String::new());
    let (parent, set_parent) = signal(String::new());
    let (rename_to, set_rename_to) = signal(String::new());

    // Load options when the database is ready or options change
    Effect::new(move |_| {
        if !ctx.db_ready.get() {
            return;
        }
        let _ = ctx.options_version.get();
        spawn_local(async move {
            match commands::list_options().await {
                Ok(loaded) => set_options.set(loaded),
                Err(e) => set_error.set(Some(e)),
            }
        });
    });

    let create = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let (category, label_category, value, label, parent) =
            (category.get(), label_category.get(), value.get(), label.get(), parent.get());

        spawn_local(async move {
            let args = CreateOptionArgs {
                category: category.trim(),
                value: value.trim(),
                label: label.trim(),
                label_category: non_empty(&label_category),
                parent_value: non_empty(&parent),
            };
            match commands::create_option(&args).await {
                Ok(created) => {
                    tracing::info!(id = created.id, value = %created.value, "option created");
                    set_value.set(String::new());
                    set_label.set(String::new());
                    set_error.set(None);
                    ctx.options_changed();
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let start_edit = move |id: i64| {
        spawn_local(async move {
            match commands::get_option(id).await {
                Ok(Some(option)) => {
                    set_rename_to.set(option.label.clone());
                    set_editing.set(Some(option));
                }
                Ok(None) => set_error.set(Some(format!("Option {} introuvable", id))),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let save_edit = move |_: web_sys::MouseEvent| {
        let Some(option) = editing.get() else { return };
        let new_label = rename_to.get();
        spawn_local(async move {
            let args = UpdateOptionArgs {
                id: option.id,
                label: non_empty(&new_label),
                ..Default::default()
            };
            match commands::update_option(&args).await {
                Ok(_) => {
                    set_editing.set(None);
                    set_error.set(None);
                    ctx.options_changed();
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let remove = move |id: i64| {
        spawn_local(async move {
            match commands::delete_option(id).await {
                Ok(()) => {
                    set_editing.set(None);
                    ctx.options_changed();
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    view! {
        <section class="option-admin">
            <h2>"Options"</h2>

            <Show when=move || error.get().is_some()>
                <p class="error">{move || error.get().unwrap_or_default()}</p>
            </Show>

            <form class="option-form" on:submit=create>
                <input type="text" placeholder="Catégorie (ex. chambre)"
                    prop:value=move || category.get()
                    on:input=move |ev| set_category.set(input_value(&ev)) />
                <input type="text" placeholder="Libellé de catégorie"
                    prop:value=move || label_category.get()
                    on:input=move |ev| set_label_category.set(input_value(&ev)) />
                <input type="text" placeholder="Valeur"
                    prop:value=move || value.get()
                    on:input=move |ev| set_value.set(input_value(&ev)) />
                <input type="text" placeholder="Libellé"
                    prop:value=move || label.get()
                    on:input=move |ev| set_label.set(input_value(&ev)) />
                <input type="text" placeholder="Valeur parente"
                    prop:value=move || parent.get()
                    on:input=move |ev| set_parent.set(input_value(&ev)) />
                <button type="submit">"Ajouter"</button>
            </form>

            <Show when=move || editing.get().is_some()>
                <div class="option-edit">
                    <span>{move || editing.get().map(|o| format!("{} / {}", o.category, o.value)).unwrap_or_default()}</span>
                    <input type="text"
                        prop:value=move || rename_to.get()
                        on:input=move |ev| set_rename_to.set(input_value(&ev)) />
                    <button on:click=save_edit>"Renommer"</button>
                    <button on:click=move |_| set_editing.set(None)>"Annuler"</button>
                </div>
            </Show>

            <ul class="option-list">
                <For
                    each=move || options.get()
                    key=|o| (o.id, o.label.clone(), o.value.clone())
                    children=move |option| {
                        let id = option.id;
                        let value = option.value.clone();
                        let parent = option.parent_value.clone().unwrap_or_else(|| "—".to_string());
                        let (subtree, set_subtree) = signal::<Option<String>>(None);
                        let count_subtree = move |_: ()| {
                            let value = value.clone();
                            spawn_local(async move {
                                match commands::list_descendants(&value).await {
                                    Ok(below) if below.is_empty() => set_subtree.set(None),
                                    Ok(below) => set_subtree.set(Some(format!("(et {} sous-option(s))", below.len()))),
                                    Err(e) => set_error.set(Some(e)),
                                }
                            });
                        };
                        view! {
                            <li class="option-row" on:click=move |_| start_edit(id)>
                                <span class="option-category">{option.label_category.clone()}</span>
                                <span class="option-label">{option.label.clone()}</span>
                                <span class="option-value">{option.value.clone()}</span>
                                <span class="option-parent">{parent}</span>
                                <DeleteConfirmButton
                                    warning=subtree
                                    on_arm=count_subtree
                                    on_confirm=move |_| remove(id)
                                />
                            </li>
                        }
                    }
                />
            </ul>
        </section>
    }
}
