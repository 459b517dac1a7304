//! Delete Confirm Button Component
//!
//! Inline delete confirmation with confirm/cancel actions.

use leptos::prelude::*;

/// Inline delete confirmation button
///
/// Shows a × button initially. When clicked, shows "Supprimer ?" with ✓/✗ buttons.
/// Deleting an option also removes everything below it, so `warning` can
/// say how much goes with it. `on_arm` runs when the confirmation opens.
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(optional, into)] on_arm: Option<Callback<()>>,
    #[prop(optional, into)] warning: MaybeProp<String>,
) -> impl IntoView {
    let (confirm_delete, set_confirm_delete) = signal(false);
    let prompt = move || match warning.get() {
        Some(w) => format!("Supprimer ? {}", w),
        None => "Supprimer ?".to_string(),
    };

    view! {
        <Show when=move || !confirm_delete.get()>
            <button
                class="delete-btn"
                on:click=move |ev| {
                    ev.stop_propagation();
                    set_confirm_delete.set(true);
                    if let Some(on_arm) = on_arm {
                        on_arm.run(());
                    }
                }
            >
                "×"
            </button>
        </Show>
        <Show when=move || confirm_delete.get()>
            <span class="delete-confirm">
                <span class="delete-confirm-text">{prompt}</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirm_delete.set(false);
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirm_delete.set(false);
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
