//! Delete Confirm Button Component
//!
//! Inline delete confirmation with confirm/cancel actions.

use leptos::prelude::*;

/// Inline delete confirmation button
///
/// Shows a delete button initially. When clicked, asks "Delete <name>?"
/// with confirm and cancel buttons.
#[component]
pub fn DeleteConfirmButton(
    /// What is being deleted, shown in the question
    #[prop(into)] name: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (confirm_delete, set_confirm_delete) = signal(false);

    view! {
        <Show when=move || !confirm_delete.get()>
            <button
                class="delete-btn"
                on:click=move |ev| {
                    ev.stop_propagation();
                    set_confirm_delete.set(true);
                }
            >
                "Delete"
            </button>
        </Show>
        <Show when=move || confirm_delete.get()>
            <span class="delete-confirm">
                <span class="delete-confirm-text">{format!("Delete \"{}\"?", name)}</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirm_delete.set(false);
                        on_confirm.run(());
                    }
                >
                    "Yes"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirm_delete.set(false);
                    }
                >
                    "No"
                </button>
            </span>
        </Show>
    }
}
