//! Log Panel Component
//!
//! Collapsible view of the rolling log buffer.

use leptos::prelude::*;

#[component]
pub fn LogPanel() -> impl IntoView {
    let (open, set_open) = signal(false);
    // Bumped on refresh; the buffer itself is not reactive
    let (version, set_version) = signal(0u32);

    let lines = move || {
        version.track();
        rolling_logger::recent()
            .iter()
            .rev()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
    };

    view! {
        <footer class="log-panel">
            <button on:click=move |_| {
                set_open.update(|o| *o = !*o);
                set_version.update(|v| *v += 1);
            }>
                {move || if open.get() { "Hide log" } else { "Show log" }}
            </button>
            <Show when=move || open.get()>
                <button on:click=move |_| set_version.update(|v| *v += 1)>"Refresh"</button>
                <pre class="log-lines">
                    {move || lines().join("\n")}
                </pre>
            </Show>
        </footer>
    }
}
