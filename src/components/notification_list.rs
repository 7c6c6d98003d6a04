//! Notification List Component

use board_engine::NotificationKind;
use leptos::prelude::*;

use crate::store::{store_dismiss_notification, use_app_store, AppStateStoreFields};

/// Plain list of the most recent notifications
#[component]
pub fn NotificationList() -> impl IntoView {
    let store = use_app_store();

    view! {
        <ul class="notifications">
            <For
                each=move || store.notifications().get()
                key=|n| n.id
                children=move |n| {
                    let class = match n.kind {
                        NotificationKind::Success => "notification success",
                        NotificationKind::Error => "notification error",
                    };
                    let id = n.id;
                    view! {
                        <li class=class>
                            <span>{n.text}</span>
                            <button
                                class="notification-dismiss"
                                on:click=move |_| store_dismiss_notification(&store, id)
                            >
                                "×"
                            </button>
                        </li>
                    }
                }
            />
        </ul>
    }
}
