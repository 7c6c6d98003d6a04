//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Board engines
//! publish their grouped snapshots here; views read columns from it.

use board_engine::{BoardSnapshot, Notification, NotificationKind};
use leptos::prelude::*;
use reactive_stores::Store;

use crate::commands::ApiResult;
use crate::models::{Project, Task};

/// How many notifications stay on screen
pub const MAX_NOTIFICATIONS: usize = 5;

/// A notification with a stable key for list rendering
#[derive(Clone, Debug, PartialEq)]
pub struct UiNotification {
    pub id: u64,
    pub kind: NotificationKind,
    pub text: String,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Project board, grouped by status
    pub projects: BoardSnapshot<Project>,
    /// Task board of the open project, grouped by status
    pub tasks: BoardSnapshot<Task>,
    /// Most recent notifications, oldest first
    pub notifications: Vec<UiNotification>,
    pub next_notification_id: u64,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_set_projects(store: &AppStore, snapshot: BoardSnapshot<Project>) {
    *store.projects().write() = snapshot;
}

pub fn store_set_tasks(store: &AppStore, snapshot: BoardSnapshot<Task>) {
    *store.tasks().write() = snapshot;
}

/// Append a notification, dropping the oldest beyond the limit
pub fn store_push_notification(store: &AppStore, notification: Notification) {
    let id = {
        let next_field = store.next_notification_id();
        let mut next = next_field.write();
        *next += 1;
        *next
    };

    let list_field = store.notifications();
    let mut list = list_field.write();
    list.push(UiNotification {
        id,
        kind: notification.kind,
        text: notification.text,
    });
    let overflow = list.len().saturating_sub(MAX_NOTIFICATIONS);
    list.drain(..overflow);
}

pub fn store_dismiss_notification(store: &AppStore, id: u64) {
    store.notifications().write().retain(|n| n.id != id);
}

/// Report the outcome of a create/update/delete command.
/// Returns `true` on success.
pub fn store_report_result(store: &AppStore, result: ApiResult<String>, success_fallback: &str) -> bool {
    match result {
        Ok(message) => {
            let text = if message.is_empty() { success_fallback.to_string() } else { message };
            store_push_notification(store, Notification::success(text));
            true
        }
        Err(err) => {
            tracing::error!(error = %err, "Command failed");
            store_push_notification(store, Notification::error(err.to_string()));
            false
        }
    }
}
