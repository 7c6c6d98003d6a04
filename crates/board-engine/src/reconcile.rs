//! Reconciliation Controller
//!
//! Applies a drop optimistically, sends the status update, then either
//! confirms (refresh + success notification) or rolls the local change
//! back (error notification). Nothing is retried.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use serde::Serialize;

use crate::drag::Transition;
use crate::error::{BoardError, RemoteError};
use crate::item::BoardItem;
use crate::notify::{Notification, Notifier};
use crate::status::Status;
use crate::store::{BoardStore, PendingMutation};

/// Shown when the server gives no message of its own
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to update status";

/// Collection the board belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardScope {
    /// Top-level collection (projects)
    Root,
    /// Collection owned by a parent (tasks of a project)
    Parent(String),
}

impl BoardScope {
    pub fn parent_id(&self) -> Option<&str> {
        match self {
            BoardScope::Root => None,
            BoardScope::Parent(id) => Some(id),
        }
    }
}

/// Payload of the remote status-update call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate<S> {
    pub parent_id: Option<String>,
    pub item_id: String,
    pub status: S,
}

/// Remote side of a status change
#[async_trait(?Send)]
pub trait StatusRemote<S: Status> {
    async fn update_status(&self, update: &StatusUpdate<S>) -> Result<(), RemoteError>;
}

/// How a drop was settled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Dropped on the source column, or the drop payload was unusable
    NoChange,
    /// Precondition failed; nothing was mutated or sent
    Rejected(BoardError),
    /// Item vanished from the snapshot before the drop landed
    Stale,
    /// Server accepted the update
    Confirmed,
    /// Server refused or was unreachable; local change undone
    RolledBack(RemoteError),
}

/// Drives one board's optimistic status updates
pub struct ReconciliationController<T: BoardItem> {
    store: Rc<RefCell<BoardStore<T>>>,
    scope: BoardScope,
    remote: Rc<dyn StatusRemote<T::Status>>,
    notifier: Rc<dyn Notifier>,
    refresh: Rc<dyn Fn()>,
    pending: RefCell<HashMap<String, PendingMutation<T::Status>>>,
}

impl<T: BoardItem> ReconciliationController<T> {
    pub fn new(
        store: Rc<RefCell<BoardStore<T>>>,
        scope: BoardScope,
        remote: Rc<dyn StatusRemote<T::Status>>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            scope,
            remote,
            notifier,
            refresh: Rc::new(|| {}),
            pending: RefCell::new(HashMap::new()),
        }
    }

    /// Callback that invalidates the authoritative source after a
    /// confirmed update
    pub fn with_refresh(mut self, refresh: impl Fn() + 'static) -> Self {
        self.refresh = Rc::new(refresh);
        self
    }

    pub fn scope(&self) -> &BoardScope {
        &self.scope
    }

    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_pending(&self, item_id: &str) -> bool {
        self.pending.borrow().contains_key(item_id)
    }

    pub async fn on_drop(&self, transition: Transition<T::Status>) -> DropOutcome {
        if let Err(err) = self.check_preconditions(&transition) {
            tracing::warn!(item_id = %transition.item_id, error = %err, "Drop rejected");
            self.notifier.notify(Notification::error(err.to_string()));
            return DropOutcome::Rejected(err);
        }

        let (mutation, label) = {
            let mut store = self.store.borrow_mut();
            let Some(mutation) = store.apply_optimistic(&transition.item_id, transition.to) else {
                return DropOutcome::Stale;
            };
            let label = store
                .get(&transition.item_id)
                .map(|item| item.label().to_string())
                .unwrap_or_else(|| transition.item_id.clone());
            (mutation, label)
        };

        self.pending
            .borrow_mut()
            .insert(mutation.item_id.clone(), mutation.clone());

        let update = StatusUpdate {
            parent_id: self.scope.parent_id().map(str::to_string),
            item_id: mutation.item_id.clone(),
            status: mutation.attempted,
        };
        let result = self.remote.update_status(&update).await;

        let mutation = self
            .pending
            .borrow_mut()
            .remove(&update.item_id)
            .unwrap_or(mutation);

        match result {
            Ok(()) => {
                tracing::info!(
                    item_id = %mutation.item_id,
                    status = %mutation.attempted,
                    "Status update confirmed"
                );
                (self.refresh)();
                self.notifier.notify(Notification::success(format!(
                    "\"{}\" moved to {}",
                    label,
                    mutation.attempted.label()
                )));
                DropOutcome::Confirmed
            }
            Err(err) => {
                let reverted = self.store.borrow_mut().revert(&mutation);
                tracing::error!(
                    item_id = %mutation.item_id,
                    error = %err,
                    revert = ?reverted,
                    "Status update failed, rolled back"
                );
                let text = err.user_message().unwrap_or(GENERIC_FAILURE_MESSAGE).to_string();
                self.notifier.notify(Notification::error(text));
                DropOutcome::RolledBack(err)
            }
        }
    }

    fn check_preconditions(&self, transition: &Transition<T::Status>) -> Result<(), BoardError> {
        if transition.item_id.trim().is_empty() {
            return Err(BoardError::MissingItemId);
        }
        if let BoardScope::Parent(parent_id) = &self.scope {
            if parent_id.trim().is_empty() {
                return Err(BoardError::MissingParentId);
            }
        }
        if self.is_pending(&transition.item_id) {
            return Err(BoardError::MutationInFlight {
                id: transition.item_id.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotificationKind;
    use crate::status::TaskStatus;
    use crate::testing::{card, Card};
    use std::cell::Cell;

    /// Remote that answers from a fixed script and records what it saw
    struct ScriptedRemote {
        fail_with: Option<RemoteError>,
        calls: RefCell<Vec<StatusUpdate<TaskStatus>>>,
    }

    #[async_trait(?Send)]
    impl StatusRemote<TaskStatus> for ScriptedRemote {
        async fn update_status(&self, update: &StatusUpdate<TaskStatus>) -> Result<(), RemoteError> {
            self.calls.borrow_mut().push(update.clone());
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }

    struct Harness {
        store: Rc<RefCell<BoardStore<Card>>>,
        remote: Rc<ScriptedRemote>,
        notes: Rc<RefCell<Vec<Notification>>>,
        refreshes: Rc<Cell<u32>>,
        controller: ReconciliationController<Card>,
    }

    fn harness(scope: BoardScope, fail_with: Option<RemoteError>) -> Harness {
        let store = Rc::new(RefCell::new(BoardStore::new()));
        store
            .borrow_mut()
            .load(vec![card("t1", TaskStatus::Pending)]);

        let remote = Rc::new(ScriptedRemote {
            fail_with,
            calls: RefCell::new(Vec::new()),
        });
        let notes = Rc::new(RefCell::new(Vec::new()));
        let sink = notes.clone();
        let refreshes = Rc::new(Cell::new(0));
        let counter = refreshes.clone();

        let controller = ReconciliationController::<Card>::new(
            store.clone(),
            scope,
            remote.clone(),
            Rc::new(move |n: Notification| sink.borrow_mut().push(n)),
        )
        .with_refresh(move || counter.set(counter.get() + 1));

        Harness {
            store,
            remote,
            notes,
            refreshes,
            controller,
        }
    }

    fn to_in_progress(id: &str) -> Transition<TaskStatus> {
        Transition {
            item_id: id.to_string(),
            from: TaskStatus::Pending,
            to: TaskStatus::InProgress,
        }
    }

    #[tokio::test]
    async fn test_success_keeps_new_status_and_refreshes() {
        let h = harness(BoardScope::Parent("p1".into()), None);

        let outcome = h.controller.on_drop(to_in_progress("t1")).await;

        assert_eq!(outcome, DropOutcome::Confirmed);
        assert_eq!(h.store.borrow().status_of("t1"), Some(TaskStatus::InProgress));
        assert_eq!(h.refreshes.get(), 1);
        assert_eq!(h.notes.borrow().len(), 1);
        assert_eq!(h.notes.borrow()[0].kind, NotificationKind::Success);
        assert_eq!(h.controller.pending_count(), 0);

        let calls = h.remote.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].parent_id.as_deref(), Some("p1"));
        assert_eq!(calls[0].status, TaskStatus::InProgress);
    }

    #[tokio::test]
    async fn test_failure_restores_previous_status() {
        let err = RemoteError::Rejected {
            status: Some(400),
            message: "Invalid transition".to_string(),
        };
        let h = harness(BoardScope::Parent("p1".into()), Some(err.clone()));
        let before = h.store.borrow().get("t1").cloned();

        let outcome = h.controller.on_drop(to_in_progress("t1")).await;

        assert_eq!(outcome, DropOutcome::RolledBack(err));
        assert_eq!(h.store.borrow().get("t1").cloned(), before);
        assert_eq!(h.refreshes.get(), 0);
        let notes = h.notes.borrow();
        assert_eq!(notes.len(), 1);
        assert!(notes[0].is_error());
        assert_eq!(notes[0].text, "Invalid transition");
    }

    #[tokio::test]
    async fn test_network_failure_uses_generic_message() {
        let h = harness(BoardScope::Root, Some(RemoteError::Network("timeout".into())));

        h.controller.on_drop(to_in_progress("t1")).await;

        assert_eq!(h.notes.borrow()[0].text, GENERIC_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_missing_parent_is_rejected_without_side_effects() {
        let h = harness(BoardScope::Parent(" ".into()), None);

        let outcome = h.controller.on_drop(to_in_progress("t1")).await;

        assert_eq!(outcome, DropOutcome::Rejected(BoardError::MissingParentId));
        assert_eq!(h.store.borrow().status_of("t1"), Some(TaskStatus::Pending));
        assert!(h.remote.calls.borrow().is_empty());
        assert_eq!(h.notes.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_item_id_is_rejected() {
        let h = harness(BoardScope::Root, None);

        let outcome = h.controller.on_drop(to_in_progress("")).await;

        assert_eq!(outcome, DropOutcome::Rejected(BoardError::MissingItemId));
        assert!(h.remote.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_stale_item_makes_no_call_and_no_notification() {
        let h = harness(BoardScope::Root, None);

        let outcome = h.controller.on_drop(to_in_progress("gone")).await;

        assert_eq!(outcome, DropOutcome::Stale);
        assert!(h.remote.calls.borrow().is_empty());
        assert!(h.notes.borrow().is_empty());
    }
}
