//! Drag Coordinator
//!
//! Tracks the single active drag gesture and turns a drop into a status
//! transition when the target column differs from the source column.

use crate::status::Status;

/// Transient state between drag-start and drag-end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession<S> {
    pub item_id: String,
    pub from: S,
}

/// A requested status change produced by a drop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<S> {
    pub item_id: String,
    pub from: S,
    pub to: S,
}

/// Single-pointer drag state machine
#[derive(Debug)]
pub struct DragCoordinator<S> {
    session: Option<DragSession<S>>,
}

impl<S: Status> Default for DragCoordinator<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Status> DragCoordinator<S> {
    pub fn new() -> Self {
        Self { session: None }
    }

    /// Start tracking a drag. Returns `false` and changes nothing when a
    /// drag is already active.
    pub fn begin_drag(&mut self, item_id: &str, from: S) -> bool {
        if let Some(active) = &self.session {
            tracing::debug!(
                active = %active.item_id,
                ignored = item_id,
                "Drag already active, ignoring drag start"
            );
            return false;
        }
        tracing::debug!(item_id, from = %from, "Drag started");
        self.session = Some(DragSession {
            item_id: item_id.to_string(),
            from,
        });
        true
    }

    /// Decide whether a drop on `target` warrants a transition.
    ///
    /// `payload` is the identifier carried through the platform drag
    /// payload. A missing, blank or mismatched payload is treated as a
    /// corrupted transfer and rejected.
    pub fn compute_transition(&self, payload: Option<&str>, target: S) -> Option<Transition<S>> {
        let session = self.session.as_ref()?;

        let session_id = session.item_id.trim();
        if session_id.is_empty() {
            tracing::warn!("Drop rejected: drag session has no item id");
            return None;
        }

        let payload_id = payload.map(str::trim).unwrap_or_default();
        if payload_id.is_empty() {
            tracing::warn!(session = session_id, "Drop rejected: payload carries no item id");
            return None;
        }
        if payload_id != session_id {
            tracing::warn!(
                session = session_id,
                payload = payload_id,
                "Drop rejected: payload does not match dragged item"
            );
            return None;
        }

        if session.from == target {
            return None;
        }

        Some(Transition {
            item_id: session_id.to_string(),
            from: session.from,
            to: target,
        })
    }

    /// Clear the session. Safe to call when no drag is active.
    pub fn end_drag(&mut self) -> Option<DragSession<S>> {
        let ended = self.session.take();
        if let Some(session) = &ended {
            tracing::debug!(item_id = %session.item_id, "Drag ended");
        }
        ended
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession<S>> {
        self.session.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::TaskStatus;

    fn dragging(id: &str, from: TaskStatus) -> DragCoordinator<TaskStatus> {
        let mut coordinator = DragCoordinator::new();
        assert!(coordinator.begin_drag(id, from));
        coordinator
    }

    #[test]
    fn test_same_column_drop_yields_nothing() {
        let coordinator = dragging("t1", TaskStatus::Pending);
        assert_eq!(coordinator.compute_transition(Some("t1"), TaskStatus::Pending), None);
    }

    #[test]
    fn test_cross_column_drop_yields_transition() {
        let coordinator = dragging("t1", TaskStatus::Pending);
        let transition = coordinator
            .compute_transition(Some("t1"), TaskStatus::InProgress)
            .expect("transition");

        assert_eq!(transition.item_id, "t1");
        assert_eq!(transition.from, TaskStatus::Pending);
        assert_eq!(transition.to, TaskStatus::InProgress);
    }

    #[test]
    fn test_second_drag_is_ignored() {
        let mut coordinator = dragging("t1", TaskStatus::Pending);
        assert!(!coordinator.begin_drag("t2", TaskStatus::Completed));
        assert_eq!(coordinator.session().map(|s| s.item_id.as_str()), Some("t1"));
    }

    #[test]
    fn test_corrupted_payload_is_rejected() {
        let coordinator = dragging("t1", TaskStatus::Pending);
        assert_eq!(coordinator.compute_transition(None, TaskStatus::InProgress), None);
        assert_eq!(coordinator.compute_transition(Some("  "), TaskStatus::InProgress), None);
        assert_eq!(coordinator.compute_transition(Some("t2"), TaskStatus::InProgress), None);
    }

    #[test]
    fn test_blank_session_id_is_rejected() {
        let coordinator = dragging("", TaskStatus::Pending);
        assert_eq!(coordinator.compute_transition(Some(""), TaskStatus::Completed), None);
    }

    #[test]
    fn test_drop_without_session() {
        let coordinator = DragCoordinator::<TaskStatus>::new();
        assert_eq!(coordinator.compute_transition(Some("t1"), TaskStatus::Completed), None);
    }

    #[test]
    fn test_end_drag_always_clears() {
        let mut coordinator = dragging("t1", TaskStatus::Pending);
        assert!(coordinator.end_drag().is_some());
        assert!(!coordinator.is_dragging());
        assert!(coordinator.end_drag().is_none());
        assert!(coordinator.begin_drag("t2", TaskStatus::OnHold));
    }
}
