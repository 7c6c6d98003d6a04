//! Board Engine
//!
//! Optimistic status boards: items grouped into status columns, moved by
//! drag and drop, with the local change applied before the server
//! confirms it and rolled back if the server refuses.
//!
//! - `store`: authoritative item list and grouped snapshots
//! - `drag`: single active drag gesture and drop transitions
//! - `reconcile`: optimistic apply, remote call, confirm or roll back
//! - `engine`: the three wired together for one board

mod drag;
mod engine;
mod error;
mod item;
mod notify;
mod reconcile;
mod status;
mod store;

pub use drag::{DragCoordinator, DragSession, Transition};
pub use engine::BoardEngine;
pub use error::{BoardError, RemoteError, Result};
pub use item::BoardItem;
pub use notify::{Notification, NotificationKind, Notifier};
pub use reconcile::{
    BoardScope, DropOutcome, ReconciliationController, StatusRemote, StatusUpdate,
    GENERIC_FAILURE_MESSAGE,
};
pub use status::{ProjectStatus, Status, TaskStatus};
pub use store::{BoardSnapshot, BoardStore, ListenerId, PendingMutation, RevertOutcome};
