//! Board Item Contract
//!
//! Anything shown as a card on a status board. Identity is fixed; the
//! engine only ever writes `status`.

use crate::status::Status;

/// Core trait for all board cards
pub trait BoardItem: Clone + 'static {
    /// The status set this item is grouped by
    type Status: Status;

    /// Stable unique identifier
    fn id(&self) -> &str;

    /// Display label used in notifications
    fn label(&self) -> &str;

    fn status(&self) -> Self::Status;

    fn set_status(&mut self, status: Self::Status);
}
