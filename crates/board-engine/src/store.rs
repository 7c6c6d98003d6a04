//! Board Store
//!
//! Holds the authoritative in-memory item list and derives the
//! per-status columns from it. Every mutation re-derives the grouped
//! snapshot and hands it to subscribers.

use std::collections::HashSet;

use crate::item::BoardItem;
use crate::status::Status;

/// Items partitioned by status, one column per status in display order.
///
/// Every status of the set has a column, even when empty.
#[derive(Clone, Debug)]
pub struct BoardSnapshot<T: BoardItem> {
    columns: Vec<(T::Status, Vec<T>)>,
}

impl<T: BoardItem> BoardSnapshot<T> {
    /// Group items by status, keeping input order inside each column
    pub fn group(items: &[T]) -> Self {
        let mut columns: Vec<(T::Status, Vec<T>)> = <T::Status as Status>::ALL
            .iter()
            .map(|status| (*status, Vec::new()))
            .collect();

        for item in items {
            let status = item.status();
            if let Some((_, column)) = columns.iter_mut().find(|(s, _)| *s == status) {
                column.push(item.clone());
            }
        }

        Self { columns }
    }

    pub fn columns(&self) -> &[(T::Status, Vec<T>)] {
        &self.columns
    }

    /// Items currently believed to hold `status`
    pub fn column(&self, status: T::Status) -> &[T] {
        self.columns
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, items)| items.as_slice())
            .unwrap_or(&[])
    }

    pub fn count(&self, status: T::Status) -> usize {
        self.column(status).len()
    }

    /// Total number of items across all columns
    pub fn len(&self) -> usize {
        self.columns.iter().map(|(_, items)| items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Which column holds the item with `id`
    pub fn status_of(&self, id: &str) -> Option<T::Status> {
        self.columns
            .iter()
            .find(|(_, items)| items.iter().any(|item| item.id() == id))
            .map(|(status, _)| *status)
    }
}

impl<T: BoardItem> Default for BoardSnapshot<T> {
    fn default() -> Self {
        Self::group(&[])
    }
}

/// Record of an optimistic status change awaiting remote confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMutation<S> {
    pub item_id: String,
    pub previous: S,
    pub attempted: S,
    /// Store generation the mutation was applied in
    pub generation: u64,
}

/// Result of [`BoardStore::revert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevertOutcome {
    /// Previous status restored
    Restored,
    /// A reload happened since the mutation; the reloaded data wins
    Superseded,
    /// Item no longer present
    Missing,
}

/// Handle returned by [`BoardStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<T> = Box<dyn Fn(&BoardSnapshot<T>)>;

/// Authoritative client-side item list
pub struct BoardStore<T: BoardItem> {
    items: Vec<T>,
    generation: u64,
    listeners: Vec<(ListenerId, Listener<T>)>,
    next_listener: u64,
}

impl<T: BoardItem> Default for BoardStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: BoardItem> BoardStore<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            generation: 0,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Replace the whole item set with freshly fetched data.
    ///
    /// Duplicate ids keep their first occurrence.
    pub fn load(&mut self, items: Vec<T>) {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(items.len());
        for item in items {
            if seen.insert(item.id().to_string()) {
                kept.push(item);
            } else {
                tracing::warn!(item_id = item.id(), "Dropping duplicate item from load");
            }
        }

        self.items = kept;
        self.generation += 1;
        tracing::debug!(
            count = self.items.len(),
            generation = self.generation,
            "Board reloaded"
        );
        self.publish();
    }

    pub fn group_by_status(&self) -> BoardSnapshot<T> {
        BoardSnapshot::group(&self.items)
    }

    /// Move an item to `new_status` locally, without any I/O.
    ///
    /// Unknown ids are a warning and a no-op.
    pub fn apply_optimistic(
        &mut self,
        item_id: &str,
        new_status: T::Status,
    ) -> Option<PendingMutation<T::Status>> {
        let Some(item) = self.items.iter_mut().find(|item| item.id() == item_id) else {
            tracing::warn!(item_id, "Optimistic update skipped: item not in snapshot");
            return None;
        };

        let previous = item.status();
        item.set_status(new_status);
        tracing::debug!(item_id, from = %previous, to = %new_status, "Applied optimistic status");

        let mutation = PendingMutation {
            item_id: item_id.to_string(),
            previous,
            attempted: new_status,
            generation: self.generation,
        };
        self.publish();
        Some(mutation)
    }

    /// Restore the status recorded in `mutation`.
    pub fn revert(&mut self, mutation: &PendingMutation<T::Status>) -> RevertOutcome {
        if mutation.generation != self.generation {
            tracing::debug!(
                item_id = %mutation.item_id,
                "Revert skipped: board reloaded since optimistic update"
            );
            return RevertOutcome::Superseded;
        }

        let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.id() == mutation.item_id)
        else {
            tracing::warn!(item_id = %mutation.item_id, "Revert skipped: item not in snapshot");
            return RevertOutcome::Missing;
        };

        item.set_status(mutation.previous);
        self.publish();
        RevertOutcome::Restored
    }

    pub fn get(&self, item_id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == item_id)
    }

    pub fn status_of(&self, item_id: &str) -> Option<T::Status> {
        self.get(item_id).map(|item| item.status())
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of loads applied so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Register a listener called with the re-derived snapshot after every
    /// mutation. Listeners must not call back into the store.
    pub fn subscribe(&mut self, listener: impl Fn(&BoardSnapshot<T>) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    fn publish(&self) {
        if self.listeners.is_empty() {
            return;
        }
        let snapshot = self.group_by_status();
        for (_, listener) in &self.listeners {
            listener(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{card, Card};
    use crate::status::TaskStatus;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn loaded(items: Vec<Card>) -> BoardStore<Card> {
        let mut store = BoardStore::new();
        store.load(items);
        store
    }

    #[test]
    fn test_group_initializes_every_column() {
        let store = loaded(vec![card("t1", TaskStatus::Pending)]);
        let snapshot = store.group_by_status();

        assert_eq!(snapshot.columns().len(), TaskStatus::ALL.len());
        assert_eq!(snapshot.count(TaskStatus::Pending), 1);
        for status in &TaskStatus::ALL[1..] {
            assert!(snapshot.column(*status).is_empty());
        }
    }

    #[test]
    fn test_group_preserves_input_order_and_partitions() {
        let store = loaded(vec![
            card("a", TaskStatus::InProgress),
            card("b", TaskStatus::Pending),
            card("c", TaskStatus::InProgress),
            card("d", TaskStatus::Completed),
        ]);
        let snapshot = store.group_by_status();

        let in_progress: Vec<&str> = snapshot
            .column(TaskStatus::InProgress)
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(in_progress, vec!["a", "c"]);
        assert_eq!(snapshot.len(), 4);

        // Each item appears in exactly one column
        for id in ["a", "b", "c", "d"] {
            let hits = snapshot
                .columns()
                .iter()
                .filter(|(_, items)| items.iter().any(|c| c.id == id))
                .count();
            assert_eq!(hits, 1, "item {id}");
        }
    }

    #[test]
    fn test_load_replaces_and_dedups() {
        let mut store = loaded(vec![card("a", TaskStatus::Pending)]);
        store.load(vec![
            card("b", TaskStatus::OnHold),
            card("b", TaskStatus::Completed),
        ]);

        assert_eq!(store.len(), 1);
        assert!(store.get("a").is_none());
        assert_eq!(store.status_of("b"), Some(TaskStatus::OnHold));
        assert_eq!(store.generation(), 2);
    }

    #[test]
    fn test_apply_optimistic_unknown_id_is_noop() {
        let mut store = loaded(vec![card("a", TaskStatus::Pending)]);
        assert!(store.apply_optimistic("ghost", TaskStatus::Completed).is_none());
        assert_eq!(store.status_of("a"), Some(TaskStatus::Pending));
    }

    #[test]
    fn test_apply_then_revert_restores_exact_item() {
        let mut store = loaded(vec![card("t1", TaskStatus::Pending)]);
        let before = store.get("t1").cloned();

        let mutation = store
            .apply_optimistic("t1", TaskStatus::InProgress)
            .expect("item exists");
        assert_eq!(mutation.previous, TaskStatus::Pending);
        assert_eq!(store.status_of("t1"), Some(TaskStatus::InProgress));

        assert_eq!(store.revert(&mutation), RevertOutcome::Restored);
        assert_eq!(store.get("t1").cloned(), before);
    }

    #[test]
    fn test_revert_after_reload_is_superseded() {
        let mut store = loaded(vec![card("t1", TaskStatus::Pending)]);
        let mutation = store.apply_optimistic("t1", TaskStatus::Completed).unwrap();

        store.load(vec![card("t1", TaskStatus::UnderReview)]);

        assert_eq!(store.revert(&mutation), RevertOutcome::Superseded);
        assert_eq!(store.status_of("t1"), Some(TaskStatus::UnderReview));
    }

    #[test]
    fn test_subscribers_see_every_mutation() {
        let mut store = BoardStore::<Card>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let id = store.subscribe(move |snapshot| {
            sink.borrow_mut().push(snapshot.status_of("t1"));
        });

        store.load(vec![card("t1", TaskStatus::Pending)]);
        let mutation = store.apply_optimistic("t1", TaskStatus::OnHold).unwrap();
        store.revert(&mutation);
        store.unsubscribe(id);
        store.load(vec![]);

        assert_eq!(
            *seen.borrow(),
            vec![
                Some(TaskStatus::Pending),
                Some(TaskStatus::OnHold),
                Some(TaskStatus::Pending),
            ]
        );
    }
}
