//! Board Engine
//!
//! One board wired together: store, drag coordinator and reconciliation.
//! This is the surface the presentation layer binds its drag events to.

use std::cell::RefCell;
use std::rc::Rc;

use crate::drag::{DragCoordinator, Transition};
use crate::item::BoardItem;
use crate::notify::Notifier;
use crate::reconcile::{BoardScope, DropOutcome, ReconciliationController, StatusRemote};
use crate::store::{BoardSnapshot, BoardStore, ListenerId};

pub struct BoardEngine<T: BoardItem> {
    store: Rc<RefCell<BoardStore<T>>>,
    drag: RefCell<DragCoordinator<T::Status>>,
    controller: ReconciliationController<T>,
}

impl<T: BoardItem> BoardEngine<T> {
    pub fn new(
        scope: BoardScope,
        remote: Rc<dyn StatusRemote<T::Status>>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        let store = Rc::new(RefCell::new(BoardStore::new()));
        let controller = ReconciliationController::new(store.clone(), scope, remote, notifier);
        Self {
            store,
            drag: RefCell::new(DragCoordinator::new()),
            controller,
        }
    }

    /// Invalidate the authoritative source after a confirmed update
    pub fn with_refresh(mut self, refresh: impl Fn() + 'static) -> Self {
        self.controller = self.controller.with_refresh(refresh);
        self
    }

    /// Replace the board contents with freshly fetched items
    pub fn load(&self, items: Vec<T>) {
        self.store.borrow_mut().load(items);
    }

    pub fn group_by_status(&self) -> BoardSnapshot<T> {
        self.store.borrow().group_by_status()
    }

    pub fn subscribe(&self, listener: impl Fn(&BoardSnapshot<T>) + 'static) -> ListenerId {
        self.store.borrow_mut().subscribe(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.store.borrow_mut().unsubscribe(id);
    }

    pub fn on_drag_start(&self, item: &T) -> bool {
        self.drag.borrow_mut().begin_drag(item.id(), item.status())
    }

    /// Handle a drop of the active drag on column `target`.
    ///
    /// Equivalent to [`take_transition`](Self::take_transition) followed by
    /// [`settle`](Self::settle).
    pub async fn on_drop(&self, payload: Option<&str>, target: T::Status) -> DropOutcome {
        match self.take_transition(payload, target) {
            Some(transition) => self.settle(transition).await,
            None => DropOutcome::NoChange,
        }
    }

    /// Synchronous half of a drop: decide the transition and end the drag
    /// session. Event handlers call this inside the drop event so a
    /// following `dragend` cannot clear the session first.
    pub fn take_transition(&self, payload: Option<&str>, target: T::Status) -> Option<Transition<T::Status>> {
        let mut drag = self.drag.borrow_mut();
        let transition = drag.compute_transition(payload, target);
        drag.end_drag();
        transition
    }

    /// Asynchronous half of a drop: optimistic apply, remote call, then
    /// confirm or roll back
    pub async fn settle(&self, transition: Transition<T::Status>) -> DropOutcome {
        self.controller.on_drop(transition).await
    }

    pub fn on_drag_end(&self) {
        self.drag.borrow_mut().end_drag();
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.borrow().is_dragging()
    }

    /// Id of the item currently being dragged
    pub fn dragged_id(&self) -> Option<String> {
        self.drag.borrow().session().map(|s| s.item_id.clone())
    }

    pub fn pending_count(&self) -> usize {
        self.controller.pending_count()
    }

    pub fn scope(&self) -> &BoardScope {
        self.controller.scope()
    }

    pub fn status_of(&self, item_id: &str) -> Option<T::Status> {
        self.store.borrow().status_of(item_id)
    }
}
