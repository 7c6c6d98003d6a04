//! Status Board Component
//!
//! Generic kanban: one column per status, cards dragged between columns
//! with native HTML5 drag and drop. All state changes go through the
//! board's engine; the columns render the snapshot it publishes.

use std::rc::Rc;

use board_engine::{BoardEngine, BoardItem, BoardSnapshot, Status};
use leptos::prelude::*;
use leptos::task::spawn_local;

use leptos_dragdrop::*;

/// Items that can be rendered as board cards
pub trait BoardCard: BoardItem + Send + Sync {
    /// Changes whenever anything shown on the card changes
    fn render_key(&self) -> String;

    fn render(self) -> AnyView;
}

/// Copyable handle to a mounted board
pub struct BoardHandle<T: BoardItem> {
    engine: StoredValue<Rc<BoardEngine<T>>, LocalStorage>,
    pub dnd: DndSignals,
}

impl<T: BoardItem> Clone for BoardHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: BoardItem> Copy for BoardHandle<T> {}

impl<T: BoardItem> BoardHandle<T> {
    /// Keep `engine` alive for as long as the calling component
    pub fn new(engine: BoardEngine<T>) -> Self {
        Self {
            engine: StoredValue::new_local(Rc::new(engine)),
            dnd: create_dnd_signals(),
        }
    }

    /// `None` once the owning component is gone
    pub fn engine(&self) -> Option<Rc<BoardEngine<T>>> {
        self.engine.try_get_value()
    }

    pub fn load(&self, items: Vec<T>) {
        if let Some(engine) = self.engine() {
            engine.load(items);
        }
    }
}

#[component]
pub fn StatusBoard<T>(board: BoardHandle<T>, #[prop(into)] snapshot: Signal<BoardSnapshot<T>>) -> impl IntoView
where
    T: BoardCard,
{
    let columns = <T::Status as Status>::ALL
        .iter()
        .map(|status| board_column(board, snapshot, *status))
        .collect_view();

    view! {
        <div class="board">{columns}</div>
    }
}

fn board_column<T: BoardCard>(
    board: BoardHandle<T>,
    snapshot: Signal<BoardSnapshot<T>>,
    status: T::Status,
) -> impl IntoView {
    let dnd = board.dnd;
    let column = status.as_str();

    let on_drop = make_on_drop(dnd, column, move |payload, column| {
        let Some(target) = <T::Status as Status>::parse(column) else {
            return;
        };
        let Some(engine) = board.engine() else {
            return;
        };
        // Ends the drag session before `dragend` fires
        let Some(transition) = engine.take_transition(payload.as_deref(), target) else {
            return;
        };
        spawn_local(async move {
            let outcome = engine.settle(transition).await;
            tracing::debug!(?outcome, column, "Drop settled");
        });
    });

    let column_class = move || {
        if dnd.is_hovered(column) {
            "board-column drop-target"
        } else {
            "board-column"
        }
    };
    let count = move || snapshot.with(|s| s.count(status));

    view! {
        <section
            class=column_class
            data-status=column
            on:dragover=make_on_dragover()
            on:dragenter=make_on_dragenter(dnd, column)
            on:dragleave=make_on_dragleave(dnd, column)
            on:drop=on_drop
        >
            <header class="board-column-header">
                <h3>{status.label()}</h3>
                <span class="board-column-count">{count}</span>
            </header>
            <div class="board-column-body">
                <For
                    each=move || snapshot.with(|s| s.column(status).to_vec())
                    key=|item: &T| item.render_key()
                    children=move |item: T| board_card(board, item)
                />
                <Show when=move || snapshot.with(|s| s.count(status) == 0)>
                    <p class="board-column-empty">"Drop items here"</p>
                </Show>
            </div>
        </section>
    }
}

fn board_card<T: BoardCard>(board: BoardHandle<T>, item: T) -> impl IntoView {
    let dnd = board.dnd;
    let id = item.id().to_string();

    let dragged = item.clone();
    let on_dragstart = make_on_dragstart(dnd, id.clone(), move || {
        if let Some(engine) = board.engine() {
            engine.on_drag_start(&dragged);
        }
    });
    let on_dragend = make_on_dragend(dnd, move || {
        if let Some(engine) = board.engine() {
            engine.on_drag_end();
        }
    });

    let card_class = move || {
        if dnd.is_dragging(&id) {
            "board-card dragging"
        } else {
            "board-card"
        }
    };

    view! {
        <div
            class=card_class
            draggable="true"
            on:dragstart=on_dragstart
            on:dragend=on_dragend
        >
            {item.render()}
        </div>
    }
}
