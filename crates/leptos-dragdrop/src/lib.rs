//! Leptos DragDrop Utilities
//!
//! HTML5 drag-and-drop for column boards in Leptos.
//! The dragged id travels through the native `DataTransfer` payload;
//! columns are identified by a static key.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// MIME type used for the dragged id
pub const DRAG_MIME: &str = "text/plain";

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    /// Id of the card being dragged
    pub dragging_id: RwSignal<Option<String>>,
    /// Column currently hovered by the drag
    pub hover_column: RwSignal<Option<&'static str>>,
}

pub fn create_dnd_signals() -> DndSignals {
    DndSignals {
        dragging_id: RwSignal::new(None),
        hover_column: RwSignal::new(None),
    }
}

impl DndSignals {
    pub fn is_dragging(&self, id: &str) -> bool {
        self.dragging_id.with(|d| d.as_deref() == Some(id))
    }

    pub fn is_hovered(&self, column: &'static str) -> bool {
        self.hover_column.get() == Some(column)
    }
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_id.set(None);
    dnd.hover_column.set(None);
}

/// Trim a raw payload; blank means the transfer carried nothing usable
pub fn normalize_payload(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Read the dragged id from a drop event
pub fn read_payload(ev: &web_sys::DragEvent) -> Option<String> {
    let raw = ev
        .data_transfer()
        .and_then(|dt| dt.get_data(DRAG_MIME).ok());
    normalize_payload(raw)
}

/// Create dragstart handler for a draggable card.
/// Writes the id into the payload and calls `on_start`.
pub fn make_on_dragstart<F>(
    dnd: DndSignals,
    item_id: String,
    on_start: F,
) -> impl Fn(web_sys::DragEvent) + Clone + 'static
where
    F: Fn() + Clone + 'static,
{
    move |ev: web_sys::DragEvent| {
        if let Some(dt) = ev.data_transfer() {
            dt.set_effect_allowed("move");
            let _ = dt.set_data(DRAG_MIME, &item_id);
        }
        dnd.dragging_id.set(Some(item_id.clone()));
        on_start();
    }
}

/// Create dragover handler for a column; required for the column to accept drops
pub fn make_on_dragover() -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        if let Some(dt) = ev.data_transfer() {
            dt.set_drop_effect("move");
        }
    }
}

/// Create dragenter handler for a column
pub fn make_on_dragenter(dnd: DndSignals, column: &'static str) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        if dnd.dragging_id.get_untracked().is_some() {
            dnd.hover_column.set(Some(column));
        }
    }
}

/// Create dragleave handler for a column.
/// Ignores leave events fired when moving onto a child element.
pub fn make_on_dragleave(dnd: DndSignals, column: &'static str) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        let current = ev
            .current_target()
            .and_then(|t| t.dyn_into::<web_sys::Node>().ok());
        let related = ev
            .related_target()
            .and_then(|t| t.dyn_into::<web_sys::Node>().ok());
        if let (Some(current), Some(related)) = (current, related) {
            if current.contains(Some(&related)) {
                return;
            }
        }
        if dnd.hover_column.get_untracked() == Some(column) {
            dnd.hover_column.set(None);
        }
    }
}

/// Create drop handler for a column.
/// `on_drop` receives the payload id (None when corrupted) and the column key.
pub fn make_on_drop<F>(
    dnd: DndSignals,
    column: &'static str,
    on_drop: F,
) -> impl Fn(web_sys::DragEvent) + Clone + 'static
where
    F: Fn(Option<String>, &'static str) + Clone + 'static,
{
    move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        let payload = read_payload(&ev);
        end_drag(&dnd);
        on_drop(payload, column);
    }
}

/// Create dragend handler for a card; fires after drop or on cancel
pub fn make_on_dragend<F>(dnd: DndSignals, on_end: F) -> impl Fn(web_sys::DragEvent) + Clone + 'static
where
    F: Fn() + Clone + 'static,
{
    move |_ev: web_sys::DragEvent| {
        end_drag(&dnd);
        on_end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_payload() {
        assert_eq!(normalize_payload(Some(" t1 ".to_string())), Some("t1".to_string()));
        assert_eq!(normalize_payload(Some("   ".to_string())), None);
        assert_eq!(normalize_payload(None), None);
    }
}
