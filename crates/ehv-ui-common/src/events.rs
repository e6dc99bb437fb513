//! Event types for reactive UI updates.

use crate::view::FilterValue;

/// Events emitted by a [`RecordView`](crate::view::RecordView) when its state changes.
///
/// Record ids are carried in their display form so one event type serves
/// every record shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// A filter dimension took a new value. The page has been reset to 1.
    FilterChanged {
        view: String,
        filter: String,
        value: FilterValue,
        matched: usize,
    },

    /// Every filter dimension was reset to its sentinel.
    FiltersCleared { view: String },

    /// The current page moved.
    PageChanged {
        view: String,
        page: usize,
        total_pages: usize,
    },

    /// The selection was toggled by the user.
    SelectionChanged { view: String, id: Option<String> },

    /// A filter change hid the selected record and the selection was dropped.
    SelectionCleared { view: String, id: String },
}

impl ViewEvent {
    /// Name of the view that emitted the event.
    pub fn view(&self) -> &str {
        match self {
            ViewEvent::FilterChanged { view, .. }
            | ViewEvent::FiltersCleared { view }
            | ViewEvent::PageChanged { view, .. }
            | ViewEvent::SelectionChanged { view, .. }
            | ViewEvent::SelectionCleared { view, .. } => view,
        }
    }
}
