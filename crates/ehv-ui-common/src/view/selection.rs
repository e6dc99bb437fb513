//! Single-record focus for detail panels.

use serde::{Deserialize, Serialize};

/// What happens to a selection when a filter change hides its record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionPolicy {
    /// Drop the selection once its record leaves the filtered set.
    #[default]
    ClearWhenHidden,
    /// Keep showing the detail panel regardless of filters.
    Persist,
}

/// At most one selected record id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<Id> {
    current: Option<Id>,
}

impl<Id> Default for Selection<Id> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<Id: Clone + PartialEq> Selection<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id`, or clear if it is already selected.
    pub fn toggle(&mut self, id: Id) -> Option<&Id> {
        if self.current.as_ref() == Some(&id) {
            self.current = None;
        } else {
            self.current = Some(id);
        }
        self.current.as_ref()
    }

    pub fn clear(&mut self) -> Option<Id> {
        self.current.take()
    }

    pub fn get(&self) -> Option<&Id> {
        self.current.as_ref()
    }

    pub fn is_selected(&self, id: &Id) -> bool {
        self.current.as_ref() == Some(id)
    }
}
