//! Drag sessions over table rows
//!
//! [`DragCoordinator`] turns a drag gesture (start on a row, drop on another)
//! into one of the store's reorder calls. It holds nothing but the ids being
//! dragged and is never persisted.

use log::debug;

use crate::error::StoreError;
use crate::model::RowId;
use crate::store::TableStore;

/// Where a drag session currently is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Rows picked up at drag start, in selection order.
    Dragging { dragged: Vec<RowId> },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Ids being dragged; empty when idle.
    pub fn dragged(&self) -> &[RowId] {
        match self {
            Self::Idle => &[],
            Self::Dragging { dragged } => dragged,
        }
    }
}

#[derive(Debug, Default)]
pub struct DragCoordinator {
    state: DragState,
}

impl DragCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Starts dragging `row`.
    ///
    /// A selected row drags the whole selection along, in the order the rows
    /// were selected. An unselected row is dragged alone and becomes selected.
    pub fn start(&mut self, store: &mut TableStore, row: &RowId) -> Result<(), StoreError> {
        self.state = DragState::Idle;

        if store.row(row).is_none() {
            return if store.config().strictness.is_strict() {
                Err(StoreError::RowNotFound(row.clone()))
            } else {
                debug!("Ignoring drag start on missing row {}", row);
                Ok(())
            };
        }

        let dragged = if store.is_selected(row) {
            store.selection().to_vec()
        } else {
            store.select_row(row)?;
            vec![row.clone()]
        };

        debug!("Dragging {} row(s) from {}", dragged.len(), row);
        self.state = DragState::Dragging { dragged };
        Ok(())
    }

    /// Drops the dragged rows onto `target` and ends the session.
    ///
    /// Dropping while idle does nothing. The session ends even when the store
    /// rejects the reorder.
    pub fn drop_on(&mut self, store: &mut TableStore, target: &RowId) -> Result<(), StoreError> {
        let DragState::Dragging { dragged } = std::mem::take(&mut self.state) else {
            return Ok(());
        };

        match dragged.as_slice() {
            [] => Ok(()),
            [single] if single == target => Ok(()),
            [single] => store.reorder_rows(single, target),
            several => store.reorder_selected_rows(several, target),
        }
    }

    /// Cancels the session without touching the store.
    pub fn abort(&mut self) {
        if self.state.is_dragging() {
            debug!("Drag aborted");
        }
        self.state = DragState::Idle;
    }
}
