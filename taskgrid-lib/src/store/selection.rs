//! Row selection

use log::debug;

use super::TableStore;
use crate::error::StoreError;
use crate::model::RowId;

impl TableStore {
    /// Selected row ids, in the order they were selected.
    pub fn selection(&self) -> &[RowId] {
        &self.selection
    }

    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selection.contains(id)
    }

    /// Returns `true` if every row is selected (vacuously for an empty table).
    pub fn all_selected(&self) -> bool {
        self.selection.len() == self.rows.len()
    }

    /// Toggles a row's membership in the selection.
    pub fn select_row(&mut self, id: &RowId) -> Result<(), StoreError> {
        if self.row(id).is_none() {
            return self.miss(StoreError::RowNotFound(id.clone()));
        }
        match self.selection.iter().position(|selected| selected == id) {
            Some(index) => {
                self.selection.remove(index);
            }
            None => self.selection.push(id.clone()),
        }
        self.touch();
        Ok(())
    }

    /// Selects every row, or clears the selection if every row already is.
    pub fn select_all_rows(&mut self) {
        if self.all_selected() {
            self.selection.clear();
        } else {
            self.selection = self.rows.iter().map(|row| row.id.clone()).collect();
        }
        self.touch();
    }

    /// Replaces the selection. Unknown and repeated ids are dropped.
    pub fn select_rows(&mut self, ids: &[RowId]) -> Result<(), StoreError> {
        let mut selection: Vec<RowId> = Vec::with_capacity(ids.len());
        for id in ids {
            if self.row(id).is_none() {
                self.miss(StoreError::RowNotFound(id.clone()))?;
            } else if !selection.contains(id) {
                selection.push(id.clone());
            }
        }
        self.selection = selection;
        self.touch();
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.touch();
    }

    /// Removes every selected row and empties the selection.
    pub fn delete_selected_rows(&mut self) {
        debug!("Deleting {} selected rows", self.selection.len());
        let selection = std::mem::take(&mut self.selection);
        self.rows.retain(|row| !selection.contains(&row.id));
        self.touch();
    }
}
