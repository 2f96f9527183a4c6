//! Table state store
//!
//! [`TableStore`] owns the canonical column list, row list, selection and
//! fetch status. Every mutation goes through one of its methods and leaves
//! these invariants intact:
//!
//! - column ids and row ids are unique;
//! - no row holds data for a column that is not in the table;
//! - the selection only names rows that exist;
//! - only select-typed columns carry options.
//!
//! Methods that reference an id (or index) that does not exist return
//! `Ok(())` without touching the state in lenient mode, and a [`StoreError`]
//! in strict mode. See [`StoreConfig`].

mod fetch;
mod reorder;
mod selection;

pub use fetch::*;

use log::debug;
use serde::Deserialize;
use serde::Serialize;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::id::IdGenerator;
use crate::model::CellValue;
use crate::model::Column;
use crate::model::ColumnDraft;
use crate::model::ColumnId;
use crate::model::Row;
use crate::model::RowId;

/// The persisted subset of the table state.
///
/// Selection and fetch status are session state and never part of a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

/// Owner of one table's state.
///
/// # Example
///
/// ```
/// use taskgrid_lib::model::{CellValue, ColumnDraft, ColumnType};
/// use taskgrid_lib::store::TableStore;
///
/// let mut store = TableStore::new();
/// let name = store.add_column(ColumnDraft::new("Name", ColumnType::Text));
/// let row = store.add_row();
/// store.update_cell(&row, &name, CellValue::from("Contoso")).unwrap();
///
/// assert_eq!(store.row(&row).unwrap().get(&name), Some(&CellValue::from("Contoso")));
/// ```
#[derive(Debug, Default)]
pub struct TableStore {
    config: StoreConfig,
    ids: IdGenerator,
    columns: Vec<Column>,
    rows: Vec<Row>,
    selection: Vec<RowId>,
    fetch_status: FetchStatus,
    last_payload: Option<serde_json::Value>,
    revision: u64,
}

impl TableStore {
    /// Creates an empty lenient store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with the given configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    // =========================================================================
    // Read access
    // =========================================================================

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Columns in display order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Rows in display order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    pub fn row(&self, id: &RowId) -> Option<&Row> {
        self.rows.iter().find(|r| &r.id == id)
    }

    /// Counter bumped by every mutation that changed the state.
    ///
    /// Hosts persist whenever it moves.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the persisted subset of the state.
    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            columns: self.columns.clone(),
            rows: self.rows.clone(),
        }
    }

    // =========================================================================
    // Whole-table operations
    // =========================================================================

    /// Replaces columns and rows with a persisted snapshot.
    ///
    /// The selection is cleared; fetch status is left alone so a restore
    /// during a pending fetch is still overwritten when the fetch resolves.
    pub fn restore(&mut self, snapshot: TableSnapshot) {
        debug!(
            "Restoring snapshot: {} columns, {} rows",
            snapshot.columns.len(),
            snapshot.rows.len()
        );
        self.columns = snapshot.columns;
        self.rows = snapshot.rows;
        self.selection.clear();
        self.touch();
    }

    /// Removes every column, row and selection.
    pub fn clear_table(&mut self) {
        self.columns.clear();
        self.rows.clear();
        self.selection.clear();
        self.touch();
    }

    /// Removes every row (and thus the selection), keeping columns.
    pub fn clear_rows(&mut self) {
        self.rows.clear();
        self.selection.clear();
        self.touch();
    }

    /// Returns the whole state to its initial, empty value.
    pub fn reset(&mut self) {
        self.columns.clear();
        self.rows.clear();
        self.selection.clear();
        self.fetch_status = FetchStatus::Idle;
        self.last_payload = None;
        self.touch();
    }

    // =========================================================================
    // Columns
    // =========================================================================

    /// Inserts a new column at the front and returns its id.
    pub fn add_column(&mut self, draft: ColumnDraft) -> ColumnId {
        let id = loop {
            let id = self.ids.column_id();
            if self.column(&id).is_none() {
                break id;
            }
        };
        debug!("Adding column {} ({:?}, {})", id, draft.name, draft.kind);
        self.columns.insert(0, Column::from_draft(id.clone(), draft));
        self.touch();
        id
    }

    /// Replaces a column's name, type and options in place.
    ///
    /// Options are dropped when the new type has none. Existing cell values
    /// are kept even if they no longer fit the type.
    pub fn update_column(&mut self, id: &ColumnId, draft: ColumnDraft) -> Result<(), StoreError> {
        let Some(column) = self.columns.iter_mut().find(|c| &c.id == id) else {
            return self.miss(StoreError::ColumnNotFound(id.clone()));
        };
        debug!("Updating column {}", id);
        column.apply(draft);
        self.touch();
        Ok(())
    }

    /// Removes a column and its cell in every row.
    pub fn delete_column(&mut self, id: &ColumnId) -> Result<(), StoreError> {
        let Some(index) = self.column_index(id) else {
            return self.miss(StoreError::ColumnNotFound(id.clone()));
        };
        debug!("Deleting column {}", id);
        self.columns.remove(index);
        for row in &mut self.rows {
            row.data.remove(id);
        }
        self.touch();
        Ok(())
    }

    // =========================================================================
    // Rows and cells
    // =========================================================================

    /// Appends an empty row and returns its id.
    pub fn add_row(&mut self) -> RowId {
        let id = loop {
            let id = self.ids.row_id();
            if self.row(&id).is_none() {
                break id;
            }
        };
        debug!("Adding row {}", id);
        self.rows.push(Row::new(id.clone()));
        self.touch();
        id
    }

    /// Removes a row, dropping it from the selection too.
    pub fn delete_row(&mut self, id: &RowId) -> Result<(), StoreError> {
        let Some(index) = self.row_index(id) else {
            return self.miss(StoreError::RowNotFound(id.clone()));
        };
        debug!("Deleting row {}", id);
        self.rows.remove(index);
        self.selection.retain(|selected| selected != id);
        self.touch();
        Ok(())
    }

    /// Sets one cell.
    ///
    /// An unknown row is a miss as usual. An unknown column is a miss too,
    /// even though the row exists: writing it would leave a data key that no
    /// column owns, and the table never holds such keys.
    pub fn update_cell(
        &mut self,
        row: &RowId,
        column: &ColumnId,
        value: CellValue,
    ) -> Result<(), StoreError> {
        if self.column(column).is_none() {
            return self.miss(StoreError::ColumnNotFound(column.clone()));
        }
        let Some(target) = self.rows.iter_mut().find(|r| &r.id == row) else {
            return self.miss(StoreError::RowNotFound(row.clone()));
        };
        target.data.insert(column.clone(), value);
        self.touch();
        Ok(())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn column_index(&self, id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| &c.id == id)
    }

    fn row_index(&self, id: &RowId) -> Option<usize> {
        self.rows.iter().position(|r| &r.id == id)
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    /// Reports a referential miss according to the configured strictness.
    fn miss(&self, err: StoreError) -> Result<(), StoreError> {
        if self.config.strictness.is_strict() {
            Err(err)
        } else {
            debug!("Ignoring no-op: {}", err);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::model::ColumnType;
    use crate::model::types::ColumnOption;

    fn text(name: &str) -> ColumnDraft {
        ColumnDraft::new(name, ColumnType::Text)
    }

    #[test]
    fn test_add_column_prepends() {
        let mut store = TableStore::new();
        let a = store.add_column(text("A"));
        let b = store.add_column(text("B"));
        let order: Vec<&ColumnId> = store.columns().iter().map(|c| &c.id).collect();
        assert_eq!(order, vec![&b, &a]);
    }

    #[test]
    fn test_column_ids_track_adds_and_deletes() {
        let mut store = TableStore::new();
        let mut expected = HashSet::new();
        for i in 0..20 {
            let id = store.add_column(text(&format!("c{}", i)));
            expected.insert(id);
        }
        let doomed: Vec<ColumnId> = expected.iter().take(7).cloned().collect();
        for id in &doomed {
            store.delete_column(id).unwrap();
            expected.remove(id);
        }
        // deleting twice is a no-op
        store.delete_column(&doomed[0]).unwrap();

        let actual: Vec<ColumnId> = store.columns().iter().map(|c| c.id.clone()).collect();
        let unique: HashSet<ColumnId> = actual.iter().cloned().collect();
        assert_eq!(actual.len(), unique.len());
        assert_eq!(unique, expected);
    }

    #[test]
    fn test_delete_column_strips_row_data() {
        let mut store = TableStore::new();
        let keep = store.add_column(text("Keep"));
        let drop = store.add_column(text("Drop"));
        let rows: Vec<RowId> = (0..3).map(|_| store.add_row()).collect();
        for row in &rows {
            store.update_cell(row, &keep, CellValue::from("k")).unwrap();
            store.update_cell(row, &drop, CellValue::from("d")).unwrap();
        }

        store.delete_column(&drop).unwrap();

        for row in store.rows() {
            assert!(!row.data.contains_key(&drop));
            assert_eq!(row.get(&keep), Some(&CellValue::from("k")));
        }
        assert_eq!(store.columns().len(), 1);
    }

    #[test]
    fn test_update_column_keeps_position_and_clears_options() {
        let mut store = TableStore::new();
        let a = store.add_column(text("A"));
        let status = store.add_column(
            ColumnDraft::new("Status", ColumnType::SingleSelect).option("Open"),
        );
        store
            .update_column(&a, ColumnDraft::new("Renamed", ColumnType::Number))
            .unwrap();
        assert_eq!(store.columns()[1].name, "Renamed");
        assert_eq!(store.columns()[1].kind, ColumnType::Number);

        store
            .update_column(&status, ColumnDraft::new("Status", ColumnType::SingleSelect))
            .unwrap();
        assert!(store.column(&status).unwrap().options.is_empty());

        store
            .update_column(
                &status,
                ColumnDraft::new("Status", ColumnType::MultiSelect).option("x"),
            )
            .unwrap();
        assert_eq!(
            store.column(&status).unwrap().options,
            vec![ColumnOption::from("x")]
        );
    }

    #[test]
    fn test_add_row_appends_empty() {
        let mut store = TableStore::new();
        let first = store.add_row();
        let second = store.add_row();
        assert_eq!(store.rows()[0].id, first);
        assert_eq!(store.rows()[1].id, second);
        assert!(store.rows()[1].data.is_empty());
    }

    #[test]
    fn test_update_cell_misses_are_noops_when_lenient() {
        let mut store = TableStore::new();
        let column = store.add_column(text("A"));
        let row = store.add_row();
        let before = store.revision();

        store
            .update_cell(&RowId::from("ghost"), &column, CellValue::from("x"))
            .unwrap();
        store
            .update_cell(&row, &ColumnId::from("ghost"), CellValue::from("x"))
            .unwrap();

        assert_eq!(store.revision(), before);
        assert!(store.row(&row).unwrap().data.is_empty());
    }

    #[test]
    fn test_strict_mode_reports_misses() {
        let mut store = TableStore::with_config(StoreConfig::strict());
        let row = store.add_row();

        assert_eq!(
            store.delete_column(&ColumnId::from("nope")),
            Err(StoreError::ColumnNotFound(ColumnId::from("nope")))
        );
        assert_eq!(
            store.delete_row(&RowId::from("nope")),
            Err(StoreError::RowNotFound(RowId::from("nope")))
        );
        assert_eq!(
            store.update_cell(&row, &ColumnId::from("nope"), CellValue::Empty),
            Err(StoreError::ColumnNotFound(ColumnId::from("nope")))
        );
        assert_eq!(
            store.update_column(&ColumnId::from("nope"), text("x")),
            Err(StoreError::ColumnNotFound(ColumnId::from("nope")))
        );
    }

    #[test]
    fn test_snapshot_restore() {
        let mut store = TableStore::new();
        let column = store.add_column(text("A"));
        let row = store.add_row();
        store.update_cell(&row, &column, CellValue::from("v")).unwrap();
        store.select_row(&row).unwrap();
        let snapshot = store.snapshot();

        let mut other = TableStore::new();
        other.restore(snapshot.clone());
        assert_eq!(other.snapshot(), snapshot);
        assert!(other.selection().is_empty());
    }

    #[test]
    fn test_clear_variants() {
        let mut store = TableStore::new();
        store.add_column(text("A"));
        let row = store.add_row();
        store.select_row(&row).unwrap();

        store.clear_rows();
        assert!(store.rows().is_empty());
        assert!(store.selection().is_empty());
        assert_eq!(store.columns().len(), 1);

        store.clear_table();
        assert!(store.columns().is_empty());
    }
}
