//! Column and row reordering

use log::debug;

use super::TableStore;
use crate::error::StoreError;
use crate::model::Row;
use crate::model::RowId;

impl TableStore {
    /// Moves the column at `from` so it ends up at index `to`.
    pub fn reorder_columns(&mut self, from: usize, to: usize) -> Result<(), StoreError> {
        let len = self.columns.len();
        for index in [from, to] {
            if index >= len {
                return self.miss(StoreError::IndexOutOfRange { index, len });
            }
        }
        if from == to {
            return Ok(());
        }
        debug!("Moving column {} -> {}", from, to);
        let column = self.columns.remove(from);
        self.columns.insert(to, column);
        self.touch();
        Ok(())
    }

    /// Moves one row into the position currently held by `target`.
    pub fn reorder_rows(&mut self, dragged: &RowId, target: &RowId) -> Result<(), StoreError> {
        let Some(from) = self.row_index(dragged) else {
            return self.miss(StoreError::RowNotFound(dragged.clone()));
        };
        let Some(to) = self.row_index(target) else {
            return self.miss(StoreError::RowNotFound(target.clone()));
        };
        if from == to {
            return Ok(());
        }
        debug!("Moving row {} -> {}", dragged, target);
        let row = self.rows.remove(from);
        self.rows.insert(to, row);
        self.touch();
        Ok(())
    }

    /// Moves several rows as one contiguous block.
    ///
    /// The dragged rows are taken out, then inserted in `dragged` order at the
    /// index `target` has among the rows that remain. Dragging a block that
    /// already sits directly above `target` therefore changes nothing.
    pub fn reorder_selected_rows(
        &mut self,
        dragged: &[RowId],
        target: &RowId,
    ) -> Result<(), StoreError> {
        if self.row(target).is_none() {
            return self.miss(StoreError::RowNotFound(target.clone()));
        }
        if dragged.contains(target) {
            return self.miss(StoreError::TargetInDraggedRows(target.clone()));
        }

        let mut order: Vec<&RowId> = Vec::with_capacity(dragged.len());
        for id in dragged {
            if self.row(id).is_none() {
                self.miss(StoreError::RowNotFound(id.clone()))?;
            } else if !order.contains(&id) {
                order.push(id);
            }
        }
        if order.is_empty() {
            return Ok(());
        }

        let (mut moved, mut remaining): (Vec<Row>, Vec<Row>) = std::mem::take(&mut self.rows)
            .into_iter()
            .partition(|row| order.contains(&&row.id));
        moved.sort_by_key(|row| order.iter().position(|id| **id == row.id));

        let at = remaining
            .iter()
            .position(|row| &row.id == target)
            .unwrap_or(remaining.len());
        debug!("Moving {} rows before {} (index {})", moved.len(), target, at);
        remaining.splice(at..at, moved);
        self.rows = remaining;
        self.touch();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::config::StoreConfig;
    use crate::error::StoreError;
    use crate::model::ColumnDraft;
    use crate::model::ColumnId;
    use crate::model::ColumnType;
    use crate::model::RowId;
    use crate::store::TableSnapshot;
    use crate::store::TableStore;

    /// Store with rows `a`, `b`, `c`, ... in that order.
    fn lettered(names: &[&str]) -> TableStore {
        let mut store = TableStore::new();
        store.restore(TableSnapshot {
            columns: Vec::new(),
            rows: names
                .iter()
                .map(|n| crate::model::Row::new(RowId::from(*n)))
                .collect(),
        });
        store
    }

    fn order(store: &TableStore) -> Vec<&str> {
        store.rows().iter().map(|r| r.id.as_str()).collect()
    }

    fn ids(names: &[&str]) -> Vec<RowId> {
        names.iter().map(|n| RowId::from(*n)).collect()
    }

    #[test]
    fn test_block_already_above_target_is_unchanged() {
        let mut store = lettered(&["a", "b", "c", "d"]);
        store
            .reorder_selected_rows(&ids(&["a", "b"]), &RowId::from("c"))
            .unwrap();
        assert_eq!(order(&store), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_block_moves_before_target_in_dragged_order() {
        let mut store = lettered(&["a", "b", "c", "d"]);
        store
            .reorder_selected_rows(&ids(&["d", "a"]), &RowId::from("c"))
            .unwrap();
        assert_eq!(order(&store), vec!["b", "d", "a", "c"]);

        let mut store = lettered(&["a", "b", "c", "d"]);
        store
            .reorder_selected_rows(&ids(&["a", "c"]), &RowId::from("d"))
            .unwrap();
        assert_eq!(order(&store), vec!["b", "a", "c", "d"]);

        let mut store = lettered(&["a", "b", "c", "d"]);
        store
            .reorder_selected_rows(&ids(&["c", "d"]), &RowId::from("a"))
            .unwrap();
        assert_eq!(order(&store), vec!["c", "d", "a", "b"]);
    }

    #[test]
    fn test_block_ignores_unknown_and_repeated_ids() {
        let mut store = lettered(&["a", "b", "c"]);
        store
            .reorder_selected_rows(&ids(&["c", "x", "c"]), &RowId::from("a"))
            .unwrap();
        assert_eq!(order(&store), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_block_onto_itself_is_rejected() {
        let mut store = lettered(&["a", "b", "c"]);
        store
            .reorder_selected_rows(&ids(&["a", "b"]), &RowId::from("b"))
            .unwrap();
        assert_eq!(order(&store), vec!["a", "b", "c"]);

        let mut strict = TableStore::with_config(StoreConfig::strict());
        strict.restore(lettered(&["a", "b"]).snapshot());
        assert_eq!(
            strict.reorder_selected_rows(&ids(&["a", "b"]), &RowId::from("b")),
            Err(StoreError::TargetInDraggedRows(RowId::from("b")))
        );
    }

    #[test]
    fn test_single_row_moves_to_target_position() {
        let mut store = lettered(&["a", "b", "c", "d"]);
        store
            .reorder_rows(&RowId::from("a"), &RowId::from("c"))
            .unwrap();
        assert_eq!(order(&store), vec!["b", "c", "a", "d"]);

        store
            .reorder_rows(&RowId::from("d"), &RowId::from("b"))
            .unwrap();
        assert_eq!(order(&store), vec!["d", "b", "c", "a"]);

        store
            .reorder_rows(&RowId::from("x"), &RowId::from("b"))
            .unwrap();
        assert_eq!(order(&store), vec!["d", "b", "c", "a"]);
    }

    #[test]
    fn test_reorder_columns_permutes_only() {
        let mut store = TableStore::new();
        for name in ["a", "b", "c", "d"] {
            store.add_column(ColumnDraft::new(name, ColumnType::Text));
        }
        let before: HashSet<ColumnId> = store.columns().iter().map(|c| c.id.clone()).collect();
        let names = |s: &TableStore| -> Vec<String> {
            s.columns().iter().map(|c| c.name.clone()).collect()
        };
        assert_eq!(names(&store), vec!["d", "c", "b", "a"]);

        store.reorder_columns(0, 2).unwrap();
        assert_eq!(names(&store), vec!["c", "b", "d", "a"]);

        let revision = store.revision();
        store.reorder_columns(1, 1).unwrap();
        assert_eq!(store.revision(), revision);
        assert_eq!(names(&store), vec!["c", "b", "d", "a"]);

        store.reorder_columns(3, 0).unwrap();
        assert_eq!(names(&store), vec!["a", "c", "b", "d"]);

        let after: HashSet<ColumnId> = store.columns().iter().map(|c| c.id.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_reorder_columns_out_of_range() {
        let mut store = TableStore::with_config(StoreConfig::strict());
        store.add_column(ColumnDraft::new("a", ColumnType::Text));
        assert_eq!(
            store.reorder_columns(0, 1),
            Err(StoreError::IndexOutOfRange { index: 1, len: 1 })
        );
    }
}
