//! Store operation errors

use crate::model::ColumnId;
use crate::model::RowId;

/// A store operation referenced something that does not exist.
///
/// Lenient stores swallow these and leave the state untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No row with the given id.
    #[error("Row '{0}' not found")]
    RowNotFound(RowId),

    /// No column with the given id.
    #[error("Column '{0}' not found")]
    ColumnNotFound(ColumnId),

    /// Column index outside the current column list.
    #[error("Column index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Multi-row drop onto one of the dragged rows.
    #[error("Drop target '{0}' is part of the dragged rows")]
    TargetInDraggedRows(RowId),
}
