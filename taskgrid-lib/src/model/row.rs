//! Table rows

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use super::CellValue;
use super::Column;
use super::ColumnId;
use super::NativeId;
use super::RowId;

/// One record of the table.
///
/// `data` holds at most one value per column. A column with no entry reads
/// as the empty value for its type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub id: RowId,
    #[serde(default)]
    pub data: HashMap<ColumnId, CellValue>,
    /// Row id on the sheet service, for remote rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_id: Option<NativeId>,
    /// Row position on the sheet service, for remote rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<i64>,
}

impl Row {
    /// Creates an empty local row.
    pub fn new(id: RowId) -> Self {
        Self {
            id,
            data: HashMap::new(),
            api_id: None,
            row_index: None,
        }
    }

    /// Returns the stored value for a column, if any.
    pub fn get(&self, column: &ColumnId) -> Option<&CellValue> {
        self.data.get(column)
    }

    /// Returns the value shown for `column`, substituting the type's empty value.
    pub fn value_for(&self, column: &Column) -> CellValue {
        self.data
            .get(&column.id)
            .cloned()
            .unwrap_or_else(|| CellValue::empty_for(column.kind))
    }

    /// Sets a cell value (builder pattern).
    pub fn set(mut self, column: impl Into<ColumnId>, value: impl Into<CellValue>) -> Self {
        self.data.insert(column.into(), value.into());
        self
    }
}
