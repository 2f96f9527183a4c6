//! Remote sheet normalization
//!
//! Turns the service's nested `groups → rows → columns → cell_data` document
//! into the flat [`Column`] / [`Row`] model:
//!
//! - The header row of the first group becomes the column list, ordered by
//!   `column_index`, with ids `col_<native id>`.
//! - Each data row becomes a row with id `row_<native id>` (suffixed `_2`,
//!   `_3`, ... when that id is already taken); each cell is
//!   converted by its owning column's native type (see [`cell::convert`]).
//! - Select columns get an option list derived from every value observed in
//!   that column, keyed by text (last occurrence wins).
//!
//! Structural problems degrade to an empty sheet in lenient mode and are
//! reported as [`NormalizeError`] in strict mode.

pub mod cell;
mod payload;

pub use payload::*;

use std::collections::HashMap;
use std::collections::HashSet;

use log::debug;
use log::warn;
use serde::Deserialize;
use serde_json::Value as Json;

use crate::config::Strictness;
use crate::error::NormalizeError;
use crate::model::Column;
use crate::model::ColumnId;
use crate::model::ColumnType;
use crate::model::NativeId;
use crate::model::Row;
use crate::model::RowId;
use crate::model::types::ColumnOption;
use crate::model::types::OptionTag;

/// The flat table produced from one remote payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedSheet {
    /// Name of the group the table came from.
    pub name: Option<String>,
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl NormalizedSheet {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }
}

/// Normalizes a raw payload.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use taskgrid_lib::config::Strictness;
/// use taskgrid_lib::normalize::normalize;
///
/// let sheet = normalize(&json!({ "data": [] }), Strictness::Lenient).unwrap();
/// assert!(sheet.is_empty());
///
/// assert!(normalize(&json!({ "data": [] }), Strictness::Strict).is_err());
/// ```
pub fn normalize(payload: &Json, strictness: Strictness) -> Result<NormalizedSheet, NormalizeError> {
    match normalize_strict(payload) {
        Ok(sheet) => Ok(sheet),
        Err(err) if strictness.is_strict() => Err(err),
        Err(err) => {
            warn!("Degrading malformed sheet payload to an empty table: {}", err);
            Ok(NormalizedSheet::default())
        }
    }
}

fn normalize_strict(payload: &Json) -> Result<NormalizedSheet, NormalizeError> {
    let sheet = SheetPayload::deserialize(payload)
        .map_err(|e| NormalizeError::Malformed(e.to_string()))?;
    let group = sheet
        .data
        .and_then(|groups| groups.into_iter().next())
        .ok_or(NormalizeError::MissingGroup)?;
    let header = group
        .rows
        .iter()
        .find(|row| row.kind == SheetRowKind::Header)
        .ok_or(NormalizeError::MissingHeader)?;

    let header_cells = sorted_header(header);
    let mut columns = header_columns(&header_cells);

    let data_rows: Vec<&SheetRow> = group
        .rows
        .iter()
        .filter(|row| row.kind == SheetRowKind::Data)
        .collect();
    let mut seen_rows = HashSet::new();
    let rows: Vec<Row> = data_rows
        .iter()
        .enumerate()
        .map(|(position, row)| {
            let mut row = data_row(row, position, &header_cells);
            row.id = unique_row_id(row.id, &mut seen_rows);
            row
        })
        .collect();

    for column in columns.iter_mut().filter(|c| c.kind.has_options()) {
        column.options = derive_options(column, &data_rows);
    }

    debug!(
        "Normalized sheet {:?}: {} columns, {} rows",
        group.name,
        columns.len(),
        rows.len()
    );

    Ok(NormalizedSheet {
        name: group.name,
        columns,
        rows,
    })
}

fn sorted_header(header: &SheetRow) -> Vec<&SheetCell> {
    let mut cells: Vec<&SheetCell> = header.columns.iter().collect();
    cells.sort_by_key(|cell| cell.column_index.unwrap_or(i64::MAX));
    cells
}

fn column_id(cell: &SheetCell) -> ColumnId {
    match (&cell.id, cell.column_index) {
        (Some(id), _) => remote_column_id(id),
        (None, Some(index)) => ColumnId::new(format!("col_{}", index)),
        (None, None) => ColumnId::new("col_"),
    }
}

fn header_columns(cells: &[&SheetCell]) -> Vec<Column> {
    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(cells.len());
    for cell in cells {
        let id = column_id(cell);
        if !seen.insert(id.clone()) {
            warn!("Skipping duplicate header column {}", id);
            continue;
        }
        columns.push(Column {
            id,
            name: cell.name.clone().unwrap_or_default(),
            kind: cell.native_type().column_type(),
            options: Vec::new(),
            api_id: cell.id.clone(),
            column_index: cell.column_index,
        });
    }
    columns
}

fn data_row(row: &SheetRow, position: usize, header: &[&SheetCell]) -> Row {
    let id = match (&row.id, row.row_index) {
        (Some(id), _) => RowId::new(format!("row_{}", id)),
        (None, Some(index)) => RowId::new(format!("row_{}", index)),
        (None, None) => RowId::new(format!("row_{}", position)),
    };

    let mut data = HashMap::with_capacity(row.columns.len());
    for cell in &row.columns {
        let Some(index) = cell.column_index else {
            continue;
        };
        let owner = header.iter().find(|h| h.column_index == Some(index));
        let (column, native) = match owner {
            Some(owner) => (column_id(owner), owner.native_type()),
            None => (ColumnId::new(format!("col_{}", index)), cell.native_type()),
        };
        data.insert(column, cell::convert(native, &cell.cell_data));
    }

    Row {
        id,
        data,
        api_id: row.id.clone(),
        row_index: row.row_index,
    }
}

/// Returns `id`, or `<id>_<n>` with the smallest `n >= 2` not yet taken.
fn unique_row_id(id: RowId, seen: &mut HashSet<RowId>) -> RowId {
    if seen.insert(id.clone()) {
        return id;
    }
    let mut n = 2;
    let unique = loop {
        let candidate = RowId::new(format!("{}_{}", id, n));
        if !seen.contains(&candidate) {
            break candidate;
        }
        n += 1;
    };
    warn!("Duplicate row id in sheet; importing as {}", unique);
    seen.insert(unique.clone());
    unique
}

/// Collects the distinct options observed in a select column.
///
/// Keyed by text: a later occurrence replaces the earlier entry's color and id
/// but keeps its position.
fn derive_options(column: &Column, data_rows: &[&SheetRow]) -> Vec<ColumnOption> {
    let Some(index) = column.column_index else {
        return Vec::new();
    };

    let mut options: Vec<OptionTag> = Vec::new();
    let mut upsert = |tag: OptionTag| match options.iter().position(|o| o.text == tag.text) {
        Some(i) => options[i] = tag,
        None => options.push(tag),
    };

    for row in data_rows {
        let Some(cell) = row.columns.iter().find(|c| c.column_index == Some(index)) else {
            continue;
        };
        match (column.kind, &cell.cell_data) {
            (ColumnType::SingleSelect, raw) => {
                if let Some(tag) = cell::status_tag(raw) {
                    upsert(tag);
                }
            }
            (ColumnType::MultiSelect, Json::Array(items)) => {
                items.iter().filter_map(cell::status_tag).for_each(&mut upsert);
            }
            _ => {}
        }
    }

    options.into_iter().map(ColumnOption::Tagged).collect()
}

/// Column id given to the remote column with native id `native`.
pub fn remote_column_id(native: &NativeId) -> ColumnId {
    ColumnId::new(format!("col_{}", native))
}
