//! Column definitions

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use super::ColumnId;
use super::NativeId;
use super::types::ColumnOption;

/// The type of a column. Chooses the cell editor; never validates values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnType {
    #[default]
    Text,
    Number,
    Date,
    File,
    SingleSelect,
    MultiSelect,
}

impl ColumnType {
    /// All column types in editor order.
    pub const ALL: [ColumnType; 6] = [
        ColumnType::Text,
        ColumnType::Number,
        ColumnType::Date,
        ColumnType::File,
        ColumnType::SingleSelect,
        ColumnType::MultiSelect,
    ];

    /// Returns `true` for the types that carry an option list.
    pub fn has_options(self) -> bool {
        matches!(self, ColumnType::SingleSelect | ColumnType::MultiSelect)
    }

    /// Returns the wire name (`"single-select"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Number => "number",
            ColumnType::Date => "date",
            ColumnType::File => "file",
            ColumnType::SingleSelect => "single-select",
            ColumnType::MultiSelect => "multi-select",
        }
    }

    /// Returns the human-readable label shown in the column editor.
    pub fn label(self) -> &'static str {
        match self {
            ColumnType::Text => "Text",
            ColumnType::Number => "Number",
            ColumnType::Date => "Date",
            ColumnType::File => "File",
            ColumnType::SingleSelect => "Single Select",
            ColumnType::MultiSelect => "Multi Select",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown column type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown column type '{0}'")]
pub struct UnknownColumnType(pub String);

impl FromStr for ColumnType {
    type Err = UnknownColumnType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownColumnType(s.to_string()))
    }
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ColumnType,
    /// Selectable values; always empty unless `kind` has options.
    #[serde(default)]
    pub options: Vec<ColumnOption>,
    /// Column id on the sheet service, for remote columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_id: Option<NativeId>,
    /// Column position on the sheet service, for remote columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_index: Option<i64>,
}

impl Column {
    /// Creates a local column from a draft.
    pub fn from_draft(id: ColumnId, draft: ColumnDraft) -> Self {
        let mut column = Self {
            id,
            name: String::new(),
            kind: ColumnType::Text,
            options: Vec::new(),
            api_id: None,
            column_index: None,
        };
        column.apply(draft);
        column
    }

    /// Overwrites the user-editable fields, dropping options the type cannot hold.
    pub fn apply(&mut self, draft: ColumnDraft) {
        self.name = draft.name;
        self.kind = draft.kind;
        self.options = if draft.kind.has_options() {
            draft.options
        } else {
            Vec::new()
        };
    }

    /// Returns `true` if this column was imported from the sheet service.
    pub fn is_remote(&self) -> bool {
        self.api_id.is_some()
    }
}

/// The user-editable part of a column, as submitted by the column editor.
///
/// # Example
///
/// ```
/// use taskgrid_lib::model::{ColumnDraft, ColumnType};
///
/// let draft = ColumnDraft::new("Status", ColumnType::SingleSelect)
///     .option("Open")
///     .option("Done");
/// assert_eq!(draft.options.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnDraft {
    pub name: String,
    pub kind: ColumnType,
    pub options: Vec<ColumnOption>,
}

impl ColumnDraft {
    pub fn new(name: impl Into<String>, kind: ColumnType) -> Self {
        Self {
            name: name.into(),
            kind,
            options: Vec::new(),
        }
    }

    /// Appends an option (builder pattern).
    pub fn option(mut self, option: impl Into<ColumnOption>) -> Self {
        self.options.push(option.into());
        self
    }

    /// Replaces all options (builder pattern).
    pub fn options(mut self, options: Vec<ColumnOption>) -> Self {
        self.options = options;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_type_round_trips_through_str() {
        for kind in ColumnType::ALL {
            assert_eq!(kind.as_str().parse::<ColumnType>(), Ok(kind));
        }
        assert!("dropdown".parse::<ColumnType>().is_err());
    }

    #[test]
    fn test_apply_drops_options_for_plain_types() {
        let draft = ColumnDraft::new("Status", ColumnType::SingleSelect).option("Open");
        let mut column = Column::from_draft(ColumnId::from("col_1"), draft);
        assert_eq!(column.options.len(), 1);

        column.apply(ColumnDraft::new("Status", ColumnType::Text).option("Open"));
        assert!(column.options.is_empty());
        assert_eq!(column.kind, ColumnType::Text);
    }

    #[test]
    fn test_serialized_field_names() {
        let mut column = Column::from_draft(
            ColumnId::from("col_7"),
            ColumnDraft::new("Due", ColumnType::Date),
        );
        column.api_id = Some(NativeId::Int(7));
        column.column_index = Some(2);

        let json = serde_json::to_value(&column).unwrap();
        assert_eq!(json["type"], "date");
        assert_eq!(json["apiId"], 7);
        assert_eq!(json["columnIndex"], 2);
    }
}
