//! Wire types for the remote sheet payload.
//!
//! The service nests a sheet as groups → rows → columns. Header rows describe
//! columns; data rows carry one entry per cell, with the value in
//! `cell_data`. Every field is optional on the wire and `null` is treated the
//! same as absent.
//!
//! Below the group level decoding never fails: a field of the wrong JSON type
//! reads as absent (indexes also accept integral floats and numeric strings)
//! and a row or cell that is not an object is skipped. Only the `data` list
//! and its groups must have the expected shape.

use log::warn;
use serde::Deserialize;
use serde::Deserializer;
use serde::de::DeserializeOwned;
use serde_json::Value as Json;

use crate::model::ColumnType;
use crate::model::NativeId;

/// Top-level payload: `{ "data": [group, ...] }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetPayload {
    #[serde(default)]
    pub data: Option<Vec<SheetGroup>>,
}

/// One group of rows. Only the first group of a payload is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetGroup {
    #[serde(default, deserialize_with = "text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "items")]
    pub rows: Vec<SheetRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetRowKind {
    Header,
    Data,
    #[default]
    #[serde(other)]
    Other,
}

/// A header or data row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetRow {
    #[serde(rename = "type", default, deserialize_with = "or_default")]
    pub kind: SheetRowKind,
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<NativeId>,
    #[serde(default, deserialize_with = "index")]
    pub row_index: Option<i64>,
    #[serde(default, deserialize_with = "items")]
    pub columns: Vec<SheetCell>,
}

/// A column descriptor (in header rows) or a cell (in data rows).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetCell {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<NativeId>,
    #[serde(default, deserialize_with = "text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub column_type: Option<String>,
    #[serde(default, deserialize_with = "index")]
    pub column_index: Option<i64>,
    #[serde(default)]
    pub cell_data: serde_json::Value,
}

impl SheetCell {
    pub fn native_type(&self) -> NativeColumnType {
        NativeColumnType::parse(self.column_type.as_deref())
    }
}

/// Column types understood by the sheet service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeColumnType {
    Fixed,
    Text,
    Users,
    Date,
    File,
    Dropdown,
    MultiDropdown,
    Other,
}

impl NativeColumnType {
    pub fn parse(name: Option<&str>) -> Self {
        match name {
            Some("fixed") => Self::Fixed,
            Some("text") => Self::Text,
            Some("users") => Self::Users,
            Some("date") => Self::Date,
            Some("file") => Self::File,
            Some("dropdown") => Self::Dropdown,
            Some("multiDropdown") => Self::MultiDropdown,
            _ => Self::Other,
        }
    }

    /// Maps to the local column type; anything unrecognized becomes text.
    pub fn column_type(self) -> ColumnType {
        match self {
            Self::Fixed | Self::Text | Self::Users | Self::Other => ColumnType::Text,
            Self::Date => ColumnType::Date,
            Self::File => ColumnType::File,
            Self::Dropdown => ColumnType::SingleSelect,
            Self::MultiDropdown => ColumnType::MultiSelect,
        }
    }
}

/// Optional field; `null` or a value of the wrong type reads as `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(T::deserialize(Json::deserialize(deserializer)?).ok())
}

fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// Position field: integers, integral floats and numeric strings.
fn index<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Json::deserialize(deserializer)? {
        Json::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Json::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Display text: strings as-is, numbers and booleans rendered.
fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Json::deserialize(deserializer)? {
        Json::String(s) => Some(s),
        Json::Number(n) => Some(n.to_string()),
        Json::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// List field; anything but an array reads as empty and entries that do not
/// decode are skipped.
fn items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Json::Array(raw) = Json::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(raw
        .into_iter()
        .filter_map(|item| match T::deserialize(item) {
            Ok(item) => Some(item),
            Err(err) => {
                warn!("Skipping undecodable sheet entry: {}", err);
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_nulls_read_as_absent() {
        let payload = json!({
            "data": [{ "name": null, "rows": [{ "type": "data", "columns": null }] }]
        });
        let sheet = SheetPayload::deserialize(&payload).unwrap();
        let group = &sheet.data.unwrap()[0];
        assert_eq!(group.rows[0].kind, SheetRowKind::Data);
        assert!(group.rows[0].columns.is_empty());
    }

    #[test]
    fn test_mistyped_fields_read_as_absent() {
        let row: SheetRow = serde_json::from_value(json!({
            "type": 3,
            "id": 1.5,
            "row_index": "1",
            "columns": [
                {"name": 5, "column_index": 1.0, "column_type": false},
                "not a cell",
                {"column_index": "x", "id": {"nested": true}}
            ]
        }))
        .unwrap();

        assert_eq!(row.kind, SheetRowKind::Other);
        assert_eq!(row.id, None);
        assert_eq!(row.row_index, Some(1));
        assert_eq!(row.columns.len(), 2);
        assert_eq!(row.columns[0].name.as_deref(), Some("5"));
        assert_eq!(row.columns[0].column_index, Some(1));
        assert_eq!(row.columns[0].column_type, None);
        assert_eq!(row.columns[1].column_index, None);
        assert_eq!(row.columns[1].id, None);
    }

    #[test]
    fn test_unknown_row_kind() {
        let row: SheetRow = serde_json::from_value(json!({ "type": "footer" })).unwrap();
        assert_eq!(row.kind, SheetRowKind::Other);
    }

    #[test]
    fn test_native_type_mapping() {
        let cases = [
            ("fixed", ColumnType::Text),
            ("text", ColumnType::Text),
            ("users", ColumnType::Text),
            ("date", ColumnType::Date),
            ("file", ColumnType::File),
            ("dropdown", ColumnType::SingleSelect),
            ("multiDropdown", ColumnType::MultiSelect),
            ("formula", ColumnType::Text),
        ];
        for (name, expected) in cases {
            assert_eq!(NativeColumnType::parse(Some(name)).column_type(), expected);
        }
        assert_eq!(NativeColumnType::parse(None), NativeColumnType::Other);
    }
}
