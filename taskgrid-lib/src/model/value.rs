//! Cell value enum

use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use super::ColumnType;
use super::types::FileAttachment;
use super::types::Label;
use super::types::OptionTag;
use super::types::UserList;

/// The value held in one cell.
///
/// Cell shapes are a closed set; which variants make sense depends on the
/// owning column's [`ColumnType`], but nothing enforces that pairing. Column
/// types only pick the editor.
///
/// # Type Mapping
///
/// | Column type | Variants |
/// |-------------|----------|
/// | any | `Empty` |
/// | text, number | `Text`, `Label`, `Users` |
/// | date | `Date` |
/// | file | `Files` |
/// | single-select | `Choice` |
/// | multi-select | `Choices` |
/// | remote leftovers | `Raw` |
///
/// # Example
///
/// ```
/// use taskgrid_lib::model::CellValue;
///
/// let name = CellValue::from("Contoso");
/// let empty = CellValue::Empty;
/// assert_eq!(name.to_string(), "Contoso");
/// assert!(empty.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CellValue {
    /// No value.
    #[default]
    Empty,
    /// Plain text (also used for numbers, which are edited as text).
    Text(String),
    /// Colored text tag.
    Label(Label),
    /// Assigned users.
    Users(UserList),
    /// Calendar date, serialized as `YYYY-MM-DD`.
    Date(NaiveDate),
    /// Ordered file attachments.
    Files(Vec<FileAttachment>),
    /// Single-select choice.
    Choice(OptionTag),
    /// Multi-select choices, in display order.
    Choices(Vec<OptionTag>),
    /// Remote value outside the shapes above, kept verbatim.
    Raw(serde_json::Value),
}

impl CellValue {
    /// Returns the value a missing cell stands for in a column of `kind`.
    pub fn empty_for(kind: ColumnType) -> Self {
        match kind {
            ColumnType::MultiSelect => CellValue::Choices(Vec::new()),
            ColumnType::File => CellValue::Files(Vec::new()),
            _ => CellValue::Empty,
        }
    }

    /// Returns `true` if the cell shows nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Users(users) => users.is_empty(),
            CellValue::Files(files) => files.is_empty(),
            CellValue::Choices(choices) => choices.is_empty(),
            CellValue::Raw(raw) => raw.is_null(),
            CellValue::Label(_) | CellValue::Date(_) | CellValue::Choice(_) => false,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::Text(_) => "text",
            CellValue::Label(_) => "label",
            CellValue::Users(_) => "users",
            CellValue::Date(_) => "date",
            CellValue::Files(_) => "files",
            CellValue::Choice(_) => "choice",
            CellValue::Choices(_) => "choices",
            CellValue::Raw(_) => "raw",
        }
    }

    /// Returns the text if this is a plain text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the date if this is a date value.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the selected options of a single- or multi-select value.
    pub fn choices(&self) -> &[OptionTag] {
        match self {
            CellValue::Choice(choice) => std::slice::from_ref(choice),
            CellValue::Choices(choices) => choices,
            _ => &[],
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Label(label) => f.write_str(&label.text),
            CellValue::Users(users) => f.write_str(&users.text),
            CellValue::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            CellValue::Files(files) => {
                let names: Vec<&str> = files.iter().map(|file| file.name.as_str()).collect();
                f.write_str(&names.join(", "))
            }
            CellValue::Choice(choice) => f.write_str(&choice.text),
            CellValue::Choices(choices) => {
                let texts: Vec<&str> = choices.iter().map(|c| c.text.as_str()).collect();
                f.write_str(&texts.join(", "))
            }
            CellValue::Raw(serde_json::Value::Null) => Ok(()),
            CellValue::Raw(serde_json::Value::String(s)) => f.write_str(s),
            CellValue::Raw(raw) => write!(f, "{}", raw),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<NaiveDate> for CellValue {
    fn from(v: NaiveDate) -> Self {
        CellValue::Date(v)
    }
}

impl From<Label> for CellValue {
    fn from(v: Label) -> Self {
        CellValue::Label(v)
    }
}

impl From<UserList> for CellValue {
    fn from(v: UserList) -> Self {
        CellValue::Users(v)
    }
}

impl From<OptionTag> for CellValue {
    fn from(v: OptionTag) -> Self {
        CellValue::Choice(v)
    }
}

impl From<Vec<OptionTag>> for CellValue {
    fn from(v: Vec<OptionTag>) -> Self {
        CellValue::Choices(v)
    }
}

impl From<Vec<FileAttachment>> for CellValue {
    fn from(v: Vec<FileAttachment>) -> Self {
        CellValue::Files(v)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => CellValue::Empty,
        }
    }
}
