//! Select option types

use serde::Deserialize;
use serde::Serialize;

use crate::model::NativeId;

/// Fallback color for options that arrive without one.
pub const DEFAULT_OPTION_COLOR: &str = "#e0e0eb";

/// A single select option as stored in a cell or derived from remote data.
///
/// Locally entered values usually carry only `text`; options decoded from the
/// remote sheet also carry the service's color and id.
///
/// # Example
///
/// ```
/// use taskgrid_lib::model::types::OptionTag;
///
/// let plain = OptionTag::new("Open");
/// let tagged = OptionTag::with_color("Open", "#ff0000");
/// assert_eq!(plain.text, tagged.text);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionTag {
    /// Display text; also the identity key when deriving option sets.
    pub text: String,
    /// Background color, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Remote identifier, if the option came from the sheet service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NativeId>,
}

impl OptionTag {
    /// Creates an option with just a label.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
            id: None,
        }
    }

    /// Creates an option with a label and color.
    pub fn with_color(text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: Some(color.into()),
            id: None,
        }
    }

    /// Sets the remote id (builder pattern).
    pub fn id(mut self, id: impl Into<NativeId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Returns the color, falling back to [`DEFAULT_OPTION_COLOR`].
    pub fn color_or_default(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_OPTION_COLOR)
    }
}

/// An entry in a column's option list.
///
/// Options typed into the column editor are bare strings; options picked with
/// a color, or derived from remote data, are tagged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnOption {
    Plain(String),
    Tagged(OptionTag),
}

impl ColumnOption {
    /// Returns the option's display text.
    pub fn text(&self) -> &str {
        match self {
            ColumnOption::Plain(text) => text,
            ColumnOption::Tagged(tag) => &tag.text,
        }
    }

    /// Returns the option's color, if it has one.
    pub fn color(&self) -> Option<&str> {
        match self {
            ColumnOption::Plain(_) => None,
            ColumnOption::Tagged(tag) => tag.color.as_deref(),
        }
    }

    /// Converts the option into the shape stored in select cells.
    pub fn to_tag(&self) -> OptionTag {
        match self {
            ColumnOption::Plain(text) => OptionTag::new(text.clone()),
            ColumnOption::Tagged(tag) => tag.clone(),
        }
    }
}

impl From<&str> for ColumnOption {
    fn from(text: &str) -> Self {
        ColumnOption::Plain(text.to_string())
    }
}

impl From<String> for ColumnOption {
    fn from(text: String) -> Self {
        ColumnOption::Plain(text)
    }
}

impl From<OptionTag> for ColumnOption {
    fn from(tag: OptionTag) -> Self {
        ColumnOption::Tagged(tag)
    }
}
