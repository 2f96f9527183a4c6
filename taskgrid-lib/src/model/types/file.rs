//! File attachment type

use serde::Deserialize;
use serde::Serialize;

/// A file attached to a file-typed cell.
///
/// File cells hold an ordered list of these. The content itself is not
/// stored; `preview` is whatever locator the host produced when the file was
/// attached (typically a data URL).
///
/// # Example
///
/// ```
/// use taskgrid_lib::model::types::FileAttachment;
///
/// let file = FileAttachment::new("report.pdf", "application/pdf", "data:application/pdf;base64,");
/// assert!(!file.is_image());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileAttachment {
    /// The original file name.
    pub name: String,
    /// The MIME type.
    #[serde(rename = "type", default)]
    pub mime_type: String,
    /// Preview locator.
    #[serde(default)]
    pub preview: String,
}

impl FileAttachment {
    /// Creates a new attachment.
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        preview: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            preview: preview.into(),
        }
    }

    /// Returns `true` if the MIME type is an image type.
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}
