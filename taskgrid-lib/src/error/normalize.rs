//! Payload normalization errors

/// Structural problems in a remote sheet payload.
///
/// Only reported when the store runs in strict mode; lenient mode degrades
/// the same inputs to an empty table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    /// The payload does not match the expected sheet shape at all.
    #[error("Malformed sheet payload: {0}")]
    Malformed(String),

    /// The payload has no groups.
    #[error("Sheet payload contains no groups")]
    MissingGroup,

    /// The first group has no header row.
    #[error("Sheet group has no header row")]
    MissingHeader,
}
