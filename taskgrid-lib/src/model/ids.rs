//! Identifier newtypes

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing identifier string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifier of a column, unique within a table.
    ColumnId
);

string_id!(
    /// Identifier of a row, unique within a table.
    RowId
);

/// Identifier assigned by the remote sheet service.
///
/// The service sends numbers, but strings are accepted as well so that a
/// payload never fails to decode over an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NativeId {
    Int(i64),
    Str(String),
}

impl fmt::Display for NativeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeId::Int(n) => write!(f, "{}", n),
            NativeId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for NativeId {
    fn from(id: i64) -> Self {
        NativeId::Int(id)
    }
}

impl From<i32> for NativeId {
    fn from(id: i32) -> Self {
        NativeId::Int(i64::from(id))
    }
}

impl From<&str> for NativeId {
    fn from(id: &str) -> Self {
        NativeId::Str(id.to_string())
    }
}
