//! Error types

mod api;
mod normalize;
mod storage;
mod store;

pub use api::*;
pub use normalize::*;
pub use storage::*;
pub use store::*;

/// Top-level error for anything the library can report.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Remote sheet could not be fetched.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Remote payload could not be normalized (strict mode only).
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    /// A store operation was rejected (strict mode only).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Snapshot storage failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
