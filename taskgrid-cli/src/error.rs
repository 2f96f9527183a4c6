//! CLI error type.

use taskgrid_lib::error::{ApiError, NormalizeError, StorageError, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Table(#[from] taskgrid_lib::Error),

    /// A command argument could not be turned into a cell or column value.
    #[error("invalid input: {0}")]
    Input(String),

    /// The sheet service could not be reached or answered with an error.
    #[error("sync failed: {0}")]
    Sync(String),

    #[error("no data directory available; pass --data-dir")]
    NoDataDir,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to initialize logging: {0}")]
    Logger(#[from] log::SetLoggerError),
}

impl CliError {
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input(message.into())
    }
}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        Self::Table(err.into())
    }
}

impl From<NormalizeError> for CliError {
    fn from(err: NormalizeError) -> Self {
        Self::Table(err.into())
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        Self::Table(err.into())
    }
}

impl From<StorageError> for CliError {
    fn from(err: StorageError) -> Self {
        Self::Table(err.into())
    }
}
