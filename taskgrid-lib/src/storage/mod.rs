//! Persistent table snapshots.
//!
//! A [`StorageBackend`] stores raw bytes; [`SnapshotStorage`] layers typed
//! JSON values on top and knows where each route's table lives.

mod backend;
mod memory;
mod sqlite;

pub use backend::StorageBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

use std::sync::Arc;

use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;
use crate::navigation::Route;
use crate::store::TableSnapshot;

/// Key prefix shared by all table snapshots.
pub const TABLE_KEY_PREFIX: &str = "table:";

/// Returns the storage key of the table shown on `route`.
pub fn table_key(route: Route) -> String {
    format!("{}{}", TABLE_KEY_PREFIX, route.path())
}

/// Typed snapshot storage.
#[derive(Clone)]
pub struct SnapshotStorage {
    backend: Arc<dyn StorageBackend>,
}

impl SnapshotStorage {
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Storage that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Get a typed value for a key.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.backend.get_bytes(key).await? {
            Some(bytes) => Ok(Some(
                serde_json::from_slice(&bytes).map_err(StorageError::Deserialization)?,
            )),
            None => Ok(None),
        }
    }

    /// Set a typed value for a key.
    pub async fn set<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(value).map_err(StorageError::Serialization)?;
        self.backend.set_bytes(key, bytes).await
    }

    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.backend.delete(key).await
    }

    pub async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        self.backend.keys_with_prefix(prefix).await
    }

    /// Loads the saved table for `route`, if there is one.
    pub async fn load_table(&self, route: Route) -> Result<Option<TableSnapshot>, StorageError> {
        let snapshot = self.get::<TableSnapshot>(&table_key(route)).await?;
        if let Some(ref snapshot) = snapshot {
            debug!(
                "loaded {} columns and {} rows for {}",
                snapshot.columns.len(),
                snapshot.rows.len(),
                route.path()
            );
        }
        Ok(snapshot)
    }

    /// Saves the table for `route`, replacing any previous snapshot.
    pub async fn save_table(
        &self,
        route: Route,
        snapshot: &TableSnapshot,
    ) -> Result<(), StorageError> {
        debug!("saving table for {}", route.path());
        self.set(&table_key(route), snapshot).await
    }

    /// Removes the saved table for `route`.
    pub async fn forget_table(&self, route: Route) -> Result<(), StorageError> {
        self.delete(&table_key(route)).await
    }

    /// Routes that currently have a saved table.
    pub async fn saved_routes(&self) -> Result<Vec<Route>, StorageError> {
        let keys = self.keys_with_prefix(TABLE_KEY_PREFIX).await?;
        Ok(keys
            .iter()
            .filter_map(|key| key.strip_prefix(TABLE_KEY_PREFIX))
            .filter_map(Route::from_path)
            .collect())
    }
}
