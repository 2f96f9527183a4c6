//! Remote hydration lifecycle
//!
//! `Idle → Loading` on [`TableStore::begin_fetch`], then back to `Idle` (or
//! `Error`) on [`TableStore::complete_fetch`]. A second fetch cannot start
//! while one is loading.

use log::info;
use log::warn;
use serde_json::Value as Json;

use super::TableStore;
use crate::client::SheetRef;
use crate::client::SheetSource;
use crate::error::ApiError;
use crate::error::NormalizeError;
use crate::normalize::normalize;

/// State of the remote fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    /// The last fetch failed; the message is shown to the user as-is.
    Error(String),
}

impl FetchStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// What a fetch attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Another fetch was already loading; nothing happened.
    AlreadyLoading,
    /// The table was replaced with the remote sheet.
    Loaded,
    /// The transport failed; the table was left as it was.
    Failed(String),
}

impl TableStore {
    pub fn fetch_status(&self) -> &FetchStatus {
        &self.fetch_status
    }

    /// The raw payload of the last successful fetch.
    pub fn last_payload(&self) -> Option<&Json> {
        self.last_payload.as_ref()
    }

    /// Name of the sheet group the table was last loaded from.
    pub fn sheet_name(&self) -> Option<&str> {
        self.last_payload
            .as_ref()?
            .get("data")?
            .get(0)?
            .get("name")?
            .as_str()
    }

    /// Enters `Loading`. Returns `false` (and changes nothing) if a fetch is
    /// already loading.
    pub fn begin_fetch(&mut self) -> bool {
        if self.fetch_status.is_loading() {
            info!("Fetch already in flight; ignoring");
            return false;
        }
        self.fetch_status = FetchStatus::Loading;
        self.touch();
        true
    }

    /// Applies the result of a fetch.
    ///
    /// On success the normalized sheet replaces columns and rows and the
    /// selection is cleared. A transport error only records its message.
    /// In strict mode a malformed payload is recorded as an error too and
    /// returned; in lenient mode it loads as an empty table.
    pub fn complete_fetch(
        &mut self,
        result: Result<Json, ApiError>,
    ) -> Result<FetchOutcome, NormalizeError> {
        let payload = match result {
            Ok(payload) => payload,
            Err(err) => {
                let message = err.to_string();
                warn!("Error fetching sheet data: {}", message);
                self.fetch_status = FetchStatus::Error(message.clone());
                self.touch();
                return Ok(FetchOutcome::Failed(message));
            }
        };

        let sheet = match normalize(&payload, self.config.strictness) {
            Ok(sheet) => sheet,
            Err(err) => {
                self.fetch_status = FetchStatus::Error(err.to_string());
                self.touch();
                return Err(err);
            }
        };

        info!(
            "Loaded sheet {:?}: {} columns, {} rows",
            sheet.name,
            sheet.columns.len(),
            sheet.rows.len()
        );
        self.columns = sheet.columns;
        self.rows = sheet.rows;
        self.selection.clear();
        self.last_payload = Some(payload);
        self.fetch_status = FetchStatus::Idle;
        self.touch();
        Ok(FetchOutcome::Loaded)
    }

    /// Fetches `sheet` from `source` and applies the result.
    pub async fn refresh(
        &mut self,
        source: &dyn SheetSource,
        sheet: SheetRef,
    ) -> Result<FetchOutcome, NormalizeError> {
        if !self.begin_fetch() {
            return Ok(FetchOutcome::AlreadyLoading);
        }
        info!("Fetching sheet {}", sheet);
        let result = source.fetch_sheet(sheet).await;
        self.complete_fetch(result)
    }
}
