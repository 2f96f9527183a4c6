//! Remote sheet client

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value as Json;
use url::Url;

use crate::error::ApiError;

/// Default endpoint serving whole-sheet documents.
pub const DEFAULT_BASE_URL: &str = "https://schedule.msarii.com/hotwash/whole-sheet-data";

/// Identifies one sheet on the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SheetRef {
    pub project_id: u64,
    pub schedule_id: u64,
}

impl SheetRef {
    pub fn new(project_id: u64, schedule_id: u64) -> Self {
        Self {
            project_id,
            schedule_id,
        }
    }
}

impl fmt::Display for SheetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.project_id, self.schedule_id)
    }
}

/// Anything that can produce the raw payload of a sheet.
///
/// [`SheetClient`] is the HTTP implementation; tests and offline hosts can
/// supply their own.
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Fetches the raw JSON document for `sheet`.
    async fn fetch_sheet(&self, sheet: SheetRef) -> Result<Json, ApiError>;
}

/// HTTP client for the sheet service.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely.
///
/// # Example
///
/// ```ignore
/// use taskgrid_lib::client::{SheetClient, SheetRef};
///
/// let client = SheetClient::builder()
///     .timeout(Duration::from_secs(30))
///     .build()?;
///
/// let payload = client.fetch(SheetRef::new(86, 158)).await?;
/// ```
#[derive(Clone)]
pub struct SheetClient {
    inner: Arc<SheetClientInner>,
}

struct SheetClientInner {
    base_url: Url,
    http_client: Client,
    timeout: Option<Duration>,
}

impl SheetClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> SheetClientBuilder {
        SheetClientBuilder::new()
    }

    /// Returns the base URL sheets are fetched from.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Returns the URL of one sheet: `{base}/{project}/{schedule}/`.
    pub fn sheet_url(&self, sheet: SheetRef) -> Result<Url, ApiError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .push(&sheet.project_id.to_string())
            .push(&sheet.schedule_id.to_string())
            .push("");
        Ok(url)
    }

    /// Fetches the raw sheet document.
    pub async fn fetch(&self, sheet: SheetRef) -> Result<Json, ApiError> {
        let url = self.sheet_url(sheet)?;
        debug!("GET {}", url);

        let mut request = self.inner.http_client.get(url);
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|err| self.request_error(err))?;
        let status = response.status();
        let body = response.text().await.map_err(|err| self.request_error(err))?;

        if !status.is_success() {
            let message = if body.trim().is_empty() {
                "Failed to fetch sheet data.".to_string()
            } else {
                body
            };
            return Err(ApiError::http(status.as_u16(), message));
        }

        serde_json::from_str(&body).map_err(|err| ApiError::parse_with_body(err.to_string(), body))
    }

    fn request_error(&self, err: reqwest::Error) -> ApiError {
        match self.inner.timeout {
            Some(timeout) if err.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::from(err),
        }
    }
}

#[async_trait]
impl SheetSource for SheetClient {
    async fn fetch_sheet(&self, sheet: SheetRef) -> Result<Json, ApiError> {
        self.fetch(sheet).await
    }
}

/// Builder for constructing a [`SheetClient`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use taskgrid_lib::client::SheetClient;
///
/// let client = SheetClient::builder()
///     .base_url("https://sheets.example.com/data")
///     .connect_timeout(Duration::from_secs(5))
///     .build()
///     .unwrap();
/// assert_eq!(client.base_url().host_str(), Some("sheets.example.com"));
/// ```
pub struct SheetClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl SheetClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the base URL. Defaults to [`DEFAULT_BASE_URL`].
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout. There is none by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the [`SheetClient`].
    pub fn build(self) -> Result<SheetClient, ApiError> {
        let base_url =
            Url::parse(&self.base_url).map_err(|_| ApiError::InvalidUrl(self.base_url.clone()))?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::Network)?
            }
        };

        Ok(SheetClient {
            inner: Arc::new(SheetClientInner {
                base_url,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for SheetClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
