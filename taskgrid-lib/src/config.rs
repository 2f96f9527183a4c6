//! Store configuration

/// How the store reacts to operations it cannot apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Unknown ids, bad indexes and malformed payloads are ignored; the
    /// state is left untouched and the operation reports success.
    #[default]
    Lenient,
    /// The same situations are reported as errors.
    Strict,
}

impl Strictness {
    pub fn is_strict(self) -> bool {
        matches!(self, Strictness::Strict)
    }
}

/// Configuration for a [`TableStore`](crate::store::TableStore).
///
/// # Example
///
/// ```
/// use taskgrid_lib::config::{StoreConfig, Strictness};
///
/// let config = StoreConfig::default().with_strictness(Strictness::Strict);
/// assert!(config.strictness.is_strict());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Error policy for referential misses and malformed payloads.
    ///
    /// Default: lenient
    pub strictness: Strictness,
}

impl StoreConfig {
    /// Creates a new store config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the error policy.
    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    /// Creates a config that reports every miss as an error.
    pub fn strict() -> Self {
        Self {
            strictness: Strictness::Strict,
        }
    }
}
