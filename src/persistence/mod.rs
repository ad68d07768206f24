//! Durable storage of the trendline collection.
//!
//! Storage is a plain get/set-by-key contract so hosts can back it with a
//! browser key-value store, a file, or memory. Reads never fail outward:
//! absent or malformed data loads as an empty collection.

mod contract;
mod file;
mod memory;

use std::fmt;

use tracing::{debug, trace, warn};

use crate::core::Trendline;
use crate::error::ChartResult;

pub use contract::{
    TRENDLINES_JSON_SCHEMA_V1, TrendlinesJsonContractV1, trendlines_from_json_compat_str,
    trendlines_to_json_contract_v1,
};
pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Single named slot holding the serialized collection.
pub const DEFAULT_STORAGE_KEY: &str = "trading-chart-trendlines";

/// Key-value contract implemented by storage backends.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> ChartResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> ChartResult<()>;
}

/// Loads and saves the trendline collection under one storage key.
pub struct TrendlinePersistence {
    storage: Box<dyn KeyValueStorage>,
    key: String,
}

impl fmt::Debug for TrendlinePersistence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrendlinePersistence")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl TrendlinePersistence {
    #[must_use]
    pub fn new(storage: impl KeyValueStorage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
            key: DEFAULT_STORAGE_KEY.to_owned(),
        }
    }

    /// Volatile persistence for headless use.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::default())
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the persisted collection without masking failures.
    ///
    /// `Ok(None)` means the slot was never written. Unreadable storage and
    /// malformed contents are errors, so callers that rewrite the slot can
    /// refuse to do so.
    pub fn try_load(&self) -> ChartResult<Option<Vec<Trendline>>> {
        let Some(raw) = self.storage.get(&self.key)? else {
            return Ok(None);
        };
        let trendlines = trendlines_from_json_compat_str(&raw)?;
        debug!(key = %self.key, count = trendlines.len(), "loaded persisted trendlines");
        Ok(Some(trendlines))
    }

    /// Reads the persisted collection.
    ///
    /// Missing slot, unreadable storage and parse failures all yield an
    /// empty collection; the latter two are logged.
    pub fn load(&self) -> Vec<Trendline> {
        match self.try_load() {
            Ok(Some(trendlines)) => trendlines,
            Ok(None) => {
                debug!(key = %self.key, "no persisted trendlines");
                Vec::new()
            }
            Err(err) => {
                warn!(
                    key = %self.key,
                    error = %err,
                    "discarding unreadable persisted trendlines"
                );
                Vec::new()
            }
        }
    }

    pub fn save(&mut self, trendlines: &[Trendline]) -> ChartResult<()> {
        let json = trendlines_to_json_contract_v1(trendlines)?;
        self.storage.set(&self.key, &json)?;
        trace!(key = %self.key, count = trendlines.len(), "saved trendlines");
        Ok(())
    }
}
