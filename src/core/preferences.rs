//! Persistent user preferences

use anyhow::Result;
use async_trait::async_trait;

/// Key under which the selected base currency is persisted.
pub const SELECTED_CURRENCY_KEY: &str = "selectedCurrency";

/// A small string key-value store that outlives the process.
#[async_trait]
pub trait Preferences: Send + Sync {
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn get(&self, key: &str) -> Result<Option<String>>;
}
