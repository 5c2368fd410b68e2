use crate::core::preferences::Preferences;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory preferences, lost when the process exits.
#[derive(Clone, Default)]
pub struct MemoryPreferences {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Preferences for MemoryPreferences {
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut prefs = self.inner.lock().await;
        debug!("Preference SET for key: {}", key);
        prefs.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let prefs = self.inner.lock().await;
        Ok(prefs.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_preferences_get_set() {
        let prefs = MemoryPreferences::new();

        assert!(prefs.get("selectedCurrency").await.unwrap().is_none());

        prefs.set("selectedCurrency", "eur").await.unwrap();
        assert_eq!(
            prefs.get("selectedCurrency").await.unwrap().as_deref(),
            Some("eur")
        );

        // Overwrites previous value
        prefs.set("selectedCurrency", "gbp").await.unwrap();
        assert_eq!(
            prefs.get("selectedCurrency").await.unwrap().as_deref(),
            Some("gbp")
        );
    }

    #[tokio::test]
    async fn test_memory_preferences_clones_share_state() {
        let prefs = MemoryPreferences::new();
        let other = prefs.clone();

        prefs.set("k", "v").await.unwrap();
        assert_eq!(other.get("k").await.unwrap().as_deref(), Some("v"));
    }
}
