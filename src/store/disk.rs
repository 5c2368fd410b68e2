use crate::core::preferences::Preferences;
use anyhow::{Context, Result};
use async_trait::async_trait;
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const PARTITION_NAME: &str = "preferences";

/// Preferences backed by a fjall keyspace. Every write is synced to disk
/// before `set` returns.
pub struct DiskPreferences {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskPreferences {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;

        let keyspace = fjall::Config::new(path)
            .open()
            .with_context(|| format!("Failed to open preferences at {}", path.display()))?;
        let partition = keyspace
            .open_partition(PARTITION_NAME, PartitionCreateOptions::default())
            .context("Failed to open preferences partition")?;
        debug!("Opened preferences at {}", path.display());

        Ok(Self {
            keyspace,
            partition,
        })
    }
}

#[async_trait]
impl Preferences for DiskPreferences {
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.partition
            .insert(key, value)
            .with_context(|| format!("Failed to write preference: {key}"))?;
        self.keyspace
            .persist(PersistMode::SyncAll)
            .context("Failed to flush preferences")?;
        debug!("Preference SET for key: {}", key);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .partition
            .get(key)
            .with_context(|| format!("Failed to read preference: {key}"))?;
        value
            .map(|bytes| String::from_utf8(bytes.to_vec()))
            .transpose()
            .with_context(|| format!("Preference is not valid UTF-8: {key}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_disk_preferences_get_set() {
        let dir = tempdir().unwrap();
        let prefs = DiskPreferences::open(dir.path()).unwrap();

        // Initially, nothing stored
        assert!(prefs.get("selectedCurrency").await.unwrap().is_none());

        prefs.set("selectedCurrency", "eur").await.unwrap();
        assert_eq!(
            prefs.get("selectedCurrency").await.unwrap().as_deref(),
            Some("eur")
        );

        prefs.set("selectedCurrency", "jpy").await.unwrap();
        assert_eq!(
            prefs.get("selectedCurrency").await.unwrap().as_deref(),
            Some("jpy")
        );
    }

    #[tokio::test]
    async fn test_disk_preferences_creates_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("data").join("prefs");
        let prefs = DiskPreferences::open(&nested).unwrap();

        prefs.set("k", "v").await.unwrap();
        assert!(nested.exists());
    }
}
