//! Key-value store for persisted client state
//!
//! Values are stored as JSON documents in a sled tree, keyed by plain
//! strings (e.g. `userData`). This is the device-local persistence the
//! session layer sits on.

use serde::{de::DeserializeOwned, Serialize};
use sled::Db;
use std::sync::Arc;
use thiserror::Error;

/// Key-value store error types
#[derive(Debug, Error)]
pub enum KvError {
    /// Sled database error
    #[error("Database error")]
    Database(#[from] sled::Error),

    /// Serialization error
    #[error("Serialization error")]
    Serialization(#[from] serde_json::Error),

    /// Invalid key
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Result type for key-value operations
pub type Result<T> = std::result::Result<T, KvError>;

/// Key-value store configuration
#[derive(Debug, Clone)]
pub struct KvConfig {
    /// Database path
    pub path: String,
    /// Cache capacity in bytes
    pub cache_capacity: u64,
    /// Enable compression
    pub use_compression: bool,
    /// Flush interval in milliseconds (None for flush on demand only)
    pub flush_every_ms: Option<u64>,
}

impl Default for KvConfig {
    fn default() -> Self {
        Self {
            path: "thesis_archive_kv.db".to_string(),
            cache_capacity: 8 * 1024 * 1024, // 8MB
            use_compression: true,
            flush_every_ms: Some(500),
        }
    }
}

impl KvConfig {
    /// Create a new configuration with a custom path
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), ..Default::default() }
    }

    /// Set cache capacity in bytes
    pub fn cache_capacity(mut self, bytes: u64) -> Self {
        self.cache_capacity = bytes;
        self
    }

    /// Enable or disable compression
    pub fn use_compression(mut self, enabled: bool) -> Self {
        self.use_compression = enabled;
        self
    }

    /// Set flush interval in milliseconds
    pub fn flush_every_ms(mut self, ms: Option<u64>) -> Self {
        self.flush_every_ms = ms;
        self
    }
}

/// JSON document store backed by sled
#[derive(Clone)]
pub struct KvStore {
    db: Arc<Db>,
}

impl KvStore {
    /// Open (or create) a store on disk
    pub fn new(config: KvConfig) -> Result<Self> {
        let db = sled::Config::new()
            .path(&config.path)
            .cache_capacity(config.cache_capacity)
            .use_compression(config.use_compression)
            .flush_every_ms(config.flush_every_ms)
            .open()?;
        tracing::debug!(path = %config.path, "opened key-value store");

        Ok(Self { db: Arc::new(db) })
    }

    /// Create a temporary store that is discarded on drop (for testing)
    pub fn in_memory() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Get a value by key
    pub fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        validate_key(key)?;
        match self.db.get(key.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value by key
    pub fn set<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        validate_key(key)?;
        let bytes = serde_json::to_vec(value)?;
        self.db.insert(key.as_bytes(), bytes)?;
        Ok(())
    }

    /// Remove a value by key, returning whether it existed
    pub fn remove(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        Ok(self.db.remove(key.as_bytes())?.is_some())
    }

    /// Check if a key exists
    pub fn contains(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        Ok(self.db.contains_key(key.as_bytes())?)
    }

    /// Flush pending writes to disk
    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }

    /// Clear all data
    pub fn clear(&self) -> Result<()> {
        self.db.clear()?;
        Ok(())
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(KvError::InvalidKey("key must not be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestData {
        name: String,
        age: u32,
    }

    #[test]
    fn test_kv_store_creation() {
        let kv = KvStore::in_memory().unwrap();
        assert!(kv.is_empty());
    }

    #[test]
    fn test_set_and_get_struct() {
        let kv = KvStore::in_memory().unwrap();
        let data = TestData { name: "Juan Dela Cruz".to_string(), age: 21 };

        kv.set("userData", &data).unwrap();

        let retrieved: Option<TestData> = kv.get("userData").unwrap();
        assert_eq!(retrieved, Some(data));
        assert_eq!(kv.len(), 1);
    }

    #[test]
    fn test_get_nonexistent() {
        let kv = KvStore::in_memory().unwrap();
        let value: Option<String> = kv.get("nonexistent").unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_remove() {
        let kv = KvStore::in_memory().unwrap();

        kv.set("key", &"value".to_string()).unwrap();
        assert!(kv.contains("key").unwrap());

        assert!(kv.remove("key").unwrap());
        assert!(!kv.contains("key").unwrap());
        assert!(!kv.remove("key").unwrap());
    }

    #[test]
    fn test_empty_key_rejected() {
        let kv = KvStore::in_memory().unwrap();
        assert!(matches!(kv.set("", &1), Err(KvError::InvalidKey(_))));
    }

    #[test]
    fn test_type_mismatch_is_serialization_error() {
        let kv = KvStore::in_memory().unwrap();
        kv.set("count", &"not a number").unwrap();

        let result: Result<Option<u32>> = kv.get("count");
        assert!(matches!(result, Err(KvError::Serialization(_))));
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kv").to_string_lossy().to_string();

        {
            let kv = KvStore::new(KvConfig::new(&path)).unwrap();
            kv.set("userData", &TestData { name: "Ana".into(), age: 20 }).unwrap();
            kv.flush().unwrap();
        }

        let kv = KvStore::new(KvConfig::new(&path)).unwrap();
        let data: Option<TestData> = kv.get("userData").unwrap();
        assert_eq!(data.map(|d| d.name), Some("Ana".to_string()));
    }

    #[test]
    fn test_manual_flush_mode_persists_on_flush() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kv").to_string_lossy().to_string();
        let config = KvConfig::new(&path).flush_every_ms(None);

        {
            let kv = KvStore::new(config.clone()).unwrap();
            kv.set("userData", &TestData { name: "Ana".into(), age: 20 }).unwrap();
            kv.flush().unwrap();
        }

        let kv = KvStore::new(config).unwrap();
        let data: Option<TestData> = kv.get("userData").unwrap();
        assert_eq!(data.map(|d| d.age), Some(20));
    }

    #[test]
    fn test_error_display_does_not_repeat_source() {
        let kv = KvStore::in_memory().unwrap();
        kv.set("count", &"not a number").unwrap();

        let err = kv.get::<u32>("count").unwrap_err();
        assert_eq!(err.to_string(), "Serialization error");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_config_builder() {
        let config = KvConfig::new("custom.db")
            .cache_capacity(1024)
            .use_compression(false)
            .flush_every_ms(None);

        assert_eq!(config.path, "custom.db");
        assert_eq!(config.cache_capacity, 1024);
        assert!(!config.use_compression);
        assert_eq!(config.flush_every_ms, None);
    }
}
