use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::trace;

use crate::cache::store::{CacheError, CacheStore};
use crate::helpers::time::{expires_at_ms, now_ms};

/// Cached value with computed expiration
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    expires_at_ms: i64, // UNIX timestamp, milliseconds
}

impl CacheEntry {
    fn is_alive(&self) -> bool {
        now_ms() < self.expires_at_ms
    }
}

/// In-process cache: key -> value with TTL.
///
/// Clones share the same map, so one instance can back several clients.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    inner: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self { inner: Arc::new(RwLock::new(HashMap::new())) }
    }

    /// Number of entries that have not expired yet
    pub async fn len(&self) -> usize {
        self.inner.read().await.values().filter(|e| e.is_alive()).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn has(&self, key: &str) -> Result<bool, CacheError> {
        let map = self.inner.read().await;
        Ok(map.get(key).map(|e| e.is_alive()).unwrap_or(false))
    }

    /// Get value if it exists and is not expired
    async fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        let map = self.inner.read().await;
        Ok(map
            .get(key)
            .filter(|e| e.is_alive())
            .map(|e| e.value.clone()))
    }

    async fn set(&self, key: &str, value: Value, ttl_seconds: u64) -> Result<(), CacheError> {
        let mut map = self.inner.write().await;
        // expired entries are dropped lazily on writes
        map.retain(|_, e| e.is_alive());
        map.insert(
            key.to_string(),
            CacheEntry { value, expires_at_ms: expires_at_ms(ttl_seconds) },
        );
        trace!(key, ttl_seconds, "cache entry stored");
        Ok(())
    }
}
