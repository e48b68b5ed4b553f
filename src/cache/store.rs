use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend failure: {0}")]
    Backend(String),
}

/// Key/value store with per-entry TTL.
///
/// The client only ever calls these three methods; entries are never removed
/// explicitly and are expected to disappear once their TTL runs out.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn has(&self, key: &str) -> Result<bool, CacheError>;

    /// `None` when the entry is absent or already expired.
    async fn get(&self, key: &str) -> Result<Option<Value>, CacheError>;

    async fn set(&self, key: &str, value: Value, ttl_seconds: u64) -> Result<(), CacheError>;
}
