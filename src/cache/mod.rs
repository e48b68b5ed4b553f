//! Cache capability used by the client: the `CacheStore` trait, an in-process
//! implementation and the cache key fingerprint.

pub mod fingerprint;
pub mod memory_cache;
pub mod store;

pub use fingerprint::cache_key;
pub use memory_cache::MemoryCache;
pub use store::{CacheError, CacheStore};
