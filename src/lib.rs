//! # NZ Post Address Checker client
//!
//! Authenticates with an OAuth2 client-credentials grant and exposes the address
//! checker operations (find, suggest, suggest_partial, details, partial_details),
//! optionally caching the token and the responses.
//!
//! Modules:
//! - `api`: the client and the cache-aside request pipeline
//! - `auth`: token request and token lifecycle
//! - `cache`: cache capability, in-memory store, cache keys
//! - `config`: credentials and settings

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod helpers;
pub mod utils;
#[cfg(test)]
mod tests;

pub use crate::api::{AddressType, NzPostClient};
pub use crate::cache::{CacheStore, MemoryCache};
pub use crate::config::{ClientSettings, Credentials};
pub use crate::error::{ClientError, Result};
