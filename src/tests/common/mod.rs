// tests/common/mod.rs
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use httpmock::Method::{GET, POST};
use httpmock::{Mock, MockServer};
use serde_json::{json, Value};

use crate::api::client::NzPostClient;
use crate::api::endpoint::Endpoint;
use crate::cache::memory_cache::MemoryCache;
use crate::cache::store::{CacheError, CacheStore};
use crate::config::credentials::Credentials;
use crate::config::settings::ClientSettings;
use crate::error::Result;

pub const CLIENT_ID: &str = "client-123";
pub const SECRET: &str = "secret-456";
pub const TOKEN: &str = "tok-abc";

pub fn credentials() -> Credentials {
    Credentials::new(CLIENT_ID, SECRET)
}

pub fn settings_for(server: &MockServer) -> ClientSettings {
    ClientSettings::with_base_url(&server.base_url())
}

pub fn api_path(endpoint: Endpoint) -> String {
    format!("/addresschecker/1.0/{}", endpoint.path())
}

/// Token endpoint answering with `token` and optional `expires_in`
pub fn mock_token<'a>(server: &'a MockServer, token: &str, expires_in: Option<i64>) -> Mock<'a> {
    let body = match expires_in {
        Some(expires_in) => json!({"access_token": token, "expires_in": expires_in, "token_type": "Bearer"}),
        None => json!({"access_token": token, "token_type": "Bearer"}),
    };
    server.mock(|when, then| {
        when.method(POST)
            .path("/as/token.oauth2")
            .header("content-type", "application/x-www-form-urlencoded");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(body);
    })
}

/// Address endpoint answering 200 with `{<field>: payload}`
pub fn mock_api<'a>(server: &'a MockServer, endpoint: Endpoint, payload: Value) -> Mock<'a> {
    let mut body = serde_json::Map::new();
    body.insert("success".to_owned(), json!(true));
    body.insert(endpoint.response_field().to_owned(), payload);
    server.mock(|when, then| {
        when.method(GET)
            .path(api_path(endpoint))
            .query_param("access_token", TOKEN)
            .header("accept", "application/json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(Value::Object(body));
    })
}

pub fn mock_api_status<'a>(server: &'a MockServer, endpoint: Endpoint, status: u16) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(GET).path(api_path(endpoint));
        then.status(status).body("{\"success\":false}");
    })
}

pub fn sample_addresses(count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|i| {
                json!({
                    "DPID": 3000000 + i as u64,
                    "FullAddress": format!("{} Queen Street, Auckland Central, Auckland 1010", i + 1),
                })
            })
            .collect(),
    )
}

pub fn shared(cache: &Arc<RecordingCache>) -> Option<Arc<dyn CacheStore>> {
    Some(cache.clone() as Arc<dyn CacheStore>)
}

pub async fn client_with_cache(server: &MockServer, cache: &Arc<RecordingCache>) -> Result<NzPostClient> {
    NzPostClient::with_settings(credentials(), settings_for(server), shared(cache)).await
}

pub async fn client_without_cache(server: &MockServer) -> Result<NzPostClient> {
    NzPostClient::with_settings(credentials(), settings_for(server), None).await
}

/// `MemoryCache` that remembers every `set` call with its TTL
#[derive(Debug, Default)]
pub struct RecordingCache {
    pub inner: MemoryCache,
    sets: Mutex<Vec<(String, u64)>>,
}

impl RecordingCache {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sets(&self) -> Vec<(String, u64)> {
        self.sets.lock().unwrap().clone()
    }

    pub fn ttl_of(&self, key: &str) -> Option<u64> {
        self.sets().into_iter().rev().find(|(k, _)| k == key).map(|(_, ttl)| ttl)
    }
}

#[async_trait]
impl CacheStore for RecordingCache {
    async fn has(&self, key: &str) -> std::result::Result<bool, CacheError> {
        self.inner.has(key).await
    }

    async fn get(&self, key: &str) -> std::result::Result<Option<Value>, CacheError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Value, ttl_seconds: u64) -> std::result::Result<(), CacheError> {
        self.sets.lock().unwrap().push((key.to_owned(), ttl_seconds));
        self.inner.set(key, value, ttl_seconds).await
    }
}

/// Cache whose backend is always down
#[derive(Debug, Default)]
pub struct BrokenCache;

#[async_trait]
impl CacheStore for BrokenCache {
    async fn has(&self, _key: &str) -> std::result::Result<bool, CacheError> {
        Err(CacheError::Backend("connection refused".to_owned()))
    }

    async fn get(&self, _key: &str) -> std::result::Result<Option<Value>, CacheError> {
        Err(CacheError::Backend("connection refused".to_owned()))
    }

    async fn set(&self, _key: &str, _value: Value, _ttl_seconds: u64) -> std::result::Result<(), CacheError> {
        Err(CacheError::Backend("connection refused".to_owned()))
    }
}
