//! Cache-aside request pipeline shared by every address operation.
//!
//! One call: cache key -> cache lookup -> GET with the bearer token -> status
//! check -> JSON decode -> field extraction -> cache write.

use http::header::ACCEPT;
use http::StatusCode;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, trace};

use crate::api::endpoint::Endpoint;
use crate::auth::token::Token;
use crate::cache::fingerprint::cache_key;
use crate::cache::store::CacheStore;
use crate::config::settings::ClientSettings;
use crate::error::{ClientError, Result};

/// One address operation call: endpoint plus its query parameters in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub endpoint: Endpoint,
    pub query: Vec<(&'static str, String)>,
}

impl ApiRequest {
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint, query: Vec::new() }
    }

    pub fn param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.query.push((name, value.into()));
        self
    }

    /// Every query parameter is significant, names included, so two calls only
    /// share a key when they would send the same query.
    pub fn cache_key(&self, prefix: &str) -> String {
        let args: Vec<&str> = self
            .query
            .iter()
            .flat_map(|(name, value)| [*name, value.as_str()])
            .collect();
        cache_key(prefix, self.endpoint.path(), &args)
    }

    pub fn url(&self, api_url: &str) -> String {
        format!("{}{}", api_url, self.endpoint.path())
    }
}

/// Borrowed view of the client state a single call needs
pub(crate) struct Pipeline<'a> {
    pub client: &'a Client,
    pub settings: &'a ClientSettings,
    pub cache: Option<&'a dyn CacheStore>,
    pub token: &'a Token,
}

impl Pipeline<'_> {
    pub async fn execute(&self, request: ApiRequest) -> Result<Value> {
        let key = self.cache.map(|_| request.cache_key(&self.settings.cache_prefix));

        if let (Some(cache), Some(key)) = (self.cache, key.as_deref()) {
            if cache.has(key).await? {
                if let Some(value) = cache.get(key).await? {
                    debug!(endpoint = %request.endpoint, key, "cache hit");
                    return Ok(value);
                }
            }
            trace!(endpoint = %request.endpoint, key, "cache miss");
        }

        let value = self.fetch(&request).await?;

        if let (Some(cache), Some(key)) = (self.cache, key.as_deref()) {
            cache.set(key, value.clone(), self.settings.response_ttl_secs).await?;
        }

        Ok(value)
    }

    async fn fetch(&self, request: &ApiRequest) -> Result<Value> {
        let url = request.url(&self.settings.api_url);
        if self.settings.debug {
            info!(url = %url, query = ?request.query, "address API request");
        } else {
            debug!(endpoint = %request.endpoint, "address API request");
        }

        let response = self
            .client
            .get(&url)
            .query(&request.query)
            .query(&[("access_token", self.token.as_str())])
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();

        if status != StatusCode::OK {
            debug!(endpoint = %request.endpoint, status = status.as_u16(), "address API error");
            if self.settings.debug {
                // the error body is informational only
                match response.text().await {
                    Ok(body) => info!(status = status.as_u16(), body = %body, "address API response"),
                    Err(e) => info!(status = status.as_u16(), error = %e, "address API error body unreadable"),
                }
            }
            return Err(ClientError::Api { code: status.as_u16() });
        }

        let body = response.text().await?;
        if self.settings.debug {
            info!(status = status.as_u16(), body = %body, "address API response");
        } else {
            trace!(status = status.as_u16(), "address API response");
        }

        extract_field(&body, request.endpoint.response_field())
    }
}

/// Decode a 200 body and take `field` out of the envelope.
pub fn extract_field(body: &str, field: &str) -> Result<Value> {
    let json: Value = serde_json::from_str(body)
        .map_err(|e| ClientError::MalformedResponse(format!("body is not valid JSON: {}", e)))?;

    match json {
        Value::Object(mut map) => map
            .remove(field)
            .ok_or_else(|| ClientError::MalformedResponse(format!("missing field '{}'", field))),
        _ => Err(ClientError::MalformedResponse(format!(
            "expected a JSON object with field '{}'",
            field
        ))),
    }
}
