use std::sync::Arc;

use reqwest::Client;
use serde_json::Value;
use tracing::warn;

use crate::api::endpoint::Endpoint;
use crate::api::request::{ApiRequest, Pipeline};
use crate::auth::token::Token;
use crate::auth::token_manager::TokenManager;
use crate::cache::store::CacheStore;
use crate::config::credentials::Credentials;
use crate::config::settings::ClientSettings;
use crate::error::Result;
use crate::utils::constants::MAX_ADDRESS_LINES;

/// NZ Post Address Checker client.
///
/// Authenticates on construction, then serves the five address operations through
/// the cache-aside pipeline. All state belongs to this instance; several clients may
/// share one cache store.
pub struct NzPostClient {
    http: Client,
    settings: ClientSettings,
    cache: Option<Arc<dyn CacheStore>>,
    tokens: TokenManager,
}

impl NzPostClient {
    /// Client against the production endpoints with default settings.
    pub async fn new(
        client_id: impl Into<String>,
        secret: impl Into<String>,
        cache: Option<Arc<dyn CacheStore>>,
    ) -> Result<Self> {
        Self::with_settings(Credentials::new(client_id, secret), ClientSettings::default(), cache).await
    }

    pub async fn with_settings(
        credentials: Credentials,
        settings: ClientSettings,
        cache: Option<Arc<dyn CacheStore>>,
    ) -> Result<Self> {
        let http = Client::builder().build()?;
        Self::with_http_client(http, credentials, settings, cache).await
    }

    /// Same as `with_settings` but with a caller-configured transport, e.g. one with
    /// a request timeout.
    pub async fn with_http_client(
        http: Client,
        credentials: Credentials,
        settings: ClientSettings,
        cache: Option<Arc<dyn CacheStore>>,
    ) -> Result<Self> {
        let tokens = TokenManager::start(
            &http,
            credentials,
            settings.auth_url.clone(),
            settings.request_timeout_secs,
            cache.as_deref(),
        )
        .await?;

        Ok(Self { http, settings, cache, tokens })
    }

    /// Search by free-text address lines. Only the first five lines are sent.
    pub async fn find(&self, address_lines: &[&str], address_type: &str, max: u32) -> Result<Value> {
        if address_lines.len() > MAX_ADDRESS_LINES {
            warn!(lines = address_lines.len(), "only the first {} address lines are used", MAX_ADDRESS_LINES);
        }
        const LINE_PARAMS: [&str; MAX_ADDRESS_LINES] =
            ["address_line_1", "address_line_2", "address_line_3", "address_line_4", "address_line_5"];

        let mut request = ApiRequest::new(Endpoint::Find).param("type", address_type);
        for (name, line) in LINE_PARAMS.iter().zip(address_lines) {
            request = request.param(*name, *line);
        }
        self.execute(request.param("max", max.to_string())).await
    }

    /// Full details of a delivery point
    pub async fn details(&self, dpid: &str, address_type: &str, max: u32) -> Result<Value> {
        let request = ApiRequest::new(Endpoint::Details)
            .param("dpid", dpid)
            .param("type", address_type)
            .param("max", max.to_string());
        self.execute(request).await
    }

    pub async fn suggest(&self, query: &str, address_type: &str, max: u32) -> Result<Value> {
        let request = ApiRequest::new(Endpoint::Suggest)
            .param("q", query)
            .param("type", address_type)
            .param("max", max.to_string());
        self.execute(request).await
    }

    /// `order_roads_first` is `"Y"` or `"N"` on the remote side; forwarded as given.
    pub async fn suggest_partial(&self, query: &str, order_roads_first: &str, max: u32) -> Result<Value> {
        let request = ApiRequest::new(Endpoint::SuggestPartial)
            .param("q", query)
            .param("order_roads_first", order_roads_first)
            .param("max", max.to_string());
        self.execute(request).await
    }

    pub async fn partial_details(&self, unique_id: &str, max: u32) -> Result<Value> {
        let request = ApiRequest::new(Endpoint::PartialDetails)
            .param("unique_id", unique_id)
            .param("max", max.to_string());
        self.execute(request).await
    }

    /// Fetch a new token now. Nothing calls this automatically, a stale token shows
    /// up as a 401 `Api` error.
    pub async fn reauthenticate(&mut self) -> Result<&Token> {
        let cache = self.cache.as_deref();
        self.tokens.refresh(&self.http, cache).await
    }

    async fn execute(&self, request: ApiRequest) -> Result<Value> {
        Pipeline {
            client: &self.http,
            settings: &self.settings,
            cache: self.cache.as_deref(),
            token: self.tokens.token(),
        }
        .execute(request)
        .await
    }

    pub fn token(&self) -> &Token {
        self.tokens.token()
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn cache(&self) -> Option<&Arc<dyn CacheStore>> {
        self.cache.as_ref()
    }

    pub fn is_cache_set(&self) -> bool {
        self.cache.is_some()
    }

    /// Install a cache store. `ttl` replaces the response TTL when given.
    pub fn set_cache(&mut self, cache: Arc<dyn CacheStore>, ttl: Option<u64>) -> &mut Self {
        self.cache = Some(cache);
        if let Some(ttl) = ttl {
            self.settings.response_ttl_secs = ttl;
        }
        self
    }

    pub fn disable_cache(&mut self) -> &mut Self {
        self.cache = None;
        self
    }

    pub fn cache_prefix(&self) -> &str {
        &self.settings.cache_prefix
    }

    pub fn set_cache_prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.settings.cache_prefix = prefix.into();
        self
    }

    pub fn ttl(&self) -> u64 {
        self.settings.response_ttl_secs
    }

    pub fn set_ttl(&mut self, ttl: u64) -> &mut Self {
        self.settings.response_ttl_secs = ttl;
        self
    }

    pub fn set_debug_on(&mut self) -> &mut Self {
        self.settings.debug = true;
        self
    }

    pub fn set_debug_off(&mut self) -> &mut Self {
        self.settings.debug = false;
        self
    }

    pub fn is_debug_on(&self) -> bool {
        self.settings.debug
    }
}
