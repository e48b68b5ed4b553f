use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::auth::oauth2::authenticate;
use crate::auth::token::Token;
use crate::cache::store::CacheStore;
use crate::config::credentials::Credentials;
use crate::error::Result;
use crate::helpers::time::token_cache_ttl;
use crate::utils::constants::TOKEN_CACHE_KEY;

/// Owns the credentials and the current bearer token.
///
/// The token is obtained once at start (from the cache when possible) and only
/// replaced by an explicit `refresh`. Expiry is left to the cache TTL.
#[derive(Debug, Clone)]
pub struct TokenManager {
    credentials: Credentials,
    auth_url: String,
    margin_seconds: u64,
    token: Token,
}

impl TokenManager {
    pub async fn start(
        client: &Client,
        credentials: Credentials,
        auth_url: String,
        margin_seconds: u64,
        cache: Option<&dyn CacheStore>,
    ) -> Result<Self> {
        if let Some(cache) = cache {
            if let Some(token) = restore_token(cache).await? {
                info!("access token restored from cache");
                return Ok(Self { credentials, auth_url, margin_seconds, token });
            }
        }

        let token = authenticate(client, &auth_url, &credentials).await?;
        store_token(cache, &token, margin_seconds).await?;
        Ok(Self { credentials, auth_url, margin_seconds, token })
    }

    /// Request a new token and store it under the same rules as at start.
    pub async fn refresh(&mut self, client: &Client, cache: Option<&dyn CacheStore>) -> Result<&Token> {
        let token = authenticate(client, &self.auth_url, &self.credentials).await?;
        store_token(cache, &token, self.margin_seconds).await?;
        self.token = token;
        Ok(&self.token)
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

async fn restore_token(cache: &dyn CacheStore) -> Result<Option<Token>> {
    if !cache.has(TOKEN_CACHE_KEY).await? {
        return Ok(None);
    }
    match cache.get(TOKEN_CACHE_KEY).await? {
        Some(Value::String(value)) => Ok(Some(Token::new(value, None))),
        Some(other) => {
            warn!(kind = ?other, "cached token is not a string, ignoring it");
            Ok(None)
        }
        None => Ok(None),
    }
}

async fn store_token(cache: Option<&dyn CacheStore>, token: &Token, margin_seconds: u64) -> Result<()> {
    let (Some(cache), Some(expires_in)) = (cache, token.expires_in) else {
        debug!("token kept in memory only");
        return Ok(());
    };

    match token_cache_ttl(expires_in, margin_seconds) {
        Some(ttl) => {
            cache.set(TOKEN_CACHE_KEY, Value::String(token.value.clone()), ttl).await?;
            debug!(ttl, "access token cached");
        }
        None => warn!(expires_in, margin_seconds, "token lifetime shorter than margin, not caching it"),
    }
    Ok(())
}
