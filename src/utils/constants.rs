//! Shared constants and defaults

/// Cache key of the auth token. Not prefixed, so every client sharing a cache sees it.
pub const TOKEN_CACHE_KEY: &str = "NZ_POST_AUTH_TOKEN";

pub const NZPOST_AUTH_URL: &str = "https://oauth.nzpost.co.nz/as/token.oauth2";
pub const NZPOST_API_URL: &str = "https://api.nzpost.co.nz/addresschecker/1.0/";

pub const DEFAULT_CACHE_PREFIX: &str = "nz_post_client_";
pub const DEFAULT_RESPONSE_TTL_SECS: u64 = 86400;
/// Only used as the safety margin subtracted from the token lifetime.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

pub const DEFAULT_MAX: u32 = 10;
pub const DEFAULT_ORDER_ROADS_FIRST: &str = "N";
pub const MAX_ADDRESS_LINES: usize = 5;

pub const AUTH_ERROR_NO_TOKEN: &str = "could not obtain access token";
