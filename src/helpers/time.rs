use chrono::Utc;

pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn expires_at_ms(ttl_seconds: u64) -> i64 {
    let ttl_ms = i64::try_from(ttl_seconds).unwrap_or(i64::MAX / 1000).saturating_mul(1000);
    now_ms().saturating_add(ttl_ms)
}

/// TTL for a freshly issued token: `expires_in` minus the request timeout margin.
/// `None` when nothing positive is left, in which case the token is not cached.
pub fn token_cache_ttl(expires_in: i64, margin_seconds: u64) -> Option<u64> {
    let margin = i64::try_from(margin_seconds).unwrap_or(i64::MAX);
    let ttl = expires_in.saturating_sub(margin);
    if ttl > 0 {
        Some(ttl as u64)
    } else {
        None
    }
}
