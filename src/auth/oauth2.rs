use http::StatusCode;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::auth::token::Token;
use crate::config::credentials::Credentials;
use crate::error::{ClientError, Result};
use crate::utils::constants::AUTH_ERROR_NO_TOKEN;

/// Client-credentials grant against `auth_url`.
///
/// Any transport failure or non-200 answer is an `Auth` error carrying the
/// transport message or the raw response body.
pub async fn authenticate(client: &Client, auth_url: &str, credentials: &Credentials) -> Result<Token> {
    info!(client_id = credentials.client_id(), "requesting access token");

    let response = client
        .post(auth_url)
        .form(&credentials.grant_form())
        .send()
        .await
        .map_err(|e| ClientError::Auth(e.to_string()))?;

    let status = response.status();
    let body = response.text().await.map_err(|e| ClientError::Auth(e.to_string()))?;

    if status != StatusCode::OK {
        warn!(status = status.as_u16(), "token request rejected");
        return Err(ClientError::Auth(body));
    }

    parse_token_response(&body)
}

/// Expects `{"access_token": string, "expires_in"?: number | numeric string}`.
fn parse_token_response(body: &str) -> Result<Token> {
    let json: Value = serde_json::from_str(body).map_err(|e| {
        warn!("Token response is not valid JSON: {}", e);
        ClientError::Auth(AUTH_ERROR_NO_TOKEN.to_owned())
    })?;

    let access_token = json["access_token"]
        .as_str()
        .ok_or_else(|| ClientError::Auth(AUTH_ERROR_NO_TOKEN.to_owned()))?
        .to_owned();
    let expires_in = parse_expires_in(&json["expires_in"]);

    debug!(expires_in = ?expires_in, "access token parsed");
    Ok(Token::new(access_token, expires_in))
}

/// Seconds as an integer, a float (truncated) or a numeric string.
fn parse_expires_in(value: &Value) -> Option<i64> {
    let seconds = match value {
        Value::Null => return None,
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        _ => None,
    };

    if seconds.is_none() {
        warn!(expires_in = %value, "ignoring unusable token expiry");
    }
    seconds
}
