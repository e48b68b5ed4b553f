use thiserror::Error;

use crate::cache::store::CacheError;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Every failure a client operation can surface. Nothing is retried or swallowed.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Token endpoint unreachable, non-200, or no `access_token` in the answer.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Address API answered with anything but 200.
    #[error("{}", describe_status(*.code))]
    Api { code: u16 },

    /// 200 answer that is not JSON or lacks the expected field.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("cache error: {0}")]
    Cache(#[from] CacheError),
}

impl ClientError {
    /// HTTP status of an `Api` error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Api { code } => Some(*code),
            _ => None,
        }
    }
}

pub fn describe_status(code: u16) -> String {
    match code {
        400 => "400: Bad request".to_owned(),
        401 => "401: User not authenticated".to_owned(),
        403 => "403: Bad OAuth request".to_owned(),
        404 => "404: Not found".to_owned(),
        other => format!("{}: API error.", other),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn api_error_messages_follow_status_table() {
        assert_eq!(ClientError::Api { code: 400 }.to_string(), "400: Bad request");
        assert_eq!(ClientError::Api { code: 401 }.to_string(), "401: User not authenticated");
        assert_eq!(ClientError::Api { code: 403 }.to_string(), "403: Bad OAuth request");
        assert_eq!(ClientError::Api { code: 404 }.to_string(), "404: Not found");
        assert_eq!(ClientError::Api { code: 500 }.to_string(), "500: API error.");
        assert_eq!(ClientError::Api { code: 429 }.to_string(), "429: API error.");
    }

    #[test]
    fn describe_status_takes_plain_codes() {
        let code: u16 = 418;
        assert_eq!(describe_status(code), "418: API error.");
        assert_eq!(describe_status(404), "404: Not found");
    }

    #[test]
    fn status_code_only_for_api_errors() {
        assert_eq!(ClientError::Api { code: 404 }.status_code(), Some(404));
        assert_eq!(ClientError::Auth("nope".into()).status_code(), None);
    }
}
