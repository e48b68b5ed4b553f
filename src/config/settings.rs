use serde::Deserialize;
use tracing::Level;

use crate::utils::constants::{
    DEFAULT_CACHE_PREFIX, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RESPONSE_TTL_SECS,
    NZPOST_API_URL, NZPOST_AUTH_URL,
};

/// ================================
/// Config file layout
/// ================================
#[derive(Debug, Deserialize, Clone, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub client: ClientSettings,
    pub logging: Option<LoggingConfig>,
}

/// ================================
/// Client settings
/// ================================
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientSettings {
    pub auth_url: String,
    /// Base of the address checker endpoints, with trailing slash
    pub api_url: String,
    pub cache_prefix: String,
    /// TTL of cached address responses. The token has its own TTL.
    pub response_ttl_secs: u64,
    /// Subtracted from `expires_in` before the token goes to the cache.
    /// Not enforced as a deadline.
    pub request_timeout_secs: u64,
    /// Verbose transport logging
    pub debug: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            auth_url: NZPOST_AUTH_URL.to_owned(),
            api_url: NZPOST_API_URL.to_owned(),
            cache_prefix: DEFAULT_CACHE_PREFIX.to_owned(),
            response_ttl_secs: DEFAULT_RESPONSE_TTL_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            debug: false,
        }
    }
}

impl ClientSettings {
    /// Settings pointing at another host, e.g. a mock server. Paths stay the same.
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            auth_url: format!("{}/as/token.oauth2", base),
            api_url: format!("{}/addresschecker/1.0/", base),
            ..Self::default()
        }
    }
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }

    /// A level given on the command line beats the file. Without a file section
    /// the format comes from `LOG_FORMAT`.
    pub fn effective(file: Option<&LoggingConfig>, cli_level: Option<Level>) -> Self {
        let mut cfg = file.cloned().unwrap_or_else(|| Self {
            format: LogFormat::from_env(),
            ..Self::default()
        });
        if let Some(level) = cli_level {
            cfg.level = level.as_str().to_lowercase();
        }
        cfg
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), format: LogFormat::Compact }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

impl LogFormat {
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT")
            .unwrap_or_else(|_| "compact".to_string())
            .to_lowercase()
            .as_str()
        {
            "json" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_match_remote_service() {
        let settings = ClientSettings::default();
        assert_eq!(settings.auth_url, "https://oauth.nzpost.co.nz/as/token.oauth2");
        assert_eq!(settings.api_url, "https://api.nzpost.co.nz/addresschecker/1.0/");
        assert_eq!(settings.cache_prefix, "nz_post_client_");
        assert_eq!(settings.response_ttl_secs, 86400);
        assert_eq!(settings.request_timeout_secs, 120);
        assert!(!settings.debug);
    }

    #[test]
    fn base_url_keeps_endpoint_paths() {
        let settings = ClientSettings::with_base_url("http://127.0.0.1:8080/");
        assert_eq!(settings.auth_url, "http://127.0.0.1:8080/as/token.oauth2");
        assert_eq!(settings.api_url, "http://127.0.0.1:8080/addresschecker/1.0/");
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let cfg: FileConfig = serde_yaml::from_str(
            "client:\n  cache_prefix: test_\n  debug: true\nlogging:\n  level: debug\n  format: json\n",
        )
        .unwrap();
        assert_eq!(cfg.client.cache_prefix, "test_");
        assert!(cfg.client.debug);
        assert_eq!(cfg.client.response_ttl_secs, 86400);
        let logging = cfg.logging.unwrap();
        assert_eq!(logging.level, "debug");
        assert_eq!(logging.format, LogFormat::Json);
    }

    #[test]
    fn cli_level_overrides_file_level() {
        let file = LoggingConfig::new("warn".to_owned(), LogFormat::Json);
        let cfg = LoggingConfig::effective(Some(&file), Some(Level::DEBUG));
        assert_eq!(cfg.level, "debug");
        assert_eq!(cfg.format, LogFormat::Json);
    }

    #[test]
    fn file_level_used_without_cli_level() {
        let file = LoggingConfig::new("error".to_owned(), LogFormat::Compact);
        let cfg = LoggingConfig::effective(Some(&file), None);
        assert_eq!(cfg.level, "error");
        assert_eq!(cfg.format, LogFormat::Compact);
    }

    #[test]
    fn logging_defaults_to_info() {
        assert_eq!(LoggingConfig::effective(None, None).level, "info");
        assert_eq!(LoggingConfig::effective(None, Some(Level::TRACE)).level, "trace");
    }

    #[test]
    fn cli_level_strings_parse_as_tracing_levels() {
        assert_eq!("warn".parse::<Level>().unwrap(), Level::WARN);
        assert_eq!("DEBUG".parse::<Level>().unwrap(), Level::DEBUG);
        assert!("loud".parse::<Level>().is_err());
    }
}
