use std::io::IsTerminal;

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::settings::{LogFormat, LoggingConfig};

/// Install the global subscriber on stderr. Stdout is left for command output.
///
/// An unparsable level falls back to `info`. Returns false when a subscriber was
/// already installed.
pub fn init_logging(cfg: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_new(&cfg.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let json = (cfg.format == LogFormat::Json).then(|| {
        fmt::layer()
            .json()
            .flatten_event(true)
            .with_timer(UtcTime::rfc_3339())
            .with_writer(std::io::stderr)
            .with_ansi(false)
    });
    let compact = (cfg.format == LogFormat::Compact).then(|| {
        fmt::layer()
            .compact()
            .with_timer(UtcTime::rfc_3339())
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(compact)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn second_install_is_refused() {
        let cfg = LoggingConfig::new("not a level [".to_owned(), LogFormat::Compact);
        init_logging(&cfg);
        assert!(!init_logging(&LoggingConfig::default()));
    }
}
