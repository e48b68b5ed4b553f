use crate::config::settings::FileConfig;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

/// Load and validate config from YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("cannot read config file {}", path.display()))?;
    let config: FileConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("invalid config format in {}", path.display()))?;

    for (name, url) in [("auth_url", &config.client.auth_url), ("api_url", &config.client.api_url)] {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            bail!("'{}' must be an http(s) URL, got '{}'", name, url);
        }
    }
    if !config.client.api_url.ends_with('/') {
        bail!("'api_url' must end with '/', got '{}'", config.client.api_url);
    }

    Ok(config)
}
