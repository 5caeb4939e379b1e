use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::models::Config;

/// Read the config file, falling back to defaults when it does not exist.
/// `base_url` (from `--base-url` / `BOOKING_API_URL`) wins over the file.
pub fn load_config(path: &Path, base_url: Option<&str>) -> Result<Config> {
    let mut config: Config = if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?
    } else {
        debug!("No config at {}, using defaults", path.display());
        Config::default()
    };

    if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
        config.service.base_url = url.trim().to_string();
    }
    config.service.base_url = config.service.base_url.trim_end_matches('/').to_string();
    Ok(config)
}
