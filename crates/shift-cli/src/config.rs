use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use shift_engine::RosterConfig;
use tracing::debug;

/// Top-level shiftcal configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ShiftcalConfig {
    /// Directory holding the vacation file.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Names and hour labels for the two roles.
    #[serde(default)]
    pub roster: RosterConfig,
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("shiftcal").join("config.toml"))
}

/// Load the config file.
///
/// An explicit path must exist. The default location is optional and falls
/// back to built-in defaults when absent.
pub fn load(explicit: Option<&Path>) -> Result<ShiftcalConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(ShiftcalConfig::default()),
        },
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config: ShiftcalConfig = toml::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Where vacations are stored: `--data-dir`, then the config, then the
/// platform data directory.
pub fn resolve_data_dir(flag: Option<PathBuf>, config: &ShiftcalConfig) -> Result<PathBuf> {
    if let Some(dir) = flag.or_else(|| config.data_dir.clone()) {
        return Ok(dir);
    }
    dirs::data_dir()
        .map(|p| p.join("shiftcal"))
        .context("no data directory available; pass --data-dir")
}
