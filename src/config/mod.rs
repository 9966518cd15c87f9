pub mod types;

use crate::error::{ConfigError, Result};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = ".provisioner.toml";

const ENV_API_URL: &str = "PROVISIONER_API_URL";
const ENV_SIMULATE: &str = "PROVISIONER_SIMULATE";

/// Get the global config file path (~/.provisioner.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (./.provisioner.toml)
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}

/// Load configuration from file or use defaults.
///
/// An explicit path must exist and parse. Otherwise the local file is tried first,
/// then the global one. Environment overrides are applied last.
pub fn load_config(explicit: Option<&Path>) -> Result<types::Config> {
    let mut config = match explicit {
        Some(path) => read_config_file(path)?,
        None => discover_config()?,
    };

    let api_url = std::env::var(ENV_API_URL).ok().filter(|v| !v.trim().is_empty());
    let simulate = std::env::var(ENV_SIMULATE)
        .ok()
        .map(|v| matches!(v.trim(), "1" | "true" | "yes"));
    apply_overrides(&mut config, api_url, simulate);

    validate(&config)?;
    Ok(config)
}

fn discover_config() -> Result<types::Config> {
    if let Ok(cwd) = std::env::current_dir() {
        let local = local_config_path(&cwd);
        if local.exists() {
            log::debug!("Using local config {}", local.display());
            return read_config_file(&local);
        }
    }

    if let Some(global) = global_config_path() {
        if global.exists() {
            log::debug!("Using global config {}", global.display());
            return read_config_file(&global);
        }
    }

    Ok(types::Config::default())
}

/// Parse a single TOML config file
pub fn read_config_file(path: &Path) -> Result<types::Config> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
        path: path.display().to_string(),
        source,
    })?;
    let config = toml::from_str(&content).map_err(|e| ConfigError::ParsingFailed(e.to_string()))?;
    Ok(config)
}

/// Apply environment or command-line overrides on top of the file config
pub fn apply_overrides(
    config: &mut types::Config,
    api_url: Option<String>,
    simulate: Option<bool>,
) {
    if let Some(url) = api_url {
        config.api.base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(enabled) = simulate {
        config.simulation.enabled = enabled;
    }
}

pub fn validate(config: &types::Config) -> Result<()> {
    if !(1..=30).contains(&config.polling.interval_secs) {
        return Err(ConfigError::InvalidValue {
            key: "polling.interval_secs",
            reason: format!("{} is outside 1..=30", config.polling.interval_secs),
        }
        .into());
    }
    if config.api.timeout_secs == 0 {
        return Err(ConfigError::InvalidValue {
            key: "api.timeout_secs",
            reason: "must be greater than zero".to_string(),
        }
        .into());
    }
    if config.api.base_url.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            key: "api.base_url",
            reason: "must not be empty".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Save configuration to the global config file
pub fn save_global_config(config: &types::Config) -> Result<()> {
    if let Some(path) = global_config_path() {
        let content =
            toml::to_string_pretty(config).map_err(|e| ConfigError::ParsingFailed(e.to_string()))?;
        fs::write(&path, content)?;
    }
    Ok(())
}
