use crate::api::{Backend, ProvisioningBackend};
use crate::config::{self, types::Config};
use colored::Colorize;

/// `provision-ctl health`
pub async fn handle_health(config: &Config, json: bool) -> crate::Result<()> {
    let backend = Backend::from_config(config)?;
    let health = backend.health().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&health)?);
    } else {
        let target = if backend.is_simulated() {
            "simulated backend".to_string()
        } else {
            config.api.base_url.clone()
        };
        println!(
            "{} {} is {}{}",
            "✓".green(),
            target.bold(),
            health.status.green(),
            health
                .timestamp
                .map(|t| format!(" ({})", t).dimmed().to_string())
                .unwrap_or_default()
        );
    }
    Ok(())
}

/// `provision-ctl config`
pub fn handle_config(config: &Config, save: bool, json: bool) -> crate::Result<()> {
    if save {
        config::save_global_config(config)?;
        if let Some(path) = config::global_config_path() {
            log::info!("Saved configuration to {}", path.display());
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
    } else {
        let rendered = toml::to_string_pretty(config)
            .map_err(|e| crate::error::ConfigError::ParsingFailed(e.to_string()))?;
        println!("{}", rendered);
    }
    Ok(())
}
