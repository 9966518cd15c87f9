use crate::api::Backend;
use crate::config::types::Config;
use crate::wizard::{WizardController, WizardResult, run_wizard};
use colored::Colorize;
use std::sync::Arc;

/// `provision-ctl wizard`
pub async fn handle_wizard(config: &Config, json: bool) -> crate::Result<()> {
    let backend = Backend::from_config(config)?;
    if backend.is_simulated() {
        println!(
            "{}",
            "Simulation mode: nothing is provisioned, deployments finish on a timer.".yellow()
        );
    }

    let mut controller = WizardController::new(Arc::new(backend), config.polling.interval());
    let result = run_wizard(&mut controller).await;

    match result {
        WizardResult::Deployed {
            deployment_id,
            status,
        } => {
            if json {
                let out = serde_json::json!({
                    "deployment_id": deployment_id,
                    "status": status,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else if status.as_ref().is_none_or(|s| !s.is_terminal()) {
                println!(
                    "Follow it with {}",
                    format!("provision-ctl status {} --watch", deployment_id).cyan()
                );
            }
        }
        WizardResult::Cancelled => log::info!("Wizard cancelled"),
    }
    Ok(())
}
