//! Wizard orchestration - ties all steps together

use super::controller::WizardController;
use super::prompts::{
    ArchitectureFormResult, CredentialsFormResult, MonitorResult, ProviderSelectionResult,
    ReviewAction, collect_credentials, edit_architecture, monitor_deployment,
    review_configuration, select_provider,
};
use super::render::{display_banner, spinner};
use super::state::WizardStep;
use crate::api::ProvisioningBackend;
use crate::model::DeploymentStatus;
use colored::Colorize;

/// Result of running the wizard
#[derive(Debug)]
pub enum WizardResult {
    /// A deployment was launched; carries its last known status
    Deployed {
        deployment_id: String,
        status: Option<DeploymentStatus>,
    },
    /// User cancelled the wizard before deploying
    Cancelled,
}

fn print_banner_title() {
    println!();
    println!(
        "{}",
        "═══════════════════════════════════════════════════════════════".bright_cyan()
    );
    println!(
        "{}",
        "                 Multi-Cloud VM Provisioning                   "
            .bright_cyan()
            .bold()
    );
    println!(
        "{}",
        "═══════════════════════════════════════════════════════════════".bright_cyan()
    );
}

async fn advance<B: ProvisioningBackend>(controller: &mut WizardController<B>, busy: &str) {
    let spin = spinner(busy);
    let result = controller.next().await;
    spin.finish_and_clear();
    match result {
        Ok(step) => log::debug!("Advanced to {}", step),
        Err(e) => {
            // credential failures are rendered by the step itself
            if controller.step() != WizardStep::Credentials {
                display_banner(&e);
            }
        }
    }
}

/// Run the interactive wizard until it deploys something or the user quits
pub async fn run_wizard<B: ProvisioningBackend>(
    controller: &mut WizardController<B>,
) -> WizardResult {
    print_banner_title();

    loop {
        match controller.step() {
            WizardStep::ProviderSelect => {
                match select_provider(controller.state().provider()) {
                    ProviderSelectionResult::Selected(provider) => {
                        controller.select_provider(provider).await;
                        advance(controller, "Continuing…").await;
                    }
                    ProviderSelectionResult::Cancelled => return WizardResult::Cancelled,
                }
            }

            WizardStep::Credentials => match collect_credentials(controller.state()) {
                CredentialsFormResult::Completed(credentials) => {
                    controller.set_credentials(credentials);
                    advance(controller, "Validating credentials…").await;
                }
                CredentialsFormResult::Validate => {
                    let spin = spinner("Validating credentials…");
                    controller.validate_credentials().await;
                    spin.finish_and_clear();
                }
                CredentialsFormResult::Continue => {
                    advance(controller, "Validating credentials…").await;
                }
                CredentialsFormResult::Back => {
                    let _ = controller.back();
                }
                CredentialsFormResult::Cancelled => return WizardResult::Cancelled,
            },

            WizardStep::Architecture => match edit_architecture(controller).await {
                ArchitectureFormResult::Completed => advance(controller, "Preparing review…").await,
                ArchitectureFormResult::Back => {
                    let _ = controller.back();
                }
                ArchitectureFormResult::Cancelled => return WizardResult::Cancelled,
            },

            WizardStep::Review => match review_configuration(controller.state()) {
                ReviewAction::Deploy => {
                    let spin = spinner("Launching deployment…");
                    let launched = controller.deploy().await;
                    spin.finish_and_clear();
                    match launched {
                        Ok(id) => println!("{} Deployment {} started", "✓".green(), id.bold()),
                        // shown again as the review banner
                        Err(e) => log::debug!("{}", e),
                    }
                }
                ReviewAction::Back => {
                    let _ = controller.back();
                }
                ReviewAction::StartOver => controller.reset(),
                ReviewAction::Cancelled => return WizardResult::Cancelled,
            },

            WizardStep::Monitor => match monitor_deployment(controller).await {
                MonitorResult::StartOver => controller.reset(),
                MonitorResult::Exit(status) => {
                    let deployment_id = controller
                        .state()
                        .deployment_id()
                        .unwrap_or_default()
                        .to_string();
                    controller.stop_polling();
                    return WizardResult::Deployed {
                        deployment_id,
                        status,
                    };
                }
            },
        }
    }
}
