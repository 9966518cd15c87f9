//! Monitor step: live progress until the deployment settles

use super::is_cancel;
use crate::api::ProvisioningBackend;
use crate::model::DeploymentStatus;
use crate::wizard::controller::{MonitorEvent, WizardController};
use crate::wizard::render::{
    deployment_progress_bar, display_deployment_result, display_step_header, update_progress_bar,
    wizard_render_config,
};
use crate::wizard::state::WizardStep;
use colored::Colorize;
use inquire::Select;

#[derive(Debug, Clone)]
pub enum MonitorResult {
    /// Terminal status reached and the user asked for a fresh wizard
    StartOver,
    /// Leave the wizard with the last known status
    Exit(Option<DeploymentStatus>),
}

pub async fn monitor_deployment<B: ProvisioningBackend>(
    controller: &mut WizardController<B>,
) -> MonitorResult {
    display_step_header(WizardStep::Monitor);
    let deployment_id = controller
        .state()
        .deployment_id()
        .unwrap_or_default()
        .to_string();
    println!("  {} Deployment ID: {}\n", "│".dimmed(), deployment_id.bold());

    let bar = deployment_progress_bar(&deployment_id);
    let interrupted = tokio::select! {
        _ = controller.monitor(|event| match event {
            MonitorEvent::Status(status) => update_progress_bar(&bar, status),
            MonitorEvent::PollFailed(e) => bar.println(format!("{} {}", "⚠".yellow(), e)),
        }) => false,
        _ = tokio::signal::ctrl_c() => true,
    };
    bar.finish_and_clear();
    let last = controller.state().deployment_status().cloned();

    if interrupted {
        controller.stop_polling();
        println!(
            "\n{}",
            "Stopped watching. The deployment keeps running on the backend.".yellow()
        );
        return MonitorResult::Exit(last);
    }

    let Some(status) = last else {
        return MonitorResult::Exit(None);
    };
    display_deployment_result(&status);

    let choice = Select::new("What next?", vec!["Start over", "Exit"])
        .with_render_config(wizard_render_config())
        .prompt();
    match choice {
        Ok("Start over") => MonitorResult::StartOver,
        Ok(_) => MonitorResult::Exit(Some(status)),
        Err(e) => {
            if !is_cancel(&e) {
                log::warn!("Monitor prompt failed: {}", e);
            }
            MonitorResult::Exit(Some(status))
        }
    }
}
