//! Review step: summary, estimate, and the deploy action

use super::is_cancel;
use crate::catalog;
use crate::model::{ProviderCredentials, ProvisioningConfig};
use crate::wizard::render::{
    display_banner, display_estimate, display_field, display_step_header, wizard_render_config,
};
use crate::wizard::state::{WizardState, WizardStep};
use colored::Colorize;
use inquire::Select;

/// What the user chose on the review step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Deploy,
    Back,
    StartOver,
    Cancelled,
}

const DEPLOY: &str = "Deploy";
const BACK: &str = "Back";
const START_OVER: &str = "Start over";
const CANCEL: &str = "Cancel";

/// Rows shown in the summary, in display order
pub(crate) fn summary_rows(config: &ProvisioningConfig) -> Vec<(&'static str, String)> {
    let arch = &config.architecture;
    let mut rows = Vec::new();
    if let Some(provider) = config.provider {
        rows.push(("Provider", provider.display_name().to_string()));
        if let Some(ProviderCredentials::Aws(aws)) = config.active_credentials() {
            rows.push(("Region", aws.region));
        }
        let instance = catalog::find_instance_type(provider, &arch.instance_type)
            .map(|t| t.label())
            .unwrap_or_else(|| arch.instance_type.clone());
        rows.push(("Instance type", instance));
    }
    rows.push(("VM count", arch.vm_count.to_string()));
    let os = catalog::find_os(&arch.os)
        .map(|os| os.name.to_string())
        .unwrap_or_else(|| arch.os.clone());
    rows.push(("OS", os));
    rows.push(("Storage", format!("{} GB per VM", arch.storage_gb)));
    rows.push(("Security group", arch.security_group.label().to_string()));
    rows
}

pub fn review_configuration(state: &WizardState) -> ReviewAction {
    display_step_header(WizardStep::Review);
    if let Some(banner) = state.banner() {
        display_banner(banner);
    }

    for (label, value) in summary_rows(state.config()) {
        display_field(label, &value);
    }
    println!();
    display_estimate(state.estimate(), state.is_estimating());

    let options = vec![DEPLOY, BACK, START_OVER, CANCEL];
    let choice = Select::new("Ready to deploy?", options)
        .with_render_config(wizard_render_config())
        .with_help_message("Deploy launches real infrastructure")
        .prompt();

    match choice {
        Ok(DEPLOY) => ReviewAction::Deploy,
        Ok(BACK) => ReviewAction::Back,
        Ok(START_OVER) => ReviewAction::StartOver,
        Ok(_) => ReviewAction::Cancelled,
        Err(e) => {
            if !is_cancel(&e) {
                log::warn!("Review prompt failed: {}", e);
            }
            println!("\n{}", "Wizard cancelled.".dimmed());
            ReviewAction::Cancelled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Architecture, CloudProvider};

    #[test]
    fn test_summary_rows_for_aws() {
        let config = ProvisioningConfig {
            provider: Some(CloudProvider::Aws),
            architecture: Architecture {
                vm_count: 2,
                ..Default::default()
            },
            ..Default::default()
        };
        let rows = summary_rows(&config);
        assert_eq!(rows[0], ("Provider", "Amazon Web Services".to_string()));
        assert_eq!(rows[1], ("Region", "us-east-1".to_string()));
        assert!(rows.iter().any(|(l, v)| *l == "VM count" && v == "2"));
        assert!(rows.iter().any(|(l, v)| *l == "OS" && v == "Ubuntu 20.04 LTS"));
    }
}
