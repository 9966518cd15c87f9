//! Credential entry form for the selected provider

use super::is_cancel;
use crate::catalog;
use crate::model::{
    AwsCredentials, AzureCredentials, CloudProvider, GcpCredentials, ProviderCredentials,
};
use crate::wizard::render::{
    display_banner, display_step_header, status_indicator, wizard_render_config,
};
use crate::wizard::state::{ValidationState, WizardState, WizardStep};
use colored::Colorize;
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};
use std::path::Path;

/// Result of the credentials form
#[derive(Debug, Clone)]
pub enum CredentialsFormResult {
    /// User completed the form
    Completed(ProviderCredentials),
    /// Re-check the stored credentials without leaving the step
    Validate,
    /// Advance with the stored credentials (validated on the way)
    Continue,
    /// User wants to go back
    Back,
    /// User cancelled the wizard
    Cancelled,
}

fn text(label: &str, current: &str, help: &str) -> Result<String, InquireError> {
    Text::new(label)
        .with_render_config(wizard_render_config())
        .with_initial_value(current)
        .with_help_message(help)
        .prompt()
        .map(|v| v.trim().to_string())
}

/// Masked entry; an empty answer keeps the stored secret
fn secret(label: &str, current: &str) -> Result<String, InquireError> {
    let help = if current.is_empty() {
        "Input is masked"
    } else {
        "Input is masked, leave empty to keep the current value"
    };
    let entered = Password::new(label)
        .with_render_config(wizard_render_config())
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message(help)
        .prompt()?;
    Ok(if entered.is_empty() {
        current.to_string()
    } else {
        entered
    })
}

fn collect_aws(current: &AwsCredentials) -> Result<AwsCredentials, InquireError> {
    let access_key = text("Access key ID:", &current.access_key, "e.g. AKIA...")?;
    let secret_key = secret("Secret access key:", &current.secret_key)?;

    let regions = catalog::regions_for(CloudProvider::Aws);
    let options: Vec<String> = regions
        .iter()
        .map(|r| format!("{:<16} {}", r.id, r.name.dimmed()))
        .collect();
    let start = regions
        .iter()
        .position(|r| r.id == current.region)
        .unwrap_or(0);
    let region = Select::new("Region:", options)
        .with_render_config(wizard_render_config())
        .with_starting_cursor(start)
        .raw_prompt()?;

    Ok(AwsCredentials {
        access_key,
        secret_key,
        region: regions[region.index].id.to_string(),
    })
}

fn collect_azure(current: &AzureCredentials) -> Result<AzureCredentials, InquireError> {
    Ok(AzureCredentials {
        subscription_id: text("Subscription ID:", &current.subscription_id, "GUID of the subscription")?,
        client_id: text("Client ID:", &current.client_id, "Service principal application ID")?,
        client_secret: secret("Client secret:", &current.client_secret)?,
        tenant_id: text("Tenant ID:", &current.tenant_id, "Directory (tenant) ID")?,
    })
}

fn collect_gcp(current: &GcpCredentials) -> Result<GcpCredentials, InquireError> {
    let project_id = text("Project ID:", &current.project_id, "e.g. my-project-123456")?;
    let key_file = text(
        "Service account key file:",
        current.key_file.as_deref().unwrap_or(""),
        "Path to the JSON key downloaded from IAM",
    )?;
    if !key_file.is_empty() && !Path::new(&key_file).is_file() {
        println!(
            "  {} {}",
            "⚠".yellow(),
            format!("{} does not exist on this machine", key_file).yellow()
        );
    }
    Ok(GcpCredentials {
        project_id,
        key_file: (!key_file.is_empty()).then_some(key_file),
    })
}

fn validation_line(validation: &ValidationState) -> String {
    match validation {
        ValidationState::Unchecked => "not validated".dimmed().to_string(),
        ValidationState::Pending => "validating…".yellow().to_string(),
        ValidationState::Valid(message) => format!(
            "{} {}",
            status_indicator(true),
            message.as_deref().unwrap_or("valid").green()
        ),
        ValidationState::Invalid(message) => {
            format!("{} {}", status_indicator(false), message.red())
        }
    }
}

const ENTER: &str = "Enter credentials";
const VALIDATE: &str = "Validate";
const CONTINUE: &str = "Continue";
const BACK: &str = "Back";
const CANCEL: &str = "Cancel";

/// Credentials step for the selected provider, prefilled with what was entered before
pub fn collect_credentials(state: &WizardState) -> CredentialsFormResult {
    let Some(current) = state.config().active_credentials() else {
        return CredentialsFormResult::Back;
    };

    display_step_header(WizardStep::Credentials);
    if let Some(banner) = state.banner() {
        display_banner(banner);
    }
    println!(
        "  {} Provider: {}",
        "│".dimmed(),
        current.provider().display_name().cyan()
    );
    println!(
        "  {} Status:   {}\n",
        "│".dimmed(),
        validation_line(state.validation())
    );

    let mut options = vec![ENTER];
    if current.is_complete() {
        options.extend([VALIDATE, CONTINUE]);
    }
    options.extend([BACK, CANCEL]);

    let choice = Select::new("Credentials:", options)
        .with_render_config(wizard_render_config())
        .prompt();
    match choice {
        Ok(ENTER) => {}
        Ok(VALIDATE) => return CredentialsFormResult::Validate,
        Ok(CONTINUE) => return CredentialsFormResult::Continue,
        Ok(BACK) => return CredentialsFormResult::Back,
        Ok(_) => return CredentialsFormResult::Cancelled,
        Err(e) if is_cancel(&e) => return CredentialsFormResult::Cancelled,
        Err(e) => {
            log::warn!("Credentials prompt failed: {}", e);
            return CredentialsFormResult::Cancelled;
        }
    }

    let collected = match &current {
        ProviderCredentials::Aws(c) => collect_aws(c).map(ProviderCredentials::Aws),
        ProviderCredentials::Azure(c) => collect_azure(c).map(ProviderCredentials::Azure),
        ProviderCredentials::Gcp(c) => collect_gcp(c).map(ProviderCredentials::Gcp),
    };

    match collected {
        Ok(credentials) => CredentialsFormResult::Completed(credentials),
        Err(e) if is_cancel(&e) => CredentialsFormResult::Cancelled,
        Err(e) => {
            log::warn!("Credentials prompt failed: {}", e);
            CredentialsFormResult::Cancelled
        }
    }
}
