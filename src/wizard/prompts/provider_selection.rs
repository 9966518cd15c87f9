//! Provider selection step

use crate::catalog;
use crate::model::CloudProvider;
use crate::wizard::render::{display_step_header, wizard_render_config};
use crate::wizard::state::WizardStep;
use colored::Colorize;
use inquire::{InquireError, Select};

/// Result of provider selection step
#[derive(Debug, Clone)]
pub enum ProviderSelectionResult {
    /// User selected a provider
    Selected(CloudProvider),
    /// User cancelled the wizard
    Cancelled,
}

/// Menu line for a provider, e.g. "AWS  Amazon Web Services · from $8.5/month"
pub fn provider_option_label(provider: CloudProvider) -> String {
    let cheapest = catalog::instance_types_for(provider)
        .iter()
        .map(|t| t.monthly_price)
        .fold(f64::INFINITY, f64::min);
    format!(
        "{:<6} {}  {}",
        provider.as_str().to_uppercase(),
        provider.display_name(),
        format!("from ${}/month", cheapest).dimmed()
    )
}

/// Prompt for a provider, preselecting the current one
pub fn select_provider(current: Option<CloudProvider>) -> ProviderSelectionResult {
    display_step_header(WizardStep::ProviderSelect);

    let providers = CloudProvider::all();
    let options: Vec<String> = providers.iter().map(|p| provider_option_label(*p)).collect();
    let start = current
        .and_then(|c| providers.iter().position(|p| *p == c))
        .unwrap_or(0);

    let selection = Select::new("Select a provider:", options)
        .with_render_config(wizard_render_config())
        .with_help_message("↑↓ to move, Enter to select, Esc to cancel")
        .with_starting_cursor(start)
        .raw_prompt();

    match selection {
        Ok(answer) => {
            let provider = providers[answer.index];
            println!("\n{} Selected: {}", "✓".green(), provider.display_name());
            ProviderSelectionResult::Selected(provider)
        }
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
            println!("\n{}", "Wizard cancelled.".dimmed());
            ProviderSelectionResult::Cancelled
        }
        Err(e) => {
            log::warn!("Provider prompt failed: {}", e);
            ProviderSelectionResult::Cancelled
        }
    }
}
