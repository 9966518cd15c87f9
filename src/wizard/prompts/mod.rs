//! Interactive prompts, one module per wizard step

mod architecture_form;
mod credentials_form;
mod monitor;
mod provider_selection;
mod review;

pub use architecture_form::{ArchitectureFormResult, edit_architecture};
pub use credentials_form::{CredentialsFormResult, collect_credentials};
pub use monitor::{MonitorResult, monitor_deployment};
pub use provider_selection::{ProviderSelectionResult, provider_option_label, select_provider};
pub use review::{ReviewAction, review_configuration};

use inquire::InquireError;

/// Esc or Ctrl-C on a prompt
pub(crate) fn is_cancel(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}
