//! Wizard state container and its pure transitions
//!
//! Nothing in here performs I/O. Transitions that require a backend call hand
//! out a [`Ticket`]; the caller performs the call and feeds the outcome back
//! through the matching `finish_*` method, which drops it if a newer request
//! was issued meanwhile or the wizard moved on.

use crate::api::{CredentialCheck, DeployResponse};
use crate::catalog;
use crate::error::WizardError;
use crate::model::{
    Architecture, CloudProvider, CostEstimate, DeploymentStatus, ProviderCredentials,
    ProvisioningConfig, SecurityGroup,
};
use std::fmt;

/// Wizard steps in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum WizardStep {
    #[default]
    ProviderSelect,
    Credentials,
    Architecture,
    Review,
    Monitor,
}

impl WizardStep {
    pub fn all() -> &'static [WizardStep] {
        &[
            WizardStep::ProviderSelect,
            WizardStep::Credentials,
            WizardStep::Architecture,
            WizardStep::Review,
            WizardStep::Monitor,
        ]
    }

    /// 1-based position shown in step headers
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::ProviderSelect => 1,
            WizardStep::Credentials => 2,
            WizardStep::Architecture => 3,
            WizardStep::Review => 4,
            WizardStep::Monitor => 5,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::ProviderSelect => "Select Provider",
            WizardStep::Credentials => "Credentials",
            WizardStep::Architecture => "Architecture",
            WizardStep::Review => "Review",
            WizardStep::Monitor => "Deploy",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WizardStep::ProviderSelect => "Choose the cloud provider to provision virtual machines on.",
            WizardStep::Credentials => {
                "Enter credentials for the selected provider. They are validated before you can continue."
            }
            WizardStep::Architecture => {
                "Pick VM count, instance type, operating system, storage and firewall preset. The monthly estimate updates as you go."
            }
            WizardStep::Review => "Check the configuration and estimated cost, then deploy.",
            WizardStep::Monitor => "Track the deployment until it completes or fails.",
        }
    }

    fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::ProviderSelect => Some(WizardStep::Credentials),
            WizardStep::Credentials => Some(WizardStep::Architecture),
            WizardStep::Architecture => Some(WizardStep::Review),
            WizardStep::Review => Some(WizardStep::Monitor),
            WizardStep::Monitor => None,
        }
    }

    fn prev(self) -> Option<WizardStep> {
        match self {
            WizardStep::ProviderSelect | WizardStep::Monitor => None,
            WizardStep::Credentials => Some(WizardStep::ProviderSelect),
            WizardStep::Architecture => Some(WizardStep::Credentials),
            WizardStep::Review => Some(WizardStep::Architecture),
        }
    }

    /// Steps on which a fresh estimate is shown
    pub fn shows_estimate(&self) -> bool {
        matches!(self, WizardStep::Architecture | WizardStep::Review)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Outcome of the most recent credential check for the selected provider
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidationState {
    #[default]
    Unchecked,
    Pending,
    Valid(Option<String>),
    Invalid(String),
}

impl ValidationState {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationState::Valid(_))
    }
}

/// Kind of request a ticket was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPurpose {
    Validation,
    Estimate,
    Launch,
}

/// Identifies one issued request; only the latest per purpose is honoured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub purpose: RequestPurpose,
    pub seq: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RequestCounters {
    validation: u64,
    estimate: u64,
    launch: u64,
}

impl RequestCounters {
    fn issue(&mut self, purpose: RequestPurpose) -> Ticket {
        let slot = self.slot(purpose);
        *slot += 1;
        Ticket {
            purpose,
            seq: *slot,
        }
    }

    /// Make every outstanding ticket stale
    fn invalidate_all(&mut self) {
        self.validation += 1;
        self.estimate += 1;
        self.launch += 1;
    }

    fn invalidate(&mut self, purpose: RequestPurpose) {
        *self.slot(purpose) += 1;
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        let current = match ticket.purpose {
            RequestPurpose::Validation => self.validation,
            RequestPurpose::Estimate => self.estimate,
            RequestPurpose::Launch => self.launch,
        };
        current == ticket.seq
    }

    fn slot(&mut self, purpose: RequestPurpose) -> &mut u64 {
        match purpose {
            RequestPurpose::Validation => &mut self.validation,
            RequestPurpose::Estimate => &mut self.estimate,
            RequestPurpose::Launch => &mut self.launch,
        }
    }
}

/// Request for a cost estimate handed to the caller
#[derive(Debug, Clone)]
pub struct EstimateRequest {
    pub ticket: Ticket,
    pub provider: CloudProvider,
    pub architecture: Architecture,
}

/// Everything needed to launch a deployment
#[derive(Debug, Clone)]
pub struct LaunchRequest {
    pub ticket: Ticket,
    pub credentials: ProviderCredentials,
    pub architecture: Architecture,
}

/// Whether a mutation invalidated the displayed estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recalculate {
    Needed,
    NotNeeded,
}

/// Full wizard state
#[derive(Debug, Clone, Default)]
pub struct WizardState {
    step: WizardStep,
    config: ProvisioningConfig,
    validation: ValidationState,
    estimate: Option<CostEstimate>,
    estimate_pending: bool,
    launching: bool,
    deployment_id: Option<String>,
    deployment_status: Option<DeploymentStatus>,
    banner: Option<WizardError>,
    requests: RequestCounters,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn config(&self) -> &ProvisioningConfig {
        &self.config
    }

    pub fn provider(&self) -> Option<CloudProvider> {
        self.config.provider
    }

    pub fn architecture(&self) -> &Architecture {
        &self.config.architecture
    }

    pub fn validation(&self) -> &ValidationState {
        &self.validation
    }

    pub fn estimate(&self) -> Option<&CostEstimate> {
        self.estimate.as_ref()
    }

    pub fn is_estimating(&self) -> bool {
        self.estimate_pending
    }

    pub fn is_launching(&self) -> bool {
        self.launching
    }

    pub fn deployment_id(&self) -> Option<&str> {
        self.deployment_id.as_deref()
    }

    pub fn deployment_status(&self) -> Option<&DeploymentStatus> {
        self.deployment_status.as_ref()
    }

    /// Error shown at the top of the current step
    pub fn banner(&self) -> Option<&WizardError> {
        self.banner.as_ref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Deployment reached a terminal status, so "start over" is offered
    pub fn can_start_over(&self) -> bool {
        self.deployment_status
            .as_ref()
            .is_some_and(DeploymentStatus::is_terminal)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Check the current step's exit precondition
    pub fn can_proceed(&self) -> Result<(), WizardError> {
        match self.step {
            WizardStep::ProviderSelect => {
                if self.config.provider.is_none() {
                    return Err(WizardError::StepBlocked(
                        "select a cloud provider first".to_string(),
                    ));
                }
            }
            WizardStep::Credentials => match &self.validation {
                ValidationState::Valid(_) => {}
                ValidationState::Pending => {
                    return Err(WizardError::StepBlocked(
                        "credential validation is still running".to_string(),
                    ));
                }
                ValidationState::Invalid(message) => {
                    return Err(WizardError::ValidationFailure(message.clone()));
                }
                ValidationState::Unchecked => {
                    return Err(WizardError::StepBlocked(
                        "credentials have not been validated".to_string(),
                    ));
                }
            },
            WizardStep::Architecture => {
                if !self.config.architecture.is_complete() {
                    return Err(WizardError::StepBlocked(
                        "choose an instance type and operating system".to_string(),
                    ));
                }
            }
            WizardStep::Review => {
                return Err(WizardError::StepBlocked(
                    "use deploy to launch the configuration".to_string(),
                ));
            }
            WizardStep::Monitor => {
                return Err(WizardError::StepBlocked(
                    "the deployment is the last step".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Move forward one step if the current step allows it
    pub fn next(&mut self) -> Result<Recalculate, WizardError> {
        if let Err(e) = self.can_proceed() {
            if matches!(e, WizardError::ValidationFailure(_)) {
                self.banner = Some(e.clone());
            }
            return Err(e);
        }
        let Some(next) = self.step.next() else {
            return Err(WizardError::StepBlocked("no further step".to_string()));
        };
        self.enter(next);
        Ok(if next == WizardStep::Architecture && self.estimate_inputs_ready() {
            Recalculate::Needed
        } else {
            Recalculate::NotNeeded
        })
    }

    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        if self.launching {
            return Err(WizardError::StepBlocked(
                "a deployment is being launched".to_string(),
            ));
        }
        let prev = self.step.prev().ok_or_else(|| match self.step {
            WizardStep::Monitor => {
                WizardError::StepBlocked("a launched deployment cannot be edited".to_string())
            }
            _ => WizardError::StepBlocked("already at the first step".to_string()),
        })?;
        self.enter(prev);
        Ok(prev)
    }

    fn enter(&mut self, step: WizardStep) {
        log::debug!("Wizard step {} -> {}", self.step, step);
        self.step = step;
        self.banner = None;
        if !step.shows_estimate() {
            self.estimate_pending = false;
        }
    }

    /// Clear everything and return to the first step
    pub fn reset(&mut self) {
        let mut requests = self.requests;
        requests.invalidate_all();
        *self = Self {
            requests,
            ..Self::default()
        };
    }

    // =========================================================================
    // Configuration mutations
    // =========================================================================

    pub fn select_provider(&mut self, provider: CloudProvider) -> Recalculate {
        if self.config.provider == Some(provider) {
            return Recalculate::NotNeeded;
        }
        self.config.provider = Some(provider);
        self.invalidate_validation();

        let arch = &mut self.config.architecture;
        if catalog::find_instance_type(provider, &arch.instance_type).is_none() {
            arch.instance_type = catalog::default_instance_type(provider).to_string();
        }
        self.after_config_change()
    }

    /// Store credentials in their provider's slot
    pub fn set_credentials(&mut self, credentials: ProviderCredentials) {
        let provider = credentials.provider();
        if self.config.credentials.get(provider) == credentials {
            return;
        }
        self.config.credentials.set(credentials);
        if self.config.provider == Some(provider) {
            self.invalidate_validation();
        }
    }

    pub fn set_vm_count(&mut self, count: u32) -> Recalculate {
        let count = Architecture::clamp_vm_count(count);
        self.update_architecture(|a| a.vm_count = count)
    }

    pub fn set_storage_gb(&mut self, gb: u32) -> Recalculate {
        let gb = Architecture::clamp_storage_gb(gb);
        self.update_architecture(|a| a.storage_gb = gb)
    }

    pub fn set_os(&mut self, os: &str) -> Recalculate {
        self.update_architecture(|a| a.os = os.to_string())
    }

    pub fn set_security_group(&mut self, group: SecurityGroup) -> Recalculate {
        self.update_architecture(|a| a.security_group = group)
    }

    /// Instance types outside the selected provider's catalog are rejected
    pub fn set_instance_type(&mut self, instance_type: &str) -> Result<Recalculate, WizardError> {
        self.check_instance_type(instance_type)?;
        Ok(self.update_architecture(|a| a.instance_type = instance_type.to_string()))
    }

    /// Replace the whole architecture at once
    pub fn set_architecture(&mut self, architecture: Architecture) -> Result<Recalculate, WizardError> {
        self.check_instance_type(&architecture.instance_type)?;
        let architecture = architecture.normalized();
        Ok(self.update_architecture(|a| *a = architecture))
    }

    fn check_instance_type(&self, instance_type: &str) -> Result<(), WizardError> {
        match self.config.provider {
            Some(provider) if catalog::find_instance_type(provider, instance_type).is_none() => {
                Err(WizardError::StepBlocked(format!(
                    "{} is not offered by {}",
                    instance_type,
                    provider.display_name()
                )))
            }
            _ => Ok(()),
        }
    }

    fn update_architecture(&mut self, apply: impl FnOnce(&mut Architecture)) -> Recalculate {
        let before = self.config.architecture.clone();
        apply(&mut self.config.architecture);
        if self.config.architecture == before {
            return Recalculate::NotNeeded;
        }
        self.after_config_change()
    }

    fn after_config_change(&mut self) -> Recalculate {
        if self.step >= WizardStep::Architecture && self.estimate_inputs_ready() {
            Recalculate::Needed
        } else {
            Recalculate::NotNeeded
        }
    }

    fn estimate_inputs_ready(&self) -> bool {
        self.config.provider.is_some() && !self.config.architecture.instance_type.is_empty()
    }

    fn invalidate_validation(&mut self) {
        self.validation = ValidationState::Unchecked;
        self.requests.invalidate(RequestPurpose::Validation);
    }

    // =========================================================================
    // Credential validation
    // =========================================================================

    pub fn begin_validation(&mut self) -> Result<(Ticket, ProviderCredentials), WizardError> {
        let credentials = self.config.active_credentials().ok_or_else(|| {
            WizardError::StepBlocked("select a cloud provider first".to_string())
        })?;
        self.validation = ValidationState::Pending;
        Ok((self.requests.issue(RequestPurpose::Validation), credentials))
    }

    /// Record a validation outcome; transport errors count as invalid
    pub fn finish_validation(
        &mut self,
        ticket: Ticket,
        outcome: Result<CredentialCheck, String>,
    ) -> bool {
        if !self.requests.is_current(ticket) || self.step != WizardStep::Credentials {
            log::debug!("Discarding stale validation result #{}", ticket.seq);
            return false;
        }
        self.validation = match outcome {
            Ok(CredentialCheck {
                valid: true,
                message,
            }) => {
                self.banner = None;
                ValidationState::Valid(message)
            }
            Ok(CredentialCheck {
                valid: false,
                message,
            }) => {
                let message = message.unwrap_or_else(|| "Invalid credentials".to_string());
                self.banner = Some(WizardError::ValidationFailure(message.clone()));
                ValidationState::Invalid(message)
            }
            Err(cause) => {
                self.banner = Some(WizardError::ValidationFailure(cause.clone()));
                ValidationState::Invalid(cause)
            }
        };
        true
    }

    // =========================================================================
    // Cost estimation
    // =========================================================================

    pub fn begin_estimate(&mut self) -> Option<EstimateRequest> {
        if !self.step.shows_estimate() || !self.estimate_inputs_ready() {
            return None;
        }
        let provider = self.config.provider?;
        self.estimate_pending = true;
        Some(EstimateRequest {
            ticket: self.requests.issue(RequestPurpose::Estimate),
            provider,
            architecture: self.config.architecture.clone(),
        })
    }

    /// Apply an estimate if it is still the newest and the step still shows it.
    ///
    /// Failures keep whatever estimate was shown before.
    pub fn finish_estimate(&mut self, ticket: Ticket, outcome: Result<CostEstimate, String>) -> bool {
        if !self.requests.is_current(ticket) || !self.step.shows_estimate() {
            log::debug!("Discarding stale estimate #{}", ticket.seq);
            return false;
        }
        self.estimate_pending = false;
        match outcome {
            Ok(estimate) => {
                self.estimate = Some(estimate);
                true
            }
            Err(cause) => {
                log::debug!("{}", WizardError::EstimationFailure(cause));
                false
            }
        }
    }

    // =========================================================================
    // Deployment
    // =========================================================================

    pub fn begin_launch(&mut self) -> Result<LaunchRequest, WizardError> {
        if self.step != WizardStep::Review {
            return Err(WizardError::StepBlocked(
                "deploy is only available from the review step".to_string(),
            ));
        }
        if self.launching {
            return Err(WizardError::StepBlocked(
                "a deployment is already being launched".to_string(),
            ));
        }
        if !self.validation.is_valid() {
            return Err(WizardError::StepBlocked(
                "credentials have not been validated".to_string(),
            ));
        }
        if !self.config.architecture.is_complete() {
            return Err(WizardError::StepBlocked(
                "choose an instance type and operating system".to_string(),
            ));
        }
        let credentials = self.config.active_credentials().ok_or_else(|| {
            WizardError::StepBlocked("select a cloud provider first".to_string())
        })?;

        self.launching = true;
        self.banner = None;
        Ok(LaunchRequest {
            ticket: self.requests.issue(RequestPurpose::Launch),
            credentials,
            architecture: self.config.architecture.clone(),
        })
    }

    /// On success moves to Monitor; on failure stays on Review with a banner
    pub fn finish_launch(
        &mut self,
        ticket: Ticket,
        outcome: Result<DeployResponse, String>,
    ) -> Result<String, WizardError> {
        if !self.requests.is_current(ticket) {
            return Err(WizardError::LaunchFailure(
                "the wizard was reset while launching".to_string(),
            ));
        }
        self.launching = false;
        if self.step != WizardStep::Review {
            return Err(WizardError::LaunchFailure(
                "the wizard left the review step while launching".to_string(),
            ));
        }
        match outcome {
            Ok(response) => {
                log::info!(
                    "Deployment {} {}: {}",
                    response.deployment_id,
                    response.status,
                    response.message
                );
                self.deployment_id = Some(response.deployment_id.clone());
                self.deployment_status = None;
                self.enter(WizardStep::Monitor);
                Ok(response.deployment_id)
            }
            Err(cause) => {
                let err = WizardError::LaunchFailure(cause);
                self.banner = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Replace the stored status with a server report for the active deployment
    pub fn apply_status(&mut self, status: DeploymentStatus) -> bool {
        if self.step != WizardStep::Monitor
            || self.deployment_id.as_deref() != Some(status.id.as_str())
            || self.can_start_over()
        {
            return false;
        }
        self.deployment_status = Some(status);
        true
    }
}
