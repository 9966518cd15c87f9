//! Wizard controller
//!
//! Owns the [`WizardState`] and the backend, performs the requests the state
//! asks for, and runs the status poll while the Monitor step is active.

use super::poller::{PollHandle, PollUpdate, spawn_status_poller};
use super::state::{Recalculate, ValidationState, WizardState, WizardStep};
use crate::api::ProvisioningBackend;
use crate::error::WizardError;
use crate::model::{
    Architecture, CloudProvider, CostEstimate, DeploymentStatus, ProviderCredentials,
    SecurityGroup,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// What the Monitor step observed from the poller
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorEvent {
    /// A status report was applied
    Status(DeploymentStatus),
    /// A poll failed; polling continues
    PollFailed(WizardError),
}

pub struct WizardController<B: ProvisioningBackend> {
    backend: Arc<B>,
    state: WizardState,
    poll_interval: Duration,
    poller: Option<PollHandle>,
    poll_generation: u64,
    updates_tx: mpsc::UnboundedSender<PollUpdate>,
    updates_rx: mpsc::UnboundedReceiver<PollUpdate>,
}

impl<B: ProvisioningBackend> WizardController<B> {
    pub fn new(backend: Arc<B>, poll_interval: Duration) -> Self {
        let (updates_tx, updates_rx) = mpsc::unbounded_channel();
        Self {
            backend,
            state: WizardState::new(),
            poll_interval,
            poller: None,
            poll_generation: 0,
            updates_tx,
            updates_rx,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> WizardStep {
        self.state.step()
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// A poll session is active and not cancelled
    pub fn is_polling(&self) -> bool {
        self.poller
            .as_ref()
            .is_some_and(|p| !p.is_cancelled() && !p.is_finished())
    }

    /// Status requests issued by the current poll session
    pub fn poll_requests_issued(&self) -> u64 {
        self.poller.as_ref().map_or(0, PollHandle::requests_issued)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Advance one step.
    ///
    /// Leaving Credentials always re-runs validation first.
    pub async fn next(&mut self) -> Result<WizardStep, WizardError> {
        if self.state.step() == WizardStep::Credentials {
            self.validate_credentials().await;
        }
        if self.state.next()? == Recalculate::Needed {
            self.refresh_estimate().await;
        }
        Ok(self.state.step())
    }

    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        self.state.back()
    }

    /// Clear everything, stop any poll, and return to provider selection
    pub fn reset(&mut self) {
        self.stop_polling();
        self.state.reset();
        log::info!("Wizard reset");
    }

    pub fn dismiss_banner(&mut self) {
        self.state.dismiss_banner();
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    pub async fn select_provider(&mut self, provider: CloudProvider) {
        let recalc = self.state.select_provider(provider);
        self.recalculate(recalc).await;
    }

    pub fn set_credentials(&mut self, credentials: ProviderCredentials) {
        self.state.set_credentials(credentials);
    }

    pub async fn set_vm_count(&mut self, count: u32) {
        let recalc = self.state.set_vm_count(count);
        self.recalculate(recalc).await;
    }

    pub async fn set_instance_type(&mut self, instance_type: &str) -> Result<(), WizardError> {
        let recalc = self.state.set_instance_type(instance_type)?;
        self.recalculate(recalc).await;
        Ok(())
    }

    pub async fn set_os(&mut self, os: &str) {
        let recalc = self.state.set_os(os);
        self.recalculate(recalc).await;
    }

    pub async fn set_storage_gb(&mut self, gb: u32) {
        let recalc = self.state.set_storage_gb(gb);
        self.recalculate(recalc).await;
    }

    pub async fn set_security_group(&mut self, group: SecurityGroup) {
        let recalc = self.state.set_security_group(group);
        self.recalculate(recalc).await;
    }

    pub async fn set_architecture(&mut self, architecture: Architecture) -> Result<(), WizardError> {
        let recalc = self.state.set_architecture(architecture)?;
        self.recalculate(recalc).await;
        Ok(())
    }

    async fn recalculate(&mut self, recalc: Recalculate) {
        if recalc == Recalculate::Needed {
            self.refresh_estimate().await;
        }
    }

    // =========================================================================
    // Backend calls
    // =========================================================================

    /// Validate the selected provider's credentials; any failure counts as invalid
    pub async fn validate_credentials(&mut self) -> bool {
        let (ticket, credentials) = match self.state.begin_validation() {
            Ok(issued) => issued,
            Err(e) => {
                log::debug!("Validation skipped: {}", e);
                return false;
            }
        };

        log::debug!("Validating {} credentials", credentials.provider());
        let outcome = self
            .backend
            .validate_credentials(&credentials)
            .await
            .map_err(|e| {
                log::warn!("Credential validation request failed: {}", e);
                e.to_string()
            });
        if let Ok(check) = &outcome
            && !check.valid
        {
            log::warn!(
                "Credentials rejected: {}",
                check.message.as_deref().unwrap_or("no reason given")
            );
        }

        self.state.finish_validation(ticket, outcome);
        self.state.validation().is_valid()
    }

    /// Fetch a fresh estimate if the current step shows one
    pub async fn refresh_estimate(&mut self) -> Option<CostEstimate> {
        let request = self.state.begin_estimate()?;
        let outcome = self
            .backend
            .estimate_cost(request.provider, &request.architecture)
            .await
            .map_err(|e| e.to_string());
        self.state.finish_estimate(request.ticket, outcome);
        self.state.estimate().copied()
    }

    /// Launch the reviewed configuration and start monitoring it
    pub async fn deploy(&mut self) -> Result<String, WizardError> {
        let launch = self.state.begin_launch()?;
        log::info!(
            "Launching {} x {} on {}",
            launch.architecture.vm_count,
            launch.architecture.instance_type,
            launch.credentials.provider().display_name()
        );
        let outcome = self
            .backend
            .deploy(&launch.credentials, &launch.architecture)
            .await
            .map_err(|e| {
                log::warn!("Deployment launch failed: {}", e);
                e.to_string()
            });
        let deployment_id = self.state.finish_launch(launch.ticket, outcome)?;
        self.start_polling(deployment_id.clone());
        Ok(deployment_id)
    }

    // =========================================================================
    // Monitoring
    // =========================================================================

    fn start_polling(&mut self, deployment_id: String) {
        self.stop_polling();
        self.poll_generation += 1;
        self.poller = Some(spawn_status_poller(
            self.backend.clone(),
            deployment_id,
            self.poll_interval,
            self.poll_generation,
            self.updates_tx.clone(),
        ));
    }

    /// Cancel the poll session, if any
    pub fn stop_polling(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.cancel();
        }
    }

    /// Wait for the next update of the active poll session.
    ///
    /// Returns `None` once there is nothing left to wait for: no session, a
    /// cancelled session, or a terminal status already applied.
    pub async fn next_monitor_event(&mut self) -> Option<MonitorEvent> {
        loop {
            let generation = match &self.poller {
                Some(p) if !p.is_cancelled() => p.generation(),
                _ => return None,
            };
            if self.state.can_start_over() {
                return None;
            }

            let update = self.updates_rx.recv().await?;
            if update.generation != generation {
                log::debug!("Dropping update from poll session {}", update.generation);
                continue;
            }
            match update.result {
                Ok(status) => {
                    if self.state.apply_status(status.clone()) {
                        return Some(MonitorEvent::Status(status));
                    }
                }
                Err(message) => return Some(MonitorEvent::PollFailed(WizardError::PollFailure(message))),
            }
        }
    }

    /// Drive the poll until a terminal status, reporting each event
    pub async fn monitor<F>(&mut self, mut on_event: F) -> Option<DeploymentStatus>
    where
        F: FnMut(&MonitorEvent),
    {
        while let Some(event) = self.next_monitor_event().await {
            on_event(&event);
        }
        self.state.deployment_status().cloned()
    }

    /// Credentials currently considered valid for the selected provider
    pub fn credentials_valid(&self) -> bool {
        matches!(self.state.validation(), ValidationState::Valid(_))
    }
}

impl<B: ProvisioningBackend> Drop for WizardController<B> {
    fn drop(&mut self) {
        self.stop_polling();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SimulatedBackend;
    use crate::model::{AwsCredentials, DeploymentPhase};

    fn controller(phase_secs: u64) -> WizardController<SimulatedBackend> {
        WizardController::new(
            Arc::new(SimulatedBackend::new(Duration::from_secs(phase_secs))),
            Duration::from_secs(3),
        )
    }

    fn aws_credentials() -> ProviderCredentials {
        ProviderCredentials::Aws(AwsCredentials {
            access_key: "AKIAEXAMPLE".to_string(),
            secret_key: "secret".to_string(),
            region: "us-east-1".to_string(),
        })
    }

    async fn drive_to_review(c: &mut WizardController<SimulatedBackend>) {
        c.select_provider(CloudProvider::Aws).await;
        c.next().await.unwrap();
        c.set_credentials(aws_credentials());
        assert_eq!(c.next().await.unwrap(), WizardStep::Architecture);
        c.next().await.unwrap();
    }

    #[tokio::test]
    async fn test_incomplete_credentials_block_advance() {
        let mut c = controller(1);
        c.select_provider(CloudProvider::Aws).await;
        c.next().await.unwrap();
        let err = c.next().await.unwrap_err();
        assert!(matches!(err, WizardError::ValidationFailure(_)));
        assert_eq!(c.step(), WizardStep::Credentials);
        assert!(!c.credentials_valid());
    }

    #[tokio::test]
    async fn test_architecture_changes_refresh_estimate() {
        let mut c = controller(1);
        c.select_provider(CloudProvider::Aws).await;
        c.next().await.unwrap();
        c.set_credentials(aws_credentials());
        c.next().await.unwrap();
        assert_eq!(c.state().estimate().unwrap().monthly_cost, 15.5);

        c.set_vm_count(2).await;
        assert_eq!(c.state().estimate().unwrap().monthly_cost, 26.0);
        assert!(c.set_instance_type("e2-micro").await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_deploy_and_monitor_to_completion() {
        let mut c = controller(3);
        drive_to_review(&mut c).await;

        let id = c.deploy().await.unwrap();
        assert_eq!(c.step(), WizardStep::Monitor);
        assert!(c.is_polling());

        let mut seen = Vec::new();
        let last = c
            .monitor(|event| {
                if let MonitorEvent::Status(s) = event {
                    seen.push(s.status);
                }
            })
            .await
            .unwrap();
        assert_eq!(last.id, id);
        assert_eq!(last.status, DeploymentPhase::Completed);
        assert_eq!(seen.first(), Some(&DeploymentPhase::Initializing));
        assert!(c.state().can_start_over());

        c.reset();
        assert_eq!(c.step(), WizardStep::ProviderSelect);
        assert!(!c.is_polling());
    }
}
