//! Provisioning configuration model
//!
//! Flat records describing what the user asked for (provider, credentials,
//! architecture) and what the backend reported back (estimates, deployment status).

pub mod architecture;
pub mod credentials;
pub mod deployment;
pub mod estimate;
pub mod provider;

pub use architecture::{Architecture, SecurityGroup, STORAGE_GB_RANGE, VM_COUNT_RANGE};
pub use credentials::{
    AwsCredentials, AzureCredentials, CredentialStore, GcpCredentials, ProviderCredentials,
};
pub use deployment::{DeploymentOutputs, DeploymentPhase, DeploymentStatus};
pub use estimate::{CostBreakdown, CostEstimate};
pub use provider::CloudProvider;

/// Everything the wizard collects before a deploy
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProvisioningConfig {
    pub provider: Option<CloudProvider>,
    pub credentials: CredentialStore,
    pub architecture: Architecture,
}

impl ProvisioningConfig {
    /// Credentials of the selected provider, if one is selected
    pub fn active_credentials(&self) -> Option<ProviderCredentials> {
        self.provider.map(|p| self.credentials.get(p))
    }
}
