//! Provisioning backend access
//!
//! The wizard talks to a backend through [`ProvisioningBackend`]. Two
//! implementations ship: [`ProvisioningApiClient`] for the real REST service
//! and [`SimulatedBackend`] for offline demos and tests. [`Backend`] picks one
//! at runtime from configuration.
//!
//! # Example
//!
//! ```rust,ignore
//! use multicloud_provisioner::api::{ProvisioningApiClient, ProvisioningBackend};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ProvisioningApiClient::new(&Default::default())?;
//!     for deployment in client.list_deployments().await? {
//!         println!("{}: {}", deployment.deployment_id, deployment.status);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod simulated;
pub mod types;

pub use client::ProvisioningApiClient;
pub use error::{ApiError, Result};
pub use simulated::SimulatedBackend;
pub use types::{CredentialCheck, DeployResponse, DeploymentSummary, HealthResponse};

use crate::config::types::Config;
use crate::model::{Architecture, CloudProvider, CostEstimate, DeploymentStatus, ProviderCredentials};
use std::future::Future;

/// Operations the wizard needs from a provisioning backend
pub trait ProvisioningBackend: Send + Sync + 'static {
    fn validate_credentials(
        &self,
        credentials: &ProviderCredentials,
    ) -> impl Future<Output = Result<CredentialCheck>> + Send;

    fn estimate_cost(
        &self,
        provider: CloudProvider,
        architecture: &Architecture,
    ) -> impl Future<Output = Result<CostEstimate>> + Send;

    /// Launch using the given provider credentials
    fn deploy(
        &self,
        credentials: &ProviderCredentials,
        architecture: &Architecture,
    ) -> impl Future<Output = Result<DeployResponse>> + Send;

    fn deployment_status(
        &self,
        deployment_id: &str,
    ) -> impl Future<Output = Result<DeploymentStatus>> + Send;

    fn list_deployments(&self) -> impl Future<Output = Result<Vec<DeploymentSummary>>> + Send;

    fn health(&self) -> impl Future<Output = Result<HealthResponse>> + Send;
}

impl ProvisioningBackend for ProvisioningApiClient {
    fn validate_credentials(
        &self,
        credentials: &ProviderCredentials,
    ) -> impl Future<Output = Result<CredentialCheck>> + Send {
        ProvisioningApiClient::validate_credentials(self, credentials)
    }

    fn estimate_cost(
        &self,
        provider: CloudProvider,
        architecture: &Architecture,
    ) -> impl Future<Output = Result<CostEstimate>> + Send {
        ProvisioningApiClient::estimate_cost(self, provider, architecture)
    }

    fn deploy(
        &self,
        credentials: &ProviderCredentials,
        architecture: &Architecture,
    ) -> impl Future<Output = Result<DeployResponse>> + Send {
        ProvisioningApiClient::deploy(self, credentials, architecture)
    }

    fn deployment_status(
        &self,
        deployment_id: &str,
    ) -> impl Future<Output = Result<DeploymentStatus>> + Send {
        ProvisioningApiClient::deployment_status(self, deployment_id)
    }

    fn list_deployments(&self) -> impl Future<Output = Result<Vec<DeploymentSummary>>> + Send {
        ProvisioningApiClient::list_deployments(self)
    }

    fn health(&self) -> impl Future<Output = Result<HealthResponse>> + Send {
        ProvisioningApiClient::health(self)
    }
}

impl ProvisioningBackend for SimulatedBackend {
    fn validate_credentials(
        &self,
        credentials: &ProviderCredentials,
    ) -> impl Future<Output = Result<CredentialCheck>> + Send {
        SimulatedBackend::validate_credentials(self, credentials)
    }

    fn estimate_cost(
        &self,
        provider: CloudProvider,
        architecture: &Architecture,
    ) -> impl Future<Output = Result<CostEstimate>> + Send {
        SimulatedBackend::estimate_cost(self, provider, architecture)
    }

    fn deploy(
        &self,
        credentials: &ProviderCredentials,
        architecture: &Architecture,
    ) -> impl Future<Output = Result<DeployResponse>> + Send {
        SimulatedBackend::deploy(self, credentials, architecture)
    }

    fn deployment_status(
        &self,
        deployment_id: &str,
    ) -> impl Future<Output = Result<DeploymentStatus>> + Send {
        SimulatedBackend::deployment_status(self, deployment_id)
    }

    fn list_deployments(&self) -> impl Future<Output = Result<Vec<DeploymentSummary>>> + Send {
        SimulatedBackend::list_deployments(self)
    }

    fn health(&self) -> impl Future<Output = Result<HealthResponse>> + Send {
        SimulatedBackend::health(self)
    }
}

/// Backend selected from configuration
#[derive(Debug)]
pub enum Backend {
    Http(ProvisioningApiClient),
    Simulated(SimulatedBackend),
}

impl Backend {
    pub fn from_config(config: &Config) -> Result<Self> {
        if config.simulation.enabled {
            log::info!(
                "Using simulated backend ({}s per phase)",
                config.simulation.phase_secs
            );
            Ok(Backend::Simulated(
                SimulatedBackend::new(config.simulation.phase())
                    .with_latency(config.simulation.latency()),
            ))
        } else {
            log::info!("Using provisioning backend at {}", config.api.base_url);
            Ok(Backend::Http(ProvisioningApiClient::new(&config.api)?))
        }
    }

    pub fn is_simulated(&self) -> bool {
        matches!(self, Backend::Simulated(_))
    }
}

impl ProvisioningBackend for Backend {
    async fn validate_credentials(
        &self,
        credentials: &ProviderCredentials,
    ) -> Result<CredentialCheck> {
        match self {
            Backend::Http(c) => c.validate_credentials(credentials).await,
            Backend::Simulated(s) => s.validate_credentials(credentials).await,
        }
    }

    async fn estimate_cost(
        &self,
        provider: CloudProvider,
        architecture: &Architecture,
    ) -> Result<CostEstimate> {
        match self {
            Backend::Http(c) => c.estimate_cost(provider, architecture).await,
            Backend::Simulated(s) => s.estimate_cost(provider, architecture).await,
        }
    }

    async fn deploy(
        &self,
        credentials: &ProviderCredentials,
        architecture: &Architecture,
    ) -> Result<DeployResponse> {
        match self {
            Backend::Http(c) => c.deploy(credentials, architecture).await,
            Backend::Simulated(s) => s.deploy(credentials, architecture).await,
        }
    }

    async fn deployment_status(&self, deployment_id: &str) -> Result<DeploymentStatus> {
        match self {
            Backend::Http(c) => c.deployment_status(deployment_id).await,
            Backend::Simulated(s) => s.deployment_status(deployment_id).await,
        }
    }

    async fn list_deployments(&self) -> Result<Vec<DeploymentSummary>> {
        match self {
            Backend::Http(c) => c.list_deployments().await,
            Backend::Simulated(s) => s.list_deployments().await,
        }
    }

    async fn health(&self) -> Result<HealthResponse> {
        match self {
            Backend::Http(c) => c.health().await,
            Backend::Simulated(s) => s.health().await,
        }
    }
}
