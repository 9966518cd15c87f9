//! In-process stand-in for the provisioning backend
//!
//! Validates credentials by completeness, prices from the local catalog, and
//! walks each launched deployment through its phases based on time elapsed
//! since that deployment's own launch.

use super::error::{ApiError, Result};
use super::types::{CredentialCheck, DeployResponse, DeploymentSummary, HealthResponse};
use crate::catalog;
use crate::model::{
    Architecture, CloudProvider, CostEstimate, DeploymentOutputs, DeploymentPhase,
    DeploymentStatus, ProviderCredentials,
};
use chrono::{DateTime, Utc};
use rand::Rng;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const HEX_ALPHABET: &[u8] = b"0123456789abcdef";

#[derive(Debug, Clone)]
struct SimulatedDeployment {
    launched: Instant,
    launched_at: DateTime<Utc>,
    outputs: DeploymentOutputs,
}

/// Backend that never leaves the process
#[derive(Debug)]
pub struct SimulatedBackend {
    phase: Duration,
    latency: Duration,
    fail_deployments: bool,
    deployments: Mutex<HashMap<String, SimulatedDeployment>>,
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

impl SimulatedBackend {
    /// `phase` is the length of each of the three running phases
    pub fn new(phase: Duration) -> Self {
        Self {
            phase,
            latency: Duration::ZERO,
            fail_deployments: false,
            deployments: Mutex::new(HashMap::new()),
        }
    }

    /// Delay every call by `latency` plus up to `latency` of jitter
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Deployments end in `failed` instead of `completed`
    pub fn with_failures(mut self, fail: bool) -> Self {
        self.fail_deployments = fail;
        self
    }

    async fn simulate_latency(&self) {
        if self.latency.is_zero() {
            return;
        }
        let extra = rand::rng().random_range(0..=self.latency.as_millis() as u64);
        tokio::time::sleep(self.latency + Duration::from_millis(extra)).await;
    }

    pub async fn validate_credentials(
        &self,
        credentials: &ProviderCredentials,
    ) -> Result<CredentialCheck> {
        self.simulate_latency().await;
        let missing = credentials.missing_fields();
        Ok(if missing.is_empty() {
            CredentialCheck {
                valid: true,
                message: Some(format!(
                    "{} credentials validated",
                    credentials.provider().display_name()
                )),
            }
        } else {
            CredentialCheck {
                valid: false,
                message: Some(format!("Missing required credentials: {}", missing.join(", "))),
            }
        })
    }

    pub async fn estimate_cost(
        &self,
        provider: CloudProvider,
        architecture: &Architecture,
    ) -> Result<CostEstimate> {
        self.simulate_latency().await;
        Ok(catalog::estimate_cost(provider, architecture))
    }

    pub async fn deploy(
        &self,
        credentials: &ProviderCredentials,
        architecture: &Architecture,
    ) -> Result<DeployResponse> {
        self.simulate_latency().await;
        if !credentials.is_complete() {
            return Err(ApiError::ApiError {
                status: 400,
                message: "Missing required credentials".to_string(),
            });
        }

        let deployment_id = format!("deploy-{}", random_string(ID_ALPHABET, 9));
        let deployment = SimulatedDeployment {
            launched: Instant::now(),
            launched_at: Utc::now(),
            outputs: fake_outputs(architecture.vm_count),
        };
        log::debug!(
            "Simulated deployment {} of {} x {} on {}",
            deployment_id,
            architecture.vm_count,
            architecture.instance_type,
            credentials.provider()
        );
        self.deployments
            .lock()
            .await
            .insert(deployment_id.clone(), deployment);

        Ok(DeployResponse {
            deployment_id,
            status: "initiated".to_string(),
            message: "Deployment started successfully".to_string(),
        })
    }

    pub async fn deployment_status(&self, deployment_id: &str) -> Result<DeploymentStatus> {
        self.simulate_latency().await;
        let deployments = self.deployments.lock().await;
        let deployment = deployments
            .get(deployment_id)
            .ok_or_else(|| ApiError::NotFound("Deployment not found".to_string()))?;
        Ok(self.status_of(deployment_id, deployment))
    }

    pub async fn list_deployments(&self) -> Result<Vec<DeploymentSummary>> {
        self.simulate_latency().await;
        let deployments = self.deployments.lock().await;
        let mut summaries: Vec<DeploymentSummary> = deployments
            .iter()
            .map(|(id, d)| {
                let status = self.status_of(id, d);
                DeploymentSummary {
                    deployment_id: id.clone(),
                    status: status.status,
                    progress: i64::from(status.progress),
                    message: status.message,
                    start_time: status.started_at.map(|t| t.to_rfc3339()),
                    end_time: status.ended_at.map(|t| t.to_rfc3339()),
                }
            })
            .collect();
        summaries.sort_by(|a, b| a.start_time.cmp(&b.start_time));
        Ok(summaries)
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        Ok(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Some(Utc::now().to_rfc3339()),
        })
    }

    fn status_of(&self, id: &str, deployment: &SimulatedDeployment) -> DeploymentStatus {
        let elapsed = deployment.launched.elapsed();
        let (status, progress, message) = if elapsed < self.phase {
            (DeploymentPhase::Initializing, 10, "Initializing deployment...")
        } else if elapsed < self.phase * 2 {
            (DeploymentPhase::Generating, 40, "Generating Terraform configuration...")
        } else if elapsed < self.phase * 3 {
            (DeploymentPhase::Deploying, 70, "Deploying infrastructure...")
        } else if self.fail_deployments {
            (DeploymentPhase::Failed, 0, "Deployment failed: Terraform apply failed")
        } else {
            (DeploymentPhase::Completed, 100, "Deployment completed successfully!")
        };

        let finished = status.is_terminal();
        let ended_at = finished.then(|| {
            let run = chrono::Duration::from_std(self.phase * 3).unwrap_or_default();
            deployment.launched_at + run
        });
        let outputs = (status == DeploymentPhase::Completed).then(|| deployment.outputs.clone());

        DeploymentStatus {
            id: id.to_string(),
            status,
            progress,
            message: message.to_string(),
            started_at: Some(deployment.launched_at),
            ended_at,
            outputs,
        }
    }
}

fn random_string(alphabet: &[u8], len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| alphabet[rng.random_range(0..alphabet.len())] as char)
        .collect()
}

fn fake_outputs(vm_count: u32) -> DeploymentOutputs {
    let count = Architecture::clamp_vm_count(vm_count);
    DeploymentOutputs {
        instance_ids: (0..count)
            .map(|_| format!("i-{}", random_string(HEX_ALPHABET, 17)))
            .collect(),
        public_ips: (0..count).map(|i| format!("54.123.45.{}", 67 + i)).collect(),
        private_ips: (0..count).map(|i| format!("10.0.1.{}", 10 + i)).collect(),
    }
}
