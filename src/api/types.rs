//! Wire types for the provisioning backend
//!
//! Request bodies borrow from the wizard's model; response bodies mirror the
//! JSON the backend returns and are converted into model types at the edge.

use crate::model::{
    Architecture, CloudProvider, DeploymentOutputs, DeploymentPhase, DeploymentStatus,
    ProviderCredentials,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// API error response format
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: Option<String>,
    /// Detailed error message
    pub message: Option<String>,
}

impl ApiErrorResponse {
    /// Get the error message, preferring `message` over `error`
    pub fn get_message(&self) -> String {
        self.message
            .clone()
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| "Unknown error".to_string())
    }
}

// =============================================================================
// Credential validation
// =============================================================================

/// Body of `POST /api/validate-credentials`
#[derive(Debug, Serialize)]
pub struct ValidateCredentialsRequest<'a> {
    pub provider: CloudProvider,
    pub credentials: &'a ProviderCredentials,
}

/// Validation verdict
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CredentialCheck {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// =============================================================================
// Cost estimation
// =============================================================================

/// Body of `POST /api/estimate-cost`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateCostRequest<'a> {
    pub selected_provider: CloudProvider,
    pub architecture: &'a Architecture,
}

// =============================================================================
// Deployment
// =============================================================================

/// Body of `POST /api/deploy`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployRequest<'a> {
    pub selected_provider: CloudProvider,
    /// Keyed by provider, containing only the selected provider's entry
    pub credentials: BTreeMap<&'static str, ProviderCredentials>,
    pub architecture: &'a Architecture,
}

/// Response from launching a deployment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeployResponse {
    /// Opaque identifier used for status polling
    pub deployment_id: String,
    /// Initial status token (e.g. "initiated")
    pub status: String,
    pub message: String,
}

/// Single terraform-style output: `{ "value": [...] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputValue {
    #[serde(default)]
    pub value: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeploymentOutputsResponse {
    #[serde(default)]
    pub instance_ids: Option<OutputValue>,
    #[serde(default)]
    pub public_ips: Option<OutputValue>,
    #[serde(default)]
    pub private_ips: Option<OutputValue>,
}

impl From<DeploymentOutputsResponse> for DeploymentOutputs {
    fn from(raw: DeploymentOutputsResponse) -> Self {
        let values = |o: Option<OutputValue>| o.map(|v| v.value).unwrap_or_default();
        DeploymentOutputs {
            instance_ids: values(raw.instance_ids),
            public_ips: values(raw.public_ips),
            private_ips: values(raw.private_ips),
        }
    }
}

/// Response of `GET /api/deployment/{id}/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentStatusResponse {
    pub status: DeploymentPhase,
    #[serde(default)]
    pub progress: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub outputs: Option<DeploymentOutputsResponse>,
}

impl DeploymentStatusResponse {
    pub fn into_status(self, id: &str) -> DeploymentStatus {
        let outputs = self
            .outputs
            .map(DeploymentOutputs::from)
            .filter(|o| !o.is_empty());
        DeploymentStatus {
            id: id.to_string(),
            status: self.status,
            progress: clamp_progress(self.progress),
            message: self.message,
            started_at: self.start_time.as_deref().and_then(parse_timestamp),
            ended_at: self.end_time.as_deref().and_then(parse_timestamp),
            outputs,
        }
    }
}

/// Row of `GET /api/deployments`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentSummary {
    pub deployment_id: String,
    pub status: DeploymentPhase,
    #[serde(default)]
    pub progress: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDeploymentsResponse {
    #[serde(default)]
    pub deployments: Vec<DeploymentSummary>,
}

/// Response of `GET /api/health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

pub fn clamp_progress(progress: i64) -> u8 {
    progress.clamp(0, 100) as u8
}

/// Parse RFC 3339, or a naive ISO timestamp assumed to be UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
