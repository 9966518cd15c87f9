//! HTTP client for the provisioning backend
//!
//! Talks JSON to the Flask-style backend that validates credentials, prices
//! architectures, and runs terraform deployments.

use super::error::{ApiError, Result};
use super::types::{
    ApiErrorResponse, CredentialCheck, DeployRequest, DeployResponse, DeploymentStatusResponse,
    DeploymentSummary, EstimateCostRequest, HealthResponse, ListDeploymentsResponse,
    ValidateCredentialsRequest,
};
use crate::config::types::ApiConfig;
use crate::model::{
    Architecture, CloudProvider, CostEstimate, DeploymentStatus, ProviderCredentials,
};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// User agent for API requests
const USER_AGENT: &str = concat!("provision-ctl/", env!("CARGO_PKG_VERSION"));

/// Client for the provisioning backend REST API
#[derive(Debug, Clone)]
pub struct ProvisioningApiClient {
    /// HTTP client with configured timeout and headers
    http_client: Client,
    /// Base API URL, without trailing slash
    api_url: String,
}

impl ProvisioningApiClient {
    /// Create a client from the `[api]` config section
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Self::with_url(&config.base_url, config.timeout())
    }

    /// Create a client with a custom API URL and request timeout
    pub fn with_url(api_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(ApiError::HttpError)?;

        let api_url: String = api_url.into();
        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the configured API URL
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.api_url, path);
        log::debug!("GET {}", url);

        let response = self.http_client.get(&url).send().await?;

        self.handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}{}", self.api_url, path);
        log::debug!("POST {}", url);

        let response = self.http_client.post(&url).json(body).send().await?;

        self.handle_response(response).await
    }

    /// Handle the HTTP response, converting errors appropriately
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::ParseError(e.to_string()))
        } else {
            let status_code = status.as_u16();
            let error_body = response.text().await.unwrap_or_default();
            let error_message = serde_json::from_str::<ApiErrorResponse>(&error_body)
                .map(|e| e.get_message())
                .unwrap_or_else(|_| error_body.clone());

            log::debug!("Backend returned {}: {}", status_code, error_message);

            match status_code {
                404 => Err(ApiError::NotFound(error_message)),
                429 => Err(ApiError::RateLimited),
                500..=599 => Err(ApiError::ServerError {
                    status: status_code,
                    message: error_message,
                }),
                _ => Err(ApiError::ApiError {
                    status: status_code,
                    message: error_message,
                }),
            }
        }
    }

    // =========================================================================
    // Provisioning API methods
    // =========================================================================

    /// Check a provider credential set
    ///
    /// Endpoint: POST /api/validate-credentials
    pub async fn validate_credentials(
        &self,
        credentials: &ProviderCredentials,
    ) -> Result<CredentialCheck> {
        let body = ValidateCredentialsRequest {
            provider: credentials.provider(),
            credentials,
        };
        self.post("/api/validate-credentials", &body).await
    }

    /// Price an architecture on a provider
    ///
    /// Endpoint: POST /api/estimate-cost
    pub async fn estimate_cost(
        &self,
        provider: CloudProvider,
        architecture: &Architecture,
    ) -> Result<CostEstimate> {
        let body = EstimateCostRequest {
            selected_provider: provider,
            architecture,
        };
        self.post("/api/estimate-cost", &body).await
    }

    /// Launch a deployment
    ///
    /// Endpoint: POST /api/deploy
    pub async fn deploy(
        &self,
        credentials: &ProviderCredentials,
        architecture: &Architecture,
    ) -> Result<DeployResponse> {
        let body = DeployRequest {
            selected_provider: credentials.provider(),
            credentials: credentials.keyed(),
            architecture,
        };
        self.post("/api/deploy", &body).await
    }

    /// Current status of a deployment
    ///
    /// Endpoint: GET /api/deployment/{id}/status
    pub async fn deployment_status(&self, deployment_id: &str) -> Result<DeploymentStatus> {
        let response: DeploymentStatusResponse = self
            .get(&format!("/api/deployment/{}/status", deployment_id))
            .await?;
        Ok(response.into_status(deployment_id))
    }

    /// All deployments the backend knows about
    ///
    /// Endpoint: GET /api/deployments
    pub async fn list_deployments(&self) -> Result<Vec<DeploymentSummary>> {
        let response: ListDeploymentsResponse = self.get("/api/deployments").await?;
        Ok(response.deployments)
    }

    /// Liveness probe
    ///
    /// Endpoint: GET /api/health
    pub async fn health(&self) -> Result<HealthResponse> {
        self.get("/api/health").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ProvisioningApiClient::new(&ApiConfig::default());
        assert!(client.is_ok());
        assert_eq!(client.unwrap().api_url(), "http://localhost:5000");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client =
            ProvisioningApiClient::with_url("http://example.com/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.api_url(), "http://example.com");
    }

    #[test]
    fn test_user_agent() {
        assert!(USER_AGENT.starts_with("provision-ctl/"));
    }
}
