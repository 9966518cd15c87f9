use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-reported deployment phase
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentPhase {
    Initializing,
    Generating,
    Deploying,
    Completed,
    Failed,
    /// Any phase this client does not know about; treated as still running
    #[serde(other)]
    Unknown,
}

impl DeploymentPhase {
    /// No further state change is expected after this phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, DeploymentPhase::Completed | DeploymentPhase::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentPhase::Initializing => "initializing",
            DeploymentPhase::Generating => "generating",
            DeploymentPhase::Deploying => "deploying",
            DeploymentPhase::Completed => "completed",
            DeploymentPhase::Failed => "failed",
            DeploymentPhase::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DeploymentPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resources reported once infrastructure exists
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeploymentOutputs {
    pub instance_ids: Vec<String>,
    pub public_ips: Vec<String>,
    pub private_ips: Vec<String>,
}

impl DeploymentOutputs {
    pub fn is_empty(&self) -> bool {
        self.instance_ids.is_empty() && self.public_ips.is_empty() && self.private_ips.is_empty()
    }
}

/// Latest known state of one deployment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeploymentStatus {
    pub id: String,
    pub status: DeploymentPhase,
    /// 0..=100
    pub progress: u8,
    pub message: String,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub outputs: Option<DeploymentOutputs>,
}

impl DeploymentStatus {
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Wall-clock duration between start and end, when both are known
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        match (self.started_at, self.ended_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_phases() {
        assert!(DeploymentPhase::Completed.is_terminal());
        assert!(DeploymentPhase::Failed.is_terminal());
        assert!(!DeploymentPhase::Initializing.is_terminal());
        assert!(!DeploymentPhase::Generating.is_terminal());
        assert!(!DeploymentPhase::Deploying.is_terminal());
        assert!(!DeploymentPhase::Unknown.is_terminal());
    }

    #[test]
    fn test_unknown_phase_parses() {
        let phase: DeploymentPhase = serde_json::from_str("\"initiated\"").unwrap();
        assert_eq!(phase, DeploymentPhase::Unknown);
        let phase: DeploymentPhase = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(phase, DeploymentPhase::Completed);
    }

    #[test]
    fn test_elapsed() {
        let start = DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let end = DateTime::parse_from_rfc3339("2024-05-01T10:02:30Z")
            .unwrap()
            .with_timezone(&Utc);
        let status = DeploymentStatus {
            id: "deploy-abc123def".to_string(),
            status: DeploymentPhase::Completed,
            progress: 100,
            message: "Deployment completed successfully!".to_string(),
            started_at: Some(start),
            ended_at: Some(end),
            outputs: None,
        };
        assert_eq!(status.elapsed().unwrap().num_seconds(), 150);
    }
}
