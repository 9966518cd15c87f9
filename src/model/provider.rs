use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cloud providers the wizard can provision on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CloudProvider {
    Aws,
    Azure,
    Gcp,
}

impl CloudProvider {
    /// Returns the lowercase string identifier for this provider
    pub fn as_str(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "aws",
            CloudProvider::Azure => "azure",
            CloudProvider::Gcp => "gcp",
        }
    }

    /// Returns the human-readable display name for this provider
    pub fn display_name(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "Amazon Web Services",
            CloudProvider::Azure => "Microsoft Azure",
            CloudProvider::Gcp => "Google Cloud Platform",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "Industry-leading cloud platform with global infrastructure",
            CloudProvider::Azure => "Enterprise-grade cloud services with hybrid capabilities",
            CloudProvider::Gcp => "Data and AI-focused cloud platform with advanced analytics",
        }
    }

    /// Returns all supported cloud providers, in wizard display order
    pub fn all() -> &'static [CloudProvider] {
        &[CloudProvider::Aws, CloudProvider::Azure, CloudProvider::Gcp]
    }
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CloudProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aws" | "amazon" => Ok(CloudProvider::Aws),
            "azure" | "microsoft" => Ok(CloudProvider::Azure),
            "gcp" | "google" | "google-cloud" => Ok(CloudProvider::Gcp),
            _ => Err(format!(
                "Unknown cloud provider: '{}'. Valid options: aws, azure, gcp",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloud_provider_as_str() {
        assert_eq!(CloudProvider::Aws.as_str(), "aws");
        assert_eq!(CloudProvider::Azure.as_str(), "azure");
        assert_eq!(CloudProvider::Gcp.as_str(), "gcp");
    }

    #[test]
    fn test_cloud_provider_from_str() {
        assert_eq!(CloudProvider::from_str("AWS").unwrap(), CloudProvider::Aws);
        assert_eq!(CloudProvider::from_str("microsoft").unwrap(), CloudProvider::Azure);
        assert_eq!(CloudProvider::from_str("google").unwrap(), CloudProvider::Gcp);
        assert!(CloudProvider::from_str("hetzner").is_err());
    }

    #[test]
    fn test_cloud_provider_serde() {
        assert_eq!(serde_json::to_string(&CloudProvider::Gcp).unwrap(), "\"gcp\"");
        let parsed: CloudProvider = serde_json::from_str("\"azure\"").unwrap();
        assert_eq!(parsed, CloudProvider::Azure);
    }
}
