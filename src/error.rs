use thiserror::Error;

use crate::api::ApiError;

/// Crate-level error for everything `provision-ctl` does outside a single API call
#[derive(Error, Debug)]
pub enum ProvisionerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] inquire::InquireError),

    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFailed {
        path: String,
        source: std::io::Error,
    },

    #[error("Config parsing failed: {0}")]
    ParsingFailed(String),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Failures raised by the wizard itself, one per requesting component.
///
/// None of these abort the wizard; the controller turns them into banners.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WizardError {
    #[error("Credential validation failed: {0}")]
    ValidationFailure(String),

    #[error("Cost estimation failed: {0}")]
    EstimationFailure(String),

    #[error("Deployment launch failed: {0}")]
    LaunchFailure(String),

    #[error("Status poll failed: {0}")]
    PollFailure(String),

    #[error("Cannot proceed: {0}")]
    StepBlocked(String),
}

pub type Result<T> = std::result::Result<T, ProvisionerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wizard_error_messages() {
        let err = WizardError::LaunchFailure("timeout".to_string());
        assert_eq!(err.to_string(), "Deployment launch failed: timeout");

        let err = WizardError::ValidationFailure("Missing required credentials".to_string());
        assert!(err.to_string().contains("Missing required credentials"));
    }

    #[test]
    fn test_config_error_wraps() {
        let err: ProvisionerError = ConfigError::InvalidValue {
            key: "polling.interval_secs",
            reason: "must be between 1 and 30".to_string(),
        }
        .into();
        assert!(err.to_string().contains("polling.interval_secs"));
    }
}
