//! # Multi-cloud provisioner
//!
//! A terminal wizard for provisioning virtual machines on AWS, Azure or GCP
//! through a provisioning backend.
//!
//! ## Features
//!
//! - **Guided wizard**: provider, credentials, architecture, review and live monitoring steps
//! - **Gated navigation**: credentials are validated before the architecture step unlocks
//! - **Live estimates**: monthly cost is recalculated whenever the architecture changes
//! - **Deployment tracking**: status is polled until the deployment completes or fails
//! - **Simulation mode**: an in-process backend for demos and offline use
//!
//! ## Example
//!
//! ```rust,no_run
//! use multicloud_provisioner::api::SimulatedBackend;
//! use multicloud_provisioner::model::CloudProvider;
//! use multicloud_provisioner::wizard::WizardController;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn demo() {
//! let backend = Arc::new(SimulatedBackend::default());
//! let mut wizard = WizardController::new(backend, Duration::from_secs(3));
//! wizard.select_provider(CloudProvider::Aws).await;
//! wizard.next().await.unwrap();
//! # }
//! ```

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod wizard;

// Re-export commonly used types and functions
pub use error::{ProvisionerError, Result};
pub use handlers::*;
use cli::{Cli, Commands};

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub async fn run_command(cli: Cli) -> Result<()> {
    let mut config = config::load_config(cli.config.as_deref())?;
    let simulate = matches!(cli.command, Commands::Wizard { simulate: true }).then_some(true);
    config::apply_overrides(&mut config, cli.api_url.clone(), simulate);
    config::validate(&config)?;

    match cli.command {
        Commands::Wizard { .. } => handlers::handle_wizard(&config, cli.json).await,
        Commands::Estimate {
            provider,
            instance_type,
            vm_count,
            storage,
            os,
            security_group,
            local,
        } => {
            let args = EstimateArgs {
                provider,
                instance_type,
                vm_count,
                storage_gb: storage,
                os,
                security_group,
                local,
            };
            handlers::handle_estimate(&config, args, cli.json).await
        }
        Commands::Status {
            deployment_id,
            watch,
        } => handlers::handle_status(&config, &deployment_id, watch, cli.json).await,
        Commands::Deployments => handlers::handle_deployments(&config, cli.json).await,
        Commands::Catalog { provider } => handlers::handle_catalog(provider, cli.json),
        Commands::Health => handlers::handle_health(&config, cli.json).await,
        Commands::Config { save } => handlers::handle_config(&config, save, cli.json),
    }
}
