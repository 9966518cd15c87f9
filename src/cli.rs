use crate::model::{CloudProvider, SecurityGroup};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "provision-ctl")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Provision virtual machines on AWS, Azure or GCP")]
#[command(long_about = "A terminal wizard that collects provider credentials and a VM architecture, shows a live monthly cost estimate, launches the deployment through the provisioning backend and follows it until it completes.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Provisioning backend URL (overrides config and PROVISIONER_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format where applicable
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive provisioning wizard
    Wizard {
        /// Use the in-process simulated backend instead of the HTTP API
        #[arg(long)]
        simulate: bool,
    },

    /// Estimate the monthly cost of an architecture
    Estimate {
        /// Cloud provider (aws, azure, gcp)
        #[arg(short, long)]
        provider: CloudProvider,

        /// Instance type; defaults to the provider's smallest
        #[arg(short, long, value_name = "TYPE")]
        instance_type: Option<String>,

        /// Number of VMs (1-10)
        #[arg(short = 'n', long, default_value_t = 1)]
        vm_count: u32,

        /// Storage per VM in GB (20-1000)
        #[arg(short, long, default_value_t = 20, value_name = "GB")]
        storage: u32,

        /// Operating system image
        #[arg(long, default_value = "ubuntu-20.04")]
        os: String,

        /// Firewall preset (web, ssh, default)
        #[arg(long, default_value = "web")]
        security_group: SecurityGroup,

        /// Price from the built-in catalog without contacting the backend
        #[arg(long)]
        local: bool,
    },

    /// Show the status of a deployment
    Status {
        /// Deployment ID returned when the deployment was launched
        #[arg(value_name = "DEPLOYMENT_ID")]
        deployment_id: String,

        /// Keep polling until the deployment completes or fails
        #[arg(short, long)]
        watch: bool,
    },

    /// List deployments known to the backend
    Deployments,

    /// Show instance types, operating systems and security groups
    Catalog {
        /// Only show this provider
        #[arg(short, long)]
        provider: Option<CloudProvider>,
    },

    /// Check that the provisioning backend is reachable
    Health,

    /// Show the effective configuration
    Config {
        /// Write the effective configuration to ~/.provisioner.toml
        #[arg(long)]
        save: bool,
    },
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}
