use crate::api::{Backend, ProvisioningBackend};
use crate::catalog;
use crate::config::types::Config;
use crate::model::{Architecture, CloudProvider, CostEstimate, SecurityGroup};
use crate::wizard::render::{display_estimate, display_field};
use colored::Colorize;

/// Arguments of `provision-ctl estimate`
#[derive(Debug, Clone)]
pub struct EstimateArgs {
    pub provider: CloudProvider,
    pub instance_type: Option<String>,
    pub vm_count: u32,
    pub storage_gb: u32,
    pub os: String,
    pub security_group: SecurityGroup,
    pub local: bool,
}

impl EstimateArgs {
    /// Architecture with defaults filled in and numbers clamped
    pub fn architecture(&self) -> Architecture {
        let instance_type = self
            .instance_type
            .clone()
            .unwrap_or_else(|| catalog::default_instance_type(self.provider).to_string());
        Architecture {
            vm_count: self.vm_count,
            instance_type,
            os: self.os.clone(),
            storage_gb: self.storage_gb,
            security_group: self.security_group,
        }
        .normalized()
    }
}

pub async fn handle_estimate(config: &Config, args: EstimateArgs, json: bool) -> crate::Result<()> {
    let architecture = args.architecture();
    if catalog::find_instance_type(args.provider, &architecture.instance_type).is_none() {
        log::warn!(
            "{} is not in the {} catalog; pricing falls back to ${}/month",
            architecture.instance_type,
            args.provider.display_name(),
            catalog::FALLBACK_MONTHLY_PRICE
        );
    }

    let estimate: CostEstimate = if args.local {
        catalog::estimate_cost(args.provider, &architecture)
    } else {
        let backend = Backend::from_config(config)?;
        backend.estimate_cost(args.provider, &architecture).await?
    };

    if json {
        let out = serde_json::json!({
            "provider": args.provider,
            "architecture": architecture,
            "estimate": estimate,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("\n{}", "Cost estimate".bold());
    display_field("Provider", args.provider.display_name());
    display_field(
        "Architecture",
        &format!(
            "{} x {}, {} GB storage, {}",
            architecture.vm_count, architecture.instance_type, architecture.storage_gb, architecture.os
        ),
    );
    println!();
    display_estimate(Some(&estimate), false);
    Ok(())
}
