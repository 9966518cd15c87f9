//! Provider catalog: instance types with monthly pricing, operating system
//! images, regions and security group presets offered by the wizard.
//!
//! Prices are list prices per VM per month and drive both the local estimate
//! and the simulated backend.

use crate::model::{Architecture, CloudProvider, CostEstimate};

/// Price used for instance types missing from the catalog
pub const FALLBACK_MONTHLY_PRICE: f64 = 50.0;
/// Storage price per GB per VM per month
pub const STORAGE_PRICE_PER_GB: f64 = 0.1;
/// Flat network charge per deployment per month
pub const NETWORK_MONTHLY_COST: f64 = 5.0;

/// A machine/instance type option
#[derive(Debug, Clone)]
pub struct InstanceType {
    /// Instance type ID (e.g., "t3.micro", "e2-small")
    pub id: &'static str,
    pub vcpu: u32,
    /// Memory in GB
    pub memory_gb: u32,
    pub monthly_price: f64,
}

impl InstanceType {
    pub fn label(&self) -> String {
        format!(
            "{} ({} vCPU, {}GB RAM) - ${}/month",
            self.id, self.vcpu, self.memory_gb, self.monthly_price
        )
    }
}

/// An operating system image option
#[derive(Debug, Clone)]
pub struct OsImage {
    pub id: &'static str,
    pub name: &'static str,
}

/// A cloud region option
#[derive(Debug, Clone)]
pub struct CloudRegion {
    pub id: &'static str,
    pub name: &'static str,
}

// =============================================================================
// Amazon Web Services
// =============================================================================

pub static AWS_INSTANCE_TYPES: &[InstanceType] = &[
    InstanceType { id: "t3.micro", vcpu: 1, memory_gb: 1, monthly_price: 8.5 },
    InstanceType { id: "t3.small", vcpu: 1, memory_gb: 2, monthly_price: 17.0 },
    InstanceType { id: "t3.medium", vcpu: 2, memory_gb: 4, monthly_price: 34.0 },
    InstanceType { id: "t3.large", vcpu: 2, memory_gb: 8, monthly_price: 67.0 },
    InstanceType { id: "m5.large", vcpu: 2, memory_gb: 8, monthly_price: 87.0 },
    InstanceType { id: "m5.xlarge", vcpu: 4, memory_gb: 16, monthly_price: 174.0 },
];

pub static AWS_REGIONS: &[CloudRegion] = &[
    CloudRegion { id: "us-east-1", name: "US East (N. Virginia)" },
    CloudRegion { id: "us-west-2", name: "US West (Oregon)" },
    CloudRegion { id: "eu-west-1", name: "Europe (Ireland)" },
    CloudRegion { id: "ap-southeast-1", name: "Asia Pacific (Singapore)" },
];

// =============================================================================
// Microsoft Azure
// =============================================================================

pub static AZURE_INSTANCE_TYPES: &[InstanceType] = &[
    InstanceType { id: "Standard_B1s", vcpu: 1, memory_gb: 1, monthly_price: 7.5 },
    InstanceType { id: "Standard_B2s", vcpu: 2, memory_gb: 4, monthly_price: 30.0 },
    InstanceType { id: "Standard_D2s_v3", vcpu: 2, memory_gb: 8, monthly_price: 70.0 },
];

// =============================================================================
// Google Cloud Platform
// =============================================================================

pub static GCP_INSTANCE_TYPES: &[InstanceType] = &[
    InstanceType { id: "e2-micro", vcpu: 1, memory_gb: 1, monthly_price: 6.8 },
    InstanceType { id: "e2-small", vcpu: 1, memory_gb: 2, monthly_price: 13.6 },
    InstanceType { id: "e2-medium", vcpu: 1, memory_gb: 4, monthly_price: 27.2 },
];

// =============================================================================
// Shared
// =============================================================================

pub static OPERATING_SYSTEMS: &[OsImage] = &[
    OsImage { id: "ubuntu-20.04", name: "Ubuntu 20.04 LTS" },
    OsImage { id: "ubuntu-22.04", name: "Ubuntu 22.04 LTS" },
    OsImage { id: "centos-7", name: "CentOS 7" },
    OsImage { id: "rhel-8", name: "Red Hat Enterprise Linux 8" },
    OsImage { id: "windows-2019", name: "Windows Server 2019" },
    OsImage { id: "windows-2022", name: "Windows Server 2022" },
];

/// Get instance types for a cloud provider
pub fn instance_types_for(provider: CloudProvider) -> &'static [InstanceType] {
    match provider {
        CloudProvider::Aws => AWS_INSTANCE_TYPES,
        CloudProvider::Azure => AZURE_INSTANCE_TYPES,
        CloudProvider::Gcp => GCP_INSTANCE_TYPES,
    }
}

pub fn find_instance_type(provider: CloudProvider, id: &str) -> Option<&'static InstanceType> {
    instance_types_for(provider).iter().find(|t| t.id == id)
}

/// First (cheapest listed) instance type for a provider
pub fn default_instance_type(provider: CloudProvider) -> &'static str {
    instance_types_for(provider)
        .first()
        .map(|t| t.id)
        .unwrap_or("")
}

pub fn find_os(id: &str) -> Option<&'static OsImage> {
    OPERATING_SYSTEMS.iter().find(|os| os.id == id)
}

/// Regions selectable for a provider; only AWS credentials carry a region
pub fn regions_for(provider: CloudProvider) -> &'static [CloudRegion] {
    match provider {
        CloudProvider::Aws => AWS_REGIONS,
        _ => &[],
    }
}

pub fn monthly_price(provider: CloudProvider, instance_type: &str) -> f64 {
    find_instance_type(provider, instance_type)
        .map(|t| t.monthly_price)
        .unwrap_or(FALLBACK_MONTHLY_PRICE)
}

/// Estimate monthly cost from catalog prices.
///
/// compute = price * vm_count, storage = storage_gb * 0.1 * vm_count, network is flat.
pub fn estimate_cost(provider: CloudProvider, architecture: &Architecture) -> CostEstimate {
    let vm_count = f64::from(architecture.vm_count);
    let compute = monthly_price(provider, &architecture.instance_type) * vm_count;
    let storage = f64::from(architecture.storage_gb) * STORAGE_PRICE_PER_GB * vm_count;
    CostEstimate::from_parts(compute, storage, NETWORK_MONTHLY_COST)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{STORAGE_GB_RANGE, VM_COUNT_RANGE};
    use proptest::prelude::*;

    #[test]
    fn test_aws_t3_micro_two_vms() {
        let arch = Architecture {
            vm_count: 2,
            instance_type: "t3.micro".to_string(),
            storage_gb: 20,
            ..Default::default()
        };
        let estimate = estimate_cost(CloudProvider::Aws, &arch);
        assert_eq!(estimate.breakdown.compute, 17.0);
        assert_eq!(estimate.breakdown.storage, 4.0);
        assert_eq!(estimate.breakdown.network, 5.0);
        assert_eq!(estimate.monthly_cost, 26.0);
    }

    #[test]
    fn test_unknown_instance_type_uses_fallback() {
        let arch = Architecture {
            instance_type: "x9.mega".to_string(),
            ..Default::default()
        };
        let estimate = estimate_cost(CloudProvider::Aws, &arch);
        assert_eq!(estimate.breakdown.compute, 50.0);
    }

    #[test]
    fn test_catalog_lookup() {
        assert_eq!(default_instance_type(CloudProvider::Aws), "t3.micro");
        assert_eq!(default_instance_type(CloudProvider::Azure), "Standard_B1s");
        assert_eq!(default_instance_type(CloudProvider::Gcp), "e2-micro");
        assert!(find_instance_type(CloudProvider::Gcp, "t3.micro").is_none());
        assert_eq!(find_os("rhel-8").unwrap().name, "Red Hat Enterprise Linux 8");
        assert_eq!(regions_for(CloudProvider::Aws).len(), 4);
        assert!(regions_for(CloudProvider::Gcp).is_empty());
    }

    #[test]
    fn test_label() {
        let t = find_instance_type(CloudProvider::Aws, "m5.xlarge").unwrap();
        assert_eq!(t.label(), "m5.xlarge (4 vCPU, 16GB RAM) - $174/month");
    }

    fn any_provider() -> impl Strategy<Value = CloudProvider> {
        prop_oneof![
            Just(CloudProvider::Aws),
            Just(CloudProvider::Azure),
            Just(CloudProvider::Gcp),
        ]
    }

    proptest! {
        #[test]
        fn prop_total_is_sum_of_breakdown(
            provider in any_provider(),
            type_index in 0usize..6,
            vm_count in VM_COUNT_RANGE,
            storage_gb in STORAGE_GB_RANGE,
        ) {
            let types = instance_types_for(provider);
            let arch = Architecture {
                vm_count,
                instance_type: types[type_index % types.len()].id.to_string(),
                storage_gb,
                ..Default::default()
            };
            let estimate = estimate_cost(provider, &arch);
            prop_assert!(estimate.is_consistent());
            prop_assert!(estimate.monthly_cost > 0.0);
        }
    }
}
