use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

pub const VM_COUNT_RANGE: RangeInclusive<u32> = 1..=10;
pub const STORAGE_GB_RANGE: RangeInclusive<u32> = 20..=1000;

/// Firewall preset applied to every VM
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SecurityGroup {
    #[default]
    Web,
    Ssh,
    Default,
}

impl SecurityGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityGroup::Web => "web",
            SecurityGroup::Ssh => "ssh",
            SecurityGroup::Default => "default",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SecurityGroup::Web => "Web Server (HTTP, HTTPS, SSH)",
            SecurityGroup::Ssh => "SSH Only",
            SecurityGroup::Default => "Default (HTTP, SSH)",
        }
    }

    /// Inbound TCP ports opened by this preset
    pub fn ports(&self) -> &'static [u16] {
        match self {
            SecurityGroup::Web => &[80, 443, 22],
            SecurityGroup::Ssh => &[22],
            SecurityGroup::Default => &[80, 22],
        }
    }

    pub fn all() -> &'static [SecurityGroup] {
        &[SecurityGroup::Web, SecurityGroup::Ssh, SecurityGroup::Default]
    }
}

impl fmt::Display for SecurityGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SecurityGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "web" => Ok(SecurityGroup::Web),
            "ssh" => Ok(SecurityGroup::Ssh),
            "default" => Ok(SecurityGroup::Default),
            _ => Err(format!(
                "Unknown security group: '{}'. Valid options: web, ssh, default",
                s
            )),
        }
    }
}

/// VM layout requested from the provider.
///
/// Serialized with the field names the provisioning backend expects
/// (`vmCount`, `instanceType`, `os`, `storage`, `securityGroup`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Architecture {
    pub vm_count: u32,
    pub instance_type: String,
    pub os: String,
    #[serde(rename = "storage")]
    pub storage_gb: u32,
    pub security_group: SecurityGroup,
}

impl Default for Architecture {
    fn default() -> Self {
        Self {
            vm_count: 1,
            instance_type: "t3.micro".to_string(),
            os: "ubuntu-20.04".to_string(),
            storage_gb: 20,
            security_group: SecurityGroup::Web,
        }
    }
}

impl Architecture {
    pub fn clamp_vm_count(count: u32) -> u32 {
        count.clamp(*VM_COUNT_RANGE.start(), *VM_COUNT_RANGE.end())
    }

    pub fn clamp_storage_gb(gb: u32) -> u32 {
        gb.clamp(*STORAGE_GB_RANGE.start(), *STORAGE_GB_RANGE.end())
    }

    /// Pull numeric fields back into their allowed ranges
    pub fn normalized(mut self) -> Self {
        self.vm_count = Self::clamp_vm_count(self.vm_count);
        self.storage_gb = Self::clamp_storage_gb(self.storage_gb);
        self
    }

    /// Both selections required before leaving the architecture step are present
    pub fn is_complete(&self) -> bool {
        !self.instance_type.trim().is_empty() && !self.os.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(Architecture::default()).unwrap();
        assert_eq!(json["vmCount"], 1);
        assert_eq!(json["instanceType"], "t3.micro");
        assert_eq!(json["os"], "ubuntu-20.04");
        assert_eq!(json["storage"], 20);
        assert_eq!(json["securityGroup"], "web");
    }

    #[test]
    fn test_normalized_clamps() {
        let arch = Architecture {
            vm_count: 0,
            storage_gb: 5000,
            ..Default::default()
        }
        .normalized();
        assert_eq!(arch.vm_count, 1);
        assert_eq!(arch.storage_gb, 1000);

        assert_eq!(Architecture::clamp_vm_count(42), 10);
        assert_eq!(Architecture::clamp_storage_gb(1), 20);
    }

    #[test]
    fn test_is_complete() {
        assert!(Architecture::default().is_complete());
        let arch = Architecture {
            os: "  ".to_string(),
            ..Default::default()
        };
        assert!(!arch.is_complete());
    }

    #[test]
    fn test_security_group_ports() {
        assert_eq!(SecurityGroup::Web.ports(), &[80, 443, 22]);
        assert_eq!(SecurityGroup::Ssh.ports(), &[22]);
        assert_eq!("DEFAULT".parse::<SecurityGroup>().unwrap(), SecurityGroup::Default);
    }
}
