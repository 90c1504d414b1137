//! Tunables for [`NetworkManager`](crate::network::NetworkManager).

use serde::{Deserialize, Serialize};

/// How failures around distributed port-group create / destroy are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DvPortgroupErrorPolicy {
    /// Every create failure is treated as "already exists" and every destroy
    /// failure is logged and swallowed.
    #[default]
    Lenient,
    /// Only `AlreadyExists` (create) and `NotFound` (destroy) are swallowed;
    /// everything else is returned to the caller.
    Strict,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    /// Network looked up by `get_default_network`
    #[serde(default = "default_network_name")]
    pub default_network_name: String,
    /// `numPorts` of newly created distributed port groups
    #[serde(default = "default_num_ports")]
    pub dv_portgroup_num_ports: u32,
    /// Port binding of newly created distributed port groups
    #[serde(default = "default_binding")]
    pub dv_portgroup_binding: String,
    #[serde(default)]
    pub dv_portgroup_errors: DvPortgroupErrorPolicy,
}

fn default_network_name() -> String { "vmnet0".into() }
fn default_num_ports() -> u32 { 10 }
fn default_binding() -> String { "earlyBinding".into() }

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            default_network_name: default_network_name(),
            dv_portgroup_num_ports: default_num_ports(),
            dv_portgroup_binding: default_binding(),
            dv_portgroup_errors: DvPortgroupErrorPolicy::default(),
        }
    }
}

impl NetworkConfig {
    pub fn strict() -> Self {
        Self {
            dv_portgroup_errors: DvPortgroupErrorPolicy::Strict,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let cfg: NetworkConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.default_network_name, "vmnet0");
        assert_eq!(cfg.dv_portgroup_num_ports, 10);
        assert_eq!(cfg.dv_portgroup_binding, "earlyBinding");
        assert_eq!(cfg.dv_portgroup_errors, DvPortgroupErrorPolicy::Lenient);
    }

    #[test]
    fn policy_parses_from_camel_case() {
        let cfg: NetworkConfig =
            serde_json::from_str(r#"{"dvPortgroupErrors":"strict","dvPortgroupNumPorts":32}"#)
                .unwrap();
        assert_eq!(cfg.dv_portgroup_errors, DvPortgroupErrorPolicy::Strict);
        assert_eq!(cfg.dv_portgroup_num_ports, 32);
        assert_eq!(cfg.default_network_name, "vmnet0");
    }

    #[test]
    fn strict_keeps_other_defaults() {
        let cfg = NetworkConfig::strict();
        assert_eq!(cfg.dv_portgroup_errors, DvPortgroupErrorPolicy::Strict);
        assert_eq!(cfg.dv_portgroup_binding, "earlyBinding");
    }
}
