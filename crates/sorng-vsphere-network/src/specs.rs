//! Request payloads for port-group creation.

use crate::config::NetworkConfig;
use crate::types::HostPortGroupSpec;

use serde::{Deserialize, Serialize};

/// `HostPortGroupSpec` for `HostNetworkSystem.AddPortGroup`, with an empty
/// network policy so the port group inherits the vSwitch's.
pub fn add_port_group_spec(vswitch_name: &str, pg_name: &str, vlan_id: u16) -> HostPortGroupSpec {
    HostPortGroupSpec {
        name: pg_name.to_string(),
        vlan_id,
        vswitch_name: vswitch_name.to_string(),
        policy: serde_json::json!({}),
    }
}

/// `VmwareDistributedVirtualSwitchVlanIdSpec`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VlanIdSpec {
    pub vlan_id: u16,
    pub inherited: bool,
}

/// `VMwareDVSPortSetting`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DvsPortSetting {
    pub vlan: VlanIdSpec,
}

/// `DVPortgroupConfigSpec` for `CreateDVPortgroup_Task`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DvPortgroupConfigSpec {
    pub name: String,
    pub num_ports: u32,
    #[serde(rename = "type")]
    pub binding_type: String,
    pub default_port_config: DvsPortSetting,
}

impl DvPortgroupConfigSpec {
    pub fn new(pg_name: &str, vlan_id: u16, config: &NetworkConfig) -> Self {
        Self {
            name: pg_name.to_string(),
            num_ports: config.dv_portgroup_num_ports,
            binding_type: config.dv_portgroup_binding.clone(),
            default_port_config: DvsPortSetting {
                vlan: VlanIdSpec {
                    vlan_id,
                    inherited: false,
                },
            },
        }
    }
}
