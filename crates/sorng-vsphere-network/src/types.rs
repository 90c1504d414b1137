//! Shared types for vSphere host networking.
//!
//! Field names follow the vSphere Web Services data objects, so records decode
//! straight from the property values the session hands back.

use serde::{Deserialize, Serialize};
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Managed object types
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub const HOST_SYSTEM: &str = "HostSystem";
pub const CLUSTER_COMPUTE_RESOURCE: &str = "ClusterComputeResource";
pub const NETWORK: &str = "Network";
pub const DISTRIBUTED_VIRTUAL_PORTGROUP: &str = "DistributedVirtualPortgroup";
pub const DISTRIBUTED_VIRTUAL_SWITCH: &str = "DistributedVirtualSwitch";
pub const VMWARE_DISTRIBUTED_VIRTUAL_SWITCH: &str = "VmwareDistributedVirtualSwitch";

/// VLAN id 0: no VLAN tagging.
pub const NO_VLAN: u16 = 0;

/// Opaque server-side handle of an inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManagedObjectRef {
    #[serde(rename = "type")]
    pub r#type: String,
    pub value: String,
}

impl ManagedObjectRef {
    pub fn new(r#type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            r#type: r#type.into(),
            value: value.into(),
        }
    }

    pub fn is_type(&self, r#type: &str) -> bool {
        self.r#type == r#type
    }
}

impl fmt::Display for ManagedObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.r#type, self.value)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Network lookup results
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NetworkKind {
    /// Per-host standard port group (`Network`).
    Standard,
    /// Port group on a distributed switch (`DistributedVirtualPortgroup`).
    Distributed,
}

/// A network found on a host or cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDescriptor {
    pub kind: NetworkKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dv_portgroup_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dvs_uuid: Option<String>,
}

impl NetworkDescriptor {
    pub fn standard(name: impl Into<String>) -> Self {
        Self {
            kind: NetworkKind::Standard,
            name: name.into(),
            dv_portgroup_key: None,
            dvs_uuid: None,
        }
    }

    pub fn distributed(
        name: impl Into<String>,
        portgroup_key: impl Into<String>,
        dvs_uuid: impl Into<String>,
    ) -> Self {
        Self {
            kind: NetworkKind::Distributed,
            name: name.into(),
            dv_portgroup_key: Some(portgroup_key.into()),
            dvs_uuid: Some(dvs_uuid.into()),
        }
    }
}

/// VLAN id and owning vSwitch of a standard port group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortGroupVlanInfo {
    pub vlan_id: u16,
    pub vswitch_name: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Host network configuration records
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `DistributedVirtualPortgroup.config`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DvPortgroupConfigInfo {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub distributed_virtual_switch: Option<ManagedObjectRef>,
    #[serde(default)]
    pub num_ports: Option<u32>,
    #[serde(default, rename = "type")]
    pub binding_type: Option<String>,
}

/// One entry of `config.network.vswitch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostVirtualSwitch {
    pub name: String,
    #[serde(default)]
    pub key: Option<String>,
    /// Physical NIC keys, e.g. `key-vim.host.PhysicalNic-vmnic0`.
    /// Absent on a switch with no uplinks.
    #[serde(default)]
    pub pnic: Option<Vec<String>>,
    #[serde(default)]
    pub portgroup: Option<Vec<String>>,
}

/// One entry of `config.network.pnic`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalNic {
    pub device: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub mac: Option<String>,
    #[serde(default)]
    pub driver: Option<String>,
}

/// One entry of `config.network.portgroup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostPortGroup {
    #[serde(default)]
    pub key: Option<String>,
    pub spec: HostPortGroupSpec,
    /// vSwitch key, e.g. `key-vim.host.VirtualSwitch-vSwitch0`.
    pub vswitch: String,
}

/// `HostPortGroupSpec`, both as read back and as sent to `AddPortGroup`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostPortGroupSpec {
    pub name: String,
    #[serde(default)]
    pub vlan_id: u16,
    #[serde(default)]
    pub vswitch_name: String,
    #[serde(default)]
    pub policy: serde_json::Value,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Property collector results
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicProperty {
    pub name: String,
    #[serde(default)]
    pub val: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectContent {
    pub obj: ManagedObjectRef,
    #[serde(default)]
    pub prop_set: Vec<DynamicProperty>,
}

impl ObjectContent {
    /// Value of the named property, if it was retrieved.
    pub fn property(&self, name: &str) -> Option<&serde_json::Value> {
        self.prop_set.iter().find(|p| p.name == name).map(|p| &p.val)
    }
}

/// One page of a `RetrievePropertiesEx` / `ContinueRetrievePropertiesEx` call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveResult {
    #[serde(default)]
    pub objects: Vec<ObjectContent>,
    /// Continuation token; present while more pages remain on the server.
    #[serde(default)]
    pub token: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Task
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskState {
    Queued,
    Running,
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    #[serde(default)]
    pub key: Option<String>,
    pub state: TaskState,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}
