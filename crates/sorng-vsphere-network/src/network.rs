//! Host networking operations: network lookup, vSwitches, physical NICs and
//! standard / distributed port groups.

use crate::config::{DvPortgroupErrorPolicy, NetworkConfig};
use crate::error::{VmwareError, VmwareResult};
use crate::keys::name_from_key;
use crate::paging::{dvs_from_batch, find_by_name, ObjectPager};
use crate::session::{get_property_as, get_property_list, VimSession};
use crate::specs::{add_port_group_spec, DvPortgroupConfigSpec};
use crate::types::*;

use serde_json::{json, Value};
use tracing::{debug, error, warn};

/// Network / port-group operations against one session.
pub struct NetworkManager<'a, S: VimSession + ?Sized> {
    session: &'a S,
    config: NetworkConfig,
}

impl<'a, S: VimSession + ?Sized> NetworkManager<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self::with_config(session, NetworkConfig::default())
    }

    pub fn with_config(session: &'a S, config: NetworkConfig) -> Self {
        Self { session, config }
    }

    fn lenient(&self) -> bool {
        self.config.dv_portgroup_errors == DvPortgroupErrorPolicy::Lenient
    }

    // ── Network lookup ──────────────────────────────────────────────

    /// Look up the configured default network (`vmnet0` unless overridden).
    pub async fn get_default_network(
        &self,
        cluster: Option<&ManagedObjectRef>,
    ) -> VmwareResult<Option<NetworkDescriptor>> {
        self.get_network_with_name(&self.config.default_network_name, cluster)
            .await
    }

    /// Find a network visible to the host (or to `cluster` when given).
    ///
    /// Standard networks match on exact `summary.name`. Distributed port
    /// groups match when `network_name` occurs anywhere in the port group's
    /// name: VLAN-backed port groups are named after a UUID and VXLAN ones
    /// carry a prefix.
    ///
    /// Every network is inspected; when several match, the last one wins.
    pub async fn get_network_with_name(
        &self,
        network_name: &str,
        cluster: Option<&ManagedObjectRef>,
    ) -> VmwareResult<Option<NetworkDescriptor>> {
        let host = self.session.host_ref(cluster).await?;
        let networks: Vec<ManagedObjectRef> = match cluster {
            Some(cluster) => {
                get_property_list(self.session, cluster, CLUSTER_COMPUTE_RESOURCE, "network").await?
            }
            None => get_property_list(self.session, &host, HOST_SYSTEM, "network").await?,
        };

        if networks.is_empty() {
            debug!("No networks configured on host {host}");
            return Ok(None);
        }
        debug!("Configured networks: {networks:?}");

        let mut found = None;
        for network in &networks {
            if network.is_type(DISTRIBUTED_VIRTUAL_PORTGROUP) {
                let config: Option<DvPortgroupConfigInfo> = get_property_as(
                    self.session,
                    network,
                    DISTRIBUTED_VIRTUAL_PORTGROUP,
                    "config",
                )
                .await?;
                let Some(config) = config else { continue };
                if !config.name.contains(network_name) {
                    continue;
                }
                let dvs = config.distributed_virtual_switch.as_ref().ok_or_else(|| {
                    VmwareError::parse(format!(
                        "Port group {} on {network} has no distributed switch",
                        config.name
                    ))
                })?;
                let dvs_uuid: Option<String> = get_property_as(
                    self.session,
                    dvs,
                    VMWARE_DISTRIBUTED_VIRTUAL_SWITCH,
                    "uuid",
                )
                .await?;
                found = Some(NetworkDescriptor {
                    kind: NetworkKind::Distributed,
                    name: config.name,
                    dv_portgroup_key: Some(config.key),
                    dvs_uuid,
                });
            } else {
                let name: Option<String> =
                    get_property_as(self.session, network, NETWORK, "summary.name").await?;
                if name.as_deref() == Some(network_name) {
                    found = Some(NetworkDescriptor::standard(network_name));
                }
            }
        }

        if found.is_none() {
            debug!("Network {network_name} not found on host {host}");
        }
        Ok(found)
    }

    // ── vSwitches / physical NICs ───────────────────────────────────

    /// Name of the first vSwitch with an uplink whose NIC name contains
    /// `vlan_interface`.
    pub async fn get_vswitch_for_vlan_interface(
        &self,
        vlan_interface: &str,
        cluster: Option<&ManagedObjectRef>,
    ) -> VmwareResult<Option<String>> {
        let host = self.session.host_ref(cluster).await?;
        let vswitches: Vec<HostVirtualSwitch> =
            get_property_list(self.session, &host, HOST_SYSTEM, "config.network.vswitch").await?;

        for vswitch in vswitches {
            // vSwitches without uplinks carry no pnic list
            let Some(pnics) = &vswitch.pnic else { continue };
            if pnics
                .iter()
                .any(|key| name_from_key(key).contains(vlan_interface))
            {
                return Ok(Some(vswitch.name));
            }
        }
        Ok(None)
    }

    /// Whether the host has a physical NIC named exactly `vlan_interface`.
    pub async fn check_if_vlan_interface_exists(
        &self,
        vlan_interface: &str,
        cluster: Option<&ManagedObjectRef>,
    ) -> VmwareResult<bool> {
        let host = self.session.host_ref(cluster).await?;
        let pnics: Vec<PhysicalNic> =
            get_property_list(self.session, &host, HOST_SYSTEM, "config.network.pnic").await?;
        Ok(pnics.iter().any(|pnic| pnic.device == vlan_interface))
    }

    // ── Standard port groups ────────────────────────────────────────

    /// VLAN id and vSwitch name of the standard port group `pg_name`.
    ///
    /// A host reporting no port groups at all is an error
    /// ([`VmwareErrorKind::EmptyInventory`](crate::error::VmwareErrorKind::EmptyInventory)).
    pub async fn get_vlanid_and_vswitch_for_portgroup(
        &self,
        pg_name: &str,
        cluster: Option<&ManagedObjectRef>,
    ) -> VmwareResult<Option<PortGroupVlanInfo>> {
        let host = self.session.host_ref(cluster).await?;
        let port_groups: Vec<HostPortGroup> =
            get_property_list(self.session, &host, HOST_SYSTEM, "config.network.portgroup").await?;

        if port_groups.is_empty() {
            let msg = format!("Server returned an empty port group list for host {host}");
            error!("{msg}");
            return Err(VmwareError::empty_inventory(msg));
        }

        Ok(port_groups
            .into_iter()
            .find(|pg| pg.spec.name == pg_name)
            .map(|pg| PortGroupVlanInfo {
                vlan_id: pg.spec.vlan_id,
                vswitch_name: name_from_key(&pg.vswitch).to_string(),
            }))
    }

    /// Add a standard port group to `vswitch_name`. VLAN id 0 means untagged.
    ///
    /// An `AlreadyExists` fault counts as success: concurrent callers may
    /// race to create the same port group.
    pub async fn create_port_group(
        &self,
        pg_name: &str,
        vswitch_name: &str,
        vlan_id: u16,
        cluster: Option<&ManagedObjectRef>,
    ) -> VmwareResult<()> {
        let spec = add_port_group_spec(vswitch_name, pg_name, vlan_id);
        let host = self.session.host_ref(cluster).await?;
        let network_system: ManagedObjectRef = get_property_as(
            self.session,
            &host,
            HOST_SYSTEM,
            "configManager.networkSystem",
        )
        .await?
        .ok_or_else(|| VmwareError::not_found(format!("Host {host} has no network system")))?;

        debug!("Creating port group {pg_name} on host {host}");
        let spec = serde_json::to_value(&spec)?;
        let args = json!({ "portgrp": spec });
        match self.session.invoke("AddPortGroup", &network_system, args).await {
            Ok(_) => {}
            Err(e) if e.is_already_exists() => debug!("Port group {pg_name} already exists"),
            Err(e) => return Err(e),
        }
        debug!("Created port group {pg_name} on host {host}");
        Ok(())
    }

    // ── Distributed port groups ─────────────────────────────────────

    /// Create a port group on the distributed switch `dvs_name`.
    ///
    /// Under [`DvPortgroupErrorPolicy::Lenient`] every failure after the
    /// switch listing (unknown switch, task error, ...) is reported as
    /// "already exists" and swallowed. Under `Strict` only `AlreadyExists`
    /// is.
    pub async fn create_dvportgroup(
        &self,
        pg_name: &str,
        dvs_name: &str,
        vlan_id: u16,
        _cluster: Option<&ManagedObjectRef>,
    ) -> VmwareResult<()> {
        debug!("Creating dv port group {pg_name} on dvs {dvs_name}");

        let dvs = ObjectPager::start(self.session, DISTRIBUTED_VIRTUAL_SWITCH, &["name"])
            .await?
            .find_map(|page| dvs_from_batch(page, dvs_name))
            .await?;

        let spec = DvPortgroupConfigSpec::new(pg_name, vlan_id, &self.config);
        let spec = serde_json::to_value(&spec)?;
        let args = json!({ "spec": spec });
        let result = match dvs {
            Some(dvs) => self.run_task("CreateDVPortgroup_Task", &dvs, args).await,
            None => Err(VmwareError::not_found(format!(
                "Distributed switch {dvs_name} not found"
            ))),
        };

        match result {
            Ok(_) => {
                debug!("Created dv port group {pg_name} on dvs {dvs_name}");
                Ok(())
            }
            Err(e) if e.is_already_exists() || self.lenient() => {
                debug!("Port group {pg_name} already exists ({e})");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Destroy the distributed port group named `pg_name`.
    ///
    /// The port group is looked up by name alone; `dvs_name` is only logged.
    /// Under [`DvPortgroupErrorPolicy::Lenient`] no failure after the lookup
    /// is reported. Under `Strict` a missing port group is still success but
    /// every other failure is returned.
    pub async fn delete_dvportgroup(
        &self,
        pg_name: &str,
        dvs_name: &str,
        _cluster: Option<&ManagedObjectRef>,
    ) -> VmwareResult<()> {
        let dvpg = find_by_name(self.session, DISTRIBUTED_VIRTUAL_PORTGROUP, pg_name).await?;

        let result = match dvpg {
            Some(dvpg) => {
                debug!("Destroying dv port group {pg_name} on dvs {dvs_name}");
                self.run_task("Destroy_Task", &dvpg, json!({})).await
            }
            None => Err(VmwareError::not_found(format!(
                "Distributed port group {pg_name} not found"
            ))),
        };

        match result {
            Ok(_) => {
                debug!("Destroyed dv port group {pg_name}");
                Ok(())
            }
            Err(e) if e.is_not_found() && !self.lenient() => {
                debug!("Dv port group {pg_name} already gone");
                Ok(())
            }
            Err(e) if self.lenient() => {
                warn!("Failed to destroy dv port group {pg_name}: {e}");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Invoke a task method and wait for it to finish.
    async fn run_task(
        &self,
        method: &str,
        target: &ManagedObjectRef,
        args: Value,
    ) -> VmwareResult<TaskInfo> {
        let task: ManagedObjectRef = serde_json::from_value(self.session.invoke(method, target, args).await?)?;
        let info = self.session.wait_for_task(&task).await?;
        if info.state == TaskState::Error {
            return Err(VmwareError::task(format!(
                "{method} on {target} failed: {}",
                info.error.as_ref().map(Value::to_string).unwrap_or_default()
            )));
        }
        Ok(info)
    }
}
