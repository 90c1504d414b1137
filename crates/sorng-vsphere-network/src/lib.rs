//! # SortOfRemote NG – vSphere Host Networking
//!
//! Network lookups and port-group management for ESXi hosts and vCenter
//! clusters, composed from property fetches and task calls on a
//! caller-supplied vSphere Web Services session.
//!
//! ## Modules
//!
//! - **types** — Managed object references and host network records
//! - **error** — Crate-specific error types
//! - **config** — Manager defaults and error policy
//! - **session** — `VimSession` trait + typed property helpers
//! - **keys** — Name extraction from pnic / vSwitch keys
//! - **paging** — Paged object retrieval with token cleanup
//! - **specs** — Port-group creation payloads
//! - **network** — Network lookup, vSwitches, NICs, standard and distributed port groups

pub mod types;
pub mod error;
pub mod config;
pub mod session;
pub mod keys;
pub mod paging;
pub mod specs;
pub mod network;

#[cfg(test)]
mod testing;

pub use config::{DvPortgroupErrorPolicy, NetworkConfig};
pub use error::{VmwareError, VmwareErrorKind, VmwareResult};
pub use network::NetworkManager;
pub use session::VimSession;
