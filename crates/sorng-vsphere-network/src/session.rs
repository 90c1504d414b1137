//! The remote session seam.
//!
//! Transport, authentication, task polling and the property-collector wire
//! protocol all live behind [`VimSession`]; this crate only composes calls on
//! it. Property values come back as JSON and are decoded here with serde.

use crate::error::{VmwareError, VmwareResult};
use crate::types::{ManagedObjectRef, RetrieveResult, TaskInfo};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// An authenticated vSphere Web Services session.
#[async_trait]
pub trait VimSession: Send + Sync {
    /// Resolve the host to operate on, picking one from `cluster` when given.
    async fn host_ref(&self, cluster: Option<&ManagedObjectRef>) -> VmwareResult<ManagedObjectRef>;

    /// Fetch a single property (dotted path allowed) of a managed object.
    async fn get_property(
        &self,
        obj: &ManagedObjectRef,
        type_name: &str,
        path: &str,
    ) -> VmwareResult<Value>;

    /// Invoke a method on a managed object. Task methods return the task
    /// reference. An `AlreadyExists` fault maps to
    /// [`VmwareErrorKind::AlreadyExists`](crate::error::VmwareErrorKind::AlreadyExists).
    async fn invoke(
        &self,
        method: &str,
        target: &ManagedObjectRef,
        args: Value,
    ) -> VmwareResult<Value>;

    /// Block until the task finishes. Errors when the task ends in `error`.
    async fn wait_for_task(&self, task: &ManagedObjectRef) -> VmwareResult<TaskInfo>;

    /// First page of all objects of `type_name` with the given properties.
    async fn retrieve_objects(
        &self,
        type_name: &str,
        properties: Vec<String>,
    ) -> VmwareResult<RetrieveResult>;

    async fn continue_retrieve(&self, token: &str) -> VmwareResult<RetrieveResult>;

    /// Release server-side state held for an unfinished retrieval.
    async fn cancel_retrieve(&self, token: &str) -> VmwareResult<()>;
}

// ── Typed property helpers ──────────────────────────────────────────

/// Whether a property value carries nothing.
///
/// The server reports an unset array property as an empty string or as an
/// `ArrayOf*` wrapper with nothing inside, not just as `null`.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => {
            map.is_empty() || (map.len() == 1 && map.values().all(is_empty_value))
        }
        _ => false,
    }
}

/// Strip an `ArrayOf*` wrapper (`{"HostVirtualSwitch": [..]}`) down to its array.
fn unwrap_array(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.len() == 1 => {
            let key = map.keys().next().cloned().unwrap_or_default();
            match map.remove(&key) {
                Some(inner @ Value::Array(_)) => inner,
                Some(other) => {
                    map.insert(key, other);
                    Value::Object(map)
                }
                None => Value::Object(map),
            }
        }
        other => other,
    }
}

/// Fetch a property and decode it, `None` when the property is empty.
pub async fn get_property_as<T, S>(
    session: &S,
    obj: &ManagedObjectRef,
    type_name: &str,
    path: &str,
) -> VmwareResult<Option<T>>
where
    T: DeserializeOwned,
    S: VimSession + ?Sized,
{
    let value = session.get_property(obj, type_name, path).await?;
    if is_empty_value(&value) {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| VmwareError::parse(format!("{type_name}.{path} on {obj}: {e}")))
}

/// Fetch an array property and decode its elements; empty when unset.
pub async fn get_property_list<T, S>(
    session: &S,
    obj: &ManagedObjectRef,
    type_name: &str,
    path: &str,
) -> VmwareResult<Vec<T>>
where
    T: DeserializeOwned,
    S: VimSession + ?Sized,
{
    let value = session.get_property(obj, type_name, path).await?;
    if is_empty_value(&value) {
        return Ok(Vec::new());
    }
    serde_json::from_value(unwrap_array(value))
        .map_err(|e| VmwareError::parse(format!("{type_name}.{path} on {obj}: {e}")))
}
