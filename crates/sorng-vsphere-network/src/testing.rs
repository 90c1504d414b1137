//! In-memory [`VimSession`] used by the unit tests.
//!
//! Responses are keyed by object value + property path, method name, task
//! value, object type and continuation token. Every call is recorded.

use crate::error::{VmwareError, VmwareResult};
use crate::session::VimSession;
use crate::types::*;

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    HostRef(Option<String>),
    GetProperty { obj: String, path: String },
    Invoke { method: String, target: String, args: Value },
    WaitForTask(String),
    Retrieve(String),
    Continue(String),
    Cancel(String),
}

#[derive(Default)]
pub(crate) struct FakeVim {
    properties: HashMap<(String, String), VmwareResult<Value>>,
    invokes: HashMap<String, VmwareResult<Value>>,
    tasks: HashMap<String, VmwareResult<TaskInfo>>,
    first_pages: HashMap<String, VmwareResult<RetrieveResult>>,
    continuations: HashMap<String, VmwareResult<RetrieveResult>>,
    cancel_error: Option<VmwareError>,
    calls: Mutex<Vec<Call>>,
}

pub(crate) const HOST: &str = "host-1";

pub(crate) fn host() -> ManagedObjectRef {
    ManagedObjectRef::new(HOST_SYSTEM, HOST)
}

/// An object carrying a single `name` property.
pub(crate) fn named(obj: ManagedObjectRef, name: &str) -> ObjectContent {
    ObjectContent {
        obj,
        prop_set: vec![DynamicProperty {
            name: "name".into(),
            val: Value::String(name.into()),
        }],
    }
}

pub(crate) fn page(objects: Vec<ObjectContent>, token: Option<&str>) -> RetrieveResult {
    RetrieveResult {
        objects,
        token: token.map(str::to_string),
    }
}

pub(crate) fn task_success() -> TaskInfo {
    TaskInfo {
        key: None,
        state: TaskState::Success,
        result: None,
        error: None,
    }
}

impl FakeVim {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_property(mut self, obj: &str, path: &str, value: Value) -> Self {
        self.properties.insert((obj.into(), path.into()), Ok(value));
        self
    }

    pub(crate) fn with_property_error(mut self, obj: &str, path: &str, err: VmwareError) -> Self {
        self.properties.insert((obj.into(), path.into()), Err(err));
        self
    }

    pub(crate) fn with_invoke(mut self, method: &str, result: VmwareResult<Value>) -> Self {
        self.invokes.insert(method.into(), result);
        self
    }

    pub(crate) fn with_task(mut self, task: &str, result: VmwareResult<TaskInfo>) -> Self {
        self.tasks.insert(task.into(), result);
        self
    }

    pub(crate) fn with_objects(mut self, type_name: &str, result: VmwareResult<RetrieveResult>) -> Self {
        self.first_pages.insert(type_name.into(), result);
        self
    }

    pub(crate) fn with_continuation(mut self, token: &str, result: VmwareResult<RetrieveResult>) -> Self {
        self.continuations.insert(token.into(), result);
        self
    }

    pub(crate) fn with_cancel_error(mut self, err: VmwareError) -> Self {
        self.cancel_error = Some(err);
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn cancelled(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Cancel(token) => Some(token),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn invocations(&self, method: &str) -> Vec<(String, Value)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Invoke { method: m, target, args } if m == method => Some((target, args)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl VimSession for FakeVim {
    async fn host_ref(&self, cluster: Option<&ManagedObjectRef>) -> VmwareResult<ManagedObjectRef> {
        self.record(Call::HostRef(cluster.map(|c| c.value.clone())));
        Ok(host())
    }

    async fn get_property(
        &self,
        obj: &ManagedObjectRef,
        _type_name: &str,
        path: &str,
    ) -> VmwareResult<Value> {
        self.record(Call::GetProperty {
            obj: obj.value.clone(),
            path: path.into(),
        });
        self.properties
            .get(&(obj.value.clone(), path.to_string()))
            .cloned()
            .unwrap_or_else(|| Err(VmwareError::not_found(format!("no property {path} on {obj}"))))
    }

    async fn invoke(
        &self,
        method: &str,
        target: &ManagedObjectRef,
        args: Value,
    ) -> VmwareResult<Value> {
        self.record(Call::Invoke {
            method: method.into(),
            target: target.value.clone(),
            args,
        });
        self.invokes
            .get(method)
            .cloned()
            .unwrap_or_else(|| Err(VmwareError::not_found(format!("unexpected invoke {method}"))))
    }

    async fn wait_for_task(&self, task: &ManagedObjectRef) -> VmwareResult<TaskInfo> {
        self.record(Call::WaitForTask(task.value.clone()));
        self.tasks
            .get(&task.value)
            .cloned()
            .unwrap_or_else(|| Ok(task_success()))
    }

    async fn retrieve_objects(
        &self,
        type_name: &str,
        _properties: Vec<String>,
    ) -> VmwareResult<RetrieveResult> {
        self.record(Call::Retrieve(type_name.into()));
        self.first_pages
            .get(type_name)
            .cloned()
            .unwrap_or_else(|| Ok(RetrieveResult::default()))
    }

    async fn continue_retrieve(&self, token: &str) -> VmwareResult<RetrieveResult> {
        self.record(Call::Continue(token.into()));
        self.continuations
            .get(token)
            .cloned()
            .unwrap_or_else(|| Err(VmwareError::not_found(format!("unknown token {token}"))))
    }

    async fn cancel_retrieve(&self, token: &str) -> VmwareResult<()> {
        self.record(Call::Cancel(token.into()));
        match &self.cancel_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}
