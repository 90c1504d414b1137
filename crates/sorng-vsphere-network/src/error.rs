//! Error types for the vSphere networking crate.

use std::fmt;

/// Categorised error kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VmwareErrorKind {
    /// Management server unreachable or session dropped
    ConnectionError,
    /// Authentication failed or session expired
    AuthenticationError,
    /// Managed object or property not found
    NotFound,
    /// The object being created already exists (`AlreadyExists` fault)
    AlreadyExists,
    /// The server returned an empty inventory where one is required
    EmptyInventory,
    /// Network / port-group configuration fault
    NetworkError,
    /// Task failed on the server
    TaskError,
    /// Property value could not be decoded
    ParseError,
    /// Timeout
    Timeout,
    /// Permission denied (`NoPermission` fault)
    AccessDenied,
    /// Generic
    Other,
}

/// Crate error type carrying a kind + human-readable message.
#[derive(Debug, Clone)]
pub struct VmwareError {
    pub kind: VmwareErrorKind,
    pub message: String,
}

impl VmwareError {
    pub fn new(kind: VmwareErrorKind, msg: impl Into<String>) -> Self {
        Self { kind, message: msg.into() }
    }

    pub fn connection(msg: impl Into<String>) -> Self {
        Self::new(VmwareErrorKind::ConnectionError, msg)
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        Self::new(VmwareErrorKind::AuthenticationError, msg)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(VmwareErrorKind::NotFound, msg)
    }

    pub fn already_exists(msg: impl Into<String>) -> Self {
        Self::new(VmwareErrorKind::AlreadyExists, msg)
    }

    pub fn empty_inventory(msg: impl Into<String>) -> Self {
        Self::new(VmwareErrorKind::EmptyInventory, msg)
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::new(VmwareErrorKind::ParseError, msg)
    }

    pub fn task(msg: impl Into<String>) -> Self {
        Self::new(VmwareErrorKind::TaskError, msg)
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::new(VmwareErrorKind::Timeout, msg)
    }

    pub fn access_denied(msg: impl Into<String>) -> Self {
        Self::new(VmwareErrorKind::AccessDenied, msg)
    }

    /// Whether the server reported that the object already exists.
    pub fn is_already_exists(&self) -> bool {
        self.kind == VmwareErrorKind::AlreadyExists
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == VmwareErrorKind::NotFound
    }
}

impl fmt::Display for VmwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.kind, self.message)
    }
}

impl std::error::Error for VmwareError {}

impl From<VmwareError> for String {
    fn from(e: VmwareError) -> String {
        e.to_string()
    }
}

impl From<serde_json::Error> for VmwareError {
    fn from(e: serde_json::Error) -> Self {
        Self::parse(format!("Property decode error: {e}"))
    }
}

/// Convenience alias.
pub type VmwareResult<T> = Result<T, VmwareError>;
