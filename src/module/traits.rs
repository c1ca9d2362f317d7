//! Module system traits and interfaces
//!
//! Defines the registry boundary the view helpers call across, the module
//! identity types, and the error type shared by every rendering operation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::module::services::ServiceSet;
use crate::view::fragment::FragmentNotFound;

/// Descriptor identifying a registered module
///
/// Immutable once the module is registered. The name doubles as the module
/// instance id used by [`ModuleRegistry::lookup`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Module name (unique identifier)
    pub name: String,
}

impl ModuleDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Live, runtime-resolved counterpart of a [`ModuleDescriptor`]
///
/// The service set belongs to the module. View helpers only borrow the
/// instance for the duration of one render or link operation.
#[derive(Clone)]
pub struct ModuleInstance {
    name: String,
    path_base: String,
    services: Arc<ServiceSet>,
}

impl ModuleInstance {
    /// Create a new module instance
    pub fn new(name: impl Into<String>, path_base: impl Into<String>, services: ServiceSet) -> Self {
        Self {
            name: name.into(),
            path_base: path_base.into(),
            services: Arc::new(services),
        }
    }

    /// Module name (instance id)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// URL prefix this module owns
    pub fn path_base(&self) -> &str {
        &self.path_base
    }

    /// The module's private service-resolution scope
    pub fn services(&self) -> &Arc<ServiceSet> {
        &self.services
    }

    pub fn descriptor(&self) -> ModuleDescriptor {
        ModuleDescriptor::new(self.name.clone())
    }
}

impl fmt::Debug for ModuleInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleInstance")
            .field("name", &self.name)
            .field("path_base", &self.path_base)
            .finish_non_exhaustive()
    }
}

/// Registry of modules known to the host
///
/// Lifecycle management (loading, unloading) lives behind this boundary;
/// view helpers only look modules up and enumerate them.
pub trait ModuleRegistry: Send + Sync {
    /// Resolve a module instance by id
    ///
    /// Fails with [`ViewError::ModuleNotFound`] when nothing is registered
    /// under `id`.
    fn lookup(&self, id: &str) -> Result<Arc<ModuleInstance>, ViewError>;

    /// Enumerate every registered module
    ///
    /// Implementations must return the same order on repeated calls within
    /// one process lifetime. Fallback discovery probes in this order.
    fn list_all(&self) -> Vec<ModuleDescriptor>;
}

/// View helper errors
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    #[error(transparent)]
    FragmentNotFound(#[from] FragmentNotFound),

    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),

    #[error("Service {service} is not registered for {owner}")]
    ServiceNotRegistered {
        owner: String,
        service: &'static str,
    },

    #[error("Invalid module manifest: {0}")]
    InvalidManifest(String),

    #[error("Invalid route template: {0}")]
    InvalidRoute(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Rendering cancelled")]
    Cancelled,

    #[error("Rendering failed: {0}")]
    Render(#[from] anyhow::Error),
}

impl ViewError {
    /// True only for the recoverable "no such fragment" condition
    pub fn is_fragment_not_found(&self) -> bool {
        matches!(self, ViewError::FragmentNotFound(_))
    }
}

impl From<serde_json::Error> for ViewError {
    fn from(e: serde_json::Error) -> Self {
        ViewError::Config(e.to_string())
    }
}

impl From<toml::de::Error> for ViewError {
    fn from(e: toml::de::Error) -> Self {
        ViewError::Config(e.to_string())
    }
}

impl From<std::io::Error> for ViewError {
    fn from(e: std::io::Error) -> Self {
        ViewError::Config(e.to_string())
    }
}
