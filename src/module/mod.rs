//! Module system for module-scoped views
//!
//! A module is a logically isolated sub-application with its own service
//! set and path base. The host looks modules up through a
//! [`ModuleRegistry`] and never creates or destroys them itself.
//!
//! ## Architecture
//!
//! - **Service Isolation**: Each module resolves rendering collaborators from its own [`ServiceSet`]
//! - **Path Isolation**: Each module owns a URL path base
//! - **Stable Enumeration**: Registries enumerate modules in a fixed order

pub mod registry;
pub mod services;
pub mod traits;
pub mod validation;

pub use registry::{ModuleCatalog, ModuleManifest};
pub use services::{ServiceSet, ServiceSetBuilder};
pub use traits::{ModuleDescriptor, ModuleInstance, ModuleRegistry, ViewError};
pub use validation::{ManifestValidator, ValidationResult};
