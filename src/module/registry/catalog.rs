//! In-memory module registry
//!
//! Modules are enumerated in registration order. The order never changes
//! for the lifetime of the catalog, which keeps fallback discovery
//! deterministic across requests.

use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::module::registry::manifest::ModuleManifest;
use crate::module::services::ServiceSet;
use crate::module::traits::{ModuleDescriptor, ModuleInstance, ModuleRegistry, ViewError};
use crate::module::validation::{ManifestValidator, ValidationResult};

/// Registry of module instances keyed by name
#[derive(Debug, Default)]
pub struct ModuleCatalog {
    modules: IndexMap<String, Arc<ModuleInstance>>,
}

impl ModuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module instance
    pub fn register(&mut self, instance: ModuleInstance) -> Result<(), ViewError> {
        if self.modules.contains_key(instance.name()) {
            return Err(ViewError::Config(format!(
                "Module {} is already registered",
                instance.name()
            )));
        }
        debug!(
            "Registering module {} at {}",
            instance.name(),
            instance.path_base()
        );
        self.modules
            .insert(instance.name().to_string(), Arc::new(instance));
        Ok(())
    }

    /// Build a catalog from manifests, binding each module to the service
    /// set returned by `services_for`
    pub fn from_manifests<F>(manifests: &[ModuleManifest], mut services_for: F) -> Result<Self, ViewError>
    where
        F: FnMut(&ModuleManifest) -> ServiceSet,
    {
        let validator = ManifestValidator::new();
        let mut catalog = Self::new();

        for manifest in manifests {
            if let ValidationResult::Invalid(errors) = validator.validate(manifest) {
                return Err(ViewError::InvalidManifest(format!(
                    "{}: {}",
                    manifest.name,
                    errors.join("; ")
                )));
            }
            let services = services_for(manifest);
            catalog.register(ModuleInstance::new(
                manifest.name.clone(),
                manifest.effective_path_base(),
                services,
            ))?;
        }

        info!("Module catalog built with {} modules", catalog.len());
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl ModuleRegistry for ModuleCatalog {
    fn lookup(&self, id: &str) -> Result<Arc<ModuleInstance>, ViewError> {
        self.modules
            .get(id)
            .cloned()
            .ok_or_else(|| ViewError::ModuleNotFound(id.to_string()))
    }

    fn list_all(&self) -> Vec<ModuleDescriptor> {
        self.modules
            .values()
            .map(|instance| instance.descriptor())
            .collect()
    }
}
