//! Configuration management for module views
//!
//! Handles configuration loading (JSON or TOML), validation, and the
//! module manifests the host registers at startup.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::module::registry::manifest::ModuleManifest;
use crate::module::traits::ViewError;
use crate::module::validation::{ManifestValidator, ValidationResult};

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log filter (e.g. "info", "module_views=debug"); RUST_LOG takes precedence
    #[serde(default)]
    pub filter: Option<String>,

    /// Emit JSON lines (requires the `json-logging` feature)
    #[serde(default)]
    pub json_format: bool,
}

/// View helper configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewsConfig {
    /// Identity of the host application; naming it as a module renders in
    /// the caller's own context
    pub host_name: String,

    /// Probe registered modules when a fragment is missing from the host
    #[serde(default = "default_true")]
    pub fallback_discovery: bool,

    /// Modules registered with the host, in enumeration order
    #[serde(default)]
    pub modules: Vec<ModuleManifest>,

    /// Logging configuration
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

fn default_true() -> bool {
    true
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            host_name: "Host".to_string(),
            fallback_discovery: true,
            modules: Vec::new(),
            logging: None,
        }
    }
}

impl ViewsConfig {
    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self, ViewError> {
        let content = std::fs::read_to_string(path)?;
        let config: ViewsConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<(), ViewError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self, ViewError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ViewError> {
        Ok(toml::from_str(content)?)
    }

    /// Check host identity and module manifests
    pub fn validate(&self) -> Result<(), ViewError> {
        if self.host_name.trim().is_empty() {
            return Err(ViewError::Config("host_name must not be empty".to_string()));
        }

        let validator = ManifestValidator::new();
        let mut seen = HashSet::new();
        for manifest in &self.modules {
            if let ValidationResult::Invalid(errors) = validator.validate(manifest) {
                return Err(ViewError::InvalidManifest(format!(
                    "{}: {}",
                    manifest.name,
                    errors.join("; ")
                )));
            }
            if !seen.insert(manifest.name.as_str()) {
                return Err(ViewError::Config(format!(
                    "Module {} is declared more than once",
                    manifest.name
                )));
            }
            if manifest.name == self.host_name {
                return Err(ViewError::Config(format!(
                    "Module {} has the same name as the host",
                    manifest.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_config_with_modules() {
        let config = ViewsConfig::from_toml_str(
            r#"
            host_name = "Storefront"

            [[modules]]
            name = "Billing"

            [[modules]]
            name = "Catalog"
            path_base = "/shop"
            "#,
        )
        .unwrap();

        assert_eq!(config.host_name, "Storefront");
        assert!(config.fallback_discovery);
        assert_eq!(config.modules.len(), 2);
        assert_eq!(config.modules[0].effective_path_base(), "/Billing");
        assert_eq!(config.modules[1].effective_path_base(), "/shop");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_duplicate_module_rejected() {
        let mut config = ViewsConfig::default();
        config.modules.push(ModuleManifest::new("Billing"));
        config.modules.push(ModuleManifest::new("Billing"));
        assert!(matches!(config.validate(), Err(ViewError::Config(_))));
    }

    #[test]
    fn test_blank_host_rejected() {
        let config = ViewsConfig {
            host_name: "  ".to_string(),
            ..ViewsConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_manifest_rejected() {
        let mut config = ViewsConfig::default();
        config
            .modules
            .push(ModuleManifest::new("Catalog").with_path_base("catalog"));
        assert!(matches!(config.validate(), Err(ViewError::InvalidManifest(_))));
    }
}
