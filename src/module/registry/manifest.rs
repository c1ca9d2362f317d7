//! Module manifest parsing
//!
//! Handles parsing module.toml manifests describing a module's identity and
//! the path base it owns.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::module::traits::ViewError;

/// Module manifest (module.toml structure)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleManifest {
    /// Module name
    pub name: String,
    /// URL prefix owned by the module (defaults to `/<name>`)
    #[serde(default)]
    pub path_base: Option<String>,
    /// Module version (semantic versioning)
    #[serde(default)]
    pub version: Option<String>,
    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,
}

impl ModuleManifest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path_base: None,
            version: None,
            description: None,
        }
    }

    pub fn with_path_base(mut self, path_base: impl Into<String>) -> Self {
        self.path_base = Some(path_base.into());
        self
    }

    /// Load manifest from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ViewError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ViewError::InvalidManifest(format!("Failed to read manifest file: {}", e))
        })?;

        let manifest: ModuleManifest = toml::from_str(&contents).map_err(|e| {
            ViewError::InvalidManifest(format!("Failed to parse manifest TOML: {}", e))
        })?;

        if manifest.name.is_empty() {
            return Err(ViewError::InvalidManifest(
                "Module name cannot be empty".to_string(),
            ));
        }

        Ok(manifest)
    }

    /// Path base the module is mounted at
    pub fn effective_path_base(&self) -> String {
        self.path_base
            .clone()
            .unwrap_or_else(|| format!("/{}", self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("module.toml");
        std::fs::write(
            &path,
            "name = \"Catalog\"\npath_base = \"/catalog\"\nversion = \"1.2.0\"\n",
        )
        .unwrap();

        let manifest = ModuleManifest::from_file(&path).unwrap();
        assert_eq!(manifest.name, "Catalog");
        assert_eq!(manifest.effective_path_base(), "/catalog");
        assert_eq!(manifest.version.as_deref(), Some("1.2.0"));
    }

    #[test]
    fn test_manifest_requires_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("module.toml");
        std::fs::write(&path, "name = \"\"\n").unwrap();
        assert!(matches!(
            ModuleManifest::from_file(&path),
            Err(ViewError::InvalidManifest(_))
        ));
    }
}
