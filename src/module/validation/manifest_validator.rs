//! Manifest validation
//!
//! Validates module manifests for naming, versioning and path base format.

use tracing::{debug, warn};

use crate::module::registry::manifest::ModuleManifest;

/// Validation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Manifest is valid
    Valid,
    /// Manifest is invalid with specific errors
    Invalid(Vec<String>),
}

/// Manifest validator
pub struct ManifestValidator {
    /// Maximum module name length
    max_name_len: usize,
}

impl ManifestValidator {
    /// Create a new manifest validator
    pub fn new() -> Self {
        Self { max_name_len: 64 }
    }

    /// Validate a module manifest
    pub fn validate(&self, manifest: &ModuleManifest) -> ValidationResult {
        let mut errors = Vec::new();

        if !self.is_valid_name(&manifest.name) {
            errors.push(format!(
                "Invalid module name: {} (must be alphanumeric with dashes/underscores)",
                manifest.name
            ));
        }

        if let Some(version) = &manifest.version {
            if !self.is_valid_version(version) {
                errors.push(format!(
                    "Invalid version format: {} (expected semantic versioning)",
                    version
                ));
            }
        }

        if let Some(path_base) = &manifest.path_base {
            if let Err(reason) = self.check_path_base(path_base) {
                errors.push(format!("Invalid path base {:?}: {}", path_base, reason));
            }
        }

        if errors.is_empty() {
            debug!("Manifest validation passed for module: {}", manifest.name);
            ValidationResult::Valid
        } else {
            warn!(
                "Manifest validation failed for module {}: {:?}",
                manifest.name, errors
            );
            ValidationResult::Invalid(errors)
        }
    }

    /// Leading alphanumeric, then alphanumerics, `-` or `_`
    fn is_valid_name(&self, name: &str) -> bool {
        let mut chars = name.chars();
        let Some(first) = chars.next() else {
            return false;
        };
        name.len() <= self.max_name_len
            && first.is_alphanumeric()
            && chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '_'))
    }

    /// `major.minor[.patch]`, optionally followed by `-prerelease` or `+build`
    fn is_valid_version(&self, version: &str) -> bool {
        let core = version.split(['-', '+']).next().unwrap_or_default();
        let parts: Vec<&str> = core.split('.').collect();
        (2..=3).contains(&parts.len())
            && parts
                .iter()
                .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
    }

    fn check_path_base(&self, path_base: &str) -> Result<(), &'static str> {
        if !path_base.starts_with('/') {
            return Err("must start with '/'");
        }
        if path_base.len() > 1 && path_base.ends_with('/') {
            return Err("must not end with '/'");
        }
        if path_base.contains(['?', '#']) {
            return Err("must not contain a query or fragment");
        }
        if path_base.contains("//") {
            return Err("must not contain empty segments");
        }
        Ok(())
    }
}

impl Default for ManifestValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_manifest() {
        let mut manifest = ModuleManifest::new("Catalog").with_path_base("/shop/catalog");
        manifest.version = Some("1.0.0-beta+7".to_string());
        assert_eq!(ManifestValidator::new().validate(&manifest), ValidationResult::Valid);
    }

    #[test]
    fn test_invalid_fields_are_all_reported() {
        let mut manifest = ModuleManifest::new("-bad").with_path_base("/catalog/");
        manifest.version = Some("one".to_string());
        match ManifestValidator::new().validate(&manifest) {
            ValidationResult::Invalid(errors) => assert_eq!(errors.len(), 3),
            ValidationResult::Valid => panic!("expected invalid manifest"),
        }
    }

    #[test]
    fn test_root_path_base_allowed() {
        let manifest = ModuleManifest::new("Root").with_path_base("/");
        assert_eq!(ManifestValidator::new().validate(&manifest), ValidationResult::Valid);
    }
}
