//! Module validation framework
//!
//! Provides manifest validation for modules registered with the host.

pub mod manifest_validator;

pub use manifest_validator::{ManifestValidator, ValidationResult};
