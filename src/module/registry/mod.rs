//! Module registry and manifests
//!
//! Handles module manifest parsing and the in-memory registry the view
//! helpers look modules up in.

pub mod catalog;
pub mod manifest;

pub use catalog::ModuleCatalog;
pub use manifest::ModuleManifest;
