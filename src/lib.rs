//! Module Views - module-scoped partial rendering for modular web hosts
//!
//! A host application renders UI fragments ("partials") that belong to
//! logically isolated sub-applications ("modules"), using each module's own
//! service set, routes and path base while writing into the host's output.
//!
//! ## Components
//!
//! 1. Module registry: looks modules up and enumerates them in a fixed order
//! 2. Scoped context builder: derives a rendering context bound to a module
//! 3. Dispatch: same-context, explicit cross-module and fallback discovery rendering
//! 4. Link builder: anchors generated by the target module against its own routes
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use module_views::module::{ModuleCatalog, ModuleInstance, ServiceSet};
//! use module_views::view::{FragmentRequest, ModuleViews, RenderingContext, StaticFragmentResolver};
//!
//! # tokio_test_block_on(async {
//! let mut catalog = ModuleCatalog::new();
//! catalog.register(ModuleInstance::new(
//!     "Catalog",
//!     "/catalog",
//!     ServiceSet::builder("Catalog")
//!         .with_fragment_resolver(
//!             StaticFragmentResolver::new("Catalog").with_fragment("_Card", "<div>card</div>"),
//!         )
//!         .build(),
//! ))?;
//!
//! let host = ServiceSet::builder("Storefront")
//!     .with_fragment_resolver(StaticFragmentResolver::new("Storefront"))
//!     .build();
//! let context = RenderingContext::new(Arc::new(host));
//! let views = ModuleViews::new("Storefront", Arc::new(catalog));
//!
//! let html = views.discover_partial(&context, &FragmentRequest::new("_Card")).await?;
//! assert_eq!(html.as_str(), "<div>card</div>");
//! # Ok::<(), module_views::ViewError>(())
//! # }).unwrap();
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```

pub mod config;
pub mod module;
pub mod utils;
pub mod view;

pub use config::{LoggingConfig, ViewsConfig};
pub use module::{
    ModuleCatalog, ModuleDescriptor, ModuleInstance, ModuleManifest, ModuleRegistry, ServiceSet,
    ViewError,
};
pub use view::{
    build_scoped_context, DefaultHtmlGenerator, FragmentNotFound, FragmentOutcome,
    FragmentRequest, FragmentResolver, HtmlContent, HtmlGenerator, HtmlTag, LinkRequest,
    ModuleViews, RenderingContext, RouteTable, StaticFragmentResolver,
};
