//! Module-aware partial rendering
//!
//! Three entry points share one resolution path:
//!
//! - [`ModuleViews::partial`] renders in the caller's own context.
//! - [`ModuleViews::module_partial`] renders inside a named module, using a
//!   context scoped to that module and the module's own resolver.
//! - [`ModuleViews::discover_partial`] tries the caller's context first and,
//!   only when the fragment is not found there, probes every registered
//!   module in registry order until one renders it.
//!
//! Only [`FragmentOutcome::NotFound`] is recovered from, and only during
//! discovery. Every other failure returns to the caller untouched.

use std::sync::Arc;
use tracing::{debug, info};

use crate::config::ViewsConfig;
use crate::module::traits::{ModuleRegistry, ViewError};
use crate::utils::validation::ensure;
use crate::view::context::RenderingContext;
use crate::view::fragment::{FragmentOutcome, FragmentRequest, HtmlContent};
use crate::view::scoped::build_scoped_context;

/// Module-aware view helpers bound to one host application
#[derive(Clone)]
pub struct ModuleViews {
    host_name: String,
    registry: Arc<dyn ModuleRegistry>,
    fallback_discovery: bool,
}

impl ModuleViews {
    /// Create helpers for the host application named `host_name`
    pub fn new(host_name: impl Into<String>, registry: Arc<dyn ModuleRegistry>) -> Self {
        Self {
            host_name: host_name.into(),
            registry,
            fallback_discovery: true,
        }
    }

    /// Create helpers from configuration
    pub fn from_config(config: &ViewsConfig, registry: Arc<dyn ModuleRegistry>) -> Self {
        Self {
            host_name: config.host_name.clone(),
            registry,
            fallback_discovery: config.fallback_discovery,
        }
    }

    /// Enable or disable probing modules in [`Self::discover_partial`]
    pub fn with_fallback_discovery(mut self, enabled: bool) -> Self {
        self.fallback_discovery = enabled;
        self
    }

    /// Identity of the host application
    pub fn host_name(&self) -> &str {
        &self.host_name
    }

    pub fn registry(&self) -> &Arc<dyn ModuleRegistry> {
        &self.registry
    }

    /// Render a fragment in the caller's own context
    pub async fn partial(
        &self,
        context: &RenderingContext,
        request: &FragmentRequest,
    ) -> Result<HtmlContent, ViewError> {
        Self::check_request(request)?;
        self.render_in_context(context, request).await.into_result()
    }

    /// Render a fragment inside `module`
    ///
    /// Naming the host itself renders in the caller's context. An unknown
    /// module fails with [`ViewError::ModuleNotFound`]; no other module is
    /// tried.
    pub async fn module_partial(
        &self,
        context: &RenderingContext,
        request: &FragmentRequest,
        module: &str,
    ) -> Result<HtmlContent, ViewError> {
        Self::check_request(request)?;
        self.render_in_module(context, request, module)
            .await
            .into_result()
    }

    /// Render a fragment whose owner is not known in advance
    ///
    /// On a miss in the caller's context every registered module is tried
    /// once, in registry order, and the first rendering wins. If no module
    /// has the fragment, the original not-found error from the caller's
    /// context is returned.
    pub async fn discover_partial(
        &self,
        context: &RenderingContext,
        request: &FragmentRequest,
    ) -> Result<HtmlContent, ViewError> {
        Self::check_request(request)?;
        let original = match self.render_in_context(context, request).await {
            FragmentOutcome::Rendered(html) => return Ok(html),
            FragmentOutcome::NotFound(missing) => missing,
            FragmentOutcome::Failed(e) => return Err(e),
        };

        if !self.fallback_discovery {
            return Err(original.into());
        }

        debug!(
            "Fragment {} not found in {}, probing registered modules",
            request.name(),
            context.owner()
        );

        for descriptor in self.registry.list_all() {
            if descriptor.name == self.host_name {
                continue;
            }
            if context.is_cancelled() {
                return Err(ViewError::Cancelled);
            }
            match self.render_in_module(context, request, &descriptor.name).await {
                FragmentOutcome::Rendered(html) => {
                    info!(
                        "Fragment {} resolved by module {}",
                        request.name(),
                        descriptor.name
                    );
                    return Ok(html);
                }
                FragmentOutcome::NotFound(_) => {
                    debug!("Module {} has no fragment {}", descriptor.name, request.name());
                }
                FragmentOutcome::Failed(e) => return Err(e),
            }
        }

        Err(original.into())
    }

    /// Blocking variant of [`Self::module_partial`]
    ///
    /// Must not be called from inside an async runtime worker.
    pub fn module_partial_blocking(
        &self,
        context: &RenderingContext,
        request: &FragmentRequest,
        module: &str,
    ) -> Result<HtmlContent, ViewError> {
        futures::executor::block_on(self.module_partial(context, request, module))
    }

    /// Blocking variant of [`Self::discover_partial`]
    ///
    /// Must not be called from inside an async runtime worker.
    pub fn discover_partial_blocking(
        &self,
        context: &RenderingContext,
        request: &FragmentRequest,
    ) -> Result<HtmlContent, ViewError> {
        futures::executor::block_on(self.discover_partial(context, request))
    }

    fn check_request(request: &FragmentRequest) -> Result<(), ViewError> {
        ensure(!request.name().is_empty(), "fragment name must not be empty")
    }

    async fn render_in_module(
        &self,
        context: &RenderingContext,
        request: &FragmentRequest,
        module: &str,
    ) -> FragmentOutcome {
        if module == self.host_name {
            return self.render_in_context(context, request).await;
        }

        let target = match self.registry.lookup(module) {
            Ok(target) => target,
            Err(e) => return FragmentOutcome::Failed(e),
        };
        let scoped = build_scoped_context(context, &target);
        self.render_in_context(&scoped, request).await
    }

    /// Resolve with the fragment resolver of `context`'s own service set
    async fn render_in_context(
        &self,
        context: &RenderingContext,
        request: &FragmentRequest,
    ) -> FragmentOutcome {
        let resolver = match context.services().fragment_resolver() {
            Ok(resolver) => resolver,
            Err(e) => return FragmentOutcome::Failed(e),
        };
        let request = request.with_default_model(context);
        let token = context.cancellation().clone();

        tokio::select! {
            biased;
            _ = token.cancelled() => FragmentOutcome::Failed(ViewError::Cancelled),
            outcome = resolver.render_fragment(context, &request) => outcome,
        }
    }
}

impl std::fmt::Debug for ModuleViews {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleViews")
            .field("host_name", &self.host_name)
            .field("fallback_discovery", &self.fallback_discovery)
            .finish_non_exhaustive()
    }
}
