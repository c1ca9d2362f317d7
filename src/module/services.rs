//! Request-scoped service sets
//!
//! A [`ServiceSet`] is the explicit bundle of rendering collaborators a host
//! or module exposes. Contexts carry one by value instead of fetching
//! collaborators from a hidden container.

use std::fmt;
use std::sync::Arc;

use crate::module::traits::ViewError;
use crate::view::fragment::FragmentResolver;
use crate::view::link::HtmlGenerator;
use crate::view::routing::RouteProvider;

/// Rendering collaborators owned by the host or by one module
#[derive(Clone)]
pub struct ServiceSet {
    owner: String,
    fragment_resolver: Option<Arc<dyn FragmentResolver>>,
    html_generator: Option<Arc<dyn HtmlGenerator>>,
    route_provider: Option<Arc<dyn RouteProvider>>,
}

impl ServiceSet {
    /// Start an empty service set for `owner` (host or module name)
    pub fn builder(owner: impl Into<String>) -> ServiceSetBuilder {
        ServiceSetBuilder {
            set: ServiceSet {
                owner: owner.into(),
                fragment_resolver: None,
                html_generator: None,
                route_provider: None,
            },
        }
    }

    /// Name of the host or module that owns this set
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn fragment_resolver(&self) -> Result<Arc<dyn FragmentResolver>, ViewError> {
        self.fragment_resolver
            .clone()
            .ok_or_else(|| self.missing("FragmentResolver"))
    }

    pub fn html_generator(&self) -> Result<Arc<dyn HtmlGenerator>, ViewError> {
        self.html_generator
            .clone()
            .ok_or_else(|| self.missing("HtmlGenerator"))
    }

    pub fn route_provider(&self) -> Result<Arc<dyn RouteProvider>, ViewError> {
        self.route_provider
            .clone()
            .ok_or_else(|| self.missing("RouteProvider"))
    }

    fn missing(&self, service: &'static str) -> ViewError {
        ViewError::ServiceNotRegistered {
            owner: self.owner.clone(),
            service,
        }
    }
}

impl fmt::Debug for ServiceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceSet")
            .field("owner", &self.owner)
            .field("fragment_resolver", &self.fragment_resolver.is_some())
            .field("html_generator", &self.html_generator.is_some())
            .field("route_provider", &self.route_provider.is_some())
            .finish()
    }
}

/// Builder for [`ServiceSet`]
pub struct ServiceSetBuilder {
    set: ServiceSet,
}

impl ServiceSetBuilder {
    pub fn with_fragment_resolver<R: FragmentResolver + 'static>(mut self, resolver: R) -> Self {
        self.set.fragment_resolver = Some(Arc::new(resolver));
        self
    }

    pub fn with_shared_fragment_resolver(mut self, resolver: Arc<dyn FragmentResolver>) -> Self {
        self.set.fragment_resolver = Some(resolver);
        self
    }

    pub fn with_html_generator<G: HtmlGenerator + 'static>(mut self, generator: G) -> Self {
        self.set.html_generator = Some(Arc::new(generator));
        self
    }

    pub fn with_route_provider<P: RouteProvider + 'static>(mut self, provider: P) -> Self {
        self.set.route_provider = Some(Arc::new(provider));
        self
    }

    pub fn build(self) -> ServiceSet {
        self.set
    }
}
