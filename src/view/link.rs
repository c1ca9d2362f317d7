//! Cross-module action links
//!
//! Links always name their target module. The anchor is generated by the
//! target module's own tag generator, against the target's route table and
//! path base.

use async_trait::async_trait;
use indexmap::IndexMap;
use tracing::debug;

use crate::module::traits::ViewError;
use crate::utils::validation::ensure_some;
use crate::view::context::RenderingContext;
use crate::view::dispatch::ModuleViews;
use crate::view::fragment::HtmlContent;
use crate::view::html::HtmlTag;
use crate::view::scoped::build_link_context;

/// Request for an anchor tag pointing at an action in a specific module
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkRequest {
    pub link_text: Option<String>,
    pub action: String,
    pub controller: String,
    pub module: String,
    pub protocol: Option<String>,
    pub hostname: Option<String>,
    pub fragment: Option<String>,
    pub route_values: IndexMap<String, String>,
    pub html_attributes: IndexMap<String, String>,
}

impl LinkRequest {
    pub fn new(
        link_text: impl Into<String>,
        action: impl Into<String>,
        controller: impl Into<String>,
        module: impl Into<String>,
    ) -> Self {
        Self {
            link_text: Some(link_text.into()),
            action: action.into(),
            controller: controller.into(),
            module: module.into(),
            ..Self::default()
        }
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = Some(fragment.into());
        self
    }

    pub fn with_route_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.route_values.insert(key.into(), value.into());
        self
    }

    pub fn with_html_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.html_attributes.insert(key.into(), value.into());
        self
    }
}

/// Arguments handed to a module's [`HtmlGenerator`]
#[derive(Debug, Clone, Copy)]
pub struct ActionLink<'a> {
    pub link_text: &'a str,
    pub action: &'a str,
    pub controller: &'a str,
    pub protocol: Option<&'a str>,
    pub hostname: Option<&'a str>,
    pub fragment: Option<&'a str>,
    pub route_values: &'a IndexMap<String, String>,
    pub html_attributes: &'a IndexMap<String, String>,
}

/// Generates anchor tags for a module
#[async_trait]
pub trait HtmlGenerator: Send + Sync {
    /// Build an anchor, or `Ok(None)` when no route matches
    async fn generate_action_link(
        &self,
        context: &RenderingContext,
        link: &ActionLink<'_>,
    ) -> Result<Option<HtmlTag>, ViewError>;
}

impl ModuleViews {
    /// Build an anchor targeting `request.action` in `request.module`
    ///
    /// Missing link text fails before any module lookup. `Ok(None)` means
    /// the target module could not build a URL for the action; it is not an
    /// error.
    pub async fn module_action_link(
        &self,
        context: &RenderingContext,
        request: &LinkRequest,
    ) -> Result<Option<HtmlTag>, ViewError> {
        let link_text = ensure_some(request.link_text.as_deref(), "link_text")?;

        let target = self.registry().lookup(&request.module)?;
        let routes = target
            .services()
            .route_provider()?
            .routes(target.name());
        let scoped = build_link_context(context, &target, routes);
        let generator = target.services().html_generator()?;

        let link = ActionLink {
            link_text,
            action: &request.action,
            controller: &request.controller,
            protocol: request.protocol.as_deref(),
            hostname: request.hostname.as_deref(),
            fragment: request.fragment.as_deref(),
            route_values: &request.route_values,
            html_attributes: &request.html_attributes,
        };

        let tag = generator.generate_action_link(&scoped, &link).await?;
        if tag.is_none() {
            debug!(
                "No route in module {} for {}/{}, returning empty link",
                target.name(),
                request.controller,
                request.action
            );
        }
        Ok(tag)
    }

    /// Render [`Self::module_action_link`] to markup; an unbuildable link
    /// renders as empty content
    pub async fn module_action_link_html(
        &self,
        context: &RenderingContext,
        request: &LinkRequest,
    ) -> Result<HtmlContent, ViewError> {
        Ok(self
            .module_action_link(context, request)
            .await?
            .map(|tag| tag.to_html_content())
            .unwrap_or_default())
    }
}
