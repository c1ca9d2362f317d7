//! Fragment (partial view) resolution
//!
//! Resolution is expressed as a [`FragmentOutcome`] so callers branch on
//! "not found" explicitly instead of intercepting an error.

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use crate::module::traits::ViewError;
use crate::view::context::{RenderingContext, ViewDataDictionary};

/// Rendered markup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlContent(String);

impl HtmlContent {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for HtmlContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request to render one named fragment
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentRequest {
    name: String,
    model: Option<Value>,
    view_data: IndexMap<String, Value>,
}

impl FragmentRequest {
    /// Fragment name, resolved per the rendering engine's own conventions
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: None,
            view_data: IndexMap::new(),
        }
    }

    pub fn with_model(mut self, model: Value) -> Self {
        self.model = Some(model);
        self
    }

    /// Add a view-data override; a repeated key replaces the earlier value
    pub fn with_view_data(mut self, key: impl Into<String>, value: Value) -> Self {
        self.view_data.insert(key.into(), value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> Option<&Value> {
        self.model.as_ref()
    }

    pub fn view_data(&self) -> &IndexMap<String, Value> {
        &self.view_data
    }

    /// Fill in the caller's model when none was given
    pub(crate) fn with_default_model(&self, context: &RenderingContext) -> Self {
        let mut request = self.clone();
        if request.model.is_none() {
            request.model = context.view_data().model().cloned();
        }
        request
    }

    /// View data the fragment renders with: `context`'s view data with this
    /// request's model and overrides applied. The context is left untouched.
    pub fn effective_view_data(&self, context: &RenderingContext) -> ViewDataDictionary {
        context.view_data().merged(self.model.as_ref(), &self.view_data)
    }
}

/// No template matched the requested fragment name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("The partial view '{name}' was not found in {owner}. Searched locations: [{}]", .searched.join(", "))]
pub struct FragmentNotFound {
    /// Fragment name as requested
    pub name: String,
    /// Host or module the lookup ran against
    pub owner: String,
    /// Locations probed by the resolver
    pub searched: Vec<String>,
}

impl FragmentNotFound {
    pub fn new(name: impl Into<String>, owner: impl Into<String>, searched: Vec<String>) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            searched,
        }
    }
}

/// Result of one fragment resolution attempt
#[derive(Debug)]
pub enum FragmentOutcome {
    Rendered(HtmlContent),
    NotFound(FragmentNotFound),
    Failed(ViewError),
}

impl FragmentOutcome {
    pub fn into_result(self) -> Result<HtmlContent, ViewError> {
        match self {
            FragmentOutcome::Rendered(html) => Ok(html),
            FragmentOutcome::NotFound(missing) => Err(ViewError::FragmentNotFound(missing)),
            FragmentOutcome::Failed(e) => Err(e),
        }
    }
}

impl From<Result<HtmlContent, ViewError>> for FragmentOutcome {
    fn from(result: Result<HtmlContent, ViewError>) -> Self {
        match result {
            Ok(html) => FragmentOutcome::Rendered(html),
            Err(ViewError::FragmentNotFound(missing)) => FragmentOutcome::NotFound(missing),
            Err(e) => FragmentOutcome::Failed(e),
        }
    }
}

/// Resolves and renders named fragments
///
/// Every resolver receives the rendering context it runs in as an explicit
/// argument, so a module's resolver always sees the module-scoped context.
#[async_trait]
pub trait FragmentResolver: Send + Sync {
    async fn render_fragment(
        &self,
        context: &RenderingContext,
        request: &FragmentRequest,
    ) -> FragmentOutcome;
}

/// Resolver over a fixed set of pre-rendered fragments
///
/// Markup is returned as registered; no templating is applied.
#[derive(Debug, Clone)]
pub struct StaticFragmentResolver {
    owner: String,
    fragments: HashMap<String, String>,
}

impl StaticFragmentResolver {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            fragments: HashMap::new(),
        }
    }

    pub fn with_fragment(mut self, name: impl Into<String>, markup: impl Into<String>) -> Self {
        self.fragments.insert(name.into(), markup.into());
        self
    }

    fn location(&self, name: &str) -> String {
        format!("/{}/Shared/{}", self.owner, name)
    }
}

#[async_trait]
impl FragmentResolver for StaticFragmentResolver {
    async fn render_fragment(
        &self,
        _context: &RenderingContext,
        request: &FragmentRequest,
    ) -> FragmentOutcome {
        match self.fragments.get(request.name()) {
            Some(markup) => FragmentOutcome::Rendered(HtmlContent::new(markup.clone())),
            None => FragmentOutcome::NotFound(FragmentNotFound::new(
                request.name(),
                self.owner.clone(),
                vec![self.location(request.name())],
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_round_trips_through_result() {
        let missing = FragmentNotFound::new("_Nav", "Host", vec!["/Host/Shared/_Nav".into()]);
        let result: Result<HtmlContent, ViewError> = Err(ViewError::FragmentNotFound(missing.clone()));
        let outcome = FragmentOutcome::from(result);
        assert!(matches!(outcome, FragmentOutcome::NotFound(ref m) if *m == missing));

        let result: Result<HtmlContent, ViewError> = Err(ViewError::Cancelled);
        let outcome = FragmentOutcome::from(result);
        assert!(matches!(outcome, FragmentOutcome::Failed(ViewError::Cancelled)));
    }

    #[test]
    fn test_not_found_message_lists_locations() {
        let missing = FragmentNotFound::new(
            "_Card",
            "Catalog",
            vec!["/Catalog/Shared/_Card".into(), "/Catalog/Product/_Card".into()],
        );
        let message = missing.to_string();
        assert!(message.contains("'_Card'"));
        assert!(message.contains("/Catalog/Product/_Card"));
    }

    #[test]
    fn test_effective_view_data_layers_request_over_context() {
        let mut base = ViewDataDictionary::new().with_model(Value::from("page"));
        base.insert("title", Value::from("Home"));
        let context = RenderingContext::new(std::sync::Arc::new(
            crate::module::services::ServiceSet::builder("Host").build(),
        ))
        .with_view_data(base);

        let request = FragmentRequest::new("_Card").with_view_data("title", Value::from("Card"));
        let effective = request.effective_view_data(&context);

        assert_eq!(effective.model(), Some(&Value::from("page")));
        assert_eq!(effective.get("title"), Some(&Value::from("Card")));
        assert_eq!(context.view_data().get("title"), Some(&Value::from("Home")));
    }

    #[test]
    fn test_view_data_override_replaces_key() {
        let request = FragmentRequest::new("_Card")
            .with_view_data("title", Value::from("a"))
            .with_view_data("title", Value::from("b"));
        assert_eq!(request.view_data().len(), 1);
        assert_eq!(request.view_data()["title"], Value::from("b"));
    }
}
