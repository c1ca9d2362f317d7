//! Rendering context
//!
//! Ambient state a fragment or link is rendered in: the current view, its
//! view data, the output sink, route data, request features and the service
//! set collaborators are resolved from.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::module::services::ServiceSet;
use crate::view::fragment::HtmlContent;
use crate::view::routing::RouteTable;

/// Accumulated view data: the current model plus keyed entries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewDataDictionary {
    #[serde(default)]
    model: Option<Value>,
    #[serde(default)]
    entries: IndexMap<String, Value>,
}

impl ViewDataDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: Value) -> Self {
        self.model = Some(model);
        self
    }

    pub fn model(&self) -> Option<&Value> {
        self.model.as_ref()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy with `overrides` applied on top; the model is replaced when given
    pub fn merged(&self, model: Option<&Value>, overrides: &IndexMap<String, Value>) -> Self {
        let mut merged = self.clone();
        if let Some(model) = model {
            merged.model = Some(model.clone());
        }
        for (key, value) in overrides {
            merged.entries.insert(key.clone(), value.clone());
        }
        merged
    }
}

/// Output sink shared by a context and every context derived from it
#[derive(Debug, Clone, Default)]
pub struct ViewWriter {
    buffer: Arc<Mutex<String>>,
}

impl ViewWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn write(&self, content: &HtmlContent) {
        self.buffer.lock().await.push_str(content.as_str());
    }

    pub async fn contents(&self) -> String {
        self.buffer.lock().await.clone()
    }

    /// True when both writers append to the same buffer
    pub fn same_sink(&self, other: &ViewWriter) -> bool {
        Arc::ptr_eq(&self.buffer, &other.buffer)
    }
}

/// Route values of the current request plus the route tables used for URL
/// generation, in lookup order
#[derive(Debug, Clone, Default)]
pub struct RouteData {
    values: IndexMap<String, String>,
    routers: Vec<Arc<RouteTable>>,
}

impl RouteData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn with_router(mut self, routes: Arc<RouteTable>) -> Self {
        self.routers.push(routes);
        self
    }

    /// Fresh route data seeded with this request's route values and no
    /// route tables
    pub fn derive(&self) -> Self {
        Self {
            values: self.values.clone(),
            routers: Vec::new(),
        }
    }

    pub fn push_router(&mut self, routes: Arc<RouteTable>) {
        self.routers.push(routes);
    }

    pub fn values(&self) -> &IndexMap<String, String> {
        &self.values
    }

    pub fn routers(&self) -> &[Arc<RouteTable>] {
        &self.routers
    }

    /// Generate a path from the first route table that can bind `values`
    pub fn generate_path(&self, values: &IndexMap<String, String>) -> Option<String> {
        self.routers
            .iter()
            .find_map(|routes| routes.generate_path(values))
    }
}

/// Request features shared between the host and derived contexts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFeatures {
    /// Request scheme ("http" or "https")
    pub scheme: String,
    /// Request host, including port when non-default
    pub host: String,
    /// Request path relative to the path base
    pub path: String,
}

impl Default for RequestFeatures {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            host: "localhost".to_string(),
            path: "/".to_string(),
        }
    }
}

/// State needed to resolve and render a fragment or build a link
#[derive(Debug, Clone)]
pub struct RenderingContext {
    view: Option<String>,
    view_data: Arc<ViewDataDictionary>,
    writer: ViewWriter,
    route_data: RouteData,
    features: Arc<RequestFeatures>,
    services: Arc<ServiceSet>,
    path_base: String,
    module: Option<String>,
    cancellation: CancellationToken,
}

impl RenderingContext {
    /// Create a host context resolving collaborators from `services`
    pub fn new(services: Arc<ServiceSet>) -> Self {
        Self {
            view: None,
            view_data: Arc::new(ViewDataDictionary::new()),
            writer: ViewWriter::new(),
            route_data: RouteData::new(),
            features: Arc::new(RequestFeatures::default()),
            services,
            path_base: String::new(),
            module: None,
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    pub fn with_view_data(mut self, view_data: ViewDataDictionary) -> Self {
        self.view_data = Arc::new(view_data);
        self
    }

    pub fn with_writer(mut self, writer: ViewWriter) -> Self {
        self.writer = writer;
        self
    }

    pub fn with_route_data(mut self, route_data: RouteData) -> Self {
        self.route_data = route_data;
        self
    }

    pub fn with_features(mut self, features: RequestFeatures) -> Self {
        self.features = Arc::new(features);
        self
    }

    pub fn with_path_base(mut self, path_base: impl Into<String>) -> Self {
        self.path_base = path_base.into();
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Current template being rendered
    pub fn view(&self) -> Option<&str> {
        self.view.as_deref()
    }

    pub fn view_data(&self) -> &Arc<ViewDataDictionary> {
        &self.view_data
    }

    pub fn writer(&self) -> &ViewWriter {
        &self.writer
    }

    pub fn route_data(&self) -> &RouteData {
        &self.route_data
    }

    pub fn route_data_mut(&mut self) -> &mut RouteData {
        &mut self.route_data
    }

    pub fn features(&self) -> &Arc<RequestFeatures> {
        &self.features
    }

    pub fn services(&self) -> &Arc<ServiceSet> {
        &self.services
    }

    pub fn path_base(&self) -> &str {
        &self.path_base
    }

    /// Module this context is scoped to; `None` for the host
    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Label used in logs and not-found diagnostics
    pub(crate) fn owner(&self) -> &str {
        self.module.as_deref().unwrap_or_else(|| self.services.owner())
    }

    pub(crate) fn rebind(
        &self,
        services: Arc<ServiceSet>,
        route_data: RouteData,
        path_base: String,
        module: String,
    ) -> Self {
        Self {
            view: self.view.clone(),
            view_data: Arc::clone(&self.view_data),
            writer: self.writer.clone(),
            route_data,
            features: Arc::clone(&self.features),
            services,
            path_base,
            module: Some(module),
            cancellation: self.cancellation.clone(),
        }
    }
}
