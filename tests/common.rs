//! Shared fixtures for view helper tests
//!
//! Provides recording resolvers and a builder for a host plus modules.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use module_views::module::{ModuleCatalog, ModuleInstance, ServiceSet};
use module_views::view::{
    FragmentNotFound, FragmentOutcome, FragmentRequest, FragmentResolver, HtmlContent,
    ModuleViews, RenderingContext,
};
use module_views::ViewError;

pub const HOST: &str = "Storefront";

/// Owners of every resolver invoked, in call order
pub type ProbeLog = Arc<Mutex<Vec<String>>>;

/// What a recording resolver does for one fragment name
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Return this markup
    Render(String),
    /// Fail with an opaque rendering error
    Fail(String),
    /// Return "owner|module|path_base|model" describing the context it ran in
    Echo,
    /// Return "owner|<view data JSON>" with the request's overrides applied
    EchoViewData,
    /// Write this markup into the context's writer, then return it
    Write(String),
    /// Cancel the request's token and report not found
    CancelRequest,
}

pub fn render(markup: &str) -> Behavior {
    Behavior::Render(markup.to_string())
}

pub struct RecordingResolver {
    owner: String,
    fragments: HashMap<String, Behavior>,
    log: ProbeLog,
}

impl RecordingResolver {
    pub fn new(owner: &str, fragments: Vec<(&str, Behavior)>, log: ProbeLog) -> Self {
        Self {
            owner: owner.to_string(),
            fragments: fragments
                .into_iter()
                .map(|(name, behavior)| (name.to_string(), behavior))
                .collect(),
            log,
        }
    }
}

#[async_trait]
impl FragmentResolver for RecordingResolver {
    async fn render_fragment(
        &self,
        context: &RenderingContext,
        request: &FragmentRequest,
    ) -> FragmentOutcome {
        self.log.lock().unwrap().push(self.owner.clone());
        match self.fragments.get(request.name()) {
            Some(Behavior::Render(markup)) => FragmentOutcome::Rendered(HtmlContent::new(markup.clone())),
            Some(Behavior::Fail(message)) => {
                FragmentOutcome::Failed(ViewError::Render(anyhow::anyhow!(message.clone())))
            }
            Some(Behavior::Echo) => FragmentOutcome::Rendered(HtmlContent::new(format!(
                "{}|{}|{}|{}",
                self.owner,
                context.module().unwrap_or("host"),
                context.path_base(),
                request
                    .model()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "none".to_string())
            ))),
            Some(Behavior::EchoViewData) => {
                let view_data = request.effective_view_data(context);
                FragmentOutcome::Rendered(HtmlContent::new(format!(
                    "{}|{}",
                    self.owner,
                    serde_json::to_string(&view_data).unwrap()
                )))
            }
            Some(Behavior::Write(markup)) => {
                let html = HtmlContent::new(markup.clone());
                context.writer().write(&html).await;
                FragmentOutcome::Rendered(html)
            }
            Some(Behavior::CancelRequest) => {
                context.cancellation().cancel();
                FragmentOutcome::NotFound(self.not_found(request))
            }
            None => FragmentOutcome::NotFound(self.not_found(request)),
        }
    }
}

impl RecordingResolver {
    fn not_found(&self, request: &FragmentRequest) -> FragmentNotFound {
        FragmentNotFound::new(
            request.name(),
            self.owner.clone(),
            vec![format!("/{}/Shared/{}", self.owner, request.name())],
        )
    }
}

/// Host plus registered modules wired to one probe log
pub struct ViewsFixture {
    pub views: ModuleViews,
    pub context: RenderingContext,
    pub log: ProbeLog,
}

impl ViewsFixture {
    pub fn builder() -> ViewsFixtureBuilder {
        ViewsFixtureBuilder {
            host_fragments: Vec::new(),
            modules: Vec::new(),
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn probes(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

pub struct ViewsFixtureBuilder {
    host_fragments: Vec<(&'static str, Behavior)>,
    modules: Vec<(&'static str, Option<Vec<(&'static str, Behavior)>>)>,
    log: ProbeLog,
}

impl ViewsFixtureBuilder {
    pub fn host_fragment(mut self, name: &'static str, behavior: Behavior) -> Self {
        self.host_fragments.push((name, behavior));
        self
    }

    pub fn module(mut self, name: &'static str, fragments: Vec<(&'static str, Behavior)>) -> Self {
        self.modules.push((name, Some(fragments)));
        self
    }

    /// Module registered without any fragment resolver
    pub fn bare_module(mut self, name: &'static str) -> Self {
        self.modules.push((name, None));
        self
    }

    pub fn build(self) -> ViewsFixture {
        let mut catalog = ModuleCatalog::new();
        for (name, fragments) in self.modules {
            let mut services = ServiceSet::builder(name);
            if let Some(fragments) = fragments {
                services = services.with_fragment_resolver(RecordingResolver::new(
                    name,
                    fragments,
                    Arc::clone(&self.log),
                ));
            }
            catalog
                .register(ModuleInstance::new(
                    name,
                    format!("/{}", name.to_lowercase()),
                    services.build(),
                ))
                .unwrap();
        }

        let host = ServiceSet::builder(HOST)
            .with_fragment_resolver(RecordingResolver::new(
                HOST,
                self.host_fragments,
                Arc::clone(&self.log),
            ))
            .build();

        ViewsFixture {
            views: ModuleViews::new(HOST, Arc::new(catalog)),
            context: RenderingContext::new(Arc::new(host)).with_path_base("/store"),
            log: self.log,
        }
    }
}
