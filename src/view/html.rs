//! HTML tags and the default anchor generator

use async_trait::async_trait;
use indexmap::IndexMap;
use std::fmt;

use crate::module::traits::ViewError;
use crate::view::context::RenderingContext;
use crate::view::fragment::HtmlContent;
use crate::view::link::{ActionLink, HtmlGenerator};
use crate::view::routing::encode_component;

/// A single HTML element with text content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlTag {
    tag_name: String,
    attributes: IndexMap<String, String>,
    inner_html: String,
}

impl HtmlTag {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: IndexMap::new(),
            inner_html: String::new(),
        }
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    /// Raw (already escaped) inner markup
    pub fn inner_html(&self) -> &str {
        &self.inner_html
    }

    /// Set attribute `key`; empty keys are ignored
    pub fn merge_attribute(&mut self, key: &str, value: &str, replace_existing: bool) {
        if key.is_empty() {
            return;
        }
        if replace_existing || !self.attributes.contains_key(key) {
            self.attributes.insert(key.to_string(), value.to_string());
        }
    }

    pub fn merge_attributes(&mut self, attributes: &IndexMap<String, String>) {
        for (key, value) in attributes {
            self.merge_attribute(key, value, false);
        }
    }

    /// Set the inner content to `text`, HTML-escaped
    pub fn set_inner_text(&mut self, text: &str) {
        self.inner_html = escape(text);
    }

    pub fn to_html_content(&self) -> HtmlContent {
        HtmlContent::new(self.to_string())
    }
}

impl fmt::Display for HtmlTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag_name)?;
        for (key, value) in &self.attributes {
            write!(f, " {}=\"{}\"", key, escape(value))?;
        }
        write!(f, ">{}</{}>", self.inner_html, self.tag_name)
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Anchor generator driven by the context's route data and path base
///
/// Register one in each module's service set; it produces URLs from the
/// route tables and path base of whatever context it is handed.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHtmlGenerator;

impl DefaultHtmlGenerator {
    fn build_url(
        context: &RenderingContext,
        link: &ActionLink<'_>,
        path: &str,
    ) -> Result<String, ViewError> {
        let mut url = format!("{}{}", context.path_base().trim_end_matches('/'), path);

        // Empty protocol or hostname counts as absent
        let protocol = link.protocol.filter(|p| !p.is_empty());
        let hostname = link.hostname.filter(|h| !h.is_empty());
        if protocol.is_some() || hostname.is_some() {
            let scheme = protocol.unwrap_or(context.features().scheme.as_str());
            let host = hostname.unwrap_or(context.features().host.as_str());
            let uri = http::Uri::builder()
                .scheme(scheme)
                .authority(host)
                .path_and_query(url.as_str())
                .build()
                .map_err(|e| anyhow::anyhow!("invalid link target {}://{}{}: {}", scheme, host, url, e))?;
            url = uri.to_string();
        }

        if let Some(fragment) = link.fragment.filter(|f| !f.is_empty()) {
            url.push('#');
            url.push_str(&encode_component(fragment));
        }

        Ok(url)
    }
}

#[async_trait]
impl HtmlGenerator for DefaultHtmlGenerator {
    async fn generate_action_link(
        &self,
        context: &RenderingContext,
        link: &ActionLink<'_>,
    ) -> Result<Option<HtmlTag>, ViewError> {
        let mut values = link.route_values.clone();
        values.insert("controller".to_string(), link.controller.to_string());
        values.insert("action".to_string(), link.action.to_string());

        let Some(path) = context.route_data().generate_path(&values) else {
            return Ok(None);
        };
        let url = Self::build_url(context, link, &path)?;

        let mut tag = HtmlTag::new("a");
        tag.set_inner_text(link.link_text);
        tag.merge_attributes(link.html_attributes);
        tag.merge_attribute("href", &url, true);
        Ok(Some(tag))
    }
}
