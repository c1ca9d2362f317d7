//! Module route tables
//!
//! Route tables here are used for URL generation only. Each module exposes
//! its own table through a [`RouteProvider`] so links resolve against the
//! module's routes rather than the caller's.

use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::Arc;

use crate::module::traits::ViewError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Parameter {
        name: String,
        default: Option<String>,
        optional: bool,
    },
}

/// One named route template, e.g. `{controller=Home}/{action=Index}/{id?}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    name: String,
    segments: Vec<Segment>,
    defaults: IndexMap<String, String>,
}

impl RouteEntry {
    /// Parse a route template
    ///
    /// Segments are either literals or a single `{name}`, `{name?}` or
    /// `{name=default}` parameter. Optional parameters must come last.
    pub fn new(name: impl Into<String>, template: &str) -> Result<Self, ViewError> {
        let mut segments = Vec::new();
        let mut defaults = IndexMap::new();

        for raw in template.trim_matches('/').split('/').filter(|s| !s.is_empty()) {
            if let Some(inner) = raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                let (inner, optional) = match inner.strip_suffix('?') {
                    Some(stripped) => (stripped, true),
                    None => (inner, false),
                };
                let (param, default) = match inner.split_once('=') {
                    Some((param, default)) => (param, Some(default.to_string())),
                    None => (inner, None),
                };
                if param.is_empty() || param.contains(['{', '}']) {
                    return Err(ViewError::InvalidRoute(template.to_string()));
                }
                if let Some(default) = &default {
                    defaults.insert(param.to_string(), default.clone());
                }
                segments.push(Segment::Parameter {
                    name: param.to_string(),
                    default,
                    optional,
                });
            } else if raw.contains(['{', '}']) {
                return Err(ViewError::InvalidRoute(template.to_string()));
            } else {
                segments.push(Segment::Literal(raw.to_string()));
            }
        }

        let first_optional = segments
            .iter()
            .position(|s| matches!(s, Segment::Parameter { optional: true, .. }));
        if let Some(pos) = first_optional {
            if pos + 1 != segments.len() {
                return Err(ViewError::InvalidRoute(template.to_string()));
            }
        }

        Ok(Self {
            name: name.into(),
            segments,
            defaults,
        })
    }

    /// Add a default that is not a template parameter
    ///
    /// Such defaults act as required values: the route only generates a URL
    /// when the supplied value (if any) matches.
    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn has_parameter(&self, key: &str) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Parameter { name, .. } if name == key))
    }

    /// Bind `values` to this template
    pub fn generate_path(&self, values: &IndexMap<String, String>) -> Option<String> {
        for (key, required) in &self.defaults {
            if self.has_parameter(key) {
                continue;
            }
            if let Some(value) = values.get(key) {
                if !value.eq_ignore_ascii_case(required) {
                    return None;
                }
            }
        }

        let mut consumed: HashSet<&str> = HashSet::new();
        // (encoded segment, equals its default)
        let mut parts: Vec<(String, bool)> = Vec::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => parts.push((text.clone(), false)),
                Segment::Parameter {
                    name,
                    default,
                    optional,
                } => {
                    let value = values
                        .get(name)
                        .filter(|v| !v.is_empty())
                        .or(default.as_ref());
                    match value {
                        Some(value) => {
                            consumed.insert(name.as_str());
                            let is_default = default
                                .as_ref()
                                .map_or(false, |d| d.eq_ignore_ascii_case(value));
                            parts.push((encode_component(value), is_default));
                        }
                        None if *optional => break,
                        None => return None,
                    }
                }
            }
        }

        while parts.last().map_or(false, |(_, is_default)| *is_default) {
            parts.pop();
        }

        let mut path = String::from("/");
        path.push_str(
            &parts
                .into_iter()
                .map(|(segment, _)| segment)
                .collect::<Vec<_>>()
                .join("/"),
        );

        let query: Vec<String> = values
            .iter()
            .filter(|(key, _)| !consumed.contains(key.as_str()) && !self.defaults.contains_key(*key))
            .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
            .collect();
        if !query.is_empty() {
            path.push('?');
            path.push_str(&query.join("&"));
        }

        Some(path)
    }
}

/// Ordered route table belonging to one module
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<RouteEntry>,
    actions: Option<HashSet<(String, String)>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(mut self, route: RouteEntry) -> Self {
        self.routes.push(route);
        self
    }

    /// Declare a (controller, action) pair served by this module
    ///
    /// Once any pair is declared, links to undeclared pairs are not
    /// generated.
    pub fn with_action(mut self, controller: &str, action: &str) -> Self {
        self.actions
            .get_or_insert_with(HashSet::new)
            .insert((controller.to_ascii_lowercase(), action.to_ascii_lowercase()));
        self
    }

    pub fn routes(&self) -> &[RouteEntry] {
        &self.routes
    }

    fn serves(&self, values: &IndexMap<String, String>) -> bool {
        let Some(actions) = &self.actions else {
            return true;
        };
        match (values.get("controller"), values.get("action")) {
            (Some(controller), Some(action)) => actions.contains(&(
                controller.to_ascii_lowercase(),
                action.to_ascii_lowercase(),
            )),
            _ => false,
        }
    }

    /// Generate a path from the first route that binds `values`
    pub fn generate_path(&self, values: &IndexMap<String, String>) -> Option<String> {
        if !self.serves(values) {
            return None;
        }
        self.routes.iter().find_map(|route| route.generate_path(values))
    }
}

/// Exposes a module's own route table
pub trait RouteProvider: Send + Sync {
    /// Route table registered for `module`, if any
    fn routes(&self, module: &str) -> Option<Arc<RouteTable>>;
}

/// Route tables keyed by module name
#[derive(Debug, Clone, Default)]
pub struct SharedRoutes {
    tables: IndexMap<String, Arc<RouteTable>>,
}

impl SharedRoutes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_routes(mut self, module: impl Into<String>, routes: RouteTable) -> Self {
        self.tables.insert(module.into(), Arc::new(routes));
        self
    }
}

impl RouteProvider for SharedRoutes {
    fn routes(&self, module: &str) -> Option<Arc<RouteTable>> {
        self.tables.get(module).cloned()
    }
}

/// Percent-encode everything outside the RFC 3986 unreserved set
pub(crate) fn encode_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
