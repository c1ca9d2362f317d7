//! Module-scoped rendering contexts
//!
//! A scoped context behaves, for resolution purposes, as if the request had
//! originated inside the target module while still writing into the
//! caller's output sink at the caller's position.

use std::sync::Arc;
use tracing::debug;

use crate::module::traits::ModuleInstance;
use crate::view::context::RenderingContext;
use crate::view::routing::RouteTable;

/// Derive a context bound to `target`'s services, route state and path base
///
/// Inherits the view, view data, writer, request features and cancellation
/// token from `base`. Route data keeps the request's route values but drops
/// the caller's route tables. Never mutates `base`.
pub fn build_scoped_context(base: &RenderingContext, target: &ModuleInstance) -> RenderingContext {
    debug!(
        "Scoping rendering context from {} to module {}",
        base.owner(),
        target.name()
    );
    base.rebind(
        Arc::clone(target.services()),
        base.route_data().derive(),
        target.path_base().to_string(),
        target.name().to_string(),
    )
}

/// Scoped context with `routes` overlaid for URL generation
pub fn build_link_context(
    base: &RenderingContext,
    target: &ModuleInstance,
    routes: Option<Arc<RouteTable>>,
) -> RenderingContext {
    let mut scoped = build_scoped_context(base, target);
    if let Some(routes) = routes {
        scoped.route_data_mut().push_router(routes);
    }
    scoped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::services::ServiceSet;
    use crate::view::context::{RouteData, ViewDataDictionary};
    use serde_json::Value;

    fn host_context() -> RenderingContext {
        let services = Arc::new(ServiceSet::builder("Host").build());
        RenderingContext::new(services)
            .with_view("/Views/Home/Index")
            .with_view_data(ViewDataDictionary::new().with_model(Value::from("home-model")))
            .with_route_data(
                RouteData::new()
                    .with_value("controller", "Home")
                    .with_router(Arc::new(RouteTable::new())),
            )
            .with_path_base("/")
    }

    #[test]
    fn test_scoped_context_inherits_structure() {
        let base = host_context();
        let target = ModuleInstance::new("Catalog", "/catalog", ServiceSet::builder("Catalog").build());

        let scoped = build_scoped_context(&base, &target);

        assert_eq!(scoped.view(), Some("/Views/Home/Index"));
        assert!(Arc::ptr_eq(scoped.view_data(), base.view_data()));
        assert!(scoped.writer().same_sink(base.writer()));
        assert!(Arc::ptr_eq(scoped.features(), base.features()));
    }

    #[test]
    fn test_scoped_context_swaps_services_and_routes() {
        let base = host_context();
        let target = ModuleInstance::new("Catalog", "/catalog", ServiceSet::builder("Catalog").build());

        let scoped = build_scoped_context(&base, &target);

        assert!(Arc::ptr_eq(scoped.services(), target.services()));
        assert_eq!(scoped.path_base(), "/catalog");
        assert_eq!(scoped.module(), Some("Catalog"));
        assert!(scoped.route_data().routers().is_empty());
        assert_eq!(base.route_data().routers().len(), 1);
        assert_eq!(base.path_base(), "/");
        assert_eq!(base.module(), None);
    }

    #[test]
    fn test_link_context_overlays_module_routes() {
        let base = host_context();
        let target = ModuleInstance::new("Catalog", "/catalog", ServiceSet::builder("Catalog").build());
        let routes = Arc::new(RouteTable::new());

        let scoped = build_link_context(&base, &target, Some(Arc::clone(&routes)));

        assert_eq!(scoped.route_data().routers().len(), 1);
        assert!(Arc::ptr_eq(&scoped.route_data().routers()[0], &routes));
    }
}
