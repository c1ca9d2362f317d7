//! Module-scoped view helpers
//!
//! Render partials that belong to another module, discover which module owns
//! a partial, and build links into a module's own routes.

pub mod context;
pub mod dispatch;
pub mod fragment;
pub mod html;
pub mod link;
pub mod routing;
pub mod scoped;

pub use context::{RenderingContext, RequestFeatures, RouteData, ViewDataDictionary, ViewWriter};
pub use dispatch::ModuleViews;
pub use fragment::{
    FragmentNotFound, FragmentOutcome, FragmentRequest, FragmentResolver, HtmlContent,
    StaticFragmentResolver,
};
pub use html::{DefaultHtmlGenerator, HtmlTag};
pub use link::{ActionLink, HtmlGenerator, LinkRequest};
pub use routing::{RouteEntry, RouteProvider, RouteTable, SharedRoutes};
pub use scoped::{build_link_context, build_scoped_context};
