//! Speech routes: the URL table, its views and the request / response types.

pub mod http;
pub mod urls;
pub mod views;

pub use http::{Method, Request, Response};
pub use urls::{ResolvedRoute, RouteName, RouteTable};
