//! # rexrouter
//!
//! A regex-driven HTTP request router with pluggable content negotiation,
//! served over the `may` coroutine runtime via `may_minihttp`.
//!
//! ## Overview
//!
//! Routes bind an HTTP method and an anchored regex path pattern to a
//! handler callback plus a declared wire format (JSON, XML, HTML, plain
//! text). On each request the router performs a first-match scan in
//! registration order, path captures and query/form fields are merged into
//! one per-request [`ParamSet`], a typed body is decoded when the route
//! declares one, and the handler's [`HandlerResult`] is rendered back to
//! the wire format the route declares — or into a redirect.
//!
//! ## Architecture
//!
//! - [`router`] — route table construction and first-match resolution
//! - [`params`] — merged positional + named parameter lookup
//! - [`codec`] — JSON/XML/text codecs between wire text and typed values
//! - [`dispatcher`] — handler invocation and fault normalization
//! - [`renderer`] — `HandlerResult` to HTTP status/headers/body
//! - [`server`] — the `may_minihttp` adapter and server wrapper
//! - [`static_files`] — file-serving fallback for unmatched GETs
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rexrouter::{HandlerResult, RouteHandler, Router};
//! use rexrouter::server::{AppService, HttpServer};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let router = Router::builder()
//!     .get(
//!         "/app/rest/tasks/([0-9a-z-]+)",
//!         RouteHandler::json(|params| {
//!             let id = params.get("1").unwrap_or_default().to_string();
//!             Ok(HandlerResult::structured(serde_json::json!({ "id": id })))
//!         }),
//!     )
//!     .build()?;
//!
//! let service = AppService::new(Arc::new(router)).with_static_dir("static");
//! HttpServer(service).start("0.0.0.0:8080")?.join().ok();
//! # Ok(())
//! # }
//! ```
//!
//! ## Request Flow
//!
//! raw request → router first-match (method + full path) → `ParamSet`
//! built (captures, then query/form fields) → typed body decode when
//! declared → handler callback → result rendered per the route's format.
//! Unmatched requests fall back to the static file collaborator or a 404;
//! malformed bodies produce a 400; handler faults and encode failures a
//! 500 — each terminal for its own request only.

pub mod codec;
pub mod dispatcher;
pub mod error;
pub mod params;
pub mod renderer;
pub mod router;
pub mod runtime_config;
pub mod server;
pub mod static_files;

pub use codec::Format;
pub use dispatcher::{HandlerResult, RedirectTarget, StructuredBody};
pub use error::{BuildError, DecodeError, DispatchError, EncodeError};
pub use params::ParamSet;
pub use renderer::{render, Rendered};
pub use router::{BodyKind, Route, RouteHandler, RouteMatch, Router, RouterBuilder};
