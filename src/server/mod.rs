//! HTTP hosting layer.
//!
//! Adapts `may_minihttp` to the routing core: [`request`] drains and
//! parses incoming requests, [`service`] runs the dispatch pipeline, and
//! [`response`] writes decided responses back to the wire. The core never
//! touches connections, keep-alive, or TLS — transport belongs entirely
//! to the hosting server.

pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use request::{parse_form_params, parse_query_params, parse_request, ParsedRequest};
pub use response::write_rendered;
pub use service::AppService;
