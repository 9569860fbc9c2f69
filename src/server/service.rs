use super::request::{parse_request, ParsedRequest};
use super::response::write_rendered;
use crate::dispatcher;
use crate::error::DispatchError;
use crate::renderer::{render, Rendered};
use crate::router::Router;
use crate::static_files::StaticFiles;
use http::Method;
use may_minihttp::{HttpService, Request, Response};
use serde_json::json;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, warn};

/// Adapts the HTTP server's request/response objects to the router,
/// parameter, and renderer contracts.
///
/// Holds the route table behind an `Arc` — the table is built once at
/// startup and read-only afterwards, so concurrent workers traverse it
/// without locks. The optional static file collaborator is consulted only
/// when the router reports no match.
#[derive(Clone)]
pub struct AppService {
    router: Arc<Router>,
    static_files: Option<StaticFiles>,
}

impl AppService {
    #[must_use]
    pub fn new(router: Arc<Router>) -> Self {
        Self {
            router,
            static_files: None,
        }
    }

    /// Serve files from `dir` for unmatched GET requests.
    #[must_use]
    pub fn with_static_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.static_files = Some(StaticFiles::new(dir));
        self
    }

    /// Handle one parsed request and decide the response.
    ///
    /// This is the full dispatch pipeline minus the wire: route match,
    /// parameter merge, typed body decode, handler invocation, and result
    /// rendering. Errors are mapped here — decode failures to 400, encode
    /// failures and handler faults to 500 — and are terminal for this
    /// request only.
    #[must_use]
    pub fn dispatch_parsed(&self, req: &ParsedRequest) -> Rendered {
        let method = match req.method.parse::<Method>() {
            Ok(method) => method,
            Err(_) => return self.unhandled(req),
        };

        let Some(route_match) = self.router.route(&method, &req.path) else {
            return self.unhandled(req);
        };

        let format = route_match.route.format();
        let outcome = dispatcher::dispatch(
            route_match.route,
            route_match.captures,
            &req.params,
            req.body.as_deref(),
        );

        match outcome {
            Ok(result) => match render(format, result) {
                Ok(rendered) => rendered,
                Err(err) => {
                    error!(
                        method = %req.method,
                        path = %req.path,
                        error = %err,
                        "failed to encode handler result"
                    );
                    json_error(500, json!({ "error": err.to_string() }))
                }
            },
            Err(DispatchError::Decode(err)) => {
                warn!(
                    method = %req.method,
                    path = %req.path,
                    error = %err,
                    "request body rejected"
                );
                json_error(400, json!({ "error": err.to_string() }))
            }
            Err(err) => {
                error!(
                    method = %req.method,
                    path = %req.path,
                    error = %err,
                    "handler fault"
                );
                json_error(500, json!({ "error": err.to_string() }))
            }
        }
    }

    /// No route matched: try the static file collaborator for GETs, then
    /// report not-found.
    fn unhandled(&self, req: &ParsedRequest) -> Rendered {
        if req.method == "GET" {
            if let Some(static_files) = &self.static_files {
                if let Ok((bytes, content_type)) = static_files.load(&req.path) {
                    return Rendered::ok(content_type, bytes);
                }
            }
        }
        json_error(
            404,
            json!({ "error": "Not Found", "method": req.method, "path": req.path }),
        )
    }
}

fn json_error(status: u16, body: serde_json::Value) -> Rendered {
    Rendered {
        status,
        content_type: Some("application/json"),
        location: None,
        body: body.to_string().into_bytes(),
    }
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let parsed = parse_request(req);
        let rendered = self.dispatch_parsed(&parsed);
        write_rendered(res, rendered);
        Ok(())
    }
}
