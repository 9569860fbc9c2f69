use crate::codec::{self, Format};
use crate::dispatcher::HandlerResult;
use crate::error::{BuildError, DecodeError, DispatchError};
use crate::params::{ParamSet, MAX_INLINE_PARAMS};
use http::Method;
use regex::Regex;
use serde::de::DeserializeOwned;
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::{debug, info};

/// Stack-allocated `(group_index, text)` pairs for the capture groups that
/// participated in a match. Indices are 1-based; non-participating
/// (optional) groups are absent.
pub type CaptureVec = SmallVec<[(usize, String); MAX_INLINE_PARAMS]>;

type ErasedHandler =
    Arc<dyn Fn(&ParamSet, Option<&str>) -> Result<HandlerResult, DispatchError> + Send + Sync>;

/// Whether a route declares a typed request body, and in which format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    None,
    Typed(Format),
}

/// A handler plus its content negotiation contract, ready to bind to a
/// method and path pattern.
///
/// The constructors form a closed set of route kinds — plain handlers for
/// text, JSON, and HTML output, and body-decoding handlers for JSON and
/// XML — dispatched through one type-erased invocation contract instead of
/// an overload per combination.
pub struct RouteHandler {
    format: Format,
    body: BodyKind,
    invoke: ErasedHandler,
}

impl RouteHandler {
    /// Plain-text output, no request body.
    pub fn text<F>(handler: F) -> Self
    where
        F: Fn(&ParamSet) -> anyhow::Result<HandlerResult> + Send + Sync + 'static,
    {
        Self::plain(Format::Text, handler)
    }

    /// JSON output, no request body.
    pub fn json<F>(handler: F) -> Self
    where
        F: Fn(&ParamSet) -> anyhow::Result<HandlerResult> + Send + Sync + 'static,
    {
        Self::plain(Format::Json, handler)
    }

    /// HTML output, no typed request body. Form fields arrive through the
    /// [`ParamSet`].
    pub fn html<F>(handler: F) -> Self
    where
        F: Fn(&ParamSet) -> anyhow::Result<HandlerResult> + Send + Sync + 'static,
    {
        Self::plain(Format::Html, handler)
    }

    /// JSON output with a JSON request body decoded into `T`.
    pub fn json_body<T, F>(handler: F) -> Self
    where
        T: DeserializeOwned,
        F: Fn(&ParamSet, T) -> anyhow::Result<HandlerResult> + Send + Sync + 'static,
    {
        Self::with_body(Format::Json, handler)
    }

    /// XML output with an XML request body decoded into `T`.
    pub fn xml_body<T, F>(handler: F) -> Self
    where
        T: DeserializeOwned,
        F: Fn(&ParamSet, T) -> anyhow::Result<HandlerResult> + Send + Sync + 'static,
    {
        Self::with_body(Format::Xml, handler)
    }

    fn plain<F>(format: Format, handler: F) -> Self
    where
        F: Fn(&ParamSet) -> anyhow::Result<HandlerResult> + Send + Sync + 'static,
    {
        RouteHandler {
            format,
            body: BodyKind::None,
            invoke: Arc::new(move |params, _raw| handler(params).map_err(DispatchError::Handler)),
        }
    }

    fn with_body<T, F>(format: Format, handler: F) -> Self
    where
        T: DeserializeOwned,
        F: Fn(&ParamSet, T) -> anyhow::Result<HandlerResult> + Send + Sync + 'static,
    {
        RouteHandler {
            format,
            body: BodyKind::Typed(format),
            invoke: Arc::new(move |params, raw| {
                let raw = raw.ok_or(DecodeError::MissingBody)?;
                let value: T = codec::decode(format, raw)?;
                handler(params, value).map_err(DispatchError::Handler)
            }),
        }
    }
}

/// An immutable binding of HTTP method, anchored path pattern, and handler.
///
/// Created once at startup via [`RouterBuilder`]; never mutated afterwards.
#[derive(Clone)]
pub struct Route {
    method: Method,
    pattern: Regex,
    raw_pattern: String,
    format: Format,
    body: BodyKind,
    handler: ErasedHandler,
}

impl Route {
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The pattern as registered, without the `^`/`$` anchors.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.raw_pattern
    }

    /// The route's declared output format.
    #[must_use]
    pub fn format(&self) -> Format {
        self.format
    }

    #[must_use]
    pub fn body(&self) -> BodyKind {
        self.body
    }

    pub(crate) fn invoke(
        &self,
        params: &ParamSet,
        raw_body: Option<&str>,
    ) -> Result<HandlerResult, DispatchError> {
        (self.handler)(params, raw_body)
    }
}

/// Result of successfully matching a request to a route.
///
/// Borrows the route from the table; request handling never retains it
/// past the request's lifetime.
pub struct RouteMatch<'r> {
    pub route: &'r Route,
    /// 1-based capture group texts from the matched pattern.
    pub captures: CaptureVec,
}

/// Ordered route registration, consumed by [`RouterBuilder::build`].
#[derive(Default)]
pub struct RouterBuilder {
    routes: Vec<(Method, String, RouteHandler)>,
}

impl RouterBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route. Registration order is the matching order.
    #[must_use]
    pub fn route(mut self, method: Method, pattern: &str, handler: RouteHandler) -> Self {
        self.routes.push((method, pattern.to_string(), handler));
        self
    }

    #[must_use]
    pub fn get(self, pattern: &str, handler: RouteHandler) -> Self {
        self.route(Method::GET, pattern, handler)
    }

    #[must_use]
    pub fn post(self, pattern: &str, handler: RouteHandler) -> Self {
        self.route(Method::POST, pattern, handler)
    }

    #[must_use]
    pub fn put(self, pattern: &str, handler: RouteHandler) -> Self {
        self.route(Method::PUT, pattern, handler)
    }

    #[must_use]
    pub fn delete(self, pattern: &str, handler: RouteHandler) -> Self {
        self.route(Method::DELETE, pattern, handler)
    }

    /// Compile every pattern and freeze the table.
    ///
    /// Patterns are anchored on both ends, so a route matches whole paths
    /// only, never prefixes.
    pub fn build(self) -> Result<Router, BuildError> {
        let mut routes = Vec::with_capacity(self.routes.len());
        for (method, raw_pattern, handler) in self.routes {
            let anchored = format!("^{raw_pattern}$");
            let pattern = Regex::new(&anchored).map_err(|source| BuildError::Pattern {
                pattern: raw_pattern.clone(),
                source,
            })?;
            routes.push(Route {
                method,
                pattern,
                raw_pattern,
                format: handler.format,
                body: handler.body,
                handler: handler.invoke,
            });
        }

        info!(routes_count = routes.len(), "routing table built");
        for route in &routes {
            debug!(method = %route.method, pattern = route.raw_pattern, format = %route.format, "route registered");
        }

        Ok(Router { routes })
    }
}

/// The ordered, read-only route table.
///
/// Built once at startup; requests traverse it lock-free.
#[derive(Clone)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    #[must_use]
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Match a method and path (query already stripped) against the table.
    ///
    /// Routes are tried in registration order; the first route whose method
    /// matches exactly and whose pattern matches the entire path wins. A
    /// structural match under a different method does not stop evaluation.
    /// `None` is not an error — the caller falls back to its secondary
    /// collaborator or a not-found response.
    #[must_use]
    pub fn route(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        debug!(method = %method, path = path, "route match attempt");

        for route in &self.routes {
            if route.method != *method {
                continue;
            }
            if let Some(caps) = route.pattern.captures(path) {
                let captures: CaptureVec = caps
                    .iter()
                    .enumerate()
                    .skip(1)
                    .filter_map(|(index, group)| {
                        group.map(|m| (index, m.as_str().to_string()))
                    })
                    .collect();
                debug!(
                    method = %method,
                    path = path,
                    pattern = route.raw_pattern,
                    capture_count = captures.len(),
                    "route matched"
                );
                return Some(RouteMatch { route, captures });
            }
        }

        debug!(method = %method, path = path, "no route matched");
        None
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
