use crate::codec;
use crate::error::{DispatchError, EncodeError};
use crate::params::ParamSet;
use crate::router::{CaptureVec, Route};
use serde::Serialize;
use std::any::type_name;
use std::fmt;
use tracing::{debug, error};

/// A redirect location returned by a handler.
///
/// This is a distinct path-like type rather than a bare string so a
/// literal string payload that happens to look like a path can never be
/// mistaken for a redirect instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget(String);

impl RedirectTarget {
    #[must_use]
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RedirectTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Type-erased serializable response body.
///
/// Serialization is deferred to render time so an [`EncodeError`] surfaces
/// at the renderer, where the route's declared format is known. The XML
/// root element name defaults to the value's short type name, mirroring
/// the class-name aliasing of the wire format this crate reproduces.
pub trait StructuredBody: Send {
    /// Root element name used when the route's output format is XML.
    fn xml_root(&self) -> &'static str;
    /// Serialize as a JSON byte body.
    fn encode_json(&self) -> Result<Vec<u8>, EncodeError>;
    /// Serialize as an XML document.
    fn encode_xml(&self) -> Result<String, EncodeError>;
}

impl<T> StructuredBody for T
where
    T: Serialize + Send,
{
    fn xml_root(&self) -> &'static str {
        short_type_name::<T>()
    }

    fn encode_json(&self) -> Result<Vec<u8>, EncodeError> {
        codec::encode_json(self)
    }

    fn encode_xml(&self) -> Result<String, EncodeError> {
        codec::encode_xml(self, self.xml_root())
    }
}

/// Last path segment of the outermost type name: `demo::EchoResponse`
/// becomes `EchoResponse`, `alloc::vec::Vec<T>` becomes `Vec`.
fn short_type_name<T>() -> &'static str {
    let full = type_name::<T>();
    let outer = full.split('<').next().unwrap_or(full);
    outer.rsplit("::").next().unwrap_or(outer)
}

/// The tagged outcome a domain handler returns, consumed by the renderer.
///
/// An explicit sum type replaces runtime return-value sniffing: the
/// handler author states whether a value is a raw text payload, a
/// structured object to serialize, a redirect, or nothing.
pub enum HandlerResult {
    /// Nothing to return; rendered as 404 with no body.
    Empty,
    /// A raw string written verbatim, skipping re-encoding (and thereby
    /// double-escaping) of output that is already the literal desired text.
    Text(String),
    /// A typed value serialized in the route's declared output format.
    Structured(Box<dyn StructuredBody>),
    /// A redirect to the given location; never serialized.
    Redirect(RedirectTarget),
}

impl HandlerResult {
    /// Wrap a serializable value as a structured result.
    #[must_use]
    pub fn structured<T: Serialize + Send + 'static>(value: T) -> Self {
        Self::Structured(Box::new(value))
    }

    /// Wrap a string as a verbatim text result.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Wrap a location as a redirect result.
    #[must_use]
    pub fn redirect(location: impl Into<String>) -> Self {
        Self::Redirect(RedirectTarget::new(location))
    }
}

impl fmt::Debug for HandlerResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerResult::Empty => f.write_str("Empty"),
            HandlerResult::Text(s) => f.debug_tuple("Text").field(s).finish(),
            HandlerResult::Structured(b) => {
                f.debug_tuple("Structured").field(&b.xml_root()).finish()
            }
            HandlerResult::Redirect(t) => f.debug_tuple("Redirect").field(t).finish(),
        }
    }
}

/// Invoke the handler of a matched route.
///
/// Builds the per-request [`ParamSet`] from the positional captures and
/// the named query/form fields, then calls the route's handler. When the
/// route declares a typed body the handler closure decodes `raw_body`
/// first; a malformed or missing body surfaces as
/// [`DispatchError::Decode`]. Panics raised by the domain callback are
/// caught and reported as [`DispatchError::Panic`].
pub fn dispatch(
    route: &Route,
    captures: CaptureVec,
    named: &[(String, String)],
    raw_body: Option<&str>,
) -> Result<HandlerResult, DispatchError> {
    let params = ParamSet::from_parts(captures, named.iter().cloned());

    debug!(
        method = %route.method(),
        pattern = route.pattern(),
        param_count = params.len(),
        has_body = raw_body.is_some(),
        "invoking handler"
    );

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        route.invoke(&params, raw_body)
    }));

    match outcome {
        Ok(result) => result,
        Err(panic) => {
            let message = panic_message(panic);
            error!(
                method = %route.method(),
                pattern = route.pattern(),
                panic_message = %message,
                "handler panicked"
            );
            Err(DispatchError::Panic(message))
        }
    }
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        ok: bool,
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name::<Sample>(), "Sample");
        assert_eq!(short_type_name::<Vec<Sample>>(), "Vec");
    }

    #[test]
    fn test_structured_xml_root_is_type_name() {
        let result = HandlerResult::structured(Sample { ok: true });
        match result {
            HandlerResult::Structured(body) => assert_eq!(body.xml_root(), "Sample"),
            other => panic!("expected structured result, got {other:?}"),
        }
    }

    #[test]
    fn test_panic_message_variants() {
        let from_str = std::panic::catch_unwind(|| panic!("boom")).unwrap_err();
        assert_eq!(panic_message(from_str), "boom");
        let from_string =
            std::panic::catch_unwind(|| panic!("{}", String::from("dyn boom"))).unwrap_err();
        assert_eq!(panic_message(from_string), "dyn boom");
    }
}
