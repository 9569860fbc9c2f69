//! Result rendering.
//!
//! The single place where "what does this endpoint's return value mean" is
//! decided: a [`HandlerResult`] plus the route's declared output format
//! become a [`Rendered`] response — status, content type, optional
//! redirect location, and body bytes — independent of the transport that
//! will write it.

use crate::codec::Format;
use crate::dispatcher::HandlerResult;
use crate::error::EncodeError;

/// A fully decided HTTP response, not yet written to the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub status: u16,
    pub content_type: Option<&'static str>,
    /// Redirect location; set only for redirect results.
    pub location: Option<String>,
    pub body: Vec<u8>,
}

impl Rendered {
    /// A response with a status and no body.
    #[must_use]
    pub fn empty(status: u16) -> Self {
        Rendered {
            status,
            content_type: None,
            location: None,
            body: Vec::new(),
        }
    }

    /// A 200 response with a body and content type.
    #[must_use]
    pub fn ok(content_type: &'static str, body: Vec<u8>) -> Self {
        Rendered {
            status: 200,
            content_type: Some(content_type),
            location: None,
            body,
        }
    }
}

/// Turn a handler's result into a response.
///
/// The redirect arm is checked before the text and structured arms — a
/// redirect target and a plain string are otherwise indistinguishable by
/// shape, which is exactly why [`HandlerResult::Redirect`] carries a
/// distinct type. Encoding failures propagate to the caller; the service
/// boundary maps them to a 5xx response.
pub fn render(format: Format, result: HandlerResult) -> Result<Rendered, EncodeError> {
    match result {
        HandlerResult::Redirect(target) => Ok(Rendered {
            status: 302,
            content_type: None,
            location: Some(target.into_inner()),
            body: Vec::new(),
        }),
        HandlerResult::Empty => Ok(Rendered::empty(404)),
        HandlerResult::Text(text) => Ok(Rendered::ok(format.content_type(), text.into_bytes())),
        HandlerResult::Structured(body) => match format {
            Format::Json => Ok(Rendered::ok("application/json", body.encode_json()?)),
            Format::Xml => Ok(Rendered::ok("text/xml", body.encode_xml()?.into_bytes())),
            // A structured value on a text route is a route/handler
            // mismatch; fail fast instead of guessing a serialization.
            Format::Html | Format::Text => Err(EncodeError::Unsupported { format }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Payload {
        id: u32,
        title: String,
    }

    #[test]
    fn test_empty_renders_404_without_body() {
        let rendered = render(Format::Json, HandlerResult::Empty).unwrap();
        assert_eq!(rendered.status, 404);
        assert!(rendered.body.is_empty());
        assert_eq!(rendered.content_type, None);
    }

    #[test]
    fn test_redirect_location_is_exact() {
        let rendered = render(
            Format::Html,
            HandlerResult::redirect("/app/pages/tasks/7"),
        )
        .unwrap();
        assert_eq!(rendered.status, 302);
        assert_eq!(rendered.location.as_deref(), Some("/app/pages/tasks/7"));
        assert!(rendered.body.is_empty());
    }

    #[test]
    fn test_text_is_written_verbatim() {
        let rendered = render(Format::Html, HandlerResult::text("<h1>hi</h1>")).unwrap();
        assert_eq!(rendered.status, 200);
        assert_eq!(rendered.content_type, Some("text/html"));
        assert_eq!(rendered.body, b"<h1>hi</h1>");
    }

    #[test]
    fn test_structured_json() {
        let payload = Payload {
            id: 7,
            title: "build".to_string(),
        };
        let rendered = render(Format::Json, HandlerResult::structured(payload)).unwrap();
        assert_eq!(rendered.status, 200);
        assert_eq!(rendered.content_type, Some("application/json"));
        let value: serde_json::Value = serde_json::from_slice(&rendered.body).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["title"], "build");
    }

    #[test]
    fn test_structured_xml_uses_type_name_root() {
        let payload = Payload {
            id: 7,
            title: "build".to_string(),
        };
        let rendered = render(Format::Xml, HandlerResult::structured(payload)).unwrap();
        assert_eq!(rendered.content_type, Some("text/xml"));
        let text = String::from_utf8(rendered.body).unwrap();
        assert!(text.starts_with("<Payload>"), "got {text}");
    }

    #[test]
    fn test_structured_on_text_route_fails_loudly() {
        let payload = Payload {
            id: 1,
            title: "x".to_string(),
        };
        let err = render(Format::Text, HandlerResult::structured(payload)).unwrap_err();
        assert!(matches!(err, EncodeError::Unsupported { .. }));
    }
}
