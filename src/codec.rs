//! Wire-format codecs.
//!
//! Translates between body text and typed values for the formats a route
//! can declare. JSON goes through `serde_json`, XML through `quick-xml`'s
//! serde support. Decoding ignores the XML root element's name — any
//! well-formed document whose fields fit the target type is accepted —
//! while encoding names the root explicitly, taken from the value's short
//! type name upstream.

use crate::error::{DecodeError, EncodeError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// The wire formats a route can declare for its input and output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Xml,
    Html,
    Text,
}

impl Format {
    /// The `Content-Type` header value for this format.
    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Xml => "text/xml",
            Format::Html => "text/html",
            Format::Text => "text/plain",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::Json => "json",
            Format::Xml => "xml",
            Format::Html => "html",
            Format::Text => "text",
        })
    }
}

/// Decode a request body into a typed value.
///
/// Only JSON and XML routes declare typed bodies; HTML and text routes
/// read their inputs from the parameter set instead.
pub fn decode<T: DeserializeOwned>(format: Format, text: &str) -> Result<T, DecodeError> {
    match format {
        Format::Json => Ok(serde_json::from_str(text)?),
        Format::Xml => Ok(quick_xml::de::from_str(text)?),
        Format::Html | Format::Text => Err(DecodeError::Unsupported { format }),
    }
}

/// Serialize a value as a JSON byte body.
pub fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, EncodeError> {
    Ok(serde_json::to_vec(value)?)
}

/// Serialize a value as an XML document with the given root element name.
pub fn encode_xml<T: Serialize + ?Sized>(value: &T, root: &str) -> Result<String, EncodeError> {
    let mut out = String::new();
    let serializer = quick_xml::se::Serializer::with_root(&mut out, Some(root))?;
    value.serialize(serializer)?;
    Ok(out)
}
