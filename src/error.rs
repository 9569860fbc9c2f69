//! Error types for route building, body decoding, result encoding, and
//! dispatch.
//!
//! A route that fails to match is not an error (the router returns
//! `None`); these types cover the cases where a request reached a route
//! and something about it, or about the handler, was wrong.

use crate::codec::Format;
use thiserror::Error;

/// A request body could not be decoded into the route's declared type.
///
/// Always a client error: the service boundary maps it to a 400 response
/// scoped to the failing request.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid XML body: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("request body required but missing")]
    MissingBody,

    #[error("no body decoder for {format} routes")]
    Unsupported { format: Format },
}

/// A handler's structured result could not be serialized.
///
/// A server-side fault: the response was promised but cannot be produced,
/// so the service boundary maps this to a 500 rather than silently
/// degrading the payload.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to encode JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to encode XML response: {0}")]
    Xml(#[from] quick_xml::SeError),

    #[error("structured result on a {format} route")]
    Unsupported { format: Format },
}

/// What went wrong while dispatching a matched request to its handler.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("handler failed: {0}")]
    Handler(#[source] anyhow::Error),

    #[error("handler panicked: {0}")]
    Panic(String),
}

/// A route table could not be built.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid route pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        source: regex::Error,
    },
}
