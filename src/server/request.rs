use may_minihttp::Request;
use std::io::Read;
use tracing::{debug, info};

/// Parsed HTTP request data used by `AppService`.
///
/// The raw body is drained fully into `body` during parsing — decoding
/// never streams, which keeps the codec contract simple and bounds memory
/// by the body size. Named parameters hold the query string first and, for
/// form-encoded requests, the form fields after it; duplicate names keep
/// every occurrence so the last one wins on lookup.
#[derive(Debug, PartialEq, Eq)]
pub struct ParsedRequest {
    /// HTTP method (GET, POST, ...).
    pub method: String,
    /// Request path with the query component stripped.
    pub path: String,
    /// Named parameters: query string fields, then form fields.
    pub params: Vec<(String, String)>,
    /// Raw request body text, if present and valid UTF-8.
    pub body: Option<String>,
}

/// Parse query string parameters from a URL path, URL-decoding names and
/// values. Order of appearance is preserved.
#[must_use]
pub fn parse_query_params(path: &str) -> Vec<(String, String)> {
    match path.find('?') {
        Some(pos) => form_fields(&path[pos + 1..]),
        None => Vec::new(),
    }
}

/// Parse `application/x-www-form-urlencoded` body fields.
#[must_use]
pub fn parse_form_params(body: &str) -> Vec<(String, String)> {
    form_fields(body)
}

fn form_fields(encoded: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(encoded.as_bytes())
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Extract method, path, named parameters, and raw body text from a
/// `may_minihttp::Request`.
pub fn parse_request(req: Request) -> ParsedRequest {
    let method = req.method().to_string();
    let raw_path = req.path().to_string();
    let path = raw_path.split('?').next().unwrap_or("/").to_string();

    let content_type = req
        .headers()
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case("content-type"))
        .map(|h| String::from_utf8_lossy(h.value).to_string())
        .unwrap_or_default();

    let body = {
        let mut body_str = String::new();
        match req.body().read_to_string(&mut body_str) {
            Ok(size) if size > 0 => {
                debug!(
                    content_length = size,
                    content_type = %content_type,
                    "request body read"
                );
                Some(body_str)
            }
            _ => None,
        }
    };

    let mut params = parse_query_params(&raw_path);
    if content_type.starts_with("application/x-www-form-urlencoded") {
        if let Some(body) = &body {
            params.extend(parse_form_params(body));
        }
    }

    info!(
        method = %method,
        path = %path,
        param_count = params.len(),
        has_body = body.is_some(),
        "HTTP request parsed"
    );

    ParsedRequest {
        method,
        path,
        params,
        body,
    }
}
