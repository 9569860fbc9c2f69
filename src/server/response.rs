use crate::renderer::Rendered;
use may_minihttp::Response;
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        302 => "Found",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

// may_minihttp takes header lines as &'static str, so dynamic values
// must be leaked. The intern table reuses each leaked line, bounding the
// cost at one allocation per distinct header line for the process
// lifetime instead of one per response.
fn interned_header(line: String) -> &'static str {
    static TABLE: OnceLock<Mutex<HashMap<String, &'static str>>> = OnceLock::new();
    let mut table = TABLE
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(interned) = table.get(line.as_str()) {
        return interned;
    }
    let leaked: &'static str = Box::leak(line.clone().into_boxed_str());
    table.insert(line, leaked);
    leaked
}

fn content_type_header(content_type: &'static str) -> &'static str {
    match content_type {
        "application/json" => "Content-Type: application/json",
        "text/xml" => "Content-Type: text/xml",
        "text/html" => "Content-Type: text/html",
        "text/plain" => "Content-Type: text/plain",
        other => interned_header(format!("Content-Type: {other}")),
    }
}

/// Write a fully decided response to the wire.
pub fn write_rendered(res: &mut Response, rendered: Rendered) {
    res.status_code(rendered.status as usize, status_reason(rendered.status));
    if let Some(location) = rendered.location {
        res.header(interned_header(format!("Location: {location}")));
    }
    if let Some(content_type) = rendered.content_type {
        res.header(content_type_header(content_type));
    }
    res.body_vec(rendered.body);
}
