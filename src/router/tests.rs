use super::{RouteHandler, Router};
use crate::dispatcher::HandlerResult;
use http::Method;

fn tag(name: &'static str) -> RouteHandler {
    RouteHandler::text(move |_params| Ok(HandlerResult::text(name)))
}

#[test]
fn test_first_match_wins_literal_first() {
    let router = Router::builder()
        .get("/items/special", tag("literal"))
        .get("/items/([a-z]+)", tag("pattern"))
        .build()
        .unwrap();

    let m = router.route(&Method::GET, "/items/special").unwrap();
    assert_eq!(m.route.pattern(), "/items/special");
    assert!(m.captures.is_empty());
}

#[test]
fn test_first_match_wins_pattern_first() {
    let router = Router::builder()
        .get("/items/([a-z]+)", tag("pattern"))
        .get("/items/special", tag("literal"))
        .build()
        .unwrap();

    let m = router.route(&Method::GET, "/items/special").unwrap();
    assert_eq!(m.route.pattern(), "/items/([a-z]+)");
    assert_eq!(m.captures.as_slice(), &[(1, "special".to_string())]);
}

#[test]
fn test_method_isolation() {
    let router = Router::builder()
        .get("/tasks/([0-9a-z-]+)", tag("get"))
        .put("/tasks/([0-9a-z-]+)", tag("put"))
        .build()
        .unwrap();

    let m = router.route(&Method::PUT, "/tasks/abc-123").unwrap();
    assert_eq!(m.route.method(), &Method::PUT);

    // Structural match under an unregistered method is no match at all.
    assert!(router.route(&Method::DELETE, "/tasks/abc-123").is_none());
}

#[test]
fn test_match_is_anchored_not_prefix() {
    let router = Router::builder()
        .get("/items/([a-z]+)", tag("items"))
        .build()
        .unwrap();

    assert!(router.route(&Method::GET, "/items/abc").is_some());
    assert!(router.route(&Method::GET, "/items/abc/extra").is_none());
    assert!(router.route(&Method::GET, "/prefix/items/abc").is_none());
}

#[test]
fn test_multiple_captures_are_one_based() {
    let router = Router::builder()
        .get("/orgs/([a-z]+)/repos/([0-9]+)", tag("repos"))
        .build()
        .unwrap();

    let m = router.route(&Method::GET, "/orgs/acme/repos/17").unwrap();
    assert_eq!(
        m.captures.as_slice(),
        &[(1, "acme".to_string()), (2, "17".to_string())]
    );
}

#[test]
fn test_optional_group_is_omitted() {
    let router = Router::builder()
        .get("/tasks/([a-z]+)(?:/([0-9]+))?", tag("tasks"))
        .build()
        .unwrap();

    let m = router.route(&Method::GET, "/tasks/ab").unwrap();
    assert_eq!(m.captures.as_slice(), &[(1, "ab".to_string())]);

    let m = router.route(&Method::GET, "/tasks/ab/7").unwrap();
    assert_eq!(
        m.captures.as_slice(),
        &[(1, "ab".to_string()), (2, "7".to_string())]
    );
}

#[test]
fn test_no_match_reports_none() {
    let router = Router::builder().get("/only", tag("only")).build().unwrap();
    assert!(router.route(&Method::GET, "/other").is_none());
    assert!(!router.is_empty());
    assert_eq!(router.len(), 1);
}

#[test]
fn test_invalid_pattern_is_a_build_error() {
    let result = Router::builder().get("/items/([a-z", tag("broken")).build();
    assert!(result.is_err());
}
