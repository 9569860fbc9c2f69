//! Demo application: sample endpoints plus a task manager, served as
//! REST (JSON/XML) and HTML pages over one routing table.

mod config;
mod sample;
mod task;

use anyhow::{Context, Result};
use config::ConfigProvider;
use rexrouter::runtime_config::RuntimeConfig;
use rexrouter::server::{AppService, HttpServer};
use rexrouter::{HandlerResult, RouteHandler, Router};
use sample::{EchoRequest, SampleController, SampleResource};
use std::sync::Arc;
use task::{InMemoryTaskRepository, TaskController, TaskEntity, TaskRepository, TaskResource};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    RuntimeConfig::from_env().apply();

    let config = ConfigProvider::new();
    let port: u16 = config
        .get_config_property_or("app.http.port", "8080")
        .parse()
        .context("app.http.port is not a valid port number")?;

    let repository: Arc<dyn TaskRepository> = Arc::new(InMemoryTaskRepository::new());
    let router = build_router(
        SampleResource::new(config),
        TaskResource::new(repository.clone()),
        TaskController::new(repository),
    )?;

    let static_dir = config.get_config_property_or("app.static.dir", "demos/task_app/static");
    let service = AppService::new(Arc::new(router)).with_static_dir(static_dir);

    info!(port = port, "task_app is starting");
    let handle = HttpServer(service)
        .start(("0.0.0.0", port))
        .context("failed to start HTTP server")?;
    handle.join().ok();
    Ok(())
}

fn build_router(
    sample: SampleResource,
    tasks: TaskResource,
    pages: TaskController,
) -> Result<Router> {
    let sample_time = sample.clone();
    let sample_config = sample.clone();
    let sample_echo_xml = sample.clone();
    let sample_page = SampleController::new(sample.clone());
    let sample_echo_json = sample;
    let tasks_list = tasks.clone();
    let tasks_create = tasks.clone();
    let tasks_get = tasks.clone();
    let tasks_put = tasks.clone();
    let tasks_delete = tasks;
    let pages_list = pages.clone();
    let pages_create = pages.clone();
    let pages_view = pages.clone();
    let pages_save = pages;

    let router = Router::builder()
        .get(
            "/app/rest/sample/time",
            RouteHandler::text(move |_p| Ok(HandlerResult::text(sample_time.get_time()))),
        )
        .get(
            "/app/rest/sample/config",
            RouteHandler::text(move |_p| {
                Ok(HandlerResult::text(sample_config.get_config()))
            }),
        )
        .post(
            "/app/rest/sample/echo-xml",
            RouteHandler::xml_body::<EchoRequest, _>(move |_p, req| {
                Ok(HandlerResult::structured(
                    sample_echo_xml.post_echo(&req),
                ))
            }),
        )
        .post(
            "/app/rest/sample/echo-json",
            RouteHandler::json_body::<EchoRequest, _>(move |_p, req| {
                Ok(HandlerResult::structured(
                    sample_echo_json.post_echo(&req),
                ))
            }),
        )
        .get(
            "/app/rest/tasks",
            RouteHandler::json(move |_p| tasks_list.get_tasks()),
        )
        .post(
            "/app/rest/tasks",
            RouteHandler::json_body::<TaskEntity, _>(move |_p, entity| {
                tasks_create.post_tasks(entity)
            }),
        )
        .get(
            "/app/rest/tasks/([0-9a-z-]+)",
            RouteHandler::json(move |params| {
                tasks_get.get_task(params.get("1").unwrap_or_default())
            }),
        )
        .put(
            "/app/rest/tasks/([0-9a-z-]+)",
            RouteHandler::json_body::<TaskEntity, _>(move |params, entity| {
                tasks_put.put_task(params.get("1").unwrap_or_default(), entity)
            }),
        )
        .delete(
            "/app/rest/tasks/([0-9a-z-]+)",
            RouteHandler::json(move |params| {
                tasks_delete.delete_task(params.get("1").unwrap_or_default())
            }),
        )
        .get(
            "/app/pages/sample",
            RouteHandler::html(move |_p| sample_page.get_sample_page()),
        )
        .get(
            "/app/pages/tasks",
            RouteHandler::html(move |_p| pages_list.get_tasks_page()),
        )
        .post(
            "/app/pages/tasks",
            RouteHandler::html(move |params| pages_create.post_tasks_page(params)),
        )
        .get(
            "/app/pages/tasks/([0-9a-z-]+)",
            RouteHandler::html(move |params| {
                pages_view.get_task_page(params.get("1").unwrap_or_default(), params.get("action"))
            }),
        )
        .post(
            "/app/pages/tasks/([0-9a-z-]+)",
            RouteHandler::html(move |params| {
                pages_save.post_task_page(params.get("1").unwrap_or_default(), params)
            }),
        )
        .build()?;
    Ok(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rexrouter::server::{AppService, ParsedRequest};

    fn demo_service() -> AppService {
        let config = ConfigProvider::new();
        let repository: Arc<dyn TaskRepository> = Arc::new(InMemoryTaskRepository::new());
        let router = build_router(
            SampleResource::new(config),
            TaskResource::new(repository.clone()),
            TaskController::new(repository),
        )
        .expect("router builds");
        AppService::new(Arc::new(router))
    }

    fn request(method: &str, path: &str, body: Option<&str>) -> ParsedRequest {
        ParsedRequest {
            method: method.to_string(),
            path: path.to_string(),
            params: Vec::new(),
            body: body.map(str::to_string),
        }
    }

    #[test]
    fn test_task_crud_over_rest() {
        let service = demo_service();

        let created = service.dispatch_parsed(&request(
            "POST",
            "/app/rest/tasks",
            Some("{\"title\": \"demo\", \"description\": \"try it\"}"),
        ));
        assert_eq!(created.status, 200);
        let task: serde_json::Value = serde_json::from_slice(&created.body).unwrap();
        let id = task["taskId"].as_str().unwrap().to_string();

        let fetched = service.dispatch_parsed(&request("GET", &format!("/app/rest/tasks/{id}"), None));
        assert_eq!(fetched.status, 200);

        let deleted =
            service.dispatch_parsed(&request("DELETE", &format!("/app/rest/tasks/{id}"), None));
        assert_eq!(deleted.status, 200);

        let gone = service.dispatch_parsed(&request("GET", &format!("/app/rest/tasks/{id}"), None));
        assert_eq!(gone.status, 404);
    }

    #[test]
    fn test_json_echo_round_trip() {
        let service = demo_service();
        let rendered = service.dispatch_parsed(&request(
            "POST",
            "/app/rest/sample/echo-json",
            Some("{\"input\": \"ping\"}"),
        ));
        assert_eq!(rendered.status, 200);
        assert_eq!(rendered.content_type, Some("application/json"));
        let value: serde_json::Value = serde_json::from_slice(&rendered.body).unwrap();
        assert_eq!(value["output"], "Echo of: ping");
    }

    #[test]
    fn test_xml_echo_uses_type_name_as_root() {
        let service = demo_service();
        let rendered = service.dispatch_parsed(&request(
            "POST",
            "/app/rest/sample/echo-xml",
            Some("<EchoRequest><input>ping</input></EchoRequest>"),
        ));
        assert_eq!(rendered.status, 200);
        assert_eq!(rendered.content_type, Some("text/xml"));
        let text = String::from_utf8(rendered.body).unwrap();
        assert!(text.starts_with("<EchoResponse>"), "got {text}");
        assert!(text.contains("Echo of: ping"));
    }

    #[test]
    fn test_sample_page_is_served() {
        let service = demo_service();
        let rendered = service.dispatch_parsed(&request("GET", "/app/pages/sample", None));
        assert_eq!(rendered.status, 200);
        assert_eq!(rendered.content_type, Some("text/html"));
        let page = String::from_utf8(rendered.body).unwrap();
        assert!(page.contains("<h1>Sample</h1>"), "got {page}");
    }

    #[test]
    fn test_form_post_creates_task_and_redirects() {
        let service = demo_service();
        let mut req = request("POST", "/app/pages/tasks", None);
        req.params = vec![
            ("title".to_string(), "from form".to_string()),
            ("description".to_string(), "posted".to_string()),
        ];
        let rendered = service.dispatch_parsed(&req);
        assert_eq!(rendered.status, 302);
        assert_eq!(rendered.location.as_deref(), Some("/app/pages/tasks"));

        let list = service.dispatch_parsed(&request("GET", "/app/pages/tasks", None));
        assert_eq!(list.content_type, Some("text/html"));
        let page = String::from_utf8(list.body).unwrap();
        assert!(page.contains("from form"));
    }
}
