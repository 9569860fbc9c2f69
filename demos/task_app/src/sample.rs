//! Sample REST endpoints: current time, a config value, and XML/JSON echo.

use crate::config::ConfigProvider;
use anyhow::Result;
use chrono::Local;
use rexrouter::HandlerResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EchoRequest {
    pub input: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EchoResponse {
    pub output: String,
}

#[derive(Debug, Clone)]
pub struct SampleResource {
    config: ConfigProvider,
}

impl SampleResource {
    pub fn new(config: ConfigProvider) -> Self {
        Self { config }
    }

    pub fn get_time(&self) -> String {
        Local::now().to_rfc3339()
    }

    pub fn get_config(&self) -> String {
        self.config
            .get_config_property_or("app.sample.config", "Undefined")
    }

    pub fn post_echo(&self, request: &EchoRequest) -> EchoResponse {
        EchoResponse {
            output: format!("Echo of: {}", request.input),
        }
    }
}

/// HTML page under `/app/pages/sample` showing the same data the REST
/// endpoints expose.
#[derive(Debug, Clone)]
pub struct SampleController {
    resource: SampleResource,
}

impl SampleController {
    pub fn new(resource: SampleResource) -> Self {
        Self { resource }
    }

    pub fn get_sample_page(&self) -> Result<HandlerResult> {
        let page = format!(
            "<!doctype html><html><head><title>Sample</title></head><body>\
             <h1>Sample</h1>\
             <p>Time: {time}</p>\
             <p>Config: {config}</p>\
             <a href=\"/app/pages/tasks\">Tasks</a></body></html>",
            time = self.resource.get_time(),
            config = self.resource.get_config(),
        );
        Ok(HandlerResult::text(page))
    }
}
