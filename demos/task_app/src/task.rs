//! Task manager: entity, repository, REST resource, and HTML controller.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rexrouter::{HandlerResult, ParamSet};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::sync::{Arc, Mutex};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskEntity {
    #[serde(default)]
    pub task_id: String,
    #[serde(default)]
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Storage abstraction for tasks. The demo ships an in-memory
/// implementation; a persistent one would slot in behind the same trait.
pub trait TaskRepository: Send + Sync {
    fn select_all(&self) -> Vec<TaskEntity>;
    fn select_by_id(&self, task_id: &str) -> Option<TaskEntity>;
    /// Insert or replace by `task_id`.
    fn save(&self, entity: TaskEntity);
    fn delete(&self, task_id: &str);
}

#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    tasks: Mutex<Vec<TaskEntity>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn select_all(&self) -> Vec<TaskEntity> {
        self.tasks.lock().map(|tasks| tasks.clone()).unwrap_or_default()
    }

    fn select_by_id(&self, task_id: &str) -> Option<TaskEntity> {
        self.tasks
            .lock()
            .ok()
            .and_then(|tasks| tasks.iter().find(|t| t.task_id == task_id).cloned())
    }

    fn save(&self, entity: TaskEntity) {
        if let Ok(mut tasks) = self.tasks.lock() {
            tasks.retain(|t| t.task_id != entity.task_id);
            tasks.push(entity);
        }
    }

    fn delete(&self, task_id: &str) {
        if let Ok(mut tasks) = self.tasks.lock() {
            tasks.retain(|t| t.task_id != task_id);
        }
    }
}

/// REST endpoints under `/app/rest/tasks`.
#[derive(Clone)]
pub struct TaskResource {
    repository: Arc<dyn TaskRepository>,
}

impl TaskResource {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    pub fn get_tasks(&self) -> Result<HandlerResult> {
        Ok(HandlerResult::structured(self.repository.select_all()))
    }

    pub fn post_tasks(&self, mut entity: TaskEntity) -> Result<HandlerResult> {
        entity.task_id = Uuid::new_v4().to_string();
        entity.user_id = "guest".to_string();
        entity.timestamp = Some(Utc::now());
        info!(task_id = %entity.task_id, "creating task");
        self.repository.save(entity.clone());
        Ok(HandlerResult::structured(entity))
    }

    pub fn get_task(&self, task_id: &str) -> Result<HandlerResult> {
        Ok(match self.repository.select_by_id(task_id) {
            Some(entity) => HandlerResult::structured(entity),
            None => HandlerResult::Empty,
        })
    }

    pub fn put_task(&self, task_id: &str, update: TaskEntity) -> Result<HandlerResult> {
        let Some(mut entity) = self.repository.select_by_id(task_id) else {
            return Ok(HandlerResult::Empty);
        };
        entity.title = update.title;
        entity.description = update.description;
        entity.done = update.done;
        entity.timestamp = Some(Utc::now());
        self.repository.save(entity.clone());
        Ok(HandlerResult::structured(entity))
    }

    pub fn delete_task(&self, task_id: &str) -> Result<HandlerResult> {
        info!(task_id = %task_id, "deleting task");
        self.repository.delete(task_id);
        Ok(HandlerResult::text(""))
    }
}

/// HTML pages under `/app/pages/tasks`, with redirect-after-post.
#[derive(Clone)]
pub struct TaskController {
    repository: Arc<dyn TaskRepository>,
}

impl TaskController {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    pub fn get_tasks_page(&self) -> Result<HandlerResult> {
        let mut page = String::from(
            "<!doctype html><html><head><title>Tasks</title></head><body>\
             <h1>Tasks</h1><ul>",
        );
        for task in self.repository.select_all() {
            let _ = write!(
                page,
                "<li><a href=\"/app/pages/tasks/{id}\">{title}</a>{done}</li>",
                id = escape_html(&task.task_id),
                title = escape_html(&task.title),
                done = if task.done { " (done)" } else { "" },
            );
        }
        page.push_str(
            "</ul><h2>New Task</h2>\
             <form method=\"post\" action=\"/app/pages/tasks\">\
             <input name=\"title\" placeholder=\"Title\">\
             <input name=\"description\" placeholder=\"Description\">\
             <button type=\"submit\">Create</button></form></body></html>",
        );
        Ok(HandlerResult::text(page))
    }

    pub fn post_tasks_page(&self, params: &ParamSet) -> Result<HandlerResult> {
        let entity = TaskEntity {
            task_id: Uuid::new_v4().to_string(),
            user_id: "guest".to_string(),
            title: params.get("title").unwrap_or_default().to_string(),
            description: params.get("description").unwrap_or_default().to_string(),
            done: false,
            timestamp: Some(Utc::now()),
        };
        info!(task_id = %entity.task_id, "creating task from form");
        self.repository.save(entity);
        Ok(HandlerResult::redirect("/app/pages/tasks"))
    }

    pub fn get_task_page(&self, task_id: &str, action: Option<&str>) -> Result<HandlerResult> {
        let Some(task) = self.repository.select_by_id(task_id) else {
            return Ok(HandlerResult::Empty);
        };
        let page = if action == Some("edit") {
            edit_page(&task)
        } else {
            view_page(&task)
        };
        Ok(HandlerResult::text(page))
    }

    pub fn post_task_page(&self, task_id: &str, params: &ParamSet) -> Result<HandlerResult> {
        match params.get("action") {
            Some("delete") => {
                self.repository.delete(task_id);
                Ok(HandlerResult::redirect("/app/pages/tasks"))
            }
            _ => {
                let Some(mut task) = self.repository.select_by_id(task_id) else {
                    return Ok(HandlerResult::Empty);
                };
                task.title = params.get("title").unwrap_or_default().to_string();
                task.description = params.get("description").unwrap_or_default().to_string();
                task.done = params.get("done") == Some("on");
                task.timestamp = Some(Utc::now());
                self.repository.save(task);
                Ok(HandlerResult::redirect(format!("/app/pages/tasks/{task_id}")))
            }
        }
    }
}

fn view_page(task: &TaskEntity) -> String {
    format!(
        "<!doctype html><html><head><title>{title}</title></head><body>\
         <h1>{title}</h1><p>{description}</p><p>Done: {done}</p>\
         <a href=\"/app/pages/tasks/{id}?action=edit\">Edit</a> \
         <a href=\"/app/pages/tasks\">Back</a></body></html>",
        title = escape_html(&task.title),
        description = escape_html(&task.description),
        done = task.done,
        id = escape_html(&task.task_id),
    )
}

fn edit_page(task: &TaskEntity) -> String {
    format!(
        "<!doctype html><html><head><title>Edit Task</title></head><body>\
         <h1>Edit Task</h1>\
         <form method=\"post\" action=\"/app/pages/tasks/{id}\">\
         <input name=\"title\" value=\"{title}\">\
         <input name=\"description\" value=\"{description}\">\
         <label><input type=\"checkbox\" name=\"done\"{checked}> Done</label>\
         <button type=\"submit\" name=\"action\" value=\"save\">Save</button>\
         <button type=\"submit\" name=\"action\" value=\"delete\">Delete</button>\
         </form></body></html>",
        id = escape_html(&task.task_id),
        title = escape_html(&task.title),
        description = escape_html(&task.description),
        checked = if task.done { " checked" } else { "" },
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
