//! Task Endpoints
//!
//! Tasks are always addressed through their owning project.

use board_engine::{Status, TaskStatus};
use reqwest::Method;
use serde::Serialize;

use super::{endpoint, get_json, send_message, ApiResult};
use crate::forms::TaskFormData;
use crate::models::Task;

#[derive(Serialize)]
struct StatusBody<'a> {
    status: &'a str,
}

pub async fn create_task(project_id: &str, form: &TaskFormData) -> ApiResult<String> {
    send_message(Method::POST, endpoint(&["projects", project_id, "tasks"]), Some(form)).await
}

pub async fn get_task(project_id: &str, task_id: &str) -> ApiResult<Task> {
    get_json(endpoint(&["projects", project_id, "tasks", task_id])).await
}

pub async fn update_task(project_id: &str, task_id: &str, form: &TaskFormData) -> ApiResult<String> {
    send_message(
        Method::PUT,
        endpoint(&["projects", project_id, "tasks", task_id]),
        Some(form),
    )
    .await
}

pub async fn delete_task(project_id: &str, task_id: &str) -> ApiResult<String> {
    send_message::<()>(
        Method::DELETE,
        endpoint(&["projects", project_id, "tasks", task_id]),
        None,
    )
    .await
}

pub async fn update_task_status(project_id: &str, task_id: &str, status: TaskStatus) -> ApiResult<String> {
    let body = StatusBody { status: status.as_str() };
    send_message(
        Method::PATCH,
        endpoint(&["projects", project_id, "tasks", task_id, "status"]),
        Some(&body),
    )
    .await
}
