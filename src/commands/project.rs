//! Project Endpoints

use board_engine::{ProjectStatus, Status};
use reqwest::Method;
use serde::Serialize;

use super::{endpoint, get_json, send_message, ApiResult};
use crate::forms::ProjectFormData;
use crate::models::{Project, ProjectDetails};

#[derive(Serialize)]
struct StatusBody<'a> {
    status: &'a str,
}

pub async fn list_projects() -> ApiResult<Vec<Project>> {
    get_json(endpoint(&["projects"])).await
}

pub async fn get_project(id: &str) -> ApiResult<ProjectDetails> {
    get_json(endpoint(&["projects", id])).await
}

pub async fn create_project(form: &ProjectFormData) -> ApiResult<String> {
    send_message(Method::POST, endpoint(&["projects"]), Some(form)).await
}

pub async fn update_project(id: &str, form: &ProjectFormData) -> ApiResult<String> {
    send_message(Method::PUT, endpoint(&["projects", id]), Some(form)).await
}

pub async fn delete_project(id: &str) -> ApiResult<String> {
    send_message::<()>(Method::DELETE, endpoint(&["projects", id]), None).await
}

pub async fn update_project_status(id: &str, status: ProjectStatus) -> ApiResult<String> {
    let body = StatusBody { status: status.as_str() };
    send_message(Method::PATCH, endpoint(&["projects", id, "status"]), Some(&body)).await
}
