//! Frontend Models
//!
//! Data structures matching the REST API payloads.

use board_engine::{BoardItem, ProjectStatus, TaskStatus};
use serde::{Deserialize, Serialize};

/// Project card (matches API)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "projectName")]
    pub project_name: String,
    #[serde(rename = "clientName")]
    pub client_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
}

/// Single project with its tasks, as returned by `GET /projects/{id}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectDetails {
    #[serde(flatten)]
    pub project: Project,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Task card (matches API)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Owning project id
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub status: TaskStatus,
}

impl BoardItem for Project {
    type Status = ProjectStatus;

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.project_name
    }

    fn status(&self) -> ProjectStatus {
        self.status
    }

    fn set_status(&mut self, status: ProjectStatus) {
        self.status = status;
    }
}

impl BoardItem for Task {
    type Status = TaskStatus;

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn status(&self) -> TaskStatus {
        self.status
    }

    fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_missing_status_defaults_to_pending() {
        let json = r#"{"_id":"p1","projectName":"Site","clientName":"ACME","description":"Landing page"}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.status, ProjectStatus::Pending);
        assert_eq!(project.label(), "Site");
    }

    #[test]
    fn test_project_details_with_tasks() {
        let json = r#"{
            "_id":"p1","projectName":"Site","clientName":"ACME","description":"d","status":"inReview",
            "tasks":[{"_id":"t1","name":"Header","description":"Build header","project":"p1","status":"onHold"}]
        }"#;
        let details: ProjectDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.project.status, ProjectStatus::InReview);
        assert_eq!(details.tasks.len(), 1);
        assert_eq!(details.tasks[0].status, TaskStatus::OnHold);
    }

    #[test]
    fn test_project_list_ignores_task_ids() {
        // List endpoint returns task references, not task objects
        let json = r#"[{"_id":"p1","projectName":"Site","clientName":"ACME","description":"d","tasks":["t1"]}]"#;
        let projects: Vec<Project> = serde_json::from_str(json).unwrap();
        assert_eq!(projects[0].id, "p1");
    }
}
