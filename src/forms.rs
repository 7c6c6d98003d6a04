//! Form data and validation for project and task editors

use serde::{Deserialize, Serialize};

use crate::models::{Project, Task};

/// A validation message bound to one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Message for `field`, if it failed validation
pub fn error_for(errors: &[FieldError], field: &str) -> Option<String> {
    errors
        .iter()
        .find(|e| e.field == field)
        .map(|e| e.message.clone())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFormData {
    pub project_name: String,
    pub client_name: String,
    pub description: String,
}

impl ProjectFormData {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.project_name.trim().is_empty() {
            errors.push(FieldError::new("projectName", "Project name is required"));
        }
        if self.client_name.trim().is_empty() {
            errors.push(FieldError::new("clientName", "Client name is required"));
        }
        if self.description.trim().is_empty() {
            errors.push(FieldError::new("description", "Description is required"));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl From<&Project> for ProjectFormData {
    fn from(project: &Project) -> Self {
        Self {
            project_name: project.project_name.clone(),
            client_name: project.client_name.clone(),
            description: project.description.clone(),
        }
    }
}

pub const TASK_NAME_LEN: (usize, usize) = (3, 50);
pub const TASK_DESCRIPTION_LEN: (usize, usize) = (10, 200);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskFormData {
    pub name: String,
    pub description: String,
}

impl TaskFormData {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if let Some(err) = check_length("name", "Task name", &self.name, TASK_NAME_LEN) {
            errors.push(err);
        }
        if let Some(err) = check_length("description", "Description", &self.description, TASK_DESCRIPTION_LEN) {
            errors.push(err);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl From<&Task> for TaskFormData {
    fn from(task: &Task) -> Self {
        Self {
            name: task.name.clone(),
            description: task.description.clone(),
        }
    }
}

fn check_length(field: &'static str, label: &str, value: &str, (min, max): (usize, usize)) -> Option<FieldError> {
    let len = value.trim().chars().count();
    if len == 0 {
        Some(FieldError::new(field, format!("{label} is required")))
    } else if len < min {
        Some(FieldError::new(field, format!("{label} must be at least {min} characters")))
    } else if len > max {
        Some(FieldError::new(field, format!("{label} cannot exceed {max} characters")))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_form_requires_all_fields() {
        let form = ProjectFormData {
            project_name: "Site".into(),
            client_name: " ".into(),
            description: String::new(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(error_for(&errors, "clientName").is_some());
        assert!(error_for(&errors, "projectName").is_none());
    }

    #[test]
    fn test_project_form_serializes_camel_case() {
        let form = ProjectFormData {
            project_name: "Site".into(),
            client_name: "ACME".into(),
            description: "Landing page".into(),
        };
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["projectName"], "Site");
        assert_eq!(json["clientName"], "ACME");
    }

    #[test]
    fn test_task_form_length_bounds() {
        let short = TaskFormData {
            name: "ab".into(),
            description: "too short".into(),
        };
        let errors = short.validate().unwrap_err();
        assert_eq!(
            error_for(&errors, "name").as_deref(),
            Some("Task name must be at least 3 characters")
        );
        assert!(error_for(&errors, "description").is_some());

        let long = TaskFormData {
            name: "x".repeat(51),
            description: "A description that is long enough".into(),
        };
        let errors = long.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message,
            "Task name cannot exceed 50 characters"
        );

        let ok = TaskFormData {
            name: "Header".into(),
            description: "Build the page header".into(),
        };
        assert!(ok.validate().is_ok());
    }
}
