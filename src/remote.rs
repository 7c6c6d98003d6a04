//! Status update remotes backed by the REST commands

use async_trait::async_trait;
use board_engine::{ProjectStatus, RemoteError, StatusRemote, StatusUpdate, TaskStatus};

use crate::commands::{self, ApiError};

impl From<ApiError> for RemoteError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Server { status, message } => RemoteError::Rejected {
                status: Some(status),
                message,
            },
            ApiError::Network(message) => RemoteError::Network(message),
            ApiError::HtmlResponse => RemoteError::InvalidResponse(err.to_string()),
            ApiError::Decode(message) => RemoteError::InvalidResponse(message),
        }
    }
}

/// `PATCH /projects/{id}/status`
pub struct ProjectStatusRemote;

#[async_trait(?Send)]
impl StatusRemote<ProjectStatus> for ProjectStatusRemote {
    async fn update_status(&self, update: &StatusUpdate<ProjectStatus>) -> Result<(), RemoteError> {
        commands::update_project_status(&update.item_id, update.status).await?;
        Ok(())
    }
}

/// `PATCH /projects/{pid}/tasks/{tid}/status`
pub struct TaskStatusRemote;

#[async_trait(?Send)]
impl StatusRemote<TaskStatus> for TaskStatusRemote {
    async fn update_status(&self, update: &StatusUpdate<TaskStatus>) -> Result<(), RemoteError> {
        let Some(project_id) = update.parent_id.as_deref() else {
            return Err(RemoteError::InvalidResponse("missing project id".to_string()));
        };
        commands::update_task_status(project_id, &update.item_id, update.status).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::HTML_RESPONSE_MESSAGE;

    #[test]
    fn test_server_error_keeps_message() {
        let err: RemoteError = ApiError::Server {
            status: 422,
            message: "Cannot complete a task on hold".into(),
        }
        .into();
        assert_eq!(err.user_message(), Some("Cannot complete a task on hold"));
    }

    #[test]
    fn test_html_response_is_surfaced() {
        let err: RemoteError = ApiError::HtmlResponse.into();
        assert_eq!(err.user_message(), Some(HTML_RESPONSE_MESSAGE));
    }

    #[test]
    fn test_network_error_has_no_user_message() {
        let err: RemoteError = ApiError::Network("connection refused".into()).into();
        assert_eq!(err.user_message(), None);
    }
}
