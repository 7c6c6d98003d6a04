//! UI Components
//!
//! Reusable Leptos components.

mod delete_confirm_button;
mod log_panel;
mod notification_list;
mod project_form;
mod project_kanban;
mod status_board;
mod task_board;
mod task_form;

pub use delete_confirm_button::DeleteConfirmButton;
pub use log_panel::LogPanel;
pub use notification_list::NotificationList;
pub use project_form::{CreateProjectView, EditProjectView, ProjectForm};
pub use project_kanban::DashboardView;
pub use status_board::{BoardCard, BoardHandle, StatusBoard};
pub use task_board::ProjectDetailsView;
pub use task_form::{AddTaskPanel, EditTaskView, TaskForm};
