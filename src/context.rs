//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

/// Which screen is shown; navigation is a signal, not a router
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppView {
    Dashboard,
    CreateProject,
    EditProject(String),
    ProjectDetails(String),
    EditTask { project_id: String, task_id: String },
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Current screen - read
    pub view: ReadSignal<AppView>,
    /// Current screen - write
    set_view: WriteSignal<AppView>,
    /// Trigger to reload the project list - read
    pub projects_trigger: ReadSignal<u32>,
    /// Trigger to reload the project list - write
    set_projects_trigger: WriteSignal<u32>,
    /// Trigger to reload the open project and its tasks - read
    pub project_trigger: ReadSignal<u32>,
    /// Trigger to reload the open project and its tasks - write
    set_project_trigger: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(
        view: (ReadSignal<AppView>, WriteSignal<AppView>),
        projects_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        project_trigger: (ReadSignal<u32>, WriteSignal<u32>),
    ) -> Self {
        Self {
            view: view.0,
            set_view: view.1,
            projects_trigger: projects_trigger.0,
            set_projects_trigger: projects_trigger.1,
            project_trigger: project_trigger.0,
            set_project_trigger: project_trigger.1,
        }
    }

    pub fn navigate(&self, view: AppView) {
        tracing::debug!(?view, "Navigate");
        self.set_view.set(view);
    }

    /// Trigger a reload of the project list
    pub fn reload_projects(&self) {
        self.set_projects_trigger.update(|v| *v += 1);
    }

    /// Trigger a reload of the open project
    pub fn reload_project(&self) {
        self.set_project_trigger.update(|v| *v += 1);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
