//! Taskboard Frontend App
//!
//! Top-level layout: the current view, notifications and the log panel.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{
    CreateProjectView, DashboardView, EditProjectView, EditTaskView, LogPanel, NotificationList,
    ProjectDetailsView,
};
use crate::context::{AppContext, AppView};
use crate::store::AppState;

#[component]
pub fn App() -> impl IntoView {
    // State
    let (current, set_current) = signal(AppView::Dashboard);
    let (projects_trigger, set_projects_trigger) = signal(0u32);
    let (project_trigger, set_project_trigger) = signal(0u32);

    // Provide context to all children
    provide_context(AppContext::new(
        (current, set_current),
        (projects_trigger, set_projects_trigger),
        (project_trigger, set_project_trigger),
    ));
    provide_context(Store::new(AppState::default()));

    let current_view = move || match current.get() {
        AppView::Dashboard => view! { <DashboardView /> }.into_any(),
        AppView::CreateProject => view! { <CreateProjectView /> }.into_any(),
        AppView::EditProject(project_id) => view! { <EditProjectView project_id=project_id /> }.into_any(),
        AppView::ProjectDetails(project_id) => view! { <ProjectDetailsView project_id=project_id /> }.into_any(),
        AppView::EditTask { project_id, task_id } => {
            view! { <EditTaskView project_id=project_id task_id=task_id /> }.into_any()
        }
    };

    view! {
        <div class="app-layout">
            <nav class="top-bar">
                <span class="brand">"Taskboard"</span>
            </nav>
            <main class="main-content">
                {current_view}
            </main>
            <NotificationList />
            <LogPanel />
        </div>
    }
}
