//! Task Board Components
//!
//! Project details view: the project header, its task board scoped to
//! the project, and the add-task panel.

use std::rc::Rc;

use board_engine::{BoardEngine, BoardScope, BoardSnapshot, Notification, Notifier};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::{AddTaskPanel, BoardCard, BoardHandle, DeleteConfirmButton, StatusBoard};
use crate::context::{use_app_context, AppView};
use crate::models::{Project, Task};
use crate::polling::FetchGuard;
use crate::remote::TaskStatusRemote;
use crate::store::{
    store_push_notification, store_report_result, store_set_tasks, use_app_store, AppStateStoreFields,
};

impl BoardCard for Task {
    fn render_key(&self) -> String {
        format!("{}|{}|{}", self.id, self.name, self.description)
    }

    fn render(self) -> AnyView {
        view! { <TaskCard task=self /> }.into_any()
    }
}

#[component]
pub fn ProjectDetailsView(project_id: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    // Never show the previous project's tasks
    store_set_tasks(&store, BoardSnapshot::default());

    let notifier: Rc<dyn Notifier> = Rc::new(move |n: Notification| store_push_notification(&store, n));
    let engine = BoardEngine::<Task>::new(BoardScope::Parent(project_id.clone()), Rc::new(TaskStatusRemote), notifier)
        .with_refresh(move || ctx.reload_project());
    engine.subscribe(move |snapshot| store_set_tasks(&store, snapshot.clone()));
    let board = BoardHandle::new(engine);

    let (project, set_project) = signal::<Option<Project>>(None);
    let (load_error, set_load_error) = signal::<Option<String>>(None);

    let guard = FetchGuard::new();
    {
        let project_id = project_id.clone();
        Effect::new(move |_| {
            ctx.project_trigger.track();
            let project_id = project_id.clone();
            let ticket = guard.begin();
            spawn_local(async move {
                match commands::get_project(&project_id).await {
                    Ok(_) if !guard.accept(ticket) => {
                        tracing::debug!(project_id, ticket, "Dropped project response from superseded fetch");
                    }
                    Err(err) if guard.is_superseded(ticket) => {
                        tracing::debug!(project_id, ticket, error = %err, "Superseded project fetch failed");
                    }
                    Ok(mut details) => {
                        tracing::debug!(project_id, tasks = details.tasks.len(), "Project loaded");
                        for task in details.tasks.iter_mut().filter(|t| t.project.is_empty()) {
                            task.project = project_id.clone();
                        }
                        set_load_error.set(None);
                        set_project.set(Some(details.project));
                        board.load(details.tasks);
                    }
                    Err(err) => {
                        tracing::error!(project_id, error = %err, "Failed to load project");
                        set_load_error.set(Some(err.to_string()));
                    }
                }
            });
        });
    }

    let snapshot = Signal::derive(move || store.tasks().get());

    view! {
        <section class="project-details">
            <button class="back-btn" on:click=move |_| ctx.navigate(AppView::Dashboard)>"← Projects"</button>
            {move || load_error.get().map(|message| view! { <p class="error">{message}</p> })}
            {move || match project.get() {
                Some(project) => view! {
                    <header class="view-header">
                        <div>
                            <h1>{project.project_name}</h1>
                            <p class="card-client">{project.client_name}</p>
                            <p>{project.description}</p>
                        </div>
                    </header>
                }.into_any(),
                None => view! { <p class="loading">"Loading project..."</p> }.into_any(),
            }}
            <AddTaskPanel project_id=project_id />
            <h2>"Tasks"</h2>
            <StatusBoard board=board snapshot=snapshot />
        </section>
    }
}

#[component]
fn TaskCard(task: Task) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let edit_target = AppView::EditTask {
        project_id: task.project.clone(),
        task_id: task.id.clone(),
    };
    let project_id = task.project.clone();
    let task_id = task.id.clone();

    let on_delete = Callback::new(move |_: ()| {
        let project_id = project_id.clone();
        let task_id = task_id.clone();
        spawn_local(async move {
            let result = commands::delete_task(&project_id, &task_id).await;
            if store_report_result(&store, result, "Task deleted") {
                ctx.reload_project();
            }
        });
    });

    view! {
        <article class="task-card">
            <p class="card-title">{task.name.clone()}</p>
            <p class="card-description">{task.description}</p>
            <div class="card-actions">
                <button on:click=move |_| ctx.navigate(edit_target.clone())>"Edit"</button>
                <DeleteConfirmButton name=task.name on_confirm=on_delete />
            </div>
        </article>
    }
}
