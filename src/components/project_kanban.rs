//! Project Kanban Components
//!
//! Dashboard with the project board. Projects are polled in the
//! background; drops update status optimistically through the engine.

use std::rc::Rc;

use board_engine::{BoardEngine, BoardScope, Notification, Notifier};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::{BoardCard, BoardHandle, DeleteConfirmButton, StatusBoard};
use crate::config::client_config;
use crate::context::{use_app_context, AppView};
use crate::models::Project;
use crate::polling::{use_polling, with_retry, FetchClock, FetchGuard};
use crate::remote::ProjectStatusRemote;
use crate::store::{
    store_push_notification, store_report_result, store_set_projects, use_app_store, AppStateStoreFields,
};

impl BoardCard for Project {
    fn render_key(&self) -> String {
        format!("{}|{}|{}|{}", self.id, self.project_name, self.client_name, self.description)
    }

    fn render(self) -> AnyView {
        view! { <ProjectCard project=self /> }.into_any()
    }
}

#[component]
pub fn DashboardView() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let config = client_config();

    let notifier: Rc<dyn Notifier> = Rc::new(move |n: Notification| store_push_notification(&store, n));
    let engine = BoardEngine::<Project>::new(BoardScope::Root, Rc::new(ProjectStatusRemote), notifier)
        .with_refresh(move || ctx.reload_projects());
    engine.subscribe(move |snapshot| store_set_projects(&store, snapshot.clone()));
    let board = BoardHandle::new(engine);

    let (loading, set_loading) = signal(true);
    let (load_error, set_load_error) = signal::<Option<String>>(None);
    let clock = FetchClock::new();
    let guard = FetchGuard::new();

    let fetch = move || {
        let ticket = guard.begin();
        spawn_local(async move {
            match with_retry(config.retry_count, commands::list_projects).await {
                Ok(projects) if guard.accept(ticket) => {
                    tracing::debug!(count = projects.len(), ticket, "Projects loaded");
                    clock.mark();
                    set_load_error.set(None);
                    board.load(projects);
                }
                Ok(_) => tracing::debug!(ticket, "Dropped projects response from superseded fetch"),
                Err(err) if guard.is_superseded(ticket) => {
                    tracing::debug!(ticket, error = %err, "Superseded project fetch failed");
                }
                Err(err) => {
                    tracing::error!(error = %err, "Failed to load projects");
                    set_load_error.set(Some(err.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        ctx.projects_trigger.track();
        fetch();
    });
    use_polling(config, clock, fetch);

    let snapshot = Signal::derive(move || store.projects().get());

    view! {
        <section class="dashboard">
            <header class="view-header">
                <div>
                    <h1>"Projects"</h1>
                    <p>"Manage and organize your projects by status"</p>
                </div>
                <button class="primary" on:click=move |_| ctx.navigate(AppView::CreateProject)>
                    "+ New project"
                </button>
            </header>
            {move || load_error.get().map(|message| view! { <p class="error">{message}</p> })}
            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="loading">"Loading projects..."</p> }
            >
                <StatusBoard board=board snapshot=snapshot />
            </Show>
        </section>
    }
}

#[component]
fn ProjectCard(project: Project) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let open_id = project.id.clone();
    let edit_id = project.id.clone();
    let delete_id = project.id.clone();

    let on_delete = Callback::new(move |_: ()| {
        let project_id = delete_id.clone();
        spawn_local(async move {
            let result = commands::delete_project(&project_id).await;
            if store_report_result(&store, result, "Project deleted") {
                ctx.reload_projects();
            }
        });
    });

    view! {
        <article class="project-card">
            <button
                class="card-title"
                on:click=move |_| ctx.navigate(AppView::ProjectDetails(open_id.clone()))
            >
                {project.project_name.clone()}
            </button>
            <p class="card-client">{project.client_name}</p>
            <p class="card-description">{project.description}</p>
            <div class="card-actions">
                <button on:click=move |_| ctx.navigate(AppView::EditProject(edit_id.clone()))>"Edit"</button>
                <DeleteConfirmButton name=project.project_name on_confirm=on_delete />
            </div>
        </article>
    }
}
