//! Project Form Components
//!
//! Shared project editor plus the create and edit views built on it.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::{use_app_context, AppView};
use crate::forms::{error_for, FieldError, ProjectFormData};
use crate::store::{store_report_result, use_app_store};

/// Project editor; `on_submit` only fires with valid data
#[component]
pub fn ProjectForm(
    initial: ProjectFormData,
    #[prop(into)] submit_label: String,
    #[prop(into)] on_submit: Callback<ProjectFormData>,
) -> impl IntoView {
    let ctx = use_app_context();

    let project_name = RwSignal::new(initial.project_name);
    let client_name = RwSignal::new(initial.client_name);
    let description = RwSignal::new(initial.description);
    let errors = RwSignal::new(Vec::<FieldError>::new());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let data = ProjectFormData {
            project_name: project_name.get(),
            client_name: client_name.get(),
            description: description.get(),
        };
        match data.validate() {
            Ok(()) => {
                errors.set(Vec::new());
                on_submit.run(data);
            }
            Err(found) => errors.set(found),
        }
    };

    let error_line = move |field: &'static str| {
        move || {
            errors.with(|e| error_for(e, field)).map(|message| view! {
                <p class="field-error">{message}</p>
            })
        }
    };

    view! {
        <form class="entity-form" on:submit=submit>
            <label for="projectName">"Project name"</label>
            <input
                id="projectName"
                type="text"
                placeholder="Project name"
                prop:value=move || project_name.get()
                on:input=move |ev| project_name.set(event_target_value(&ev))
            />
            {error_line("projectName")}

            <label for="clientName">"Client name"</label>
            <input
                id="clientName"
                type="text"
                placeholder="Client name"
                prop:value=move || client_name.get()
                on:input=move |ev| client_name.set(event_target_value(&ev))
            />
            {error_line("clientName")}

            <label for="description">"Description"</label>
            <textarea
                id="description"
                placeholder="Project description"
                prop:value=move || description.get()
                on:input=move |ev| description.set(event_target_value(&ev))
            />
            {error_line("description")}

            <div class="form-actions">
                <button type="submit">{submit_label}</button>
                <button type="button" on:click=move |_| ctx.navigate(AppView::Dashboard)>"Back"</button>
            </div>
        </form>
    }
}

#[component]
pub fn CreateProjectView() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let on_submit = Callback::new(move |data: ProjectFormData| {
        spawn_local(async move {
            let result = commands::create_project(&data).await;
            if store_report_result(&store, result, "Project created") {
                ctx.reload_projects();
                ctx.navigate(AppView::Dashboard);
            }
        });
    });

    view! {
        <section class="form-view">
            <h1>"Create project"</h1>
            <ProjectForm initial=ProjectFormData::default() submit_label="Create project" on_submit=on_submit />
        </section>
    }
}

#[component]
pub fn EditProjectView(project_id: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (initial, set_initial) = signal::<Option<ProjectFormData>>(None);
    let (load_error, set_load_error) = signal::<Option<String>>(None);

    {
        let project_id = project_id.clone();
        spawn_local(async move {
            match commands::get_project(&project_id).await {
                Ok(details) => set_initial.set(Some(ProjectFormData::from(&details.project))),
                Err(err) => {
                    tracing::error!(project_id, error = %err, "Failed to load project");
                    set_load_error.set(Some(err.to_string()));
                }
            }
        });
    }

    let on_submit = Callback::new(move |data: ProjectFormData| {
        let project_id = project_id.clone();
        spawn_local(async move {
            let result = commands::update_project(&project_id, &data).await;
            if store_report_result(&store, result, "Project updated") {
                ctx.reload_projects();
                ctx.navigate(AppView::Dashboard);
            }
        });
    });

    view! {
        <section class="form-view">
            <h1>"Edit project"</h1>
            {move || match (initial.get(), load_error.get()) {
                (Some(data), _) => view! {
                    <ProjectForm initial=data submit_label="Save changes" on_submit=on_submit />
                }.into_any(),
                (None, Some(message)) => view! { <p class="error">{message}</p> }.into_any(),
                (None, None) => view! { <p class="loading">"Loading project..."</p> }.into_any(),
            }}
        </section>
    }
}
