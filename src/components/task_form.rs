//! Task Form Components

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::{use_app_context, AppView};
use crate::forms::{error_for, FieldError, TaskFormData};
use crate::store::{store_report_result, use_app_store};

/// Task editor; `on_submit` only fires with valid data
#[component]
pub fn TaskForm(
    initial: TaskFormData,
    #[prop(into)] submit_label: String,
    #[prop(into)] on_submit: Callback<TaskFormData>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let name = RwSignal::new(initial.name);
    let description = RwSignal::new(initial.description);
    let errors = RwSignal::new(Vec::<FieldError>::new());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let data = TaskFormData {
            name: name.get(),
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
            <label for="name">"Task name"</label>
            <input
                id="name"
                type="text"
                placeholder="Task name"
                prop:value=move || name.get()
                on:input=move |ev| name.set(event_target_value(&ev))
            />
            {error_line("name")}

            <label for="taskDescription">"Task description"</label>
            <textarea
                id="taskDescription"
                placeholder="Task description"
                prop:value=move || description.get()
                on:input=move |ev| description.set(event_target_value(&ev))
            />
            {error_line("description")}

            <div class="form-actions">
                <button type="submit">{submit_label}</button>
                <button type="button" on:click=move |_| on_cancel.run(())>"Cancel"</button>
            </div>
        </form>
    }
}

/// Collapsible add-task form on the project details view
#[component]
pub fn AddTaskPanel(project_id: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (open, set_open) = signal(false);

    let on_submit = Callback::new(move |data: TaskFormData| {
        let project_id = project_id.clone();
        spawn_local(async move {
            let result = commands::create_task(&project_id, &data).await;
            if store_report_result(&store, result, "Task created") {
                set_open.set(false);
                ctx.reload_project();
            }
        });
    });

    view! {
        <div class="add-task">
            <Show
                when=move || open.get()
                fallback=move || view! {
                    <button class="add-task-btn" on:click=move |_| set_open.set(true)>"+ Add task"</button>
                }
            >
                <TaskForm
                    initial=TaskFormData::default()
                    submit_label="Save task"
                    on_submit=on_submit
                    on_cancel=move |_| set_open.set(false)
                />
            </Show>
        </div>
    }
}

#[component]
pub fn EditTaskView(project_id: String, task_id: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (initial, set_initial) = signal::<Option<TaskFormData>>(None);
    let (load_error, set_load_error) = signal::<Option<String>>(None);

    {
        let project_id = project_id.clone();
        let task_id = task_id.clone();
        spawn_local(async move {
            match commands::get_task(&project_id, &task_id).await {
                Ok(task) => set_initial.set(Some(TaskFormData::from(&task))),
                Err(err) => {
                    tracing::error!(project_id, task_id, error = %err, "Failed to load task");
                    set_load_error.set(Some(err.to_string()));
                }
            }
        });
    }

    let back = {
        let project_id = project_id.clone();
        Callback::new(move |_: ()| ctx.navigate(AppView::ProjectDetails(project_id.clone())))
    };

    let on_submit = Callback::new(move |data: TaskFormData| {
        let project_id = project_id.clone();
        let task_id = task_id.clone();
        spawn_local(async move {
            let result = commands::update_task(&project_id, &task_id, &data).await;
            if store_report_result(&store, result, "Task updated") {
                ctx.navigate(AppView::ProjectDetails(project_id));
            }
        });
    });

    view! {
        <section class="form-view">
            <h1>"Edit task"</h1>
            {move || match (initial.get(), load_error.get()) {
                (Some(data), _) => view! {
                    <TaskForm initial=data submit_label="Save changes" on_submit=on_submit on_cancel=back />
                }.into_any(),
                (None, Some(message)) => view! { <p class="error">{message}</p> }.into_any(),
                (None, None) => view! { <p class="loading">"Loading task..."</p> }.into_any(),
            }}
        </section>
    }
}
