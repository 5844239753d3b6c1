use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::dto::tasks::TaskQuery;
use crate::forms::StatusForm;
use crate::forms::tasks::TaskForm;
use crate::repository::DieselRepository;
use crate::routes::{base_context, mutation_error, page_error, redirect, render_template};
use crate::services::tasks as tasks_service;

const TASKS_PATH: &str = "/admin/tasks";

#[get("/tasks")]
pub async fn show_tasks(
    query: web::Query<TaskQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match tasks_service::load_tasks(repo.get_ref(), &user, &query) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "tasks");
            context.insert("tasks", &data.tasks);
            context.insert("status_filter", &data.status_filter);
            context.insert("priority_filter", &data.priority_filter);
            context.insert("projects", &data.projects);

            render_template(&tera, "tasks/index.html", &context)
        }
        Err(err) => page_error(err, "/admin", "list tasks"),
    }
}

#[post("/tasks/add")]
pub async fn add_task(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<TaskForm>,
) -> impl Responder {
    match tasks_service::add_task(repo.get_ref(), &user, form) {
        Ok(_) => {
            FlashMessage::success("Task added.").send();
            redirect(TASKS_PATH)
        }
        Err(err) => mutation_error(err, TASKS_PATH, "add the task"),
    }
}

#[post("/tasks/{task_id}/status")]
pub async fn change_task_status(
    task_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<StatusForm>,
) -> impl Responder {
    match tasks_service::set_task_status(repo.get_ref(), &user, task_id.into_inner(), &form) {
        Ok(_) => {
            FlashMessage::success("Task status updated.").send();
            redirect(TASKS_PATH)
        }
        Err(err) => mutation_error(err, TASKS_PATH, "change the task status"),
    }
}

#[post("/tasks/{task_id}/delete")]
pub async fn delete_task(
    task_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match tasks_service::delete_task(repo.get_ref(), &user, task_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Task deleted.").send();
            redirect(TASKS_PATH)
        }
        Err(err) => mutation_error(err, TASKS_PATH, "delete the task"),
    }
}
