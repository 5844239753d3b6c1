use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::dto::ListQuery;
use crate::forms::StatusForm;
use crate::forms::projects::ProjectForm;
use crate::repository::DieselRepository;
use crate::routes::{base_context, mutation_error, page_error, redirect, render_template};
use crate::services::projects as projects_service;

const PROJECTS_PATH: &str = "/admin/projects";

#[derive(Deserialize)]
struct ProjectsQueryParams {
    status: Option<String>,
    search: Option<String>,
    page: Option<usize>,
    /// Kept as a string so the "all clients" option can submit an empty value.
    client_id: Option<String>,
}

#[get("/projects")]
pub async fn show_projects(
    params: web::Query<ProjectsQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = params.into_inner();
    let client_id = params.client_id.as_deref().and_then(|id| id.trim().parse().ok());
    let query = ListQuery {
        status: params.status,
        search: params.search,
        page: params.page,
    };

    match projects_service::load_projects(repo.get_ref(), &user, &query, client_id) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "projects");
            context.insert("projects", &data.projects);
            context.insert("status_filter", &data.filter);
            context.insert("search_query", &data.search_query);
            context.insert("client_id", &data.client_id);
            context.insert("clients", &data.clients);

            render_template(&tera, "projects/index.html", &context)
        }
        Err(err) => page_error(err, "/admin", "list projects"),
    }
}

#[get("/projects/{project_id}")]
pub async fn show_project(
    project_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match projects_service::load_project(repo.get_ref(), &user, project_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "projects");
            context.insert("project", &data.project);
            context.insert("client", &data.client);
            context.insert("proposals", &data.proposals);
            context.insert("estimations", &data.estimations);
            context.insert("invoices", &data.invoices);
            context.insert("tasks", &data.tasks);
            context.insert("status_options", &data.status_options);

            render_template(&tera, "projects/show.html", &context)
        }
        Err(err) => page_error(err, PROJECTS_PATH, "load project"),
    }
}

#[post("/projects/add")]
pub async fn add_project(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ProjectForm>,
) -> impl Responder {
    match projects_service::add_project(repo.get_ref(), &user, form) {
        Ok(project) => {
            FlashMessage::success("Project created.").send();
            redirect(&format!("{PROJECTS_PATH}/{}", project.id))
        }
        Err(err) => mutation_error(err, PROJECTS_PATH, "create the project"),
    }
}

#[post("/projects/{project_id}/save")]
pub async fn save_project(
    project_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ProjectForm>,
) -> impl Responder {
    let project_id = project_id.into_inner();
    let back = format!("{PROJECTS_PATH}/{project_id}");

    match projects_service::save_project(repo.get_ref(), &user, project_id, form) {
        Ok(_) => {
            FlashMessage::success("Project updated.").send();
            redirect(&back)
        }
        Err(err) => mutation_error(err, &back, "update the project"),
    }
}

#[post("/projects/{project_id}/status")]
pub async fn change_project_status(
    project_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<StatusForm>,
) -> impl Responder {
    let project_id = project_id.into_inner();
    let back = format!("{PROJECTS_PATH}/{project_id}");

    match projects_service::set_project_status(repo.get_ref(), &user, project_id, &form) {
        Ok(_) => {
            FlashMessage::success("Project status updated.").send();
            redirect(&back)
        }
        Err(err) => mutation_error(err, &back, "change the project status"),
    }
}
