use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::dto::ListQuery;
use crate::forms::StatusForm;
use crate::forms::documents::EstimationForm;
use crate::repository::DieselRepository;
use crate::routes::{base_context, mutation_error, page_error, redirect, render_template};
use crate::services::estimations as estimations_service;

const ESTIMATIONS_PATH: &str = "/admin/estimations";

#[get("/estimations")]
pub async fn show_estimations(
    query: web::Query<ListQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match estimations_service::load_estimations(repo.get_ref(), &user, &query) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "estimations");
            context.insert("estimations", &data.items);
            context.insert("status_filter", &data.filter);
            context.insert("projects", &data.projects);

            render_template(&tera, "estimations/index.html", &context)
        }
        Err(err) => page_error(err, "/admin", "list estimations"),
    }
}

#[post("/estimations/add")]
pub async fn add_estimation(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<EstimationForm>,
) -> impl Responder {
    match estimations_service::add_estimation(repo.get_ref(), &user, form) {
        Ok(_) => {
            FlashMessage::success("Estimation added.").send();
            redirect(ESTIMATIONS_PATH)
        }
        Err(err) => mutation_error(err, ESTIMATIONS_PATH, "add the estimation"),
    }
}

#[post("/estimations/{estimation_id}/status")]
pub async fn change_estimation_status(
    estimation_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<StatusForm>,
) -> impl Responder {
    match estimations_service::set_estimation_status(
        repo.get_ref(),
        &user,
        estimation_id.into_inner(),
        &form,
    ) {
        Ok(_) => {
            FlashMessage::success("Estimation status updated.").send();
            redirect(ESTIMATIONS_PATH)
        }
        Err(err) => mutation_error(err, ESTIMATIONS_PATH, "change the estimation status"),
    }
}
