use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{NOT_ALLOWED_PATH, base_context, page_error, render_template};
use crate::services::dashboard as dashboard_service;

#[get("")]
pub async fn show_dashboard(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match dashboard_service::load_dashboard(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "dashboard");
            context.insert("stats", &data.stats);
            context.insert("total_projects", &data.total_projects);
            context.insert("projects_by_status", &data.projects_by_status);
            context.insert("recent_projects", &data.recent_projects);
            context.insert("recent_payments", &data.recent_payments);

            render_template(&tera, "dashboard/index.html", &context)
        }
        Err(err) => page_error(err, NOT_ALLOWED_PATH, "load dashboard"),
    }
}
