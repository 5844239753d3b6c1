use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::dto::ListQuery;
use crate::forms::StatusForm;
use crate::forms::documents::ProposalForm;
use crate::repository::DieselRepository;
use crate::routes::{base_context, mutation_error, page_error, redirect, render_template};
use crate::services::proposals as proposals_service;

const PROPOSALS_PATH: &str = "/admin/proposals";

#[get("/proposals")]
pub async fn show_proposals(
    query: web::Query<ListQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match proposals_service::load_proposals(repo.get_ref(), &user, &query) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "proposals");
            context.insert("proposals", &data.items);
            context.insert("status_filter", &data.filter);
            context.insert("projects", &data.projects);

            render_template(&tera, "proposals/index.html", &context)
        }
        Err(err) => page_error(err, "/admin", "list proposals"),
    }
}

#[post("/proposals/add")]
pub async fn add_proposal(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ProposalForm>,
) -> impl Responder {
    match proposals_service::add_proposal(repo.get_ref(), &user, form) {
        Ok(_) => {
            FlashMessage::success("Proposal added.").send();
            redirect(PROPOSALS_PATH)
        }
        Err(err) => mutation_error(err, PROPOSALS_PATH, "add the proposal"),
    }
}

#[post("/proposals/{proposal_id}/status")]
pub async fn change_proposal_status(
    proposal_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<StatusForm>,
) -> impl Responder {
    match proposals_service::set_proposal_status(
        repo.get_ref(),
        &user,
        proposal_id.into_inner(),
        &form,
    ) {
        Ok(proposal) => {
            FlashMessage::success(format!("Proposal \"{}\" updated.", proposal.title)).send();
            redirect(PROPOSALS_PATH)
        }
        Err(err) => mutation_error(err, PROPOSALS_PATH, "change the proposal status"),
    }
}
