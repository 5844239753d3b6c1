use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::dto::ListQuery;
use crate::forms::StatusForm;
use crate::repository::DieselRepository;
use crate::routes::{base_context, mutation_error, page_error, redirect, render_template};
use crate::services::contacts as contacts_service;

const CONTACTS_PATH: &str = "/admin/contacts";

#[get("/contacts")]
pub async fn show_contacts(
    query: web::Query<ListQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match contacts_service::load_contacts(repo.get_ref(), &user, &query) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "contacts");
            context.insert("contacts", &data.contacts);
            context.insert("status_filter", &data.filter);

            render_template(&tera, "contacts/index.html", &context)
        }
        Err(err) => page_error(err, "/admin", "list contacts"),
    }
}

#[get("/contacts/{contact_id}")]
pub async fn show_contact(
    contact_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match contacts_service::load_contact(repo.get_ref(), &user, contact_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "contacts");
            context.insert("contact", &data.contact);
            context.insert("status_options", &data.status_options);

            render_template(&tera, "contacts/show.html", &context)
        }
        Err(err) => page_error(err, CONTACTS_PATH, "load contact"),
    }
}

#[post("/contacts/{contact_id}/status")]
pub async fn change_contact_status(
    contact_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<StatusForm>,
) -> impl Responder {
    let contact_id = contact_id.into_inner();
    let back = format!("{CONTACTS_PATH}/{contact_id}");

    match contacts_service::set_contact_status(repo.get_ref(), &user, contact_id, &form) {
        Ok(_) => {
            FlashMessage::success("Message status updated.").send();
            redirect(&back)
        }
        Err(err) => mutation_error(err, &back, "change the message status"),
    }
}
