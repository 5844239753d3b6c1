use actix_multipart::form::MultipartForm;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::dto::ListQuery;
use crate::forms::clients::{ClientForm, UploadClientsForm};
use crate::repository::DieselRepository;
use crate::routes::{base_context, mutation_error, page_error, redirect, render_template};
use crate::services::clients as clients_service;

const CLIENTS_PATH: &str = "/admin/clients";

#[get("/clients")]
pub async fn show_clients(
    query: web::Query<ListQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match clients_service::load_clients(repo.get_ref(), &user, &query) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "clients");
            context.insert("clients", &data.clients);
            context.insert("search_query", &data.search_query);
            context.insert("active", &data.active);

            render_template(&tera, "clients/index.html", &context)
        }
        Err(err) => page_error(err, "/admin", "list clients"),
    }
}

#[get("/clients/{client_id}")]
pub async fn show_client(
    client_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match clients_service::load_client(repo.get_ref(), &user, client_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "clients");
            context.insert("client", &data.client);
            context.insert("projects", &data.projects);
            context.insert("invoice_count", &data.invoice_count);

            render_template(&tera, "clients/show.html", &context)
        }
        Err(err) => page_error(err, CLIENTS_PATH, "load client"),
    }
}

#[post("/clients/add")]
pub async fn add_client(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ClientForm>,
) -> impl Responder {
    match clients_service::add_client(repo.get_ref(), &user, form) {
        Ok(client) => {
            FlashMessage::success(format!("Client {} added.", client.name)).send();
            redirect(&format!("{CLIENTS_PATH}/{}", client.id))
        }
        Err(err) => mutation_error(err, CLIENTS_PATH, "add the client"),
    }
}

#[post("/clients/upload")]
pub async fn upload_clients(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(mut form): MultipartForm<UploadClientsForm>,
) -> impl Responder {
    match clients_service::upload_clients(repo.get_ref(), &user, &mut form) {
        Ok(inserted) => {
            FlashMessage::success(format!("Imported {inserted} clients.")).send();
            redirect(CLIENTS_PATH)
        }
        Err(err) => mutation_error(err, CLIENTS_PATH, "import clients"),
    }
}

#[post("/clients/{client_id}/save")]
pub async fn save_client(
    client_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ClientForm>,
) -> impl Responder {
    let client_id = client_id.into_inner();
    let back = format!("{CLIENTS_PATH}/{client_id}");

    match clients_service::save_client(repo.get_ref(), &user, client_id, form) {
        Ok(_) => {
            FlashMessage::success("Client updated.").send();
            redirect(&back)
        }
        Err(err) => mutation_error(err, &back, "update the client"),
    }
}

#[post("/clients/{client_id}/deactivate")]
pub async fn deactivate_client(
    client_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    set_active(client_id.into_inner(), &user, &repo, false)
}

#[post("/clients/{client_id}/reactivate")]
pub async fn reactivate_client(
    client_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    set_active(client_id.into_inner(), &user, &repo, true)
}

fn set_active(
    client_id: i32,
    user: &AuthenticatedUser,
    repo: &DieselRepository,
    active: bool,
) -> actix_web::HttpResponse {
    let back = format!("{CLIENTS_PATH}/{client_id}");
    match clients_service::set_client_active(repo, user, client_id, active) {
        Ok(_) => {
            let message = if active {
                "Client reactivated."
            } else {
                "Client deactivated."
            };
            FlashMessage::success(message).send();
            redirect(&back)
        }
        Err(err) => mutation_error(err, &back, "change the client status"),
    }
}
