use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::dto::ListQuery;
use crate::forms::StatusForm;
use crate::forms::documents::InvoiceForm;
use crate::repository::DieselRepository;
use crate::routes::{base_context, mutation_error, page_error, redirect, render_template};
use crate::services::invoices as invoices_service;

const INVOICES_PATH: &str = "/admin/invoices";

#[get("/invoices")]
pub async fn show_invoices(
    query: web::Query<ListQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match invoices_service::load_invoices(repo.get_ref(), &user, &query) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "invoices");
            context.insert("invoices", &data.items);
            context.insert("status_filter", &data.filter);
            context.insert("projects", &data.projects);

            render_template(&tera, "invoices/index.html", &context)
        }
        Err(err) => page_error(err, "/admin", "list invoices"),
    }
}

#[get("/invoices/{invoice_id}")]
pub async fn show_invoice(
    invoice_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match invoices_service::load_invoice(repo.get_ref(), &user, invoice_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "invoices");
            context.insert("invoice", &data.invoice);
            context.insert("project", &data.project);
            context.insert("payments", &data.payments);
            context.insert("outstanding", &data.outstanding);
            context.insert("status_options", &data.status_options);
            context.insert("method_options", &data.method_options);

            render_template(&tera, "invoices/show.html", &context)
        }
        Err(err) => page_error(err, INVOICES_PATH, "load invoice"),
    }
}

#[post("/invoices/add")]
pub async fn add_invoice(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<InvoiceForm>,
) -> impl Responder {
    match invoices_service::add_invoice(repo.get_ref(), &user, form) {
        Ok(invoice) => {
            FlashMessage::success(format!("Invoice {} issued.", invoice.number)).send();
            redirect(&format!("{INVOICES_PATH}/{}", invoice.id))
        }
        Err(err) => mutation_error(err, INVOICES_PATH, "issue the invoice"),
    }
}

#[post("/invoices/{invoice_id}/status")]
pub async fn change_invoice_status(
    invoice_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<StatusForm>,
) -> impl Responder {
    let invoice_id = invoice_id.into_inner();
    let back = format!("{INVOICES_PATH}/{invoice_id}");

    match invoices_service::set_invoice_status(repo.get_ref(), &user, invoice_id, &form) {
        Ok(_) => {
            FlashMessage::success("Invoice status updated.").send();
            redirect(&back)
        }
        Err(err) => mutation_error(err, &back, "change the invoice status"),
    }
}
