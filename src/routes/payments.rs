use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::dto::ListQuery;
use crate::forms::StatusForm;
use crate::forms::documents::PaymentForm;
use crate::repository::DieselRepository;
use crate::routes::{base_context, mutation_error, page_error, redirect, render_template};
use crate::services::payments as payments_service;

const PAYMENTS_PATH: &str = "/admin/payments";

#[get("/payments")]
pub async fn show_payments(
    query: web::Query<ListQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match payments_service::load_payments(repo.get_ref(), &user, &query) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "payments");
            context.insert("payments", &data.payments);
            context.insert("status_filter", &data.filter);
            context.insert("invoices", &data.invoices);
            context.insert("method_options", &data.method_options);

            render_template(&tera, "payments/index.html", &context)
        }
        Err(err) => page_error(err, "/admin", "list payments"),
    }
}

#[post("/payments/add")]
pub async fn record_payment(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<PaymentForm>,
) -> impl Responder {
    match payments_service::record_payment(repo.get_ref(), &user, form) {
        Ok(payment) => {
            FlashMessage::success(format!("Payment of {} recorded.", payment.amount)).send();
            redirect(PAYMENTS_PATH)
        }
        Err(err) => mutation_error(err, PAYMENTS_PATH, "record the payment"),
    }
}

#[post("/payments/{payment_id}/status")]
pub async fn change_payment_status(
    payment_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<StatusForm>,
) -> impl Responder {
    match payments_service::set_payment_status(
        repo.get_ref(),
        &user,
        payment_id.into_inner(),
        &form,
    ) {
        Ok(_) => {
            FlashMessage::success("Payment status updated.").send();
            redirect(PAYMENTS_PATH)
        }
        Err(err) => mutation_error(err, PAYMENTS_PATH, "change the payment status"),
    }
}
