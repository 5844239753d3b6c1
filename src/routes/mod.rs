//! HTTP handlers and the helpers they share.
//!
//! Dashboard handlers live under the `/admin` scope and render Tera
//! templates or redirect with a flash message; `/api` handlers answer JSON.

use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::domain::auth::AuthenticatedUser;
use crate::services::ServiceError;

pub mod account;
pub mod api;
pub mod auth;
pub mod catalog;
pub mod clients;
pub mod contacts;
pub mod dashboard;
pub mod estimations;
pub mod invoices;
pub mod payments;
pub mod projects;
pub mod proposals;
pub mod tasks;

pub const NOT_ALLOWED_PATH: &str = "/na";
const NOT_ALLOWED: &str = "You do not have access to the dashboard.";

/// Maps a flash level to the Bootstrap alert class.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        Level::Info | Level::Debug => "info",
    }
}

/// Context with the pending flash messages as `alerts`.
pub fn alerts_context(flash_messages: &IncomingFlashMessages) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context
}

/// Context shared by every dashboard page: alerts, the signed-in user and
/// the sidebar entry to highlight.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    current_page: &str,
) -> Context {
    let mut context = alerts_context(flash_messages);
    context.insert("current_user", user);
    context.insert("current_page", current_page);
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Response for a dashboard page whose service call failed.
pub(crate) fn page_error(err: ServiceError, back: &str, action: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            FlashMessage::error(NOT_ALLOWED).send();
            redirect(NOT_ALLOWED_PATH)
        }
        ServiceError::NotFound => {
            FlashMessage::error("Not found.").send();
            redirect(back)
        }
        err => {
            log::error!("Failed to {action}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Flash message and redirect for a dashboard form submission that failed.
pub(crate) fn mutation_error(err: ServiceError, back: &str, action: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            FlashMessage::error(NOT_ALLOWED).send();
            redirect(NOT_ALLOWED_PATH)
        }
        ServiceError::Form(message) => {
            FlashMessage::error(message).send();
            redirect(back)
        }
        ServiceError::NotFound => {
            FlashMessage::error("Not found.").send();
            redirect(back)
        }
        err => {
            log::error!("Failed to {action}: {err}");
            FlashMessage::error(format!("Failed to {action}.")).send();
            redirect(back)
        }
    }
}
