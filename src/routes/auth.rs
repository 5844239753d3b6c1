//! Sign-in, sign-out and the "no access" page.

use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::auth::SignInForm;
use crate::middleware::SIGNIN_PATH;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{alerts_context, redirect, render_template};
use crate::services::{ServiceError, auth as auth_service};

pub const DASHBOARD_PATH: &str = "/admin";

#[get("/")]
pub async fn index() -> impl Responder {
    redirect(DASHBOARD_PATH)
}

#[get("/auth/signin")]
pub async fn signin_page(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if user.is_some() {
        return redirect(DASHBOARD_PATH);
    }

    let context = alerts_context(&flash_messages);
    render_template(&tera, "auth/signin.html", &context)
}

#[post("/auth/signin")]
pub async fn signin(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<SignInForm>,
) -> impl Responder {
    let claims = match auth_service::sign_in(repo.get_ref(), form) {
        Ok(claims) => claims,
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            return redirect(SIGNIN_PATH);
        }
        Err(err) => {
            log::error!("Failed to sign in: {err}");
            FlashMessage::error("Sign-in is unavailable, try again later.").send();
            return redirect(SIGNIN_PATH);
        }
    };

    let token = match claims.to_jwt(&server_config.secret) {
        Ok(token) => token,
        Err(err) => {
            log::error!("Failed to issue session token: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    if let Err(err) = Identity::login(&req.extensions(), token) {
        log::error!("Failed to store identity: {err}");
        return HttpResponse::InternalServerError().finish();
    }

    redirect(DASHBOARD_PATH)
}

#[post("/logout")]
pub async fn logout(user: Option<Identity>) -> impl Responder {
    if let Some(user) = user {
        user.logout();
    }
    redirect(SIGNIN_PATH)
}

#[get("/na")]
pub async fn not_assigned(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = alerts_context(&flash_messages);
    render_template(&tera, "main/not_assigned.html", &context)
}
