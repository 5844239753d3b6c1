//! Account page and the JSON account API.

use actix_web::{HttpResponse, Responder, get, patch, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::dto::account::{ErrorResponse, MessageResponse};
use crate::forms::account::{ChangePasswordRequest, UpdateProfileRequest};
use crate::repository::DieselRepository;
use crate::routes::{base_context, page_error, render_template};
use crate::services::{ServiceError, ServiceResult, account as account_service};

#[get("/account")]
pub async fn show_account(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match account_service::load_account_page(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "account");
            context.insert("account", &data.user);
            render_template(&tera, "account/index.html", &context)
        }
        Err(err) => page_error(err, "/admin", "load account"),
    }
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new("Unauthorized"))
}

/// Maps an account API outcome onto the `{message}` / `{error}` contract.
fn json_outcome<T>(result: ServiceResult<T>, success: &str, action: &str) -> HttpResponse {
    match result {
        Ok(_) => HttpResponse::Ok().json(MessageResponse {
            message: success.to_string(),
        }),
        Err(ServiceError::Unauthorized) => unauthorized(),
        Err(ServiceError::Form(message)) => {
            HttpResponse::BadRequest().json(ErrorResponse::new(message))
        }
        Err(err) => {
            log::error!("Failed to {action}: {err}");
            HttpResponse::InternalServerError().json(ErrorResponse::new("Internal server error"))
        }
    }
}

#[patch("/account/password")]
pub async fn change_password(
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    request: Result<web::Json<ChangePasswordRequest>, actix_web::Error>,
) -> impl Responder {
    let Some(user) = user else {
        return unauthorized();
    };
    let request = match request {
        Ok(web::Json(request)) => request,
        Err(err) => return err.error_response(),
    };

    json_outcome(
        account_service::change_password(repo.get_ref(), &user, request),
        "Password updated successfully",
        "change password",
    )
}

#[patch("/account/profile")]
pub async fn update_profile(
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    request: Result<web::Json<UpdateProfileRequest>, actix_web::Error>,
) -> impl Responder {
    let Some(user) = user else {
        return unauthorized();
    };
    let request = match request {
        Ok(web::Json(request)) => request,
        Err(err) => return err.error_response(),
    };

    json_outcome(
        account_service::update_profile(repo.get_ref(), &user, request),
        "Profile updated successfully",
        "update profile",
    )
}
