use actix_web::error::InternalError;
use actix_web::{HttpResponse, Responder, post, web};

use crate::dto::account::{ErrorResponse, MessageResponse};
use crate::forms::contacts::ContactRequest;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, contacts as contacts_service};

/// Rejects undecodable JSON bodies with the same `400 {error}` body as
/// validation failures.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string()));
        InternalError::from_response(err, response).into()
    })
}

/// Public endpoint behind the website contact form.
#[post("/contact")]
pub async fn submit_contact(
    repo: web::Data<DieselRepository>,
    web::Json(request): web::Json<ContactRequest>,
) -> impl Responder {
    match contacts_service::submit_contact(repo.get_ref(), request) {
        Ok(_) => HttpResponse::Created().json(MessageResponse {
            message: "Thank you, we will get back to you soon".to_string(),
        }),
        Err(ServiceError::Form(message)) => {
            HttpResponse::BadRequest().json(ErrorResponse::new(message))
        }
        Err(err) => {
            log::error!("Failed to accept contact message: {err}");
            HttpResponse::InternalServerError().json(ErrorResponse::new("Internal server error"))
        }
    }
}
