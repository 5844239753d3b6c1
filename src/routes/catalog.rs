//! Packages and services of the catalog.

use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::dto::ListQuery;
use crate::forms::catalog::{PackageForm, ServiceForm};
use crate::repository::DieselRepository;
use crate::routes::{base_context, mutation_error, page_error, redirect, render_template};
use crate::services::catalog as catalog_service;

const PACKAGES_PATH: &str = "/admin/packages";
const SERVICES_PATH: &str = "/admin/services";

#[get("/packages")]
pub async fn show_packages(
    query: web::Query<ListQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::load_packages(repo.get_ref(), &user, &query) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "packages");
            context.insert("packages", &data.packages);
            context.insert("services", &data.services);
            context.insert("billing_options", &data.billing_options);
            context.insert("active", &data.active);

            render_template(&tera, "packages/index.html", &context)
        }
        Err(err) => page_error(err, "/admin", "list packages"),
    }
}

#[get("/packages/{package_id}")]
pub async fn show_package(
    package_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::load_package(repo.get_ref(), &user, package_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "packages");
            context.insert("package", &data.package);
            context.insert("services", &data.services);
            context.insert("selected_service_ids", &data.selected_service_ids);
            context.insert("billing_options", &data.billing_options);

            render_template(&tera, "packages/show.html", &context)
        }
        Err(err) => page_error(err, PACKAGES_PATH, "load package"),
    }
}

/// The package form repeats `service_ids`, which `web::Form` cannot decode.
fn parse_package_form(body: &web::Bytes, back: &str) -> Result<PackageForm, HttpResponse> {
    PackageForm::from_bytes(body.as_ref()).map_err(|err| {
        log::warn!("Rejected package form: {err}");
        FlashMessage::error(format!("Package form is incomplete: {err}")).send();
        redirect(back)
    })
}

#[post("/packages/add")]
pub async fn add_package(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    let form = match parse_package_form(&body, PACKAGES_PATH) {
        Ok(form) => form,
        Err(response) => return response,
    };

    match catalog_service::add_package(repo.get_ref(), &user, form) {
        Ok(package) => {
            FlashMessage::success(format!("Package {} created.", package.name)).send();
            redirect(PACKAGES_PATH)
        }
        Err(err) => mutation_error(err, PACKAGES_PATH, "create the package"),
    }
}

#[post("/packages/{package_id}/save")]
pub async fn save_package(
    package_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    let package_id = package_id.into_inner();
    let back = format!("{PACKAGES_PATH}/{package_id}");
    let form = match parse_package_form(&body, &back) {
        Ok(form) => form,
        Err(response) => return response,
    };

    match catalog_service::save_package(repo.get_ref(), &user, package_id, form) {
        Ok(_) => {
            FlashMessage::success("Package updated.").send();
            redirect(&back)
        }
        Err(err) => mutation_error(err, &back, "update the package"),
    }
}

#[post("/packages/{package_id}/deactivate")]
pub async fn deactivate_package(
    package_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    set_package_active(package_id.into_inner(), &user, &repo, false)
}

#[post("/packages/{package_id}/reactivate")]
pub async fn reactivate_package(
    package_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    set_package_active(package_id.into_inner(), &user, &repo, true)
}

fn set_package_active(
    package_id: i32,
    user: &AuthenticatedUser,
    repo: &DieselRepository,
    active: bool,
) -> HttpResponse {
    match catalog_service::set_package_active(repo, user, package_id, active) {
        Ok(package) => {
            let state = if active { "active" } else { "inactive" };
            FlashMessage::success(format!("Package {} is now {state}.", package.name)).send();
            redirect(PACKAGES_PATH)
        }
        Err(err) => mutation_error(err, PACKAGES_PATH, "change the package status"),
    }
}

#[get("/services")]
pub async fn show_services(
    query: web::Query<ListQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::load_services(repo.get_ref(), &user, &query) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "services");
            context.insert("services", &data.services);
            context.insert("active", &data.active);

            render_template(&tera, "services/index.html", &context)
        }
        Err(err) => page_error(err, "/admin", "list services"),
    }
}

#[get("/services/{service_id}")]
pub async fn show_service(
    service_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::load_service(repo.get_ref(), &user, service_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "services");
            context.insert("service", &data.service);

            render_template(&tera, "services/show.html", &context)
        }
        Err(err) => page_error(err, SERVICES_PATH, "load service"),
    }
}

#[post("/services/add")]
pub async fn add_service(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ServiceForm>,
) -> impl Responder {
    match catalog_service::add_service(repo.get_ref(), &user, form) {
        Ok(service) => {
            FlashMessage::success(format!("Service {} created.", service.name)).send();
            redirect(SERVICES_PATH)
        }
        Err(err) => mutation_error(err, SERVICES_PATH, "create the service"),
    }
}

#[post("/services/{service_id}/save")]
pub async fn save_service(
    service_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ServiceForm>,
) -> impl Responder {
    let service_id = service_id.into_inner();
    let back = format!("{SERVICES_PATH}/{service_id}");

    match catalog_service::save_service(repo.get_ref(), &user, service_id, form) {
        Ok(_) => {
            FlashMessage::success("Service updated.").send();
            redirect(&back)
        }
        Err(err) => mutation_error(err, &back, "update the service"),
    }
}

#[post("/services/{service_id}/deactivate")]
pub async fn deactivate_service(
    service_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    set_service_active(service_id.into_inner(), &user, &repo, false)
}

#[post("/services/{service_id}/reactivate")]
pub async fn reactivate_service(
    service_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    set_service_active(service_id.into_inner(), &user, &repo, true)
}

fn set_service_active(
    service_id: i32,
    user: &AuthenticatedUser,
    repo: &DieselRepository,
    active: bool,
) -> HttpResponse {
    match catalog_service::set_service_active(repo, user, service_id, active) {
        Ok(service) => {
            let state = if active { "active" } else { "inactive" };
            FlashMessage::success(format!("Service {} is now {state}.", service.name)).send();
            redirect(SERVICES_PATH)
        }
        Err(err) => mutation_error(err, SERVICES_PATH, "change the service status"),
    }
}
