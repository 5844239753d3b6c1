//! Admin dashboard for a digital agency: clients, projects, commercial
//! documents, invoicing, the service catalog, tasks and inbound contact
//! messages.
//!
//! With only the `data` feature the crate exposes the persistence layer
//! (`domain`, `models`, `schema`, `repository`). The default `server`
//! feature adds the Actix-web application.

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_identity::IdentityMiddleware;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware as actix_middleware, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::db::establish_connection_pool;
#[cfg(feature = "server")]
use crate::middleware::RedirectUnauthorized;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;
#[cfg(feature = "server")]
use crate::routes::{
    account, api, auth as auth_routes, catalog, clients, contacts, dashboard, estimations,
    invoices, payments, projects, proposals, tasks,
};

#[cfg(feature = "server")]
pub mod auth;
pub mod db;
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
pub mod schema;
#[cfg(feature = "server")]
pub mod services;

/// Loads `config/default.yaml`, the `config/{APP_ENV}.yaml` profile
/// (defaults to `local`) and `APP_*` environment overrides.
#[cfg(feature = "server")]
pub fn load_server_config() -> Result<ServerConfig, config::ConfigError> {
    let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    config::Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(config::Environment::with_prefix("APP"))
        .build()?
        .try_deserialize::<ServerConfig>()
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::try_from(server_config.secret.as_bytes())
        .map_err(|e| std::io::Error::other(format!("Invalid secret: {e}")))?;

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(server_config.domain.clone()))
                    .build(),
            )
            .wrap(actix_middleware::Compress::default())
            .wrap(actix_middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(auth_routes::index)
            .service(auth_routes::signin_page)
            .service(auth_routes::signin)
            .service(auth_routes::logout)
            .service(auth_routes::not_assigned)
            .service(
                web::scope("/api")
                    .app_data(api::json_config())
                    .service(api::submit_contact)
                    .service(account::change_password)
                    .service(account::update_profile),
            )
            .service(
                web::scope("/admin")
                    .wrap(RedirectUnauthorized)
                    .service(dashboard::show_dashboard)
                    .service(account::show_account)
                    .service(clients::show_clients)
                    .service(clients::add_client)
                    .service(clients::upload_clients)
                    .service(clients::show_client)
                    .service(clients::save_client)
                    .service(clients::deactivate_client)
                    .service(clients::reactivate_client)
                    .service(projects::show_projects)
                    .service(projects::add_project)
                    .service(projects::show_project)
                    .service(projects::save_project)
                    .service(projects::change_project_status)
                    .service(proposals::show_proposals)
                    .service(proposals::add_proposal)
                    .service(proposals::change_proposal_status)
                    .service(estimations::show_estimations)
                    .service(estimations::add_estimation)
                    .service(estimations::change_estimation_status)
                    .service(invoices::show_invoices)
                    .service(invoices::add_invoice)
                    .service(invoices::show_invoice)
                    .service(invoices::change_invoice_status)
                    .service(payments::show_payments)
                    .service(payments::record_payment)
                    .service(payments::change_payment_status)
                    .service(catalog::show_packages)
                    .service(catalog::add_package)
                    .service(catalog::show_package)
                    .service(catalog::save_package)
                    .service(catalog::deactivate_package)
                    .service(catalog::reactivate_package)
                    .service(catalog::show_services)
                    .service(catalog::add_service)
                    .service(catalog::show_service)
                    .service(catalog::save_service)
                    .service(catalog::deactivate_service)
                    .service(catalog::reactivate_service)
                    .service(tasks::show_tasks)
                    .service(tasks::add_task)
                    .service(tasks::change_task_status)
                    .service(tasks::delete_task)
                    .service(contacts::show_contacts)
                    .service(contacts::show_contact)
                    .service(contacts::change_contact_status),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;

    #[test]
    fn default_config_provides_a_usable_cookie_key() {
        let server_config = load_server_config().unwrap();

        assert!(!server_config.templates_dir.is_empty());
        assert!(Key::try_from(server_config.secret.as_bytes()).is_ok());
    }
}
