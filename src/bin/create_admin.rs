//! Creates the first administrator, or resets an existing administrator's
//! password and reactivates the account.
//!
//! Usage: `create_admin <email> <name> <password>`

use std::env;

use dotenvy::dotenv;

use agency_admin::auth::hash_password;
use agency_admin::db::establish_connection_pool;
use agency_admin::domain::status::UserRole;
use agency_admin::domain::types::{Email, NewPassword, PersonName};
use agency_admin::domain::user::NewUser;
use agency_admin::load_server_config;
use agency_admin::repository::DieselRepository;
use agency_admin::services::auth::{AdminProvisioning, provision_admin};

fn fail(message: impl std::fmt::Display) -> ! {
    log::error!("{message}");
    std::process::exit(1);
}

fn main() {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args: Vec<String> = env::args().skip(1).collect();
    let [email, name, password] = args.as_slice() else {
        fail("Usage: create_admin <email> <name> <password>");
    };

    let email = Email::new(email.as_str()).unwrap_or_else(|e| fail(format!("Email: {e}")));
    let name = PersonName::new(name.as_str()).unwrap_or_else(|e| fail(format!("Name: {e}")));
    let password =
        NewPassword::new(password.as_str()).unwrap_or_else(|e| fail(format!("Password: {e}")));

    let server_config =
        load_server_config().unwrap_or_else(|e| fail(format!("Error loading server config: {e}")));

    let pool = establish_connection_pool(&server_config.database_url)
        .unwrap_or_else(|e| fail(format!("Failed to establish database connection: {e}")));
    let repo = DieselRepository::new(pool);

    let password_hash = hash_password(password.as_str()).unwrap_or_else(|e| fail(e));

    let new_admin = NewUser {
        name,
        email,
        phone: None,
        company: None,
        role: UserRole::Admin,
        password_hash: Some(password_hash),
    };

    match provision_admin(&repo, new_admin) {
        Ok(AdminProvisioning::Created(user)) => {
            log::info!("Created administrator {} (id {})", user.email, user.id)
        }
        Ok(AdminProvisioning::PasswordReset { user, reactivated }) => {
            log::info!("Password reset for administrator {}", user.email);
            if reactivated {
                log::info!("Administrator {} was inactive and has been reactivated", user.email);
            }
        }
        Err(e) => fail(format!("Failed to provision administrator: {e}")),
    }
}
