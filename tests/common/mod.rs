use std::path::PathBuf;

use actix_web::cookie::Key;
use agency_admin::auth::hash_password;
use agency_admin::db::{DbPool, establish_connection_pool};
use agency_admin::domain::status::UserRole;
use agency_admin::domain::types::{Email, PersonName};
use agency_admin::domain::user::{NewUser, User};
use agency_admin::models::config::ServerConfig;
use agency_admin::repository::{DieselRepository, UserWriter};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// SQLite database file with all migrations applied, removed on drop.
pub struct TestDb {
    pool: DbPool,
    path: PathBuf,
    _dir: tempfile::TempDir,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("create pool");

        let mut conn = pool.get().expect("get connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("run migrations");

        Self {
            pool,
            path,
            _dir: dir,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[allow(dead_code)]
pub const SECRET: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

#[allow(dead_code)]
pub fn server_config() -> ServerConfig {
    ServerConfig {
        domain: "localhost".into(),
        address: "127.0.0.1".into(),
        port: 8080,
        database_url: ":memory:".into(),
        templates_dir: "templates/**/*".into(),
        secret: SECRET.into(),
    }
}

#[allow(dead_code)]
pub fn session_key() -> Key {
    Key::from(SECRET.as_bytes())
}

/// Active administrator able to sign in with `password`.
#[allow(dead_code)]
pub fn create_admin(repo: &DieselRepository, email: &str, password: &str) -> User {
    let new_user = NewUser {
        name: PersonName::new("Agency Admin").unwrap(),
        email: Email::new(email).unwrap(),
        phone: None,
        company: None,
        role: UserRole::Admin,
        password_hash: Some(hash_password(password).unwrap()),
    };
    repo.create_user(&new_user).unwrap()
}
