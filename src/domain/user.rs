use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::status::UserRole;
use crate::domain::types::{Email, PersonName, PhoneNumber, UserId};

/// Account holder: an administrator or a client of the agency.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: PersonName,
    pub email: Email,
    pub phone: Option<PhoneNumber>,
    pub company: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl User {
    /// Only active administrators may use the dashboard.
    pub fn is_admin(&self) -> bool {
        self.is_active && self.role == UserRole::Admin
    }
}

/// User together with the stored password hash, used for sign-in checks.
#[derive(Clone, Debug)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: Option<String>,
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub name: PersonName,
    pub email: Email,
    pub phone: Option<PhoneNumber>,
    pub company: Option<String>,
    pub role: UserRole,
    pub password_hash: Option<String>,
}

impl NewUser {
    /// New client account without a password.
    #[must_use]
    pub fn client(
        name: PersonName,
        email: Email,
        phone: Option<PhoneNumber>,
        company: Option<String>,
    ) -> Self {
        Self {
            name,
            email,
            phone,
            company: company
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            role: UserRole::Client,
            password_hash: None,
        }
    }
}

/// Profile fields editable from the dashboard.
#[derive(Clone, Debug)]
pub struct UpdateUser {
    pub name: PersonName,
    pub email: Email,
    pub phone: Option<PhoneNumber>,
    pub company: Option<String>,
}

/// Client row of the clients table with its project count.
#[derive(Clone, Debug, Serialize)]
pub struct ClientSummary {
    pub client: User,
    pub project_count: usize,
}
