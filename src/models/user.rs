//! Diesel models representing users.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{Email, PersonName, PhoneNumber, TypeConstraintError, UserId};
use crate::domain::user::{NewUser as DomainNewUser, UpdateUser as DomainUpdateUser, User as DomainUser, UserCredentials};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
/// Diesel model for [`crate::domain::user::User`].
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub role: String,
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
/// Insertable form of [`User`].
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub company: Option<&'a str>,
    pub role: &'a str,
    pub password_hash: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::users)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`User`] profile.
pub struct UpdateUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub company: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::new(user.id)?,
            name: PersonName::new(user.name)?,
            email: Email::new(user.email)?,
            phone: user.phone.map(PhoneNumber::new).transpose()?,
            company: user.company,
            role: user.role.parse()?,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        })
    }
}

impl TryFrom<User> for UserCredentials {
    type Error = TypeConstraintError;

    fn try_from(mut user: User) -> Result<Self, Self::Error> {
        let password_hash = user.password_hash.take();
        Ok(Self {
            user: DomainUser::try_from(user)?,
            password_hash,
        })
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(user: &'a DomainNewUser) -> Self {
        Self {
            name: user.name.as_str(),
            email: user.email.as_str(),
            phone: user.phone.as_ref().map(PhoneNumber::as_str),
            company: user.company.as_deref(),
            role: user.role.as_str(),
            password_hash: user.password_hash.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateUser> for UpdateUser<'a> {
    fn from(user: &'a DomainUpdateUser) -> Self {
        Self {
            name: user.name.as_str(),
            email: user.email.as_str(),
            phone: user.phone.as_ref().map(PhoneNumber::as_str),
            company: user.company.as_deref(),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::status::UserRole;

    fn db_user() -> User {
        let now = Utc::now().naive_utc();
        User {
            id: 3,
            name: "Ada".into(),
            email: "ada@example.com".into(),
            phone: None,
            company: Some("Engines Ltd".into()),
            role: "ADMIN".into(),
            password_hash: Some("$argon2id$hash".into()),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn user_into_domain() {
        let domain = DomainUser::try_from(db_user()).expect("valid user");
        assert_eq!(domain.id.get(), 3);
        assert_eq!(domain.role, UserRole::Admin);
        assert!(domain.is_admin());
        assert_eq!(domain.company.as_deref(), Some("Engines Ltd"));
    }

    #[test]
    fn credentials_keep_the_hash() {
        let credentials = UserCredentials::try_from(db_user()).expect("valid user");
        assert_eq!(credentials.password_hash.as_deref(), Some("$argon2id$hash"));
        assert_eq!(credentials.user.email.as_str(), "ada@example.com");
    }

    #[test]
    fn unknown_role_is_rejected() {
        let mut user = db_user();
        user.role = "ROOT".into();
        assert!(DomainUser::try_from(user).is_err());
    }

    #[test]
    fn from_domain_new_user() {
        let domain = DomainNewUser::client(
            PersonName::new("Bob").unwrap(),
            Email::new("bob@example.com").unwrap(),
            None,
            Some("  ".into()),
        );
        let new: NewUser = (&domain).into();
        assert_eq!(new.role, "CLIENT");
        assert_eq!(new.company, None);
        assert_eq!(new.password_hash, None);
    }
}
