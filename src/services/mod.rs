//! Service layer: role checks and orchestration between forms, repositories
//! and the DTOs handed to routes.

use thiserror::Error;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::{TypeConstraintError, UserId};
use crate::domain::user::User;
use crate::forms::FormError;
use crate::repository::UserReader;
use crate::repository::errors::RepositoryError;

pub mod account;
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

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    /// User-facing validation message.
    #[error("{0}")]
    Form(String),

    #[error("type constraint violation: {0}")]
    TypeConstraint(String),

    #[error("repository error: {0}")]
    Repository(RepositoryError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(err.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

/// Loads the signed-in user and requires an active administrator.
pub fn ensure_admin<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    let user_id = user
        .user_id()
        .and_then(|id| UserId::new(id).ok())
        .ok_or(ServiceError::Unauthorized)?;

    match repo.get_user_by_id(user_id)? {
        Some(account) if account.is_admin() => Ok(account),
        Some(_) => {
            log::warn!("User {user_id} without admin rights tried to access the dashboard");
            Err(ServiceError::Unauthorized)
        }
        None => Err(ServiceError::Unauthorized),
    }
}


#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::domain::status::UserRole;
    use crate::repository::mock::MockRepository;

    #[test]
    fn admin_passes() {
        let repo = repo_with_users();
        let account = ensure_admin(&repo, &session(ADMIN_ID)).expect("admin allowed");
        assert_eq!(account.role, UserRole::Admin);
    }

    #[test]
    fn client_is_rejected() {
        let repo = repo_with_users();
        assert!(matches!(
            ensure_admin(&repo, &session(CLIENT_ID)),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn unknown_or_malformed_subject_is_rejected() {
        let repo = repo_with_users();
        assert!(matches!(
            ensure_admin(&repo, &session(99)),
            Err(ServiceError::Unauthorized)
        ));

        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id().times(0);
        let mut claims = session(ADMIN_ID);
        claims.sub = "not-a-number".into();
        assert!(matches!(
            ensure_admin(&repo, &claims),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn inactive_admin_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id().returning(|_| {
            let mut account = user(ADMIN_ID, UserRole::Admin);
            account.is_active = false;
            Ok(Some(account))
        });
        assert!(matches!(
            ensure_admin(&repo, &session(ADMIN_ID)),
            Err(ServiceError::Unauthorized)
        ));
    }
}
