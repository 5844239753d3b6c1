//! Services behind the account page and the account JSON API.

use crate::auth::{hash_password, verify_password};
use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::UserId;
use crate::domain::user::{User, UserCredentials};
use crate::dto::account::AccountPageData;
use crate::forms::account::{
    ChangePasswordError, ChangePasswordPayload, ChangePasswordRequest, UpdateProfilePayload,
    UpdateProfileRequest,
};
use crate::repository::errors::RepositoryError;
use crate::repository::{UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult, ensure_admin};

pub fn load_account_page<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<AccountPageData>
where
    R: UserReader + ?Sized,
{
    let user = ensure_admin(repo, user)?;
    Ok(AccountPageData { user })
}

/// Credentials of the session owner; a stale session is unauthorized.
fn session_credentials<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<UserCredentials>
where
    R: UserReader + ?Sized,
{
    let user_id = user
        .user_id()
        .and_then(|id| UserId::new(id).ok())
        .ok_or(ServiceError::Unauthorized)?;

    match repo.get_credentials_by_id(user_id)? {
        Some(credentials) if credentials.user.is_active => Ok(credentials),
        _ => Err(ServiceError::Unauthorized),
    }
}

/// Replaces the password after verifying the current one.
pub fn change_password<R>(
    repo: &R,
    user: &AuthenticatedUser,
    request: ChangePasswordRequest,
) -> ServiceResult<()>
where
    R: UserReader + UserWriter + ?Sized,
{
    let credentials = session_credentials(repo, user)?;

    let payload = ChangePasswordPayload::try_from(request).map_err(|err| match err {
        ChangePasswordError::MissingFields => ServiceError::Form(err.to_string()),
        ChangePasswordError::Weak(reason) => ServiceError::Form(capitalize(&reason.to_string())),
    })?;

    let current_ok = match credentials.password_hash.as_deref() {
        Some(hash) => verify_password(&payload.current_password, hash).map_err(|err| {
            log::error!("Stored password hash of user {} is unusable: {err}", credentials.user.id);
            ServiceError::Internal(err.to_string())
        })?,
        None => false,
    };
    if !current_ok {
        return Err(ServiceError::Form("Current password is incorrect".to_string()));
    }

    let hash = hash_password(payload.new_password.as_str())
        .map_err(|err| ServiceError::Internal(err.to_string()))?;
    repo.set_password_hash(credentials.user.id, &hash)?;

    log::info!("User {} changed their password", credentials.user.id);
    Ok(())
}

/// Updates name, email and phone of the session owner.
pub fn update_profile<R>(
    repo: &R,
    user: &AuthenticatedUser,
    request: UpdateProfileRequest,
) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    let credentials = session_credentials(repo, user)?;

    let payload = UpdateProfilePayload::try_from(request)?;
    let mut updates = payload.into_domain();
    if updates.company.is_none() {
        updates.company = credentials.user.company.clone();
    }

    if updates.email != credentials.user.email
        && repo.get_credentials_by_email(&updates.email)?.is_some()
    {
        return Err(ServiceError::Form("Email is already in use".to_string()));
    }

    repo.update_user(credentials.user.id, &updates)
        .map_err(|err| match err {
            RepositoryError::ConstraintViolation(_) => {
                ServiceError::Form("Email is already in use".to_string())
            }
            other => other.into(),
        })
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::status::UserRole;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{ADMIN_ID, session, user};

    fn repo_with_password(password: &str) -> MockRepository {
        let hash = hash_password(password).unwrap();
        let mut repo = MockRepository::new();
        repo.expect_get_credentials_by_id().returning(move |id| {
            Ok((id.get() == ADMIN_ID).then(|| UserCredentials {
                user: user(ADMIN_ID, UserRole::Admin),
                password_hash: Some(hash.clone()),
            }))
        });
        repo
    }

    fn request(current: &str, new: &str) -> ChangePasswordRequest {
        ChangePasswordRequest {
            current_password: Some(current.into()),
            new_password: Some(new.into()),
        }
    }

    #[test]
    fn changes_password_with_correct_current_password() {
        let mut repo = repo_with_password("oldpass12");
        repo.expect_set_password_hash()
            .withf(|id, hash| id.get() == ADMIN_ID && verify_password("newpass34", hash).unwrap())
            .times(1)
            .returning(|_, _| Ok(()));

        change_password(&repo, &session(ADMIN_ID), request("oldpass12", "newpass34")).unwrap();
    }

    #[test]
    fn wrong_current_password_is_a_form_error() {
        let mut repo = repo_with_password("oldpass12");
        repo.expect_set_password_hash().times(0);

        match change_password(&repo, &session(ADMIN_ID), request("guess1234", "newpass34")) {
            Err(ServiceError::Form(message)) => assert_eq!(message, "Current password is incorrect"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn weak_password_message_is_capitalized() {
        let mut repo = repo_with_password("oldpass12");
        repo.expect_set_password_hash().times(0);

        match change_password(&repo, &session(ADMIN_ID), request("oldpass12", "short1")) {
            Err(ServiceError::Form(message)) => {
                assert_eq!(message, "Password must be at least 8 characters long")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn stale_session_is_unauthorized() {
        let repo = repo_with_password("oldpass12");
        assert!(matches!(
            change_password(&repo, &session(42), request("oldpass12", "newpass34")),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let mut repo = repo_with_password("oldpass12");
        repo.expect_get_credentials_by_email().returning(|_| {
            Ok(Some(UserCredentials {
                user: user(7, UserRole::Client),
                password_hash: None,
            }))
        });
        repo.expect_update_user().times(0);

        let result = update_profile(
            &repo,
            &session(ADMIN_ID),
            UpdateProfileRequest {
                name: Some("Admin".into()),
                email: Some("user7@example.com".into()),
                phone: None,
                company: None,
            },
        );
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
