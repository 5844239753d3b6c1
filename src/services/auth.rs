//! Email and password sign-in, and administrator provisioning.

use crate::auth::verify_password;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::status::UserRole;
use crate::domain::user::{NewUser, User};
use crate::forms::auth::{SignInForm, SignInPayload};
use crate::repository::{UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

const INVALID_CREDENTIALS: &str = "Invalid email or password.";

/// Verifies the credentials and returns the claims for a new session.
///
/// Only active administrators may sign in; every failure yields the same
/// message so the form does not reveal which accounts exist.
pub fn sign_in<R>(repo: &R, form: SignInForm) -> ServiceResult<AuthenticatedUser>
where
    R: UserReader + ?Sized,
{
    let payload = SignInPayload::try_from(form)
        .map_err(|_| ServiceError::Form(INVALID_CREDENTIALS.to_string()))?;

    let Some(credentials) = repo.get_credentials_by_email(&payload.email)? else {
        return Err(ServiceError::Form(INVALID_CREDENTIALS.to_string()));
    };

    let Some(hash) = credentials.password_hash.as_deref() else {
        return Err(ServiceError::Form(INVALID_CREDENTIALS.to_string()));
    };

    let verified = verify_password(&payload.password, hash).map_err(|err| {
        log::error!("Failed to verify password of user {}: {err}", credentials.user.id);
        ServiceError::Internal(err.to_string())
    })?;

    if !verified || !credentials.user.is_admin() {
        return Err(ServiceError::Form(INVALID_CREDENTIALS.to_string()));
    }

    log::info!("User {} signed in", credentials.user.id);
    Ok(AuthenticatedUser::for_user(&credentials.user))
}

#[derive(Debug)]
pub enum AdminProvisioning {
    Created(User),
    PasswordReset { user: User, reactivated: bool },
}

/// Creates `new_admin`, or resets the password of the administrator already
/// registered under that email and reactivates the account.
///
/// Client accounts are never promoted.
pub fn provision_admin<R>(repo: &R, new_admin: NewUser) -> ServiceResult<AdminProvisioning>
where
    R: UserReader + UserWriter + ?Sized,
{
    let Some(password_hash) = new_admin.password_hash.as_deref() else {
        return Err(ServiceError::Internal(
            "administrator needs a password hash".to_string(),
        ));
    };

    match repo.get_credentials_by_email(&new_admin.email)? {
        Some(credentials) if credentials.user.role == UserRole::Admin => {
            let user = credentials.user;
            repo.set_password_hash(user.id, password_hash)?;
            if user.is_active {
                return Ok(AdminProvisioning::PasswordReset {
                    user,
                    reactivated: false,
                });
            }

            let user = repo.set_user_active(user.id, true)?;
            Ok(AdminProvisioning::PasswordReset {
                user,
                reactivated: true,
            })
        }
        Some(_) => Err(ServiceError::Form(format!(
            "{} belongs to a client account",
            new_admin.email
        ))),
        None => {
            let user = repo.create_user(&NewUser {
                role: UserRole::Admin,
                ..new_admin
            })?;
            Ok(AdminProvisioning::Created(user))
        }
    }
}
