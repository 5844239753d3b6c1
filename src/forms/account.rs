//! JSON bodies accepted by the account API.
//!
//! Fields are optional at the serde level so that a missing field produces
//! the same `400 {error}` response as an empty one.

use serde::Deserialize;
use thiserror::Error;

use crate::domain::types::{
    Email, NewPassword, PersonName, PhoneNumber, TypeConstraintError, non_blank,
};
use crate::domain::user::UpdateUser;
use crate::forms::FormError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

pub struct ChangePasswordPayload {
    pub current_password: String,
    pub new_password: NewPassword,
}

#[derive(Debug, Error)]
pub enum ChangePasswordError {
    #[error("Current password and new password are required")]
    MissingFields,
    #[error(transparent)]
    Weak(#[from] TypeConstraintError),
}

impl TryFrom<ChangePasswordRequest> for ChangePasswordPayload {
    type Error = ChangePasswordError;

    fn try_from(request: ChangePasswordRequest) -> Result<Self, Self::Error> {
        let current_password = request
            .current_password
            .filter(|value| !value.is_empty())
            .ok_or(ChangePasswordError::MissingFields)?;
        let new_password = request
            .new_password
            .filter(|value| !value.is_empty())
            .ok_or(ChangePasswordError::MissingFields)?;

        Ok(Self {
            current_password,
            new_password: NewPassword::new(new_password)?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
}

pub struct UpdateProfilePayload {
    pub name: PersonName,
    pub email: Email,
    pub phone: Option<PhoneNumber>,
    pub company: Option<String>,
}

impl TryFrom<UpdateProfileRequest> for UpdateProfilePayload {
    type Error = FormError;

    fn try_from(request: UpdateProfileRequest) -> Result<Self, Self::Error> {
        let name = non_blank(request.name)
            .and_then(|name| PersonName::new(name).ok())
            .ok_or(FormError::InvalidName)?;
        let email = non_blank(request.email)
            .and_then(|email| Email::new(email).ok())
            .ok_or(FormError::InvalidEmail)?;
        let phone = non_blank(request.phone)
            .map(PhoneNumber::new)
            .transpose()
            .map_err(|_| FormError::InvalidPhoneNumber)?;

        Ok(Self {
            name,
            email,
            phone,
            company: non_blank(request.company),
        })
    }
}

impl UpdateProfilePayload {
    pub fn into_domain(self) -> UpdateUser {
        UpdateUser {
            name: self.name,
            email: self.email,
            phone: self.phone,
            company: self.company,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(current: Option<&str>, new: Option<&str>) -> ChangePasswordRequest {
        ChangePasswordRequest {
            current_password: current.map(str::to_string),
            new_password: new.map(str::to_string),
        }
    }

    #[test]
    fn missing_or_empty_fields_are_rejected() {
        for req in [
            request(None, Some("abcdef12")),
            request(Some("old"), None),
            request(Some(""), Some("abcdef12")),
        ] {
            assert!(matches!(
                ChangePasswordPayload::try_from(req),
                Err(ChangePasswordError::MissingFields)
            ));
        }
    }

    #[test]
    fn weak_new_password_is_rejected() {
        let cases = [
            ("abc12", TypeConstraintError::PasswordTooShort),
            ("12345678", TypeConstraintError::PasswordMissingLetter),
            ("abcdefgh", TypeConstraintError::PasswordMissingDigit),
        ];
        for (password, expected) in cases {
            match ChangePasswordPayload::try_from(request(Some("old"), Some(password))) {
                Err(ChangePasswordError::Weak(err)) => assert_eq!(err, expected),
                _ => panic!("{password} should be rejected"),
            }
        }
    }

    #[test]
    fn camel_case_body_is_accepted() {
        let req: ChangePasswordRequest =
            serde_json::from_str(r#"{"currentPassword":"old","newPassword":"newpass12"}"#)
                .unwrap();
        let payload = ChangePasswordPayload::try_from(req).unwrap();
        assert_eq!(payload.current_password, "old");
        assert_eq!(payload.new_password.as_str(), "newpass12");
    }

    #[test]
    fn profile_requires_name_and_email() {
        let missing_name = UpdateProfileRequest {
            email: Some("a@example.com".into()),
            ..Default::default()
        };
        assert!(matches!(
            UpdateProfilePayload::try_from(missing_name),
            Err(FormError::InvalidName)
        ));

        let payload = UpdateProfilePayload::try_from(UpdateProfileRequest {
            name: Some(" Ann ".into()),
            email: Some("ANN@example.com".into()),
            phone: Some("".into()),
            company: None,
        })
        .unwrap();
        assert_eq!(payload.email.as_str(), "ann@example.com");
        assert!(payload.phone.is_none());
    }
}
