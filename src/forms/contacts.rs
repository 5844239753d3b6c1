use serde::Deserialize;
use validator::Validate;

use crate::domain::contact::NewContact;
use crate::domain::types::{Email, PersonName, SanitizedText, non_blank};
use crate::forms::FormError;

/// Public contact-form submission.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub subject: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
}

impl TryFrom<ContactRequest> for NewContact {
    type Error = FormError;

    fn try_from(request: ContactRequest) -> Result<Self, Self::Error> {
        request.validate()?;

        Ok(Self {
            name: PersonName::new(request.name).map_err(|_| FormError::InvalidName)?,
            email: Email::new(request.email).map_err(|_| FormError::InvalidEmail)?,
            subject: non_blank(request.subject).map(|subject| ammonia::clean(&subject)),
            message: SanitizedText::new(request.message).map_err(|_| FormError::InvalidName)?,
        })
    }
}
