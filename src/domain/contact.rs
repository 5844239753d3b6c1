use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::status::ContactStatus;
use crate::domain::types::{ContactId, Email, PersonName, SanitizedText};

/// Message submitted through the public contact form.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Contact {
    pub id: ContactId,
    pub name: PersonName,
    pub email: Email,
    pub subject: Option<String>,
    pub message: SanitizedText,
    pub status: ContactStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewContact {
    pub name: PersonName,
    pub email: Email,
    pub subject: Option<String>,
    pub message: SanitizedText,
}
