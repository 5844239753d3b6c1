//! Form definitions backing the dashboard routes.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::money::parse_amount;
use crate::domain::types::{CurrencyCode, TypeConstraintError, non_blank};

pub mod account;
pub mod auth;
pub mod catalog;
pub mod clients;
pub mod contacts;
pub mod documents;
pub mod projects;
pub mod tasks;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("invalid amount")]
    InvalidAmount,

    #[error("invalid currency code")]
    InvalidCurrency,

    #[error("invalid date, expected YYYY-MM-DD")]
    InvalidDate,

    #[error("invalid status")]
    InvalidStatus,

    #[error("invalid identifier")]
    InvalidId,

    #[error("{0}")]
    Password(TypeConstraintError),

    #[error("invalid CSV file: {0}")]
    InvalidCsv(String),

    #[error("malformed form data: {0}")]
    Malformed(String),
}

/// Status change submitted from any list or detail page.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
}

impl StatusForm {
    /// Parses the submitted value into one of the status enums.
    pub fn parse<S>(&self) -> Result<S, FormError>
    where
        S: FromStr<Err = TypeConstraintError>,
    {
        self.status.parse().map_err(|_| FormError::InvalidStatus)
    }
}

/// Parses an HTML date input; blank means no date.
pub(crate) fn parse_optional_date(value: Option<String>) -> Result<Option<NaiveDate>, FormError> {
    non_blank(value)
        .map(|date| NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|_| FormError::InvalidDate))
        .transpose()
}

pub(crate) fn parse_money(value: &str) -> Result<i64, FormError> {
    parse_amount(value).map_err(|_| FormError::InvalidAmount)
}

/// Blank currency falls back to the default code.
pub(crate) fn parse_currency(value: Option<String>) -> Result<CurrencyCode, FormError> {
    match non_blank(value) {
        Some(code) => CurrencyCode::new(code).map_err(|_| FormError::InvalidCurrency),
        None => Ok(CurrencyCode::default()),
    }
}
