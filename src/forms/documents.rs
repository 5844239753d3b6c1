//! Forms for the sales pipeline documents: proposals, estimations, invoices
//! and payments.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::domain::document::{NewEstimation, NewProposal};
use crate::domain::invoice::{NewInvoice, NewPayment};
use crate::domain::status::{PaymentMethod, PaymentStatus};
use crate::domain::types::{
    CurrencyCode, DocumentTitle, InvoiceId, InvoiceNumber, ProjectId, non_blank,
};
use crate::forms::{FormError, parse_currency, parse_money, parse_optional_date};

fn project_id(value: i32) -> Result<ProjectId, FormError> {
    ProjectId::new(value).map_err(|_| FormError::InvalidId)
}

fn title(value: String) -> Result<DocumentTitle, FormError> {
    DocumentTitle::new(value).map_err(|_| FormError::InvalidName)
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProposalForm {
    pub project_id: i32,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    pub amount: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub valid_until: Option<String>,
}

impl TryFrom<ProposalForm> for NewProposal {
    type Error = FormError;

    fn try_from(form: ProposalForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            project_id: project_id(form.project_id)?,
            title: title(form.title)?,
            content: non_blank(form.content),
            amount_cents: parse_money(&form.amount)?,
            currency: parse_currency(form.currency)?,
            valid_until: parse_optional_date(form.valid_until)?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct EstimationForm {
    pub project_id: i32,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub amount: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub estimated_hours: Option<String>,
}

impl TryFrom<EstimationForm> for NewEstimation {
    type Error = FormError;

    fn try_from(form: EstimationForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let estimated_hours = non_blank(form.estimated_hours)
            .map(|hours| hours.parse::<i32>().ok().filter(|hours| *hours >= 0))
            .map(|hours| hours.ok_or(FormError::InvalidAmount))
            .transpose()?;

        Ok(Self {
            project_id: project_id(form.project_id)?,
            title: title(form.title)?,
            description: non_blank(form.description),
            amount_cents: parse_money(&form.amount)?,
            currency: parse_currency(form.currency)?,
            estimated_hours,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct InvoiceForm {
    pub project_id: i32,
    #[validate(length(min = 1, max = 64))]
    pub number: String,
    pub amount: String,
    #[serde(default)]
    pub currency: Option<String>,
    /// Defaults to today when blank.
    #[serde(default)]
    pub issued_at: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl TryFrom<InvoiceForm> for NewInvoice {
    type Error = FormError;

    fn try_from(form: InvoiceForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let issued_at: NaiveDate =
            parse_optional_date(form.issued_at)?.unwrap_or_else(|| Utc::now().date_naive());
        let due_date = parse_optional_date(form.due_date)?;
        if due_date.is_some_and(|due| due < issued_at) {
            return Err(FormError::InvalidDate);
        }

        Ok(Self {
            project_id: project_id(form.project_id)?,
            number: InvoiceNumber::new(form.number).map_err(|_| FormError::InvalidName)?,
            amount_cents: parse_money(&form.amount)?,
            currency: parse_currency(form.currency)?,
            issued_at,
            due_date,
            notes: non_blank(form.notes),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct PaymentForm {
    pub invoice_id: i32,
    pub amount: String,
    pub method: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
}

/// Payment fields before the invoice currency is known.
pub struct PaymentPayload {
    pub invoice_id: InvoiceId,
    pub amount_cents: i64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub reference: Option<String>,
}

impl TryFrom<PaymentForm> for PaymentPayload {
    type Error = FormError;

    fn try_from(form: PaymentForm) -> Result<Self, Self::Error> {
        let amount_cents = parse_money(&form.amount)?;
        if amount_cents == 0 {
            return Err(FormError::InvalidAmount);
        }

        let status = match non_blank(form.status) {
            Some(status) => status.parse().map_err(|_| FormError::InvalidStatus)?,
            None => PaymentStatus::Pending,
        };

        Ok(Self {
            invoice_id: InvoiceId::new(form.invoice_id).map_err(|_| FormError::InvalidId)?,
            amount_cents,
            method: form.method.parse().map_err(|_| FormError::InvalidStatus)?,
            status,
            reference: non_blank(form.reference),
        })
    }
}

impl PaymentPayload {
    /// Payments are recorded in the currency of their invoice.
    pub fn into_domain(self, currency: CurrencyCode) -> NewPayment {
        let paid_at = (self.status == PaymentStatus::Completed).then(|| Utc::now().naive_utc());
        NewPayment {
            invoice_id: self.invoice_id,
            amount_cents: self.amount_cents,
            currency,
            method: self.method,
            status: self.status,
            reference: self.reference,
            paid_at,
        }
    }
}
