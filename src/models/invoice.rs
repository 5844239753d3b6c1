//! Diesel models representing invoices and payments.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::invoice::{
    Invoice as DomainInvoice, NewInvoice as DomainNewInvoice, NewPayment as DomainNewPayment,
    Payment as DomainPayment,
};
use crate::domain::money::Money;
use crate::domain::types::{
    CurrencyCode, InvoiceId, InvoiceNumber, PaymentId, ProjectId, TypeConstraintError,
};
use crate::models::project::Project;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::invoices)]
#[diesel(belongs_to(Project, foreign_key = project_id))]
pub struct Invoice {
    pub id: i32,
    pub project_id: i32,
    pub number: String,
    pub amount_cents: i64,
    pub currency: String,
    pub status: String,
    pub issued_at: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::invoices)]
pub struct NewInvoice<'a> {
    pub project_id: i32,
    pub number: &'a str,
    pub amount_cents: i64,
    pub currency: &'a str,
    pub issued_at: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<&'a str>,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::payments)]
#[diesel(belongs_to(Invoice, foreign_key = invoice_id))]
pub struct Payment {
    pub id: i32,
    pub invoice_id: i32,
    pub amount_cents: i64,
    pub currency: String,
    pub method: String,
    pub status: String,
    pub reference: Option<String>,
    pub paid_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::payments)]
pub struct NewPayment<'a> {
    pub invoice_id: i32,
    pub amount_cents: i64,
    pub currency: &'a str,
    pub method: &'a str,
    pub status: &'a str,
    pub reference: Option<&'a str>,
    pub paid_at: Option<NaiveDateTime>,
}

impl TryFrom<Invoice> for DomainInvoice {
    type Error = TypeConstraintError;

    fn try_from(invoice: Invoice) -> Result<Self, Self::Error> {
        Ok(Self {
            id: InvoiceId::new(invoice.id)?,
            project_id: ProjectId::new(invoice.project_id)?,
            number: InvoiceNumber::new(invoice.number)?,
            amount: Money::new(invoice.amount_cents, CurrencyCode::new(invoice.currency)?),
            status: invoice.status.parse()?,
            issued_at: invoice.issued_at,
            due_date: invoice.due_date,
            notes: invoice.notes,
            created_at: invoice.created_at,
            updated_at: invoice.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewInvoice> for NewInvoice<'a> {
    fn from(invoice: &'a DomainNewInvoice) -> Self {
        Self {
            project_id: invoice.project_id.get(),
            number: invoice.number.as_str(),
            amount_cents: invoice.amount_cents,
            currency: invoice.currency.as_str(),
            issued_at: invoice.issued_at,
            due_date: invoice.due_date,
            notes: invoice.notes.as_deref(),
        }
    }
}

impl TryFrom<Payment> for DomainPayment {
    type Error = TypeConstraintError;

    fn try_from(payment: Payment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PaymentId::new(payment.id)?,
            invoice_id: InvoiceId::new(payment.invoice_id)?,
            amount: Money::new(payment.amount_cents, CurrencyCode::new(payment.currency)?),
            method: payment.method.parse()?,
            status: payment.status.parse()?,
            reference: payment.reference,
            paid_at: payment.paid_at,
            created_at: payment.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewPayment> for NewPayment<'a> {
    fn from(payment: &'a DomainNewPayment) -> Self {
        Self {
            invoice_id: payment.invoice_id.get(),
            amount_cents: payment.amount_cents,
            currency: payment.currency.as_str(),
            method: payment.method.as_str(),
            status: payment.status.as_str(),
            reference: payment.reference.as_deref(),
            paid_at: payment.paid_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::status::{PaymentMethod, PaymentStatus};

    #[test]
    fn payment_into_domain() {
        let now = Utc::now().naive_utc();
        let db = Payment {
            id: 9,
            invoice_id: 2,
            amount_cents: 4_200,
            currency: "GBP".into(),
            method: "PAYPAL".into(),
            status: "REFUNDED".into(),
            reference: Some("txn-1".into()),
            paid_at: Some(now),
            created_at: now,
        };
        let domain = DomainPayment::try_from(db).expect("valid payment");
        assert_eq!(domain.method, PaymentMethod::Paypal);
        assert_eq!(domain.status, PaymentStatus::Refunded);
        assert_eq!(domain.amount.display(), "£42.00");
    }

    #[test]
    fn invoice_with_unknown_status_fails() {
        let now = Utc::now().naive_utc();
        let db = Invoice {
            id: 1,
            project_id: 1,
            number: "INV-1".into(),
            amount_cents: 1,
            currency: "USD".into(),
            status: "LOST".into(),
            issued_at: now.date(),
            due_date: None,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        assert!(DomainInvoice::try_from(db).is_err());
    }
}
