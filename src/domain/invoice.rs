//! Invoices and the payments recorded against them.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::money::Money;
use crate::domain::status::{InvoiceStatus, PaymentMethod, PaymentStatus};
use crate::domain::types::{CurrencyCode, InvoiceId, InvoiceNumber, PaymentId, ProjectId};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Invoice {
    pub id: InvoiceId,
    pub project_id: ProjectId,
    pub number: InvoiceNumber,
    pub amount: Money,
    pub status: InvoiceStatus,
    pub issued_at: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Invoice {
    /// Amount left to pay given the completed payments.
    pub fn outstanding(&self, payments: &[Payment]) -> Money {
        let paid: i64 = payments
            .iter()
            .filter(|payment| payment.status == PaymentStatus::Completed)
            .map(|payment| payment.amount.cents)
            .sum();
        Money::new(
            (self.amount.cents - paid).max(0),
            self.amount.currency.clone(),
        )
    }
}

#[derive(Clone, Debug)]
pub struct NewInvoice {
    pub project_id: ProjectId,
    pub number: InvoiceNumber,
    pub amount_cents: i64,
    pub currency: CurrencyCode,
    pub issued_at: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Payment {
    pub id: PaymentId,
    pub invoice_id: InvoiceId,
    pub amount: Money,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub reference: Option<String>,
    pub paid_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewPayment {
    pub invoice_id: InvoiceId,
    pub amount_cents: i64,
    pub currency: CurrencyCode,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub reference: Option<String>,
    pub paid_at: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn payment(id: i32, cents: i64, status: PaymentStatus) -> Payment {
        Payment {
            id: PaymentId::new(id).unwrap(),
            invoice_id: InvoiceId::new(1).unwrap(),
            amount: Money::new(cents, CurrencyCode::default()),
            method: PaymentMethod::Card,
            status,
            reference: None,
            paid_at: None,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn outstanding_counts_only_completed_payments() {
        let now = Utc::now().naive_utc();
        let invoice = Invoice {
            id: InvoiceId::new(1).unwrap(),
            project_id: ProjectId::new(1).unwrap(),
            number: InvoiceNumber::new("INV-1").unwrap(),
            amount: Money::new(100_00, CurrencyCode::default()),
            status: InvoiceStatus::Sent,
            issued_at: now.date(),
            due_date: None,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        let payments = vec![
            payment(1, 30_00, PaymentStatus::Completed),
            payment(2, 50_00, PaymentStatus::Failed),
            payment(3, 20_00, PaymentStatus::Pending),
        ];
        assert_eq!(invoice.outstanding(&payments).cents, 70_00);

        let overpaid = vec![payment(4, 150_00, PaymentStatus::Completed)];
        assert_eq!(invoice.outstanding(&overpaid).cents, 0);
    }
}
