//! DTOs for proposals, estimations, invoices and payments.

use serde::Serialize;

use crate::domain::document::{Estimation, Proposal};
use crate::domain::invoice::{Invoice, Payment};
use crate::domain::money::Money;
use crate::domain::project::Project;
use crate::domain::status::StatusOption;
use crate::dto::{Badged, StatusFilter};
use crate::pagination::Paginated;

#[derive(Debug, Serialize)]
pub struct ProposalRow {
    pub proposal: Proposal,
    pub project: Project,
}

#[derive(Debug, Serialize)]
pub struct EstimationRow {
    pub estimation: Estimation,
    pub project: Project,
}

#[derive(Debug, Serialize)]
pub struct InvoiceRow {
    pub invoice: Invoice,
    pub project: Project,
}

#[derive(Debug, Serialize)]
pub struct PaymentRow {
    pub payment: Payment,
    pub invoice: Invoice,
}

/// List page of one document kind.
#[derive(Debug, Serialize)]
pub struct DocumentsPageData<T> {
    pub items: Paginated<Badged<T>>,
    pub filter: StatusFilter,
    /// Projects offered in the "new document" form.
    pub projects: Vec<Project>,
}

#[derive(Debug, Serialize)]
pub struct InvoicePageData {
    pub invoice: Badged<Invoice>,
    pub project: Project,
    pub payments: Vec<Badged<Payment>>,
    pub outstanding: Money,
    pub status_options: Vec<StatusOption>,
    pub method_options: Vec<StatusOption>,
}

#[derive(Debug, Serialize)]
pub struct PaymentsPageData {
    pub payments: Paginated<Badged<PaymentRow>>,
    pub filter: StatusFilter,
    /// Invoices still awaiting payment, offered in the "record payment" form.
    pub invoices: Vec<Invoice>,
    pub method_options: Vec<StatusOption>,
}
