use crate::domain::auth::AuthenticatedUser;
use crate::domain::invoice::Payment;
use crate::domain::status::{InvoiceStatus, PaymentMethod, PaymentStatus, StatusBadge, status_options};
use crate::domain::types::PaymentId;
use crate::dto::documents::{PaymentRow, PaymentsPageData};
use crate::dto::{Badged, ListQuery, StatusFilter};
use crate::forms::StatusForm;
use crate::forms::documents::{PaymentForm, PaymentPayload};
use crate::pagination::{Paginated, Pagination};
use crate::repository::{
    DocumentListQuery, InvoiceReader, PaymentReader, PaymentWriter, UserReader,
};
use crate::services::invoices::get_invoice;
use crate::services::{ServiceError, ServiceResult, ensure_admin};

pub fn load_payments<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: &ListQuery,
) -> ServiceResult<PaymentsPageData>
where
    R: UserReader + InvoiceReader + PaymentReader + ?Sized,
{
    ensure_admin(repo, user)?;

    let pagination = Pagination::new(query.page(), query.per_page());
    let status = query.status_filter::<PaymentStatus>();

    let mut list_query = DocumentListQuery::default().paginate(pagination.page, pagination.per_page);
    if let Some(status) = status {
        list_query = list_query.status(status);
    }

    let (total, rows) = repo.list_payments(list_query).map_err(|err| {
        log::error!("Failed to list payments: {err}");
        err
    })?;
    let items = rows
        .into_iter()
        .map(|(payment, invoice)| {
            let badge = payment.status.badge();
            Badged {
                item: PaymentRow { payment, invoice },
                badge,
            }
        })
        .collect();

    // Sent or overdue invoices that still have a balance left to pay.
    let (_, all_invoices) = repo.list_invoices(DocumentListQuery::default())?;
    let mut invoices = Vec::new();
    for (invoice, _) in all_invoices {
        if !InvoiceStatus::UNPAID.contains(&invoice.status) {
            continue;
        }
        let payments = repo.list_invoice_payments(invoice.id)?;
        if invoice.outstanding(&payments).cents > 0 {
            invoices.push(invoice);
        }
    }

    Ok(PaymentsPageData {
        payments: Paginated::new(items, pagination, total),
        filter: StatusFilter::new(PaymentStatus::ALL, status),
        invoices,
        method_options: status_options(PaymentMethod::ALL),
    })
}

/// Records a payment in the currency of its invoice.
pub fn record_payment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: PaymentForm,
) -> ServiceResult<Payment>
where
    R: UserReader + InvoiceReader + PaymentWriter + ?Sized,
{
    ensure_admin(repo, user)?;

    let payload = PaymentPayload::try_from(form)?;
    let invoice = get_invoice(repo, payload.invoice_id.get())
        .map_err(|_| ServiceError::Form("Select an existing invoice".to_string()))?;

    let payment = repo
        .create_payment(&payload.into_domain(invoice.amount.currency.clone()))
        .map_err(|err| {
            log::error!("Failed to record payment for invoice {}: {err}", invoice.id);
            err
        })?;

    log::info!(
        "Payment {} of {} recorded for invoice {}",
        payment.id,
        payment.amount,
        invoice.number
    );
    Ok(payment)
}

pub fn set_payment_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    payment_id: i32,
    form: &StatusForm,
) -> ServiceResult<Payment>
where
    R: UserReader + PaymentWriter + ?Sized,
{
    ensure_admin(repo, user)?;

    let payment_id = PaymentId::new(payment_id).map_err(|_| ServiceError::NotFound)?;
    let status: PaymentStatus = form.parse()?;
    Ok(repo.set_payment_status(payment_id, status)?)
}
