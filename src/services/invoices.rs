//! Invoices: list, details with payments and balance, create and status change.

use crate::domain::auth::AuthenticatedUser;
use crate::domain::invoice::{Invoice, NewInvoice};
use crate::domain::status::{InvoiceStatus, PaymentMethod, StatusBadge, status_options};
use crate::domain::types::InvoiceId;
use crate::dto::documents::{DocumentsPageData, InvoicePageData, InvoiceRow};
use crate::dto::{Badged, ListQuery, StatusFilter};
use crate::forms::StatusForm;
use crate::forms::documents::InvoiceForm;
use crate::pagination::{Paginated, Pagination};
use crate::repository::errors::RepositoryError;
use crate::repository::{
    DocumentListQuery, InvoiceReader, InvoiceWriter, ProjectReader, UserReader,
};
use crate::services::projects::{get_project, project_options};
use crate::services::{ServiceError, ServiceResult, ensure_admin};

pub(crate) fn get_invoice<R>(repo: &R, invoice_id: i32) -> ServiceResult<Invoice>
where
    R: InvoiceReader + ?Sized,
{
    let invoice_id = InvoiceId::new(invoice_id).map_err(|_| ServiceError::NotFound)?;
    repo.get_invoice_by_id(invoice_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn load_invoices<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: &ListQuery,
) -> ServiceResult<DocumentsPageData<InvoiceRow>>
where
    R: UserReader + ProjectReader + InvoiceReader + ?Sized,
{
    ensure_admin(repo, user)?;

    let pagination = Pagination::new(query.page(), query.per_page());
    let status = query.status_filter::<InvoiceStatus>();

    let mut list_query = DocumentListQuery::default().paginate(pagination.page, pagination.per_page);
    if let Some(status) = status {
        list_query = list_query.status(status);
    }

    let (total, rows) = repo.list_invoices(list_query).map_err(|err| {
        log::error!("Failed to list invoices: {err}");
        err
    })?;
    let items = rows
        .into_iter()
        .map(|(invoice, project)| {
            let status = invoice.status;
            Badged::new(InvoiceRow { invoice, project }, &status)
        })
        .collect();

    Ok(DocumentsPageData {
        items: Paginated::new(items, pagination, total),
        filter: StatusFilter::new(InvoiceStatus::ALL, status),
        projects: project_options(repo)?,
    })
}

/// Invoice with its payments and the amount still outstanding.
pub fn load_invoice<R>(
    repo: &R,
    user: &AuthenticatedUser,
    invoice_id: i32,
) -> ServiceResult<InvoicePageData>
where
    R: UserReader + ProjectReader + InvoiceReader + ?Sized,
{
    ensure_admin(repo, user)?;
    let invoice = get_invoice(repo, invoice_id)?;
    let project = get_project(repo, invoice.project_id.get())?;

    let payments = repo.list_invoice_payments(invoice.id)?;
    let outstanding = invoice.outstanding(&payments);
    let payments = payments
        .into_iter()
        .map(|payment| {
            let badge = payment.status.badge();
            Badged {
                item: payment,
                badge,
            }
        })
        .collect();

    let status = invoice.status;
    Ok(InvoicePageData {
        invoice: Badged::new(invoice, &status),
        project,
        payments,
        outstanding,
        status_options: status_options(InvoiceStatus::ALL),
        method_options: status_options(PaymentMethod::ALL),
    })
}

pub fn add_invoice<R>(repo: &R, user: &AuthenticatedUser, form: InvoiceForm) -> ServiceResult<Invoice>
where
    R: UserReader + ProjectReader + InvoiceWriter + ?Sized,
{
    ensure_admin(repo, user)?;

    let new_invoice = NewInvoice::try_from(form)?;
    get_project(repo, new_invoice.project_id.get())
        .map_err(|_| ServiceError::Form("Select an existing project".to_string()))?;

    let invoice = repo.create_invoice(&new_invoice).map_err(|err| match err {
        RepositoryError::ConstraintViolation(_) => ServiceError::Form(format!(
            "Invoice number {} is already in use",
            new_invoice.number
        )),
        other => {
            log::error!("Failed to create invoice: {other}");
            other.into()
        }
    })?;

    log::info!("Invoice {} issued for project {}", invoice.number, invoice.project_id);
    Ok(invoice)
}

pub fn set_invoice_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    invoice_id: i32,
    form: &StatusForm,
) -> ServiceResult<Invoice>
where
    R: UserReader + InvoiceWriter + ?Sized,
{
    ensure_admin(repo, user)?;

    let invoice_id = InvoiceId::new(invoice_id).map_err(|_| ServiceError::NotFound)?;
    let status: InvoiceStatus = form.parse()?;
    Ok(repo.set_invoice_status(invoice_id, status)?)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::invoice::Payment;
    use crate::domain::money::Money;
    use crate::domain::status::PaymentStatus;
    use crate::domain::types::{CurrencyCode, PaymentId};
    use crate::services::test_support::{ADMIN_ID, invoice, project, repo_with_users, session};

    fn payment(id: i32, cents: i64, status: PaymentStatus) -> Payment {
        Payment {
            id: PaymentId::new(id).unwrap(),
            invoice_id: InvoiceId::new(1).unwrap(),
            amount: Money::new(cents, CurrencyCode::default()),
            method: PaymentMethod::BankTransfer,
            status,
            reference: None,
            paid_at: None,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn invoice_page_computes_outstanding() {
        let mut repo = repo_with_users();
        repo.expect_get_invoice_by_id()
            .returning(|id| Ok(Some(invoice(id.get(), 1_000_00))));
        repo.expect_get_project_by_id()
            .returning(|id| Ok(Some(project(id.get()))));
        repo.expect_list_invoice_payments().returning(|_| {
            Ok(vec![
                payment(1, 400_00, PaymentStatus::Completed),
                payment(2, 100_00, PaymentStatus::Pending),
            ])
        });

        let data = load_invoice(&repo, &session(ADMIN_ID), 1).unwrap();
        assert_eq!(data.outstanding.cents, 600_00);
        assert_eq!(data.outstanding.display(), "$600.00");
        assert_eq!(data.payments.len(), 2);
        assert_eq!(data.payments[1].badge.color, "warning");
    }

    #[test]
    fn duplicate_number_is_a_form_error() {
        let mut repo = repo_with_users();
        repo.expect_get_project_by_id()
            .returning(|id| Ok(Some(project(id.get()))));
        repo.expect_create_invoice().returning(|_| {
            Err(RepositoryError::ConstraintViolation(
                "unique: invoices.number".into(),
            ))
        });

        let form = InvoiceForm {
            project_id: 1,
            number: "INV-7".into(),
            amount: "250".into(),
            currency: None,
            issued_at: None,
            due_date: None,
            notes: None,
        };
        match add_invoice(&repo, &session(ADMIN_ID), form) {
            Err(ServiceError::Form(message)) => {
                assert_eq!(message, "Invoice number INV-7 is already in use")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn missing_invoice_is_not_found() {
        let mut repo = repo_with_users();
        repo.expect_get_invoice_by_id().returning(|_| Ok(None));
        assert!(matches!(
            load_invoice(&repo, &session(ADMIN_ID), 5),
            Err(ServiceError::NotFound)
        ));
        assert!(matches!(
            load_invoice(&repo, &session(ADMIN_ID), 0),
            Err(ServiceError::NotFound)
        ));
    }
}
