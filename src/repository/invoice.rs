//! Repository implementation for invoices and payments.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::invoice::{Invoice, NewInvoice, NewPayment, Payment};
use crate::domain::project::Project;
use crate::domain::status::{InvoiceStatus, PaymentStatus};
use crate::domain::types::{InvoiceId, PaymentId};
use crate::models::invoice::{
    Invoice as DbInvoice, NewInvoice as DbNewInvoice, NewPayment as DbNewPayment,
    Payment as DbPayment,
};
use crate::models::project::Project as DbProject;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, DocumentListQuery, InvoiceReader, InvoiceWriter, PaymentReader,
    PaymentWriter,
};

impl InvoiceReader for DieselRepository {
    fn get_invoice_by_id(&self, id: InvoiceId) -> RepositoryResult<Option<Invoice>> {
        use crate::schema::invoices;

        let mut conn = self.conn()?;
        let db_invoice = invoices::table
            .find(id.get())
            .first::<DbInvoice>(&mut conn)
            .optional()?;

        Ok(db_invoice.map(Invoice::try_from).transpose()?)
    }

    fn list_invoices(
        &self,
        query: DocumentListQuery<InvoiceStatus>,
    ) -> RepositoryResult<(usize, Vec<(Invoice, Project)>)> {
        use crate::schema::{invoices, projects};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = invoices::table
                .inner_join(projects::table)
                .into_boxed::<Sqlite>();

            if let Some(status) = query.status {
                items = items.filter(invoices::status.eq(status.as_str()));
            }
            if let Some(project_id) = query.project_id {
                items = items.filter(invoices::project_id.eq(project_id.get()));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order((invoices::issued_at.desc(), invoices::id.desc()));
        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.offset() as i64)
                .limit(pagination.per_page as i64);
        }

        let rows = items
            .load::<(DbInvoice, DbProject)>(&mut conn)?
            .into_iter()
            .map(|(invoice, project)| Ok((Invoice::try_from(invoice)?, Project::try_from(project)?)))
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        Ok((total, rows))
    }

    fn list_invoice_payments(&self, invoice_id: InvoiceId) -> RepositoryResult<Vec<Payment>> {
        use crate::schema::payments;

        let mut conn = self.conn()?;
        let db_payments = payments::table
            .filter(payments::invoice_id.eq(invoice_id.get()))
            .order((payments::created_at.desc(), payments::id.desc()))
            .load::<DbPayment>(&mut conn)?;

        db_payments
            .into_iter()
            .map(|payment| Payment::try_from(payment).map_err(RepositoryError::from))
            .collect()
    }
}

impl InvoiceWriter for DieselRepository {
    fn create_invoice(&self, new_invoice: &NewInvoice) -> RepositoryResult<Invoice> {
        use crate::schema::invoices;

        let mut conn = self.conn()?;
        let db_invoice = diesel::insert_into(invoices::table)
            .values(&DbNewInvoice::from(new_invoice))
            .get_result::<DbInvoice>(&mut conn)?;

        Ok(Invoice::try_from(db_invoice)?)
    }

    fn set_invoice_status(&self, id: InvoiceId, status: InvoiceStatus) -> RepositoryResult<Invoice> {
        use crate::schema::invoices;

        let mut conn = self.conn()?;
        let db_invoice = diesel::update(invoices::table.find(id.get()))
            .set((
                invoices::status.eq(status.as_str()),
                invoices::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbInvoice>(&mut conn)?;

        Ok(Invoice::try_from(db_invoice)?)
    }
}

impl PaymentReader for DieselRepository {
    fn list_payments(
        &self,
        query: DocumentListQuery<PaymentStatus>,
    ) -> RepositoryResult<(usize, Vec<(Payment, Invoice)>)> {
        use crate::schema::{invoices, payments};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = payments::table
                .inner_join(invoices::table)
                .into_boxed::<Sqlite>();

            if let Some(status) = query.status {
                items = items.filter(payments::status.eq(status.as_str()));
            }
            if let Some(project_id) = query.project_id {
                items = items.filter(invoices::project_id.eq(project_id.get()));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order((payments::created_at.desc(), payments::id.desc()));
        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.offset() as i64)
                .limit(pagination.per_page as i64);
        }

        let rows = items
            .load::<(DbPayment, DbInvoice)>(&mut conn)?
            .into_iter()
            .map(|(payment, invoice)| Ok((Payment::try_from(payment)?, Invoice::try_from(invoice)?)))
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        Ok((total, rows))
    }
}

impl PaymentWriter for DieselRepository {
    fn create_payment(&self, new_payment: &NewPayment) -> RepositoryResult<Payment> {
        use crate::schema::payments;

        let mut conn = self.conn()?;
        let db_payment = diesel::insert_into(payments::table)
            .values(&DbNewPayment::from(new_payment))
            .get_result::<DbPayment>(&mut conn)?;

        Ok(Payment::try_from(db_payment)?)
    }

    fn set_payment_status(&self, id: PaymentId, status: PaymentStatus) -> RepositoryResult<Payment> {
        use crate::schema::payments;

        let mut conn = self.conn()?;
        let paid_at = (status == PaymentStatus::Completed).then(|| Utc::now().naive_utc());

        let db_payment = conn.transaction::<_, RepositoryError, _>(|conn| {
            let current = payments::table
                .find(id.get())
                .first::<DbPayment>(conn)?;

            let db_payment = diesel::update(payments::table.find(id.get()))
                .set((
                    payments::status.eq(status.as_str()),
                    payments::paid_at.eq(current.paid_at.or(paid_at)),
                ))
                .get_result::<DbPayment>(conn)?;
            Ok(db_payment)
        })?;

        Ok(Payment::try_from(db_payment)?)
    }
}
