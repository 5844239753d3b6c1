use std::collections::{BTreeMap, HashMap};

use diesel::prelude::*;

use crate::domain::dashboard::DashboardStats;
use crate::domain::money::Money;
use crate::domain::status::{
    ContactStatus, InvoiceStatus, PaymentStatus, ProjectStatus, ProposalStatus, TaskStatus,
    UserRole,
};
use crate::domain::types::CurrencyCode;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, StatsReader};

/// Adds up `(cents, currency)` rows into one [`Money`] per currency, ordered by code.
fn totals_by_currency(rows: Vec<(i64, String)>) -> RepositoryResult<Vec<Money>> {
    let mut totals: BTreeMap<String, i64> = BTreeMap::new();
    for (cents, currency) in rows {
        *totals.entry(currency).or_default() += cents;
    }

    totals
        .into_iter()
        .map(|(currency, cents)| Ok(Money::new(cents, CurrencyCode::new(currency)?)))
        .collect()
}

/// Subtracts completed payments from each unpaid invoice, never going below zero.
fn outstanding_rows(
    invoices: Vec<(i32, i64, String)>,
    paid: Vec<(i32, i64)>,
) -> Vec<(i64, String)> {
    let mut paid_by_invoice: HashMap<i32, i64> = HashMap::new();
    for (invoice_id, cents) in paid {
        *paid_by_invoice.entry(invoice_id).or_default() += cents;
    }

    invoices
        .into_iter()
        .map(|(id, amount, currency)| {
            let paid = paid_by_invoice.get(&id).copied().unwrap_or(0);
            ((amount - paid).max(0), currency)
        })
        .collect()
}

impl StatsReader for DieselRepository {
    fn dashboard_stats(&self) -> RepositoryResult<DashboardStats> {
        use crate::schema::{contacts, invoices, payments, projects, proposals, tasks, users};

        let mut conn = self.conn()?;

        let active_clients = users::table
            .filter(users::role.eq(UserRole::Client.as_str()))
            .filter(users::is_active.eq(true))
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let status_counts: HashMap<String, i64> = projects::table
            .group_by(projects::status)
            .select((projects::status, diesel::dsl::count(projects::id)))
            .load::<(String, i64)>(&mut conn)?
            .into_iter()
            .collect();
        let projects_by_status = ProjectStatus::ALL
            .iter()
            .map(|status| {
                let count = status_counts.get(status.as_str()).copied().unwrap_or(0);
                (*status, count as usize)
            })
            .collect();

        let pending_proposals = proposals::table
            .filter(proposals::status.eq(ProposalStatus::Sent.as_str()))
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let unpaid_statuses = InvoiceStatus::UNPAID
            .iter()
            .map(|status| status.as_str())
            .collect::<Vec<_>>();
        let unpaid_rows = invoices::table
            .filter(invoices::status.eq_any(unpaid_statuses))
            .select((invoices::id, invoices::amount_cents, invoices::currency))
            .load::<(i32, i64, String)>(&mut conn)?;
        let unpaid_invoices = unpaid_rows.len();

        let unpaid_ids = unpaid_rows.iter().map(|(id, _, _)| *id).collect::<Vec<_>>();
        let paid_rows = payments::table
            .filter(payments::invoice_id.eq_any(unpaid_ids))
            .filter(payments::status.eq(PaymentStatus::Completed.as_str()))
            .select((payments::invoice_id, payments::amount_cents))
            .load::<(i32, i64)>(&mut conn)?;

        let revenue_rows = payments::table
            .filter(payments::status.eq(PaymentStatus::Completed.as_str()))
            .select((payments::amount_cents, payments::currency))
            .load::<(i64, String)>(&mut conn)?;

        let new_contacts = contacts::table
            .filter(contacts::status.eq(ContactStatus::New.as_str()))
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let open_tasks = tasks::table
            .filter(tasks::status.ne(TaskStatus::Done.as_str()))
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        Ok(DashboardStats {
            active_clients,
            projects_by_status,
            pending_proposals,
            unpaid_invoices,
            outstanding: totals_by_currency(outstanding_rows(unpaid_rows, paid_rows))?,
            revenue: totals_by_currency(revenue_rows)?,
            new_contacts,
            open_tasks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_are_grouped_per_currency() {
        let totals = totals_by_currency(vec![
            (1_000, "USD".into()),
            (250, "EUR".into()),
            (500, "USD".into()),
        ])
        .unwrap();

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].cents, 250);
        assert_eq!(totals[0].currency.as_str(), "EUR");
        assert_eq!(totals[1].cents, 1_500);
    }

    #[test]
    fn outstanding_subtracts_payments_per_invoice() {
        let rows = outstanding_rows(
            vec![(1, 10_000, "USD".into()), (2, 5_000, "USD".into())],
            vec![(1, 3_000), (2, 6_000), (1, 2_000)],
        );

        assert_eq!(rows, vec![(5_000, "USD".to_string()), (0, "USD".to_string())]);
    }

    #[test]
    fn no_rows_no_totals() {
        assert!(totals_by_currency(Vec::new()).unwrap().is_empty());
    }
}
