use serde::Serialize;

use crate::domain::money::Money;
use crate::domain::status::ProjectStatus;

/// Summary statistics shown on the dashboard overview.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct DashboardStats {
    pub active_clients: usize,
    pub projects_by_status: Vec<(ProjectStatus, usize)>,
    pub pending_proposals: usize,
    pub unpaid_invoices: usize,
    /// Amounts of unpaid invoices, one entry per currency.
    pub outstanding: Vec<Money>,
    /// Completed payments, one entry per currency.
    pub revenue: Vec<Money>,
    pub new_contacts: usize,
    pub open_tasks: usize,
}

impl DashboardStats {
    pub fn total_projects(&self) -> usize {
        self.projects_by_status.iter().map(|(_, count)| count).sum()
    }
}
