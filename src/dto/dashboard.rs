//! DTOs for the dashboard overview page.

use serde::Serialize;

use crate::domain::dashboard::DashboardStats;
use crate::domain::project::ProjectOverview;
use crate::domain::status::{Badge, ProjectStatus, StatusBadge};
use crate::dto::Badged;
use crate::dto::documents::PaymentRow;

/// Number of projects in one status, with its badge.
#[derive(Debug, Serialize)]
pub struct StatusCount {
    pub value: &'static str,
    pub badge: Badge,
    pub count: usize,
}

impl StatusCount {
    pub fn from_breakdown(breakdown: &[(ProjectStatus, usize)]) -> Vec<Self> {
        breakdown
            .iter()
            .map(|(status, count)| Self {
                value: status.as_str(),
                badge: status.badge(),
                count: *count,
            })
            .collect()
    }
}

/// Data required to render the dashboard overview template.
#[derive(Debug, Serialize)]
pub struct DashboardPageData {
    pub stats: DashboardStats,
    pub total_projects: usize,
    pub projects_by_status: Vec<StatusCount>,
    pub recent_projects: Vec<Badged<ProjectOverview>>,
    pub recent_payments: Vec<Badged<PaymentRow>>,
}
