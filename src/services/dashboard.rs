use crate::domain::auth::AuthenticatedUser;
use crate::domain::status::StatusBadge;
use crate::dto::Badged;
use crate::dto::dashboard::{DashboardPageData, StatusCount};
use crate::dto::documents::PaymentRow;
use crate::repository::{
    DocumentListQuery, PaymentReader, ProjectListQuery, ProjectReader, StatsReader, UserReader,
};
use crate::services::{ServiceResult, ensure_admin};

/// Number of recent projects and payments shown on the overview.
pub const RECENT_ITEMS: usize = 5;

/// Collects the summary statistics and recent activity for `/admin`.
pub fn load_dashboard<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<DashboardPageData>
where
    R: UserReader + StatsReader + ProjectReader + PaymentReader + ?Sized,
{
    ensure_admin(repo, user)?;

    let stats = repo.dashboard_stats().map_err(|err| {
        log::error!("Failed to collect dashboard stats: {err}");
        err
    })?;

    let (_, projects) = repo.list_projects(ProjectListQuery::default().paginate(1, RECENT_ITEMS))?;
    let recent_projects = projects
        .into_iter()
        .map(|overview| {
            let status = overview.project.status;
            Badged::new(overview, &status)
        })
        .collect();

    let (_, payments) =
        repo.list_payments(DocumentListQuery::default().paginate(1, RECENT_ITEMS))?;
    let recent_payments = payments
        .into_iter()
        .map(|(payment, invoice)| {
            let badge = payment.status.badge();
            Badged {
                item: PaymentRow { payment, invoice },
                badge,
            }
        })
        .collect();

    Ok(DashboardPageData {
        total_projects: stats.total_projects(),
        projects_by_status: StatusCount::from_breakdown(&stats.projects_by_status),
        stats,
        recent_projects,
        recent_payments,
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::dashboard::DashboardStats;
    use crate::domain::status::ProjectStatus;
    use crate::services::ServiceError;
    use crate::services::test_support::{ADMIN_ID, CLIENT_ID, repo_with_users, session};

    #[test]
    fn clients_cannot_see_dashboard() {
        let mut repo = repo_with_users();
        repo.expect_dashboard_stats().times(0);

        assert!(matches!(
            load_dashboard(&repo, &session(CLIENT_ID)),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn loads_stats_and_recent_items() {
        let mut repo = repo_with_users();
        repo.expect_dashboard_stats().times(1).returning(|| {
            Ok(DashboardStats {
                active_clients: 4,
                projects_by_status: vec![(ProjectStatus::Pending, 2), (ProjectStatus::Completed, 3)],
                ..Default::default()
            })
        });
        repo.expect_list_projects()
            .withf(|query| query.pagination.map(|p| p.per_page) == Some(RECENT_ITEMS))
            .returning(|_| Ok((0, Vec::new())));
        repo.expect_list_payments()
            .withf(|query| query.pagination.map(|p| p.per_page) == Some(RECENT_ITEMS))
            .returning(|_| Ok((0, Vec::new())));

        let data = load_dashboard(&repo, &session(ADMIN_ID)).unwrap();
        assert_eq!(data.total_projects, 5);
        assert_eq!(data.stats.active_clients, 4);
        assert_eq!(data.projects_by_status[1].badge.label, "Completed");
    }
}
