use crate::domain::auth::AuthenticatedUser;
use crate::domain::document::{Estimation, NewEstimation};
use crate::domain::status::EstimationStatus;
use crate::domain::types::EstimationId;
use crate::dto::documents::{DocumentsPageData, EstimationRow};
use crate::dto::{Badged, ListQuery, StatusFilter};
use crate::forms::StatusForm;
use crate::forms::documents::EstimationForm;
use crate::pagination::{Paginated, Pagination};
use crate::repository::{
    DocumentListQuery, EstimationReader, EstimationWriter, ProjectReader, UserReader,
};
use crate::services::projects::{get_project, project_options};
use crate::services::{ServiceError, ServiceResult, ensure_admin};

pub fn load_estimations<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: &ListQuery,
) -> ServiceResult<DocumentsPageData<EstimationRow>>
where
    R: UserReader + ProjectReader + EstimationReader + ?Sized,
{
    ensure_admin(repo, user)?;

    let pagination = Pagination::new(query.page(), query.per_page());
    let status = query.status_filter::<EstimationStatus>();

    let mut list_query = DocumentListQuery::default().paginate(pagination.page, pagination.per_page);
    if let Some(status) = status {
        list_query = list_query.status(status);
    }

    let (total, rows) = repo.list_estimations(list_query).map_err(|err| {
        log::error!("Failed to list estimations: {err}");
        err
    })?;
    let items = rows
        .into_iter()
        .map(|(estimation, project)| {
            let status = estimation.status;
            Badged::new(EstimationRow { estimation, project }, &status)
        })
        .collect();

    Ok(DocumentsPageData {
        items: Paginated::new(items, pagination, total),
        filter: StatusFilter::new(EstimationStatus::ALL, status),
        projects: project_options(repo)?,
    })
}

pub fn add_estimation<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: EstimationForm,
) -> ServiceResult<Estimation>
where
    R: UserReader + ProjectReader + EstimationWriter + ?Sized,
{
    ensure_admin(repo, user)?;

    let new_estimation = NewEstimation::try_from(form)?;
    get_project(repo, new_estimation.project_id.get())
        .map_err(|_| ServiceError::Form("Select an existing project".to_string()))?;

    let estimation = repo.create_estimation(&new_estimation)?;
    log::info!(
        "Estimation {} added to project {}",
        estimation.id,
        estimation.project_id
    );
    Ok(estimation)
}

pub fn set_estimation_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    estimation_id: i32,
    form: &StatusForm,
) -> ServiceResult<Estimation>
where
    R: UserReader + EstimationWriter + ?Sized,
{
    ensure_admin(repo, user)?;

    let estimation_id = EstimationId::new(estimation_id).map_err(|_| ServiceError::NotFound)?;
    let status: EstimationStatus = form.parse()?;
    Ok(repo.set_estimation_status(estimation_id, status)?)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::money::Money;
    use crate::domain::types::{CurrencyCode, DocumentTitle, ProjectId};
    use crate::services::test_support::{ADMIN_ID, project, repo_with_users, session};

    #[test]
    fn adds_estimation_to_existing_project() {
        let mut repo = repo_with_users();
        repo.expect_get_project_by_id()
            .returning(|id| Ok(Some(project(id.get()))));
        repo.expect_create_estimation()
            .withf(|new| new.estimated_hours == Some(40) && new.amount_cents == 3_200_00)
            .times(1)
            .returning(|new| {
                let now = Utc::now().naive_utc();
                Ok(Estimation {
                    id: EstimationId::new(1).unwrap(),
                    project_id: new.project_id,
                    title: DocumentTitle::new("Backend").unwrap(),
                    description: None,
                    amount: Money::new(new.amount_cents, CurrencyCode::default()),
                    estimated_hours: new.estimated_hours,
                    status: EstimationStatus::Draft,
                    created_at: now,
                    updated_at: now,
                })
            });

        let form = EstimationForm {
            project_id: 2,
            title: "Backend".into(),
            description: None,
            amount: "3200".into(),
            currency: None,
            estimated_hours: Some("40".into()),
        };
        let estimation = add_estimation(&repo, &session(ADMIN_ID), form).unwrap();
        assert_eq!(estimation.project_id, ProjectId::new(2).unwrap());
        assert_eq!(estimation.status, EstimationStatus::Draft);
    }

    #[test]
    fn status_change_parses_value() {
        let mut repo = repo_with_users();
        repo.expect_set_estimation_status()
            .withf(|id, status| id.get() == 3 && *status == EstimationStatus::Approved)
            .times(1)
            .returning(|_, _| Err(crate::repository::errors::RepositoryError::NotFound));

        let form = StatusForm {
            status: "APPROVED".into(),
        };
        assert!(matches!(
            set_estimation_status(&repo, &session(ADMIN_ID), 3, &form),
            Err(ServiceError::NotFound)
        ));
    }
}
