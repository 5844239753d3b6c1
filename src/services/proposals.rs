use crate::domain::auth::AuthenticatedUser;
use crate::domain::document::{NewProposal, Proposal};
use crate::domain::status::ProposalStatus;
use crate::domain::types::ProposalId;
use crate::dto::documents::{DocumentsPageData, ProposalRow};
use crate::dto::{Badged, ListQuery, StatusFilter};
use crate::forms::StatusForm;
use crate::forms::documents::ProposalForm;
use crate::pagination::{Paginated, Pagination};
use crate::repository::{DocumentListQuery, ProjectReader, ProposalReader, ProposalWriter, UserReader};
use crate::services::projects::{get_project, project_options};
use crate::services::{ServiceError, ServiceResult, ensure_admin};

pub fn load_proposals<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: &ListQuery,
) -> ServiceResult<DocumentsPageData<ProposalRow>>
where
    R: UserReader + ProjectReader + ProposalReader + ?Sized,
{
    ensure_admin(repo, user)?;

    let pagination = Pagination::new(query.page(), query.per_page());
    let status = query.status_filter::<ProposalStatus>();

    let mut list_query = DocumentListQuery::default().paginate(pagination.page, pagination.per_page);
    if let Some(status) = status {
        list_query = list_query.status(status);
    }

    let (total, rows) = repo.list_proposals(list_query).map_err(|err| {
        log::error!("Failed to list proposals: {err}");
        err
    })?;
    let items = rows
        .into_iter()
        .map(|(proposal, project)| {
            let status = proposal.status;
            Badged::new(ProposalRow { proposal, project }, &status)
        })
        .collect();

    Ok(DocumentsPageData {
        items: Paginated::new(items, pagination, total),
        filter: StatusFilter::new(ProposalStatus::ALL, status),
        projects: project_options(repo)?,
    })
}

pub fn add_proposal<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ProposalForm,
) -> ServiceResult<Proposal>
where
    R: UserReader + ProjectReader + ProposalWriter + ?Sized,
{
    ensure_admin(repo, user)?;

    let new_proposal = NewProposal::try_from(form)?;
    get_project(repo, new_proposal.project_id.get())
        .map_err(|_| ServiceError::Form("Select an existing project".to_string()))?;

    let proposal = repo.create_proposal(&new_proposal)?;
    log::info!("Proposal {} added to project {}", proposal.id, proposal.project_id);
    Ok(proposal)
}

pub fn set_proposal_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    proposal_id: i32,
    form: &StatusForm,
) -> ServiceResult<Proposal>
where
    R: UserReader + ProposalWriter + ?Sized,
{
    ensure_admin(repo, user)?;

    let proposal_id = ProposalId::new(proposal_id).map_err(|_| ServiceError::NotFound)?;
    let status: ProposalStatus = form.parse()?;
    Ok(repo.set_proposal_status(proposal_id, status)?)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::services::test_support::{ADMIN_ID, CLIENT_ID, repo_with_users, session};

    fn form(project_id: i32) -> ProposalForm {
        ProposalForm {
            project_id,
            title: "Discovery phase".into(),
            content: None,
            amount: "4500".into(),
            currency: Some("eur".into()),
            valid_until: None,
        }
    }

    #[test]
    fn list_filters_by_status() {
        let mut repo = repo_with_users();
        repo.expect_list_proposals()
            .withf(|query| query.status == Some(ProposalStatus::Sent))
            .times(1)
            .returning(|_| Ok((0, Vec::new())));
        repo.expect_list_projects().returning(|_| Ok((0, Vec::new())));

        let query = ListQuery {
            status: Some("SENT".into()),
            ..Default::default()
        };
        let data = load_proposals(&repo, &session(ADMIN_ID), &query).unwrap();
        assert_eq!(data.filter.selected, Some("SENT"));
        assert_eq!(data.items.total, 0);
    }

    #[test]
    fn proposal_needs_existing_project() {
        let mut repo = repo_with_users();
        repo.expect_get_project_by_id().returning(|_| Ok(None));
        repo.expect_create_proposal().times(0);

        assert!(matches!(
            add_proposal(&repo, &session(ADMIN_ID), form(9)),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn clients_cannot_change_status() {
        let mut repo = repo_with_users();
        repo.expect_set_proposal_status().times(0);

        let form = StatusForm {
            status: "ACCEPTED".into(),
        };
        assert!(matches!(
            set_proposal_status(&repo, &session(CLIENT_ID), 1, &form),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn missing_proposal_is_not_found() {
        let mut repo = repo_with_users();
        repo.expect_set_proposal_status()
            .returning(|_, _| Err(RepositoryError::NotFound));

        let form = StatusForm {
            status: "ACCEPTED".into(),
        };
        assert!(matches!(
            set_proposal_status(&repo, &session(ADMIN_ID), 77, &form),
            Err(ServiceError::NotFound)
        ));
    }
}
