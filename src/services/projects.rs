use crate::domain::auth::AuthenticatedUser;
use crate::domain::project::Project;
use crate::domain::status::{ProjectStatus, UserRole, status_options};
use crate::domain::types::{ProjectId, UserId};
use crate::dto::projects::{ProjectPageData, ProjectsPageData};
use crate::dto::{Badged, ListQuery, StatusFilter};
use crate::forms::StatusForm;
use crate::forms::projects::{ProjectForm, ProjectPayload};
use crate::pagination::{Paginated, Pagination};
use crate::repository::{
    ClientListQuery, DocumentListQuery, EstimationReader, InvoiceReader, ProjectListQuery,
    ProjectReader, ProjectWriter, ProposalReader, TaskListQuery, TaskReader, UserReader,
};
use crate::services::{ServiceError, ServiceResult, ensure_admin};

pub(crate) fn get_project<R>(repo: &R, project_id: i32) -> ServiceResult<Project>
where
    R: ProjectReader + ?Sized,
{
    let project_id = ProjectId::new(project_id).map_err(|_| ServiceError::NotFound)?;
    repo.get_project_by_id(project_id)?
        .ok_or(ServiceError::NotFound)
}

/// Projects offered in the "new document" and "new task" forms.
pub(crate) fn project_options<R>(repo: &R) -> ServiceResult<Vec<Project>>
where
    R: ProjectReader + ?Sized,
{
    let (_, projects) = repo.list_projects(ProjectListQuery::default())?;
    Ok(projects.into_iter().map(|overview| overview.project).collect())
}

/// Lists projects with status, search and client filters.
pub fn load_projects<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: &ListQuery,
    client_id: Option<i32>,
) -> ServiceResult<ProjectsPageData>
where
    R: UserReader + ProjectReader + ?Sized,
{
    ensure_admin(repo, user)?;

    let pagination = Pagination::new(query.page(), query.per_page());
    let status = query.status_filter::<ProjectStatus>();
    let search_query = query.search_term();
    let client_id = client_id.and_then(|id| UserId::new(id).ok());

    let mut list_query = ProjectListQuery::default().paginate(pagination.page, pagination.per_page);
    if let Some(status) = status {
        list_query = list_query.status(status);
    }
    if let Some(term) = &search_query {
        list_query = list_query.search(term.clone());
    }
    if let Some(client_id) = client_id {
        list_query = list_query.client(client_id);
    }

    let (total, projects) = repo.list_projects(list_query).map_err(|err| {
        log::error!("Failed to list projects: {err}");
        err
    })?;
    let projects = projects
        .into_iter()
        .map(|overview| {
            let status = overview.project.status;
            Badged::new(overview, &status)
        })
        .collect();

    let (_, clients) = repo.list_clients(ClientListQuery::default().active(true))?;

    Ok(ProjectsPageData {
        projects: Paginated::new(projects, pagination, total),
        filter: StatusFilter::new(ProjectStatus::ALL, status),
        search_query,
        client_id,
        clients,
    })
}

/// Project details with every document and task attached to it.
pub fn load_project<R>(
    repo: &R,
    user: &AuthenticatedUser,
    project_id: i32,
) -> ServiceResult<ProjectPageData>
where
    R: UserReader
        + ProjectReader
        + ProposalReader
        + EstimationReader
        + InvoiceReader
        + TaskReader
        + ?Sized,
{
    ensure_admin(repo, user)?;
    let project = get_project(repo, project_id)?;

    let client = repo.get_user_by_id(project.client_id)?.ok_or_else(|| {
        log::error!("Project {} references missing client {}", project.id, project.client_id);
        ServiceError::NotFound
    })?;

    let (_, proposals) = repo.list_proposals(DocumentListQuery::default().project(project.id))?;
    let (_, estimations) =
        repo.list_estimations(DocumentListQuery::default().project(project.id))?;
    let (_, invoices) = repo.list_invoices(DocumentListQuery::default().project(project.id))?;
    let (_, tasks) = repo.list_tasks(TaskListQuery::default().project(project.id))?;

    let status = project.status;
    Ok(ProjectPageData {
        project: Badged::new(project, &status),
        client,
        proposals: proposals
            .into_iter()
            .map(|(proposal, _)| {
                let status = proposal.status;
                Badged::new(proposal, &status)
            })
            .collect(),
        estimations: estimations
            .into_iter()
            .map(|(estimation, _)| {
                let status = estimation.status;
                Badged::new(estimation, &status)
            })
            .collect(),
        invoices: invoices
            .into_iter()
            .map(|(invoice, _)| {
                let status = invoice.status;
                Badged::new(invoice, &status)
            })
            .collect(),
        tasks: tasks
            .into_iter()
            .map(|(task, _)| {
                let status = task.status;
                Badged::new(task, &status)
            })
            .collect(),
        status_options: status_options(ProjectStatus::ALL),
    })
}

pub fn add_project<R>(repo: &R, user: &AuthenticatedUser, form: ProjectForm) -> ServiceResult<Project>
where
    R: UserReader + ProjectWriter + ?Sized,
{
    ensure_admin(repo, user)?;

    let new_project = ProjectPayload::try_from(form)?.into_new_project()?;
    match repo.get_user_by_id(new_project.client_id)? {
        Some(client) if client.role == UserRole::Client => {}
        _ => return Err(ServiceError::Form("Select an existing client".to_string())),
    }

    let project = repo.create_project(&new_project).map_err(|err| {
        log::error!("Failed to create project: {err}");
        err
    })?;
    log::info!("Project {} created by {}", project.id, user.sub);
    Ok(project)
}

pub fn save_project<R>(
    repo: &R,
    user: &AuthenticatedUser,
    project_id: i32,
    form: ProjectForm,
) -> ServiceResult<Project>
where
    R: UserReader + ProjectReader + ProjectWriter + ?Sized,
{
    ensure_admin(repo, user)?;
    let project = get_project(repo, project_id)?;

    let updates = ProjectPayload::try_from(form)?.into_update();
    Ok(repo.update_project(project.id, &updates)?)
}

pub fn set_project_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    project_id: i32,
    form: &StatusForm,
) -> ServiceResult<Project>
where
    R: UserReader + ProjectReader + ProjectWriter + ?Sized,
{
    ensure_admin(repo, user)?;
    let project = get_project(repo, project_id)?;

    let status: ProjectStatus = form.parse()?;
    let project = repo.set_project_status(project.id, status)?;
    log::info!("Project {} moved to {status}", project.id);
    Ok(project)
}
