//! Client management: list, details, create, edit, soft delete and CSV import.

use crate::domain::auth::AuthenticatedUser;
use crate::domain::status::UserRole;
use crate::domain::types::UserId;
use crate::domain::user::User;
use crate::dto::clients::{ClientPageData, ClientsPageData};
use crate::dto::{Badged, ListQuery};
use crate::forms::clients::{ClientForm, ClientPayload, UploadClientsForm};
use crate::pagination::{Paginated, Pagination};
use crate::repository::errors::RepositoryError;
use crate::repository::{ClientListQuery, ProjectListQuery, ProjectReader, UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult, ensure_admin};

const DUPLICATE_EMAIL: &str = "A user with this email already exists";

fn duplicate_email(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::ConstraintViolation(_) => ServiceError::Form(DUPLICATE_EMAIL.to_string()),
        other => other.into(),
    }
}

/// Loads a client account; admins and unknown ids are `NotFound`.
fn get_client<R>(repo: &R, client_id: i32) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    let client_id = UserId::new(client_id).map_err(|_| ServiceError::NotFound)?;
    match repo.get_user_by_id(client_id)? {
        Some(client) if client.role == UserRole::Client => Ok(client),
        _ => Err(ServiceError::NotFound),
    }
}

pub fn load_clients<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: &ListQuery,
) -> ServiceResult<ClientsPageData>
where
    R: UserReader + ?Sized,
{
    ensure_admin(repo, user)?;

    let pagination = Pagination::new(query.page(), query.per_page());
    let search_query = query.search_term();
    let active = query.active_filter();

    let mut list_query = ClientListQuery::default().paginate(pagination.page, pagination.per_page);
    if let Some(term) = &search_query {
        list_query = list_query.search(term.clone());
    }
    if let Some(active) = active {
        list_query = list_query.active(active);
    }

    let (total, clients) = repo.list_clients(list_query).map_err(|err| {
        log::error!("Failed to list clients: {err}");
        err
    })?;

    Ok(ClientsPageData {
        clients: Paginated::new(clients, pagination, total),
        search_query,
        active,
    })
}

pub fn load_client<R>(
    repo: &R,
    user: &AuthenticatedUser,
    client_id: i32,
) -> ServiceResult<ClientPageData>
where
    R: UserReader + ProjectReader + ?Sized,
{
    ensure_admin(repo, user)?;
    let client = get_client(repo, client_id)?;

    let (_, projects) = repo.list_projects(ProjectListQuery::default().client(client.id))?;
    let invoice_count = projects.iter().map(|p| p.invoice_count).sum();
    let projects = projects
        .into_iter()
        .map(|overview| {
            let status = overview.project.status;
            Badged::new(overview, &status)
        })
        .collect();

    Ok(ClientPageData {
        client,
        projects,
        invoice_count,
    })
}

pub fn add_client<R>(repo: &R, user: &AuthenticatedUser, form: ClientForm) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    ensure_admin(repo, user)?;

    let payload = ClientPayload::try_from(form)?;
    let client = repo
        .create_user(&payload.into_new_user())
        .map_err(duplicate_email)?;

    log::info!("Client {} created by {}", client.id, user.sub);
    Ok(client)
}

pub fn save_client<R>(
    repo: &R,
    user: &AuthenticatedUser,
    client_id: i32,
    form: ClientForm,
) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    ensure_admin(repo, user)?;
    let client = get_client(repo, client_id)?;

    let payload = ClientPayload::try_from(form)?;
    repo.update_user(client.id, &payload.into_update())
        .map_err(duplicate_email)
}

/// Deactivates (`active == false`) or reactivates a client.
pub fn set_client_active<R>(
    repo: &R,
    user: &AuthenticatedUser,
    client_id: i32,
    active: bool,
) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    ensure_admin(repo, user)?;
    let client = get_client(repo, client_id)?;

    let client = repo.set_user_active(client.id, active)?;
    log::info!(
        "Client {} {} by {}",
        client.id,
        if active { "reactivated" } else { "deactivated" },
        user.sub
    );
    Ok(client)
}

/// Imports clients from an uploaded CSV; returns the number of new rows.
///
/// Emails that already exist are skipped.
pub fn upload_clients<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &mut UploadClientsForm,
) -> ServiceResult<usize>
where
    R: UserReader + UserWriter + ?Sized,
{
    ensure_admin(repo, user)?;

    let new_clients = form.parse()?;
    let inserted = repo.create_users(&new_clients).map_err(|err| {
        log::error!("Failed to import clients: {err}");
        err
    })?;

    log::info!(
        "Imported {inserted} of {} clients from CSV",
        new_clients.len()
    );
    Ok(inserted)
}
