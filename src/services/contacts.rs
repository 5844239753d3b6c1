//! Messages from the public contact form.

use crate::domain::auth::AuthenticatedUser;
use crate::domain::contact::{Contact, NewContact};
use crate::domain::status::{ContactStatus, status_options};
use crate::domain::types::ContactId;
use crate::dto::contacts::{ContactPageData, ContactsPageData};
use crate::dto::{Badged, ListQuery, StatusFilter};
use crate::forms::StatusForm;
use crate::forms::contacts::ContactRequest;
use crate::pagination::{Paginated, Pagination};
use crate::repository::{ContactListQuery, ContactReader, ContactWriter, UserReader};
use crate::services::{ServiceError, ServiceResult, ensure_admin};

fn contact_id(id: i32) -> ServiceResult<ContactId> {
    ContactId::new(id).map_err(|_| ServiceError::NotFound)
}

pub fn load_contacts<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: &ListQuery,
) -> ServiceResult<ContactsPageData>
where
    R: UserReader + ContactReader + ?Sized,
{
    ensure_admin(repo, user)?;

    let pagination = Pagination::new(query.page(), query.per_page());
    let status = query.status_filter::<ContactStatus>();

    let mut list_query = ContactListQuery::default().paginate(pagination.page, pagination.per_page);
    if let Some(status) = status {
        list_query = list_query.status(status);
    }

    let (total, contacts) = repo.list_contacts(list_query).map_err(|err| {
        log::error!("Failed to list contacts: {err}");
        err
    })?;
    let contacts = contacts
        .into_iter()
        .map(|contact| {
            let status = contact.status;
            Badged::new(contact, &status)
        })
        .collect();

    Ok(ContactsPageData {
        contacts: Paginated::new(contacts, pagination, total),
        filter: StatusFilter::new(ContactStatus::ALL, status),
    })
}

/// Shows a message; opening a `NEW` message marks it `READ`.
pub fn load_contact<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
) -> ServiceResult<ContactPageData>
where
    R: UserReader + ContactReader + ContactWriter + ?Sized,
{
    ensure_admin(repo, user)?;

    let mut contact = repo
        .get_contact_by_id(contact_id(id)?)?
        .ok_or(ServiceError::NotFound)?;
    if contact.status == ContactStatus::New {
        contact = repo.set_contact_status(contact.id, ContactStatus::Read)?;
    }

    let status = contact.status;
    Ok(ContactPageData {
        contact: Badged::new(contact, &status),
        status_options: status_options(ContactStatus::ALL),
    })
}

pub fn set_contact_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: &StatusForm,
) -> ServiceResult<Contact>
where
    R: UserReader + ContactWriter + ?Sized,
{
    ensure_admin(repo, user)?;

    let status: ContactStatus = form.parse()?;
    Ok(repo.set_contact_status(contact_id(id)?, status)?)
}

/// Stores a public contact-form submission. No session is required.
pub fn submit_contact<R>(repo: &R, request: ContactRequest) -> ServiceResult<Contact>
where
    R: ContactWriter + ?Sized,
{
    let new_contact = NewContact::try_from(request)?;
    let contact = repo.create_contact(&new_contact).map_err(|err| {
        log::error!("Failed to store contact message: {err}");
        err
    })?;
    log::info!("Contact message {} received from {}", contact.id, contact.email);
    Ok(contact)
}
