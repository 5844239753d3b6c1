use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::contact::{Contact, NewContact};
use crate::domain::status::ContactStatus;
use crate::domain::types::ContactId;
use crate::models::contact::{Contact as DbContact, NewContact as DbNewContact};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ContactListQuery, ContactReader, ContactWriter, DieselRepository};

impl ContactReader for DieselRepository {
    fn get_contact_by_id(&self, id: ContactId) -> RepositoryResult<Option<Contact>> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;
        let db_contact = contacts::table
            .find(id.get())
            .first::<DbContact>(&mut conn)
            .optional()?;

        Ok(db_contact.map(Contact::try_from).transpose()?)
    }

    fn list_contacts(&self, query: ContactListQuery) -> RepositoryResult<(usize, Vec<Contact>)> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = contacts::table.into_boxed::<Sqlite>();
            if let Some(status) = query.status {
                items = items.filter(contacts::status.eq(status.as_str()));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order((contacts::created_at.desc(), contacts::id.desc()));
        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.offset() as i64)
                .limit(pagination.per_page as i64);
        }

        let contacts = items
            .load::<DbContact>(&mut conn)?
            .into_iter()
            .map(|contact| Contact::try_from(contact).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, contacts))
    }
}

impl ContactWriter for DieselRepository {
    fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;
        let db_contact = diesel::insert_into(contacts::table)
            .values(&DbNewContact::from(new_contact))
            .get_result::<DbContact>(&mut conn)?;

        Ok(Contact::try_from(db_contact)?)
    }

    fn set_contact_status(&self, id: ContactId, status: ContactStatus) -> RepositoryResult<Contact> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;
        let db_contact = diesel::update(contacts::table.find(id.get()))
            .set(contacts::status.eq(status.as_str()))
            .get_result::<DbContact>(&mut conn)?;

        Ok(Contact::try_from(db_contact)?)
    }
}
