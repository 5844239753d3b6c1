//! Repository implementation for users and clients.

use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::status::UserRole;
use crate::domain::types::{Email, UserId};
use crate::domain::user::{ClientSummary, NewUser, UpdateUser, User, UserCredentials};
use crate::models::user::{NewUser as DbNewUser, UpdateUser as DbUpdateUser, User as DbUser};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ClientListQuery, DieselRepository, UserReader, UserWriter};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_user = users::table
            .find(id.get())
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(db_user.map(User::try_from).transpose()?)
    }

    fn get_credentials_by_id(&self, id: UserId) -> RepositoryResult<Option<UserCredentials>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_user = users::table
            .find(id.get())
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(db_user.map(UserCredentials::try_from).transpose()?)
    }

    fn get_credentials_by_email(
        &self,
        email: &Email,
    ) -> RepositoryResult<Option<UserCredentials>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_user = users::table
            .filter(users::email.eq(email.as_str()))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(db_user.map(UserCredentials::try_from).transpose()?)
    }

    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<ClientSummary>)> {
        use crate::schema::{projects, users};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = users::table
                .filter(users::role.eq(UserRole::Client.as_str()))
                .into_boxed::<Sqlite>();

            if let Some(active) = query.active {
                items = items.filter(users::is_active.eq(active));
            }

            if let Some(term) = &query.search {
                let pattern = format!("%{term}%");
                items = items.filter(
                    users::name
                        .like(pattern.clone())
                        .or(users::email.like(pattern.clone()))
                        .or(users::company.like(pattern)),
                );
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order((users::created_at.desc(), users::id.desc()));
        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.offset() as i64)
                .limit(pagination.per_page as i64);
        }
        let db_users = items.load::<DbUser>(&mut conn)?;

        let ids = db_users.iter().map(|user| user.id).collect::<Vec<i32>>();
        let project_counts: HashMap<i32, i64> = projects::table
            .filter(projects::client_id.eq_any(ids))
            .group_by(projects::client_id)
            .select((projects::client_id, diesel::dsl::count(projects::id)))
            .load::<(i32, i64)>(&mut conn)?
            .into_iter()
            .collect();

        let clients = db_users
            .into_iter()
            .map(|db_user| {
                let project_count = project_counts.get(&db_user.id).copied().unwrap_or(0) as usize;
                Ok(ClientSummary {
                    client: User::try_from(db_user)?,
                    project_count,
                })
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        Ok((total, clients))
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_user = diesel::insert_into(users::table)
            .values(&DbNewUser::from(new_user))
            .get_result::<DbUser>(&mut conn)?;

        Ok(User::try_from(db_user)?)
    }

    fn create_users(&self, new_users: &[NewUser]) -> RepositoryResult<usize> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let insertables = new_users.iter().map(DbNewUser::from).collect::<Vec<_>>();

        let affected = diesel::insert_or_ignore_into(users::table)
            .values(&insertables)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn update_user(&self, id: UserId, updates: &UpdateUser) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_user = diesel::update(users::table.find(id.get()))
            .set(&DbUpdateUser::from(updates))
            .get_result::<DbUser>(&mut conn)?;

        Ok(User::try_from(db_user)?)
    }

    fn set_user_active(&self, id: UserId, is_active: bool) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_user = diesel::update(users::table.find(id.get()))
            .set((
                users::is_active.eq(is_active),
                users::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbUser>(&mut conn)?;

        Ok(User::try_from(db_user)?)
    }

    fn set_password_hash(&self, id: UserId, password_hash: &str) -> RepositoryResult<()> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let affected = diesel::update(users::table.find(id.get()))
            .set((
                users::password_hash.eq(Some(password_hash)),
                users::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
