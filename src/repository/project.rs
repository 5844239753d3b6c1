//! Repository implementation for projects.

use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::project::{NewProject, Project, ProjectOverview, UpdateProject};
use crate::domain::status::{ProjectStatus, TaskStatus};
use crate::domain::types::ProjectId;
use crate::domain::user::User;
use crate::models::project::{
    NewProject as DbNewProject, Project as DbProject, UpdateProject as DbUpdateProject,
};
use crate::models::user::User as DbUser;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ProjectListQuery, ProjectReader, ProjectWriter};

impl ProjectReader for DieselRepository {
    fn get_project_by_id(&self, id: ProjectId) -> RepositoryResult<Option<Project>> {
        use crate::schema::projects;

        let mut conn = self.conn()?;
        let db_project = projects::table
            .find(id.get())
            .first::<DbProject>(&mut conn)
            .optional()?;

        Ok(db_project.map(Project::try_from).transpose()?)
    }

    fn list_projects(
        &self,
        query: ProjectListQuery,
    ) -> RepositoryResult<(usize, Vec<ProjectOverview>)> {
        use crate::schema::{invoices, projects, proposals, tasks, users};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = projects::table.into_boxed::<Sqlite>();

            if let Some(status) = query.status {
                items = items.filter(projects::status.eq(status.as_str()));
            }
            if let Some(client_id) = query.client_id {
                items = items.filter(projects::client_id.eq(client_id.get()));
            }
            if let Some(term) = &query.search {
                items = items.filter(projects::name.like(format!("%{term}%")));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items =
            query_builder().order((projects::created_at.desc(), projects::id.desc()));
        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.offset() as i64)
                .limit(pagination.per_page as i64);
        }
        let db_projects = items.load::<DbProject>(&mut conn)?;

        let project_ids = db_projects.iter().map(|p| p.id).collect::<Vec<i32>>();
        let client_ids = db_projects.iter().map(|p| p.client_id).collect::<Vec<i32>>();

        let clients: HashMap<i32, DbUser> = users::table
            .filter(users::id.eq_any(client_ids))
            .load::<DbUser>(&mut conn)?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        let proposal_counts: HashMap<i32, i64> = proposals::table
            .filter(proposals::project_id.eq_any(project_ids.clone()))
            .group_by(proposals::project_id)
            .select((proposals::project_id, diesel::dsl::count(proposals::id)))
            .load::<(i32, i64)>(&mut conn)?
            .into_iter()
            .collect();

        let invoice_counts: HashMap<i32, i64> = invoices::table
            .filter(invoices::project_id.eq_any(project_ids.clone()))
            .group_by(invoices::project_id)
            .select((invoices::project_id, diesel::dsl::count(invoices::id)))
            .load::<(i32, i64)>(&mut conn)?
            .into_iter()
            .collect();

        let open_task_counts: HashMap<i32, i64> = tasks::table
            .filter(tasks::project_id.eq_any(project_ids))
            .filter(tasks::status.ne(TaskStatus::Done.as_str()))
            .group_by(tasks::project_id)
            .select((tasks::project_id, diesel::dsl::count(tasks::id)))
            .load::<(i32, i64)>(&mut conn)?
            .into_iter()
            .collect();

        let count_for = |counts: &HashMap<i32, i64>, id: i32| {
            counts.get(&id).copied().unwrap_or(0) as usize
        };

        let overviews = db_projects
            .into_iter()
            .map(|db_project| {
                let id = db_project.id;
                let client = clients
                    .get(&db_project.client_id)
                    .cloned()
                    .ok_or(RepositoryError::NotFound)?;
                Ok(ProjectOverview {
                    project: Project::try_from(db_project)?,
                    client: User::try_from(client)?,
                    proposal_count: count_for(&proposal_counts, id),
                    invoice_count: count_for(&invoice_counts, id),
                    open_task_count: count_for(&open_task_counts, id),
                })
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        Ok((total, overviews))
    }
}

impl ProjectWriter for DieselRepository {
    fn create_project(&self, new_project: &NewProject) -> RepositoryResult<Project> {
        use crate::schema::projects;

        let mut conn = self.conn()?;
        let db_project = diesel::insert_into(projects::table)
            .values(&DbNewProject::from(new_project))
            .get_result::<DbProject>(&mut conn)?;

        Ok(Project::try_from(db_project)?)
    }

    fn update_project(&self, id: ProjectId, updates: &UpdateProject) -> RepositoryResult<Project> {
        use crate::schema::projects;

        let mut conn = self.conn()?;
        let db_project = diesel::update(projects::table.find(id.get()))
            .set(&DbUpdateProject::from(updates))
            .get_result::<DbProject>(&mut conn)?;

        Ok(Project::try_from(db_project)?)
    }

    fn set_project_status(
        &self,
        id: ProjectId,
        status: ProjectStatus,
    ) -> RepositoryResult<Project> {
        use crate::schema::projects;

        let mut conn = self.conn()?;
        let db_project = diesel::update(projects::table.find(id.get()))
            .set((
                projects::status.eq(status.as_str()),
                projects::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbProject>(&mut conn)?;

        Ok(Project::try_from(db_project)?)
    }
}
