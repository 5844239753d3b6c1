//! Repository implementation for project tasks.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::project::Project;
use crate::domain::status::TaskStatus;
use crate::domain::task::{NewTask, Task};
use crate::domain::types::TaskId;
use crate::models::project::Project as DbProject;
use crate::models::task::{NewTask as DbNewTask, Task as DbTask};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, TaskListQuery, TaskReader, TaskWriter};

impl TaskReader for DieselRepository {
    fn list_tasks(&self, query: TaskListQuery) -> RepositoryResult<(usize, Vec<(Task, Project)>)> {
        use crate::schema::{projects, tasks};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = tasks::table
                .inner_join(projects::table)
                .into_boxed::<Sqlite>();

            if let Some(status) = query.status {
                items = items.filter(tasks::status.eq(status.as_str()));
            }
            if let Some(priority) = query.priority {
                items = items.filter(tasks::priority.eq(priority.as_str()));
            }
            if let Some(project_id) = query.project_id {
                items = items.filter(tasks::project_id.eq(project_id.get()));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        // Tasks without a due date sort after dated ones.
        let mut items = query_builder().order((
            tasks::due_date.is_null().asc(),
            tasks::due_date.asc(),
            tasks::id.desc(),
        ));
        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.offset() as i64)
                .limit(pagination.per_page as i64);
        }

        let rows = items
            .load::<(DbTask, DbProject)>(&mut conn)?
            .into_iter()
            .map(|(task, project)| Ok((Task::try_from(task)?, Project::try_from(project)?)))
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        Ok((total, rows))
    }
}

impl TaskWriter for DieselRepository {
    fn create_task(&self, new_task: &NewTask) -> RepositoryResult<Task> {
        use crate::schema::tasks;

        let mut conn = self.conn()?;
        let db_task = diesel::insert_into(tasks::table)
            .values(&DbNewTask::from(new_task))
            .get_result::<DbTask>(&mut conn)?;

        Ok(Task::try_from(db_task)?)
    }

    fn set_task_status(&self, id: TaskId, status: TaskStatus) -> RepositoryResult<Task> {
        use crate::schema::tasks;

        let mut conn = self.conn()?;
        let db_task = diesel::update(tasks::table.find(id.get()))
            .set((
                tasks::status.eq(status.as_str()),
                tasks::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbTask>(&mut conn)?;

        Ok(Task::try_from(db_task)?)
    }

    fn delete_task(&self, id: TaskId) -> RepositoryResult<()> {
        use crate::schema::tasks;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(tasks::table.find(id.get())).execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
