//! Diesel models representing project tasks.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::task::{NewTask as DomainNewTask, Task as DomainTask};
use crate::domain::types::{DocumentTitle, ProjectId, TaskId, TypeConstraintError};
use crate::models::project::Project;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::tasks)]
#[diesel(belongs_to(Project, foreign_key = project_id))]
pub struct Task {
    pub id: i32,
    pub project_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::tasks)]
pub struct NewTask<'a> {
    pub project_id: i32,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub priority: &'a str,
    pub due_date: Option<NaiveDate>,
}

impl TryFrom<Task> for DomainTask {
    type Error = TypeConstraintError;

    fn try_from(task: Task) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TaskId::new(task.id)?,
            project_id: ProjectId::new(task.project_id)?,
            title: DocumentTitle::new(task.title)?,
            description: task.description,
            status: task.status.parse()?,
            priority: task.priority.parse()?,
            due_date: task.due_date,
            created_at: task.created_at,
            updated_at: task.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewTask> for NewTask<'a> {
    fn from(task: &'a DomainNewTask) -> Self {
        Self {
            project_id: task.project_id.get(),
            title: task.title.as_str(),
            description: task.description.as_deref(),
            priority: task.priority.as_str(),
            due_date: task.due_date,
        }
    }
}
