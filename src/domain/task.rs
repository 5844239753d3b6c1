use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::status::{TaskPriority, TaskStatus};
use crate::domain::types::{DocumentTitle, ProjectId, TaskId};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub title: DocumentTitle,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewTask {
    pub project_id: ProjectId,
    pub title: DocumentTitle,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
}
