use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::money::Money;
use crate::domain::status::ProjectStatus;
use crate::domain::types::{CurrencyCode, ProjectId, ProjectName, UserId};
use crate::domain::user::User;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    pub client_id: UserId,
    pub name: ProjectName,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub budget: Option<Money>,
    pub currency: CurrencyCode,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewProject {
    pub client_id: UserId,
    pub name: ProjectName,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub budget_cents: Option<i64>,
    pub currency: CurrencyCode,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Clone, Debug)]
pub struct UpdateProject {
    pub name: ProjectName,
    pub description: Option<String>,
    pub budget_cents: Option<i64>,
    pub currency: CurrencyCode,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
}

/// Project row of the projects table with its client and document counts.
#[derive(Clone, Debug, Serialize)]
pub struct ProjectOverview {
    pub project: Project,
    pub client: User,
    pub proposal_count: usize,
    pub invoice_count: usize,
    pub open_task_count: usize,
}
