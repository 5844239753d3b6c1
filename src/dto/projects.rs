//! DTOs for project list and detail pages.

use serde::Serialize;

use crate::domain::document::{Estimation, Proposal};
use crate::domain::invoice::Invoice;
use crate::domain::project::{Project, ProjectOverview};
use crate::domain::status::StatusOption;
use crate::domain::task::Task;
use crate::domain::user::{ClientSummary, User};
use crate::domain::types::UserId;
use crate::dto::{Badged, StatusFilter};
use crate::pagination::Paginated;

#[derive(Debug, Serialize)]
pub struct ProjectsPageData {
    pub projects: Paginated<Badged<ProjectOverview>>,
    pub filter: StatusFilter,
    pub search_query: Option<String>,
    pub client_id: Option<UserId>,
    /// Active clients offered in the "new project" form.
    pub clients: Vec<ClientSummary>,
}

#[derive(Debug, Serialize)]
pub struct ProjectPageData {
    pub project: Badged<Project>,
    pub client: User,
    pub proposals: Vec<Badged<Proposal>>,
    pub estimations: Vec<Badged<Estimation>>,
    pub invoices: Vec<Badged<Invoice>>,
    pub tasks: Vec<Badged<Task>>,
    pub status_options: Vec<StatusOption>,
}
