//! DTOs shaped for the client list and detail templates.

use serde::Serialize;

use crate::domain::project::ProjectOverview;
use crate::domain::user::{ClientSummary, User};
use crate::dto::Badged;
use crate::pagination::Paginated;

/// Data required to render the clients list.
#[derive(Debug, Serialize)]
pub struct ClientsPageData {
    pub clients: Paginated<ClientSummary>,
    /// Search query echoed back to the template when present.
    pub search_query: Option<String>,
    /// `Some(false)` lists deactivated clients only.
    pub active: Option<bool>,
}

/// Aggregated data required to render the client details page.
#[derive(Debug, Serialize)]
pub struct ClientPageData {
    pub client: User,
    pub projects: Vec<Badged<ProjectOverview>>,
    pub invoice_count: usize,
}
