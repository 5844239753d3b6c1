//! DTO modules that bridge services with templates and APIs.

use serde::Serialize;

use crate::domain::status::{Badge, StatusBadge, StatusOption, status_options};
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;

pub mod account;
pub mod catalog;
pub mod clients;
pub mod contacts;
pub mod dashboard;
pub mod documents;
pub mod projects;
pub mod tasks;

/// Item paired with the badge of its status, flattened for templates.
#[derive(Debug, Serialize)]
pub struct Badged<T> {
    #[serde(flatten)]
    pub item: T,
    pub badge: Badge,
}

impl<T> Badged<T> {
    pub fn new(item: T, status: &impl StatusBadge) -> Self {
        Self {
            item,
            badge: status.badge(),
        }
    }
}

/// Query string shared by list pages: `?status=SENT&page=2&search=acme`.
#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    pub search: Option<String>,
    pub page: Option<usize>,
}

impl ListQuery {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1)
    }

    pub fn per_page(&self) -> usize {
        DEFAULT_ITEMS_PER_PAGE
    }

    /// Trimmed, non-empty search term.
    pub fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_string)
    }

    /// Parsed status filter; blank or unknown values mean "all".
    pub fn status_filter<S: std::str::FromStr>(&self) -> Option<S> {
        self.status
            .as_deref()
            .map(str::trim)
            .filter(|status| !status.is_empty())
            .and_then(|status| status.parse().ok())
    }

    /// `?status=active` or `?status=inactive` on lists of soft-deletable rows.
    pub fn active_filter(&self) -> Option<bool> {
        match self.status.as_deref().map(str::trim) {
            Some("active") => Some(true),
            Some("inactive") => Some(false),
            _ => None,
        }
    }
}

/// Filter chips rendered above a list, with the active one marked.
#[derive(Debug, Serialize)]
pub struct StatusFilter {
    pub options: Vec<StatusOption>,
    pub selected: Option<&'static str>,
}

impl StatusFilter {
    pub fn new<S>(all: &[S], selected: Option<S>) -> Self
    where
        S: StatusBadge + Copy + Into<&'static str>,
    {
        Self {
            options: status_options(all),
            selected: selected.map(Into::into),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::status::InvoiceStatus;

    #[test]
    fn list_query_ignores_blank_and_unknown_status() {
        let query = ListQuery {
            status: Some(" ".into()),
            ..Default::default()
        };
        assert_eq!(query.status_filter::<InvoiceStatus>(), None);

        let query = ListQuery {
            status: Some("LOST".into()),
            ..Default::default()
        };
        assert_eq!(query.status_filter::<InvoiceStatus>(), None);

        let query = ListQuery {
            status: Some("PAID".into()),
            page: Some(3),
            ..Default::default()
        };
        assert_eq!(
            query.status_filter::<InvoiceStatus>(),
            Some(InvoiceStatus::Paid)
        );
        assert_eq!(query.page(), 3);
    }

    #[test]
    fn active_filter_reads_status() {
        let query = |status: &str| ListQuery {
            status: Some(status.into()),
            ..Default::default()
        };
        assert_eq!(query("active").active_filter(), Some(true));
        assert_eq!(query("inactive").active_filter(), Some(false));
        assert_eq!(query("").active_filter(), None);
        assert_eq!(ListQuery::default().active_filter(), None);
    }

    #[test]
    fn badged_flattens_item() {
        #[derive(Serialize)]
        struct Row {
            title: &'static str,
        }
        let value =
            serde_json::to_value(Badged::new(Row { title: "INV-1" }, &InvoiceStatus::Overdue))
                .unwrap();
        assert_eq!(value["title"], "INV-1");
        assert_eq!(value["badge"]["color"], "danger");
    }
}
