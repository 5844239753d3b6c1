use serde::{Deserialize, Serialize};

use crate::domain::project::Project;
use crate::domain::status::{Badge, TaskPriority};
use crate::domain::task::Task;
use crate::dto::{Badged, ListQuery, StatusFilter};
use crate::pagination::Paginated;

#[derive(Debug, Serialize)]
pub struct TaskRow {
    pub task: Task,
    pub project: Project,
    pub priority: Badge,
    /// Open and past its due date.
    pub overdue: bool,
}

#[derive(Debug, Serialize)]
pub struct TasksPageData {
    pub tasks: Paginated<Badged<TaskRow>>,
    pub status_filter: StatusFilter,
    pub priority_filter: StatusFilter,
    pub projects: Vec<Project>,
}

/// Query string of the task board: `?status=TODO&priority=HIGH&page=2`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TaskQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub page: Option<usize>,
}

impl TaskQuery {
    /// Status and page as a generic list query.
    pub fn list(&self) -> ListQuery {
        ListQuery {
            status: self.status.clone(),
            search: None,
            page: self.page,
        }
    }

    pub fn priority_filter(&self) -> Option<TaskPriority> {
        ListQuery {
            status: self.priority.clone(),
            ..Default::default()
        }
        .status_filter()
    }
}
