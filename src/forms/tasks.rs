use serde::Deserialize;
use validator::Validate;

use crate::domain::status::TaskPriority;
use crate::domain::task::NewTask;
use crate::domain::types::{DocumentTitle, ProjectId, non_blank};
use crate::forms::{FormError, parse_optional_date};

#[derive(Debug, Deserialize, Validate)]
pub struct TaskForm {
    pub project_id: i32,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl TryFrom<TaskForm> for NewTask {
    type Error = FormError;

    fn try_from(form: TaskForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let priority = match non_blank(form.priority) {
            Some(priority) => priority.parse().map_err(|_| FormError::InvalidStatus)?,
            None => TaskPriority::Medium,
        };

        Ok(Self {
            project_id: ProjectId::new(form.project_id).map_err(|_| FormError::InvalidId)?,
            title: DocumentTitle::new(form.title).map_err(|_| FormError::InvalidName)?,
            description: non_blank(form.description),
            priority,
            due_date: parse_optional_date(form.due_date)?,
        })
    }
}
