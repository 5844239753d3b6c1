use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::project::{NewProject, UpdateProject};
use crate::domain::status::ProjectStatus;
use crate::domain::types::{CurrencyCode, ProjectName, UserId, non_blank};
use crate::forms::{FormError, parse_currency, parse_money, parse_optional_date};

/// Project fields submitted from the add and edit forms.
///
/// `client_id` is only read when creating a project.
#[derive(Debug, Deserialize, Validate)]
pub struct ProjectForm {
    #[serde(default)]
    pub client_id: Option<i32>,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

pub struct ProjectPayload {
    pub client_id: Option<UserId>,
    pub name: ProjectName,
    pub description: Option<String>,
    pub budget_cents: Option<i64>,
    pub currency: CurrencyCode,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
}

impl TryFrom<ProjectForm> for ProjectPayload {
    type Error = FormError;

    fn try_from(form: ProjectForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let client_id = form
            .client_id
            .map(UserId::new)
            .transpose()
            .map_err(|_| FormError::InvalidId)?;
        let budget_cents = non_blank(form.budget)
            .map(|budget| parse_money(&budget))
            .transpose()?;
        let start_date = parse_optional_date(form.start_date)?;
        let due_date = parse_optional_date(form.due_date)?;

        if let (Some(start), Some(due)) = (start_date, due_date)
            && due < start
        {
            return Err(FormError::InvalidDate);
        }

        Ok(Self {
            client_id,
            name: ProjectName::new(form.name).map_err(|_| FormError::InvalidName)?,
            description: non_blank(form.description),
            budget_cents,
            currency: parse_currency(form.currency)?,
            start_date,
            due_date,
        })
    }
}

impl ProjectPayload {
    /// New projects start as [`ProjectStatus::Pending`]; a client is required.
    pub fn into_new_project(self) -> Result<NewProject, FormError> {
        let client_id = self.client_id.ok_or(FormError::InvalidId)?;
        Ok(NewProject {
            client_id,
            name: self.name,
            description: self.description,
            status: ProjectStatus::Pending,
            budget_cents: self.budget_cents,
            currency: self.currency,
            start_date: self.start_date,
            due_date: self.due_date,
        })
    }

    pub fn into_update(self) -> UpdateProject {
        UpdateProject {
            name: self.name,
            description: self.description,
            budget_cents: self.budget_cents,
            currency: self.currency,
            start_date: self.start_date,
            due_date: self.due_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ProjectForm {
        ProjectForm {
            client_id: Some(3),
            name: "Website".into(),
            description: Some("  ".into()),
            budget: Some("12,500.00".into()),
            currency: Some("eur".into()),
            start_date: Some("2026-01-10".into()),
            due_date: Some("2026-03-01".into()),
        }
    }

    #[test]
    fn converts_into_new_project() {
        let project = ProjectPayload::try_from(form())
            .unwrap()
            .into_new_project()
            .unwrap();
        assert_eq!(project.client_id.get(), 3);
        assert_eq!(project.budget_cents, Some(1_250_000));
        assert_eq!(project.currency.as_str(), "EUR");
        assert_eq!(project.description, None);
        assert_eq!(project.status, ProjectStatus::Pending);
    }

    #[test]
    fn new_project_requires_client() {
        let mut form = form();
        form.client_id = None;
        let payload = ProjectPayload::try_from(form).unwrap();
        assert!(matches!(
            payload.into_new_project(),
            Err(FormError::InvalidId)
        ));
    }

    #[test]
    fn due_date_before_start_is_rejected() {
        let mut form = form();
        form.due_date = Some("2025-12-31".into());
        assert!(matches!(
            ProjectPayload::try_from(form),
            Err(FormError::InvalidDate)
        ));
    }

    #[test]
    fn bad_budget_is_rejected() {
        let mut form = form();
        form.budget = Some("lots".into());
        assert!(matches!(
            ProjectPayload::try_from(form),
            Err(FormError::InvalidAmount)
        ));
    }
}
