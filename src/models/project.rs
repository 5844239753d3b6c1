//! Diesel models representing projects.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::money::Money;
use crate::domain::project::{
    NewProject as DomainNewProject, Project as DomainProject, UpdateProject as DomainUpdateProject,
};
use crate::domain::types::{CurrencyCode, ProjectId, ProjectName, TypeConstraintError, UserId};
use crate::models::user::User;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::projects)]
#[diesel(belongs_to(User, foreign_key = client_id))]
/// Diesel model for [`crate::domain::project::Project`].
pub struct Project {
    pub id: i32,
    pub client_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub budget_cents: Option<i64>,
    pub currency: String,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::projects)]
pub struct NewProject<'a> {
    pub client_id: i32,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub status: &'a str,
    pub budget_cents: Option<i64>,
    pub currency: &'a str,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::projects)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateProject<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub budget_cents: Option<i64>,
    pub currency: &'a str,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Project> for DomainProject {
    type Error = TypeConstraintError;

    fn try_from(project: Project) -> Result<Self, Self::Error> {
        let currency = CurrencyCode::new(project.currency)?;
        Ok(Self {
            id: ProjectId::new(project.id)?,
            client_id: UserId::new(project.client_id)?,
            name: ProjectName::new(project.name)?,
            description: project.description,
            status: project.status.parse()?,
            budget: project
                .budget_cents
                .map(|cents| Money::new(cents, currency.clone())),
            currency,
            start_date: project.start_date,
            due_date: project.due_date,
            created_at: project.created_at,
            updated_at: project.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewProject> for NewProject<'a> {
    fn from(project: &'a DomainNewProject) -> Self {
        Self {
            client_id: project.client_id.get(),
            name: project.name.as_str(),
            description: project.description.as_deref(),
            status: project.status.as_str(),
            budget_cents: project.budget_cents,
            currency: project.currency.as_str(),
            start_date: project.start_date,
            due_date: project.due_date,
        }
    }
}

impl<'a> From<&'a DomainUpdateProject> for UpdateProject<'a> {
    fn from(project: &'a DomainUpdateProject) -> Self {
        Self {
            name: project.name.as_str(),
            description: project.description.as_deref(),
            budget_cents: project.budget_cents,
            currency: project.currency.as_str(),
            start_date: project.start_date,
            due_date: project.due_date,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::status::ProjectStatus;

    #[test]
    fn project_into_domain_carries_budget_currency() {
        let now = Utc::now().naive_utc();
        let db = Project {
            id: 1,
            client_id: 2,
            name: "Website".into(),
            description: None,
            status: "IN_PROGRESS".into(),
            budget_cents: Some(150_000),
            currency: "EUR".into(),
            start_date: None,
            due_date: None,
            created_at: now,
            updated_at: now,
        };
        let domain = DomainProject::try_from(db).expect("valid project");
        assert_eq!(domain.status, ProjectStatus::InProgress);
        let budget = domain.budget.expect("budget");
        assert_eq!(budget.display(), "€1,500.00");
    }

    #[test]
    fn from_domain_new_project() {
        let domain = DomainNewProject {
            client_id: UserId::new(4).unwrap(),
            name: ProjectName::new("App").unwrap(),
            description: Some("Mobile app".into()),
            status: ProjectStatus::Pending,
            budget_cents: None,
            currency: CurrencyCode::default(),
            start_date: None,
            due_date: None,
        };
        let new: NewProject = (&domain).into();
        assert_eq!(new.client_id, 4);
        assert_eq!(new.status, "PENDING");
        assert_eq!(new.currency, "USD");
    }
}
