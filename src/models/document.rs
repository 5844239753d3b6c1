//! Diesel models representing proposals and estimations.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::document::{
    Estimation as DomainEstimation, NewEstimation as DomainNewEstimation,
    NewProposal as DomainNewProposal, Proposal as DomainProposal,
};
use crate::domain::money::Money;
use crate::domain::types::{
    CurrencyCode, DocumentTitle, EstimationId, ProjectId, ProposalId, TypeConstraintError,
};
use crate::models::project::Project;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::proposals)]
#[diesel(belongs_to(Project, foreign_key = project_id))]
pub struct Proposal {
    pub id: i32,
    pub project_id: i32,
    pub title: String,
    pub content: Option<String>,
    pub amount_cents: i64,
    pub currency: String,
    pub status: String,
    pub valid_until: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::proposals)]
pub struct NewProposal<'a> {
    pub project_id: i32,
    pub title: &'a str,
    pub content: Option<&'a str>,
    pub amount_cents: i64,
    pub currency: &'a str,
    pub valid_until: Option<NaiveDate>,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::estimations)]
#[diesel(belongs_to(Project, foreign_key = project_id))]
pub struct Estimation {
    pub id: i32,
    pub project_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub amount_cents: i64,
    pub currency: String,
    pub estimated_hours: Option<i32>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::estimations)]
pub struct NewEstimation<'a> {
    pub project_id: i32,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub amount_cents: i64,
    pub currency: &'a str,
    pub estimated_hours: Option<i32>,
}

impl TryFrom<Proposal> for DomainProposal {
    type Error = TypeConstraintError;

    fn try_from(proposal: Proposal) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProposalId::new(proposal.id)?,
            project_id: ProjectId::new(proposal.project_id)?,
            title: DocumentTitle::new(proposal.title)?,
            content: proposal.content,
            amount: Money::new(proposal.amount_cents, CurrencyCode::new(proposal.currency)?),
            status: proposal.status.parse()?,
            valid_until: proposal.valid_until,
            created_at: proposal.created_at,
            updated_at: proposal.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewProposal> for NewProposal<'a> {
    fn from(proposal: &'a DomainNewProposal) -> Self {
        Self {
            project_id: proposal.project_id.get(),
            title: proposal.title.as_str(),
            content: proposal.content.as_deref(),
            amount_cents: proposal.amount_cents,
            currency: proposal.currency.as_str(),
            valid_until: proposal.valid_until,
        }
    }
}

impl TryFrom<Estimation> for DomainEstimation {
    type Error = TypeConstraintError;

    fn try_from(estimation: Estimation) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EstimationId::new(estimation.id)?,
            project_id: ProjectId::new(estimation.project_id)?,
            title: DocumentTitle::new(estimation.title)?,
            description: estimation.description,
            amount: Money::new(
                estimation.amount_cents,
                CurrencyCode::new(estimation.currency)?,
            ),
            estimated_hours: estimation.estimated_hours,
            status: estimation.status.parse()?,
            created_at: estimation.created_at,
            updated_at: estimation.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewEstimation> for NewEstimation<'a> {
    fn from(estimation: &'a DomainNewEstimation) -> Self {
        Self {
            project_id: estimation.project_id.get(),
            title: estimation.title.as_str(),
            description: estimation.description.as_deref(),
            amount_cents: estimation.amount_cents,
            currency: estimation.currency.as_str(),
            estimated_hours: estimation.estimated_hours,
        }
    }
}
