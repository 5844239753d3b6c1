//! Pre-sale documents attached to a project: proposals and estimations.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::money::Money;
use crate::domain::status::{EstimationStatus, ProposalStatus};
use crate::domain::types::{CurrencyCode, DocumentTitle, EstimationId, ProjectId, ProposalId};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Proposal {
    pub id: ProposalId,
    pub project_id: ProjectId,
    pub title: DocumentTitle,
    pub content: Option<String>,
    pub amount: Money,
    pub status: ProposalStatus,
    pub valid_until: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewProposal {
    pub project_id: ProjectId,
    pub title: DocumentTitle,
    pub content: Option<String>,
    pub amount_cents: i64,
    pub currency: CurrencyCode,
    pub valid_until: Option<NaiveDate>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Estimation {
    pub id: EstimationId,
    pub project_id: ProjectId,
    pub title: DocumentTitle,
    pub description: Option<String>,
    pub amount: Money,
    pub estimated_hours: Option<i32>,
    pub status: EstimationStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewEstimation {
    pub project_id: ProjectId,
    pub title: DocumentTitle,
    pub description: Option<String>,
    pub amount_cents: i64,
    pub currency: CurrencyCode,
    pub estimated_hours: Option<i32>,
}
