//! Repository implementation for proposals and estimations.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::document::{Estimation, NewEstimation, NewProposal, Proposal};
use crate::domain::project::Project;
use crate::domain::status::{EstimationStatus, ProposalStatus};
use crate::domain::types::{EstimationId, ProposalId};
use crate::models::document::{
    Estimation as DbEstimation, NewEstimation as DbNewEstimation, NewProposal as DbNewProposal,
    Proposal as DbProposal,
};
use crate::models::project::Project as DbProject;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, DocumentListQuery, EstimationReader, EstimationWriter, ProposalReader,
    ProposalWriter,
};

impl ProposalReader for DieselRepository {
    fn list_proposals(
        &self,
        query: DocumentListQuery<ProposalStatus>,
    ) -> RepositoryResult<(usize, Vec<(Proposal, Project)>)> {
        use crate::schema::{projects, proposals};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = proposals::table
                .inner_join(projects::table)
                .into_boxed::<Sqlite>();

            if let Some(status) = query.status {
                items = items.filter(proposals::status.eq(status.as_str()));
            }
            if let Some(project_id) = query.project_id {
                items = items.filter(proposals::project_id.eq(project_id.get()));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items =
            query_builder().order((proposals::created_at.desc(), proposals::id.desc()));
        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.offset() as i64)
                .limit(pagination.per_page as i64);
        }

        let rows = items
            .load::<(DbProposal, DbProject)>(&mut conn)?
            .into_iter()
            .map(|(proposal, project)| {
                Ok((Proposal::try_from(proposal)?, Project::try_from(project)?))
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        Ok((total, rows))
    }
}

impl ProposalWriter for DieselRepository {
    fn create_proposal(&self, new_proposal: &NewProposal) -> RepositoryResult<Proposal> {
        use crate::schema::proposals;

        let mut conn = self.conn()?;
        let db_proposal = diesel::insert_into(proposals::table)
            .values(&DbNewProposal::from(new_proposal))
            .get_result::<DbProposal>(&mut conn)?;

        Ok(Proposal::try_from(db_proposal)?)
    }

    fn set_proposal_status(
        &self,
        id: ProposalId,
        status: ProposalStatus,
    ) -> RepositoryResult<Proposal> {
        use crate::schema::proposals;

        let mut conn = self.conn()?;
        let db_proposal = diesel::update(proposals::table.find(id.get()))
            .set((
                proposals::status.eq(status.as_str()),
                proposals::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbProposal>(&mut conn)?;

        Ok(Proposal::try_from(db_proposal)?)
    }
}

impl EstimationReader for DieselRepository {
    fn list_estimations(
        &self,
        query: DocumentListQuery<EstimationStatus>,
    ) -> RepositoryResult<(usize, Vec<(Estimation, Project)>)> {
        use crate::schema::{estimations, projects};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = estimations::table
                .inner_join(projects::table)
                .into_boxed::<Sqlite>();

            if let Some(status) = query.status {
                items = items.filter(estimations::status.eq(status.as_str()));
            }
            if let Some(project_id) = query.project_id {
                items = items.filter(estimations::project_id.eq(project_id.get()));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items =
            query_builder().order((estimations::created_at.desc(), estimations::id.desc()));
        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.offset() as i64)
                .limit(pagination.per_page as i64);
        }

        let rows = items
            .load::<(DbEstimation, DbProject)>(&mut conn)?
            .into_iter()
            .map(|(estimation, project)| {
                Ok((
                    Estimation::try_from(estimation)?,
                    Project::try_from(project)?,
                ))
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        Ok((total, rows))
    }
}

impl EstimationWriter for DieselRepository {
    fn create_estimation(&self, new_estimation: &NewEstimation) -> RepositoryResult<Estimation> {
        use crate::schema::estimations;

        let mut conn = self.conn()?;
        let db_estimation = diesel::insert_into(estimations::table)
            .values(&DbNewEstimation::from(new_estimation))
            .get_result::<DbEstimation>(&mut conn)?;

        Ok(Estimation::try_from(db_estimation)?)
    }

    fn set_estimation_status(
        &self,
        id: EstimationId,
        status: EstimationStatus,
    ) -> RepositoryResult<Estimation> {
        use crate::schema::estimations;

        let mut conn = self.conn()?;
        let db_estimation = diesel::update(estimations::table.find(id.get()))
            .set((
                estimations::status.eq(status.as_str()),
                estimations::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbEstimation>(&mut conn)?;

        Ok(Estimation::try_from(db_estimation)?)
    }
}
