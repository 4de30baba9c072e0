//! Errors surfaced at the boundary of a single resolution call.

use thiserror::Error;

use crate::domain::Subject;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::infra::db_errors::map_db_err;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolutionError {
    /// Nothing pending for the subject; callers treat this as "nothing to do".
    #[error("no pending bids or claims for {0}")]
    EmptyGroup(Subject),
    /// A rank needed for the decision is missing and could not be repaired.
    #[error("team {team_id} has no priority record")]
    NoPriorityRecord { team_id: i64 },
    /// Another resolution claimed the subject first.
    #[error("{0} was resolved by a concurrent call")]
    ConcurrentResolutionConflict(Subject),
    /// The store rejected a read or write. Never retried here.
    #[error("persistence failure: {0}")]
    PersistenceFailure(DomainError),
    /// Subject lookup or validation failed.
    #[error(transparent)]
    Domain(DomainError),
}

impl From<DomainError> for ResolutionError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Infra(InfraErrorKind::DataCorruption, _) => Self::Domain(e),
            DomainError::Infra(..) => Self::PersistenceFailure(e),
            other => Self::Domain(other),
        }
    }
}

impl From<sea_orm::DbErr> for ResolutionError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e).into()
    }
}
