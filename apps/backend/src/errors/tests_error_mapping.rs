// Unit tests for error mapping - pure domain logic without HTTP or database dependencies
use crate::domain::Subject;
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::errors::ResolutionError;
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_to_422() {
    let de = DomainError::validation(ValidationKind::InvalidBid, "amount must be positive");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::InvalidBid);
    assert_eq!(app.status().as_u16(), 422);

    let other = DomainError::validation_other("bad field");
    let app: AppError = other.into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
}

#[test]
fn maps_conflicts() {
    let claim = DomainError::conflict(ConflictKind::ClaimExists, "already claimed");
    let app: AppError = claim.into();
    assert_eq!(app.code().as_str(), "CLAIM_EXISTS");
    assert_eq!(app.status().as_u16(), 409);

    let waived = DomainError::conflict(ConflictKind::PlayerOnWaivers, "on waivers");
    let app: AppError = waived.into();
    assert_eq!(app.code().as_str(), "PLAYER_ON_WAIVERS");
    assert_eq!(app.status().as_u16(), 409);

    let other = DomainError::conflict(ConflictKind::Other("Unique".into()), "generic");
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "CONFLICT");
}

#[test]
fn maps_not_found() {
    let nf = DomainError::not_found(NotFoundKind::Waiver, "no waiver");
    let app: AppError = nf.into();
    assert_eq!(app.code().as_str(), "WAIVER_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);
}

#[test]
fn maps_infra() {
    let t = DomainError::infra(InfraErrorKind::Timeout, "timeout");
    let app: AppError = t.into();
    assert_eq!(app.code().as_str(), "DB_TIMEOUT");
    assert_eq!(app.status().as_u16(), 504);

    let down = DomainError::infra(InfraErrorKind::DbUnavailable, "down");
    let app: AppError = down.into();
    assert_eq!(app.status().as_u16(), 503);

    let corrupt = DomainError::data_corruption("amount is negative");
    let app: AppError = corrupt.into();
    assert_eq!(app.code(), ErrorCode::DataCorruption);
    assert_eq!(app.status().as_u16(), 500);
}

#[test]
fn resolution_errors_keep_store_failures_intact() {
    let store = DomainError::infra(InfraErrorKind::Other("DbErr".into()), "write rejected");
    let err: ResolutionError = store.clone().into();
    assert_eq!(err, ResolutionError::PersistenceFailure(store));

    let missing = DomainError::not_found(NotFoundKind::Player, "no player");
    let err: ResolutionError = missing.clone().into();
    assert_eq!(err, ResolutionError::Domain(missing));
}

#[test]
fn maps_resolution_errors() {
    let conflict: AppError =
        ResolutionError::ConcurrentResolutionConflict(Subject::PlayerBids(7)).into();
    assert_eq!(conflict.code(), ErrorCode::ResolutionConflict);
    assert_eq!(conflict.status().as_u16(), 409);

    let missing: AppError = ResolutionError::NoPriorityRecord { team_id: 3 }.into();
    assert_eq!(missing.code(), ErrorCode::DataCorruption);
    assert_eq!(missing.status().as_u16(), 500);

    let empty: AppError = ResolutionError::EmptyGroup(Subject::Waiver(2)).into();
    assert_eq!(empty.status().as_u16(), 404);
}
