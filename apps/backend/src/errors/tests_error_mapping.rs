// Unit tests for error mapping - pure domain logic without HTTP or database dependencies
use actix_web::ResponseError;

use crate::domain::{PileId, Rejection, Rule};
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_to_422() {
    let de = DomainError::validation(ValidationKind::Other("VALIDATION_ERROR".into()), "bad field");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
    assert_eq!(app.status().as_u16(), 422);

    let parse = DomainError::validation(ValidationKind::ParseCard, "Parse card: ZZ");
    let app: AppError = parse.into();
    assert_eq!(app.code(), ErrorCode::ParseCard);
    assert_eq!(app.status().as_u16(), 400);

    let table = DomainError::validation(ValidationKind::InvalidTable, "duplicate card");
    let app: AppError = table.into();
    assert_eq!(app.status().as_u16(), 422);
}

#[test]
fn maps_rejections() {
    let illegal = Rejection::Illegal {
        rule: Rule::DifferentColor,
        reason: "colors must alternate",
    };
    let app: AppError = illegal.into();
    assert_eq!(app.code(), ErrorCode::IllegalMove);
    assert_eq!(app.status().as_u16(), 400);

    let missing = Rejection::CardNotInSource {
        card: "AS".parse().unwrap(),
        source: PileId::Waste,
    };
    let app: AppError = missing.into();
    assert_eq!(app.code(), ErrorCode::CardNotInPile);
    assert_eq!(app.status().as_u16(), 400);
    assert!(app.to_string().contains("AS"));
}

#[test]
fn maps_constraint_violations() {
    let fk = DomainError::validation(ValidationKind::Other("FK_VIOLATION".into()), "fk");
    let app: AppError = fk.into();
    assert_eq!(app.code(), ErrorCode::FkViolation);
    assert_eq!(app.status().as_u16(), 422);
}

#[test]
fn maps_conflicts() {
    let lock = DomainError::conflict(ConflictKind::OptimisticLock, "stale");
    let app: AppError = lock.into();
    assert_eq!(app.code().as_str(), "OPTIMISTIC_LOCK");
    assert_eq!(app.status().as_u16(), 409);

    let finished = DomainError::conflict(ConflictKind::GameFinished, "won");
    let app: AppError = finished.into();
    assert_eq!(app.code().as_str(), "GAME_FINISHED");

    let other = DomainError::conflict(ConflictKind::Other("x".to_string()), "generic conflict");
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "CONFLICT");
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn maps_not_found() {
    let nf = DomainError::not_found(NotFoundKind::Game, "no game");
    let app: AppError = nf.into();
    assert_eq!(app.code().as_str(), "GAME_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);
}

#[test]
fn maps_infra() {
    let t = DomainError::infra(InfraErrorKind::Timeout, "timeout");
    let app: AppError = t.into();
    assert_eq!(app.code().as_str(), "DB_TIMEOUT");
    assert_eq!(app.status().as_u16(), 504);
    assert!(matches!(app, AppError::Timeout { .. }));

    let down = DomainError::infra(InfraErrorKind::DbUnavailable, "down");
    let app: AppError = down.into();
    assert_eq!(app.code().as_str(), "DB_UNAVAILABLE");
    assert_eq!(app.status().as_u16(), 503);
    let resp = app.error_response();
    assert!(resp.headers().contains_key("retry-after"));

    let corr = DomainError::infra(InfraErrorKind::DataCorruption, "bad");
    let app: AppError = corr.into();
    assert_eq!(app.code().as_str(), "DATA_CORRUPTION");
    assert_eq!(app.status().as_u16(), 500);

    let other = DomainError::infra(InfraErrorKind::Other("unknown".to_string()), "other");
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "INTERNAL_ERROR");
}

#[test]
fn unauthorized_carries_bearer_challenge() {
    let resp = AppError::unauthorized_invalid_jwt().error_response();
    assert_eq!(resp.status().as_u16(), 401);
    assert_eq!(resp.headers().get("www-authenticate").unwrap(), "Bearer");
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/problem+json"
    );
}
