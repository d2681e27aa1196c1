// Unit tests for error mapping: domain kinds to wire codes and frames
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::errors::ErrorCode;
use crate::ws::protocol::ServerMsg;
use crate::AppError;

#[test]
fn validation_kinds_map_to_codes() {
    let cases = [
        (ValidationKind::OutOfTurn, ErrorCode::OutOfTurn),
        (ValidationKind::InvalidPhase, ErrorCode::InvalidPhase),
        (ValidationKind::InvalidPrediction, ErrorCode::InvalidPrediction),
        (ValidationKind::InvalidCardIndex, ErrorCode::InvalidCardIndex),
        (ValidationKind::MustFollowSuit, ErrorCode::MustFollowSuit),
        (ValidationKind::InvalidPlayerCount, ErrorCode::InvalidPlayerCount),
        (ValidationKind::InvalidName, ErrorCode::InvalidName),
    ];
    for (kind, code) in cases {
        assert_eq!(DomainError::validation(kind, "x").code(), code);
    }
    assert_eq!(
        DomainError::validation_other("odd").code(),
        ErrorCode::ValidationError
    );
}

#[test]
fn room_errors_map_to_codes() {
    assert_eq!(
        DomainError::not_found(NotFoundKind::Room, "no room").code(),
        ErrorCode::RoomNotFound
    );
    assert_eq!(
        DomainError::not_found(NotFoundKind::Player, "not here").code(),
        ErrorCode::NotInRoom
    );
    assert_eq!(
        DomainError::conflict(ConflictKind::RoomFull, "full").code(),
        ErrorCode::RoomFull
    );
    assert_eq!(
        DomainError::conflict(ConflictKind::GameInProgress, "busy").code(),
        ErrorCode::GameInProgress
    );
    assert_eq!(DomainError::forbidden("host only").code(), ErrorCode::NotHost);
}

#[test]
fn exhausted_codes_are_internal() {
    let app: AppError =
        DomainError::conflict(ConflictKind::RoomCodeExhausted, "no free code").into();
    assert_eq!(app.code(), ErrorCode::Internal);
}

#[test]
fn detail_is_the_human_message() {
    let err = DomainError::validation(ValidationKind::OutOfTurn, "Not your turn");
    assert_eq!(err.detail(), "Not your turn");
    assert!(err.to_string().contains("Not your turn"));
}

#[test]
fn rejection_frame_carries_code_and_message() {
    let app: AppError = DomainError::validation(ValidationKind::OutOfTurn, "Not your turn").into();
    let frame = ServerMsg::ActionRejected {
        code: app.code(),
        message: app.client_message(),
    };
    let json = serde_json::to_value(&frame).unwrap();
    assert_eq!(json["type"], "action_rejected");
    assert_eq!(json["code"], "OUT_OF_TURN");
    assert_eq!(json["message"], "Not your turn");
}
