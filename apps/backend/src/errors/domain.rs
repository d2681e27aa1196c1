//! Domain-level error type used by the game engine and the room layer.
//!
//! This error type is transport-agnostic. The service layer converts it into
//! `crate::error::AppError` via the provided `From<DomainError>` impl, and
//! the websocket layer turns that into an `error` / `action_rejected` frame.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::errors::ErrorCode;

/// Validation failures: the intent was well-formed but not legal right now.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    OutOfTurn,
    InvalidPhase,
    InvalidPrediction,
    InvalidCardIndex,
    MustFollowSuit,
    InvalidPlayerCount,
    InvalidName,
    ParseCard,
    Other(String),
}

/// Missing resources in domain terms.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Room,
    Player,
}

/// Conflicts with the current state of a room.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    RoomFull,
    GameInProgress,
    RoomCodeExhausted,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Business rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict with room state
    Conflict(ConflictKind, String),
    /// Missing resource
    NotFound(NotFoundKind, String),
    /// Caller lacks the role for this operation (e.g. not the host)
    Forbidden(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Forbidden(d) => write!(f, "forbidden: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::Forbidden(detail.into())
    }

    /// Human-readable detail, suitable for sending to the client.
    pub fn detail(&self) -> &str {
        match self {
            DomainError::Validation(_, d)
            | DomainError::Conflict(_, d)
            | DomainError::NotFound(_, d)
            | DomainError::Forbidden(d) => d,
        }
    }

    /// Stable wire code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Validation(kind, _) => match kind {
                ValidationKind::OutOfTurn => ErrorCode::OutOfTurn,
                ValidationKind::InvalidPhase => ErrorCode::InvalidPhase,
                ValidationKind::InvalidPrediction => ErrorCode::InvalidPrediction,
                ValidationKind::InvalidCardIndex => ErrorCode::InvalidCardIndex,
                ValidationKind::MustFollowSuit => ErrorCode::MustFollowSuit,
                ValidationKind::InvalidPlayerCount => ErrorCode::InvalidPlayerCount,
                ValidationKind::InvalidName => ErrorCode::InvalidName,
                ValidationKind::ParseCard => ErrorCode::ParseCard,
                ValidationKind::Other(_) => ErrorCode::ValidationError,
            },
            DomainError::Conflict(kind, _) => match kind {
                ConflictKind::RoomFull => ErrorCode::RoomFull,
                ConflictKind::GameInProgress => ErrorCode::GameInProgress,
                ConflictKind::RoomCodeExhausted => ErrorCode::Internal,
            },
            DomainError::NotFound(kind, _) => match kind {
                NotFoundKind::Room => ErrorCode::RoomNotFound,
                NotFoundKind::Player => ErrorCode::NotInRoom,
            },
            DomainError::Forbidden(_) => ErrorCode::NotHost,
        }
    }
}
