//! Domain-level error type used across the engine, services and adapters.
//!
//! This error type is storage-agnostic. Services return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.
//!
//! A bust is not an error: it is a valid zero-scoring turn.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Validation kinds. Every validation failure is raised before any state
/// is mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Turn total outside 0..=180, or a total no dart combination produces.
    ScoreOutOfRange,
    /// Segment not on the board, or not played in this variant.
    UnknownSegment,
    /// Structurally invalid input (no darts, too many darts, stray fields).
    MalformedInput,
    /// Player or side is not the one expected to throw.
    OutOfTurn,
    /// The game already has a winner.
    GameCompleted,
    /// Input shape does not belong to the game's variant.
    VariantMismatch,
    /// Too many marks for the turn or for a segment the opponent closed.
    MarkCapExceeded,
    /// Throw order can no longer change because turns exist.
    OrderLocked,
    /// Roster does not describe two sides of 1..=4 distinct players.
    InvalidRoster,
    /// Game settings out of range.
    InvalidConfig,
    Other(String),
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    /// Cached mark board or derived state disagrees with the turn history.
    InconsistentState,
    DataCorruption,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
    Match,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// Another writer appended a turn with the same number first.
    TurnNumberTaken,
    /// The turn being removed is no longer the most recent one.
    StaleUndo,
    /// The match already has a game with this number.
    DuplicateGameNumber,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }
    pub fn inconsistent(detail: impl Into<String>) -> Self {
        Self::Infra(InfraErrorKind::InconsistentState, detail.into())
    }

    pub fn is_inconsistent_state(&self) -> bool {
        matches!(self, DomainError::Infra(InfraErrorKind::InconsistentState, _))
    }
}
