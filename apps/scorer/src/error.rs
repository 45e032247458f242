use thiserror::Error;

use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::errors::ErrorCode;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Inconsistent state: {detail}")]
    InconsistentState { detail: String },
    #[error("Internal error: {detail}")]
    Internal { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Error code for any variant
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::InconsistentState { .. } => ErrorCode::InconsistentState,
            AppError::Internal { code, .. } => *code,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Human-readable detail for any variant
    pub fn detail(&self) -> &str {
        match self {
            AppError::Validation { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::InconsistentState { detail }
            | AppError::Internal { detail, .. }
            | AppError::Config { detail } => detail,
        }
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            code: ErrorCode::Internal,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    /// True when the game must stop accepting writes until reconciled.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::InconsistentState { .. })
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(kind, detail) => {
                let code = match kind {
                    ValidationKind::ScoreOutOfRange => ErrorCode::ScoreOutOfRange,
                    ValidationKind::UnknownSegment => ErrorCode::UnknownSegment,
                    ValidationKind::MalformedInput => ErrorCode::MalformedInput,
                    ValidationKind::OutOfTurn => ErrorCode::OutOfTurn,
                    ValidationKind::GameCompleted => ErrorCode::GameCompleted,
                    ValidationKind::VariantMismatch => ErrorCode::VariantMismatch,
                    ValidationKind::MarkCapExceeded => ErrorCode::MarkCapExceeded,
                    ValidationKind::OrderLocked => ErrorCode::OrderLocked,
                    ValidationKind::InvalidRoster => ErrorCode::InvalidRoster,
                    ValidationKind::InvalidConfig => ErrorCode::InvalidGameConfig,
                    _ => ErrorCode::ValidationError,
                };
                AppError::invalid(code, detail)
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Game => ErrorCode::GameNotFound,
                    NotFoundKind::Match => ErrorCode::MatchNotFound,
                    _ => ErrorCode::NotFound,
                };
                AppError::not_found(code, detail)
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::TurnNumberTaken => ErrorCode::TurnNumberTaken,
                    ConflictKind::StaleUndo => ErrorCode::StaleUndo,
                    ConflictKind::DuplicateGameNumber => ErrorCode::DuplicateGameNumber,
                    _ => ErrorCode::Conflict,
                };
                AppError::conflict(code, detail)
            }
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::InconsistentState => AppError::InconsistentState { detail },
                InfraErrorKind::DataCorruption => AppError::Internal {
                    code: ErrorCode::DataCorruption,
                    detail,
                },
                _ => AppError::internal(detail),
            },
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Internal {
            code: ErrorCode::DataCorruption,
            detail: format!("json error: {e}"),
        }
    }
}
