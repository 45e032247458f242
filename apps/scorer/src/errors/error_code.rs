//! Error codes surfaced to collaborators.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE.

use core::fmt;

/// Centralized error codes for the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Input validation
    /// Turn total out of range or unreachable
    ScoreOutOfRange,
    /// Segment not valid for this game
    UnknownSegment,
    /// Malformed turn input
    MalformedInput,
    /// Player or side out of turn
    OutOfTurn,
    /// Game already completed
    GameCompleted,
    /// Input does not match the game's variant
    VariantMismatch,
    /// Mark cap exceeded
    MarkCapExceeded,
    /// Throw order is locked
    OrderLocked,
    /// Invalid roster
    InvalidRoster,
    /// Invalid game settings
    InvalidGameConfig,
    /// General validation error
    ValidationError,

    // Resource Not Found
    /// Game not found
    GameNotFound,
    /// Match not found
    MatchNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Turn number already taken by a concurrent writer
    TurnNumberTaken,
    /// Undo raced with another write
    StaleUndo,
    /// Game number already used in the match
    DuplicateGameNumber,
    /// Generic conflict
    Conflict,

    // System Errors
    /// Derived state disagrees with turn history; writes halted
    InconsistentState,
    /// Stored data could not be decoded
    DataCorruption,
    /// Internal error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ScoreOutOfRange => "SCORE_OUT_OF_RANGE",
            Self::UnknownSegment => "UNKNOWN_SEGMENT",
            Self::MalformedInput => "MALFORMED_INPUT",
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::GameCompleted => "GAME_COMPLETED",
            Self::VariantMismatch => "VARIANT_MISMATCH",
            Self::MarkCapExceeded => "MARK_CAP_EXCEEDED",
            Self::OrderLocked => "ORDER_LOCKED",
            Self::InvalidRoster => "INVALID_ROSTER",
            Self::InvalidGameConfig => "INVALID_GAME_CONFIG",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::MatchNotFound => "MATCH_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::TurnNumberTaken => "TURN_NUMBER_TAKEN",
            Self::StaleUndo => "STALE_UNDO",
            Self::DuplicateGameNumber => "DUPLICATE_GAME_NUMBER",
            Self::Conflict => "CONFLICT",

            Self::InconsistentState => "INCONSISTENT_STATE",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
