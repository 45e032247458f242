//! Storage contract consumed by the game flow service.

pub mod games;
pub mod turns;

use async_trait::async_trait;

use crate::domain::marks::MarkBoard;
use crate::domain::roster::{GameId, MatchId, Roster, SideId};
use crate::domain::state::GameStatus;
use crate::domain::turn::TurnRecord;
use crate::domain::turn_order::ThrowOrder;
use crate::errors::domain::{DomainError, NotFoundKind};
use games::{Game, NewGame};
use turns::Turn;

#[async_trait]
pub trait GameStore: Send + Sync {
    /// Fails with `ConflictKind::DuplicateGameNumber` when the match already
    /// holds that game number.
    async fn create_game(&self, new: NewGame) -> Result<Game, DomainError>;

    async fn find_game(&self, game_id: GameId) -> Result<Option<Game>, DomainError>;

    async fn require_game(&self, game_id: GameId) -> Result<Game, DomainError> {
        self.find_game(game_id).await?.ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Game, format!("game {game_id} not found"))
        })
    }

    /// Games of a match ordered by game number.
    async fn games_for_match(&self, match_id: MatchId) -> Result<Vec<Game>, DomainError>;

    async fn roster(&self, game_id: GameId) -> Result<Roster, DomainError>;

    async fn set_throw_order(&self, game_id: GameId, order: ThrowOrder)
        -> Result<(), DomainError>;

    /// Turns in turn-number order.
    async fn list_turns(&self, game_id: GameId) -> Result<Vec<Turn>, DomainError>;

    /// Insert `record` and, for mark-board games, replace the cached board,
    /// both or neither. Fails with `TurnNumberTaken` unless
    /// `record.turn_number` is exactly one past the stored count.
    async fn append_turn(
        &self,
        game_id: GameId,
        record: TurnRecord,
        board: Option<MarkBoard>,
    ) -> Result<Turn, DomainError>;

    /// Delete turn `turn_number`, which must be the latest, and replace the
    /// cached board in the same step. Fails with `StaleUndo` otherwise.
    async fn delete_last_turn(
        &self,
        game_id: GameId,
        turn_number: u32,
        board: Option<MarkBoard>,
    ) -> Result<Turn, DomainError>;

    async fn mark_board(&self, game_id: GameId) -> Result<Option<MarkBoard>, DomainError>;

    async fn replace_mark_board(&self, game_id: GameId, board: MarkBoard)
        -> Result<(), DomainError>;

    async fn set_status(
        &self,
        game_id: GameId,
        status: GameStatus,
        winner: Option<SideId>,
    ) -> Result<(), DomainError>;

    async fn set_halted(&self, game_id: GameId, reason: Option<String>)
        -> Result<(), DomainError>;
}
