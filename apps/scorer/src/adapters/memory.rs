//! In-memory implementation of GameStore.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use time::OffsetDateTime;

use crate::domain::marks::MarkBoard;
use crate::domain::roster::{GameId, MatchId, Roster, SideId};
use crate::domain::state::GameStatus;
use crate::domain::turn::TurnRecord;
use crate::domain::turn_order::ThrowOrder;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::games::{Game, NewGame};
use crate::repos::turns::Turn;
use crate::repos::GameStore;

#[derive(Debug, Clone)]
struct GameEntry {
    game: Game,
    roster: Roster,
    turns: Vec<Turn>,
    board: Option<MarkBoard>,
}

/// Each game lives behind one map entry, so every write to a game is atomic.
/// `match_slots` plays the unique (match, game number) index.
#[derive(Debug)]
pub struct MemoryStore {
    games: DashMap<GameId, GameEntry>,
    match_slots: DashMap<(MatchId, u32), GameId>,
    next_id: AtomicI64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            games: DashMap::new(),
            match_slots: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Load a game exported elsewhere, keeping its id, turns and cached board.
    pub fn import(
        &self,
        game: Game,
        roster: Roster,
        turns: Vec<Turn>,
        board: Option<MarkBoard>,
    ) {
        self.next_id.fetch_max(game.id + 1, Ordering::SeqCst);
        if let Some(match_id) = game.match_id {
            self.match_slots.insert((match_id, game.game_number), game.id);
        }
        self.games.insert(
            game.id,
            GameEntry {
                game,
                roster,
                turns,
                board,
            },
        );
    }

    fn missing(game_id: GameId) -> DomainError {
        DomainError::not_found(NotFoundKind::Game, format!("game {game_id} not found"))
    }

    fn with_entry<T>(
        &self,
        game_id: GameId,
        f: impl FnOnce(&mut GameEntry) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let mut entry = self
            .games
            .get_mut(&game_id)
            .ok_or_else(|| Self::missing(game_id))?;
        f(entry.value_mut())
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn create_game(&self, new: NewGame) -> Result<Game, DomainError> {
        let id = match new.match_id {
            Some(match_id) => match self.match_slots.entry((match_id, new.game_number)) {
                Entry::Occupied(_) => {
                    return Err(DomainError::conflict(
                        ConflictKind::DuplicateGameNumber,
                        format!("match {match_id} already has game {}", new.game_number),
                    ));
                }
                Entry::Vacant(slot) => *slot.insert(self.next_id.fetch_add(1, Ordering::SeqCst)),
            },
            None => self.next_id.fetch_add(1, Ordering::SeqCst),
        };
        let now = OffsetDateTime::now_utc();
        let board = new.variant.uses_mark_board().then(MarkBoard::default);
        let game = Game {
            id,
            match_id: new.match_id,
            game_number: new.game_number,
            match_kind: new.match_kind,
            variant: new.variant,
            throw_order: new.throw_order,
            status: GameStatus::NotStarted,
            winner: None,
            halted: None,
            created_at: now,
            updated_at: now,
        };
        self.games.insert(
            id,
            GameEntry {
                game: game.clone(),
                roster: new.roster,
                turns: Vec::new(),
                board,
            },
        );
        Ok(game)
    }

    async fn find_game(&self, game_id: GameId) -> Result<Option<Game>, DomainError> {
        Ok(self.games.get(&game_id).map(|e| e.game.clone()))
    }

    async fn games_for_match(&self, match_id: MatchId) -> Result<Vec<Game>, DomainError> {
        let mut games: Vec<Game> = self
            .games
            .iter()
            .filter(|e| e.game.match_id == Some(match_id))
            .map(|e| e.game.clone())
            .collect();
        games.sort_by_key(|g| g.game_number);
        Ok(games)
    }

    async fn roster(&self, game_id: GameId) -> Result<Roster, DomainError> {
        self.games
            .get(&game_id)
            .map(|e| e.roster.clone())
            .ok_or_else(|| Self::missing(game_id))
    }

    async fn set_throw_order(
        &self,
        game_id: GameId,
        order: ThrowOrder,
    ) -> Result<(), DomainError> {
        self.with_entry(game_id, |e| {
            e.game.throw_order = Some(order);
            e.game.updated_at = OffsetDateTime::now_utc();
            Ok(())
        })
    }

    async fn list_turns(&self, game_id: GameId) -> Result<Vec<Turn>, DomainError> {
        self.games
            .get(&game_id)
            .map(|e| e.turns.clone())
            .ok_or_else(|| Self::missing(game_id))
    }

    async fn append_turn(
        &self,
        game_id: GameId,
        record: TurnRecord,
        board: Option<MarkBoard>,
    ) -> Result<Turn, DomainError> {
        self.with_entry(game_id, |e| {
            let expected = e.turns.len() as u32 + 1;
            if record.turn_number != expected {
                return Err(DomainError::conflict(
                    ConflictKind::TurnNumberTaken,
                    format!(
                        "turn {} already recorded for game {game_id}; next is {expected}",
                        record.turn_number
                    ),
                ));
            }
            let turn = Turn {
                game_id,
                record,
                created_at: OffsetDateTime::now_utc(),
            };
            e.turns.push(turn.clone());
            if board.is_some() {
                e.board = board;
            }
            e.game.updated_at = turn.created_at;
            Ok(turn)
        })
    }

    async fn delete_last_turn(
        &self,
        game_id: GameId,
        turn_number: u32,
        board: Option<MarkBoard>,
    ) -> Result<Turn, DomainError> {
        self.with_entry(game_id, |e| {
            let latest = e.turns.last().map(|t| t.record.turn_number);
            if latest != Some(turn_number) {
                return Err(DomainError::conflict(
                    ConflictKind::StaleUndo,
                    format!("turn {turn_number} is no longer the latest in game {game_id}"),
                ));
            }
            let removed = e
                .turns
                .pop()
                .ok_or_else(|| DomainError::conflict(ConflictKind::StaleUndo, "no turns"))?;
            if board.is_some() {
                e.board = board;
            }
            e.game.updated_at = OffsetDateTime::now_utc();
            Ok(removed)
        })
    }

    async fn mark_board(&self, game_id: GameId) -> Result<Option<MarkBoard>, DomainError> {
        self.games
            .get(&game_id)
            .map(|e| e.board)
            .ok_or_else(|| Self::missing(game_id))
    }

    async fn replace_mark_board(
        &self,
        game_id: GameId,
        board: MarkBoard,
    ) -> Result<(), DomainError> {
        self.with_entry(game_id, |e| {
            e.board = Some(board);
            Ok(())
        })
    }

    async fn set_status(
        &self,
        game_id: GameId,
        status: GameStatus,
        winner: Option<SideId>,
    ) -> Result<(), DomainError> {
        self.with_entry(game_id, |e| {
            e.game.status = status;
            e.game.winner = winner;
            e.game.updated_at = OffsetDateTime::now_utc();
            Ok(())
        })
    }

    async fn set_halted(
        &self,
        game_id: GameId,
        reason: Option<String>,
    ) -> Result<(), DomainError> {
        self.with_entry(game_id, |e| {
            e.game.halted = reason;
            e.game.updated_at = OffsetDateTime::now_utc();
            Ok(())
        })
    }
}
