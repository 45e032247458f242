//! Game flow service: bridges the pure scoring engine with the game store.
//!
//! Every write to a game runs under that game's async mutex, and the store
//! additionally rejects a turn number that is not exactly next.

mod player_actions;
mod queries;
mod setup;
mod undo;

use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::config::engine::EngineConfig;
use crate::domain::all_star::AllStarTier;
use crate::domain::marks::MarkBoard;
use crate::domain::match_result::MatchKind;
use crate::domain::roster::{GameId, MatchId, Roster, SideId};
use crate::domain::state::{replay, GameState, GameStatus};
use crate::domain::turn_order::Thrower;
use crate::domain::variant::{sequence_rng, RtwMode};
use crate::domain::x01::BustReason;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::repos::games::Game;
use crate::repos::turns::{records, Turn};
use crate::repos::GameStore;

/// How a new game's variant is configured; unset fields take engine defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VariantSetup {
    X01 {
        #[serde(default)]
        target: Option<u16>,
        #[serde(default)]
        double_in: bool,
        #[serde(default)]
        double_out: Option<bool>,
    },
    Cricket,
    Shanghai,
    RoundTheWorld {
        mode: RtwMode,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameRequest {
    #[serde(default)]
    pub match_id: Option<MatchId>,
    pub game_number: u32,
    pub match_kind: MatchKind,
    pub setup: VariantSetup,
    pub roster: Roster,
}

/// Result of a submitted turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitOutcome {
    pub turn: Turn,
    pub bust: Option<BustReason>,
    pub win: bool,
    pub winner: Option<SideId>,
    pub all_star: Option<AllStarTier>,
    /// `None` once the game is over.
    pub next: Option<Thrower>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UndoOutcome {
    NothingToUndo,
    Undone { turn: Turn, status: GameStatus },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub board_repaired: bool,
    pub status_repaired: bool,
    pub status: GameStatus,
}

/// A whole game as exported for offline replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameExport {
    pub game: Game,
    pub roster: Roster,
    pub turns: Vec<Turn>,
    #[serde(default)]
    pub mark_board: Option<MarkBoard>,
}

/// Loaded and verified game.
pub(super) struct GameContext {
    pub game: Game,
    pub roster: Roster,
    pub turns: Vec<Turn>,
    pub state: GameState,
}

type GameLocks = DashMap<GameId, Arc<tokio::sync::Mutex<()>>>;

/// Exclusive write access to one game. Dropping it releases the mutex and
/// removes the map entry unless another caller still holds a handle.
pub(super) struct GameGuard<'a> {
    locks: &'a GameLocks,
    game_id: GameId,
    guard: Option<tokio::sync::OwnedMutexGuard<()>>,
}

impl Drop for GameGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();
        self.locks
            .remove_if(&self.game_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

pub struct GameFlowService<S: GameStore> {
    store: Arc<S>,
    config: EngineConfig,
    locks: GameLocks,
    rng: Mutex<ChaCha8Rng>,
}

impl<S: GameStore> GameFlowService<S> {
    pub fn new(store: Arc<S>, config: EngineConfig) -> Self {
        let rng = Mutex::new(sequence_rng(config.rtw_seed));
        Self {
            store,
            config,
            locks: DashMap::new(),
            rng,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Wait for exclusive write access to a game.
    pub(super) async fn lock_game(&self, game_id: GameId) -> GameGuard<'_> {
        let lock = self.locks.entry(game_id).or_default().clone();
        GameGuard {
            locks: &self.locks,
            game_id,
            guard: Some(lock.lock_owned().await),
        }
    }

    /// Load a game and rebuild its state from history, checking the cached
    /// mark board against the replay. Any disagreement halts the game.
    pub(super) async fn load(&self, game_id: GameId) -> Result<GameContext, AppError> {
        let game = self.store.require_game(game_id).await?;
        if let Some(reason) = &game.halted {
            return Err(AppError::InconsistentState {
                detail: format!("game {game_id} is halted pending reconciliation: {reason}"),
            });
        }
        let roster = self.store.roster(game_id).await?;
        let turns = self.store.list_turns(game_id).await?;

        let state = match replay(&game.variant, &roster, &records(&turns)) {
            Ok(state) => state,
            Err(e) => return Err(self.halt(game_id, e).await),
        };

        if game.variant.uses_mark_board() {
            let cached = self.store.mark_board(game_id).await?;
            if cached.as_ref() != state.mark_board() {
                let err = DomainError::inconsistent(format!(
                    "cached mark board for game {game_id} disagrees with {} replayed turns",
                    turns.len()
                ));
                return Err(self.halt(game_id, err).await);
            }
        }

        let mut game = game;
        if game.status != state.status() || game.winner != state.winner {
            warn!(
                game_id,
                stored = ?game.status,
                derived = ?state.status(),
                "Stored game status drifted from history; correcting"
            );
            self.store
                .set_status(game_id, state.status(), state.winner)
                .await?;
            game.status = state.status();
            game.winner = state.winner;
        }

        Ok(GameContext {
            game,
            roster,
            turns,
            state,
        })
    }

    /// Flag the game so no further writes are accepted, and hand back the
    /// error to surface.
    pub(super) async fn halt(&self, game_id: GameId, err: DomainError) -> AppError {
        error!(game_id, error = %err, "Game halted: state does not match turn history");
        if let Err(e) = self.store.set_halted(game_id, Some(err.to_string())).await {
            error!(game_id, error = %e, "Failed to record halt");
        }
        AppError::from(err)
    }
}
