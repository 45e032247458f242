use tracing::{debug, info, warn};

use super::{GameFlowService, ReconcileReport, UndoOutcome};
use crate::domain::roster::GameId;
use crate::domain::state::replay;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::repos::turns::records;
use crate::repos::GameStore;

impl<S: GameStore> GameFlowService<S> {
    /// Remove the most recent turn, rolling the state back by the deltas
    /// that turn recorded. The rollback is cross-checked against a replay of
    /// the remaining history before anything is written.
    pub async fn undo_last_turn(&self, game_id: GameId) -> Result<UndoOutcome, AppError> {
        let _guard = self.lock_game(game_id).await;
        debug!(game_id, "Undoing last turn");

        let mut ctx = self.load(game_id).await?;
        let Some(last) = ctx.turns.last().cloned() else {
            debug!(game_id, "Nothing to undo");
            return Ok(UndoOutcome::NothingToUndo);
        };

        if let Err(e) = ctx.state.revert(&ctx.roster, &last.record) {
            return Err(self.halt(game_id, e).await);
        }
        let remaining = records(&ctx.turns[..ctx.turns.len() - 1]);
        match replay(&ctx.game.variant, &ctx.roster, &remaining) {
            Ok(expected) if expected == ctx.state => {}
            Ok(_) => {
                let err = DomainError::inconsistent(format!(
                    "rolling back turn {} diverges from replaying the earlier turns",
                    last.record.turn_number
                ));
                return Err(self.halt(game_id, err).await);
            }
            Err(e) => return Err(self.halt(game_id, e).await),
        }

        let removed = self
            .store
            .delete_last_turn(
                game_id,
                last.record.turn_number,
                ctx.state.mark_board().copied(),
            )
            .await?;

        let status = ctx.state.status();
        if status != ctx.game.status || ctx.state.winner != ctx.game.winner {
            self.store
                .set_status(game_id, status, ctx.state.winner)
                .await?;
        }
        info!(
            game_id,
            turn_number = removed.record.turn_number,
            ?status,
            "Turn undone"
        );
        Ok(UndoOutcome::Undone {
            turn: removed,
            status,
        })
    }

    /// Rebuild the cached board and status from history and lift a halt.
    /// Fails when the history itself no longer replays.
    pub async fn reconcile(&self, game_id: GameId) -> Result<ReconcileReport, AppError> {
        let _guard = self.lock_game(game_id).await;
        debug!(game_id, "Reconciling game");

        let game = self.store.require_game(game_id).await?;
        let roster = self.store.roster(game_id).await?;
        let turns = self.store.list_turns(game_id).await?;
        let state = replay(&game.variant, &roster, &records(&turns))?;

        let mut board_repaired = false;
        if let Some(derived) = state.mark_board() {
            let cached = self.store.mark_board(game_id).await?;
            if cached.as_ref() != Some(derived) {
                warn!(game_id, "Replacing cached mark board with replayed board");
                self.store.replace_mark_board(game_id, *derived).await?;
                board_repaired = true;
            }
        }

        let status = state.status();
        let status_repaired = game.status != status || game.winner != state.winner;
        if status_repaired {
            self.store.set_status(game_id, status, state.winner).await?;
        }
        if game.is_halted() {
            self.store.set_halted(game_id, None).await?;
        }
        info!(game_id, board_repaired, status_repaired, "Game reconciled");
        Ok(ReconcileReport {
            board_repaired,
            status_repaired,
            status,
        })
    }
}
