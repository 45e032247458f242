use tracing::{debug, info};

use super::{GameFlowService, SubmitOutcome};
use crate::domain::roster::{GameId, PlayerId, SideId};
use crate::domain::turn::{Actor, TurnDetails, TurnInput};
use crate::domain::turn_order::resolve;
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::GameStore;

impl<S: GameStore> GameFlowService<S> {
    /// Score and record one turn for the player due to throw.
    ///
    /// Validation happens before anything is written. A bust is a normal
    /// outcome and is recorded with a zero score.
    pub async fn submit_turn(
        &self,
        game_id: GameId,
        player_id: PlayerId,
        side_id: SideId,
        input: TurnInput,
    ) -> Result<SubmitOutcome, AppError> {
        let _guard = self.lock_game(game_id).await;
        debug!(game_id, player_id, side_id, "Submitting turn");

        let mut ctx = self.load(game_id).await?;
        if ctx.state.winner.is_some() {
            return Err(DomainError::validation(
                ValidationKind::GameCompleted,
                format!("game {game_id} is already complete"),
            )
            .into());
        }

        let order = self.effective_order(&ctx.game, &ctx.roster).await?;
        let due = resolve(&ctx.roster, &order, ctx.state.turns)?;
        if due.player_id != player_id || due.side_id != side_id {
            return Err(DomainError::validation(
                ValidationKind::OutOfTurn,
                format!(
                    "player {} of side {} is due to throw, not player {player_id}",
                    due.player_id, due.side_id
                ),
            )
            .into());
        }

        let actor = Actor {
            player_id,
            side_id,
        };
        let effect = ctx
            .state
            .evaluate(&ctx.game.variant, &ctx.roster, &actor, &input)?;
        let record = ctx.state.record_for(&ctx.roster, &actor, &effect);
        let won = ctx
            .state
            .apply(&ctx.game.variant, &ctx.roster, &actor, &effect.details)?;

        if ctx.turns.is_empty() && ctx.game.throw_order.is_none() {
            self.store.set_throw_order(game_id, order.clone()).await?;
        }
        let turn = self
            .store
            .append_turn(game_id, record, ctx.state.mark_board().copied())
            .await?;

        let status = ctx.state.status();
        if status != ctx.game.status || ctx.state.winner != ctx.game.winner {
            self.store
                .set_status(game_id, status, ctx.state.winner)
                .await?;
        }

        let bust = match &effect.details {
            TurnDetails::X01(f) => f.bust,
            _ => None,
        };
        if let Some(reason) = bust {
            info!(game_id, player_id, turn_number = turn.record.turn_number, ?reason, "Bust");
        }
        if let Some(tier) = effect.all_star {
            info!(game_id, player_id, ?tier, "All-star turn");
        }
        if let Some(winner) = won {
            info!(game_id, winning_side = winner, "Game won");
        }

        let next = if ctx.state.winner.is_some() {
            None
        } else {
            Some(resolve(&ctx.roster, &order, ctx.state.turns)?)
        };

        Ok(SubmitOutcome {
            turn,
            bust,
            win: won.is_some(),
            winner: won,
            all_star: effect.all_star,
            next,
        })
    }
}
