use tracing::{debug, info};

use super::{GameFlowService, NewGameRequest, VariantSetup};
use crate::domain::match_result::MatchKind;
use crate::domain::roster::{GameId, PlayerId, Roster};
use crate::domain::turn_order::{
    cork_order, natural_order, policy_for_game, rematch_order, validate_order, ThrowOrder,
};
use crate::domain::variant::{rtw_sequence, GameVariant, RtwMode};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::games::{Game, NewGame};
use crate::repos::GameStore;

impl<S: GameStore> GameFlowService<S> {
    /// Create a game with its roster. Round-the-World sequences are drawn
    /// here and never change afterwards.
    pub async fn create_game(&self, req: NewGameRequest) -> Result<Game, AppError> {
        debug!(match_id = ?req.match_id, game_number = req.game_number, "Creating game");

        if req.game_number == 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidConfig,
                "game numbers start at 1",
            )
            .into());
        }
        req.roster.validate()?;
        let variant = self.build_variant(&req.setup)?;
        variant.validate()?;

        // the store claims (match, game number) atomically with the insert
        let game = self
            .store
            .create_game(NewGame {
                match_id: req.match_id,
                game_number: req.game_number,
                match_kind: req.match_kind,
                variant,
                roster: req.roster,
                throw_order: None,
            })
            .await?;
        info!(game_id = game.id, variant = ?game.variant.kind(), "Game created");
        Ok(game)
    }

    fn build_variant(&self, setup: &VariantSetup) -> Result<GameVariant, AppError> {
        Ok(match setup {
            VariantSetup::X01 {
                target,
                double_in,
                double_out,
            } => GameVariant::X01 {
                target: target.unwrap_or(self.config.x01_target),
                double_in: *double_in,
                double_out: double_out.unwrap_or(self.config.double_out),
            },
            VariantSetup::Cricket => GameVariant::Cricket,
            VariantSetup::Shanghai => GameVariant::Shanghai,
            VariantSetup::RoundTheWorld { mode } => GameVariant::RoundTheWorld {
                mode: *mode,
                sequence: self.draw_sequence(*mode)?,
            },
        })
    }

    fn draw_sequence(&self, mode: RtwMode) -> Result<Vec<u8>, AppError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| AppError::internal("sequence generator lock poisoned"))?;
        Ok(rtw_sequence(mode, &mut *rng))
    }

    /// Fix the throw order from a cork: the winner throws first, then the
    /// chosen opponent. Only allowed before the first turn.
    pub async fn record_cork(
        &self,
        game_id: GameId,
        winner: PlayerId,
        second: Option<PlayerId>,
    ) -> Result<ThrowOrder, AppError> {
        let _guard = self.lock_game(game_id).await;
        debug!(game_id, winner, ?second, "Recording cork");

        let ctx = self.load(game_id).await?;
        if !ctx.turns.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::OrderLocked,
                "throw order cannot change once the game has turns",
            )
            .into());
        }
        let order = cork_order(&ctx.roster, winner, second)?;
        validate_order(&ctx.roster, &order)?;
        self.store.set_throw_order(game_id, order.clone()).await?;
        info!(game_id, order = ?order.players, "Cork recorded");
        Ok(order)
    }

    /// The order this game throws in: its frozen order if any, else the
    /// even-game policy applied to the previous game, else natural.
    pub(super) async fn effective_order(
        &self,
        game: &Game,
        roster: &Roster,
    ) -> Result<ThrowOrder, AppError> {
        if let Some(order) = &game.throw_order {
            return Ok(order.clone());
        }
        if let (Some(match_id), Some(policy)) = (game.match_id, policy_for_game(game.game_number))
        {
            let previous = self
                .store
                .games_for_match(match_id)
                .await?
                .into_iter()
                .find(|g| g.game_number + 1 == game.game_number);
            if let Some(prev_order) = previous.and_then(|g| g.throw_order) {
                return Ok(policy.derive(roster, &prev_order)?);
            }
        }
        Ok(natural_order(roster))
    }

    /// New ad-hoc game with the same settings and players; the losing side
    /// throws first.
    pub async fn create_rematch(&self, game_id: GameId) -> Result<Game, AppError> {
        let ctx = self.load(game_id).await?;
        let winner = ctx.state.winner.ok_or_else(|| {
            DomainError::validation(
                ValidationKind::Other("GAME_NOT_FINISHED".into()),
                "a rematch needs a finished game",
            )
        })?;
        let loser = ctx
            .roster
            .opponent_of(winner)
            .ok_or_else(|| DomainError::inconsistent("winner is not a side of this game"))?;

        let variant = match &ctx.game.variant {
            GameVariant::RoundTheWorld {
                mode: RtwMode::Random,
                ..
            } => GameVariant::RoundTheWorld {
                mode: RtwMode::Random,
                sequence: self.draw_sequence(RtwMode::Random)?,
            },
            other => other.clone(),
        };
        let order = rematch_order(&ctx.roster, loser)?;

        let game = self
            .store
            .create_game(NewGame {
                match_id: None,
                game_number: 1,
                match_kind: MatchKind::AdHoc,
                variant,
                roster: ctx.roster,
                throw_order: Some(order),
            })
            .await?;
        info!(game_id = game.id, from_game = game_id, loser, "Rematch created");
        Ok(game)
    }
}
