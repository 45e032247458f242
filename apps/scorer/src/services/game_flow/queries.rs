use tracing::debug;

use super::{GameExport, GameFlowService};
use crate::domain::match_result::{tally, GameResult, MatchOutcome};
use crate::domain::roster::{GameId, MatchId};
use crate::domain::state::DerivedState;
use crate::domain::stats::{player_stats, PlayerStats};
use crate::domain::turn_order::{resolve, ThrowOrder, Thrower};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::turns::records;
use crate::repos::GameStore;

impl<S: GameStore> GameFlowService<S> {
    /// Who throws next and in which round; `None` once the game is won.
    pub async fn current_thrower(&self, game_id: GameId) -> Result<Option<Thrower>, AppError> {
        let ctx = self.load(game_id).await?;
        if ctx.state.winner.is_some() {
            return Ok(None);
        }
        let order = self.effective_order(&ctx.game, &ctx.roster).await?;
        Ok(Some(resolve(&ctx.roster, &order, ctx.state.turns)?))
    }

    pub async fn throw_order(&self, game_id: GameId) -> Result<ThrowOrder, AppError> {
        let ctx = self.load(game_id).await?;
        self.effective_order(&ctx.game, &ctx.roster).await
    }

    /// Per-side remaining/marks/points, rebuilt from history.
    pub async fn derived_state(&self, game_id: GameId) -> Result<DerivedState, AppError> {
        let ctx = self.load(game_id).await?;
        Ok(ctx.state.view(&ctx.game.variant, &ctx.roster))
    }

    pub async fn player_stats(&self, game_id: GameId) -> Result<Vec<PlayerStats>, AppError> {
        let ctx = self.load(game_id).await?;
        Ok(player_stats(&ctx.roster, &records(&ctx.turns)))
    }

    pub async fn match_outcome(&self, match_id: MatchId) -> Result<MatchOutcome, AppError> {
        debug!(match_id, "Tallying match");
        let games = self.store.games_for_match(match_id).await?;
        let first = games.first().ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Match, format!("match {match_id} has no games"))
        })?;
        let roster = self.store.roster(first.id).await?;
        let results: Vec<GameResult> = games
            .iter()
            .map(|g| GameResult {
                game_number: g.game_number,
                status: g.status,
                winner: g.winner,
            })
            .collect();
        Ok(tally(first.match_kind, roster.home, roster.away, &results))
    }

    /// Snapshot of a game as stored, for offline replay.
    pub async fn export(&self, game_id: GameId) -> Result<GameExport, AppError> {
        let game = self.store.require_game(game_id).await?;
        Ok(GameExport {
            roster: self.store.roster(game_id).await?,
            turns: self.store.list_turns(game_id).await?,
            mark_board: self.store.mark_board(game_id).await?,
            game,
        })
    }
}
