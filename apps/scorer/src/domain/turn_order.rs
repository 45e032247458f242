//! Who throws next: natural alternation, cork ceremonies and the even-game
//! rematch convention.

use serde::{Deserialize, Serialize};

use crate::domain::roster::{PlayerId, Roster, SideId};
use crate::errors::domain::{DomainError, ValidationKind};

/// How a game's throw order came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSource {
    Natural,
    Cork,
    AutoRematch,
}

/// Full rotation of players for a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrowOrder {
    pub players: Vec<PlayerId>,
    pub source: OrderSource,
}

impl ThrowOrder {
    pub fn first(&self) -> Option<PlayerId> {
        self.players.first().copied()
    }
}

/// Rules for deriving an order from the previous game of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderPolicy {
    /// The side that did not throw first last game opens; both sides run
    /// their players in descending roster order.
    LoserFirstReversed,
}

impl OrderPolicy {
    pub fn derive(self, roster: &Roster, previous: &ThrowOrder) -> Result<ThrowOrder, DomainError> {
        match self {
            OrderPolicy::LoserFirstReversed => {
                let prev_first = previous
                    .first()
                    .ok_or_else(|| invalid("previous game has an empty throw order"))?;
                let opener_side = roster
                    .player(prev_first)
                    .map(|p| p.side_id)
                    .ok_or_else(|| {
                        invalid(format!(
                            "previous opener {prev_first} is not on this roster"
                        ))
                    })?;
                let other = roster
                    .opponent_of(opener_side)
                    .ok_or_else(|| invalid("previous opener has no opponent"))?;
                let mut losing = roster.side_players(other);
                let mut winning = roster.side_players(opener_side);
                losing.reverse();
                winning.reverse();
                Ok(ThrowOrder {
                    players: interleave(&losing, &winning),
                    source: OrderSource::AutoRematch,
                })
            }
        }
    }
}

/// Whether game `game_number` of a match expects a fresh cork or a derived
/// order.
pub fn policy_for_game(game_number: u32) -> Option<OrderPolicy> {
    if game_number >= 2 && game_number % 2 == 0 {
        Some(OrderPolicy::LoserFirstReversed)
    } else {
        None
    }
}

/// Home[0], Away[0], Home[1], Away[1], ...
pub fn natural_order(roster: &Roster) -> ThrowOrder {
    ThrowOrder {
        players: interleave(
            &roster.side_players(roster.home),
            &roster.side_players(roster.away),
        ),
        source: OrderSource::Natural,
    }
}

/// Order after a cork: winner, chosen opponent, then the remaining players
/// alternating sides in roster order.
pub fn cork_order(
    roster: &Roster,
    winner: PlayerId,
    second: Option<PlayerId>,
) -> Result<ThrowOrder, DomainError> {
    let winner_side = roster
        .player(winner)
        .map(|p| p.side_id)
        .ok_or_else(|| invalid(format!("cork winner {winner} is not in this game")))?;
    let other_side = roster
        .opponent_of(winner_side)
        .ok_or_else(|| invalid("cork winner has no opponent"))?;
    let opponents = roster.side_players(other_side);

    let second = match second {
        Some(id) => {
            if !opponents.contains(&id) {
                return Err(invalid(format!(
                    "second thrower {id} must be on the opposing side"
                )));
            }
            id
        }
        None => *opponents
            .first()
            .ok_or_else(|| invalid("opposing side has no players"))?,
    };

    let mut mine: Vec<PlayerId> = roster.side_players(winner_side);
    mine.retain(|p| *p != winner);
    let mut theirs = opponents;
    theirs.retain(|p| *p != second);

    let mut players = vec![winner, second];
    players.extend(interleave(&mine, &theirs));
    Ok(ThrowOrder {
        players,
        source: OrderSource::Cork,
    })
}

/// Rematch order: the losing side opens, each side in roster order.
pub fn rematch_order(roster: &Roster, losing_side: SideId) -> Result<ThrowOrder, DomainError> {
    let winning_side = roster
        .opponent_of(losing_side)
        .ok_or_else(|| invalid(format!("side {losing_side} is not in this game")))?;
    Ok(ThrowOrder {
        players: interleave(
            &roster.side_players(losing_side),
            &roster.side_players(winning_side),
        ),
        source: OrderSource::AutoRematch,
    })
}

/// Check that `order` is a permutation of the roster.
pub fn validate_order(roster: &Roster, order: &ThrowOrder) -> Result<(), DomainError> {
    let mut expected: Vec<PlayerId> = roster.players.iter().map(|p| p.player_id).collect();
    let mut got = order.players.clone();
    expected.sort_unstable();
    got.sort_unstable();
    if expected != got {
        return Err(invalid("throw order must list every rostered player once"));
    }
    Ok(())
}

/// The player due to throw after `turns_taken` rotation turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thrower {
    pub player_id: PlayerId,
    pub side_id: SideId,
    /// 1-based.
    pub round: u32,
    pub rotation_index: usize,
}

pub fn resolve(
    roster: &Roster,
    order: &ThrowOrder,
    turns_taken: u32,
) -> Result<Thrower, DomainError> {
    let size = order.players.len();
    if size == 0 {
        return Err(invalid("throw order is empty"));
    }
    let rotation_index = turns_taken as usize % size;
    let player_id = order.players[rotation_index];
    let side_id = roster
        .player(player_id)
        .map(|p| p.side_id)
        .ok_or_else(|| invalid(format!("player {player_id} is not on the roster")))?;
    Ok(Thrower {
        player_id,
        side_id,
        round: round_for(turns_taken, size),
        rotation_index,
    })
}

/// Round of the turn that follows `turns_taken` turns.
pub fn round_for(turns_taken: u32, roster_size: usize) -> u32 {
    if roster_size == 0 {
        return 1;
    }
    turns_taken / roster_size as u32 + 1
}

fn interleave(first: &[PlayerId], second: &[PlayerId]) -> Vec<PlayerId> {
    let mut out = Vec::with_capacity(first.len() + second.len());
    for i in 0..first.len().max(second.len()) {
        if let Some(p) = first.get(i) {
            out.push(*p);
        }
        if let Some(p) = second.get(i) {
            out.push(*p);
        }
    }
    out
}

fn invalid(detail: impl Into<String>) -> DomainError {
    DomainError::validation(ValidationKind::InvalidRoster, detail)
}
