//! Sides and the players assigned to them for one game.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

pub type GameId = i64;
pub type MatchId = i64;
pub type PlayerId = i64;
/// Team-season identifier of a competing side.
pub type SideId = i64;

pub const MAX_PLAYERS_PER_SIDE: usize = 4;

/// Positional slot of a side within a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideSlot {
    Home,
    Away,
}

impl SideSlot {
    pub const fn index(self) -> usize {
        match self {
            SideSlot::Home => 0,
            SideSlot::Away => 1,
        }
    }

    pub const fn other(self) -> SideSlot {
        match self {
            SideSlot::Home => SideSlot::Away,
            SideSlot::Away => SideSlot::Home,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePlayer {
    pub player_id: PlayerId,
    pub side_id: SideId,
    /// Position within the side; lower throws earlier in natural order.
    pub order: u8,
}

/// Two sides and their players. Immutable once a game has turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub home: SideId,
    pub away: SideId,
    pub players: Vec<GamePlayer>,
}

impl Roster {
    pub fn new(
        home: SideId,
        away: SideId,
        players: Vec<GamePlayer>,
    ) -> Result<Self, DomainError> {
        let roster = Self {
            home,
            away,
            players,
        };
        roster.validate()?;
        Ok(roster)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.home == self.away {
            return Err(invalid("home and away must be different sides"));
        }
        let mut seen_players = HashSet::new();
        let mut seen_orders = HashSet::new();
        for p in &self.players {
            if p.side_id != self.home && p.side_id != self.away {
                return Err(invalid(format!(
                    "player {} assigned to unknown side {}",
                    p.player_id, p.side_id
                )));
            }
            if !seen_players.insert(p.player_id) {
                return Err(invalid(format!("player {} listed twice", p.player_id)));
            }
            if !seen_orders.insert((p.side_id, p.order)) {
                return Err(invalid(format!(
                    "order {} used twice on side {}",
                    p.order, p.side_id
                )));
            }
        }
        for side in [self.home, self.away] {
            let n = self.players.iter().filter(|p| p.side_id == side).count();
            if n == 0 || n > MAX_PLAYERS_PER_SIDE {
                return Err(invalid(format!(
                    "side {side} has {n} players, expected 1..={MAX_PLAYERS_PER_SIDE}"
                )));
            }
        }
        Ok(())
    }

    /// Total players across both sides; the rotation length.
    pub fn size(&self) -> usize {
        self.players.len()
    }

    pub fn slot_of(&self, side_id: SideId) -> Option<SideSlot> {
        if side_id == self.home {
            Some(SideSlot::Home)
        } else if side_id == self.away {
            Some(SideSlot::Away)
        } else {
            None
        }
    }

    pub fn side_at(&self, slot: SideSlot) -> SideId {
        match slot {
            SideSlot::Home => self.home,
            SideSlot::Away => self.away,
        }
    }

    pub fn opponent_of(&self, side_id: SideId) -> Option<SideId> {
        self.slot_of(side_id).map(|s| self.side_at(s.other()))
    }

    pub fn player(&self, player_id: PlayerId) -> Option<&GamePlayer> {
        self.players.iter().find(|p| p.player_id == player_id)
    }

    /// Players of one side sorted by their roster order.
    pub fn side_players(&self, side_id: SideId) -> Vec<PlayerId> {
        let mut members: Vec<&GamePlayer> = self
            .players
            .iter()
            .filter(|p| p.side_id == side_id)
            .collect();
        members.sort_by_key(|p| p.order);
        members.into_iter().map(|p| p.player_id).collect()
    }
}

fn invalid(detail: impl Into<String>) -> DomainError {
    DomainError::validation(ValidationKind::InvalidRoster, detail)
}
