//! Game records as the store keeps them.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::match_result::MatchKind;
use crate::domain::roster::{GameId, MatchId, Roster, SideId};
use crate::domain::state::GameStatus;
use crate::domain::turn_order::ThrowOrder;
use crate::domain::variant::GameVariant;

/// Game domain model. Immutable apart from order, status, winner and halt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub match_id: Option<MatchId>,
    /// 1-based position within the match.
    pub game_number: u32,
    pub match_kind: MatchKind,
    pub variant: GameVariant,
    /// Frozen once the first turn is recorded.
    pub throw_order: Option<ThrowOrder>,
    pub status: GameStatus,
    pub winner: Option<SideId>,
    /// Set when the cached board disagreed with the replayed history.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub halted: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Game {
    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }
}

/// Everything needed to insert a game.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGame {
    pub match_id: Option<MatchId>,
    pub game_number: u32,
    pub match_kind: MatchKind,
    pub variant: GameVariant,
    pub roster: Roster,
    pub throw_order: Option<ThrowOrder>,
}
