//! Turn inputs and the structured facts recorded for each turn.

use serde::{Deserialize, Serialize};

use crate::domain::all_star::AllStarTier;
use crate::domain::board::Dart;
use crate::domain::cricket::MarkTurnFacts;
use crate::domain::marks::MarkSegment;
use crate::domain::round_the_world::RtwTurnFacts;
use crate::domain::roster::{PlayerId, SideId};
use crate::domain::x01::X01TurnFacts;

pub const SHANGHAI_BONUS_POINTS: u16 = 200;

/// Taps on one segment within a Cricket/Shanghai turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentTap {
    pub segment: MarkSegment,
    pub taps: u8,
    /// Hand-entered points for the Shanghai categories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_points: Option<u16>,
}

impl SegmentTap {
    pub fn new(segment: MarkSegment, taps: u8) -> Self {
        Self {
            segment,
            taps,
            extra_points: None,
        }
    }

    pub fn with_extra_points(mut self, points: u16) -> Self {
        self.extra_points = Some(points);
        self
    }
}

/// What the operator entered for a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TurnInput {
    /// X01, dart by dart.
    Darts { darts: Vec<Dart> },
    /// X01, pre-summed turn total.
    Total {
        score: u16,
        darts_thrown: u8,
        #[serde(default)]
        finished_on_double: bool,
    },
    /// Cricket/Shanghai segment taps.
    Marks { taps: Vec<SegmentTap> },
    ShanghaiBonus,
    RoundTheWorld { hit: bool },
}

/// Variant-tagged facts for a recorded turn; enough to replay and undo it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum TurnDetails {
    X01(X01TurnFacts),
    Marks(MarkTurnFacts),
    ShanghaiBonus { points: u16 },
    RoundTheWorld(RtwTurnFacts),
}

impl TurnDetails {
    /// The input that produced these facts.
    pub fn input(&self) -> TurnInput {
        match self {
            TurnDetails::X01(f) => f.input.clone().into(),
            TurnDetails::Marks(f) => TurnInput::Marks {
                taps: f.input_taps(),
            },
            TurnDetails::ShanghaiBonus { .. } => TurnInput::ShanghaiBonus,
            TurnDetails::RoundTheWorld(f) => TurnInput::RoundTheWorld { hit: f.hit },
        }
    }

    pub fn is_bust(&self) -> bool {
        matches!(self, TurnDetails::X01(f) if f.bust.is_some())
    }

    pub fn is_game_out(&self) -> bool {
        matches!(self, TurnDetails::X01(f) if f.is_game_out)
    }

    pub fn is_double_in(&self) -> bool {
        matches!(self, TurnDetails::X01(f) if f.is_double_in)
    }

    pub fn is_shanghai_bonus(&self) -> bool {
        matches!(self, TurnDetails::ShanghaiBonus { .. })
    }

    pub fn remaining_after(&self) -> Option<u16> {
        match self {
            TurnDetails::X01(f) => Some(f.remaining_after),
            _ => None,
        }
    }

    pub fn rtw_target_hit(&self) -> Option<bool> {
        match self {
            TurnDetails::RoundTheWorld(f) => Some(f.hit),
            _ => None,
        }
    }

    /// Marks placed (raw taps) for mark-board turns.
    pub fn marks_scored(&self) -> Option<u8> {
        match self {
            TurnDetails::Marks(f) => Some(f.marks_scored),
            _ => None,
        }
    }
}

/// Who is throwing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub player_id: PlayerId,
    pub side_id: SideId,
}

/// One scored turn as it is kept in history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn_number: u32,
    pub round_number: u32,
    pub player_id: PlayerId,
    pub side_id: SideId,
    pub darts_thrown: u8,
    pub score: u16,
    pub details: TurnDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_star: Option<AllStarTier>,
}

impl TurnRecord {
    pub fn actor(&self) -> Actor {
        Actor {
            player_id: self.player_id,
            side_id: self.side_id,
        }
    }
}
