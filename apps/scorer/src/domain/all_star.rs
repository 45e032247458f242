//! All-star tiers for exceptional turns. Never affects scoring.

use serde::{Deserialize, Serialize};

use crate::domain::cricket::MarkTurnFacts;
use crate::domain::x01::X01TurnFacts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllStarTier {
    AllStar,
    Double,
    Triple,
}

const X01_THRESHOLDS: [(u16, AllStarTier); 3] = [
    (171, AllStarTier::Triple),
    (126, AllStarTier::Double),
    (95, AllStarTier::AllStar),
];

const MARK_THRESHOLDS: [(u8, AllStarTier); 3] = [
    (9, AllStarTier::Triple),
    (7, AllStarTier::Double),
    (5, AllStarTier::AllStar),
];

/// Double-in and game-out turns count twice toward the threshold.
pub fn classify_x01(facts: &X01TurnFacts) -> Option<AllStarTier> {
    if facts.bust.is_some() || facts.score == 0 {
        return None;
    }
    let factor = if facts.is_double_in || facts.is_game_out { 2 } else { 1 };
    let adjusted = facts.score * factor;
    X01_THRESHOLDS
        .iter()
        .find(|(min, _)| adjusted >= *min)
        .map(|(_, tier)| *tier)
}

/// Three bull marks settle it as an all-star; otherwise the marks tiers apply.
pub fn classify_marks(facts: &MarkTurnFacts) -> Option<AllStarTier> {
    if facts.bull_marks >= 3 {
        return Some(AllStarTier::AllStar);
    }
    MARK_THRESHOLDS
        .iter()
        .find(|(min, _)| facts.marks_scored >= *min)
        .map(|(_, tier)| *tier)
}
