use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::roster::GameId;
use crate::domain::turn::TurnRecord;

/// A persisted turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub game_id: GameId,
    #[serde(flatten)]
    pub record: TurnRecord,
    pub created_at: OffsetDateTime,
}

pub fn records(turns: &[Turn]) -> Vec<TurnRecord> {
    turns.iter().map(|t| t.record.clone()).collect()
}
