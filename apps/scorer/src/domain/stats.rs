//! Raw per-player scoreboard figures derived from turn history.

use serde::{Deserialize, Serialize};

use crate::domain::roster::{PlayerId, Roster, SideId};
use crate::domain::turn::{TurnDetails, TurnRecord};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerStats {
    pub player_id: PlayerId,
    pub side_id: SideId,
    /// Throwing turns (bonus turns excluded).
    pub turns: u32,
    pub darts_thrown: u32,
    pub points: u32,
    pub marks: u32,
    pub mark_turns: u32,
    pub double_ins: u32,
    pub game_outs: u32,
    pub busts: u32,
    pub all_stars: u32,
}

impl PlayerStats {
    /// Points per dart.
    pub fn ppd(&self) -> f64 {
        if self.darts_thrown == 0 {
            return 0.0;
        }
        f64::from(self.points) / f64::from(self.darts_thrown)
    }

    /// Three-dart average.
    pub fn average(&self) -> f64 {
        self.ppd() * 3.0
    }

    /// Marks per round.
    pub fn mpr(&self) -> f64 {
        if self.mark_turns == 0 {
            return 0.0;
        }
        f64::from(self.marks) / f64::from(self.mark_turns)
    }
}

/// Stats for every rostered player, in roster order.
pub fn player_stats(roster: &Roster, turns: &[TurnRecord]) -> Vec<PlayerStats> {
    roster
        .players
        .iter()
        .map(|gp| {
            let mut s = PlayerStats {
                player_id: gp.player_id,
                side_id: gp.side_id,
                ..PlayerStats::default()
            };
            for t in turns.iter().filter(|t| t.player_id == gp.player_id) {
                if !t.details.is_shanghai_bonus() {
                    s.turns += 1;
                }
                s.darts_thrown += u32::from(t.darts_thrown);
                s.points += u32::from(t.score);
                if t.all_star.is_some() {
                    s.all_stars += 1;
                }
                match &t.details {
                    TurnDetails::X01(f) => {
                        s.double_ins += u32::from(f.is_double_in);
                        s.game_outs += u32::from(f.is_game_out);
                        s.busts += u32::from(f.bust.is_some());
                    }
                    TurnDetails::Marks(f) => {
                        s.marks += u32::from(f.marks_scored);
                        s.mark_turns += 1;
                    }
                    TurnDetails::ShanghaiBonus { .. } | TurnDetails::RoundTheWorld(_) => {}
                }
            }
            s
        })
        .collect()
}
