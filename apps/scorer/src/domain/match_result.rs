//! Match completion and winner from per-game results.

use serde::{Deserialize, Serialize};

use crate::domain::roster::SideId;
use crate::domain::state::GameStatus;

/// Games in a league match.
pub const LEAGUE_GAMES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    League,
    AdHoc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub game_number: u32,
    pub status: GameStatus,
    pub winner: Option<SideId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub complete: bool,
    pub home_wins: u32,
    pub away_wins: u32,
    /// Set once complete and not level.
    pub winner: Option<SideId>,
}

pub fn tally(kind: MatchKind, home: SideId, away: SideId, games: &[GameResult]) -> MatchOutcome {
    let home_wins = games.iter().filter(|g| g.winner == Some(home)).count() as u32;
    let away_wins = games.iter().filter(|g| g.winner == Some(away)).count() as u32;
    let all_done = !games.is_empty() && games.iter().all(|g| g.status == GameStatus::Completed);
    let complete = match kind {
        MatchKind::League => games.len() == LEAGUE_GAMES && all_done,
        MatchKind::AdHoc => all_done,
    };
    let winner = if !complete || home_wins == away_wins {
        None
    } else if home_wins > away_wins {
        Some(home)
    } else {
        Some(away)
    };
    MatchOutcome {
        complete,
        home_wins,
        away_wins,
        winner,
    }
}
