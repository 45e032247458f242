//! Game state as a fold over the turn history: apply, undo and replay.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::all_star::{self, AllStarTier};
use crate::domain::cricket;
use crate::domain::marks::{MarkBoard, MarkSegment, CRICKET_SEGMENTS, SHANGHAI_SEGMENTS};
use crate::domain::round_the_world::{self, RtwProgress};
use crate::domain::roster::{PlayerId, Roster, SideId, SideSlot};
use crate::domain::turn::{Actor, TurnDetails, TurnInput, TurnRecord, SHANGHAI_BONUS_POINTS};
use crate::domain::turn_order::round_for;
use crate::domain::variant::GameVariant;
use crate::domain::x01::{self, X01Input, X01Rules, X01Side};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    NotStarted,
    InProgress,
    Completed,
}

/// Per-variant running position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum Progress {
    X01 { sides: [X01Side; 2] },
    Marks { board: MarkBoard },
    RoundTheWorld { players: BTreeMap<PlayerId, RtwProgress> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub progress: Progress,
    pub winner: Option<SideId>,
    /// All recorded turns, bonuses included; drives the rotation.
    pub turns: u32,
}

/// Scored but not yet applied turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnEffect {
    pub details: TurnDetails,
    pub score: u16,
    pub darts_thrown: u8,
    pub all_star: Option<AllStarTier>,
}

/// Segments a mark-board variant must close to win.
pub fn segments_for(variant: &GameVariant) -> &'static [MarkSegment] {
    match variant {
        GameVariant::Shanghai => &SHANGHAI_SEGMENTS,
        _ => &CRICKET_SEGMENTS,
    }
}

fn x01_rules(variant: &GameVariant) -> Option<X01Rules> {
    match variant {
        GameVariant::X01 {
            target,
            double_in,
            double_out,
        } => Some(X01Rules {
            target: *target,
            double_in: *double_in,
            double_out: *double_out,
        }),
        _ => None,
    }
}

fn mismatch(variant: &GameVariant, input: &TurnInput) -> DomainError {
    DomainError::validation(
        ValidationKind::VariantMismatch,
        format!("{input:?} cannot be scored in a {:?} game", variant.kind()),
    )
}

impl GameState {
    pub fn new(variant: &GameVariant, roster: &Roster) -> Self {
        let progress = match variant {
            GameVariant::X01 {
                target,
                double_in,
                double_out,
            } => {
                let start = X01Side::start(&X01Rules {
                    target: *target,
                    double_in: *double_in,
                    double_out: *double_out,
                });
                Progress::X01 {
                    sides: [start; 2],
                }
            }
            GameVariant::Cricket | GameVariant::Shanghai => Progress::Marks {
                board: MarkBoard::default(),
            },
            GameVariant::RoundTheWorld { .. } => Progress::RoundTheWorld {
                players: roster
                    .players
                    .iter()
                    .map(|p| (p.player_id, RtwProgress::default()))
                    .collect(),
            },
        };
        Self {
            progress,
            winner: None,
            turns: 0,
        }
    }

    pub fn status(&self) -> GameStatus {
        if self.winner.is_some() {
            GameStatus::Completed
        } else if self.turns > 0 {
            GameStatus::InProgress
        } else {
            GameStatus::NotStarted
        }
    }

    /// Round of the next turn.
    pub fn current_round(&self, roster: &Roster) -> u32 {
        round_for(self.turns, roster.size())
    }

    pub fn mark_board(&self) -> Option<&MarkBoard> {
        match &self.progress {
            Progress::Marks { board } => Some(board),
            _ => None,
        }
    }

    /// Score `input` for `actor` without changing anything.
    pub fn evaluate(
        &self,
        variant: &GameVariant,
        roster: &Roster,
        actor: &Actor,
        input: &TurnInput,
    ) -> Result<TurnEffect, DomainError> {
        if self.winner.is_some() {
            return Err(DomainError::validation(
                ValidationKind::GameCompleted,
                "game already has a winner",
            ));
        }
        let slot = slot_for(roster, actor)?;

        match (&self.progress, input) {
            (Progress::X01 { sides }, TurnInput::Darts { .. } | TurnInput::Total { .. }) => {
                let rules = x01_rules(variant).ok_or_else(|| mismatch(variant, input))?;
                let x01_input = match input {
                    TurnInput::Darts { darts } => X01Input::Darts {
                        darts: darts.clone(),
                    },
                    TurnInput::Total {
                        score,
                        darts_thrown,
                        finished_on_double,
                    } => X01Input::Total {
                        score: *score,
                        darts_thrown: *darts_thrown,
                        finished_on_double: *finished_on_double,
                    },
                    _ => return Err(mismatch(variant, input)),
                };
                let facts = x01::score_input(&rules, &sides[slot.index()], &x01_input)?;
                Ok(TurnEffect {
                    score: facts.score,
                    darts_thrown: facts.darts_thrown,
                    all_star: all_star::classify_x01(&facts),
                    details: TurnDetails::X01(facts),
                })
            }
            (Progress::Marks { board }, TurnInput::Marks { taps }) => {
                let facts = cricket::score_taps(segments_for(variant), board, slot, taps)?;
                Ok(TurnEffect {
                    score: facts.points,
                    darts_thrown: 3,
                    all_star: all_star::classify_marks(&facts),
                    details: TurnDetails::Marks(facts),
                })
            }
            (Progress::Marks { .. }, TurnInput::ShanghaiBonus)
                if matches!(variant, GameVariant::Shanghai) =>
            {
                Ok(TurnEffect {
                    score: SHANGHAI_BONUS_POINTS,
                    darts_thrown: 0,
                    all_star: None,
                    details: TurnDetails::ShanghaiBonus {
                        points: SHANGHAI_BONUS_POINTS,
                    },
                })
            }
            (Progress::RoundTheWorld { players }, TurnInput::RoundTheWorld { hit }) => {
                let GameVariant::RoundTheWorld { sequence, .. } = variant else {
                    return Err(mismatch(variant, input));
                };
                let progress = players.get(&actor.player_id).copied().unwrap_or_default();
                let facts = round_the_world::score_turn(sequence, &progress, *hit)?;
                Ok(TurnEffect {
                    score: facts.score,
                    darts_thrown: 3,
                    all_star: None,
                    details: TurnDetails::RoundTheWorld(facts),
                })
            }
            _ => Err(mismatch(variant, input)),
        }
    }

    /// Fold one turn's facts into the state. Returns the winning side when
    /// this turn ended the game.
    pub fn apply(
        &mut self,
        variant: &GameVariant,
        roster: &Roster,
        actor: &Actor,
        details: &TurnDetails,
    ) -> Result<Option<SideId>, DomainError> {
        let slot = slot_for(roster, actor)?;
        let won = match (&mut self.progress, details) {
            (Progress::X01 { sides }, TurnDetails::X01(facts)) => {
                x01::apply(&mut sides[slot.index()], facts);
                facts.is_game_out
            }
            (Progress::Marks { board }, TurnDetails::Marks(facts)) => {
                cricket::apply(board, slot, facts);
                cricket::has_won(board, slot, segments_for(variant))
            }
            (Progress::Marks { board }, TurnDetails::ShanghaiBonus { points }) => {
                cricket::add_bonus(board, slot, *points);
                cricket::has_won(board, slot, segments_for(variant))
            }
            (Progress::RoundTheWorld { players }, TurnDetails::RoundTheWorld(facts)) => {
                let GameVariant::RoundTheWorld { sequence, .. } = variant else {
                    return Err(details_mismatch());
                };
                let progress = players.entry(actor.player_id).or_default();
                round_the_world::apply(progress, facts);
                progress.finished(sequence)
            }
            _ => return Err(details_mismatch()),
        };

        self.turns += 1;
        if won {
            self.winner = Some(actor.side_id);
        }
        Ok(self.winner.filter(|_| won))
    }

    /// Evaluate and apply in one step.
    pub fn submit(
        &mut self,
        variant: &GameVariant,
        roster: &Roster,
        actor: &Actor,
        input: &TurnInput,
    ) -> Result<TurnEffect, DomainError> {
        let effect = self.evaluate(variant, roster, actor, input)?;
        self.apply(variant, roster, actor, &effect.details)?;
        Ok(effect)
    }

    /// The history entry for `effect` as the next turn.
    pub fn record_for(&self, roster: &Roster, actor: &Actor, effect: &TurnEffect) -> TurnRecord {
        TurnRecord {
            turn_number: self.turns + 1,
            round_number: self.current_round(roster),
            player_id: actor.player_id,
            side_id: actor.side_id,
            darts_thrown: effect.darts_thrown,
            score: effect.score,
            details: effect.details.clone(),
            all_star: effect.all_star,
        }
    }

    /// Undo the most recent turn using the deltas it recorded.
    pub fn revert(
        &mut self,
        roster: &Roster,
        record: &TurnRecord,
    ) -> Result<(), DomainError> {
        if record.turn_number != self.turns {
            return Err(DomainError::inconsistent(format!(
                "turn {} is not the latest (state has {} turns)",
                record.turn_number, self.turns
            )));
        }
        let actor = record.actor();
        let slot = slot_for(roster, &actor)?;
        let mut next = self.progress.clone();
        match (&mut next, &record.details) {
            (Progress::X01 { sides }, TurnDetails::X01(facts)) => {
                x01::revert(&mut sides[slot.index()], facts)?;
            }
            (Progress::Marks { board }, TurnDetails::Marks(facts)) => {
                cricket::revert(board, slot, facts)?;
            }
            (Progress::Marks { board }, TurnDetails::ShanghaiBonus { points }) => {
                cricket::remove_bonus(board, slot, *points)?;
            }
            (Progress::RoundTheWorld { players }, TurnDetails::RoundTheWorld(facts)) => {
                let progress = players.get_mut(&actor.player_id).ok_or_else(|| {
                    DomainError::inconsistent(format!(
                        "no progress for player {}",
                        actor.player_id
                    ))
                })?;
                round_the_world::revert(progress, facts)?;
            }
            _ => return Err(details_mismatch()),
        }

        self.progress = next;
        self.turns -= 1;
        // No turn is accepted after a win, so only the last turn can hold it.
        self.winner = None;
        Ok(())
    }

    pub fn view(&self, variant: &GameVariant, roster: &Roster) -> DerivedState {
        let sides = [SideSlot::Home, SideSlot::Away]
            .into_iter()
            .map(|slot| {
                let side_id = roster.side_at(slot);
                match &self.progress {
                    Progress::X01 { sides } => {
                        let s = sides[slot.index()];
                        let target = x01_rules(variant).map(|r| r.target).unwrap_or(0);
                        SideView {
                            side_id,
                            remaining: Some(s.remaining),
                            doubled_in: Some(s.doubled_in),
                            marks: None,
                            points: u32::from(target.saturating_sub(s.remaining)),
                        }
                    }
                    Progress::Marks { board } => {
                        let b = board.side(slot);
                        SideView {
                            side_id,
                            remaining: None,
                            doubled_in: None,
                            marks: Some(
                                segments_for(variant)
                                    .iter()
                                    .map(|seg| (*seg, b.marks_on(*seg)))
                                    .collect(),
                            ),
                            points: b.points,
                        }
                    }
                    Progress::RoundTheWorld { players } => SideView {
                        side_id,
                        remaining: None,
                        doubled_in: None,
                        marks: None,
                        points: roster
                            .side_players(side_id)
                            .iter()
                            .filter_map(|p| players.get(p))
                            .map(|p| p.score)
                            .sum(),
                    },
                }
            })
            .collect();

        let players = match (&self.progress, variant) {
            (Progress::RoundTheWorld { players }, GameVariant::RoundTheWorld { sequence, .. }) => {
                roster
                    .players
                    .iter()
                    .map(|gp| {
                        let p = players.get(&gp.player_id).copied().unwrap_or_default();
                        PlayerProgressView {
                            player_id: gp.player_id,
                            side_id: gp.side_id,
                            index: p.index,
                            next_target: sequence.get(p.index as usize).copied(),
                            score: p.score,
                        }
                    })
                    .collect()
            }
            _ => Vec::new(),
        };

        DerivedState {
            status: self.status(),
            winner: self.winner,
            turns: self.turns,
            round: self.current_round(roster),
            sides,
            players,
        }
    }
}

/// Rebuild state by scoring every recorded turn again in order. Any turn
/// whose re-scored facts differ from what was recorded is an inconsistency.
pub fn replay(
    variant: &GameVariant,
    roster: &Roster,
    turns: &[TurnRecord],
) -> Result<GameState, DomainError> {
    let mut state = GameState::new(variant, roster);
    for record in turns {
        let n = record.turn_number;
        if n != state.turns + 1 {
            return Err(DomainError::inconsistent(format!(
                "turn numbers are not contiguous: expected {}, found {n}",
                state.turns + 1
            )));
        }
        if record.round_number != state.current_round(roster) {
            return Err(DomainError::inconsistent(format!(
                "turn {n} recorded in round {} but falls in round {}",
                record.round_number,
                state.current_round(roster)
            )));
        }
        let actor = record.actor();
        let effect = state
            .evaluate(variant, roster, &actor, &record.details.input())
            .map_err(|e| DomainError::inconsistent(format!("turn {n} no longer scores: {e}")))?;
        if effect.details != record.details
            || effect.score != record.score
            || effect.darts_thrown != record.darts_thrown
            || effect.all_star != record.all_star
        {
            return Err(DomainError::inconsistent(format!(
                "turn {n} facts differ from its replay"
            )));
        }
        state.apply(variant, roster, &actor, &effect.details)?;
    }
    Ok(state)
}

/// Per-side scoreboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideView {
    pub side_id: SideId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doubled_in: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marks: Option<Vec<(MarkSegment, u8)>>,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProgressView {
    pub player_id: PlayerId,
    pub side_id: SideId,
    pub index: u8,
    pub next_target: Option<u8>,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedState {
    pub status: GameStatus,
    pub winner: Option<SideId>,
    pub turns: u32,
    pub round: u32,
    pub sides: Vec<SideView>,
    /// Round-the-World only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub players: Vec<PlayerProgressView>,
}

fn slot_for(roster: &Roster, actor: &Actor) -> Result<SideSlot, DomainError> {
    let member = roster.player(actor.player_id).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::InvalidRoster,
            format!("player {} is not in this game", actor.player_id),
        )
    })?;
    if member.side_id != actor.side_id {
        return Err(DomainError::validation(
            ValidationKind::InvalidRoster,
            format!(
                "player {} throws for side {}, not {}",
                actor.player_id, member.side_id, actor.side_id
            ),
        ));
    }
    roster.slot_of(actor.side_id).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::InvalidRoster,
            format!("side {} is not in this game", actor.side_id),
        )
    })
}

fn details_mismatch() -> DomainError {
    DomainError::inconsistent("turn facts do not belong to this game's variant")
}
