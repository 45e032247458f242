//! X01 scoring: double-in, busts and the game-out.

use serde::{Deserialize, Serialize};

use crate::domain::board::{is_reachable_total, Dart, MAX_DARTS_PER_TURN, MAX_TURN_SCORE};
use crate::domain::turn::TurnInput;
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct X01Rules {
    pub target: u16,
    pub double_in: bool,
    pub double_out: bool,
}

/// One side's running X01 position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct X01Side {
    pub remaining: u16,
    pub doubled_in: bool,
}

impl X01Side {
    pub fn start(rules: &X01Rules) -> Self {
        Self {
            remaining: rules.target,
            doubled_in: !rules.double_in,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BustReason {
    BelowZero,
    LeftOne,
    NoDoubleFinish,
}

/// The X01 subset of [`TurnInput`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum X01Input {
    Darts {
        darts: Vec<Dart>,
    },
    Total {
        score: u16,
        darts_thrown: u8,
        finished_on_double: bool,
    },
}

impl From<X01Input> for TurnInput {
    fn from(input: X01Input) -> Self {
        match input {
            X01Input::Darts { darts } => TurnInput::Darts { darts },
            X01Input::Total {
                score,
                darts_thrown,
                finished_on_double,
            } => TurnInput::Total {
                score,
                darts_thrown,
                finished_on_double,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct X01TurnFacts {
    pub input: X01Input,
    /// Darts actually evaluated; darts after a bust or checkout are dropped.
    pub darts_thrown: u8,
    /// Effective score, zero on a bust.
    pub score: u16,
    pub remaining_before: u16,
    pub remaining_after: u16,
    /// This turn opened scoring for the side.
    pub is_double_in: bool,
    pub is_game_out: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bust: Option<BustReason>,
}

/// Outcome of landing on `remaining` after the running total.
fn classify(
    rules: &X01Rules,
    remaining_before: u16,
    running: u16,
    finished_on_double: bool,
) -> Result<Option<bool>, BustReason> {
    let left = i32::from(remaining_before) - i32::from(running);
    if left < 0 {
        return Err(BustReason::BelowZero);
    }
    if left == 1 && rules.double_out {
        return Err(BustReason::LeftOne);
    }
    if left == 0 {
        if rules.double_out && !finished_on_double {
            return Err(BustReason::NoDoubleFinish);
        }
        return Ok(Some(true));
    }
    Ok(None)
}

/// Score a dart-by-dart X01 turn.
pub fn score_darts(
    rules: &X01Rules,
    side: &X01Side,
    darts: &[Dart],
) -> Result<X01TurnFacts, DomainError> {
    if darts.is_empty() || darts.len() > MAX_DARTS_PER_TURN as usize {
        return Err(DomainError::validation(
            ValidationKind::MalformedInput,
            format!("an x01 turn has 1..=3 darts, got {}", darts.len()),
        ));
    }
    for d in darts {
        d.validate()?;
    }

    let mut counting = side.doubled_in;
    let mut opened = false;
    let mut running: u16 = 0;
    let mut evaluated = 0u8;
    let mut bust = None;
    let mut game_out = false;

    for dart in darts {
        evaluated += 1;
        if !counting && dart.is_double() {
            counting = true;
            opened = true;
        }
        if !counting {
            continue;
        }
        running += dart.score();
        match classify(rules, side.remaining, running, dart.is_double()) {
            Err(reason) => {
                bust = Some(reason);
                break;
            }
            Ok(Some(_)) => {
                game_out = true;
                break;
            }
            Ok(None) => {}
        }
    }

    Ok(finish(
        side,
        X01Input::Darts {
            darts: darts.to_vec(),
        },
        evaluated,
        running,
        opened,
        bust,
        game_out,
    ))
}

/// Score a pre-summed X01 turn.
pub fn score_total(
    rules: &X01Rules,
    side: &X01Side,
    score: u16,
    darts_thrown: u8,
    finished_on_double: bool,
) -> Result<X01TurnFacts, DomainError> {
    if darts_thrown == 0 || darts_thrown > MAX_DARTS_PER_TURN {
        return Err(DomainError::validation(
            ValidationKind::MalformedInput,
            format!("darts thrown must be 1..=3, got {darts_thrown}"),
        ));
    }
    if score > MAX_TURN_SCORE || !is_reachable_total(score, darts_thrown) {
        return Err(DomainError::validation(
            ValidationKind::ScoreOutOfRange,
            format!("{score} is not a possible {darts_thrown}-dart total"),
        ));
    }

    // A positive total while waiting to double in counts from the double on.
    let opened = !side.doubled_in && score > 0;
    let (bust, game_out) = match classify(rules, side.remaining, score, finished_on_double) {
        Err(reason) => (Some(reason), false),
        Ok(out) => (None, out.is_some()),
    };

    Ok(finish(
        side,
        X01Input::Total {
            score,
            darts_thrown,
            finished_on_double,
        },
        darts_thrown,
        score,
        opened,
        bust,
        game_out,
    ))
}

fn finish(
    side: &X01Side,
    input: X01Input,
    darts_thrown: u8,
    running: u16,
    opened: bool,
    bust: Option<BustReason>,
    game_out: bool,
) -> X01TurnFacts {
    let score = if bust.is_some() { 0 } else { running };
    X01TurnFacts {
        input,
        darts_thrown,
        score,
        remaining_before: side.remaining,
        remaining_after: side.remaining - score,
        is_double_in: opened && bust.is_none(),
        is_game_out: game_out && bust.is_none(),
        bust,
    }
}

pub fn score_input(
    rules: &X01Rules,
    side: &X01Side,
    input: &X01Input,
) -> Result<X01TurnFacts, DomainError> {
    match input {
        X01Input::Darts { darts } => score_darts(rules, side, darts),
        X01Input::Total {
            score,
            darts_thrown,
            finished_on_double,
        } => score_total(rules, side, *score, *darts_thrown, *finished_on_double),
    }
}

pub fn apply(side: &mut X01Side, facts: &X01TurnFacts) {
    side.remaining = facts.remaining_after;
    if facts.is_double_in {
        side.doubled_in = true;
    }
}

pub fn revert(side: &mut X01Side, facts: &X01TurnFacts) -> Result<(), DomainError> {
    if side.remaining != facts.remaining_after {
        return Err(DomainError::inconsistent(format!(
            "x01 remaining {} does not match the undone turn's {}",
            side.remaining, facts.remaining_after
        )));
    }
    side.remaining = facts.remaining_before;
    if facts.is_double_in {
        side.doubled_in = false;
    }
    Ok(())
}
