//! Dartboard primitives: where a dart landed and what it is worth.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

pub const BULL_VALUE: u16 = 25;
pub const MAX_DARTS_PER_TURN: u8 = 3;
pub const MAX_TURN_SCORE: u16 = 180;

/// Where a dart landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// Numbered segment 1..=20.
    Number(u8),
    Bull,
    Miss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Multiplier {
    Single,
    Double,
    Triple,
}

impl Multiplier {
    pub const fn factor(self) -> u16 {
        match self {
            Multiplier::Single => 1,
            Multiplier::Double => 2,
            Multiplier::Triple => 3,
        }
    }
}

/// A single thrown dart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dart {
    pub target: Target,
    pub multiplier: Multiplier,
}

impl Dart {
    /// Build a dart, rejecting positions that do not exist on the board.
    pub fn new(target: Target, multiplier: Multiplier) -> Result<Self, DomainError> {
        let dart = Self { target, multiplier };
        dart.validate()?;
        Ok(dart)
    }

    pub const fn miss() -> Self {
        Self {
            target: Target::Miss,
            multiplier: Multiplier::Single,
        }
    }

    pub const fn single(n: u8) -> Self {
        Self {
            target: Target::Number(n),
            multiplier: Multiplier::Single,
        }
    }

    pub const fn double(n: u8) -> Self {
        Self {
            target: Target::Number(n),
            multiplier: Multiplier::Double,
        }
    }

    pub const fn triple(n: u8) -> Self {
        Self {
            target: Target::Number(n),
            multiplier: Multiplier::Triple,
        }
    }

    pub const fn bull() -> Self {
        Self {
            target: Target::Bull,
            multiplier: Multiplier::Single,
        }
    }

    pub const fn double_bull() -> Self {
        Self {
            target: Target::Bull,
            multiplier: Multiplier::Double,
        }
    }

    /// Darts decoded from storage or the wire bypass `new`, so engines call
    /// this before scoring.
    pub fn validate(&self) -> Result<(), DomainError> {
        match (self.target, self.multiplier) {
            (Target::Number(n), _) if !(1..=20).contains(&n) => Err(DomainError::validation(
                ValidationKind::UnknownSegment,
                format!("segment {n} is not on the board"),
            )),
            (Target::Bull, Multiplier::Triple) => Err(DomainError::validation(
                ValidationKind::UnknownSegment,
                "bull has no treble ring",
            )),
            (Target::Miss, m) if m != Multiplier::Single => Err(DomainError::validation(
                ValidationKind::MalformedInput,
                "a miss carries no multiplier",
            )),
            _ => Ok(()),
        }
    }

    pub fn score(&self) -> u16 {
        match self.target {
            Target::Miss => 0,
            Target::Bull => BULL_VALUE * self.multiplier.factor(),
            Target::Number(n) => u16::from(n) * self.multiplier.factor(),
        }
    }

    /// Doubles ring or the inner bull.
    pub fn is_double(&self) -> bool {
        self.target != Target::Miss && self.multiplier == Multiplier::Double
    }
}

impl fmt::Display for Dart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.target, self.multiplier) {
            (Target::Miss, _) => write!(f, "MISS"),
            (Target::Bull, Multiplier::Double) => write!(f, "DBULL"),
            (Target::Bull, _) => write!(f, "BULL"),
            (Target::Number(n), Multiplier::Single) => write!(f, "S{n}"),
            (Target::Number(n), Multiplier::Double) => write!(f, "D{n}"),
            (Target::Number(n), Multiplier::Triple) => write!(f, "T{n}"),
        }
    }
}

/// Parses `S20`, `D16`, `T19`, `7` (single), `BULL`, `DBULL`, `MISS`.
impl FromStr for Dart {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let up = s.trim().to_ascii_uppercase();
        match up.as_str() {
            "MISS" | "M" | "0" => return Ok(Dart::miss()),
            "BULL" | "SB" | "25" => return Ok(Dart::bull()),
            "DBULL" | "DB" | "50" => return Ok(Dart::double_bull()),
            _ => {}
        }
        let (multiplier, digits) = match up.chars().next() {
            Some('S') => (Multiplier::Single, &up[1..]),
            Some('D') => (Multiplier::Double, &up[1..]),
            Some('T') => (Multiplier::Triple, &up[1..]),
            _ => (Multiplier::Single, up.as_str()),
        };
        let n: u8 = digits.parse().map_err(|_| {
            DomainError::validation(ValidationKind::MalformedInput, format!("bad dart: {s}"))
        })?;
        Dart::new(Target::Number(n), multiplier)
    }
}

/// Every distinct value one dart can score.
fn single_dart_values() -> Vec<u16> {
    let mut values = vec![0, BULL_VALUE, BULL_VALUE * 2];
    for n in 1..=20u16 {
        values.extend([n, n * 2, n * 3]);
    }
    values.sort_unstable();
    values.dedup();
    values
}

/// `REACHABLE[k][s]` is true when `k` darts can total exactly `s`.
static REACHABLE: Lazy<[[bool; 181]; 4]> = Lazy::new(|| {
    let singles = single_dart_values();
    let mut table = [[false; 181]; 4];
    table[0][0] = true;
    for k in 1..4 {
        for s in 0..=180usize {
            if !table[k - 1][s] {
                continue;
            }
            for v in &singles {
                let t = s + *v as usize;
                if t <= 180 {
                    table[k][t] = true;
                }
            }
        }
    }
    table
});

/// True when `darts` darts (1..=3) can produce exactly `score`.
pub fn is_reachable_total(score: u16, darts: u8) -> bool {
    if darts == 0 || darts > MAX_DARTS_PER_TURN || score > MAX_TURN_SCORE {
        return false;
    }
    REACHABLE[darts as usize][score as usize]
}
