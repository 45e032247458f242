//! Game variants and their fixed setup.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::domain::board::BULL_VALUE;
use crate::errors::domain::{DomainError, ValidationKind};

pub const MIN_X01_TARGET: u16 = 2;
pub const MAX_X01_TARGET: u16 = 1001;
pub const RTW_SEQUENCE_LEN: usize = 21;

/// Ordering of targets in a Round-the-World game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RtwMode {
    Ascending,
    Descending,
    Random,
}

impl std::str::FromStr for RtwMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascending" | "asc" => Ok(RtwMode::Ascending),
            "descending" | "desc" => Ok(RtwMode::Descending),
            "random" => Ok(RtwMode::Random),
            other => Err(DomainError::validation(
                ValidationKind::InvalidConfig,
                format!("unknown round-the-world mode: {other}"),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameVariant {
    X01 {
        target: u16,
        double_in: bool,
        double_out: bool,
    },
    Cricket,
    Shanghai,
    RoundTheWorld {
        mode: RtwMode,
        /// Fixed when the game is created.
        sequence: Vec<u8>,
    },
}

/// Discriminant-only view of [`GameVariant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
    X01,
    Cricket,
    Shanghai,
    RoundTheWorld,
}

impl GameVariant {
    pub fn kind(&self) -> VariantKind {
        match self {
            GameVariant::X01 { .. } => VariantKind::X01,
            GameVariant::Cricket => VariantKind::Cricket,
            GameVariant::Shanghai => VariantKind::Shanghai,
            GameVariant::RoundTheWorld { .. } => VariantKind::RoundTheWorld,
        }
    }

    pub fn uses_mark_board(&self) -> bool {
        matches!(self, GameVariant::Cricket | GameVariant::Shanghai)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            GameVariant::X01 { target, .. } => {
                if !(MIN_X01_TARGET..=MAX_X01_TARGET).contains(target) {
                    return Err(DomainError::validation(
                        ValidationKind::InvalidConfig,
                        format!(
                            "x01 target {target} outside {MIN_X01_TARGET}..={MAX_X01_TARGET}"
                        ),
                    ));
                }
                Ok(())
            }
            GameVariant::Cricket | GameVariant::Shanghai => Ok(()),
            GameVariant::RoundTheWorld { sequence, .. } => validate_sequence(sequence),
        }
    }
}

/// Build a Round-the-World sequence. `rng` is only consulted for `Random`.
pub fn rtw_sequence<R: Rng + ?Sized>(mode: RtwMode, rng: &mut R) -> Vec<u8> {
    let bull = BULL_VALUE as u8;
    match mode {
        RtwMode::Ascending => (1..=20).chain(std::iter::once(bull)).collect(),
        RtwMode::Descending => (1..=20).rev().chain(std::iter::once(bull)).collect(),
        RtwMode::Random => {
            let mut seq: Vec<u8> = (1..=20).chain(std::iter::once(bull)).collect();
            seq.shuffle(rng);
            seq
        }
    }
}

/// Sequence generator backed by ChaCha, optionally seeded for reproducible
/// games.
pub fn sequence_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_os_rng(),
    }
}

/// A sequence must be 1..=20 plus bull, each exactly once.
pub fn validate_sequence(sequence: &[u8]) -> Result<(), DomainError> {
    let mut sorted = sequence.to_vec();
    sorted.sort_unstable();
    let expected: Vec<u8> = (1..=20).chain(std::iter::once(BULL_VALUE as u8)).collect();
    if sorted != expected {
        return Err(DomainError::validation(
            ValidationKind::InvalidConfig,
            "round-the-world sequence must hold 1..=20 and bull exactly once",
        ));
    }
    Ok(())
}
