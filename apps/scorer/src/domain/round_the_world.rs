//! Round-the-World: each player walks the shared target sequence.

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

/// A player's position in the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RtwProgress {
    /// Index of the next target.
    pub index: u8,
    pub score: u32,
}

impl RtwProgress {
    pub fn finished(&self, sequence: &[u8]) -> bool {
        self.index as usize >= sequence.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RtwTurnFacts {
    pub hit: bool,
    pub target: u8,
    pub index_before: u8,
    pub score: u16,
}

pub fn score_turn(
    sequence: &[u8],
    progress: &RtwProgress,
    hit: bool,
) -> Result<RtwTurnFacts, DomainError> {
    let target = sequence
        .get(progress.index as usize)
        .copied()
        .ok_or_else(|| {
            DomainError::validation(
                ValidationKind::GameCompleted,
                "player has already completed the sequence",
            )
        })?;
    Ok(RtwTurnFacts {
        hit,
        target,
        index_before: progress.index,
        score: if hit { u16::from(target) } else { 0 },
    })
}

pub fn apply(progress: &mut RtwProgress, facts: &RtwTurnFacts) {
    if facts.hit {
        progress.index += 1;
    }
    progress.score += u32::from(facts.score);
}

pub fn revert(progress: &mut RtwProgress, facts: &RtwTurnFacts) -> Result<(), DomainError> {
    let expected = if facts.hit {
        facts.index_before + 1
    } else {
        facts.index_before
    };
    if progress.index != expected || progress.score < u32::from(facts.score) {
        return Err(DomainError::inconsistent(format!(
            "round-the-world progress {} does not follow the undone turn",
            progress.index
        )));
    }
    progress.index = facts.index_before;
    progress.score -= u32::from(facts.score);
    Ok(())
}
