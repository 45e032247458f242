//! Mark scoring shared by Cricket and Shanghai.

use serde::{Deserialize, Serialize};

use crate::domain::board::MAX_TURN_SCORE;
use crate::domain::marks::{MarkBoard, MarkSegment, CLOSE_MARKS, MARK_CAP, MAX_TAPS_PER_TURN};
use crate::domain::roster::SideSlot;
use crate::domain::turn::SegmentTap;
use crate::errors::domain::{DomainError, ValidationKind};

/// Effect of one turn on one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentMarks {
    pub segment: MarkSegment,
    pub taps: u8,
    /// Marks added to the board after the display cap.
    pub applied: u8,
    pub points: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_points: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkTurnFacts {
    pub segments: Vec<SegmentMarks>,
    /// Raw taps across all segments.
    pub marks_scored: u8,
    pub bull_marks: u8,
    pub points: u16,
    /// Segments this turn closed for the side.
    pub closed: Vec<MarkSegment>,
    pub is_cricket_close: bool,
}

impl MarkTurnFacts {
    pub fn input_taps(&self) -> Vec<SegmentTap> {
        self.segments
            .iter()
            .map(|s| SegmentTap {
                segment: s.segment,
                taps: s.taps,
                extra_points: s.extra_points,
            })
            .collect()
    }
}

/// Score a turn of taps for `slot` against the current board.
pub fn score_taps(
    allowed: &[MarkSegment],
    board: &MarkBoard,
    slot: SideSlot,
    taps: &[SegmentTap],
) -> Result<MarkTurnFacts, DomainError> {
    let mut seen: Vec<MarkSegment> = Vec::with_capacity(taps.len());
    let mut total_taps: u16 = 0;
    for tap in taps {
        if !allowed.contains(&tap.segment) {
            return Err(DomainError::validation(
                ValidationKind::UnknownSegment,
                format!("segment {} is not played in this game", tap.segment.label()),
            ));
        }
        if seen.contains(&tap.segment) {
            return Err(DomainError::validation(
                ValidationKind::MalformedInput,
                format!("segment {} listed twice", tap.segment.label()),
            ));
        }
        seen.push(tap.segment);
        if let Some(points) = tap.extra_points {
            if !tap.segment.is_extra() {
                return Err(DomainError::validation(
                    ValidationKind::MalformedInput,
                    format!("segment {} is scored by face value", tap.segment.label()),
                ));
            }
            if points > MAX_TURN_SCORE {
                return Err(DomainError::validation(
                    ValidationKind::ScoreOutOfRange,
                    format!("extra points {points} exceed {MAX_TURN_SCORE}"),
                ));
            }
        }
        total_taps += u16::from(tap.taps);
    }
    if total_taps > u16::from(MAX_TAPS_PER_TURN) {
        return Err(DomainError::validation(
            ValidationKind::MarkCapExceeded,
            format!("{total_taps} marks in one turn, at most {MAX_TAPS_PER_TURN}"),
        ));
    }

    let mine = board.side(slot);
    let theirs = board.side(slot.other());
    let mut facts = MarkTurnFacts {
        segments: Vec::with_capacity(taps.len()),
        marks_scored: 0,
        bull_marks: 0,
        points: 0,
        closed: Vec::new(),
        is_cricket_close: false,
    };

    for tap in taps.iter().filter(|t| t.taps > 0) {
        let seg = tap.segment;
        let limit = board.max_taps(slot, seg);
        if tap.taps > limit {
            return Err(DomainError::validation(
                ValidationKind::MarkCapExceeded,
                format!(
                    "segment {} accepts {limit} more marks this turn, got {}",
                    seg.label(),
                    tap.taps
                ),
            ));
        }

        let base = mine.marks_on(seg);
        let to_close = CLOSE_MARKS.saturating_sub(base);
        let after = (base + tap.taps).min(MARK_CAP);
        let points = if !theirs.is_closed(seg) && tap.taps > to_close {
            match seg.face_value() {
                Some(value) => u16::from(tap.taps - to_close) * value,
                None => tap.extra_points.unwrap_or(0),
            }
        } else {
            0
        };

        if base < CLOSE_MARKS && after >= CLOSE_MARKS {
            facts.closed.push(seg);
        }
        if seg == MarkSegment::Bull {
            facts.bull_marks += tap.taps;
        }
        facts.marks_scored += tap.taps;
        facts.points += points;
        facts.segments.push(SegmentMarks {
            segment: seg,
            taps: tap.taps,
            applied: after - base,
            points,
            extra_points: tap.extra_points,
        });
    }
    facts.is_cricket_close = !facts.closed.is_empty();
    Ok(facts)
}

pub fn apply(board: &mut MarkBoard, slot: SideSlot, facts: &MarkTurnFacts) {
    let side = board.side_mut(slot);
    for s in &facts.segments {
        side.marks[s.segment.index()] += s.applied;
    }
    side.points += u32::from(facts.points);
}

/// Subtract exactly what `facts` added.
pub fn revert(board: &mut MarkBoard, slot: SideSlot, facts: &MarkTurnFacts) -> Result<(), DomainError> {
    let side = board.side_mut(slot);
    let mut next = *side;
    for s in &facts.segments {
        let idx = s.segment.index();
        next.marks[idx] = next.marks[idx].checked_sub(s.applied).ok_or_else(|| {
            DomainError::inconsistent(format!(
                "segment {} has fewer marks than the undone turn applied",
                s.segment.label()
            ))
        })?;
    }
    next.points = next
        .points
        .checked_sub(u32::from(facts.points))
        .ok_or_else(|| DomainError::inconsistent("side points below the undone turn's points"))?;
    *side = next;
    Ok(())
}

pub fn add_bonus(board: &mut MarkBoard, slot: SideSlot, points: u16) {
    board.side_mut(slot).points += u32::from(points);
}

pub fn remove_bonus(board: &mut MarkBoard, slot: SideSlot, points: u16) -> Result<(), DomainError> {
    let side = board.side_mut(slot);
    side.points = side
        .points
        .checked_sub(u32::from(points))
        .ok_or_else(|| DomainError::inconsistent("side points below the undone bonus"))?;
    Ok(())
}

/// All segments closed and not trailing on points.
pub fn has_won(board: &MarkBoard, slot: SideSlot, segments: &[MarkSegment]) -> bool {
    let mine = board.side(slot);
    mine.all_closed(segments) && mine.points >= board.side(slot.other()).points
}
