//! Per-side segment marks for Cricket and Shanghai.

use serde::{Deserialize, Serialize};

use crate::domain::roster::SideSlot;

pub const CLOSE_MARKS: u8 = 3;
/// Display ceiling for stored marks.
pub const MARK_CAP: u8 = 9;
/// 3 darts x treble.
pub const MAX_TAPS_PER_TURN: u8 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkSegment {
    Twenty,
    Nineteen,
    Eighteen,
    Seventeen,
    Sixteen,
    Fifteen,
    Bull,
    /// Shanghai category: any treble.
    Triples,
    /// Shanghai category: any double.
    Doubles,
    /// Shanghai category: three darts in one bed.
    ThreeInBed,
}

pub const CRICKET_SEGMENTS: [MarkSegment; 7] = [
    MarkSegment::Twenty,
    MarkSegment::Nineteen,
    MarkSegment::Eighteen,
    MarkSegment::Seventeen,
    MarkSegment::Sixteen,
    MarkSegment::Fifteen,
    MarkSegment::Bull,
];

pub const SHANGHAI_SEGMENTS: [MarkSegment; 10] = [
    MarkSegment::Twenty,
    MarkSegment::Nineteen,
    MarkSegment::Eighteen,
    MarkSegment::Seventeen,
    MarkSegment::Sixteen,
    MarkSegment::Fifteen,
    MarkSegment::Bull,
    MarkSegment::Triples,
    MarkSegment::Doubles,
    MarkSegment::ThreeInBed,
];

impl MarkSegment {
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Points per overflow mark; `None` for categories scored by hand.
    pub const fn face_value(self) -> Option<u16> {
        match self {
            MarkSegment::Twenty => Some(20),
            MarkSegment::Nineteen => Some(19),
            MarkSegment::Eighteen => Some(18),
            MarkSegment::Seventeen => Some(17),
            MarkSegment::Sixteen => Some(16),
            MarkSegment::Fifteen => Some(15),
            MarkSegment::Bull => Some(25),
            MarkSegment::Triples | MarkSegment::Doubles | MarkSegment::ThreeInBed => None,
        }
    }

    pub const fn is_extra(self) -> bool {
        self.face_value().is_none()
    }

    pub fn label(self) -> &'static str {
        match self {
            MarkSegment::Twenty => "20",
            MarkSegment::Nineteen => "19",
            MarkSegment::Eighteen => "18",
            MarkSegment::Seventeen => "17",
            MarkSegment::Sixteen => "16",
            MarkSegment::Fifteen => "15",
            MarkSegment::Bull => "Bull",
            MarkSegment::Triples => "T",
            MarkSegment::Doubles => "D",
            MarkSegment::ThreeInBed => "3B",
        }
    }
}

/// One side's marks and points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SideBoard {
    pub marks: [u8; 10],
    pub points: u32,
}

impl SideBoard {
    pub fn marks_on(&self, seg: MarkSegment) -> u8 {
        self.marks[seg.index()]
    }

    pub fn is_closed(&self, seg: MarkSegment) -> bool {
        self.marks_on(seg) >= CLOSE_MARKS
    }

    pub fn all_closed(&self, segments: &[MarkSegment]) -> bool {
        segments.iter().all(|s| self.is_closed(*s))
    }
}

/// Both sides' boards, indexed by [`SideSlot`]. A cache of the turn history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MarkBoard {
    pub sides: [SideBoard; 2],
}

impl MarkBoard {
    pub fn side(&self, slot: SideSlot) -> &SideBoard {
        &self.sides[slot.index()]
    }

    pub fn side_mut(&mut self, slot: SideSlot) -> &mut SideBoard {
        &mut self.sides[slot.index()]
    }

    pub fn is_closed_by(&self, slot: SideSlot, seg: MarkSegment) -> bool {
        self.side(slot).is_closed(seg)
    }

    pub fn is_closed_by_both(&self, seg: MarkSegment) -> bool {
        self.sides.iter().all(|s| s.is_closed(seg))
    }

    /// Most taps `slot` may put on `seg` in one turn.
    pub fn max_taps(&self, slot: SideSlot, seg: MarkSegment) -> u8 {
        let mine = self.side(slot).marks_on(seg);
        let theirs = self.side(slot.other()).marks_on(seg);
        if mine >= CLOSE_MARKS && theirs >= CLOSE_MARKS {
            return 0;
        }
        if theirs >= CLOSE_MARKS {
            return CLOSE_MARKS.saturating_sub(mine);
        }
        MAX_TAPS_PER_TURN
    }
}
