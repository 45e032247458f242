// Proptest generators for domain types.

use proptest::prelude::*;

use crate::domain::marks::{MarkSegment, SHANGHAI_SEGMENTS};
use crate::domain::turn::{SegmentTap, TurnInput};
use crate::domain::{Dart, Multiplier, Target};

/// Any dart that exists on the board.
pub fn dart() -> impl Strategy<Value = Dart> {
    prop_oneof![
        1 => Just(Dart::miss()),
        1 => prop_oneof![Just(Dart::bull()), Just(Dart::double_bull())],
        10 => (1u8..=20, multiplier()).prop_map(|(n, m)| Dart {
            target: Target::Number(n),
            multiplier: m,
        }),
    ]
}

pub fn multiplier() -> impl Strategy<Value = Multiplier> {
    prop_oneof![
        Just(Multiplier::Single),
        Just(Multiplier::Double),
        Just(Multiplier::Triple),
    ]
}

pub fn x01_darts_input() -> impl Strategy<Value = TurnInput> {
    prop::collection::vec(dart(), 1..=3).prop_map(|darts| TurnInput::Darts { darts })
}

pub fn segment(allowed: &'static [MarkSegment]) -> impl Strategy<Value = MarkSegment> {
    prop::sample::select(allowed)
}

/// Up to three segments, 1..=3 taps each, distinct segments.
pub fn marks_input(allowed: &'static [MarkSegment]) -> impl Strategy<Value = TurnInput> {
    prop::collection::vec((segment(allowed), 1u8..=3, 0u16..=60), 0..=3).prop_map(|raw| {
        let mut taps: Vec<SegmentTap> = Vec::new();
        for (seg, n, extra) in raw {
            if taps.iter().any(|t| t.segment == seg) {
                continue;
            }
            let tap = SegmentTap::new(seg, n);
            taps.push(if seg.is_extra() {
                tap.with_extra_points(extra)
            } else {
                tap
            });
        }
        TurnInput::Marks { taps }
    })
}

/// Shanghai turns, with an occasional bonus.
pub fn shanghai_input() -> impl Strategy<Value = TurnInput> {
    prop_oneof![
        9 => marks_input(&SHANGHAI_SEGMENTS),
        1 => Just(TurnInput::ShanghaiBonus),
    ]
}

pub fn rtw_input() -> impl Strategy<Value = TurnInput> {
    any::<bool>().prop_map(|hit| TurnInput::RoundTheWorld { hit })
}
