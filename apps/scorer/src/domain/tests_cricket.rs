use crate::domain::cricket::score_taps;
use crate::domain::marks::{MarkBoard, MarkSegment, CRICKET_SEGMENTS, SHANGHAI_SEGMENTS};
use crate::domain::roster::SideSlot;
use crate::domain::test_state_helpers::{one_v_one, Driver, AWAY, HOME};
use crate::domain::turn::{SegmentTap, TurnInput};
use crate::domain::variant::GameVariant;
use crate::errors::domain::{DomainError, ValidationKind};

fn taps(list: &[(MarkSegment, u8)]) -> TurnInput {
    TurnInput::Marks {
        taps: list.iter().map(|(s, n)| SegmentTap::new(*s, *n)).collect(),
    }
}

#[test]
fn overflow_scores_face_value() {
    let mut board = MarkBoard::default();
    board.side_mut(SideSlot::Home).marks[MarkSegment::Twenty.index()] = 1;
    let facts = score_taps(
        &CRICKET_SEGMENTS,
        &board,
        SideSlot::Home,
        &[SegmentTap::new(MarkSegment::Twenty, 3)],
    )
    .unwrap();
    assert_eq!(facts.points, 20);
    assert_eq!(facts.closed, vec![MarkSegment::Twenty]);
    assert!(facts.is_cricket_close);
}

#[test]
fn no_points_once_opponent_closed() {
    let mut board = MarkBoard::default();
    board.side_mut(SideSlot::Away).marks[MarkSegment::Bull.index()] = 3;
    let facts = score_taps(
        &CRICKET_SEGMENTS,
        &board,
        SideSlot::Home,
        &[SegmentTap::new(MarkSegment::Bull, 3)],
    )
    .unwrap();
    assert_eq!(facts.points, 0);
    assert_eq!(facts.segments[0].applied, 3);

    // already closed here too: nothing more accepted
    board.side_mut(SideSlot::Home).marks[MarkSegment::Bull.index()] = 3;
    let err = score_taps(
        &CRICKET_SEGMENTS,
        &board,
        SideSlot::Home,
        &[SegmentTap::new(MarkSegment::Bull, 1)],
    )
    .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::MarkCapExceeded, _)
    ));
}

#[test]
fn closing_against_closed_opponent_is_capped_at_three() {
    let mut board = MarkBoard::default();
    board.side_mut(SideSlot::Away).marks[MarkSegment::Fifteen.index()] = 3;
    board.side_mut(SideSlot::Home).marks[MarkSegment::Fifteen.index()] = 2;
    let over = score_taps(
        &CRICKET_SEGMENTS,
        &board,
        SideSlot::Home,
        &[SegmentTap::new(MarkSegment::Fifteen, 2)],
    );
    assert!(over.is_err());
    let ok = score_taps(
        &CRICKET_SEGMENTS,
        &board,
        SideSlot::Home,
        &[SegmentTap::new(MarkSegment::Fifteen, 1)],
    );
    assert!(ok.is_ok());
}

#[test]
fn turn_marks_limited_to_nine() {
    let board = MarkBoard::default();
    let err = score_taps(
        &CRICKET_SEGMENTS,
        &board,
        SideSlot::Home,
        &[
            SegmentTap::new(MarkSegment::Twenty, 3),
            SegmentTap::new(MarkSegment::Nineteen, 3),
            SegmentTap::new(MarkSegment::Eighteen, 3),
            SegmentTap::new(MarkSegment::Seventeen, 1),
        ],
    )
    .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::MarkCapExceeded, _)
    ));
}

#[test]
fn stored_marks_are_capped_at_nine() {
    let mut board = MarkBoard::default();
    board.side_mut(SideSlot::Home).marks[MarkSegment::Twenty.index()] = 8;
    let facts = score_taps(
        &CRICKET_SEGMENTS,
        &board,
        SideSlot::Home,
        &[SegmentTap::new(MarkSegment::Twenty, 3)],
    )
    .unwrap();
    assert_eq!(facts.segments[0].applied, 1);
    assert_eq!(facts.points, 60);
    assert_eq!(facts.marks_scored, 3);
}

#[test]
fn extra_segments_rejected_in_cricket() {
    let board = MarkBoard::default();
    let err = score_taps(
        &CRICKET_SEGMENTS,
        &board,
        SideSlot::Home,
        &[SegmentTap::new(MarkSegment::Triples, 1)],
    )
    .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::UnknownSegment, _)
    ));
}

#[test]
fn shanghai_extras_score_entered_value_on_overflow() {
    let mut board = MarkBoard::default();
    board.side_mut(SideSlot::Home).marks[MarkSegment::Triples.index()] = 3;
    let facts = score_taps(
        &SHANGHAI_SEGMENTS,
        &board,
        SideSlot::Home,
        &[SegmentTap::new(MarkSegment::Triples, 1).with_extra_points(57)],
    )
    .unwrap();
    assert_eq!(facts.points, 57);

    // closing taps alone score nothing even with a value entered
    let fresh = MarkBoard::default();
    let facts = score_taps(
        &SHANGHAI_SEGMENTS,
        &fresh,
        SideSlot::Home,
        &[SegmentTap::new(MarkSegment::Doubles, 3).with_extra_points(40)],
    )
    .unwrap();
    assert_eq!(facts.points, 0);

    let err = score_taps(
        &SHANGHAI_SEGMENTS,
        &fresh,
        SideSlot::Home,
        &[SegmentTap::new(MarkSegment::Twenty, 1).with_extra_points(5)],
    );
    assert!(err.is_err());
}

/// Home closes every segment but trails 45 to 50; the win only comes once
/// home pulls ahead.
#[test]
fn win_requires_points_not_behind() {
    let mut d = Driver::new(GameVariant::Cricket, one_v_one());
    // Seed the board directly: away 50 points, home 45 with bull still open.
    {
        let board = match &mut d.state.progress {
            crate::domain::state::Progress::Marks { board } => board,
            _ => unreachable!(),
        };
        let home = board.side_mut(SideSlot::Home);
        for seg in CRICKET_SEGMENTS {
            home.marks[seg.index()] = 3;
        }
        home.marks[MarkSegment::Bull.index()] = 2;
        home.points = 45;
        board.side_mut(SideSlot::Away).points = 50;
    }

    d.play(taps(&[(MarkSegment::Bull, 1)])).unwrap();
    assert_eq!(d.state.winner, None);

    // away misses; home scores 6 on the 20s
    d.play(taps(&[])).unwrap();
    let effect = d.play(taps(&[(MarkSegment::Twenty, 1)])).unwrap();
    assert_eq!(effect.score, 20);
    assert_eq!(d.state.winner, Some(HOME));
    assert_ne!(d.state.winner, Some(AWAY));
}

#[test]
fn shanghai_bonus_takes_a_turn_in_the_rotation() {
    let mut d = Driver::new(GameVariant::Shanghai, one_v_one());
    let before = d.current();
    let effect = d.play(TurnInput::ShanghaiBonus).unwrap();
    assert_eq!(effect.score, 200);
    assert_eq!(effect.darts_thrown, 0);
    assert_ne!(d.current(), before);
    assert_eq!(d.current().player_id, 20);
    assert_eq!(d.state.turns, 1);
    assert_eq!(d.state.mark_board().unwrap().side(SideSlot::Home).points, 200);
}

#[test]
fn bonus_turns_count_toward_rounds() {
    let mut d = Driver::new(GameVariant::Shanghai, one_v_one());
    d.play(taps(&[(MarkSegment::Twenty, 1)])).unwrap();
    d.play(taps(&[(MarkSegment::Twenty, 1)])).unwrap();
    d.play(TurnInput::ShanghaiBonus).unwrap();
    assert_eq!(d.current().player_id, 20);
    d.play(taps(&[(MarkSegment::Nineteen, 1)])).unwrap();
    d.play(taps(&[(MarkSegment::Nineteen, 1)])).unwrap();

    let seen: Vec<_> = d
        .history
        .iter()
        .map(|t| (t.turn_number, t.player_id, t.round_number))
        .collect();
    assert_eq!(
        seen,
        vec![(1, 10, 1), (2, 20, 1), (3, 10, 2), (4, 20, 2), (5, 10, 3)]
    );
    for t in &d.history {
        assert_eq!(t.round_number, (t.turn_number - 1) / 2 + 1);
    }
}

#[test]
fn bonus_not_available_in_cricket() {
    let mut d = Driver::new(GameVariant::Cricket, one_v_one());
    let err = d.play(TurnInput::ShanghaiBonus).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::VariantMismatch, _)
    ));
}
