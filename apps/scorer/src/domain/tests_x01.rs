use crate::domain::board::Dart;
use crate::domain::test_state_helpers::{one_v_one, x01, Driver};
use crate::domain::turn::{TurnDetails, TurnInput};
use crate::domain::x01::{score_darts, score_total, BustReason, X01Rules, X01Side};
use crate::errors::domain::{DomainError, ValidationKind};

const DOUBLE_OUT: X01Rules = X01Rules {
    target: 501,
    double_in: false,
    double_out: true,
};

fn side(remaining: u16) -> X01Side {
    X01Side {
        remaining,
        doubled_in: true,
    }
}

#[test]
fn bust_on_non_double_finish_keeps_remaining() {
    // 41 left, S1 + S20 + S20 reaches zero on a single.
    let darts = [Dart::single(1), Dart::single(20), Dart::single(20)];
    let facts = score_darts(&DOUBLE_OUT, &side(41), &darts).unwrap();
    assert_eq!(facts.bust, Some(BustReason::NoDoubleFinish));
    assert_eq!(facts.score, 0);
    assert_eq!(facts.remaining_after, 41);
    assert!(!facts.is_game_out);
}

#[test]
fn double_twenty_checks_out_from_forty() {
    let facts = score_darts(&DOUBLE_OUT, &side(40), &[Dart::double(20)]).unwrap();
    assert!(facts.is_game_out);
    assert_eq!(facts.remaining_after, 0);
    assert_eq!(facts.score, 40);
    assert_eq!(facts.darts_thrown, 1);
}

#[test]
fn darts_after_checkout_are_ignored() {
    let darts = [Dart::single(10), Dart::double(15), Dart::triple(20)];
    let facts = score_darts(&DOUBLE_OUT, &side(40), &darts).unwrap();
    assert!(facts.is_game_out);
    assert_eq!(facts.darts_thrown, 2);
    assert_eq!(facts.score, 40);
}

#[test]
fn bust_stops_evaluating_remaining_darts() {
    // T20 takes 50 below zero on the first dart.
    let darts = [Dart::triple(20), Dart::double(5), Dart::miss()];
    let facts = score_darts(&DOUBLE_OUT, &side(50), &darts).unwrap();
    assert_eq!(facts.bust, Some(BustReason::BelowZero));
    assert_eq!(facts.darts_thrown, 1);
}

#[test]
fn leaving_one_busts_only_with_double_out() {
    let facts = score_darts(&DOUBLE_OUT, &side(21), &[Dart::single(20)]).unwrap();
    assert_eq!(facts.bust, Some(BustReason::LeftOne));

    let open = X01Rules {
        double_out: false,
        ..DOUBLE_OUT
    };
    let facts = score_darts(&open, &side(21), &[Dart::single(20)]).unwrap();
    assert_eq!(facts.bust, None);
    assert_eq!(facts.remaining_after, 1);

    let facts = score_darts(&open, &side(20), &[Dart::single(20)]).unwrap();
    assert!(facts.is_game_out);
}

#[test]
fn double_in_counts_from_first_double() {
    let rules = X01Rules {
        double_in: true,
        ..DOUBLE_OUT
    };
    let fresh = X01Side::start(&rules);
    assert!(!fresh.doubled_in);

    let darts = [Dart::triple(20), Dart::double(10), Dart::single(5)];
    let facts = score_darts(&rules, &fresh, &darts).unwrap();
    assert!(facts.is_double_in);
    assert_eq!(facts.score, 25);
    assert_eq!(facts.remaining_after, 476);

    let none = [Dart::triple(20), Dart::triple(20), Dart::single(1)];
    let facts = score_darts(&rules, &fresh, &none).unwrap();
    assert!(!facts.is_double_in);
    assert_eq!(facts.score, 0);
    assert_eq!(facts.bust, None);
}

#[test]
fn total_mode_checks_range_and_reachability() {
    let err = score_total(&DOUBLE_OUT, &side(501), 181, 3, false).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::ScoreOutOfRange, _)
    ));
    let err = score_total(&DOUBLE_OUT, &side(501), 179, 3, false).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::ScoreOutOfRange, _)
    ));
    let err = score_total(&DOUBLE_OUT, &side(501), 60, 0, false).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::MalformedInput, _)
    ));

    let facts = score_total(&DOUBLE_OUT, &side(501), 180, 3, false).unwrap();
    assert_eq!(facts.remaining_after, 321);
}

#[test]
fn total_mode_busts_match_dart_mode() {
    let facts = score_total(&DOUBLE_OUT, &side(41), 41, 3, false).unwrap();
    assert_eq!(facts.bust, Some(BustReason::NoDoubleFinish));
    let facts = score_total(&DOUBLE_OUT, &side(41), 41, 2, true).unwrap();
    assert!(facts.is_game_out);
    let facts = score_total(&DOUBLE_OUT, &side(41), 40, 3, false).unwrap();
    assert_eq!(facts.bust, Some(BustReason::LeftOne));
}

#[test]
fn total_mode_auto_doubles_in() {
    let rules = X01Rules {
        double_in: true,
        ..DOUBLE_OUT
    };
    let facts = score_total(&rules, &X01Side::start(&rules), 45, 3, false).unwrap();
    assert!(facts.is_double_in);
    let facts = score_total(&rules, &X01Side::start(&rules), 0, 3, false).unwrap();
    assert!(!facts.is_double_in);
}

#[test]
fn empty_and_oversized_turns_are_malformed() {
    assert!(score_darts(&DOUBLE_OUT, &side(501), &[]).is_err());
    let four = [Dart::single(1); 4];
    assert!(score_darts(&DOUBLE_OUT, &side(501), &four).is_err());
}

#[test]
fn bust_turn_is_recorded_with_zero_score() {
    let mut d = Driver::new(x01(41, false, true), one_v_one());
    let effect = d
        .play(TurnInput::Darts {
            darts: vec![Dart::single(1), Dart::single(20), Dart::single(20)],
        })
        .unwrap();
    assert_eq!(effect.score, 0);
    assert!(effect.details.is_bust());
    let view = d.state.view(&d.variant, &d.roster);
    assert_eq!(view.sides[0].remaining, Some(41));
    assert_eq!(d.history.len(), 1);
    assert!(matches!(d.history[0].details, TurnDetails::X01(_)));
}
