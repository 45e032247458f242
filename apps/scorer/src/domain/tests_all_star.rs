use crate::domain::all_star::{classify_marks, classify_x01, AllStarTier};
use crate::domain::cricket::MarkTurnFacts;
use crate::domain::x01::{BustReason, X01Input, X01TurnFacts};

fn x01_facts(score: u16, double_in: bool, game_out: bool) -> X01TurnFacts {
    X01TurnFacts {
        input: X01Input::Total {
            score,
            darts_thrown: 3,
            finished_on_double: game_out,
        },
        darts_thrown: 3,
        score,
        remaining_before: 501,
        remaining_after: 501 - score,
        is_double_in: double_in,
        is_game_out: game_out,
        bust: None,
    }
}

fn mark_facts(marks: u8, bull: u8) -> MarkTurnFacts {
    MarkTurnFacts {
        segments: Vec::new(),
        marks_scored: marks,
        bull_marks: bull,
        points: 0,
        closed: Vec::new(),
        is_cricket_close: false,
    }
}

#[test]
fn x01_tiers() {
    assert_eq!(classify_x01(&x01_facts(94, false, false)), None);
    assert_eq!(classify_x01(&x01_facts(95, false, false)), Some(AllStarTier::AllStar));
    assert_eq!(classify_x01(&x01_facts(126, false, false)), Some(AllStarTier::Double));
    assert_eq!(classify_x01(&x01_facts(171, false, false)), Some(AllStarTier::Triple));
}

#[test]
fn double_in_and_out_double_the_score() {
    assert_eq!(classify_x01(&x01_facts(48, true, false)), Some(AllStarTier::AllStar));
    assert_eq!(classify_x01(&x01_facts(63, false, true)), Some(AllStarTier::Double));
    assert_eq!(classify_x01(&x01_facts(47, true, false)), None);
}

#[test]
fn busts_never_classify() {
    let mut f = x01_facts(0, false, false);
    f.bust = Some(BustReason::BelowZero);
    assert_eq!(classify_x01(&f), None);
}

#[test]
fn mark_tiers() {
    assert_eq!(classify_marks(&mark_facts(4, 0)), None);
    assert_eq!(classify_marks(&mark_facts(5, 0)), Some(AllStarTier::AllStar));
    assert_eq!(classify_marks(&mark_facts(7, 0)), Some(AllStarTier::Double));
    assert_eq!(classify_marks(&mark_facts(9, 0)), Some(AllStarTier::Triple));
}

#[test]
fn three_bulls_is_an_all_star_whatever_the_marks() {
    assert_eq!(classify_marks(&mark_facts(3, 3)), Some(AllStarTier::AllStar));
    assert_eq!(classify_marks(&mark_facts(7, 3)), Some(AllStarTier::AllStar));
    assert_eq!(classify_marks(&mark_facts(9, 3)), Some(AllStarTier::AllStar));
    assert_eq!(classify_marks(&mark_facts(9, 2)), Some(AllStarTier::Triple));
}
