use crate::domain::roster::Roster;
use crate::domain::test_state_helpers::{gp, one_v_one, two_v_two, AWAY, HOME};
use crate::domain::turn_order::{
    cork_order, natural_order, policy_for_game, rematch_order, resolve, validate_order,
    OrderPolicy, OrderSource, ThrowOrder,
};

#[test]
fn natural_order_alternates_sides() {
    let r = two_v_two();
    let order = natural_order(&r);
    assert_eq!(order.players, vec![10, 20, 11, 21]);
    assert_eq!(order.source, OrderSource::Natural);
}

#[test]
fn rotation_index_and_round_follow_turn_count() {
    let r = two_v_two();
    let order = natural_order(&r);
    let t = resolve(&r, &order, 4).unwrap();
    assert_eq!((t.player_id, t.round, t.rotation_index), (10, 2, 0));
    let t = resolve(&r, &order, 6).unwrap();
    assert_eq!((t.player_id, t.round), (11, 2));

    // A vs B: after five turns B is up, in round three.
    let solo = Roster::new(HOME, AWAY, vec![gp(10, HOME, 1), gp(20, AWAY, 1)]).unwrap();
    let o = natural_order(&solo);
    let t = resolve(&solo, &o, 5).unwrap();
    assert_eq!((t.player_id, t.side_id, t.round), (20, AWAY, 3));
}

#[test]
fn cork_order_winner_then_second_then_partners() {
    let r = two_v_two();
    let order = cork_order(&r, 21, Some(11)).unwrap();
    assert_eq!(order.players, vec![21, 11, 20, 10]);
    assert_eq!(order.source, OrderSource::Cork);
    assert!(validate_order(&r, &order).is_ok());

    // second must be an opponent
    assert!(cork_order(&r, 21, Some(20)).is_err());
    // single opponent needs no choice
    let solo = one_v_one();
    assert_eq!(cork_order(&solo, 20, None).unwrap().players, vec![20, 10]);
}

#[test]
fn even_game_loser_first_reversed() {
    let r = two_v_two();
    let prev = ThrowOrder {
        players: vec![10, 21, 11, 20],
        source: OrderSource::Cork,
    };
    let order = OrderPolicy::LoserFirstReversed.derive(&r, &prev).unwrap();
    assert_eq!(order.players, vec![21, 11, 20, 10]);
    assert_eq!(order.source, OrderSource::AutoRematch);

    assert_eq!(policy_for_game(2), Some(OrderPolicy::LoserFirstReversed));
    assert_eq!(policy_for_game(3), None);
    assert_eq!(policy_for_game(1), None);
}

#[test]
fn rematch_loser_opens_in_roster_order() {
    let r = two_v_two();
    let order = rematch_order(&r, AWAY).unwrap();
    assert_eq!(order.players, vec![20, 10, 21, 11]);
    assert!(rematch_order(&r, 99).is_err());
}

#[test]
fn uneven_sides_append_leftovers() {
    let r = Roster::new(
        HOME,
        AWAY,
        vec![gp(10, HOME, 1), gp(11, HOME, 2), gp(12, HOME, 3), gp(20, AWAY, 1)],
    )
    .unwrap();
    assert_eq!(natural_order(&r).players, vec![10, 20, 11, 12]);
}

#[test]
fn validate_order_rejects_partial_rotation() {
    let r = two_v_two();
    let bad = ThrowOrder {
        players: vec![10, 20, 11],
        source: OrderSource::Cork,
    };
    assert!(validate_order(&r, &bad).is_err());
}
