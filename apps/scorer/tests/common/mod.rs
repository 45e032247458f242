#![allow(dead_code)]

// tests/common/mod.rs
use std::sync::Arc;

use scorer::domain::board::Dart;
use scorer::domain::marks::MarkSegment;
use scorer::domain::match_result::MatchKind;
use scorer::domain::roster::{GameId, GamePlayer, MatchId, PlayerId, Roster, SideId};
use scorer::domain::turn::{SegmentTap, TurnInput};
use scorer::repos::games::Game;
use scorer::{
    AppError, EngineConfig, GameFlowService, MemoryStore, NewGameRequest, SubmitOutcome,
    VariantSetup,
};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    scorer_test_support::logging::init();
}

pub const HOME: SideId = 1;
pub const AWAY: SideId = 2;

pub type Service = GameFlowService<MemoryStore>;

/// Service over a fresh in-memory store with a fixed shuffle seed.
pub fn service() -> Service {
    service_with(EngineConfig {
        rtw_seed: Some(42),
        ..EngineConfig::default()
    })
}

pub fn service_with(config: EngineConfig) -> Service {
    GameFlowService::new(Arc::new(MemoryStore::new()), config)
}

pub fn gp(player_id: PlayerId, side_id: SideId, order: u8) -> GamePlayer {
    GamePlayer {
        player_id,
        side_id,
        order,
    }
}

/// Player 10 (home) vs player 20 (away).
pub fn one_v_one() -> Roster {
    Roster::new(HOME, AWAY, vec![gp(10, HOME, 1), gp(20, AWAY, 1)]).expect("valid roster")
}

/// A=10, B=11 (home) vs C=20, D=21 (away).
pub fn two_v_two() -> Roster {
    Roster::new(
        HOME,
        AWAY,
        vec![gp(10, HOME, 1), gp(11, HOME, 2), gp(20, AWAY, 1), gp(21, AWAY, 2)],
    )
    .expect("valid roster")
}

pub fn x01(target: u16) -> VariantSetup {
    VariantSetup::X01 {
        target: Some(target),
        double_in: false,
        double_out: Some(true),
    }
}

pub async fn adhoc_game(svc: &Service, setup: VariantSetup, roster: Roster) -> Game {
    svc.create_game(NewGameRequest {
        match_id: None,
        game_number: 1,
        match_kind: MatchKind::AdHoc,
        setup,
        roster,
    })
    .await
    .expect("create ad-hoc game")
}

pub async fn league_game(
    svc: &Service,
    match_id: MatchId,
    game_number: u32,
    setup: VariantSetup,
    roster: Roster,
) -> Game {
    svc.create_game(NewGameRequest {
        match_id: Some(match_id),
        game_number,
        match_kind: MatchKind::League,
        setup,
        roster,
    })
    .await
    .expect("create league game")
}

/// Parse darts like "T20 D16 MISS".
pub fn darts(s: &str) -> TurnInput {
    TurnInput::Darts {
        darts: s
            .split_whitespace()
            .map(|d| d.parse::<Dart>().expect("valid dart"))
            .collect(),
    }
}

pub fn taps(entries: &[(MarkSegment, u8)]) -> TurnInput {
    TurnInput::Marks {
        taps: entries
            .iter()
            .map(|(segment, n)| SegmentTap::new(*segment, *n))
            .collect(),
    }
}

/// Submit `input` as whoever is due to throw.
pub async fn throw(
    svc: &Service,
    game_id: GameId,
    input: TurnInput,
) -> Result<SubmitOutcome, AppError> {
    let due = svc
        .current_thrower(game_id)
        .await?
        .expect("game should still be open");
    svc.submit_turn(game_id, due.player_id, due.side_id, input)
        .await
}

/// Submit each input in turn, failing the test on any error.
pub async fn throw_all(svc: &Service, game_id: GameId, inputs: Vec<TurnInput>) -> Vec<SubmitOutcome> {
    let mut out = Vec::with_capacity(inputs.len());
    for input in inputs {
        out.push(throw(svc, game_id, input).await.expect("turn accepted"));
    }
    out
}
