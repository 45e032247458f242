//! Small fixtures for driving the pure engine in tests.

use crate::domain::roster::{GamePlayer, PlayerId, Roster, SideId};
use crate::domain::state::{GameState, TurnEffect};
use crate::domain::turn::{Actor, TurnInput, TurnRecord};
use crate::domain::turn_order::{natural_order, resolve, ThrowOrder};
use crate::domain::variant::GameVariant;
use crate::errors::domain::DomainError;

pub const HOME: SideId = 1;
pub const AWAY: SideId = 2;

pub fn gp(player_id: PlayerId, side_id: SideId, order: u8) -> GamePlayer {
    GamePlayer {
        player_id,
        side_id,
        order,
    }
}

/// Player 10 (home) vs player 20 (away).
pub fn one_v_one() -> Roster {
    Roster::new(HOME, AWAY, vec![gp(10, HOME, 1), gp(20, AWAY, 1)]).unwrap()
}

/// A=10, B=11 (home) vs C=20, D=21 (away).
pub fn two_v_two() -> Roster {
    Roster::new(
        HOME,
        AWAY,
        vec![gp(10, HOME, 1), gp(11, HOME, 2), gp(20, AWAY, 1), gp(21, AWAY, 2)],
    )
    .unwrap()
}

pub fn x01(target: u16, double_in: bool, double_out: bool) -> GameVariant {
    GameVariant::X01 {
        target,
        double_in,
        double_out,
    }
}

/// Plays turns in natural order and keeps the history.
pub struct Driver {
    pub variant: GameVariant,
    pub roster: Roster,
    pub order: ThrowOrder,
    pub state: GameState,
    pub history: Vec<TurnRecord>,
}

impl Driver {
    pub fn new(variant: GameVariant, roster: Roster) -> Self {
        let state = GameState::new(&variant, &roster);
        let order = natural_order(&roster);
        Self {
            variant,
            roster,
            order,
            state,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> Actor {
        let t = resolve(&self.roster, &self.order, self.state.turns).unwrap();
        Actor {
            player_id: t.player_id,
            side_id: t.side_id,
        }
    }

    pub fn play(&mut self, input: TurnInput) -> Result<TurnEffect, DomainError> {
        let actor = self.current();
        let effect = self
            .state
            .evaluate(&self.variant, &self.roster, &actor, &input)?;
        let record = self.state.record_for(&self.roster, &actor, &effect);
        self.state
            .apply(&self.variant, &self.roster, &actor, &effect.details)?;
        self.history.push(record);
        Ok(effect)
    }

    pub fn undo(&mut self) -> Option<TurnRecord> {
        let last = self.history.pop()?;
        self.state.revert(&self.roster, &last).unwrap();
        Some(last)
    }
}
