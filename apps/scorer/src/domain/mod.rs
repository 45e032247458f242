//! Domain layer: pure scoring rules, no I/O.

pub mod all_star;
pub mod board;
pub mod cricket;
pub mod marks;
pub mod match_result;
pub mod round_the_world;
pub mod roster;
pub mod state;
pub mod stats;
pub mod turn;
pub mod turn_order;
pub mod variant;
pub mod x01;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod test_state_helpers;
#[cfg(test)]
mod tests_all_star;
#[cfg(test)]
mod tests_cricket;
#[cfg(test)]
mod tests_turn_order;
#[cfg(test)]
mod tests_x01;

// Re-exports for ergonomics
pub use board::{Dart, Multiplier, Target};
pub use marks::{MarkBoard, MarkSegment};
pub use roster::{GameId, GamePlayer, MatchId, PlayerId, Roster, SideId, SideSlot};
pub use state::{replay, DerivedState, GameState, GameStatus, TurnEffect};
pub use turn::{Actor, SegmentTap, TurnDetails, TurnInput, TurnRecord};
pub use turn_order::{OrderPolicy, OrderSource, ThrowOrder, Thrower};
pub use variant::{GameVariant, RtwMode, VariantKind};
