//! Game sessions.
//!
//! - `game`: the `Session` state machine (roster, turns, rerolls, commits)
//! - `turn_order`: roll-off deciding who plays first
//! - `reroll`: reroll pool and position validation
//! - `snapshot`: serializable session images

pub mod game;
pub mod reroll;
pub mod snapshot;
pub mod turn_order;

pub use game::{Departure, Phase, Session, MAX_PLAYERS};
pub use reroll::{check_positions, Positions, RerollPool};
pub use snapshot::SessionSnapshot;
pub use turn_order::{decide_turn_order, TurnOrderEvent};
