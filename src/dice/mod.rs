//! Dice: single die faces, sorted hands and the rolling capability.

pub mod die;
pub mod hand;
pub mod source;

pub use die::{Die, Pip};
pub use hand::{FaceCounts, Hand, HAND_SIZES};
pub use source::{DiceSource, LoadedDice};
