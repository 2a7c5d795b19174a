//! Scoring rules.
//!
//! - `category`: stable category identifiers, names and command codes
//! - `rule`: declarative scoring rules and the pattern functions behind them
//! - `table`: per-variant category layout with joker rules and ceilings
//!
//! Everything here is pure. Rules never decide legality; the scoreboard
//! does.

pub mod category;
pub mod rule;
pub mod table;

pub use category::{Category, Section, UnknownCategory};
pub use rule::{exact_run, groups, longest_run, of_a_kind, sum_of_face, GroupSizes, Rule, Score};
pub use table::{
    layout, CategorySpec, JOKER_FULL_HOUSE, JOKER_LARGE_STRAIGHT, JOKER_SMALL_STRAIGHT,
    YAHTZEE_BONUS,
};
