//! Per-player score cards and the multi-player scoreboard.
//!
//! - `card`: one player's boxes and derived totals
//! - `board`: legal moves, commits, forfeiture, completion
//! - `ranking`: final standings
//! - `table`: cards rendered as plain rows

pub mod board;
pub mod card;
pub mod ranking;
pub mod table;

pub use board::{CommitOutcome, ScoreOption, ScoreOptions, Scoreboard};
pub use card::{ScoreBox, ScoreCard, Totals};
pub use ranking::{rank_standings, Standing};
pub use table::{Derived, FullTable, PlayerTable, RowLabel, ScoreRow};
