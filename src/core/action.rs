//! Action history records.
//!
//! Every state change a session applies is appended to its history as an
//! `ActionRecord`. Hosts use the history for replays and post-mortems; the
//! engine never reads it back to make decisions.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use crate::dice::Hand;
use crate::rules::{Category, Score};

/// A state change applied to a running session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Initial roll of the turn.
    Roll { hand: Hand },
    /// Reroll of the given 0-based positions, with the resulting hand.
    Reroll {
        positions: SmallVec<[usize; 6]>,
        hand: Hand,
        /// Whether a banked reroll paid for this reroll.
        banked: bool,
    },
    /// Scored the hand into a category.
    Commit { category: Category, score: Score },
    /// Left the running game; remaining boxes zero-filled.
    Leave,
    /// Kicked for inactivity; remaining boxes zero-filled.
    Kicked,
}

/// A recorded action with ordering metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The seat the action applied to.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when the action was taken (starts at 1).
    pub turn: u32,

    /// Sequence number within the turn.
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
