//! Turn-order roll-off.
//!
//! Every remaining contender rolls one die; the single highest roller takes
//! the next place. A tie for highest sends only the tied players into a
//! sudden-death reroll until one of them is alone on top. The last
//! contender takes the last place without rolling.
//!
//! Each sudden-death round shrinks or keeps the tied set and draws fresh
//! dice, so the loop ends with probability 1. There is no round cap.

use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::Player;
use crate::dice::{DiceSource, Pip};

/// Something that happened during the roll-off, in order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOrderEvent {
    Rolled { player: Player, face: Pip },
    /// Several players share the highest face and roll again.
    Tie { players: Vec<Player>, face: Pip },
    /// 1-based turn position assigned.
    Placed { player: Player, place: usize },
}

impl TurnOrderEvent {
    /// The player this event is about, `None` for ties.
    #[must_use]
    pub fn player(&self) -> Option<&Player> {
        match self {
            TurnOrderEvent::Rolled { player, .. } | TurnOrderEvent::Placed { player, .. } => {
                Some(player)
            }
            TurnOrderEvent::Tie { .. } => None,
        }
    }
}

impl fmt::Display for TurnOrderEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnOrderEvent::Rolled { player, face } => write!(f, "{} rolled {}", player, face),
            TurnOrderEvent::Tie { players, face } => {
                let names: Vec<&str> = players.iter().map(Player::name).collect();
                write!(f, "{} tied with {}, rolling again", names.join(", "), face)
            }
            TurnOrderEvent::Placed { player, place } => {
                write!(f, "{} takes turn {}", player, place)
            }
        }
    }
}

/// Decide the turn order of `roster`.
///
/// Returns the roster reordered by assigned place plus the event log.
pub fn decide_turn_order(
    roster: &[Player],
    dice: &mut impl DiceSource,
) -> (Vec<Player>, Vec<TurnOrderEvent>) {
    let mut contenders: Vec<Player> = roster.to_vec();
    let mut order = Vec::with_capacity(roster.len());
    let mut events = Vec::new();

    while contenders.len() > 1 {
        let mut rolling: Vec<usize> = (0..contenders.len()).collect();
        let winner = loop {
            let faces: Vec<Pip> = rolling.iter().map(|_| dice.roll_die().face()).collect();
            for (&i, &face) in rolling.iter().zip(&faces) {
                events.push(TurnOrderEvent::Rolled {
                    player: contenders[i].clone(),
                    face,
                });
            }

            let top = faces.iter().copied().max().unwrap_or_default();
            let tied: Vec<usize> = rolling
                .iter()
                .zip(&faces)
                .filter(|&(_, &face)| face == top)
                .map(|(&i, _)| i)
                .collect();
            trace!("turn order round: {} rolled, {} tied at {}", rolling.len(), tied.len(), top);

            if let [single] = tied.as_slice() {
                break *single;
            }
            events.push(TurnOrderEvent::Tie {
                players: tied.iter().map(|&i| contenders[i].clone()).collect(),
                face: top,
            });
            rolling = tied;
        };

        let player = contenders.remove(winner);
        order.push(player.clone());
        events.push(TurnOrderEvent::Placed {
            player,
            place: order.len(),
        });
    }

    if let Some(player) = contenders.pop() {
        order.push(player.clone());
        events.push(TurnOrderEvent::Placed {
            player,
            place: order.len(),
        });
    }

    (order, events)
}
