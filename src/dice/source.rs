//! The "roll fair dice" capability.
//!
//! The engine never draws randomness itself; sessions are generic over a
//! `DiceSource`. `GameRng` is the production source, `LoadedDice` replays a
//! scripted sequence of faces.

use std::collections::VecDeque;

use super::die::{Die, Pip};
use super::hand::Hand;
use crate::core::GameRng;

/// Source of fair die rolls.
pub trait DiceSource {
    /// Roll one die.
    fn roll_die(&mut self) -> Die;

    /// Roll `n` dice into a sorted hand.
    fn roll(&mut self, n: usize) -> Hand {
        Hand::from_dice((0..n).map(|_| self.roll_die()))
    }
}

impl<D: DiceSource + ?Sized> DiceSource for &mut D {
    fn roll_die(&mut self) -> Die {
        (**self).roll_die()
    }
}

/// Scripted dice: yields the queued faces in order, then falls back to a
/// seeded `GameRng`.
///
/// ```
/// use yatzy_engine::dice::{DiceSource, LoadedDice};
///
/// let mut dice = LoadedDice::new([6, 6, 6, 6, 6]);
/// assert!(dice.roll(5).is_all_same());
/// ```
#[derive(Clone, Debug)]
pub struct LoadedDice {
    queue: VecDeque<Die>,
    fallback: GameRng,
}

impl LoadedDice {
    /// Queue faces to be rolled in order.
    ///
    /// Panics on a face outside 1..=6.
    pub fn new(faces: impl IntoIterator<Item = Pip>) -> Self {
        let mut dice = Self {
            queue: VecDeque::new(),
            fallback: GameRng::new(0),
        };
        dice.load(faces);
        dice
    }

    /// Append more faces to the queue.
    pub fn load(&mut self, faces: impl IntoIterator<Item = Pip>) {
        for face in faces {
            let die = Die::new(face).unwrap_or_else(|| panic!("loaded die face {} out of range", face));
            self.queue.push_back(die);
        }
    }

    /// Faces still queued.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl DiceSource for LoadedDice {
    fn roll_die(&mut self) -> Die {
        match self.queue.pop_front() {
            Some(die) => die,
            None => self.fallback.roll_die(),
        }
    }
}
