//! Reroll selection: the pending pool and position validation.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::PlayerError;

/// Validated, 0-based die positions.
pub type Positions = SmallVec<[usize; 6]>;

/// Check a reroll selection against a hand of `dice` dice.
///
/// The selection must be non-empty, in range and free of repeats. The
/// positions are returned in the order given.
pub fn check_positions(positions: &[usize], dice: usize) -> Result<Positions, PlayerError> {
    if positions.is_empty() {
        return Err(PlayerError::EmptySelection);
    }
    let mut seen = 0u8;
    for &position in positions {
        if position >= dice {
            return Err(PlayerError::InvalidPosition { position, dice });
        }
        let bit = 1 << position;
        if seen & bit != 0 {
            return Err(PlayerError::DuplicatePosition { position });
        }
        seen |= bit;
    }
    Ok(SmallVec::from_slice(positions))
}

/// Die positions queued for the next pooled reroll.
///
/// ```
/// use yatzy_engine::session::RerollPool;
///
/// let mut pool = RerollPool::default();
/// pool.toggle(1);
/// pool.toggle(3);
/// pool.toggle(1);
/// assert_eq!(pool.positions().as_slice(), &[3]);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RerollPool(u8);

impl RerollPool {
    #[must_use]
    pub fn contains(self, position: usize) -> bool {
        position < 8 && self.0 & (1 << position) != 0
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Queued positions, ascending.
    #[must_use]
    pub fn positions(self) -> Positions {
        (0..8).filter(|&p| self.contains(p)).collect()
    }

    /// Flip one position. Returns whether it is now queued.
    pub fn toggle(&mut self, position: usize) -> bool {
        self.0 ^= 1 << position;
        self.contains(position)
    }

    pub fn add(&mut self, position: usize) -> Result<(), PlayerError> {
        if self.contains(position) {
            return Err(PlayerError::AlreadyQueued { position });
        }
        self.0 |= 1 << position;
        Ok(())
    }

    pub fn remove(&mut self, position: usize) -> Result<(), PlayerError> {
        if !self.contains(position) {
            return Err(PlayerError::NotQueued { position });
        }
        self.0 &= !(1 << position);
        Ok(())
    }

    /// Queue every position of a hand of `dice` dice.
    pub fn select_all(&mut self, dice: usize) {
        self.0 = ((1u16 << dice) - 1) as u8;
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }
}
