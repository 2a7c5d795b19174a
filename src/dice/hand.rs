//! A sorted hand of 5 or 6 dice.
//!
//! The hand is kept sorted ascending at all times so that pattern matching
//! depends only on the multiset of faces. Positions used by rerolls are
//! 0-based indices into this sorted order.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use super::die::{Die, Pip};
use super::source::DiceSource;

/// Face counts indexed by face value (index 0 unused).
pub type FaceCounts = [u8; 7];

/// Dice in a hand: 5 standard, 6 under Maxi.
pub const HAND_SIZES: std::ops::RangeInclusive<usize> = 5..=6;

/// Sorted sequence of dice.
///
/// Deserialization accepts 5 or 6 dice in any order and sorts them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SmallVec<[Die; 6]>")]
pub struct Hand(SmallVec<[Die; 6]>);

impl Hand {
    /// Build a hand from dice in any order.
    pub fn from_dice(dice: impl IntoIterator<Item = Die>) -> Self {
        let mut dice: SmallVec<[Die; 6]> = dice.into_iter().collect();
        dice.sort_unstable();
        Self(dice)
    }

    /// Build a hand from raw faces, `None` if any face is outside 1..=6 or
    /// the hand does not hold 5 or 6 dice.
    ///
    /// ```
    /// use yatzy_engine::dice::Hand;
    ///
    /// let hand = Hand::from_faces(&[5, 1, 4, 1, 1]).unwrap();
    /// assert_eq!(hand.faces().collect::<Vec<_>>(), vec![1, 1, 1, 4, 5]);
    /// assert!(Hand::from_faces(&[0, 1, 2, 3, 4]).is_none());
    /// assert!(Hand::from_faces(&[1, 2, 3, 4]).is_none());
    /// ```
    #[must_use]
    pub fn from_faces(faces: &[Pip]) -> Option<Self> {
        if !HAND_SIZES.contains(&faces.len()) {
            return None;
        }
        faces
            .iter()
            .map(|&f| Die::new(f))
            .collect::<Option<SmallVec<[Die; 6]>>>()
            .map(Self::from_dice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn dice(&self) -> &[Die] {
        &self.0
    }

    pub fn faces(&self) -> impl Iterator<Item = Pip> + '_ {
        self.0.iter().map(|d| d.face())
    }

    /// Face at a 0-based position.
    #[must_use]
    pub fn face_at(&self, position: usize) -> Option<Pip> {
        self.0.get(position).map(|d| d.face())
    }

    #[must_use]
    pub fn counts(&self) -> FaceCounts {
        let mut counts = [0u8; 7];
        for face in self.faces() {
            counts[face as usize] += 1;
        }
        counts
    }

    #[must_use]
    pub fn sum(&self) -> u32 {
        self.faces().map(u32::from).sum()
    }

    /// All dice show the same face.
    #[must_use]
    pub fn is_all_same(&self) -> bool {
        self.0.windows(2).all(|w| w[0] == w[1]) && !self.0.is_empty()
    }

    /// New hand with the given positions replaced by fresh dice, re-sorted.
    ///
    /// Positions must already be validated against `len()`. The receiver is
    /// untouched, so a caller can validate, reroll and only then swap.
    #[must_use]
    pub fn rerolled(&self, positions: &[usize], source: &mut impl DiceSource) -> Self {
        let mut dice = self.0.clone();
        for &position in positions {
            dice[position] = source.roll_die();
        }
        Self::from_dice(dice)
    }

    /// Resolve requested face values to distinct positions holding them.
    ///
    /// Each requested face consumes one die. Returns `None` when the hand
    /// does not contain every requested face as often as requested.
    #[must_use]
    pub fn positions_of_faces(&self, faces: &[Pip]) -> Option<SmallVec<[usize; 6]>> {
        let mut used: SmallVec<[bool; 6]> = SmallVec::from_elem(false, self.len());
        let mut positions = SmallVec::new();
        for &face in faces {
            let position = self
                .0
                .iter()
                .enumerate()
                .position(|(i, d)| !used[i] && d.face() == face)?;
            used[position] = true;
            positions.push(position);
        }
        Some(positions)
    }
}

impl TryFrom<SmallVec<[Die; 6]>> for Hand {
    type Error = String;

    fn try_from(dice: SmallVec<[Die; 6]>) -> Result<Self, Self::Error> {
        if !HAND_SIZES.contains(&dice.len()) {
            return Err(format!("a hand holds 5 or 6 dice, got {}", dice.len()));
        }
        Ok(Self::from_dice(dice))
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for die in &self.0 {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{}", die)?;
            first = false;
        }
        Ok(())
    }
}
