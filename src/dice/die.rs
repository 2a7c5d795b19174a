//! A single die face.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number on a die (1-6).
pub type Pip = u8;

/// Immutable die face value in 1..=6, ordered by face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Die(Pip);

impl Die {
    pub const MIN: Pip = 1;
    pub const MAX: Pip = 6;

    /// Create a die, `None` for faces outside 1..=6.
    #[must_use]
    pub const fn new(face: Pip) -> Option<Self> {
        if face >= Self::MIN && face <= Self::MAX {
            Some(Self(face))
        } else {
            None
        }
    }

    /// Create a die from a face the caller has already range-checked.
    pub(crate) fn from_face(face: Pip) -> Self {
        debug_assert!((Self::MIN..=Self::MAX).contains(&face), "die face {} out of range", face);
        Self(face)
    }

    #[must_use]
    pub const fn face(self) -> Pip {
        self.0
    }
}

impl TryFrom<u8> for Die {
    type Error = String;

    fn try_from(face: u8) -> Result<Self, Self::Error> {
        Die::new(face).ok_or_else(|| format!("invalid die face {}", face))
    }
}

impl From<Die> for u8 {
    fn from(die: Die) -> Self {
        die.0
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
