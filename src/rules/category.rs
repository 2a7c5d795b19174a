//! Category identifiers.
//!
//! The set of identifiers, their display names and short command codes are
//! a stable contract with the transport layer. Which of them a scoreboard
//! carries depends on the variant, see `rules::layout`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::dice::Pip;

/// Scoreboard section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    /// The six digit boxes.
    Upper,
    /// Every combination box.
    Lower,
}

/// Scoring category identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Ones,
    /// Yahtzee name for Ones.
    Aces,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    OnePair,
    TwoPairs,
    ThreePairs,
    ThreeOfAKind,
    FourOfAKind,
    FiveOfAKind,
    FullHouse,
    Castle,
    Tower,
    SmallStraight,
    LargeStraight,
    FullStraight,
    Chance,
    Yatzy,
    Yahtzee,
    MaxiYatzy,
}

impl Category {
    /// Every identifier, in declaration order.
    pub const ALL: [Category; 23] = [
        Category::Ones,
        Category::Aces,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::OnePair,
        Category::TwoPairs,
        Category::ThreePairs,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FiveOfAKind,
        Category::FullHouse,
        Category::Castle,
        Category::Tower,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::FullStraight,
        Category::Chance,
        Category::Yatzy,
        Category::Yahtzee,
        Category::MaxiYatzy,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Category::Ones => "Ones",
            Category::Aces => "Aces",
            Category::Twos => "Twos",
            Category::Threes => "Threes",
            Category::Fours => "Fours",
            Category::Fives => "Fives",
            Category::Sixes => "Sixes",
            Category::OnePair => "One Pair",
            Category::TwoPairs => "Two Pairs",
            Category::ThreePairs => "Three Pairs",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::FourOfAKind => "Four of a Kind",
            Category::FiveOfAKind => "Five of a Kind",
            Category::FullHouse => "Full House",
            Category::Castle => "Castle",
            Category::Tower => "Tower",
            Category::SmallStraight => "Small Straight",
            Category::LargeStraight => "Large Straight",
            Category::FullStraight => "Full Straight",
            Category::Chance => "Chance",
            Category::Yatzy => "Yatzy",
            Category::Yahtzee => "Yahtzee",
            Category::MaxiYatzy => "Maxi Yatzy",
        }
    }

    /// Two-letter command code used by chat front ends.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Category::Ones => "on",
            Category::Aces => "ac",
            Category::Twos => "tw",
            Category::Threes => "th",
            Category::Fours => "fo",
            Category::Fives => "fi",
            Category::Sixes => "si",
            Category::OnePair => "op",
            Category::TwoPairs => "tp",
            Category::ThreePairs => "3p",
            Category::ThreeOfAKind => "tk",
            Category::FourOfAKind => "fk",
            Category::FiveOfAKind => "5k",
            Category::FullHouse => "fh",
            Category::Castle => "ca",
            Category::Tower => "to",
            Category::SmallStraight => "ss",
            Category::LargeStraight => "ls",
            Category::FullStraight => "fs",
            Category::Chance => "ch",
            Category::Yatzy => "ya",
            Category::Yahtzee => "yh",
            Category::MaxiYatzy => "my",
        }
    }

    /// Face counted by a digit box, `None` for combination boxes.
    #[must_use]
    pub const fn face(self) -> Option<Pip> {
        match self {
            Category::Ones | Category::Aces => Some(1),
            Category::Twos => Some(2),
            Category::Threes => Some(3),
            Category::Fours => Some(4),
            Category::Fives => Some(5),
            Category::Sixes => Some(6),
            _ => None,
        }
    }

    #[must_use]
    pub const fn section(self) -> Section {
        if self.face().is_some() {
            Section::Upper
        } else {
            Section::Lower
        }
    }

    /// Look up by display name or command code, case-insensitively.
    #[must_use]
    pub fn lookup(s: &str) -> Option<Category> {
        let s = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s) || c.code().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown category name or code.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::lookup(s).ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_names_and_codes_are_unique() {
        let names: FxHashSet<_> = Category::ALL.iter().map(|c| c.name()).collect();
        let codes: FxHashSet<_> = Category::ALL.iter().map(|c| c.code()).collect();
        assert_eq!(names.len(), Category::ALL.len());
        assert_eq!(codes.len(), Category::ALL.len());
    }

    #[test]
    fn test_parse_by_name_or_code() {
        assert_eq!("Full House".parse::<Category>(), Ok(Category::FullHouse));
        assert_eq!("three of a kind".parse::<Category>(), Ok(Category::ThreeOfAKind));
        assert_eq!("3p".parse::<Category>(), Ok(Category::ThreePairs));
        assert_eq!("yh".parse::<Category>(), Ok(Category::Yahtzee));
        assert!("Bingo".parse::<Category>().is_err());
    }

    #[test]
    fn test_sections() {
        assert_eq!(Category::Aces.section(), Section::Upper);
        assert_eq!(Category::Aces.face(), Some(1));
        assert_eq!(Category::Sixes.face(), Some(6));
        assert_eq!(Category::Chance.section(), Section::Lower);
        assert_eq!(Category::Tower.face(), None);
    }
}
