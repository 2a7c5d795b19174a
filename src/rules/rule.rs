//! Declarative scoring rules and the pure pattern functions behind them.
//!
//! A `Rule` maps a sorted hand to a non-negative score. A score of 0 means
//! "the pattern is absent" and is still a legal thing to write into a box;
//! legality is the scoreboard's business, never the rule's.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::dice::{Hand, Pip};

/// Score on the card, both individual boxes and totals.
pub type Score = u32;

/// Required same-face group sizes, e.g. `[3, 2]` for a Full House.
pub type GroupSizes = SmallVec<[u8; 3]>;

/// Scoring rule for one category.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    /// Sum of all dice showing this face.
    Digit(Pip),
    /// At least `n` dice share a face. Scores the highest such face times
    /// `n`, or the whole hand when `sum_all` is set.
    OfAKind { n: u8, sum_all: bool },
    /// Disjoint same-face groups of the given sizes, all or nothing. Scores
    /// the matched dice, or `fixed` when set.
    Groups { sizes: GroupSizes, fixed: Option<Score> },
    /// Any run of `len` consecutive faces scores `score`.
    RunAnywhere { len: u8, score: Score },
    /// Every face in `from..=to` present; scores the sum of that run.
    ExactRun { from: Pip, to: Pip },
    /// Sum of all dice.
    Chance,
    /// All dice show the same face.
    AllSame { score: Score },
    /// Constant score regardless of the hand.
    Fixed(Score),
}

impl Rule {
    pub fn groups(sizes: &[u8]) -> Self {
        Rule::Groups {
            sizes: SmallVec::from_slice(sizes),
            fixed: None,
        }
    }

    pub fn groups_fixed(sizes: &[u8], score: Score) -> Self {
        Rule::Groups {
            sizes: SmallVec::from_slice(sizes),
            fixed: Some(score),
        }
    }

    /// Score a hand.
    #[must_use]
    pub fn score(&self, hand: &Hand) -> Score {
        match self {
            Rule::Digit(face) => sum_of_face(hand, *face),
            Rule::OfAKind { n, sum_all } => of_a_kind(hand, *n, *sum_all),
            Rule::Groups { sizes, fixed } => match (groups(hand, sizes), fixed) {
                (0, _) => 0,
                (_, Some(score)) => *score,
                (total, None) => total,
            },
            Rule::RunAnywhere { len, score } => {
                if longest_run(hand) >= *len {
                    *score
                } else {
                    0
                }
            }
            Rule::ExactRun { from, to } => exact_run(hand, *from, *to),
            Rule::Chance => hand.sum(),
            Rule::AllSame { score } => {
                if hand.is_all_same() {
                    *score
                } else {
                    0
                }
            }
            Rule::Fixed(score) => *score,
        }
    }

    /// Highest score this rule can award on a hand of `dice` dice.
    #[must_use]
    pub fn max_score(&self, dice: usize) -> Score {
        let dice = dice as Score;
        match self {
            Rule::Digit(face) => Score::from(*face) * dice,
            Rule::OfAKind { n, sum_all: false } => 6 * Score::from(*n),
            Rule::OfAKind { sum_all: true, .. } | Rule::Chance => 6 * dice,
            Rule::Groups { fixed: Some(score), .. } => *score,
            Rule::Groups { sizes, fixed: None } => {
                let mut sizes = sizes.clone();
                sizes.sort_unstable_by(|a, b| b.cmp(a));
                sizes
                    .iter()
                    .enumerate()
                    .map(|(i, &size)| (6 - i as Score) * Score::from(size))
                    .sum()
            }
            Rule::RunAnywhere { score, .. } | Rule::AllSame { score } | Rule::Fixed(score) => *score,
            Rule::ExactRun { from, to } => (*from..=*to).map(Score::from).sum(),
        }
    }
}

/// Face value times the number of dice showing it.
#[must_use]
pub fn sum_of_face(hand: &Hand, face: Pip) -> Score {
    Score::from(hand.counts()[face as usize]) * Score::from(face)
}

/// N of a kind.
///
/// With several qualifying faces (possible with six dice) the highest wins.
#[must_use]
pub fn of_a_kind(hand: &Hand, n: u8, sum_all: bool) -> Score {
    let counts = hand.counts();
    match (1..=6u8).rev().find(|&face| counts[face as usize] >= n) {
        Some(_) if sum_all => hand.sum(),
        Some(face) => Score::from(face) * Score::from(n),
        None => 0,
    }
}

/// Match disjoint same-face groups.
///
/// Requirements are served from the largest size down. Each takes the
/// highest face with at least that many dice and consumes that face
/// entirely. If any requirement cannot be met the whole match scores 0.
///
/// ```
/// use yatzy_engine::dice::Hand;
/// use yatzy_engine::rules::groups;
///
/// let hand = Hand::from_faces(&[2, 2, 3, 3, 3]).unwrap();
/// assert_eq!(groups(&hand, &[2, 3]), 13);
/// assert_eq!(groups(&hand, &[2, 2, 2]), 0);
/// ```
#[must_use]
pub fn groups(hand: &Hand, sizes: &[u8]) -> Score {
    let mut counts = hand.counts();
    let mut required: GroupSizes = SmallVec::from_slice(sizes);
    required.sort_unstable_by(|a, b| b.cmp(a));

    let mut total = 0;
    for size in required {
        match (1..=6u8).rev().find(|&face| counts[face as usize] >= size) {
            Some(face) => {
                total += Score::from(face) * Score::from(size);
                counts[face as usize] = 0;
            }
            None => return 0,
        }
    }
    total
}

/// Length of the longest run of consecutive distinct faces.
#[must_use]
pub fn longest_run(hand: &Hand) -> u8 {
    let counts = hand.counts();
    let mut best = 0;
    let mut run = 0;
    for face in 1..=6 {
        if counts[face] > 0 {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
    }
    best
}

/// Every face in `from..=to` present; duplicates are ignored.
#[must_use]
pub fn exact_run(hand: &Hand, from: Pip, to: Pip) -> Score {
    let counts = hand.counts();
    if (from..=to).all(|face| counts[face as usize] > 0) {
        (from..=to).map(Score::from).sum()
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(faces: &[Pip]) -> Hand {
        Hand::from_faces(faces).unwrap()
    }

    #[test]
    fn test_sum_of_face() {
        assert_eq!(sum_of_face(&hand(&[1, 1, 1, 3, 5]), 1), 3);
        assert_eq!(sum_of_face(&hand(&[2, 5, 5, 5, 6]), 5), 15);
        assert_eq!(sum_of_face(&hand(&[3, 4, 6, 6, 6]), 2), 0);
    }

    #[test]
    fn test_of_a_kind() {
        assert_eq!(of_a_kind(&hand(&[1, 1, 1, 4, 5]), 3, false), 3);
        assert_eq!(of_a_kind(&hand(&[1, 1, 1, 4, 5]), 3, true), 12);
        assert_eq!(of_a_kind(&hand(&[1, 1, 2, 3, 5]), 3, false), 0);
        assert_eq!(of_a_kind(&hand(&[3, 6, 6, 6, 6]), 4, false), 24);
        assert_eq!(of_a_kind(&hand(&[3, 6, 6, 6, 6]), 3, true), 27);
        // six dice, two triples: the higher one counts
        assert_eq!(of_a_kind(&hand(&[2, 2, 2, 5, 5, 5]), 3, false), 15);
    }

    #[test]
    fn test_groups_all_or_nothing() {
        assert_eq!(groups(&hand(&[2, 2, 3, 3, 3]), &[2, 3]), 13);
        assert_eq!(groups(&hand(&[2, 2, 3, 3, 4]), &[2, 3]), 0);
        // five of a kind is not a full house without a joker
        assert_eq!(groups(&hand(&[2, 2, 2, 2, 2]), &[2, 3]), 0);
        assert_eq!(groups(&hand(&[1, 1, 4, 4, 6]), &[2]), 8);
        assert_eq!(groups(&hand(&[1, 1, 4, 4, 6]), &[2, 2]), 10);
        assert_eq!(groups(&hand(&[5, 5, 5, 2, 2, 2]), &[3, 3]), 21);
        assert_eq!(groups(&hand(&[1, 1, 4, 4, 4, 4]), &[2, 4]), 18);
        assert_eq!(groups(&hand(&[2, 2, 4, 4, 6, 6]), &[2, 2, 2]), 24);
    }

    #[test]
    fn test_groups_prefers_highest_face() {
        // three sixes could serve the pair, but the triple takes them first
        assert_eq!(groups(&hand(&[6, 6, 6, 5, 5]), &[2, 3]), 28);
        assert_eq!(groups(&hand(&[3, 3, 5, 5, 6]), &[2]), 10);
    }

    #[test]
    fn test_runs() {
        assert_eq!(longest_run(&hand(&[1, 2, 2, 3, 4])), 4);
        assert_eq!(longest_run(&hand(&[1, 3, 4, 5, 6])), 4);
        assert_eq!(longest_run(&hand(&[1, 1, 2, 3, 6])), 3);
        assert_eq!(exact_run(&hand(&[1, 2, 3, 4, 5]), 1, 5), 15);
        assert_eq!(exact_run(&hand(&[2, 3, 4, 5, 6]), 1, 5), 0);
        assert_eq!(exact_run(&hand(&[2, 3, 4, 5, 6, 6]), 2, 6), 20);
        assert_eq!(exact_run(&hand(&[1, 2, 3, 4, 5, 6]), 1, 6), 21);
    }

    #[test]
    fn test_rule_score_dispatch() {
        let full = hand(&[2, 2, 3, 3, 3]);
        assert_eq!(Rule::groups(&[3, 2]).score(&full), 13);
        assert_eq!(Rule::groups_fixed(&[3, 2], 25).score(&full), 25);
        assert_eq!(Rule::groups_fixed(&[3, 2], 25).score(&hand(&[1, 2, 3, 4, 6])), 0);
        assert_eq!(Rule::RunAnywhere { len: 4, score: 30 }.score(&hand(&[1, 2, 3, 4, 6])), 30);
        assert_eq!(Rule::AllSame { score: 50 }.score(&hand(&[4, 4, 4, 4, 4])), 50);
        assert_eq!(Rule::AllSame { score: 100 }.score(&hand(&[4, 4, 4, 4, 4, 3])), 0);
        assert_eq!(Rule::Fixed(0).score(&full), 0);
        assert_eq!(Rule::Chance.score(&full), 13);
    }

    /// Every hand of `n` dice as a sorted multiset.
    fn all_hands(n: usize) -> Vec<Hand> {
        let mut out = Vec::new();
        let mut faces = vec![1u8; n];
        loop {
            out.push(hand(&faces));
            let mut i = n;
            loop {
                if i == 0 {
                    return out;
                }
                i -= 1;
                if faces[i] < 6 {
                    faces[i] += 1;
                    let v = faces[i];
                    for f in faces.iter_mut().skip(i + 1) {
                        *f = v;
                    }
                    break;
                }
            }
        }
    }

    #[test]
    fn test_max_score_is_tight() {
        let rules = [
            Rule::Digit(4),
            Rule::OfAKind { n: 3, sum_all: false },
            Rule::OfAKind { n: 4, sum_all: true },
            Rule::groups(&[2]),
            Rule::groups(&[2, 2]),
            Rule::groups(&[3, 2]),
            Rule::ExactRun { from: 2, to: 6 },
            Rule::Chance,
        ];
        let hands = all_hands(5);
        for rule in &rules {
            let best = hands.iter().map(|h| rule.score(h)).max().unwrap();
            assert_eq!(rule.max_score(5), best, "{:?}", rule);
        }

        let maxi_rules = [Rule::groups(&[2, 2, 2]), Rule::groups(&[3, 3]), Rule::groups(&[4, 2])];
        let hands = all_hands(6);
        for rule in &maxi_rules {
            let best = hands.iter().map(|h| rule.score(h)).max().unwrap();
            assert_eq!(rule.max_score(6), best, "{:?}", rule);
        }
    }
}
