//! Final standings.

use serde::{Deserialize, Serialize};

use super::board::Scoreboard;
use crate::core::PlayerId;
use crate::rules::Score;

/// One row of the final ranking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    pub total: Score,
    /// 1-based place; tied totals share a place.
    pub place: usize,
    /// Lowest total of a game whose totals are not all equal.
    pub last: bool,
}

/// Rank totals with standard competition ranking.
///
/// Sorted by total, best first; equal totals keep seat order and share the
/// place of the first of them, so the next total resumes at its position
/// (1, 2, 2, 4).
///
/// ```
/// use yatzy_engine::core::PlayerId;
/// use yatzy_engine::scoreboard::rank_standings;
///
/// let standings = rank_standings([
///     (PlayerId::new(0), 200),
///     (PlayerId::new(1), 180),
///     (PlayerId::new(2), 180),
///     (PlayerId::new(3), 150),
/// ]);
/// let places: Vec<_> = standings.iter().map(|s| s.place).collect();
/// assert_eq!(places, vec![1, 2, 2, 4]);
/// assert!(standings[3].last);
/// ```
pub fn rank_standings(totals: impl IntoIterator<Item = (PlayerId, Score)>) -> Vec<Standing> {
    let mut totals: Vec<_> = totals.into_iter().collect();
    totals.sort_by(|a, b| b.1.cmp(&a.1));

    let lowest = totals.last().map(|&(_, total)| total);
    let all_tied = totals.first().map(|&(_, total)| total) == lowest;

    let mut standings: Vec<Standing> = Vec::with_capacity(totals.len());
    for (position, (player, total)) in totals.into_iter().enumerate() {
        let place = match standings.last() {
            Some(prev) if prev.total == total => prev.place,
            _ => position + 1,
        };
        standings.push(Standing {
            player,
            total,
            place,
            last: !all_tied && Some(total) == lowest,
        });
    }
    standings
}

impl Scoreboard {
    /// Standings by grand total.
    #[must_use]
    pub fn final_scores(&self) -> Vec<Standing> {
        rank_standings(self.cards().map(|(player, card)| (player, card.grand_total())))
    }
}
