//! Rendered score tables as plain rows.
//!
//! Rows come in display order: the six digit boxes, upper total and bonus,
//! the combination boxes, then the Yahtzee bonus (Yahtzee only), lower total
//! and grand total. Formatting is left to the host.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::board::Scoreboard;
use super::card::{ScoreBox, ScoreCard};
use crate::core::PlayerId;
use crate::rules::{Category, Score};

/// Derived table rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Derived {
    UpperTotal,
    UpperBonus,
    YahtzeeBonus,
    LowerTotal,
    GrandTotal,
}

impl Derived {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Derived::UpperTotal => "Upper Section Total",
            Derived::UpperBonus => "Upper Section Bonus",
            Derived::YahtzeeBonus => "Yahtzee Bonus",
            Derived::LowerTotal => "Lower Section Total",
            Derived::GrandTotal => "Grand Total",
        }
    }
}

/// Row label: a category box or a derived field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowLabel {
    Category(Category),
    Derived(Derived),
}

impl fmt::Display for RowLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowLabel::Category(category) => f.write_str(category.name()),
            RowLabel::Derived(derived) => f.write_str(derived.name()),
        }
    }
}

/// One labelled value. `None` is an open box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub label: RowLabel,
    pub value: Option<Score>,
}

/// One player's card as rows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTable {
    pub player: PlayerId,
    pub rows: Vec<ScoreRow>,
}

/// Every card side by side: one value per seat per row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullTable {
    pub players: Vec<PlayerId>,
    pub rows: Vec<(RowLabel, Vec<Option<Score>>)>,
}

impl ScoreCard {
    /// The card as display rows.
    #[must_use]
    pub fn rows(&self) -> Vec<ScoreRow> {
        let totals = self.totals();
        let boxed = |b: &ScoreBox| ScoreRow {
            label: RowLabel::Category(b.category()),
            value: b.score,
        };
        let derived = |d: Derived, value: Score| ScoreRow {
            label: RowLabel::Derived(d),
            value: Some(value),
        };

        let mut rows: Vec<ScoreRow> = self.upper_boxes().map(boxed).collect();
        rows.push(derived(Derived::UpperTotal, totals.upper_total));
        rows.push(derived(Derived::UpperBonus, totals.upper_bonus));
        rows.extend(self.lower_boxes().map(boxed));
        if let Some(bonus) = totals.yahtzee_bonus {
            rows.push(derived(Derived::YahtzeeBonus, bonus));
        }
        rows.push(derived(Derived::LowerTotal, totals.lower_total));
        rows.push(derived(Derived::GrandTotal, totals.grand_total));
        rows
    }
}

impl Scoreboard {
    #[must_use]
    pub fn player_table(&self, player: PlayerId) -> PlayerTable {
        PlayerTable {
            player,
            rows: self.card(player).rows(),
        }
    }

    /// Full board, columns in seat order.
    #[must_use]
    pub fn full_table(&self) -> FullTable {
        let columns: Vec<(PlayerId, Vec<ScoreRow>)> =
            self.cards().map(|(player, card)| (player, card.rows())).collect();
        let players = columns.iter().map(|(player, _)| *player).collect();

        let row_count = columns.first().map_or(0, |(_, rows)| rows.len());
        let rows = (0..row_count)
            .map(|i| {
                let label = columns[0].1[i].label;
                let values = columns.iter().map(|(_, rows)| rows[i].value).collect();
                (label, values)
            })
            .collect();

        FullTable { players, rows }
    }
}
