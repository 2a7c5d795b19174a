//! One player's score card.
//!
//! ## Boxes
//!
//! The card holds one `ScoreBox` per category of the variant's layout, in
//! table order. A box's score is `None` until committed; 0 is a real score.
//!
//! ## Derived fields
//!
//! Totals and bonuses are named fields, never boxes, and are only written by
//! `recompute`. The Yahtzee bonus is an accumulator that `commit` bumps on
//! the joker path; `recompute` reads it but never changes it.

use serde::{Deserialize, Serialize};

use crate::core::Variant;
use crate::rules::{layout, Category, CategorySpec, Score, Section, YAHTZEE_BONUS};

/// A category slot with its committed score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBox {
    pub spec: CategorySpec,
    pub score: Option<Score>,
}

impl ScoreBox {
    #[must_use]
    pub fn category(&self) -> Category {
        self.spec.category
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.score.is_none()
    }
}

/// Totals derived from the committed boxes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub upper_total: Score,
    /// 0 until the upper section reaches the variant threshold.
    pub upper_bonus: Score,
    /// `Some` only under the Yahtzee ruleset.
    pub yahtzee_bonus: Option<Score>,
    pub lower_total: Score,
    pub grand_total: Score,
}

/// One player's boxes plus derived totals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    variant: Variant,
    boxes: Vec<ScoreBox>,
    totals: Totals,
}

impl ScoreCard {
    pub fn new(variant: Variant) -> Self {
        let boxes = layout(variant)
            .into_iter()
            .map(|spec| ScoreBox { spec, score: None })
            .collect();
        let totals = Totals {
            yahtzee_bonus: variant.has_joker().then_some(0),
            ..Totals::default()
        };
        Self {
            variant,
            boxes,
            totals,
        }
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Boxes in table order.
    #[must_use]
    pub fn boxes(&self) -> &[ScoreBox] {
        &self.boxes
    }

    pub fn upper_boxes(&self) -> impl Iterator<Item = &ScoreBox> {
        self.boxes.iter().filter(|b| b.spec.section() == Section::Upper)
    }

    pub fn lower_boxes(&self) -> impl Iterator<Item = &ScoreBox> {
        self.boxes.iter().filter(|b| b.spec.section() == Section::Lower)
    }

    pub fn open_boxes(&self) -> impl Iterator<Item = &ScoreBox> {
        self.boxes.iter().filter(|b| b.is_open())
    }

    #[must_use]
    pub fn get(&self, category: Category) -> Option<&ScoreBox> {
        self.boxes.iter().find(|b| b.category() == category)
    }

    /// Committed score of a category. `None` if open or not in the layout.
    #[must_use]
    pub fn score(&self, category: Category) -> Option<Score> {
        self.get(category).and_then(|b| b.score)
    }

    /// The digit box counting `face`.
    #[must_use]
    pub fn upper_box_for(&self, face: u8) -> Option<&ScoreBox> {
        self.upper_boxes().find(|b| b.category().face() == Some(face))
    }

    /// The all-same-face box (Yatzy, Yahtzee or Maxi Yatzy).
    #[must_use]
    pub fn top_box(&self) -> Option<&ScoreBox> {
        self.boxes.last()
    }

    #[must_use]
    pub fn totals(&self) -> Totals {
        self.totals
    }

    #[must_use]
    pub fn grand_total(&self) -> Score {
        self.totals.grand_total
    }

    /// Every box committed.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.boxes.iter().all(|b| b.score.is_some())
    }

    /// Write a score into an open box and recompute. Returns the upper bonus
    /// newly awarded by this commit (0 if none).
    pub(crate) fn commit(&mut self, category: Category, score: Score, yahtzee_bonus: Score) -> Score {
        match self
            .boxes
            .iter_mut()
            .find(|b| b.category() == category && b.is_open())
        {
            Some(slot) => slot.score = Some(score),
            None => panic!("{} is not an open box on this card", category),
        }
        if yahtzee_bonus > 0 {
            if let Some(total) = self.totals.yahtzee_bonus.as_mut() {
                *total += yahtzee_bonus;
            }
        }

        let before = self.totals.upper_bonus;
        self.recompute();
        self.totals.upper_bonus - before
    }

    /// Fill every open box with 0.
    pub(crate) fn zero_fill(&mut self) {
        for b in self.boxes.iter_mut().filter(|b| b.score.is_none()) {
            b.score = Some(0);
        }
        self.recompute();
    }

    /// Recompute every derived field from the committed boxes.
    ///
    /// Idempotent: the result depends only on the boxes and the Yahtzee
    /// bonus accumulator.
    pub fn recompute(&mut self) {
        let upper_total: Score = self.upper_boxes().filter_map(|b| b.score).sum();
        let lower_boxes: Score = self.lower_boxes().filter_map(|b| b.score).sum();

        let upper_bonus = if upper_total >= self.variant.upper_bonus_threshold() {
            self.variant.upper_bonus()
        } else {
            0
        };
        let grand_total =
            upper_total + upper_bonus + lower_boxes + self.totals.yahtzee_bonus.unwrap_or(0);

        self.totals = Totals {
            upper_total,
            upper_bonus,
            yahtzee_bonus: self.totals.yahtzee_bonus,
            lower_total: grand_total - upper_total - upper_bonus,
            grand_total,
        };
    }

    /// Whether this card could have been built for `variant` by play: the
    /// layout matches, every score is within its box's ceiling and the
    /// totals agree with a fresh recompute.
    #[must_use]
    pub fn is_consistent(&self, variant: Variant) -> bool {
        let expected = layout(variant);
        let layout_ok = self.variant == variant
            && self.boxes.len() == expected.len()
            && self.boxes.iter().zip(&expected).all(|(b, spec)| b.spec == *spec);
        let scores_ok = self
            .boxes
            .iter()
            .all(|b| b.score.map_or(true, |score| score <= b.spec.max_score));
        let bonus_ok = match self.totals.yahtzee_bonus {
            Some(bonus) => {
                variant.has_joker()
                    && bonus % YAHTZEE_BONUS == 0
                    && bonus <= YAHTZEE_BONUS * self.boxes.len() as Score
            }
            None => !variant.has_joker(),
        };
        if !(layout_ok && scores_ok && bonus_ok) {
            return false;
        }

        let mut recomputed = self.clone();
        recomputed.recompute();
        recomputed.totals == self.totals
    }
}
