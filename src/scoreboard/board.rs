//! Scoreboard: one card per seat, legal-move queries and commits.
//!
//! ## Legal moves
//!
//! `get_score_options` is the single source of legality. `commit` re-derives
//! it from the current card and hand, so a stale option list held by the
//! caller can never write an illegal score.
//!
//! ## Yahtzee joker
//!
//! Once a player's Yahtzee box holds a non-zero score, every further
//! all-same hand takes the joker path:
//! 1. the digit box matching the face, if open, is the only legal move
//! 2. otherwise any open lower box, scored by its joker rule
//! 3. otherwise any open upper box, scored by its joker rule (0)
//!
//! Committing on the joker path also adds the Yahtzee bonus.

use serde::{Deserialize, Serialize};

use super::card::ScoreCard;
use crate::core::{IllegalMoveError, PlayerId, PlayerMap, Variant};
use crate::dice::Hand;
use crate::rules::{Category, Score, Section, YAHTZEE_BONUS};

/// One legal move with its preview score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreOption {
    pub category: Category,
    pub score: Score,
    /// Ceiling of the category's primary rule.
    pub max_score: Score,
}

impl ScoreOption {
    /// Score relative to the category's own ceiling, in `[0, 1]`.
    #[must_use]
    pub fn performance(&self) -> f64 {
        if self.max_score == 0 {
            0.0
        } else {
            (f64::from(self.score) / f64::from(self.max_score)).min(1.0)
        }
    }
}

/// Legal moves for a hand, best score first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreOptions {
    options: Vec<ScoreOption>,
    joker: bool,
}

impl ScoreOptions {
    fn new(mut options: Vec<ScoreOption>, joker: bool) -> Self {
        // stable: ties keep table order
        options.sort_by(|a, b| b.score.cmp(&a.score));
        Self { options, joker }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoreOption> {
        self.options.iter()
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.options.iter().map(|o| o.category)
    }

    #[must_use]
    pub fn get(&self, category: Category) -> Option<Score> {
        self.options
            .iter()
            .find(|o| o.category == category)
            .map(|o| o.score)
    }

    #[must_use]
    pub fn contains(&self, category: Category) -> bool {
        self.get(category).is_some()
    }

    /// Highest-scoring option.
    #[must_use]
    pub fn best(&self) -> Option<&ScoreOption> {
        self.options.first()
    }

    /// Whether these options came from the Yahtzee joker path.
    #[must_use]
    pub fn is_joker(&self) -> bool {
        self.joker
    }

    /// Options re-ranked by performance, best first.
    #[must_use]
    pub fn by_performance(&self) -> Vec<(Category, f64)> {
        let mut ranked: Vec<_> = self
            .options
            .iter()
            .map(|o| (o.category, o.performance()))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

impl<'a> IntoIterator for &'a ScoreOptions {
    type Item = &'a ScoreOption;
    type IntoIter = std::slice::Iter<'a, ScoreOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}

/// What a commit awarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitOutcome {
    pub category: Category,
    /// Points written into the category box.
    pub score: Score,
    /// Yahtzee bonus awarded by this commit (0 if none).
    pub yahtzee_bonus: Score,
    /// Upper section bonus newly reached by this commit (0 if none).
    pub upper_bonus: Score,
}

impl CommitOutcome {
    /// Everything this commit added to the grand total.
    #[must_use]
    pub fn total(&self) -> Score {
        self.score + self.yahtzee_bonus + self.upper_bonus
    }
}

/// Score cards for every seat of a locked roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    variant: Variant,
    cards: PlayerMap<ScoreCard>,
}

impl Scoreboard {
    /// Create empty cards for `player_count` seats.
    ///
    /// # Panics
    ///
    /// Panics if `player_count` is 0.
    pub fn new(variant: Variant, player_count: usize) -> Self {
        Self {
            variant,
            cards: PlayerMap::new(player_count, |_| ScoreCard::new(variant)),
        }
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.cards.player_count()
    }

    #[must_use]
    pub fn card(&self, player: PlayerId) -> &ScoreCard {
        &self.cards[player]
    }

    pub fn cards(&self) -> impl Iterator<Item = (PlayerId, &ScoreCard)> {
        self.cards.iter()
    }

    /// Whether `hand` puts `player` on the joker path.
    fn is_joker_hand(&self, player: PlayerId, hand: &Hand) -> bool {
        if !self.variant.has_joker() || !hand.is_all_same() {
            return false;
        }
        let card = &self.cards[player];
        card.score(Category::Yahtzee).is_some_and(|s| s > 0)
    }

    /// Legal moves for `player` holding `hand`, best score first.
    ///
    /// ```
    /// use yatzy_engine::core::{PlayerId, Variant};
    /// use yatzy_engine::dice::Hand;
    /// use yatzy_engine::rules::Category;
    /// use yatzy_engine::scoreboard::Scoreboard;
    ///
    /// let board = Scoreboard::new(Variant::YATZY, 2);
    /// let hand = Hand::from_faces(&[1, 1, 1, 4, 5]).unwrap();
    /// let options = board.get_score_options(PlayerId::new(0), &hand);
    /// assert_eq!(options.get(Category::ThreeOfAKind), Some(3));
    /// assert_eq!(options.get(Category::Chance), Some(12));
    /// assert_eq!(options.best().unwrap().category, Category::Chance);
    /// ```
    #[must_use]
    pub fn get_score_options(&self, player: PlayerId, hand: &Hand) -> ScoreOptions {
        let card = &self.cards[player];

        if self.is_joker_hand(player, hand) {
            return Self::joker_options(card, hand);
        }

        let open = card.open_boxes().map(|b| ScoreOption {
            category: b.category(),
            score: b.spec.rule.score(hand),
            max_score: b.spec.max_score,
        });
        let options = if self.variant.is_forced() {
            open.take(1).collect()
        } else {
            open.collect()
        };
        ScoreOptions::new(options, false)
    }

    fn joker_options(card: &ScoreCard, hand: &Hand) -> ScoreOptions {
        let face = hand.face_at(0).unwrap_or_default();
        if let Some(upper) = card.upper_box_for(face).filter(|b| b.is_open()) {
            let option = ScoreOption {
                category: upper.category(),
                score: upper.spec.rule.score(hand),
                max_score: upper.spec.max_score,
            };
            return ScoreOptions::new(vec![option], true);
        }

        let joker_scored = |section: Section| -> Vec<ScoreOption> {
            card.open_boxes()
                .filter(|b| b.spec.section() == section)
                .map(|b| ScoreOption {
                    category: b.category(),
                    score: b.spec.joker_rule().score(hand),
                    max_score: b.spec.max_score,
                })
                .collect()
        };
        let lower = joker_scored(Section::Lower);
        if !lower.is_empty() {
            return ScoreOptions::new(lower, true);
        }
        ScoreOptions::new(joker_scored(Section::Upper), true)
    }

    /// Score `hand` into `category` for `player`.
    ///
    /// Rejects any category outside the current legal set and leaves the
    /// board untouched in that case.
    pub fn commit_dice_combination(
        &mut self,
        player: PlayerId,
        hand: &Hand,
        category: Category,
    ) -> Result<CommitOutcome, IllegalMoveError> {
        let options = self.get_score_options(player, hand);
        let score = options
            .get(category)
            .ok_or(IllegalMoveError { category })?;
        let yahtzee_bonus = if options.is_joker() { YAHTZEE_BONUS } else { 0 };

        let upper_bonus = self.cards[player].commit(category, score, yahtzee_bonus);
        Ok(CommitOutcome {
            category,
            score,
            yahtzee_bonus,
            upper_bonus,
        })
    }

    /// Forfeit: fill every open box of `player` with 0.
    pub fn zero_scoreboard(&mut self, player: PlayerId) {
        self.cards[player].zero_fill();
    }

    pub fn recompute_calculated_fields(&mut self, player: PlayerId) {
        self.cards[player].recompute();
    }

    #[must_use]
    pub fn is_filled(&self, player: PlayerId) -> bool {
        self.cards[player].is_filled()
    }

    /// Every card is filled.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.cards.iter().all(|(_, card)| card.is_filled())
    }

    #[must_use]
    pub fn grand_total(&self, player: PlayerId) -> Score {
        self.cards[player].grand_total()
    }

    /// Whether the board has `seats` cards, all consistent with `variant`.
    #[must_use]
    pub fn is_consistent(&self, variant: Variant, seats: usize) -> bool {
        self.variant == variant
            && self.cards.player_count() == seats
            && self.cards.iter().all(|(_, card)| card.is_consistent(variant))
    }
}
