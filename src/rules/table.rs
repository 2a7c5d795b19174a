//! Variant layout table: which categories a scoreboard carries, in table
//! order, with their scoring, joker and ceiling.

use serde::{Deserialize, Serialize};

use super::category::{Category, Section};
use super::rule::{Rule, Score};
use crate::core::Variant;

/// Fixed Yahtzee scores used by the joker rule.
pub const JOKER_FULL_HOUSE: Score = 25;
pub const JOKER_SMALL_STRAIGHT: Score = 30;
pub const JOKER_LARGE_STRAIGHT: Score = 40;

/// Extra points for every Yahtzee after the first non-zero one.
pub const YAHTZEE_BONUS: Score = 100;

/// Descriptor of one category in a variant's layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpec {
    pub category: Category,
    pub rule: Rule,
    /// Rule used under the Yahtzee joker. `None` falls back to `rule`.
    pub joker: Option<Rule>,
    /// Best score `rule` can award, used to normalize move quality.
    pub max_score: Score,
}

impl CategorySpec {
    fn new(category: Category, rule: Rule, dice: usize) -> Self {
        let max_score = rule.max_score(dice);
        Self {
            category,
            rule,
            joker: None,
            max_score,
        }
    }

    fn with_joker(mut self, joker: Rule) -> Self {
        self.joker = Some(joker);
        self
    }

    #[must_use]
    pub fn section(&self) -> Section {
        self.category.section()
    }

    /// Rule applied when scoring under the joker.
    #[must_use]
    pub fn joker_rule(&self) -> &Rule {
        self.joker.as_ref().unwrap_or(&self.rule)
    }
}

/// Build the ordered category layout for a variant.
///
/// ```
/// use yatzy_engine::core::Variant;
/// use yatzy_engine::rules::{layout, Category};
///
/// let maxi = layout(Variant::maxi());
/// assert_eq!(maxi.len(), 20);
/// assert_eq!(maxi.last().unwrap().category, Category::MaxiYatzy);
/// ```
pub fn layout(variant: Variant) -> Vec<CategorySpec> {
    let dice = variant.dice_count();
    let yahtzee = variant.is_yahtzee();
    let maxi = variant.is_maxi();
    let joker = variant.has_joker();

    let mut specs = Vec::with_capacity(20);

    let ones = if yahtzee { Category::Aces } else { Category::Ones };
    let upper = [
        ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
    ];
    for category in upper {
        let face = category.face().unwrap_or_default();
        let spec = CategorySpec::new(category, Rule::Digit(face), dice);
        specs.push(if joker { spec.with_joker(Rule::Fixed(0)) } else { spec });
    }

    if !yahtzee {
        specs.push(CategorySpec::new(Category::OnePair, Rule::groups(&[2]), dice));
        specs.push(CategorySpec::new(Category::TwoPairs, Rule::groups(&[2, 2]), dice));
        if maxi {
            specs.push(CategorySpec::new(Category::ThreePairs, Rule::groups(&[2, 2, 2]), dice));
        }
    }

    for (category, n) in [(Category::ThreeOfAKind, 3), (Category::FourOfAKind, 4)] {
        let spec = CategorySpec::new(category, Rule::OfAKind { n, sum_all: yahtzee }, dice);
        specs.push(if joker { spec.with_joker(Rule::Chance) } else { spec });
    }
    if maxi {
        specs.push(CategorySpec::new(
            Category::FiveOfAKind,
            Rule::OfAKind { n: 5, sum_all: false },
            dice,
        ));
    }

    if yahtzee {
        specs.push(
            CategorySpec::new(Category::FullHouse, Rule::groups_fixed(&[3, 2], JOKER_FULL_HOUSE), dice)
                .with_joker(Rule::Fixed(JOKER_FULL_HOUSE)),
        );
    } else {
        specs.push(CategorySpec::new(Category::FullHouse, Rule::groups(&[3, 2]), dice));
    }
    if maxi {
        specs.push(CategorySpec::new(Category::Castle, Rule::groups(&[3, 3]), dice));
        specs.push(CategorySpec::new(Category::Tower, Rule::groups(&[4, 2]), dice));
    }

    if yahtzee {
        specs.push(
            CategorySpec::new(
                Category::SmallStraight,
                Rule::RunAnywhere { len: 4, score: JOKER_SMALL_STRAIGHT },
                dice,
            )
            .with_joker(Rule::Fixed(JOKER_SMALL_STRAIGHT)),
        );
        specs.push(
            CategorySpec::new(
                Category::LargeStraight,
                Rule::RunAnywhere { len: 5, score: JOKER_LARGE_STRAIGHT },
                dice,
            )
            .with_joker(Rule::Fixed(JOKER_LARGE_STRAIGHT)),
        );
    } else {
        specs.push(CategorySpec::new(Category::SmallStraight, Rule::ExactRun { from: 1, to: 5 }, dice));
        specs.push(CategorySpec::new(Category::LargeStraight, Rule::ExactRun { from: 2, to: 6 }, dice));
        if maxi {
            specs.push(CategorySpec::new(Category::FullStraight, Rule::ExactRun { from: 1, to: 6 }, dice));
        }
    }

    specs.push(CategorySpec::new(Category::Chance, Rule::Chance, dice));

    let (top, score) = if yahtzee {
        (Category::Yahtzee, 50)
    } else if maxi {
        (Category::MaxiYatzy, 100)
    } else {
        (Category::Yatzy, 50)
    };
    specs.push(CategorySpec::new(top, Rule::AllSame { score }, dice));

    specs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{Hand, Pip};

    fn hand(faces: &[Pip]) -> Hand {
        Hand::from_faces(faces).unwrap()
    }

    fn categories(variant: Variant) -> Vec<Category> {
        layout(variant).into_iter().map(|s| s.category).collect()
    }

    #[test]
    fn test_yatzy_layout() {
        use Category::*;
        assert_eq!(
            categories(Variant::YATZY),
            vec![
                Ones, Twos, Threes, Fours, Fives, Sixes, OnePair, TwoPairs, ThreeOfAKind,
                FourOfAKind, FullHouse, SmallStraight, LargeStraight, Chance, Yatzy
            ]
        );
    }

    #[test]
    fn test_yahtzee_layout() {
        use Category::*;
        assert_eq!(
            categories(Variant::YAHTZEE),
            vec![
                Aces, Twos, Threes, Fours, Fives, Sixes, ThreeOfAKind, FourOfAKind, FullHouse,
                SmallStraight, LargeStraight, Chance, Yahtzee
            ]
        );
    }

    #[test]
    fn test_maxi_layout() {
        use Category::*;
        assert_eq!(
            categories(Variant::maxi()),
            vec![
                Ones, Twos, Threes, Fours, Fives, Sixes, OnePair, TwoPairs, ThreePairs,
                ThreeOfAKind, FourOfAKind, FiveOfAKind, FullHouse, Castle, Tower, SmallStraight,
                LargeStraight, FullStraight, Chance, MaxiYatzy
            ]
        );
        assert_eq!(categories(Variant::forced(true)), categories(Variant::maxi()));
    }

    #[test]
    fn test_upper_boxes_come_first() {
        for variant in [Variant::YATZY, Variant::YAHTZEE, Variant::maxi()] {
            let specs = layout(variant);
            assert!(specs[..6].iter().all(|s| s.section() == Section::Upper));
            assert!(specs[6..].iter().all(|s| s.section() == Section::Lower));
        }
    }

    #[test]
    fn test_yatzy_scoring() {
        let specs = layout(Variant::YATZY);
        let score = |c: Category, faces: &[Pip]| {
            specs.iter().find(|s| s.category == c).unwrap().rule.score(&hand(faces))
        };

        assert_eq!(score(Category::ThreeOfAKind, &[1, 1, 1, 4, 5]), 3);
        assert_eq!(score(Category::FullHouse, &[2, 2, 3, 3, 3]), 13);
        assert_eq!(score(Category::SmallStraight, &[1, 2, 3, 4, 5]), 15);
        assert_eq!(score(Category::SmallStraight, &[2, 3, 4, 5, 6]), 0);
        assert_eq!(score(Category::LargeStraight, &[2, 3, 4, 5, 6]), 20);
        assert_eq!(score(Category::Yatzy, &[3, 3, 3, 3, 3]), 50);
    }

    #[test]
    fn test_yahtzee_scoring() {
        let specs = layout(Variant::YAHTZEE);
        let score = |c: Category, faces: &[Pip]| {
            specs.iter().find(|s| s.category == c).unwrap().rule.score(&hand(faces))
        };

        assert_eq!(score(Category::ThreeOfAKind, &[1, 1, 1, 4, 5]), 12);
        assert_eq!(score(Category::FourOfAKind, &[2, 6, 6, 6, 6]), 26);
        assert_eq!(score(Category::FullHouse, &[2, 2, 3, 3, 3]), 25);
        assert_eq!(score(Category::SmallStraight, &[1, 3, 4, 5, 6]), 30);
        assert_eq!(score(Category::LargeStraight, &[1, 3, 4, 5, 6]), 0);
        assert_eq!(score(Category::LargeStraight, &[2, 3, 4, 5, 6]), 40);
    }

    #[test]
    fn test_maxi_scoring() {
        let specs = layout(Variant::maxi());
        let score = |c: Category, faces: &[Pip]| {
            specs.iter().find(|s| s.category == c).unwrap().rule.score(&hand(faces))
        };

        assert_eq!(score(Category::Castle, &[5, 5, 5, 2, 2, 2]), 21);
        assert_eq!(score(Category::Tower, &[1, 1, 4, 4, 4, 4]), 18);
        assert_eq!(score(Category::ThreePairs, &[1, 1, 3, 3, 6, 6]), 20);
        assert_eq!(score(Category::FiveOfAKind, &[3, 3, 3, 3, 3, 6]), 15);
        assert_eq!(score(Category::FullStraight, &[1, 2, 3, 4, 5, 6]), 21);
        assert_eq!(score(Category::MaxiYatzy, &[2, 2, 2, 2, 2, 2]), 100);
        assert_eq!(score(Category::MaxiYatzy, &[2, 2, 2, 2, 2, 1]), 0);
        assert_eq!(score(Category::Chance, &[6, 6, 6, 6, 6, 6]), 36);
    }

    #[test]
    fn test_joker_rules() {
        let specs = layout(Variant::YAHTZEE);
        let joker = |c: Category, faces: &[Pip]| {
            specs.iter().find(|s| s.category == c).unwrap().joker_rule().score(&hand(faces))
        };
        let fours = [4, 4, 4, 4, 4];

        assert_eq!(joker(Category::FullHouse, &fours), 25);
        assert_eq!(joker(Category::SmallStraight, &fours), 30);
        assert_eq!(joker(Category::LargeStraight, &fours), 40);
        assert_eq!(joker(Category::ThreeOfAKind, &fours), 20);
        assert_eq!(joker(Category::Chance, &fours), 20);
        assert_eq!(joker(Category::Twos, &fours), 0);

        assert!(layout(Variant::YATZY).iter().all(|s| s.joker.is_none()));
    }

    #[test]
    fn test_max_scores() {
        let specs = layout(Variant::YAHTZEE);
        let max = |c: Category| specs.iter().find(|s| s.category == c).unwrap().max_score;
        assert_eq!(max(Category::Sixes), 30);
        assert_eq!(max(Category::ThreeOfAKind), 30);
        assert_eq!(max(Category::FullHouse), 25);
        assert_eq!(max(Category::Yahtzee), 50);

        let specs = layout(Variant::maxi());
        let max = |c: Category| specs.iter().find(|s| s.category == c).unwrap().max_score;
        assert_eq!(max(Category::Sixes), 36);
        assert_eq!(max(Category::Tower), 34);
        assert_eq!(max(Category::FullStraight), 21);
        assert_eq!(max(Category::MaxiYatzy), 100);
    }
}
