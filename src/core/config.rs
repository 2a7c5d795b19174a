//! Game configuration types.
//!
//! - `Variant`: ruleset flags (`yahtzee`, `forced`, `maxi`) and the rule
//!   parameters derived from them
//! - `GameConfig`: variant plus session-level settings (inactivity timeout,
//!   RNG seed)
//!
//! `Variant` is only obtainable through its validating constructor, so every
//! other constructor in the crate can treat it as well-formed.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::VariantError;

/// Seconds of inactivity after which anyone may kick the idling player.
pub const INACTIVITY_TIMEOUT_SECS: u64 = 900;

/// Ordinary rerolls granted per turn.
pub const REROLLS_PER_TURN: u8 = 2;

/// Ruleset flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "VariantFlags", into = "VariantFlags")]
pub struct Variant {
    yahtzee: bool,
    forced: bool,
    maxi: bool,
}

/// Unvalidated wire form of `Variant`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct VariantFlags {
    #[serde(default)]
    pub yahtzee: bool,
    #[serde(default)]
    pub forced: bool,
    #[serde(default)]
    pub maxi: bool,
}

impl TryFrom<VariantFlags> for Variant {
    type Error = VariantError;

    fn try_from(flags: VariantFlags) -> Result<Self, Self::Error> {
        Variant::new(flags.yahtzee, flags.forced, flags.maxi)
    }
}

impl From<Variant> for VariantFlags {
    fn from(v: Variant) -> Self {
        Self {
            yahtzee: v.yahtzee,
            forced: v.forced,
            maxi: v.maxi,
        }
    }
}

impl Variant {
    /// Plain Scandinavian Yatzy.
    pub const YATZY: Variant = Variant {
        yahtzee: false,
        forced: false,
        maxi: false,
    };

    /// Commercial Yahtzee with joker rule and Yahtzee bonus.
    pub const YAHTZEE: Variant = Variant {
        yahtzee: true,
        forced: false,
        maxi: false,
    };

    /// Validate a flag combination.
    ///
    /// Forced and Maxi are only defined for the Yatzy ruleset.
    pub fn new(yahtzee: bool, forced: bool, maxi: bool) -> Result<Self, VariantError> {
        if yahtzee && forced {
            return Err(VariantError::ForcedYahtzee);
        }
        if yahtzee && maxi {
            return Err(VariantError::MaxiYahtzee);
        }
        Ok(Self {
            yahtzee,
            forced,
            maxi,
        })
    }

    #[must_use]
    pub const fn forced(maxi: bool) -> Self {
        Self {
            yahtzee: false,
            forced: true,
            maxi,
        }
    }

    #[must_use]
    pub const fn maxi() -> Self {
        Self {
            yahtzee: false,
            forced: false,
            maxi: true,
        }
    }

    #[must_use]
    pub const fn is_yahtzee(self) -> bool {
        self.yahtzee
    }

    #[must_use]
    pub const fn is_forced(self) -> bool {
        self.forced
    }

    #[must_use]
    pub const fn is_maxi(self) -> bool {
        self.maxi
    }

    /// Dice per hand: 6 for Maxi, 5 otherwise.
    #[must_use]
    pub const fn dice_count(self) -> usize {
        if self.maxi {
            6
        } else {
            5
        }
    }

    /// Upper section total needed for the bonus.
    #[must_use]
    pub const fn upper_bonus_threshold(self) -> u32 {
        let base = if self.maxi { 84 } else { 63 };
        if self.forced {
            base - 21
        } else {
            base
        }
    }

    /// Upper section bonus value.
    #[must_use]
    pub const fn upper_bonus(self) -> u32 {
        if self.yahtzee {
            35
        } else if self.maxi {
            100
        } else {
            50
        }
    }

    /// Whether the Yahtzee joker rule and Yahtzee bonus apply.
    #[must_use]
    pub const fn has_joker(self) -> bool {
        self.yahtzee
    }

    /// Whether unused rerolls are banked across turns.
    #[must_use]
    pub const fn banks_rerolls(self) -> bool {
        self.maxi
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.yahtzee {
            return f.write_str("Yahtzee");
        }
        match (self.forced, self.maxi) {
            (false, false) => f.write_str("Yatzy"),
            (true, false) => f.write_str("Forced Yatzy"),
            (false, true) => f.write_str("Maxi Yatzy"),
            (true, true) => f.write_str("Forced Maxi Yatzy"),
        }
    }
}

/// Complete session configuration.
///
/// ```
/// use yatzy_engine::core::{GameConfig, Variant};
///
/// let config = GameConfig::new(Variant::maxi()).with_seed(7);
/// assert_eq!(config.variant.dice_count(), 6);
/// assert_eq!(config.inactivity_timeout_secs, 900);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Ruleset.
    #[serde(default)]
    pub variant: Variant,

    /// Idle time after which any participant may kick the current player.
    #[serde(default = "default_inactivity_timeout")]
    pub inactivity_timeout_secs: u64,

    /// Fixed RNG seed. `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_inactivity_timeout() -> u64 {
    INACTIVITY_TIMEOUT_SECS
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(Variant::YATZY)
    }
}

impl GameConfig {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            inactivity_timeout_secs: INACTIVITY_TIMEOUT_SECS,
            seed: None,
        }
    }

    #[must_use]
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    #[must_use]
    pub fn with_inactivity_timeout(mut self, secs: u64) -> Self {
        self.inactivity_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_validation() {
        assert!(Variant::new(false, false, false).is_ok());
        assert!(Variant::new(false, true, true).is_ok());
        assert!(Variant::new(true, false, false).is_ok());
        assert_eq!(Variant::new(true, true, false), Err(VariantError::ForcedYahtzee));
        assert_eq!(Variant::new(true, false, true), Err(VariantError::MaxiYahtzee));
    }

    #[test]
    fn test_upper_bonus_parameters() {
        assert_eq!(Variant::YATZY.upper_bonus_threshold(), 63);
        assert_eq!(Variant::YATZY.upper_bonus(), 50);
        assert_eq!(Variant::YAHTZEE.upper_bonus_threshold(), 63);
        assert_eq!(Variant::YAHTZEE.upper_bonus(), 35);
        assert_eq!(Variant::maxi().upper_bonus_threshold(), 84);
        assert_eq!(Variant::maxi().upper_bonus(), 100);
        assert_eq!(Variant::forced(false).upper_bonus_threshold(), 42);
        assert_eq!(Variant::forced(true).upper_bonus_threshold(), 63);
    }

    #[test]
    fn test_dice_count() {
        assert_eq!(Variant::YATZY.dice_count(), 5);
        assert_eq!(Variant::YAHTZEE.dice_count(), 5);
        assert_eq!(Variant::maxi().dice_count(), 6);
    }

    #[test]
    fn test_variant_display() {
        assert_eq!(Variant::forced(true).to_string(), "Forced Maxi Yatzy");
        assert_eq!(Variant::YAHTZEE.to_string(), "Yahtzee");
    }

    #[test]
    fn test_variant_serde_rejects_invalid_flags() {
        let ok: Variant = serde_json::from_str(r#"{"maxi": true}"#).unwrap();
        assert_eq!(ok, Variant::maxi());

        let bad = serde_json::from_str::<Variant>(r#"{"yahtzee": true, "maxi": true}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_game_config_defaults() {
        let config: GameConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.inactivity_timeout_secs, INACTIVITY_TIMEOUT_SECS);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_game_config_builder() {
        let config = GameConfig::new(Variant::YAHTZEE)
            .with_inactivity_timeout(60)
            .with_seed(3)
            .with_variant(Variant::forced(false));

        assert_eq!(config.variant, Variant::forced(false));
        assert_eq!(config.inactivity_timeout_secs, 60);
        assert_eq!(config.seed, Some(3));
    }
}
