//! # yatzy-engine
//!
//! Rules engine and turn-state machine for multiplayer Yatzy-family dice
//! games: classic Yatzy, Yahtzee, Forced Yatzy and Maxi Yatzy.
//!
//! ## Design Principles
//!
//! 1. **Transport-Agnostic**: The engine consumes a player identity and a
//!    "roll N dice" capability, and returns plain data (hands, score
//!    options, tables, standings). Rendering and command parsing live in
//!    the host.
//!
//! 2. **Validate, Then Mutate**: Every operation either applies completely or
//!    returns an error and leaves the session untouched.
//!
//! 3. **Declarative Rules**: Each variant is a table of categories, each
//!    with a scoring rule, an optional joker rule and a score ceiling.
//!
//! ## Modules
//!
//! - `core`: Identities, seats, RNG, configuration, action history, errors
//! - `dice`: Dice, hands and dice sources
//! - `rules`: Categories, scoring rules and per-variant layouts
//! - `scoreboard`: Score cards, legal options, commits and standings
//! - `session`: The per-chat game state machine
//! - `directory`: Chat-to-session and user-to-player registry
//!
//! ## Example
//!
//! ```
//! use yatzy_engine::{Category, GameConfig, Player, PlayerId, Session, UserId, Variant};
//!
//! let ada = Player::new(UserId(1), "Ada");
//! let mut session = Session::new(ada.clone(), GameConfig::new(Variant::YATZY).with_seed(3));
//! session.start_game(&ada).unwrap();
//!
//! session.roll(&ada).unwrap();
//! let options = session.get_hand_score_options(&ada).unwrap();
//! assert!(options.contains(Category::Chance));
//!
//! let outcome = session.commit_turn(&ada, Category::Chance).unwrap();
//! let board = session.scoreboard().unwrap();
//! assert_eq!(board.grand_total(PlayerId::new(0)), outcome.total());
//! ```

pub mod core;
pub mod dice;
pub mod directory;
pub mod rules;
pub mod scoreboard;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, GameConfig, GameError, GameRng, GameRngState, IllegalMoveError, Player,
    PlayerError, PlayerId, PlayerMap, SnapshotError, UserId, UserProfile, Variant, VariantError,
    INACTIVITY_TIMEOUT_SECS, REROLLS_PER_TURN,
};

pub use crate::dice::{DiceSource, Die, Hand, LoadedDice, Pip};

pub use crate::rules::{layout, Category, CategorySpec, Rule, Score, Section};

pub use crate::scoreboard::{
    CommitOutcome, FullTable, PlayerTable, ScoreCard, ScoreOption, ScoreOptions, Scoreboard,
    Standing,
};

pub use crate::session::{Departure, Phase, RerollPool, Session, SessionSnapshot, TurnOrderEvent};

pub use crate::directory::{ChatKey, GameManager};
