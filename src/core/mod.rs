//! Core engine types: players, RNG, configuration, actions, errors.
//!
//! These are the building blocks shared by the scoring rules, the scoreboard
//! and the session state machine.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use action::{Action, ActionRecord};
pub use config::{GameConfig, Variant, VariantFlags, INACTIVITY_TIMEOUT_SECS, REROLLS_PER_TURN};
pub use error::{GameError, IllegalMoveError, PlayerError, SnapshotError, VariantError};
pub use player::{Player, PlayerId, PlayerMap, UserId, UserProfile};
pub use rng::{GameRng, GameRngState};

use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock seconds since the Unix epoch.
pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
