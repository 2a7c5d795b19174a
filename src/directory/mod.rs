//! Session directory.
//!
//! `GameManager` maps a chat key to at most one `Session` and a user key to
//! one stable `Player`. Creating a game for a chat replaces whatever session
//! the key held; the old one is dropped.
//!
//! ## Replacement
//!
//! - A running game is never replaced; stop it first.
//! - A lobby may be replaced by its owner at any time, and by anyone else
//!   once it has been idle longer than the inactivity timeout.
//! - Finished sessions and empty keys are replaced freely.
//!
//! ## Randomness
//!
//! The manager owns a master `GameRng` and forks one stream per new session,
//! so a directory built from a seed replays exactly.

use log::info;
use rustc_hash::FxHashMap;

use crate::core::{now_secs, GameConfig, GameRng, Player, PlayerError, UserId, UserProfile, Variant};
use crate::session::Session;

/// External chat identifier.
pub type ChatKey = i64;

/// Registry of live sessions and known players.
#[derive(Debug)]
pub struct GameManager {
    /// Template for new sessions; the variant is set per game.
    config: GameConfig,
    rng: GameRng,
    sessions: FxHashMap<ChatKey, Session>,
    players: FxHashMap<UserId, Player>,
}

impl Default for GameManager {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl GameManager {
    /// Create an empty directory. The config's seed, if any, seeds the
    /// master RNG; every session gets its own fork of it.
    pub fn new(config: GameConfig) -> Self {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        Self {
            config,
            rng,
            sessions: FxHashMap::default(),
            players: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    // === Players ===

    /// The stable `Player` for `user`, created on first sight.
    ///
    /// Later profile changes do not rename an existing player.
    pub fn player(&mut self, user: &UserProfile) -> Player {
        self.players
            .entry(user.id)
            .or_insert_with(|| Player::from_profile(user))
            .clone()
    }

    #[must_use]
    pub fn known_player(&self, id: UserId) -> Option<&Player> {
        self.players.get(&id)
    }

    // === Sessions ===

    /// Create a new game in `chat`, replacing any finished or stale session.
    pub fn new_game(
        &mut self,
        chat: ChatKey,
        owner: &UserProfile,
        variant: Variant,
    ) -> Result<&mut Session, PlayerError> {
        self.new_game_at(chat, owner, variant, now_secs())
    }

    /// `new_game` evaluated at Unix time `now`.
    pub fn new_game_at(
        &mut self,
        chat: ChatKey,
        owner: &UserProfile,
        variant: Variant,
        now: u64,
    ) -> Result<&mut Session, PlayerError> {
        let owner = self.player(owner);
        if let Some(existing) = self.sessions.get(&chat) {
            let live = existing.is_game_in_progress() || existing.is_game_not_started();
            let idle = now.saturating_sub(existing.last_op());
            if live && existing.owner() != owner.id() && idle <= self.config.inactivity_timeout_secs {
                return Err(PlayerError::OwnerOnly);
            }
            if existing.is_game_in_progress() {
                return Err(PlayerError::GameInProgress);
            }
        }

        let config = self.config.clone().with_variant(variant);
        let session = Session::with_dice(owner, config, self.rng.fork());
        info!("chat {}: new {} game", chat, variant);
        self.sessions.insert(chat, session);
        self.sessions.get_mut(&chat).ok_or(PlayerError::NoGame)
    }

    #[must_use]
    pub fn game(&self, chat: ChatKey) -> Option<&Session> {
        self.sessions.get(&chat)
    }

    pub fn game_mut(&mut self, chat: ChatKey) -> Option<&mut Session> {
        self.sessions.get_mut(&chat)
    }

    /// The session in `chat`, or `NoGame`.
    pub fn session(&mut self, chat: ChatKey) -> Result<&mut Session, PlayerError> {
        self.sessions.get_mut(&chat).ok_or(PlayerError::NoGame)
    }

    /// Drop the session in `chat`, returning it.
    pub fn remove_game(&mut self, chat: ChatKey) -> Option<Session> {
        self.sessions.remove(&chat)
    }

    #[must_use]
    pub fn is_game_created(&self, chat: ChatKey) -> bool {
        self.sessions.contains_key(&chat)
    }

    #[must_use]
    pub fn is_game_running(&self, chat: ChatKey) -> bool {
        self.sessions.get(&chat).is_some_and(Session::is_game_in_progress)
    }

    #[must_use]
    pub fn is_game_not_started(&self, chat: ChatKey) -> bool {
        self.sessions.get(&chat).is_some_and(Session::is_game_not_started)
    }

    /// Whose turn it is in `chat`.
    pub fn current_turn(&self, chat: ChatKey) -> Result<Option<&Player>, PlayerError> {
        self.sessions
            .get(&chat)
            .map(Session::current_player)
            .ok_or(PlayerError::NoGame)
    }

    /// Number of sessions held, finished ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
