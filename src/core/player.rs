//! Player identity, seat indices and per-seat data storage.
//!
//! ## UserId / Player
//!
//! A `Player` wraps an external user. Equality and hashing go through the
//! underlying `UserId` only, so a renamed profile still refers to the same
//! player. The display name is derived from the profile fields.
//!
//! ## PlayerId
//!
//! Seat index inside one session's locked roster (0-based, 1-255 seats).
//!
//! ## PlayerMap
//!
//! Per-seat storage backed by `Vec` for O(1) access, indexable by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Index, IndexMut};

/// External user identity as provided by the transport layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User {}", self.0)
    }
}

/// Profile fields of an external user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

impl UserProfile {
    /// Create a profile with only a first name.
    pub fn new(id: u64, first_name: impl Into<String>) -> Self {
        Self {
            id: UserId(id),
            first_name: first_name.into(),
            last_name: None,
            username: None,
        }
    }

    #[must_use]
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

/// Stable player value: identity plus display name.
///
/// ```
/// use yatzy_engine::core::{Player, UserProfile};
///
/// let p = Player::from_profile(&UserProfile::new(7, "Ada").with_username("ada"));
/// assert_eq!(p.name(), "Ada (ada)");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    id: UserId,
    name: String,
}

impl Player {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Build a player from profile fields: "First Last (username)".
    pub fn from_profile(profile: &UserProfile) -> Self {
        let mut parts = vec![profile.first_name.clone()];
        if let Some(last) = profile.last_name.as_deref().filter(|s| !s.is_empty()) {
            parts.push(last.to_string());
        }
        if let Some(username) = profile.username.as_deref().filter(|s| !s.is_empty()) {
            parts.push(format!("({})", username));
        }
        Self::new(profile.id, parts.join(" "))
    }

    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Player {}

impl Hash for Player {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Seat identifier supporting 1-255 seats.
///
/// Seat indices are 0-based: the first player in turn order is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new seat ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seats of a roster with `player_count` players.
    ///
    /// ```
    /// use yatzy_engine::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(seats, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ```
/// use yatzy_engine::core::{PlayerId, PlayerMap};
///
/// let mut saved: PlayerMap<u32> = PlayerMap::with_value(2, 0);
/// saved[PlayerId::new(1)] += 2;
/// assert_eq!(saved[PlayerId::new(1)], 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Get the number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
