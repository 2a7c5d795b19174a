//! Error types.
//!
//! All of these are expected, user-caused rejections. None of them leave a
//! session or scoreboard partially mutated.

use thiserror::Error;

use super::player::{PlayerId, UserId};
use crate::rules::Category;

/// User-actionable rejection of a session or directory operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlayerError {
    #[error("this game is not started")]
    NotStarted,
    #[error("this game is already started")]
    AlreadyStarted,
    #[error("this game is already finished, create a new game")]
    AlreadyFinished,
    #[error("it's not your turn")]
    NotYourTurn,
    #[error("you've already rolled a hand")]
    AlreadyRolled,
    #[error("you didn't roll a hand yet")]
    NotRolled,
    #[error("select at least one die to reroll")]
    EmptySelection,
    #[error("die position {position} is out of range, the hand has {dice} dice")]
    InvalidPosition { position: usize, dice: usize },
    #[error("die position {position} is selected more than once")]
    DuplicatePosition { position: usize },
    #[error("{face} is not a die face, expected 1 to 6")]
    InvalidFace { face: u8 },
    #[error("cannot reroll all requested numbers, they are not in your hand")]
    FacesNotInHand,
    #[error("die {position} is already queued for reroll")]
    AlreadyQueued { position: usize },
    #[error("die {position} is not queued for reroll")]
    NotQueued { position: usize },
    #[error("you have no rerolls left this turn")]
    NoRerollsLeft,
    #[error("you've already joined")]
    AlreadyJoined,
    #[error("you're not in this game")]
    NotInGame,
    #[error("only the game owner can do this")]
    OwnerOnly,
    #[error("at least one player should join a game to start it")]
    NoPlayers,
    #[error("this game is full, at most {max} players can join")]
    RosterFull { max: usize },
    #[error("only the owner or the idle player can kick for another {remaining_secs} seconds")]
    KickTooEarly { remaining_secs: u64 },
    #[error("only the player whose turn it is can be kicked")]
    KickNotCurrent,
    #[error("there is no game in this chat")]
    NoGame,
    #[error("cannot create a new game while the previous one is active, stop it first")]
    GameInProgress,
}

/// Commit of a category outside the currently legal move set.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("scoring {category} is not allowed in this situation")]
pub struct IllegalMoveError {
    pub category: Category,
}

/// Any rejection of a turn commit.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Player(#[from] PlayerError),
    #[error(transparent)]
    IllegalMove(#[from] IllegalMoveError),
}

/// Invalid ruleset flag combination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum VariantError {
    #[error("Forced mode is only valid for Yatzy, not Yahtzee")]
    ForcedYahtzee,
    #[error("Maxi mode is only valid for Yatzy, not Yahtzee")]
    MaxiYahtzee,
}

/// Snapshot whose parts do not fit together.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("snapshot roster is empty")]
    EmptyRoster,
    #[error("snapshot roster has {count} players, at most {max} are allowed")]
    TooManyPlayers { count: usize, max: usize },
    #[error("{0} appears twice in the snapshot roster")]
    DuplicatePlayer(UserId),
    #[error("snapshot owner {0} is not in the roster")]
    OwnerNotSeated(UserId),
    #[error("{seat} is out of range for {seats} seats")]
    SeatOutOfRange { seat: PlayerId, seats: usize },
    #[error("the current {0} has left the game")]
    InactiveCurrent(PlayerId),
    #[error("a lobby snapshot has game state")]
    LobbyWithGameState,
    #[error("snapshot scoreboard does not match the roster or the variant")]
    ScoreboardMismatch,
    #[error("snapshot reroll bank does not match the roster")]
    RerollBankMismatch,
    #[error("snapshot hand does not fit the phase or the variant")]
    HandMismatch,
    #[error("snapshot reroll pool does not fit the hand")]
    PoolMismatch,
    #[error("snapshot records {rerolls} rerolls, at most {max} per turn")]
    TooManyRerolls { rerolls: u8, max: u8 },
}
