//! Session snapshots.
//!
//! A `SessionSnapshot` captures a `Session<GameRng>` completely, RNG
//! position included, so a restored session rolls the same dice the
//! original would have. The host picks where to keep the bytes.
//!
//! Snapshot bytes come from outside the process. `Session::restore` checks
//! that roster, seats, scoreboard, bank, hand and pool fit together before
//! building a session from them.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::game::{Phase, Session, MAX_PLAYERS};
use super::reroll::RerollPool;
use crate::core::{
    ActionRecord, GameConfig, GameRng, GameRngState, Player, PlayerId, PlayerMap, SnapshotError,
    UserId, REROLLS_PER_TURN,
};
use crate::dice::Hand;
use crate::scoreboard::Scoreboard;

/// Serializable image of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub config: GameConfig,
    pub owner: UserId,
    pub roster: Vec<Player>,
    /// Sorted ascending.
    pub inactive: Vec<PlayerId>,
    pub phase: Phase,
    pub current: PlayerId,
    pub hand: Option<Hand>,
    pub rerolls: u8,
    pub pool: RerollPool,
    pub saved_rerolls: Option<PlayerMap<u32>>,
    pub last_op: u64,
    pub turn: u32,
    pub sequence: u32,
    pub history: Vector<ActionRecord>,
    pub scoreboard: Option<Scoreboard>,
    pub rng: GameRngState,
}

impl SessionSnapshot {
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }

    /// Check that the parts of the snapshot describe one reachable session.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let seats = self.roster.len();
        if seats == 0 {
            return Err(SnapshotError::EmptyRoster);
        }
        if seats > MAX_PLAYERS {
            return Err(SnapshotError::TooManyPlayers {
                count: seats,
                max: MAX_PLAYERS,
            });
        }
        let mut ids = FxHashSet::default();
        if let Some(dup) = self.roster.iter().find(|p| !ids.insert(p.id())) {
            return Err(SnapshotError::DuplicatePlayer(dup.id()));
        }
        if !ids.contains(&self.owner) {
            return Err(SnapshotError::OwnerNotSeated(self.owner));
        }
        let check_seat = |seat: PlayerId| {
            if seat.index() < seats {
                Ok(())
            } else {
                Err(SnapshotError::SeatOutOfRange { seat, seats })
            }
        };
        check_seat(self.current)?;
        for &seat in &self.inactive {
            check_seat(seat)?;
        }

        let variant = self.config.variant;
        match self.phase {
            Phase::Lobby => {
                if self.scoreboard.is_some() || self.saved_rerolls.is_some() || !self.inactive.is_empty()
                {
                    return Err(SnapshotError::LobbyWithGameState);
                }
            }
            Phase::Running => {
                if self.scoreboard.is_none() {
                    return Err(SnapshotError::ScoreboardMismatch);
                }
                if self.saved_rerolls.is_none() {
                    return Err(SnapshotError::RerollBankMismatch);
                }
                if self.inactive.contains(&self.current) {
                    return Err(SnapshotError::InactiveCurrent(self.current));
                }
            }
            Phase::Finished => {}
        }
        if let Some(board) = &self.scoreboard {
            if !board.is_consistent(variant, seats) {
                return Err(SnapshotError::ScoreboardMismatch);
            }
        }
        if let Some(saved) = &self.saved_rerolls {
            if saved.player_count() != seats {
                return Err(SnapshotError::RerollBankMismatch);
            }
        }

        match &self.hand {
            Some(hand) if self.phase != Phase::Running || hand.len() != variant.dice_count() => {
                return Err(SnapshotError::HandMismatch);
            }
            Some(hand) => {
                if self.pool.positions().iter().any(|&p| p >= hand.len()) {
                    return Err(SnapshotError::PoolMismatch);
                }
            }
            None if !self.pool.is_empty() => return Err(SnapshotError::PoolMismatch),
            None => {}
        }
        if self.rerolls > REROLLS_PER_TURN {
            return Err(SnapshotError::TooManyRerolls {
                rerolls: self.rerolls,
                max: REROLLS_PER_TURN,
            });
        }
        Ok(())
    }
}

impl Session<GameRng> {
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let mut inactive: Vec<PlayerId> = self.inactive.iter().copied().collect();
        inactive.sort_unstable();
        SessionSnapshot {
            config: self.config.clone(),
            owner: self.owner,
            roster: self.roster.clone(),
            inactive,
            phase: self.phase,
            current: self.current,
            hand: self.hand.clone(),
            rerolls: self.rerolls,
            pool: self.pool,
            saved_rerolls: self.saved_rerolls.clone(),
            last_op: self.last_op,
            turn: self.turn,
            sequence: self.sequence,
            history: self.history.clone(),
            scoreboard: self.scoreboard.clone(),
            rng: self.dice.state(),
        }
    }

    /// Rebuild a session from a snapshot, rejecting one whose parts do not
    /// fit together.
    pub fn restore(snapshot: SessionSnapshot) -> Result<Self, SnapshotError> {
        snapshot.validate()?;
        Ok(Self {
            config: snapshot.config,
            owner: snapshot.owner,
            roster: snapshot.roster,
            inactive: snapshot.inactive.into_iter().collect(),
            phase: snapshot.phase,
            current: snapshot.current,
            hand: snapshot.hand,
            rerolls: snapshot.rerolls,
            pool: snapshot.pool,
            saved_rerolls: snapshot.saved_rerolls,
            last_op: snapshot.last_op,
            turn: snapshot.turn,
            sequence: snapshot.sequence,
            history: snapshot.history,
            scoreboard: snapshot.scoreboard,
            dice: GameRng::from_state(&snapshot.rng),
        })
    }
}
