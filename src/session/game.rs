//! Session state machine.
//!
//! ## Phases
//!
//! `Lobby` → `Running` → `Finished`. Roster edits happen in the lobby;
//! `start_game` locks the roster into seats, decides the turn order and
//! creates the scoreboard. `Finished` is terminal: only score queries are
//! served afterwards.
//!
//! ## Turns
//!
//! The current player rolls once, rerolls up to `REROLLS_PER_TURN` times
//! (more under Maxi while banked rerolls last), then commits the hand into
//! one category. The turn then passes to the next active seat.
//!
//! ## Atomicity
//!
//! Every operation validates before it mutates. A rejected call leaves the
//! session exactly as it was.

use im::Vector;
use log::{debug, info};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::reroll::{check_positions, RerollPool};
use super::turn_order::{decide_turn_order, TurnOrderEvent};
use crate::core::{
    now_secs, Action, ActionRecord, GameConfig, GameError, GameRng, Player, PlayerError, PlayerId,
    PlayerMap, UserId, Variant, REROLLS_PER_TURN,
};
use crate::dice::{DiceSource, Die, Hand, Pip};
use crate::rules::Category;
use crate::scoreboard::{CommitOutcome, FullTable, PlayerTable, ScoreOptions, Scoreboard, Standing};

/// Most players a session seats.
pub const MAX_PLAYERS: usize = 255;

/// Session lifecycle phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Lobby,
    Running,
    Finished,
}

/// What removing a player did to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Departure {
    /// Removed from the lobby roster.
    Removed,
    /// Forfeited a running game, which goes on.
    Forfeited,
    /// The owner left the lobby; the session is aborted.
    Aborted,
    /// No active player remains; the session is finished.
    Finished,
}

/// One game in one chat.
#[derive(Clone, Debug)]
pub struct Session<D: DiceSource = GameRng> {
    pub(super) config: GameConfig,
    pub(super) owner: UserId,
    /// Join order in the lobby, turn order once running.
    pub(super) roster: Vec<Player>,
    /// Seats that left or were kicked.
    pub(super) inactive: FxHashSet<PlayerId>,
    pub(super) phase: Phase,
    pub(super) current: PlayerId,
    pub(super) hand: Option<Hand>,
    /// Ordinary rerolls used this turn.
    pub(super) rerolls: u8,
    pub(super) pool: RerollPool,
    pub(super) saved_rerolls: Option<PlayerMap<u32>>,
    pub(super) last_op: u64,
    pub(super) turn: u32,
    pub(super) sequence: u32,
    pub(super) history: Vector<ActionRecord>,
    pub(super) scoreboard: Option<Scoreboard>,
    pub(super) dice: D,
}

impl Session<GameRng> {
    /// Create a lobby owned by `owner`, who is the first roster member.
    ///
    /// Dice come from the configured seed, or from entropy without one.
    pub fn new(owner: Player, config: GameConfig) -> Self {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        Self::with_dice(owner, config, rng)
    }
}

impl<D: DiceSource> Session<D> {
    /// Create a lobby rolling dice from `dice`.
    pub fn with_dice(owner: Player, config: GameConfig, dice: D) -> Self {
        info!("session created by {} ({})", owner, config.variant);
        Self {
            owner: owner.id(),
            roster: vec![owner],
            inactive: FxHashSet::default(),
            phase: Phase::Lobby,
            current: PlayerId::new(0),
            hand: None,
            rerolls: 0,
            pool: RerollPool::default(),
            saved_rerolls: None,
            last_op: now_secs(),
            turn: 0,
            sequence: 0,
            history: Vector::new(),
            scoreboard: None,
            dice,
            config,
        }
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.config.variant
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn owner(&self) -> UserId {
        self.owner
    }

    /// Roster in join order (lobby) or turn order (running).
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.roster
    }

    #[must_use]
    pub fn player_at(&self, seat: PlayerId) -> Option<&Player> {
        self.roster.get(seat.index())
    }

    #[must_use]
    pub fn seat_of(&self, player: &Player) -> Option<PlayerId> {
        self.roster
            .iter()
            .position(|p| p == player)
            .map(|i| PlayerId::new(i as u8))
    }

    #[must_use]
    pub fn is_active(&self, seat: PlayerId) -> bool {
        seat.index() < self.roster.len() && !self.inactive.contains(&seat)
    }

    /// Seats still playing.
    pub fn active_seats(&self) -> impl Iterator<Item = PlayerId> + '_ {
        PlayerId::all(self.roster.len()).filter(|&seat| !self.inactive.contains(&seat))
    }

    #[must_use]
    pub fn is_game_not_started(&self) -> bool {
        self.phase == Phase::Lobby
    }

    #[must_use]
    pub fn is_game_in_progress(&self) -> bool {
        self.phase == Phase::Running
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Finished with every box of every card filled.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.is_finished() && self.scoreboard.as_ref().is_some_and(Scoreboard::is_finished)
    }

    /// Seat whose turn it is, while running.
    #[must_use]
    pub fn current_seat(&self) -> Option<PlayerId> {
        (self.phase == Phase::Running).then_some(self.current)
    }

    /// Player whose turn it is, while running.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.current_seat().and_then(|seat| self.player_at(seat))
    }

    #[must_use]
    pub fn is_current_turn(&self, player: &Player) -> bool {
        self.current_player() == Some(player)
    }

    /// Current hand, between roll and commit.
    #[must_use]
    pub fn hand(&self) -> Option<&Hand> {
        self.hand.as_ref()
    }

    /// Ordinary rerolls used this turn.
    #[must_use]
    pub fn reroll_count(&self) -> u8 {
        self.rerolls
    }

    /// Banked Maxi rerolls of a seat.
    #[must_use]
    pub fn saved_rerolls(&self, seat: PlayerId) -> u32 {
        self.saved_rerolls
            .as_ref()
            .filter(|saved| seat.index() < saved.player_count())
            .map_or(0, |saved| saved[seat])
    }

    #[must_use]
    pub fn reroll_pool(&self) -> RerollPool {
        self.pool
    }

    /// Unix seconds of the last state change.
    #[must_use]
    pub fn last_op(&self) -> u64 {
        self.last_op
    }

    /// Turn number, 1 for the first turn of a running game.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn scoreboard(&self) -> Option<&Scoreboard> {
        self.scoreboard.as_ref()
    }

    #[must_use]
    pub fn dice(&self) -> &D {
        &self.dice
    }

    // === Roster ===

    pub fn add_player(&mut self, player: Player) -> Result<(), PlayerError> {
        match self.phase {
            Phase::Lobby => {}
            Phase::Running => return Err(PlayerError::AlreadyStarted),
            Phase::Finished => return Err(PlayerError::AlreadyFinished),
        }
        if self.roster.contains(&player) {
            return Err(PlayerError::AlreadyJoined);
        }
        if self.roster.len() >= MAX_PLAYERS {
            return Err(PlayerError::RosterFull { max: MAX_PLAYERS });
        }
        info!("{} joined", player);
        self.roster.push(player);
        self.touch();
        Ok(())
    }

    /// Remove `player`.
    ///
    /// In the lobby the player is dropped from the roster, or the session is
    /// aborted if it is the owner. In a running game the player forfeits:
    /// their open boxes are zero-filled and the seat is skipped from now on.
    pub fn del_player(&mut self, player: &Player) -> Result<Departure, PlayerError> {
        match self.phase {
            Phase::Finished => Err(PlayerError::AlreadyFinished),
            Phase::Lobby => {
                let seat = self.seat_of(player).ok_or(PlayerError::NotInGame)?;
                if player.id() == self.owner {
                    self.finish("owner left the lobby");
                    return Ok(Departure::Aborted);
                }
                info!("{} left", player);
                self.roster.remove(seat.index());
                self.touch();
                Ok(Departure::Removed)
            }
            Phase::Running => {
                let seat = self.seat_of(player).ok_or(PlayerError::NotInGame)?;
                if self.inactive.contains(&seat) {
                    return Err(PlayerError::NotInGame);
                }
                info!("{} left a running game", player);
                Ok(self.forfeit(seat, Action::Leave))
            }
        }
    }

    /// Kick `target` on behalf of `acting`.
    pub fn kick_player(&mut self, acting: &Player, target: &Player) -> Result<Departure, PlayerError> {
        self.kick_player_at(acting, target, now_secs())
    }

    /// Kick `target` on behalf of `acting` at Unix time `now`.
    ///
    /// The owner and the target themself may kick at any time; anyone else
    /// only once `now` is past the inactivity timeout since the last state
    /// change. In a running game only the current player can be kicked.
    pub fn kick_player_at(
        &mut self,
        acting: &Player,
        target: &Player,
        now: u64,
    ) -> Result<Departure, PlayerError> {
        if self.phase == Phase::Finished {
            return Err(PlayerError::AlreadyFinished);
        }
        let seat = self.seat_of(target).ok_or(PlayerError::NotInGame)?;
        if self.phase == Phase::Running && (seat != self.current || self.inactive.contains(&seat)) {
            return Err(PlayerError::KickNotCurrent);
        }

        let elapsed = now.saturating_sub(self.last_op);
        let timeout = self.config.inactivity_timeout_secs;
        if acting != target && acting.id() != self.owner && elapsed <= timeout {
            return Err(PlayerError::KickTooEarly {
                remaining_secs: timeout - elapsed + 1,
            });
        }

        info!("{} kicked by {} after {}s idle", target, acting, elapsed);
        match self.phase {
            Phase::Lobby if target.id() == self.owner => {
                self.finish("owner kicked from the lobby");
                Ok(Departure::Aborted)
            }
            Phase::Lobby => {
                self.roster.remove(seat.index());
                self.touch();
                Ok(Departure::Removed)
            }
            _ => Ok(self.forfeit(seat, Action::Kicked)),
        }
    }

    fn forfeit(&mut self, seat: PlayerId, action: Action) -> Departure {
        self.inactive.insert(seat);
        self.record(seat, action);

        let board_done = match self.scoreboard.as_mut() {
            Some(board) => {
                board.zero_scoreboard(seat);
                board.is_finished()
            }
            None => false,
        };
        if self.active_seats().next().is_none() {
            self.finish("no active players left");
            return Departure::Finished;
        }
        if board_done {
            self.finish("scoreboard filled");
            return Departure::Finished;
        }

        if seat == self.current {
            self.advance_turn();
        }
        if self.roster[seat.index()].id() == self.owner {
            self.owner = self.roster[self.current.index()].id();
            info!("ownership passed to {}", self.roster[self.current.index()]);
        }
        Departure::Forfeited
    }

    // === Lifecycle ===

    /// Start the game: roll off the turn order, lock the roster into seats
    /// and create the scoreboard. Returns the roll-off events for display.
    pub fn start_game(&mut self, acting: &Player) -> Result<Vec<TurnOrderEvent>, PlayerError> {
        match self.phase {
            Phase::Lobby => {}
            Phase::Running => return Err(PlayerError::AlreadyStarted),
            Phase::Finished => return Err(PlayerError::AlreadyFinished),
        }
        if acting.id() != self.owner {
            return Err(PlayerError::OwnerOnly);
        }
        if self.roster.is_empty() {
            return Err(PlayerError::NoPlayers);
        }

        let (order, events) = decide_turn_order(&self.roster, &mut self.dice);
        let seats = order.len();
        self.roster = order;
        self.scoreboard = Some(Scoreboard::new(self.config.variant, seats));
        self.saved_rerolls = Some(PlayerMap::with_value(seats, 0));
        self.inactive.clear();
        self.current = PlayerId::new(0);
        self.turn = 1;
        self.sequence = 0;
        self.phase = Phase::Running;
        self.touch();

        info!("session started: {} players, {}", seats, self.config.variant);
        Ok(events)
    }

    /// Stop the game early. Owner only.
    pub fn stop_game(&mut self, acting: &Player) -> Result<(), PlayerError> {
        if self.phase == Phase::Finished {
            return Err(PlayerError::AlreadyFinished);
        }
        if acting.id() != self.owner {
            return Err(PlayerError::OwnerOnly);
        }
        self.finish("stopped by owner");
        Ok(())
    }

    fn finish(&mut self, reason: &str) {
        self.phase = Phase::Finished;
        self.hand = None;
        self.pool.clear();
        self.touch();
        info!("session finished: {}", reason);
    }

    // === Turn ===

    /// Check that `acting` may act on the running turn; returns their seat.
    fn check_usable(&self, acting: &Player) -> Result<PlayerId, PlayerError> {
        match self.phase {
            Phase::Lobby => Err(PlayerError::NotStarted),
            Phase::Finished => Err(PlayerError::AlreadyFinished),
            Phase::Running if self.is_current_turn(acting) => Ok(self.current),
            Phase::Running => Err(PlayerError::NotYourTurn),
        }
    }

    fn current_hand(&self) -> Result<&Hand, PlayerError> {
        self.hand.as_ref().ok_or(PlayerError::NotRolled)
    }

    /// Initial roll of the turn.
    pub fn roll(&mut self, acting: &Player) -> Result<Hand, PlayerError> {
        let seat = self.check_usable(acting)?;
        if self.hand.is_some() {
            return Err(PlayerError::AlreadyRolled);
        }

        let hand = self.dice.roll(self.config.variant.dice_count());
        debug!("{} rolled {}", acting, hand);
        self.record(seat, Action::Roll { hand: hand.clone() });
        self.hand = Some(hand.clone());
        self.touch();
        Ok(hand)
    }

    /// The acting player's current hand.
    pub fn get_hand(&self, acting: &Player) -> Result<&Hand, PlayerError> {
        self.check_usable(acting)?;
        self.current_hand()
    }

    /// Whether the next reroll is paid from the bank. Errors if neither an
    /// ordinary nor a banked reroll is left.
    fn reroll_budget(&self, seat: PlayerId) -> Result<bool, PlayerError> {
        if self.rerolls < REROLLS_PER_TURN {
            Ok(false)
        } else if self.config.variant.banks_rerolls() && self.saved_rerolls(seat) > 0 {
            Ok(true)
        } else {
            Err(PlayerError::NoRerollsLeft)
        }
    }

    /// Reroll the dice at the given 0-based positions of the sorted hand.
    pub fn reroll_dice(&mut self, acting: &Player, positions: &[usize]) -> Result<Hand, PlayerError> {
        let seat = self.check_usable(acting)?;
        let hand = self.hand.as_ref().ok_or(PlayerError::NotRolled)?;
        let positions = check_positions(positions, hand.len())?;
        let banked = self.reroll_budget(seat)?;

        let next = hand.rerolled(&positions, &mut self.dice);
        if banked {
            if let Some(saved) = self.saved_rerolls.as_mut() {
                saved[seat] -= 1;
            }
        } else {
            self.rerolls += 1;
        }

        debug!(
            "{} rerolled {} dice into {}{}",
            acting,
            positions.len(),
            next,
            if banked { " (banked)" } else { "" }
        );
        self.pool.clear();
        self.record(
            seat,
            Action::Reroll {
                positions,
                hand: next.clone(),
                banked,
            },
        );
        self.hand = Some(next.clone());
        self.touch();
        Ok(next)
    }

    /// Reroll one die per requested face value.
    pub fn reroll_numbers(&mut self, acting: &Player, faces: &[Pip]) -> Result<Hand, PlayerError> {
        self.check_usable(acting)?;
        let hand = self.current_hand()?;
        if faces.is_empty() {
            return Err(PlayerError::EmptySelection);
        }
        if let Some(&face) = faces.iter().find(|&&face| Die::new(face).is_none()) {
            return Err(PlayerError::InvalidFace { face });
        }
        let positions = hand
            .positions_of_faces(faces)
            .ok_or(PlayerError::FacesNotInHand)?;
        self.reroll_dice(acting, &positions)
    }

    /// Reroll everything queued in the pool.
    pub fn reroll_pooled(&mut self, acting: &Player) -> Result<Hand, PlayerError> {
        self.check_usable(acting)?;
        self.current_hand()?;
        if self.pool.is_empty() {
            return Err(PlayerError::EmptySelection);
        }
        let positions = self.pool.positions();
        self.reroll_dice(acting, &positions)
    }

    fn check_pool_position(&self, acting: &Player, position: usize) -> Result<(), PlayerError> {
        self.check_usable(acting)?;
        let dice = self.current_hand()?.len();
        if position >= dice {
            return Err(PlayerError::InvalidPosition { position, dice });
        }
        Ok(())
    }

    /// Flip one position in the pool. Returns whether it is now queued.
    pub fn reroll_pool_toggle(&mut self, acting: &Player, position: usize) -> Result<bool, PlayerError> {
        self.check_pool_position(acting, position)?;
        Ok(self.pool.toggle(position))
    }

    pub fn reroll_pool_add(&mut self, acting: &Player, position: usize) -> Result<(), PlayerError> {
        self.check_pool_position(acting, position)?;
        self.pool.add(position)
    }

    pub fn reroll_pool_remove(&mut self, acting: &Player, position: usize) -> Result<(), PlayerError> {
        self.check_pool_position(acting, position)?;
        self.pool.remove(position)
    }

    pub fn reroll_pool_select_all(&mut self, acting: &Player) -> Result<(), PlayerError> {
        self.check_usable(acting)?;
        let dice = self.current_hand()?.len();
        self.pool.select_all(dice);
        Ok(())
    }

    pub fn reroll_pool_clear(&mut self, acting: &Player) -> Result<(), PlayerError> {
        self.check_usable(acting)?;
        self.pool.clear();
        Ok(())
    }

    /// Legal moves for the acting player's hand, best first.
    pub fn get_hand_score_options(&self, acting: &Player) -> Result<ScoreOptions, PlayerError> {
        let seat = self.check_usable(acting)?;
        let hand = self.current_hand()?;
        Ok(self.board()?.get_score_options(seat, hand))
    }

    /// Score the hand into `category` and pass the turn.
    pub fn commit_turn(&mut self, acting: &Player, category: Category) -> Result<CommitOutcome, GameError> {
        let seat = self.check_usable(acting)?;
        let hand = self.hand.as_ref().ok_or(PlayerError::NotRolled)?;
        let board = self.scoreboard.as_mut().ok_or(PlayerError::NotStarted)?;

        let outcome = board.commit_dice_combination(seat, hand, category)?;
        let board_done = board.is_finished();

        if self.config.variant.banks_rerolls() {
            let unused = REROLLS_PER_TURN.saturating_sub(self.rerolls);
            if let Some(saved) = self.saved_rerolls.as_mut() {
                saved[seat] += u32::from(unused);
            }
        }

        debug!("{} scored {} in {}", acting, outcome.total(), category);
        self.record(
            seat,
            Action::Commit {
                category,
                score: outcome.score,
            },
        );
        if board_done {
            self.finish("scoreboard filled");
        } else {
            self.advance_turn();
        }
        Ok(outcome)
    }

    /// Reset the turn state and move to the next active seat.
    fn advance_turn(&mut self) {
        self.hand = None;
        self.pool.clear();
        self.rerolls = 0;
        self.turn += 1;
        self.sequence = 0;

        let seats = self.roster.len();
        let start = self.current.index();
        if let Some(next) = (1..=seats)
            .map(|step| PlayerId::new(((start + step) % seats) as u8))
            .find(|seat| !self.inactive.contains(seat))
        {
            self.current = next;
        }
        self.touch();
    }

    fn record(&mut self, seat: PlayerId, action: Action) {
        self.sequence += 1;
        self.history
            .push_back(ActionRecord::new(seat, action, self.turn, self.sequence));
    }

    fn touch(&mut self) {
        self.last_op = now_secs();
    }

    // === Scores ===

    fn board(&self) -> Result<&Scoreboard, PlayerError> {
        self.scoreboard.as_ref().ok_or(PlayerError::NotStarted)
    }

    /// One player's card.
    pub fn scores_player(&self, player: &Player) -> Result<PlayerTable, PlayerError> {
        let board = self.board()?;
        let seat = self.seat_of(player).ok_or(PlayerError::NotInGame)?;
        Ok(board.player_table(seat))
    }

    /// Every card side by side.
    pub fn scores_all(&self) -> Result<FullTable, PlayerError> {
        Ok(self.board()?.full_table())
    }

    /// Standings by grand total, each paired with the player in that seat.
    pub fn scores_final(&self) -> Result<Vec<(Player, Standing)>, PlayerError> {
        let standings = self.board()?.final_scores();
        Ok(standings
            .into_iter()
            .filter_map(|standing| {
                let player = self.roster.get(standing.player.index())?;
                Some((player.clone(), standing))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::LoadedDice;

    fn ada() -> Player {
        Player::new(UserId(1), "Ada")
    }

    fn bob() -> Player {
        Player::new(UserId(2), "Bob")
    }

    fn cy() -> Player {
        Player::new(UserId(3), "Cy")
    }

    fn session(variant: Variant, faces: &[Pip]) -> Session<LoadedDice> {
        Session::with_dice(ada(), GameConfig::new(variant), LoadedDice::new(faces.to_vec()))
    }

    /// Ada and Bob, Ada first.
    fn running_pair(variant: Variant, faces: &[Pip]) -> Session<LoadedDice> {
        let mut dice = vec![6, 1];
        dice.extend_from_slice(faces);
        let mut s = session(variant, &dice);
        s.add_player(bob()).unwrap();
        s.start_game(&ada()).unwrap();
        s
    }

    #[test]
    fn test_lobby_roster() {
        let mut s = session(Variant::YATZY, &[]);
        assert!(s.is_game_not_started());
        assert_eq!(s.players(), &[ada()]);

        s.add_player(bob()).unwrap();
        assert_eq!(s.add_player(bob()), Err(PlayerError::AlreadyJoined));
        assert_eq!(s.del_player(&cy()), Err(PlayerError::NotInGame));
        assert_eq!(s.del_player(&bob()), Ok(Departure::Removed));
        assert_eq!(s.players().len(), 1);
    }

    #[test]
    fn test_owner_leaving_lobby_aborts() {
        let mut s = session(Variant::YATZY, &[]);
        s.add_player(bob()).unwrap();
        assert_eq!(s.del_player(&ada()), Ok(Departure::Aborted));
        assert!(s.is_finished());
        assert!(!s.is_completed());
        assert_eq!(s.add_player(cy()), Err(PlayerError::AlreadyFinished));
    }

    #[test]
    fn test_start_requires_owner() {
        let mut s = session(Variant::YATZY, &[2, 5]);
        s.add_player(bob()).unwrap();
        assert_eq!(s.start_game(&bob()), Err(PlayerError::OwnerOnly));
        assert_eq!(s.roll(&ada()), Err(PlayerError::NotStarted));

        let events = s.start_game(&ada()).unwrap();
        assert!(s.is_game_in_progress());
        assert_eq!(s.players(), &[bob(), ada()]);
        assert_eq!(s.current_player(), Some(&bob()));
        assert_eq!(events.len(), 4);
        assert_eq!(s.start_game(&ada()), Err(PlayerError::AlreadyStarted));
        assert_eq!(s.add_player(cy()), Err(PlayerError::AlreadyStarted));
    }

    #[test]
    fn test_roll_and_commit_rotate_turn() {
        let mut s = running_pair(Variant::YATZY, &[1, 1, 1, 4, 5]);
        assert_eq!(s.roll(&bob()), Err(PlayerError::NotYourTurn));
        assert_eq!(
            s.commit_turn(&ada(), Category::Chance),
            Err(GameError::Player(PlayerError::NotRolled))
        );

        let hand = s.roll(&ada()).unwrap();
        assert_eq!(hand.to_string(), "1 1 1 4 5");
        assert_eq!(s.roll(&ada()), Err(PlayerError::AlreadyRolled));

        let options = s.get_hand_score_options(&ada()).unwrap();
        assert_eq!(options.get(Category::ThreeOfAKind), Some(3));

        let outcome = s.commit_turn(&ada(), Category::ThreeOfAKind).unwrap();
        assert_eq!(outcome.score, 3);
        assert_eq!(s.current_player(), Some(&bob()));
        assert!(s.hand().is_none());
        assert_eq!(s.turn(), 2);
    }

    #[test]
    fn test_illegal_commit_keeps_hand() {
        let mut s = running_pair(Variant::YATZY, &[2, 2, 3, 3, 3]);
        s.roll(&ada()).unwrap();
        let err = s.commit_turn(&ada(), Category::Castle).unwrap_err();
        assert!(matches!(err, GameError::IllegalMove(_)));
        assert!(s.hand().is_some());
        assert_eq!(s.current_player(), Some(&ada()));
    }

    #[test]
    fn test_reroll_budget() {
        let mut s = running_pair(Variant::YATZY, &[1, 2, 3, 4, 5, 6, 6, 6]);
        s.roll(&ada()).unwrap();

        assert_eq!(s.reroll_dice(&ada(), &[0]).unwrap().to_string(), "2 3 4 5 6");
        assert_eq!(s.reroll_dice(&ada(), &[0, 1]).unwrap().to_string(), "4 5 6 6 6");
        assert_eq!(s.reroll_count(), 2);

        let before = s.hand().cloned();
        assert_eq!(s.reroll_dice(&ada(), &[0]), Err(PlayerError::NoRerollsLeft));
        assert_eq!(s.hand().cloned(), before);
    }

    #[test]
    fn test_rejected_reroll_is_atomic() {
        let mut s = running_pair(Variant::YATZY, &[1, 2, 3, 4, 5]);
        s.roll(&ada()).unwrap();
        let before = s.hand().cloned();
        let history = s.history().len();

        assert_eq!(
            s.reroll_dice(&ada(), &[5]),
            Err(PlayerError::InvalidPosition { position: 5, dice: 5 })
        );
        assert_eq!(s.reroll_dice(&ada(), &[1, 1]), Err(PlayerError::DuplicatePosition { position: 1 }));
        assert_eq!(s.reroll_dice(&ada(), &[]), Err(PlayerError::EmptySelection));
        assert_eq!(s.reroll_numbers(&ada(), &[6]), Err(PlayerError::FacesNotInHand));
        assert_eq!(s.reroll_numbers(&ada(), &[7]), Err(PlayerError::InvalidFace { face: 7 }));

        assert_eq!(s.hand().cloned(), before);
        assert_eq!(s.reroll_count(), 0);
        assert_eq!(s.history().len(), history);
    }

    #[test]
    fn test_reroll_numbers_and_pool() {
        let mut s = running_pair(Variant::YATZY, &[1, 1, 3, 4, 5, 6, 6, 2]);
        s.roll(&ada()).unwrap();

        assert_eq!(s.reroll_numbers(&ada(), &[1, 1]).unwrap().to_string(), "3 4 5 6 6");

        assert!(s.reroll_pool_toggle(&ada(), 0).unwrap());
        assert_eq!(s.reroll_pool_add(&ada(), 0), Err(PlayerError::AlreadyQueued { position: 0 }));
        assert_eq!(s.reroll_pool_remove(&ada(), 1), Err(PlayerError::NotQueued { position: 1 }));
        assert_eq!(
            s.reroll_pool_add(&ada(), 5),
            Err(PlayerError::InvalidPosition { position: 5, dice: 5 })
        );
        assert_eq!(s.reroll_pooled(&ada()).unwrap().to_string(), "2 4 5 6 6");
        assert!(s.reroll_pool().is_empty());
        assert_eq!(s.reroll_pooled(&ada()), Err(PlayerError::EmptySelection));
    }

    #[test]
    fn test_maxi_banks_unused_rerolls() {
        let six = [3, 3, 3, 3, 3, 3];
        let mut dice = Vec::new();
        dice.extend_from_slice(&six); // Ada, no rerolls
        dice.extend_from_slice(&six); // Bob
        dice.extend_from_slice(&[1, 2, 3, 4, 5, 6]); // Ada again
        dice.extend_from_slice(&[6, 6, 6]); // three rerolls of one die
        let mut s = running_pair(Variant::maxi(), &dice);

        s.roll(&ada()).unwrap();
        s.commit_turn(&ada(), Category::MaxiYatzy).unwrap();
        assert_eq!(s.saved_rerolls(PlayerId::new(0)), 2);

        s.roll(&bob()).unwrap();
        s.commit_turn(&bob(), Category::Threes).unwrap();

        s.roll(&ada()).unwrap();
        s.reroll_dice(&ada(), &[0]).unwrap();
        s.reroll_dice(&ada(), &[0]).unwrap();
        assert_eq!(s.saved_rerolls(PlayerId::new(0)), 2);

        s.reroll_dice(&ada(), &[0]).unwrap();
        assert_eq!(s.reroll_count(), 2);
        assert_eq!(s.saved_rerolls(PlayerId::new(0)), 1);
        assert!(matches!(
            s.history().last().map(|r| &r.action),
            Some(Action::Reroll { banked: true, .. })
        ));
    }

    #[test]
    fn test_leave_mid_game_forfeits_and_rotates() {
        // Ada 6, Bob 4, Cy 1; then Bob 5, Cy 2
        let mut s = session(Variant::YATZY, &[6, 4, 1, 5, 2]);
        s.add_player(bob()).unwrap();
        s.add_player(cy()).unwrap();
        s.start_game(&ada()).unwrap();
        assert_eq!(s.players(), &[ada(), bob(), cy()]);

        assert_eq!(s.del_player(&ada()), Ok(Departure::Forfeited));
        assert_eq!(s.current_player(), Some(&bob()));
        assert_eq!(s.owner(), bob().id());
        assert!(s.scoreboard().unwrap().is_filled(PlayerId::new(0)));
        assert_eq!(s.del_player(&ada()), Err(PlayerError::NotInGame));

        // Cy leaves out of turn: Bob keeps the turn
        assert_eq!(s.del_player(&cy()), Ok(Departure::Forfeited));
        assert_eq!(s.current_player(), Some(&bob()));

        assert_eq!(s.del_player(&bob()), Ok(Departure::Finished));
        assert!(s.is_finished());
    }

    #[test]
    fn test_rotation_skips_inactive() {
        let mut s = session(Variant::YATZY, &[6, 4, 1, 5, 2, 2, 2, 2, 2, 2]);
        s.add_player(bob()).unwrap();
        s.add_player(cy()).unwrap();
        s.start_game(&ada()).unwrap();

        s.del_player(&bob()).unwrap();
        s.roll(&ada()).unwrap();
        s.commit_turn(&ada(), Category::Twos).unwrap();
        assert_eq!(s.current_player(), Some(&cy()));
    }

    #[test]
    fn test_kick_permissions() {
        let mut s = running_pair(Variant::YATZY, &[]);
        let last = s.last_op();

        assert_eq!(s.kick_player_at(&ada(), &bob(), last), Err(PlayerError::KickNotCurrent));
        assert_eq!(
            s.kick_player_at(&cy(), &ada(), last + 100),
            Err(PlayerError::KickTooEarly { remaining_secs: 801 })
        );
        assert!(s.is_active(PlayerId::new(0)));

        assert_eq!(s.kick_player_at(&cy(), &ada(), last + 901), Ok(Departure::Forfeited));
        assert!(!s.is_active(PlayerId::new(0)));
        assert_eq!(s.current_player(), Some(&bob()));
        assert_eq!(s.owner(), bob().id());
        assert!(matches!(s.history().last().map(|r| &r.action), Some(Action::Kicked)));
    }

    #[test]
    fn test_self_kick_and_owner_kick_anytime() {
        let mut s = running_pair(Variant::YATZY, &[]);
        let last = s.last_op();
        assert_eq!(s.kick_player_at(&ada(), &ada(), last), Ok(Departure::Forfeited));

        let mut s = running_pair(Variant::YATZY, &[1, 2, 3, 4, 5]);
        s.roll(&ada()).unwrap();
        s.commit_turn(&ada(), Category::Chance).unwrap();
        let last = s.last_op();
        assert_eq!(s.kick_player_at(&ada(), &bob(), last), Ok(Departure::Forfeited));
    }

    #[test]
    fn test_kick_in_lobby() {
        let mut s = session(Variant::YATZY, &[]);
        s.add_player(bob()).unwrap();
        s.add_player(cy()).unwrap();
        assert_eq!(s.kick_player_at(&ada(), &cy(), 0), Ok(Departure::Removed));
        assert_eq!(s.kick_player_at(&bob(), &ada(), u64::MAX), Ok(Departure::Aborted));
        assert!(s.is_finished());
    }

    #[test]
    fn test_stop_game() {
        let mut s = running_pair(Variant::YATZY, &[]);
        assert_eq!(s.stop_game(&bob()), Err(PlayerError::OwnerOnly));
        s.stop_game(&ada()).unwrap();
        assert!(s.is_finished());
        assert_eq!(s.roll(&ada()), Err(PlayerError::AlreadyFinished));
        assert_eq!(s.stop_game(&ada()), Err(PlayerError::AlreadyFinished));
        assert_eq!(s.del_player(&bob()), Err(PlayerError::AlreadyFinished));
        assert_eq!(s.del_player(&cy()), Err(PlayerError::AlreadyFinished));

        let players: Vec<Player> = s.scores_final().unwrap().into_iter().map(|(p, _)| p).collect();
        assert_eq!(players, vec![ada(), bob()]);
    }

    #[test]
    fn test_history_records_turns() {
        let mut s = running_pair(Variant::YATZY, &[1, 2, 3, 4, 5, 6]);
        s.roll(&ada()).unwrap();
        s.reroll_dice(&ada(), &[0]).unwrap();
        s.commit_turn(&ada(), Category::LargeStraight).unwrap();

        let records: Vec<_> = s.history().iter().map(|r| (r.turn, r.sequence)).collect();
        assert_eq!(records, vec![(1, 1), (1, 2), (1, 3)]);
        assert_eq!(
            s.history().last().map(|r| r.action.clone()),
            Some(Action::Commit {
                category: Category::LargeStraight,
                score: 20
            })
        );
    }
}
