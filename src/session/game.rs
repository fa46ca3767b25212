//! The game session.
//!
//! `GameSession` owns every piece of mutable game state - board, tags,
//! score, streaks, milestones, power-ups, history, RNG - and is the only
//! writer to any of it. Callers drive it through the two-phase move
//! protocol: `resolve_move` slides and merges, then, after whatever delay
//! the host wants for animation, `spawn_next_tile` places the random tile
//! and runs the post-spawn checks. Nothing here schedules callbacks or
//! touches a clock besides timestamping ghost snapshots.

use tracing::debug;

use crate::board::{Board, SpecialTileMap};
use crate::core::{Coord, Direction, GameConfig, GameRng};
use crate::engine::{movement, spawn, SpawnedTile};
use crate::persist::{
    keys, load_json, save_json, CollectedSpecials, GhostSnapshot, MemoryStore, StateStore,
    StreakBests,
};
use crate::powerup::{hint, PowerUpInventory, PowerUpKind};
use crate::rules::{effect, MilestoneState, StreakState};
use crate::session::event::{GameEvent, MoveReport, MoveStatus, SpawnReport, TileView};
use crate::session::history::{MoveHistory, Snapshot};

/// Why an operation was declined. Declines are ordinary outcomes, not
/// failures; the caller decides whether to surface a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Declined {
    /// The power-up has no charges left.
    OutOfCharges,
    /// Undo with nothing to undo.
    EmptyHistory,
    /// A resolved move is still waiting for its spawn.
    SpawnPending,
    /// Spawn requested with no move awaiting one.
    NoSpawnPending,
    /// The session has ended; power-ups are disabled.
    GameOver,
    /// Hint found no direction that changes the board.
    NoUsefulMove,
    /// Remove used without arming it first.
    NotArmed,
    /// Remove aimed at an empty cell; the mode stays armed.
    EmptyCell,
    /// Ghost overlay enabled before any best game was recorded.
    NoGhostData,
}

impl std::fmt::Display for Declined {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Declined::OutOfCharges => "no charges left",
            Declined::EmptyHistory => "nothing to undo",
            Declined::SpawnPending => "a spawn is pending",
            Declined::NoSpawnPending => "no spawn is pending",
            Declined::GameOver => "the game is over",
            Declined::NoUsefulMove => "no direction changes the board",
            Declined::NotArmed => "remove mode is not armed",
            Declined::EmptyCell => "the cell is empty",
            Declined::NoGhostData => "no ghost snapshot recorded yet",
        };
        write!(f, "{}", reason)
    }
}

impl std::error::Error for Declined {}

/// Where the session is in the two-phase move protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    AwaitingSpawn { merge_count: usize },
}

/// One game session. See the module docs for the driving protocol.
pub struct GameSession {
    config: GameConfig,
    store: Box<dyn StateStore>,
    rng: GameRng,

    board: Board,
    specials: SpecialTileMap,
    score: u32,
    best_score: u32,
    move_count: u32,
    phase: Phase,
    remove_armed: bool,
    has_won: bool,
    game_over: bool,

    history: MoveHistory,
    inventory: PowerUpInventory,
    streaks: StreakState,
    milestones: MilestoneState,
    collected: CollectedSpecials,
    ghost: Option<GhostSnapshot>,
    ghost_enabled: bool,
}

impl GameSession {
    /// Create a session backed by an in-memory store.
    #[must_use]
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_store(config, seed, Box::new(MemoryStore::new()))
    }

    /// Create a session on top of a host-supplied store, resuming every
    /// cross-session durable it holds. Missing or corrupt blobs fall back
    /// to defaults. The board starts empty; call [`new_game`] to deal the
    /// opening tiles.
    ///
    /// [`new_game`]: GameSession::new_game
    #[must_use]
    pub fn with_store(config: GameConfig, seed: u64, store: Box<dyn StateStore>) -> Self {
        let best_score = load_json(&*store, keys::BEST_SCORE, 0);
        let inventory = load_json(
            &*store,
            keys::POWER_UPS,
            PowerUpInventory::new(&config.power_ups),
        );
        let bests: StreakBests = load_json(&*store, keys::STREAK_BESTS, StreakBests::default());
        let milestones = load_json(&*store, keys::MILESTONES, MilestoneState::new());
        let collected = load_json(&*store, keys::COLLECTED_SPECIALS, CollectedSpecials::default());
        let ghost: Option<GhostSnapshot> = load_json(&*store, keys::GHOST_DATA, None);
        let ghost_enabled = load_json(&*store, keys::GHOST_ENABLED, false) && ghost.is_some();

        Self {
            history: MoveHistory::new(config.history_limit),
            rng: GameRng::new(seed),
            board: Board::new(),
            specials: SpecialTileMap::new(),
            score: 0,
            best_score,
            move_count: 0,
            phase: Phase::Idle,
            remove_armed: false,
            has_won: false,
            game_over: false,
            inventory,
            streaks: StreakState::with_bests(bests.merge, bests.perfect),
            milestones,
            collected,
            ghost,
            ghost_enabled,
            config,
            store,
        }
    }

    // ------------------------------------------------------------------
    // Game lifecycle
    // ------------------------------------------------------------------

    /// Start a fresh game: wipe the board, score, history, milestones,
    /// and current streaks, restore the power-up allowance, and deal two
    /// opening tiles. Best score, streak bests, the ghost snapshot, and
    /// the lifetime collected counters survive.
    pub fn new_game(&mut self) -> Vec<SpawnedTile> {
        self.board = Board::new();
        self.specials.clear();
        self.score = 0;
        self.move_count = 0;
        self.phase = Phase::Idle;
        self.remove_armed = false;
        self.has_won = false;
        self.game_over = false;
        self.history.clear();
        self.streaks.reset_current();
        self.milestones.reset();
        save_json(self.store.as_mut(), keys::MILESTONES, &self.milestones);
        self.inventory = PowerUpInventory::new(&self.config.power_ups);
        save_json(self.store.as_mut(), keys::POWER_UPS, &self.inventory);

        let mut spawned = Vec::with_capacity(2);
        for _ in 0..2 {
            if let Some(tile) = spawn::spawn_random_tile(
                &mut self.board,
                &mut self.specials,
                self.move_count,
                &self.config,
                &mut self.rng,
            ) {
                spawned.push(tile);
            }
        }
        debug!(seed = self.rng.seed(), "new game started");
        spawned
    }

    /// Resolve a directional move: compact, merge, apply merge scoring
    /// and tile milestones, and park the session until the caller spawns
    /// the next tile.
    ///
    /// A direction that changes nothing returns [`MoveStatus::NoChange`]
    /// and leaves every piece of state untouched.
    pub fn resolve_move(&mut self, direction: Direction) -> MoveStatus {
        if matches!(self.phase, Phase::AwaitingSpawn { .. }) {
            return MoveStatus::SpawnPending;
        }

        let snapshot = Snapshot {
            board: self.board,
            specials: self.specials.clone(),
            score: self.score,
        };
        let outcome = movement::apply(&mut self.board, &mut self.specials, direction);
        if !outcome.moved {
            return MoveStatus::NoChange;
        }

        self.history.push(snapshot);
        self.move_count += 1;
        self.remove_armed = false;

        let score_before = self.score;
        let mut events = Vec::new();
        let mut collected_changed = false;
        for merge in &outcome.merges {
            for kind in effect::triggered_kinds(&merge.tags) {
                self.collected.bump(kind);
                collected_changed = true;
            }
            self.add_score(merge.value + merge.bonus, &mut events);
            if let Some(tier) = self.milestones.check_tile(merge.value) {
                let (points, confetti) = (tier.points, tier.confetti);
                events.push(GameEvent::TileMilestone {
                    value: merge.value,
                    points,
                    confetti,
                });
                self.add_score(points, &mut events);
                save_json(self.store.as_mut(), keys::MILESTONES, &self.milestones);
            }
        }
        if collected_changed {
            save_json(self.store.as_mut(), keys::COLLECTED_SPECIALS, &self.collected);
        }

        self.phase = Phase::AwaitingSpawn {
            merge_count: outcome.merges.len(),
        };
        debug!(
            %direction,
            merges = outcome.merges.len(),
            score = self.score,
            "move resolved"
        );

        MoveStatus::Moved(MoveReport {
            merges: outcome.merges,
            score_delta: self.score - score_before,
            events,
        })
    }

    /// Place the pending random tile, then run the streak update, the win
    /// latch, and the game-over check. Valid only after a move resolved.
    pub fn spawn_next_tile(&mut self) -> Result<SpawnReport, Declined> {
        let Phase::AwaitingSpawn { merge_count } = self.phase else {
            return Err(Declined::NoSpawnPending);
        };
        self.phase = Phase::Idle;

        let tile = spawn::spawn_random_tile(
            &mut self.board,
            &mut self.specials,
            self.move_count,
            &self.config,
            &mut self.rng,
        );

        let mut events = Vec::new();
        let update = self.streaks.apply(merge_count);
        if update.reward_points > 0 {
            events.push(GameEvent::StreakReward {
                streak: update.streak,
                points: update.reward_points,
            });
            self.add_score(update.reward_points, &mut events);
        }
        if update.random_power_up {
            if let Some(&kind) = self.rng.choose(&PowerUpKind::ALL) {
                if self.inventory.grant(kind) {
                    save_json(self.store.as_mut(), keys::POWER_UPS, &self.inventory);
                    events.push(GameEvent::StreakPowerUp { kind });
                }
            }
        }
        if update.best_changed {
            save_json(
                self.store.as_mut(),
                keys::STREAK_BESTS,
                &StreakBests {
                    merge: self.streaks.best_merge_streak,
                    perfect: self.streaks.best_perfect_streak,
                },
            );
        }

        if !self.has_won && self.board.has_value(self.config.win_value) {
            self.has_won = true;
            events.push(GameEvent::Win);
        }
        if !self.board.can_move() {
            self.game_over = true;
            events.push(GameEvent::GameOver);
            debug!(score = self.score, moves = self.move_count, "game over");
        }

        Ok(SpawnReport {
            tile,
            streak: update.streak,
            events,
        })
    }

    // ------------------------------------------------------------------
    // Power-ups
    // ------------------------------------------------------------------

    /// Roll the session back to the snapshot taken before the last move.
    /// Restores board, tags, and score wholesale; streaks, milestones,
    /// the move counter, and the best score stay where they are.
    pub fn use_undo(&mut self) -> Result<(), Declined> {
        self.power_up_guard()?;
        if self.inventory.count(PowerUpKind::Undo) == 0 {
            return Err(Declined::OutOfCharges);
        }
        let snapshot = self.history.pop().ok_or(Declined::EmptyHistory)?;

        self.board = snapshot.board;
        self.specials = snapshot.specials;
        self.score = snapshot.score;
        self.inventory.consume(PowerUpKind::Undo);
        save_json(self.store.as_mut(), keys::POWER_UPS, &self.inventory);
        Ok(())
    }

    /// Suggest the best direction without touching live state. The charge
    /// is kept when no direction can move.
    pub fn use_hint(&mut self) -> Result<Direction, Declined> {
        self.power_up_guard()?;
        if self.inventory.count(PowerUpKind::Hint) == 0 {
            return Err(Declined::OutOfCharges);
        }
        let direction =
            hint::suggest(&self.board, &self.specials).ok_or(Declined::NoUsefulMove)?;

        self.inventory.consume(PowerUpKind::Hint);
        save_json(self.store.as_mut(), keys::POWER_UPS, &self.inventory);
        Ok(direction)
    }

    /// Arm remove mode: the next tile passed to [`remove_tile`] is
    /// cleared. Arming checks the charge but does not consume it.
    ///
    /// [`remove_tile`]: GameSession::remove_tile
    pub fn arm_remove(&mut self) -> Result<(), Declined> {
        self.power_up_guard()?;
        if self.inventory.count(PowerUpKind::Remove) == 0 {
            return Err(Declined::OutOfCharges);
        }
        self.remove_armed = true;
        Ok(())
    }

    /// Clear the selected tile, consuming the charge. Selecting an empty
    /// cell is declined and leaves the mode armed.
    pub fn remove_tile(&mut self, coord: Coord) -> Result<(), Declined> {
        self.power_up_guard()?;
        if !self.remove_armed {
            return Err(Declined::NotArmed);
        }
        if self.board.get(coord) == 0 {
            return Err(Declined::EmptyCell);
        }

        self.board.set(coord, 0);
        self.specials.remove(coord);
        self.remove_armed = false;
        self.inventory.consume(PowerUpKind::Remove);
        save_json(self.store.as_mut(), keys::POWER_UPS, &self.inventory);
        Ok(())
    }

    /// Leave remove mode without consuming a charge.
    pub fn cancel_remove(&mut self) {
        self.remove_armed = false;
    }

    fn power_up_guard(&self) -> Result<(), Declined> {
        if matches!(self.phase, Phase::AwaitingSpawn { .. }) {
            return Err(Declined::SpawnPending);
        }
        if self.game_over {
            return Err(Declined::GameOver);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Ghost overlay
    // ------------------------------------------------------------------

    /// Enable or disable the ghost overlay. Enabling is declined until a
    /// best game has been recorded.
    pub fn set_ghost_enabled(&mut self, enabled: bool) -> Result<(), Declined> {
        if enabled && self.ghost.is_none() {
            return Err(Declined::NoGhostData);
        }
        self.ghost_enabled = enabled;
        save_json(self.store.as_mut(), keys::GHOST_ENABLED, &self.ghost_enabled);
        Ok(())
    }

    /// The recorded best-game snapshot, if any.
    #[must_use]
    pub fn ghost_snapshot(&self) -> Option<&GhostSnapshot> {
        self.ghost.as_ref()
    }

    /// Whether the ghost overlay is enabled.
    #[must_use]
    pub fn ghost_enabled(&self) -> bool {
        self.ghost_enabled
    }

    // ------------------------------------------------------------------
    // Scoring plumbing
    // ------------------------------------------------------------------

    /// The single path every score gain goes through: raise the score,
    /// track the best (recording the ghost snapshot on each new best),
    /// and run the score-threshold grants.
    fn add_score(&mut self, points: u32, events: &mut Vec<GameEvent>) {
        if points == 0 {
            return;
        }
        self.score += points;

        if self.score > self.best_score {
            self.best_score = self.score;
            save_json(self.store.as_mut(), keys::BEST_SCORE, &self.best_score);
            let snapshot = GhostSnapshot {
                board: self.board,
                score: self.best_score,
                move_count: self.move_count,
                timestamp: chrono::Utc::now(),
            };
            save_json(self.store.as_mut(), keys::GHOST_DATA, &snapshot);
            self.ghost = Some(snapshot);
            events.push(GameEvent::NewBestScore {
                score: self.best_score,
            });
        }

        let granted = self.milestones.check_score(self.score, &mut self.inventory);
        if !granted.is_empty() {
            save_json(self.store.as_mut(), keys::POWER_UPS, &self.inventory);
            for kind in granted {
                events.push(GameEvent::ScorePowerUp { kind });
            }
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// The live board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The live special-tile map.
    #[must_use]
    pub fn specials(&self) -> &SpecialTileMap {
        &self.specials
    }

    /// Every occupied cell with its value and special tag, row-major.
    pub fn tiles(&self) -> impl Iterator<Item = TileView> + '_ {
        self.board
            .cells()
            .filter(|&(_, value)| value != 0)
            .map(|(coord, value)| TileView {
                coord,
                value,
                special: self.specials.kind_at(coord),
            })
    }

    /// The session score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// The best score across sessions.
    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Successfully applied moves this session.
    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Snapshots available to undo.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// The power-up charges.
    #[must_use]
    pub fn inventory(&self) -> &PowerUpInventory {
        &self.inventory
    }

    /// The streak counters.
    #[must_use]
    pub fn streaks(&self) -> &StreakState {
        &self.streaks
    }

    /// The milestone state.
    #[must_use]
    pub fn milestones(&self) -> &MilestoneState {
        &self.milestones
    }

    /// Lifetime special-tile counters.
    #[must_use]
    pub fn collected_specials(&self) -> &CollectedSpecials {
        &self.collected
    }

    /// True between `resolve_move` and `spawn_next_tile`.
    #[must_use]
    pub fn awaiting_spawn(&self) -> bool {
        matches!(self.phase, Phase::AwaitingSpawn { .. })
    }

    /// True while remove mode is armed.
    #[must_use]
    pub fn remove_armed(&self) -> bool {
        self.remove_armed
    }

    /// Whether the win tile has appeared this session.
    #[must_use]
    pub fn has_won(&self) -> bool {
        self.has_won
    }

    /// Whether no move can change the board anymore.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The configuration the session runs under.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &dyn StateStore {
        &*self.store
    }

    /// Overwrite the board and special-tile map, e.g. when restoring a
    /// saved position. Clears any pending spawn and armed remove mode;
    /// score, history, and counters are left alone.
    pub fn set_position(&mut self, board: Board, specials: SpecialTileMap) {
        self.board = board;
        self.specials = specials;
        self.phase = Phase::Idle;
        self.remove_armed = false;
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("score", &self.score)
            .field("best_score", &self.best_score)
            .field("move_count", &self.move_count)
            .field("phase", &self.phase)
            .field("has_won", &self.has_won)
            .field("game_over", &self.game_over)
            .finish_non_exhaustive()
    }
}
