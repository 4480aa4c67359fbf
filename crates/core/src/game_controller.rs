//! Game controller - the top-level state machine
//!
//! Ties together the board, the piece manager, scoring and timing. An external
//! driver calls [`GameController::tick`] once per frame with a monotonic
//! timestamp; input calls ([`GameController::apply_action`] or the individual
//! mutators) may arrive between ticks. Every mutator is safe to call at any
//! time: moves that are not allowed simply return `false`.
//!
//! Timing is measured in active time only. While paused, neither gravity nor
//! the lock delay advances.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::config::GameConfig;
use crate::lock_delay::LockDelay;
use crate::piece_manager::PieceManager;
use crate::scoring::{drop_interval_ms, drop_points, level_for_lines, line_clear_points};
use crate::snapshot::{GamePhase, GameSnapshot, PieceSnapshot, RenderSink};
use crate::types::{GameAction, PieceKind, RotateDirection, LOCK_DELAY_MS};

/// Emitted once per locked piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    /// Line clear points awarded by this lock
    pub points: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    /// The next piece could not spawn
    pub game_over: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameController {
    board: Board,
    pieces: PieceManager,
    score: u32,
    level: u32,
    lines: u32,
    start_level: u32,
    drop_interval_ms: u32,
    lock_delay_ms: u32,
    lock_delay: LockDelay,
    /// Active time accumulated since the last gravity step
    gravity_ms: u32,
    last_tick_ms: Option<u64>,
    paused: bool,
    game_over: bool,
    /// Monotonic episode id (increments on reset)
    episode: u32,
    last_event: Option<LockEvent>,
}

impl GameController {
    /// Create a new game with the given RNG seed and default settings
    pub fn new(seed: u32) -> Self {
        Self::build(seed, LOCK_DELAY_MS, 1)
    }

    /// Create a new game from configuration, using `fallback_seed` when none is set
    pub fn with_config(config: &GameConfig, fallback_seed: u32) -> Self {
        Self::build(
            config.seed.unwrap_or(fallback_seed),
            config.lock_delay_ms,
            config.start_level,
        )
    }

    /// Start from a prepared board (puzzle setups, replays, tests).
    ///
    /// If the first piece already collides the game starts over.
    pub fn with_board(seed: u32, board: Board) -> Self {
        let mut game = Self::new(seed);
        game.board = board;
        game.game_over = game.board.collides(game.pieces.current(), 0, 0);
        game.pieces.update_ghost_piece(&game.board);
        game
    }

    fn build(seed: u32, lock_delay_ms: u32, start_level: u32) -> Self {
        let board = Board::new();
        let pieces = PieceManager::new(seed, &board);
        let level = level_for_lines(0, start_level);

        Self {
            board,
            pieces,
            score: 0,
            level,
            lines: 0,
            start_level,
            drop_interval_ms: drop_interval_ms(level),
            lock_delay_ms,
            lock_delay: LockDelay::new(),
            gravity_ms: 0,
            last_tick_ms: None,
            paused: false,
            game_over: false,
            episode: 0,
            last_event: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pieces(&self) -> &PieceManager {
        &self.pieces
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Whether the lock delay is armed
    pub fn is_locking(&self) -> bool {
        self.lock_delay.is_armed()
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn phase(&self) -> GamePhase {
        if self.game_over {
            GamePhase::GameOver
        } else if self.paused {
            GamePhase::Paused
        } else if self.lock_delay.is_armed() {
            GamePhase::LockDelayArmed
        } else {
            GamePhase::Falling
        }
    }

    /// Player input is ignored while paused or after game over
    fn accepts_input(&self) -> bool {
        !self.paused && !self.game_over
    }

    /// Try to move the current piece by (dx, dy).
    ///
    /// A failed downward move arms the lock delay.
    pub fn move_piece(&mut self, dx: i8, dy: i8) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.shift(dx, dy)
    }

    fn shift(&mut self, dx: i8, dy: i8) -> bool {
        if self.pieces.current().check_collision(&self.board, dx, dy) {
            if dy > 0 {
                self.start_lock_delay();
            }
            return false;
        }

        let piece = self.pieces.current_mut();
        piece.x += dx;
        piece.y += dy;
        self.pieces.update_ghost_piece(&self.board);

        // Any successful move restarts the lock delay from scratch.
        self.lock_delay.cancel();
        true
    }

    /// Arm the lock delay unless it is already armed
    pub fn start_lock_delay(&mut self) {
        self.lock_delay.arm(self.lock_delay_ms);
    }

    /// Rotate the current piece, reverting if the result collides
    pub fn rotate_piece(&mut self, direction: RotateDirection) -> bool {
        if !self.accepts_input() {
            return false;
        }

        let before = *self.pieces.current();
        self.pieces.current_mut().rotate(direction);

        if self.pieces.current().check_collision(&self.board, 0, 0) {
            *self.pieces.current_mut() = before;
            return false;
        }

        self.pieces.update_ghost_piece(&self.board);
        self.lock_delay.cancel();
        true
    }

    /// One soft drop step; scores only if the piece moved
    pub fn soft_drop(&mut self) -> bool {
        let moved = self.move_piece(0, 1);
        if moved {
            self.score = self.score.saturating_add(drop_points(1, false));
        }
        moved
    }

    /// Drop the piece as far as it goes and lock it immediately.
    ///
    /// Returns the number of rows travelled.
    pub fn hard_drop(&mut self) -> u32 {
        if !self.accepts_input() {
            return 0;
        }

        self.lock_delay.cancel();
        let mut steps: u32 = 0;
        while self.shift(0, 1) {
            steps += 1;
        }
        self.score = self.score.saturating_add(drop_points(steps, true));
        self.commit_piece();
        steps
    }

    /// Swap the current piece with the hold slot (once per lock)
    pub fn hold_piece(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        if !self.pieces.hold_current_piece() {
            return false;
        }
        self.lock_delay.cancel();
        self.pieces.update_ghost_piece(&self.board);
        true
    }

    /// Lock the piece if the lock delay is armed; otherwise a no-op
    pub fn lock_piece(&mut self) {
        if self.game_over || !self.lock_delay.is_armed() {
            return;
        }
        self.commit_piece();
    }

    /// Merge the current piece, clear lines, score and spawn the next piece
    fn commit_piece(&mut self) {
        let piece = *self.pieces.current();
        self.board.add_piece(&piece);
        let cleared = self.board.clear_lines();
        let points = self.update_score(cleared);

        self.lock_delay.cancel();
        self.gravity_ms = 0;

        self.pieces.spawn_next();
        self.pieces.reset_hold_ability();
        if self.pieces.current().check_collision(&self.board, 0, 0) {
            self.game_over = true;
        }
        self.pieces.update_ghost_piece(&self.board);

        self.last_event = Some(LockEvent {
            kind: piece.kind,
            lines_cleared: cleared as u32,
            points,
            score: self.score,
            level: self.level,
            lines: self.lines,
            game_over: self.game_over,
        });
    }

    /// Apply line clear scoring and levelling. Returns the points awarded.
    pub fn update_score(&mut self, lines_cleared: usize) -> u32 {
        let points = line_clear_points(lines_cleared, self.level);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(lines_cleared as u32);

        let new_level = level_for_lines(self.lines, self.start_level);
        if new_level != self.level {
            self.level = new_level;
            self.drop_interval_ms = drop_interval_ms(new_level);
        }
        points
    }

    pub fn toggle_pause(&mut self) {
        if self.game_over {
            return;
        }
        self.paused = !self.paused;
    }

    /// Advance timers to `now_ms` and apply at most one gravity step.
    ///
    /// Returns true if the piece moved or locked.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.game_over {
            return false;
        }

        let elapsed = match self.last_tick_ms {
            Some(prev) => now_ms.saturating_sub(prev),
            None => 0,
        };
        self.last_tick_ms = Some(now_ms);

        if self.paused {
            return false;
        }
        let elapsed = u32::try_from(elapsed).unwrap_or(u32::MAX);

        if self.lock_delay.advance(elapsed) {
            self.commit_piece();
            return true;
        }

        self.gravity_ms = self.gravity_ms.saturating_add(elapsed);
        if self.gravity_ms > self.drop_interval_ms {
            self.gravity_ms = 0;
            // A blocked step arms the lock delay inside shift().
            return self.shift(0, 1);
        }

        false
    }

    /// Tick, then hand the resulting snapshot to `sink`
    pub fn frame(&mut self, now_ms: u64, sink: &mut impl RenderSink) {
        self.tick(now_ms);
        sink.render(&self.snapshot());
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_piece(-1, 0),
            GameAction::MoveRight => self.move_piece(1, 0),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => {
                if !self.accepts_input() {
                    return false;
                }
                self.hard_drop();
                true
            }
            GameAction::RotateCw => self.rotate_piece(RotateDirection::Clockwise),
            GameAction::RotateCcw => self.rotate_piece(RotateDirection::CounterClockwise),
            GameAction::Hold => self.hold_piece(),
            GameAction::Pause => {
                self.toggle_pause();
                !self.game_over
            }
            GameAction::Restart => {
                self.reset();
                true
            }
        }
    }

    /// Start a new game, continuing the RNG sequence
    pub fn reset(&mut self) {
        let seed = self.pieces.seed();
        let episode = self.episode.wrapping_add(1);
        *self = Self::build(seed, self.lock_delay_ms, self.start_level);
        self.episode = episode;
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.current = PieceSnapshot::from(self.pieces.current());
        out.ghost = PieceSnapshot::from(self.pieces.ghost());
        out.hold = self.pieces.hold();
        out.can_hold = self.pieces.can_hold();
        out.next_queue = self.pieces.preview();
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.drop_interval_ms = self.drop_interval_ms;
        out.lock_delay_ms = self.lock_delay.remaining_ms();
        out.phase = self.phase();
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.episode = self.episode;
        out.seed = self.pieces.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new(1)
    }
}
