//! Game state module - one play session
//!
//! Ties the board, the piece queue and the scoring rules together and owns
//! the session lifecycle:
//!
//! ```text
//! NotStarted --start--> Running <--toggle_pause--> Paused
//!                          |
//!                          +------> GameOver
//! ```
//!
//! `reset` jumps straight to `Running` from any state. Every command is a
//! no-op unless the session is `Running` with an active piece.
//!
//! Time is supplied by the caller: [`GameSession::tick`] takes an absolute
//! millisecond timestamp from whatever clock the front end uses.

use log::{debug, info, warn};

use crate::board::Board;
use crate::pieces::{shape_of, spawn_x, try_rotate, Shape};
use crate::rng::PieceQueue;
use crate::rules::Rules;
use crate::scoring::{drop_interval_ms, drop_score, level_for_lines, line_clear_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
use crate::types::{Command, GameStatus, PieceKind};

/// A piece with its own copy of its (possibly rotated) shape and an origin
/// on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Catalog shape of `kind`, centered at the top of a `cols`-wide board
    pub fn spawn(kind: PieceKind, cols: u8) -> Self {
        let shape = shape_of(kind);
        Self {
            kind,
            shape,
            x: spawn_x(cols, &shape),
            y: 0,
        }
    }

    pub fn collides(&self, board: &Board) -> bool {
        board.would_collide(&self.shape, self.x, self.y)
    }

    /// Absolute board coordinates of the occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        self.shape
            .cells()
            .into_iter()
            .map(move |(dx, dy)| (x + dx, y + dy))
    }
}

#[derive(Debug, Clone)]
pub struct GameSession {
    rules: Rules,
    board: Board,
    queue: PieceQueue,
    active: Option<Tetromino>,
    next: Tetromino,
    status: GameStatus,
    score: u32,
    level: u32,
    lines: u32,
    drop_interval_ms: u32,
    /// Gravity baseline; `None` until the next tick adopts its timestamp
    drop_start_ms: Option<u64>,
    last_tick_ms: u64,
}

fn sanitize(rules: Rules) -> Rules {
    if let Err(err) = rules.validate() {
        warn!("{}; adjusting rules", err);
        return rules.sanitized();
    }
    rules
}

impl GameSession {
    /// New session on an empty board with a seeded random queue
    pub fn new(rules: Rules, seed: u64) -> Self {
        Self::with_queue(rules, PieceQueue::new(seed))
    }

    /// Rules that fail [`Rules::validate`] are sanitized first.
    pub fn with_queue(rules: Rules, queue: PieceQueue) -> Self {
        let rules = sanitize(rules);
        let board = Board::new(rules.cols, rules.rows);
        Self::from_board(rules, board, queue)
    }

    /// New session on a pre-filled board. The board's dimensions replace
    /// `rules.cols` / `rules.rows`.
    pub fn from_board(rules: Rules, board: Board, mut queue: PieceQueue) -> Self {
        let mut rules = sanitize(rules);
        rules.cols = board.width();
        rules.rows = board.height();

        let level = rules.initial_level;
        let interval = drop_interval_ms(&rules, level);
        let next = Tetromino::spawn(queue.draw(), rules.cols);

        Self {
            rules,
            board,
            queue,
            active: None,
            next,
            status: GameStatus::NotStarted,
            score: 0,
            level,
            lines: 0,
            drop_interval_ms: interval,
            drop_start_ms: None,
            last_tick_ms: 0,
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn next(&self) -> Tetromino {
        self.next
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn started(&self) -> bool {
        self.status != GameStatus::NotStarted
    }

    pub fn is_paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
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

    /// Current gravity interval
    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn seed(&self) -> u64 {
        self.queue.seed()
    }

    /// Begin play. From `GameOver` this behaves like [`reset`](Self::reset);
    /// while running or paused it does nothing.
    pub fn start(&mut self) -> bool {
        match self.status {
            GameStatus::NotStarted => {
                self.status = GameStatus::Running;
                self.drop_start_ms = None;
                info!("session started (seed {})", self.queue.seed());
                self.spawn_next();
                true
            }
            GameStatus::GameOver => {
                self.reset();
                true
            }
            GameStatus::Running | GameStatus::Paused => false,
        }
    }

    /// Empty the board, zero the counters and go straight to `Running` with
    /// a freshly drawn piece. The queue keeps its position.
    pub fn reset(&mut self) {
        self.board.clear();
        self.score = 0;
        self.lines = 0;
        self.level = self.rules.initial_level;
        self.drop_interval_ms = drop_interval_ms(&self.rules, self.level);
        self.active = None;
        self.next = Tetromino::spawn(self.queue.draw(), self.rules.cols);
        self.status = GameStatus::Running;
        self.drop_start_ms = None;
        info!("session reset");
        self.spawn_next();
    }

    /// Promote the next piece to active and draw a new next piece.
    fn spawn_next(&mut self) {
        let upcoming = Tetromino::spawn(self.queue.draw(), self.rules.cols);
        let piece = std::mem::replace(&mut self.next, upcoming);

        if piece.collides(&self.board) {
            self.end_game(format_args!("{} blocked at spawn", piece.kind.as_str()));
        } else {
            self.active = Some(piece);
        }
    }

    fn end_game(&mut self, reason: impl std::fmt::Display) {
        self.status = GameStatus::GameOver;
        self.active = None;
        self.drop_start_ms = None;
        info!(
            "game over ({}): score {} level {} lines {}",
            reason, self.score, self.level, self.lines
        );
    }

    /// Shift the active piece. A blocked downward shift locks the piece.
    fn shift(&mut self, dx: i8, dy: i8) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };

        if !self
            .board
            .would_collide(&piece.shape, piece.x + dx, piece.y + dy)
        {
            piece.x += dx;
            piece.y += dy;
            self.active = Some(piece);
            return true;
        }

        if dy > 0 {
            self.lock_active();
        }
        false
    }

    /// Move the active piece by `(dx, dy)`.
    ///
    /// Returns true if it moved. A successful downward move scores soft drop
    /// points; a blocked downward move locks the piece instead.
    pub fn move_piece(&mut self, dx: i8, dy: i8) -> bool {
        let moved = self.shift(dx, dy);
        if moved && dy > 0 {
            self.score = self
                .score
                .saturating_add(drop_score(&self.rules, dy as u32, false));
        }
        moved
    }

    /// Rotate the active piece clockwise, trying the configured wall kicks
    pub fn rotate(&mut self) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        let board = &self.board;
        let rotated = try_rotate(
            &piece.shape,
            piece.x,
            piece.y,
            &self.rules.wall_kicks,
            |shape, x, y| board.would_collide(shape, x, y),
        );

        match rotated {
            Some((shape, dx)) => {
                self.active = Some(Tetromino {
                    shape,
                    x: piece.x + dx,
                    ..piece
                });
                true
            }
            None => {
                debug!(
                    "rotation of {} rejected at ({}, {})",
                    piece.kind.as_str(),
                    piece.x,
                    piece.y
                );
                false
            }
        }
    }

    /// Rows the active piece can fall before it rests
    pub fn drop_distance(&self) -> u32 {
        let Some(piece) = self.active else {
            return 0;
        };

        let mut distance: i8 = 0;
        while !self
            .board
            .would_collide(&piece.shape, piece.x, piece.y + distance + 1)
        {
            distance += 1;
        }
        distance as u32
    }

    /// Drop the active piece to its resting row, score it and lock it.
    /// Returns the distance dropped.
    pub fn hard_drop(&mut self) -> u32 {
        if self.status != GameStatus::Running {
            return 0;
        }
        let Some(mut piece) = self.active else {
            return 0;
        };

        let distance = self.drop_distance();
        piece.y += distance as i8;
        self.active = Some(piece);
        self.score = self
            .score
            .saturating_add(drop_score(&self.rules, distance, true));

        self.lock_active();
        distance
    }

    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        if let Err(err) = self
            .board
            .lock(&piece.shape, piece.x, piece.y, piece.kind)
        {
            self.end_game(err);
            return;
        }
        debug!("locked {} at ({}, {})", piece.kind.as_str(), piece.x, piece.y);

        let cleared = self.board.clear_full_rows();
        if cleared > 0 {
            let points = line_clear_score(&self.rules, cleared, self.level);
            self.score = self.score.saturating_add(points);
            self.lines = self.lines.saturating_add(cleared as u32);
            info!("cleared {} line(s) for {} points", cleared, points);
            self.update_level();
        }

        self.spawn_next();
    }

    /// Levels only go up, even if the rules would compute a lower one.
    fn update_level(&mut self) {
        let level = level_for_lines(&self.rules, self.lines);
        if level > self.level {
            self.level = level;
            self.drop_interval_ms = drop_interval_ms(&self.rules, level);
            info!("level {} ({}ms per row)", level, self.drop_interval_ms);
        }
    }

    /// Advance gravity to `timestamp_ms`.
    ///
    /// The first tick after start, reset or unpause only records a baseline.
    /// After that, once strictly more than one drop interval has passed the
    /// piece moves down one row (locking if blocked) and the baseline moves
    /// to `timestamp_ms`. Timestamps earlier than the last one seen are
    /// treated as equal to it.
    ///
    /// Returns true if gravity fired.
    pub fn tick(&mut self, timestamp_ms: u64) -> bool {
        let now = timestamp_ms.max(self.last_tick_ms);
        self.last_tick_ms = now;

        if self.status != GameStatus::Running {
            return false;
        }

        let Some(start) = self.drop_start_ms else {
            self.drop_start_ms = Some(now);
            return false;
        };

        if now - start <= self.drop_interval_ms as u64 {
            return false;
        }

        self.drop_start_ms = Some(now);
        self.shift(0, 1);
        true
    }

    /// Running <-> Paused. Does nothing before start or after game over.
    pub fn toggle_pause(&mut self) -> bool {
        match self.status {
            GameStatus::Running => {
                self.status = GameStatus::Paused;
                info!("paused");
                true
            }
            GameStatus::Paused => {
                self.status = GameStatus::Running;
                self.drop_start_ms = None;
                info!("resumed");
                true
            }
            GameStatus::NotStarted | GameStatus::GameOver => false,
        }
    }

    /// Apply a command; returns whether it changed anything
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_piece(-1, 0),
            Command::MoveRight => self.move_piece(1, 0),
            Command::SoftDrop => self.move_piece(0, 1),
            Command::Rotate => self.rotate(),
            Command::HardDrop => {
                if self.status != GameStatus::Running || self.active.is_none() {
                    return false;
                }
                self.hard_drop();
                true
            }
            Command::Pause => self.toggle_pause(),
            Command::Reset => {
                self.reset();
                true
            }
            Command::Start => self.start(),
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.next = Some(NextSnapshot::from(self.next));
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.drop_interval_ms = self.drop_interval_ms;
        out.status = self.status;
        out.paused = self.is_paused();
        out.game_over = self.is_game_over();
        out.seed = self.queue.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(Rules::default(), 1)
    }
}
