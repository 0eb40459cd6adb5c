//! Read-only view of a session for renderers and tooling.
//!
//! A snapshot owns plain data only, so front ends never borrow the session
//! while drawing. It serializes to JSON for debugging dumps.

use serde::Serialize;

use crate::game_state::Tetromino;
use crate::pieces::Shape;
use crate::types::{GameStatus, PieceKind, BOARD_COLS, BOARD_ROWS, INITIAL_DROP_MS, INITIAL_LEVEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub color: u8,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            color: value.kind.color_index(),
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NextSnapshot {
    pub kind: PieceKind,
    pub color: u8,
    pub shape: Shape,
}

impl From<Tetromino> for NextSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            color: value.kind.color_index(),
            shape: value.shape,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major grid: 0 = empty, `color_index + 1` = locked
    pub board: Vec<u8>,
    pub active: Option<ActiveSnapshot>,
    pub next: Option<NextSnapshot>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
    pub status: GameStatus,
    pub paused: bool,
    pub game_over: bool,
    pub seed: u64,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: BOARD_COLS,
            height: BOARD_ROWS,
            board: vec![0; BOARD_COLS as usize * BOARD_ROWS as usize],
            active: None,
            next: None,
            score: 0,
            level: INITIAL_LEVEL,
            lines: 0,
            drop_interval_ms: INITIAL_DROP_MS,
            status: GameStatus::NotStarted,
            paused: false,
            game_over: false,
            seed: 0,
        }
    }
}

impl GameSnapshot {
    /// Grid value at `(x, y)`, 0 when empty or out of range
    pub fn cell(&self, x: usize, y: usize) -> u8 {
        if x >= self.width as usize || y >= self.height as usize {
            return 0;
        }
        self.board[y * self.width as usize + x]
    }

    /// Whether commands currently affect the session
    pub fn playable(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
