//! Core types module - shared data structures and default rule constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! Everything here is plain data: the engine in `blocktris-core` turns the
//! constants into a `Rules` value that tests and front ends may override.
//!
//! # Board Dimensions
//!
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Rows**: 20 (indexed 0-19, top to bottom)
//! - **Spawn position**: `x = COLS / 2 - size / 2`, `y = 0`
//!
//! # Speed Curve
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 1000ms |
//! | 2 | 900ms |
//! | 5 | 600ms |
//! | 10+ | 100ms (floor) |
//!
//! # Examples
//!
//! ```
//! use blocktris_types::{Command, PieceKind, BOARD_COLS, BOARD_ROWS};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(PieceKind::T.color_index(), 5);
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//! assert_eq!((BOARD_COLS, BOARD_ROWS), (10, 20));
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_COLS: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_ROWS: u8 = 20;

/// Level a fresh session starts at
pub const INITIAL_LEVEL: u32 = 1;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Gravity interval at the initial level (1000ms = 1 row per second)
pub const INITIAL_DROP_MS: u32 = 1000;

/// Gravity speed-up per level
pub const DROP_DECREMENT_MS: u32 = 100;

/// Fastest gravity interval
pub const MIN_DROP_MS: u32 = 100;

/// Line clear points indexed by rows cleared, multiplied by the level.
///
/// - 1 line: 100
/// - 2 lines: 300
/// - 3 lines: 500
/// - 4 lines: 800
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Points per row for a manual soft drop (not level-scaled)
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per row for a hard drop (not level-scaled)
pub const HARD_DROP_POINTS: u32 = 2;

/// Horizontal offsets tried, in order, when a rotation collides
pub const WALL_KICKS: [i8; 4] = [1, -1, 2, -2];

/// Frame pump interval used by the terminal driver (~60 FPS)
pub const FRAME_MS: u64 = 16;

/// Minimum spacing between repeated commands of one kind, in milliseconds
pub const INPUT_REPEAT_MS: u64 = 100;

/// The seven tetromino piece kinds
///
/// Declaration order is the palette order, so [`PieceKind::color_index`] is
/// stable:
/// - **I**: cyan
/// - **J**: blue
/// - **L**: orange
/// - **O**: yellow
/// - **S**: green
/// - **T**: purple
/// - **Z**: red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in palette order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Palette index (0-6)
    pub fn color_index(self) -> u8 {
        match self {
            PieceKind::I => 0,
            PieceKind::J => 1,
            PieceKind::L => 2,
            PieceKind::O => 3,
            PieceKind::S => 4,
            PieceKind::T => 5,
            PieceKind::Z => 6,
        }
    }

    /// Inverse of [`PieceKind::color_index`]
    ///
    /// ```
    /// use blocktris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_color_index(3), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_color_index(7), None);
    /// ```
    pub fn from_color_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Uppercase letter, as shown in the side panel
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// A cell on the game board
///
/// - `None`: empty
/// - `Some(PieceKind)`: locked block of that kind's color
pub type Cell = Option<PieceKind>;

/// Lifecycle of one play session
///
/// `NotStarted -> Running <-> Paused`, and `Running -> GameOver`. Nothing
/// moves while paused, so a paused session cannot end.
/// `GameOver` is terminal until the session is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::NotStarted => "not_started",
            GameStatus::Running => "running",
            GameStatus::Paused => "paused",
            GameStatus::GameOver => "game_over",
        }
    }
}

/// Commands a front end forwards to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (scores soft drop points)
    SoftDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Drop piece to its landing row and lock it
    HardDrop,
    /// Toggle pause
    Pause,
    /// Start a fresh session from any state
    Reset,
    /// Begin play when not started (or restart after game over)
    Start,
}

impl Command {
    /// Parse command from string (case-insensitive)
    ///
    /// ```
    /// use blocktris_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("ROTATE"), Some(Command::Rotate));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "rotate" => Some(Command::Rotate),
            "harddrop" => Some(Command::HardDrop),
            "pause" => Some(Command::Pause),
            "reset" => Some(Command::Reset),
            "start" => Some(Command::Start),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::Rotate => "rotate",
            Command::HardDrop => "hardDrop",
            Command::Pause => "pause",
            Command::Reset => "reset",
            Command::Start => "start",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rule_constants() {
        assert_eq!(BOARD_COLS, 10);
        assert_eq!(BOARD_ROWS, 20);
        assert_eq!(LINE_SCORES, [0, 100, 300, 500, 800]);
        assert_eq!(SOFT_DROP_POINTS, 1);
        assert_eq!(HARD_DROP_POINTS, 2);
        assert_eq!(INITIAL_DROP_MS, 1000);
        assert_eq!(MIN_DROP_MS, 100);
        assert_eq!(WALL_KICKS, [1, -1, 2, -2]);
    }

    #[test]
    fn test_color_index_roundtrips_for_every_kind() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.color_index() as usize, i);
            assert_eq!(PieceKind::from_color_index(i as u8), Some(*kind));
        }
    }

    #[test]
    fn test_command_names_parse_back() {
        for cmd in [
            Command::MoveLeft,
            Command::MoveRight,
            Command::SoftDrop,
            Command::Rotate,
            Command::HardDrop,
            Command::Pause,
            Command::Reset,
            Command::Start,
        ] {
            assert_eq!(Command::from_str(cmd.as_str()), Some(cmd));
        }
    }
}
