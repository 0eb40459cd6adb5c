//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the game rules, session state and simulation logic.
//! It has no dependencies on terminals or any other I/O, making it:
//!
//! - **Deterministic**: the same seed (or scripted queue) and the same
//!   command/timestamp sequence always produce the same session
//! - **Testable**: every rule is reachable through the public API
//! - **Portable**: renderers only ever see a [`GameSnapshot`]
//!
//! # Module Structure
//!
//! - [`board`]: flat grid with collision checks, locking and line clearing
//! - [`game_state`]: the session state machine, commands and gravity
//! - [`pieces`]: tetromino matrices, clockwise rotation and wall kicks
//! - [`rng`]: seeded uniform piece generation with an optional scripted prefix
//! - [`rules`]: tunable constants, loadable from JSON
//! - [`scoring`]: line clear points, drop bonuses and the speed curve
//! - [`snapshot`]: read-only copy of a session for rendering
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: each piece is drawn independently
//! - **Clockwise rotation** with horizontal kicks `+1, -1, +2, -2`
//! - **Immediate lock**: a piece locks as soon as a downward move is blocked
//! - **Scoring**: 100/300/500/800 x level for 1-4 lines, 1 point per soft
//!   drop row, 2 points per hard drop row
//! - **Levels**: one level per 10 lines; gravity speeds up by 100ms per
//!   level down to 100ms
//!
//! # Example
//!
//! ```
//! use blocktris_core::{GameSession, Rules};
//! use blocktris_core::types::Command;
//!
//! let mut game = GameSession::new(Rules::default(), 12345);
//! game.start();
//!
//! game.apply(Command::MoveRight);
//! game.apply(Command::Rotate);
//! game.apply(Command::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! Call [`GameSession::tick`](game_state::GameSession::tick) every frame
//! with a monotonic millisecond timestamp. A piece falls one row once more
//! than [`GameSession::drop_interval_ms`](game_state::GameSession::drop_interval_ms)
//! has passed since the last fall.

pub mod board;
pub mod error;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod rules;
pub mod scoring;
pub mod snapshot;

pub use blocktris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use error::{LockError, RulesError};
pub use game_state::{GameSession, Tetromino};
pub use pieces::{rotate_clockwise, shape_of, try_rotate, Shape};
pub use rng::PieceQueue;
pub use rules::Rules;
pub use snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
