//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: a snapshot is drawn into a plain
//! framebuffer, which is then diffed and flushed to the terminal.
//!
//! - [`fb`]: styled character cells
//! - [`game_view`]: snapshot to framebuffer (pure, testable)
//! - [`renderer`]: framebuffer to escape sequences

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blocktris_core as core;
pub use blocktris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, AnchorY, GameView, Viewport, PALETTE};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
