//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`] and throttles
//! auto-repeat so a held key moves the piece at a steady rate, including in
//! terminals without key-release events.

pub mod map;
pub mod throttle;

pub use blocktris_types as types;

pub use map::{handle_key_event, should_quit};
pub use throttle::RepeatThrottle;
