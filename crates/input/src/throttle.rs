//! Repeat throttle for held keys.
//!
//! Terminals deliver auto-repeat as a stream of key presses. Movement (left,
//! right and soft drop share one gate), rotation and hard drop each accept at
//! most one command per interval; pause, reset and start are never throttled.

use crate::types::{Command, INPUT_REPEAT_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gate {
    Move,
    Rotate,
    Drop,
}

impl Gate {
    fn of(command: Command) -> Option<Self> {
        match command {
            Command::MoveLeft | Command::MoveRight | Command::SoftDrop => Some(Gate::Move),
            Command::Rotate => Some(Gate::Rotate),
            Command::HardDrop => Some(Gate::Drop),
            Command::Pause | Command::Reset | Command::Start => None,
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone)]
pub struct RepeatThrottle {
    interval_ms: u64,
    last_ms: [Option<u64>; 3],
}

impl RepeatThrottle {
    pub fn new() -> Self {
        Self::with_interval(INPUT_REPEAT_MS)
    }

    pub fn with_interval(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_ms: [None; 3],
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Whether `command` may pass at `now_ms`. A passing command restarts its
    /// gate's interval.
    pub fn allow(&mut self, command: Command, now_ms: u64) -> bool {
        let Some(gate) = Gate::of(command) else {
            return true;
        };

        let slot = &mut self.last_ms[gate.slot()];
        match *slot {
            Some(last) if now_ms.saturating_sub(last) < self.interval_ms => false,
            _ => {
                *slot = Some(now_ms);
                true
            }
        }
    }

    /// Forget all history, e.g. after a reset
    pub fn clear(&mut self) {
        self.last_ms = [None; 3];
    }
}

impl Default for RepeatThrottle {
    fn default() -> Self {
        Self::new()
    }
}
