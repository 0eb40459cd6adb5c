//! RNG module - seeded piece generation
//!
//! Every piece is drawn uniformly and independently from the seven kinds (no
//! bag). The generator is a seeded [`StdRng`], so one seed always yields one
//! sequence. A queue may also carry a scripted prefix that is served before
//! any random draw, which lets tests and puzzles fix the opening pieces.

use std::collections::VecDeque;

use rand::{rngs::StdRng, SeedableRng};

use crate::pieces::random_kind;
use crate::types::PieceKind;

#[derive(Debug, Clone)]
pub struct PieceQueue {
    rng: StdRng,
    seed: u64,
    scripted: VecDeque<PieceKind>,
}

impl PieceQueue {
    /// Create a random queue with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            scripted: VecDeque::new(),
        }
    }

    /// Serve `kinds` in order, then fall back to seeded random draws
    pub fn scripted(seed: u64, kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        let mut queue = Self::new(seed);
        queue.scripted.extend(kinds);
        queue
    }

    /// Draw the next piece kind
    pub fn draw(&mut self) -> PieceKind {
        match self.scripted.pop_front() {
            Some(kind) => kind,
            None => random_kind(&mut self.rng),
        }
    }

    /// Scripted kinds not yet drawn
    pub fn remaining_scripted(&self) -> usize {
        self.scripted.len()
    }

    /// Seed the queue was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}
