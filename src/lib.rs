//! Blocktris (workspace facade crate).
//!
//! Re-exports the member crates under short names so the binary, the
//! integration tests and the benches share one import path:
//! `blocktris::{core, input, term, types}`. The runner's environment
//! configuration lives in [`config`].

pub mod config;

pub use blocktris_core as core;
pub use blocktris_input as input;
pub use blocktris_term as term;
pub use blocktris_types as types;
