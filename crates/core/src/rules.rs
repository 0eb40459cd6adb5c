//! Rules module - the tunable constants of a session
//!
//! Defaults come from `blocktris-types`; any field may be overridden from a
//! JSON document, missing fields falling back to the default.
//!
//! ```
//! use blocktris_core::Rules;
//!
//! let rules = Rules::from_json_str(r#"{ "cols": 8, "initial_drop_ms": 500 }"#).unwrap();
//! assert_eq!(rules.cols, 8);
//! assert_eq!(rules.rows, 20);
//! assert_eq!(rules.initial_drop_ms, 500);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RulesError;
use crate::pieces::MAX_SHAPE_SIZE;
use crate::types::{
    BOARD_COLS, BOARD_ROWS, DROP_DECREMENT_MS, HARD_DROP_POINTS, INITIAL_DROP_MS, INITIAL_LEVEL,
    LINES_PER_LEVEL, LINE_SCORES, MIN_DROP_MS, SOFT_DROP_POINTS, WALL_KICKS,
};

/// Largest board dimension accepted; keeps every coordinate inside `i8`.
pub const MAX_BOARD_DIM: u8 = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rules {
    pub cols: u8,
    pub rows: u8,
    pub initial_level: u32,
    pub lines_per_level: u32,
    pub initial_drop_ms: u32,
    pub drop_decrement_ms: u32,
    pub min_drop_ms: u32,
    /// Points for clearing 0..=4 rows at once, before the level multiplier
    pub line_scores: [u32; 5],
    pub soft_drop_points: u32,
    pub hard_drop_points: u32,
    /// Horizontal offsets tried in order after a plain rotation collides
    pub wall_kicks: [i8; 4],
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            cols: BOARD_COLS,
            rows: BOARD_ROWS,
            initial_level: INITIAL_LEVEL,
            lines_per_level: LINES_PER_LEVEL,
            initial_drop_ms: INITIAL_DROP_MS,
            drop_decrement_ms: DROP_DECREMENT_MS,
            min_drop_ms: MIN_DROP_MS,
            line_scores: LINE_SCORES,
            soft_drop_points: SOFT_DROP_POINTS,
            hard_drop_points: HARD_DROP_POINTS,
            wall_kicks: WALL_KICKS,
        }
    }
}

impl Rules {
    /// Parse and validate a JSON rules document
    pub fn from_json_str(json: &str) -> Result<Self, RulesError> {
        let rules: Rules = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Read, parse and validate a JSON rules file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RulesError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RulesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), RulesError> {
        if self.cols < MAX_SHAPE_SIZE as u8 || self.rows < MAX_SHAPE_SIZE as u8 {
            return Err(RulesError::Invalid("board must be at least 4x4"));
        }
        if self.cols > MAX_BOARD_DIM || self.rows > MAX_BOARD_DIM {
            return Err(RulesError::Invalid("board must be at most 64x64"));
        }
        if self.lines_per_level == 0 {
            return Err(RulesError::Invalid("lines_per_level must be positive"));
        }
        if self.min_drop_ms == 0 {
            return Err(RulesError::Invalid("min_drop_ms must be positive"));
        }
        if self.initial_drop_ms < self.min_drop_ms {
            return Err(RulesError::Invalid(
                "initial_drop_ms must not be below min_drop_ms",
            ));
        }
        if self.initial_level == 0 {
            return Err(RulesError::Invalid("initial_level must be at least 1"));
        }
        Ok(())
    }

    /// Nearest playable rules: each field [`validate`](Self::validate) would
    /// reject is pulled into range.
    pub fn sanitized(mut self) -> Self {
        let min_dim = MAX_SHAPE_SIZE as u8;
        self.cols = self.cols.clamp(min_dim, MAX_BOARD_DIM);
        self.rows = self.rows.clamp(min_dim, MAX_BOARD_DIM);
        self.lines_per_level = self.lines_per_level.max(1);
        self.min_drop_ms = self.min_drop_ms.max(1);
        self.initial_drop_ms = self.initial_drop_ms.max(self.min_drop_ms);
        self.initial_level = self.initial_level.max(1);
        self
    }
}
