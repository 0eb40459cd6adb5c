//! Runner configuration read from the environment.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `BLOCKTRIS_SEED` | piece sequence seed (u64) | current time |
//! | `BLOCKTRIS_RULES` | path to a rules JSON file | built-in rules |
//! | `BLOCKTRIS_LOG` | log file path | logging off |
//! | `BLOCKTRIS_LOG_LEVEL` | `error` .. `trace` | `info` |
//!
//! Logs go to a file because the terminal is in raw mode while playing.

use std::fs::File;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use log::LevelFilter;

use crate::core::Rules;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub seed: u64,
    pub rules_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl RunConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = get("BLOCKTRIS_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(time_seed);

        let log_level = get("BLOCKTRIS_LOG_LEVEL")
            .and_then(|s| s.parse().ok())
            .unwrap_or(LevelFilter::Info);

        Self {
            seed,
            rules_path: get("BLOCKTRIS_RULES").map(PathBuf::from),
            log_path: get("BLOCKTRIS_LOG").map(PathBuf::from),
            log_level,
        }
    }

    /// Rules from `rules_path`, or the defaults when unset
    pub fn load_rules(&self) -> Result<Rules> {
        match &self.rules_path {
            Some(path) => Rules::load(path)
                .with_context(|| format!("loading rules from {}", path.display())),
            None => Ok(Rules::default()),
        }
    }

    /// Install `env_logger` writing to `log_path`. Does nothing when unset.
    pub fn init_logging(&self) -> Result<()> {
        let Some(path) = &self.log_path else {
            return Ok(());
        };

        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;

        env_logger::Builder::new()
            .filter_level(self.log_level)
            .target(env_logger::Target::Pipe(Box::new(file)))
            .try_init()
            .context("installing logger")?;
        Ok(())
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}
