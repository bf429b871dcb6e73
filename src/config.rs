//! Runtime configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::types::FRAME_MS;

/// Host configuration for the terminal binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Piece sequence seed; None draws one from OS entropy
    pub seed: Option<u64>,
    /// Destination of tracing output; None disables logging
    pub log_path: Option<PathBuf>,
    /// JSON-lines observation log written on every lock
    pub state_log: Option<PathBuf>,
    /// Render and input poll period
    pub frame_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            log_path: None,
            state_log: None,
            frame_ms: FRAME_MS,
        }
    }
}

impl AppConfig {
    /// Read `BLOCKFALL_SEED`, `BLOCKFALL_LOG_PATH`, `BLOCKFALL_STATE_LOG` and
    /// `BLOCKFALL_FRAME_MS`. Unparseable values fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("BLOCKFALL_SEED").and_then(|s| s.trim().parse().ok());

        let frame_ms = lookup("BLOCKFALL_FRAME_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(FRAME_MS);

        Self {
            seed,
            log_path: non_empty_path(lookup("BLOCKFALL_LOG_PATH")),
            state_log: non_empty_path(lookup("BLOCKFALL_STATE_LOG")),
            frame_ms,
        }
    }
}

fn non_empty_path(value: Option<String>) -> Option<PathBuf> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}
