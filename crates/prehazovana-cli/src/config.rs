//! Front-end configuration read from the environment.

use std::env;
use std::path::PathBuf;

use prehazovana_core::{MatchConfig, ThrowType};
use tracing::{info, warn};

/// Environment variable naming the roster directory.
pub const ENV_ROSTER_DIR: &str = "PREHAZOVANA_ROSTER_DIR";
/// Environment variable selecting a fixed throw instead of prompting.
pub const ENV_AUTO_THROW: &str = "PREHAZOVANA_AUTO_THROW";

/// Roster directory used when none is configured.
pub const DEFAULT_ROSTER_DIR: &str = "characters";
/// Winning score applied to unattended matches that have no end condition.
pub const AUTO_THROW_TARGET_SCORE: u32 = 21;

/// Settings for the terminal front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Root of the `<root>/<team>/*.json` roster layout.
    pub roster_dir: PathBuf,
    /// Throw used for every round instead of asking on stdin.
    pub auto_throw: Option<ThrowType>,
    /// Match settings passed to the simulator.
    pub game: MatchConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            roster_dir: PathBuf::from(DEFAULT_ROSTER_DIR),
            auto_throw: None,
            game: MatchConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PREHAZOVANA_ROSTER_DIR` - roster directory (default: `characters`)
    /// - `PREHAZOVANA_AUTO_THROW` - `low`, `mid` or `high` (default: prompt)
    /// - plus everything [`MatchConfig::from_env`] reads
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from values returned by `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let roster_dir = lookup(ENV_ROSTER_DIR)
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_ROSTER_DIR), PathBuf::from);

        let auto_throw = lookup(ENV_AUTO_THROW).and_then(|raw| match raw.parse() {
            Ok(throw) => Some(throw),
            Err(error) => {
                warn!(key = ENV_AUTO_THROW, %error, "ignoring unparsable setting");
                None
            }
        });

        let mut game = MatchConfig::default().with_overrides(&lookup);
        if auto_throw.is_some() && !game.is_bounded() {
            // Nobody can type `quit`, so the match needs its own ending
            info!(target_score = AUTO_THROW_TARGET_SCORE, "unattended match without end condition");
            game.target_score = Some(AUTO_THROW_TARGET_SCORE);
        }

        Self {
            roster_dir,
            auto_throw,
            game,
        }
    }
}
