//! Match configuration.
//!
//! [`MatchConfig`] carries everything that shapes a match besides the roster:
//! which two teams play, the RNG seed, and when the match ends.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::team::TeamId;

/// Environment variable holding the RNG seed.
pub const ENV_SEED: &str = "PREHAZOVANA_SEED";
/// Environment variable holding the winning score.
pub const ENV_TARGET_SCORE: &str = "PREHAZOVANA_TARGET_SCORE";
/// Environment variable holding the round limit.
pub const ENV_MAX_ROUNDS: &str = "PREHAZOVANA_MAX_ROUNDS";
/// Environment variable toggling ability triggers.
pub const ENV_ABILITIES: &str = "PREHAZOVANA_ABILITIES";
/// Environment variable naming the two teams, comma separated.
pub const ENV_TEAMS: &str = "PREHAZOVANA_TEAMS";

/// Settings for a single match.
///
/// With neither `target_score` nor `max_rounds` set, the match runs until
/// its [`StopSignal`](crate::simulation::StopSignal) is raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// The two competing teams; the first is listed first on the scoreboard.
    pub teams: [TeamId; 2],
    /// RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// First team to reach this score wins.
    pub target_score: Option<u32>,
    /// Match ends after this many rounds.
    pub max_rounds: Option<u64>,
    /// Whether the attacker's special ability is applied each round.
    pub trigger_abilities: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            teams: [TeamId::new("Red"), TeamId::new("Blue")],
            seed: None,
            target_score: None,
            max_rounds: None,
            trigger_abilities: true,
        }
    }
}

impl MatchConfig {
    /// Default configuration overlaid with environment variables.
    ///
    /// Environment variables:
    /// - `PREHAZOVANA_SEED` - RNG seed (default: entropy)
    /// - `PREHAZOVANA_TARGET_SCORE` - winning score (default: none)
    /// - `PREHAZOVANA_MAX_ROUNDS` - round limit (default: none)
    /// - `PREHAZOVANA_ABILITIES` - apply special abilities (default: true)
    /// - `PREHAZOVANA_TEAMS` - two team names, e.g. `Red,Blue`
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    /// Applies overrides looked up by `lookup`; unparsable values are ignored
    /// with a warning.
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = read_var(&lookup, ENV_SEED) {
            self.seed = Some(seed);
        }
        if let Some(target) = read_var::<u32, _>(&lookup, ENV_TARGET_SCORE) {
            self.target_score = (target > 0).then_some(target);
        }
        if let Some(rounds) = read_var::<u64, _>(&lookup, ENV_MAX_ROUNDS) {
            self.max_rounds = (rounds > 0).then_some(rounds);
        }
        if let Some(enabled) = read_var(&lookup, ENV_ABILITIES) {
            self.trigger_abilities = enabled;
        }
        if let Some(raw) = lookup(ENV_TEAMS) {
            match parse_teams(&raw) {
                Some(teams) => self.teams = teams,
                None => warn!(key = ENV_TEAMS, value = %raw, "expected two distinct team names"),
            }
        }
        self
    }

    /// Builder-style seed setter.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder-style winning score setter.
    #[must_use]
    pub fn with_target_score(mut self, target: u32) -> Self {
        self.target_score = Some(target);
        self
    }

    /// Builder-style round limit setter.
    #[must_use]
    pub fn with_max_rounds(mut self, rounds: u64) -> Self {
        self.max_rounds = Some(rounds);
        self
    }

    /// Builder-style ability toggle.
    #[must_use]
    pub fn with_abilities(mut self, enabled: bool) -> Self {
        self.trigger_abilities = enabled;
        self
    }

    /// True if the match ends on its own.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.target_score.is_some() || self.max_rounds.is_some()
    }
}

fn read_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        warn!(key, value = %raw, "ignoring unparsable setting");
    }
    parsed
}

fn parse_teams(raw: &str) -> Option<[TeamId; 2]> {
    let names: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    match names.as_slice() {
        [a, b] if a != b => Some([TeamId::new(*a), TeamId::new(*b)]),
        _ => None,
    }
}
