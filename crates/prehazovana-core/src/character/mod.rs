//! Player characters.
//!
//! This module provides:
//! - [`Character`]: a player's stats, team and special ability
//! - [`SpecialAbility`]: the closed set of abilities a character may carry
//! - [`CharacterRecord`]: the untrusted storage form of a character
//!
//! # Example
//!
//! ```
//! use prehazovana_core::character::{Character, SpecialAbility};
//! use prehazovana_core::team::TeamId;
//!
//! let red = TeamId::new("Red");
//! let alice = Character::new("Alice", red, 10.0, 1.0, 5.0, 5.0, SpecialAbility::None);
//! assert!((alice.dunk_chance() - 0.95).abs() < 1e-12);
//! assert!((alice.catch_probability() - 0.5).abs() < 1e-12);
//! ```

mod record;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ability::{AbilityEffect, AbilityResolver};
use crate::error::RecordError;
use crate::rng::RandomSource;
use crate::team::{TeamId, TeamRegistry};

pub use record::{CharacterRecord, MAX_CATCHING};

/// Base dunk chance before the height bonus.
pub const BASE_DUNK_CHANCE: f64 = 0.9;

/// Dunk chance gained per unit of height.
pub const DUNK_CHANCE_PER_HEIGHT: f64 = 0.05;

/// Catch probability gained per point of catching skill.
pub const CATCH_CHANCE_PER_POINT: f64 = 0.1;

/// Special ability carried by a character.
///
/// Parsing is case-insensitive; `"none"` and the empty string map to
/// [`SpecialAbility::None`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialAbility {
    /// No ability.
    #[default]
    None,
    /// Resets own optimism to a fixed high value and boosts the opposing team's morale.
    Optimist,
    /// Randomly triggers; has no stat effect.
    Joker,
    /// Grows stamina and height when the own team is less optimistic than the opponent's.
    Rage,
}

impl SpecialAbility {
    /// Canonical name of the ability.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Optimist => "Optimist",
            Self::Joker => "Joker",
            Self::Rage => "Rage",
        }
    }
}

impl fmt::Display for SpecialAbility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpecialAbility {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "optimist" => Ok(Self::Optimist),
            "joker" => Ok(Self::Joker),
            "rage" => Ok(Self::Rage),
            _ => Err(RecordError::UnknownAbility { name: s.to_string() }),
        }
    }
}

/// A single player.
///
/// Characters are created once at roster-load time and mutated in place by
/// ability resolution. The team is referenced by name only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Display name, non-empty.
    pub name: String,
    /// Team the character plays for.
    pub team: TeamId,
    /// Stamina, always positive.
    pub stamina: f64,
    /// Height, always positive.
    pub height: f64,
    /// Personal optimism.
    pub optimism: f64,
    /// Catching skill, 0-10.
    pub catching: f64,
    /// Special ability.
    pub ability: SpecialAbility,
}

impl Character {
    /// Creates a character without validation.
    ///
    /// Use [`CharacterRecord::validate`] for untrusted input.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        team: TeamId,
        stamina: f64,
        height: f64,
        optimism: f64,
        catching: f64,
        ability: SpecialAbility,
    ) -> Self {
        Self {
            name: name.into(),
            team,
            stamina,
            height,
            optimism,
            catching,
            ability,
        }
    }

    /// Chance of a successful dunk, `min(0.9 + height * 0.05, 1.0)`.
    ///
    /// Not used by throw resolution.
    #[must_use]
    pub fn dunk_chance(&self) -> f64 {
        (BASE_DUNK_CHANCE + self.height * DUNK_CHANCE_PER_HEIGHT).min(1.0)
    }

    /// Probability that this character's opponents recover one of its missed throws.
    #[must_use]
    pub fn catch_probability(&self) -> f64 {
        self.catching * CATCH_CHANCE_PER_POINT
    }

    /// Applies this character's special ability against `other`.
    ///
    /// See [`AbilityResolver`] for the per-ability effects.
    pub fn apply_special_ability<R: RandomSource + ?Sized>(
        &mut self,
        other: &Character,
        teams: &mut TeamRegistry,
        rng: &mut R,
    ) -> AbilityEffect {
        AbilityResolver::new().resolve(self, other, teams, rng)
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - Team: {}", self.name, self.team)
    }
}
