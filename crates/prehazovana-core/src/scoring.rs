//! Throw resolution.
//!
//! The [`ScoringEngine`] turns a throw-type selection and the attacker's
//! stats into a [`ThrowOutcome`]:
//!
//! 1. Draw `r1`. If `r1 <= hit_probability(throw)` the throw scores.
//! 2. Otherwise draw `r2`. If `r2 <= catching * 0.1` the defenders catch the
//!    ball. Otherwise it is a plain miss.
//!
//! Neither non-scoring branch changes the score. The catch branch is
//! informational only.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::error::InvalidSelectionError;
use crate::rng::RandomSource;

/// Hit probability of a low throw.
pub const LOW_HIT_CHANCE: f64 = 0.3;
/// Hit probability of a mid throw.
pub const MID_HIT_CHANCE: f64 = 0.6;
/// Hit probability of a high throw.
pub const HIGH_HIT_CHANCE: f64 = 0.9;

/// Throw type chosen for the attacker.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThrowType {
    /// Safe but rarely scores.
    Low,
    /// Balanced.
    Mid,
    /// Most likely to score.
    High,
}

impl ThrowType {
    /// All throw types in ascending hit probability.
    pub const ALL: [Self; 3] = [Self::Low, Self::Mid, Self::High];

    /// Fixed hit probability for this throw type.
    #[must_use]
    pub const fn hit_probability(self) -> f64 {
        match self {
            Self::Low => LOW_HIT_CHANCE,
            Self::Mid => MID_HIT_CHANCE,
            Self::High => HIGH_HIT_CHANCE,
        }
    }

    /// Lowercase name as shown to players.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Mid => "mid",
            Self::High => "high",
        }
    }
}

impl fmt::Display for ThrowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThrowType {
    type Err = InvalidSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "mid" => Ok(Self::Mid),
            "high" => Ok(Self::High),
            _ => Err(InvalidSelectionError::new(s.trim())),
        }
    }
}

/// Result of a single throw.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThrowOutcome {
    /// The attacker's team scores a point.
    Scored,
    /// Missed, and the defending team caught the ball. No score change.
    Caught,
    /// Missed outright. No score change.
    Missed,
}

impl ThrowOutcome {
    /// True only for [`ThrowOutcome::Scored`].
    #[must_use]
    pub const fn is_score(self) -> bool {
        matches!(self, Self::Scored)
    }
}

/// Resolves throws against the fixed hit table.
///
/// # Example
///
/// ```
/// use prehazovana_core::character::{Character, SpecialAbility};
/// use prehazovana_core::rng::SeededRandom;
/// use prehazovana_core::scoring::{ScoringEngine, ThrowType};
/// use prehazovana_core::team::TeamId;
///
/// let red = TeamId::new("Red");
/// let alice = Character::new("Alice", red, 10.0, 1.0, 5.0, 5.0, SpecialAbility::None);
/// let mut rng = SeededRandom::new(42);
///
/// let outcome = ScoringEngine::new().resolve_throw(&alice, ThrowType::High, &mut rng);
/// println!("{outcome:?}");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    /// Creates a scoring engine.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Resolves one throw by `character`.
    ///
    /// Uses one draw on a hit and two draws on a miss.
    pub fn resolve_throw<R: RandomSource + ?Sized>(
        &self,
        character: &Character,
        throw: ThrowType,
        rng: &mut R,
    ) -> ThrowOutcome {
        if rng.chance(throw.hit_probability()) {
            return ThrowOutcome::Scored;
        }
        if rng.chance(character.catch_probability()) {
            ThrowOutcome::Caught
        } else {
            ThrowOutcome::Missed
        }
    }
}
