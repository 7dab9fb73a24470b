//! Storage-facing character records.
//!
//! A [`CharacterRecord`] mirrors one character definition as stored (for
//! example one JSON file per character). It is untrusted until
//! [`CharacterRecord::validate`] turns it into a [`Character`].

use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::team::TeamId;

use super::{Character, SpecialAbility};

/// Highest catching skill accepted.
pub const MAX_CATCHING: f64 = 10.0;

/// Raw character definition as supplied by a roster provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    /// Display name.
    pub name: String,
    /// Team name the character plays for.
    pub team: String,
    /// Stamina, must be positive.
    pub stamina: f64,
    /// Height, must be positive.
    pub height: f64,
    /// Personal optimism; also seeds the team's optimism when the team is first seen.
    pub optimism: f64,
    /// Catching skill on a 0-10 scale.
    pub catching: f64,
    /// Optional ability name (`Optimist`, `Joker`, `Rage`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_ability: Option<String>,
}

impl CharacterRecord {
    /// Checks the record against the character invariants and builds a
    /// [`Character`].
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] describing the first violated invariant.
    pub fn validate(&self) -> Result<Character, RecordError> {
        if self.name.trim().is_empty() {
            return Err(RecordError::EmptyName);
        }
        for (field, value) in [("stamina", self.stamina), ("height", self.height)] {
            if value.is_nan() || value <= 0.0 {
                return Err(RecordError::NonPositive { field, value });
            }
        }
        if !(0.0..=MAX_CATCHING).contains(&self.catching) {
            return Err(RecordError::CatchingOutOfRange {
                value: self.catching,
            });
        }
        let ability = match self.special_ability.as_deref() {
            None => SpecialAbility::None,
            Some(name) => name.parse()?,
        };

        Ok(Character {
            name: self.name.clone(),
            team: TeamId::new(self.team.clone()),
            stamina: self.stamina,
            height: self.height,
            optimism: self.optimism,
            catching: self.catching,
            ability,
        })
    }

    /// Validates the record and additionally requires it to belong to `team`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::TeamMismatch`] if the record names another team,
    /// or any error from [`validate`](Self::validate).
    pub fn validate_for(&self, team: &TeamId) -> Result<Character, RecordError> {
        if self.team != team.as_str() {
            return Err(RecordError::TeamMismatch {
                expected: team.clone(),
                found: TeamId::new(self.team.clone()),
            });
        }
        self.validate()
    }
}
