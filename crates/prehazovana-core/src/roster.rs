//! Roster loading and team membership.
//!
//! Character definitions come from an external [`RosterProvider`]. The core
//! validates each record, registers teams as they are discovered, and only
//! accepts a roster in which every team contributes exactly
//! [`TEAM_SIZE`] valid characters.
//!
//! # Example
//!
//! ```
//! use prehazovana_core::character::CharacterRecord;
//! use prehazovana_core::roster::{InMemoryRosterProvider, Roster};
//! use prehazovana_core::team::TeamId;
//!
//! let record = |name: &str, team: &str| CharacterRecord {
//!     name: name.to_string(),
//!     team: team.to_string(),
//!     stamina: 10.0,
//!     height: 1.8,
//!     optimism: 5.0,
//!     catching: 5.0,
//!     special_ability: None,
//! };
//!
//! let provider = InMemoryRosterProvider::from_records([
//!     record("Alice", "Red"),
//!     record("Bob", "Red"),
//!     record("Cara", "Blue"),
//!     record("Dana", "Blue"),
//! ]);
//!
//! let teams = [TeamId::new("Red"), TeamId::new("Blue")];
//! let (roster, registry) = Roster::load(&provider, &teams).unwrap();
//! assert_eq!(roster.len(), 4);
//! assert_eq!(registry.len(), 2);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::character::{Character, CharacterRecord};
use crate::error::RosterError;
use crate::team::{TeamId, TeamRegistry};

/// Number of characters every team must field.
pub const TEAM_SIZE: usize = 2;

/// Source of character records, grouped by team.
///
/// Implementations own the storage layout. A team with no stored records
/// should map to an empty list rather than an error; the roster size check
/// reports it.
pub trait RosterProvider {
    /// Returns the stored records for each requested team.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Io`] if the backing storage cannot be read.
    fn load_roster(
        &self,
        team_ids: &[TeamId],
    ) -> Result<BTreeMap<TeamId, Vec<CharacterRecord>>, RosterError>;
}

/// Provider backed by records held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRosterProvider {
    records: BTreeMap<TeamId, Vec<CharacterRecord>>,
}

impl InMemoryRosterProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups records by the team named in each record.
    pub fn from_records(records: impl IntoIterator<Item = CharacterRecord>) -> Self {
        let mut provider = Self::new();
        for record in records {
            provider.push(record);
        }
        provider
    }

    /// Adds a record under the team it names.
    pub fn push(&mut self, record: CharacterRecord) {
        self.records
            .entry(TeamId::new(record.team.clone()))
            .or_default()
            .push(record);
    }

    /// Stores `records` under `team` regardless of the team each record names.
    pub fn insert_team(&mut self, team: TeamId, records: Vec<CharacterRecord>) {
        self.records.insert(team, records);
    }
}

impl RosterProvider for InMemoryRosterProvider {
    fn load_roster(
        &self,
        team_ids: &[TeamId],
    ) -> Result<BTreeMap<TeamId, Vec<CharacterRecord>>, RosterError> {
        Ok(team_ids
            .iter()
            .map(|team| (team.clone(), self.records.get(team).cloned().unwrap_or_default()))
            .collect())
    }
}

/// The characters eligible for a match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    characters: Vec<Character>,
}

impl Roster {
    /// Builds a roster from characters without checking team sizes.
    #[must_use]
    pub fn from_characters(characters: Vec<Character>) -> Self {
        Self { characters }
    }

    /// Loads and validates a roster for `team_ids`.
    ///
    /// Invalid records are skipped with a warning. Teams are registered the
    /// first time one of their characters is accepted, seeded with that
    /// character's optimism.
    ///
    /// # Errors
    ///
    /// - [`RosterError::WrongSize`] if a team does not have exactly
    ///   [`TEAM_SIZE`] valid records
    /// - any error returned by the provider
    pub fn load<P: RosterProvider + ?Sized>(
        provider: &P,
        team_ids: &[TeamId],
    ) -> Result<(Self, TeamRegistry), RosterError> {
        let mut stored = provider.load_roster(team_ids)?;
        let mut characters = Vec::with_capacity(team_ids.len() * TEAM_SIZE);
        let mut teams = TeamRegistry::new();

        for team in team_ids {
            let records = stored.remove(team).unwrap_or_default();
            let mut accepted = Vec::with_capacity(TEAM_SIZE);

            for record in &records {
                match record.validate_for(team) {
                    Ok(character) => {
                        if teams.register(&character.team, character.optimism) {
                            debug!(
                                team = %character.team,
                                optimism = character.optimism,
                                "registered team"
                            );
                        }
                        accepted.push(character);
                    }
                    Err(error) => {
                        warn!(
                            %team,
                            name = %record.name,
                            %error,
                            "skipping invalid character record"
                        );
                    }
                }
            }

            if accepted.len() != TEAM_SIZE {
                return Err(RosterError::WrongSize {
                    team: team.clone(),
                    found: accepted.len(),
                    expected: TEAM_SIZE,
                });
            }

            info!(%team, characters = accepted.len(), "team loaded");
            characters.extend(accepted);
        }

        Ok((Self { characters }, teams))
    }

    /// Indices of the characters playing for `team`, in roster order.
    #[must_use]
    pub fn team_members(&self, team: &TeamId) -> Vec<usize> {
        self.characters
            .iter()
            .enumerate()
            .filter(|(_, c)| &c.team == team)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Number of characters playing for `team`.
    #[must_use]
    pub fn team_size(&self, team: &TeamId) -> usize {
        self.characters.iter().filter(|c| &c.team == team).count()
    }

    /// Returns the character at `idx`.
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&Character> {
        self.characters.get(idx)
    }

    /// Finds a character by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.name == name)
    }

    /// Borrows `actor` mutably and `other` immutably.
    ///
    /// Returns `None` if the indices are equal or out of range.
    pub fn pair_mut(&mut self, actor: usize, other: usize) -> Option<(&mut Character, &Character)> {
        if actor == other || actor >= self.characters.len() || other >= self.characters.len() {
            return None;
        }
        if actor < other {
            let (head, tail) = self.characters.split_at_mut(other);
            Some((&mut head[actor], &tail[0]))
        } else {
            let (head, tail) = self.characters.split_at_mut(actor);
            Some((&mut tail[0], &head[other]))
        }
    }

    /// Iterates characters in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }

    /// Number of characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Returns true if the roster has no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Removes every character of `team`, returning how many were removed.
    #[cfg(test)]
    pub(crate) fn clear_team(&mut self, team: &TeamId) -> usize {
        let before = self.characters.len();
        self.characters.retain(|c| &c.team != team);
        before - self.characters.len()
    }
}
