//! Team identity and team-level morale.
//!
//! Characters refer to their team by [`TeamId`]; a [`Team`] holds no
//! back-collection of its members. Team rosters are computed by filtering
//! (see [`Roster::team_members`](crate::roster::Roster::team_members)).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique team identifier, e.g. `"Red"` or `"Blue"`.
///
/// # Example
///
/// ```
/// use prehazovana_core::team::TeamId;
///
/// let red = TeamId::new("Red");
/// assert_eq!(red.as_str(), "Red");
/// assert_eq!(red.to_string(), "Red");
/// ```
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(String);

impl TeamId {
    /// Creates a team identifier from any string-like value.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TeamId({})", self.0)
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TeamId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TeamId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Team-level state shared by every character on the team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Team identifier.
    pub name: TeamId,
    /// Morale multiplier, amplified by opposing Optimist triggers.
    pub optimism: f64,
}

impl Team {
    /// Creates a team with the given starting optimism.
    #[must_use]
    pub fn new(name: TeamId, optimism: f64) -> Self {
        Self { name, optimism }
    }
}

/// One [`Team`] per distinct team name, iterated in name order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamRegistry {
    teams: BTreeMap<TeamId, Team>,
}

impl TeamRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` with `optimism` unless it is already known.
    ///
    /// Returns `true` if a new team was created. An existing team keeps its
    /// current optimism.
    pub fn register(&mut self, name: &TeamId, optimism: f64) -> bool {
        if self.teams.contains_key(name) {
            return false;
        }
        self.teams
            .insert(name.clone(), Team::new(name.clone(), optimism));
        true
    }

    /// Looks up a team.
    #[must_use]
    pub fn get(&self, name: &TeamId) -> Option<&Team> {
        self.teams.get(name)
    }

    /// Looks up a team mutably.
    pub fn get_mut(&mut self, name: &TeamId) -> Option<&mut Team> {
        self.teams.get_mut(name)
    }

    /// Returns a team's optimism, if the team is registered.
    #[must_use]
    pub fn optimism(&self, name: &TeamId) -> Option<f64> {
        self.teams.get(name).map(|team| team.optimism)
    }

    /// Returns true if the team is registered.
    #[must_use]
    pub fn contains(&self, name: &TeamId) -> bool {
        self.teams.contains_key(name)
    }

    /// Number of registered teams.
    #[must_use]
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    /// Returns true if no team is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Iterates teams in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Team> {
        self.teams.values()
    }
}
