//! Court positions and the scoreboard.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::team::TeamId;

/// One of the six positions players rotate through, clockwise.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourtPosition {
    /// Middle back.
    MiddleBack,
    /// Left back.
    LeftBack,
    /// Left front.
    LeftFront,
    /// Middle front.
    MiddleFront,
    /// Right front.
    RightFront,
    /// Right back.
    RightBack,
}

impl CourtPosition {
    /// The rotation cycle, starting at index 0.
    pub const CYCLE: [Self; 6] = [
        Self::MiddleBack,
        Self::LeftBack,
        Self::LeftFront,
        Self::MiddleFront,
        Self::RightFront,
        Self::RightBack,
    ];

    /// Position at `index`, wrapping around the cycle.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::CYCLE[index % Self::CYCLE.len()]
    }

    /// Index that follows `index` in the cycle.
    #[must_use]
    pub const fn next_index(index: usize) -> usize {
        (index + 1) % Self::CYCLE.len()
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MiddleBack => "Middle Back",
            Self::LeftBack => "Left Back",
            Self::LeftFront => "Left Front",
            Self::MiddleFront => "Middle Front",
            Self::RightFront => "Right Front",
            Self::RightBack => "Right Back",
        }
    }
}

impl fmt::Display for CourtPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Points for the two teams of a match, in configuration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    teams: [TeamId; 2],
    points: [u32; 2],
}

impl Scoreboard {
    /// Starts at 0:0.
    #[must_use]
    pub fn new(teams: [TeamId; 2]) -> Self {
        Self {
            teams,
            points: [0, 0],
        }
    }

    /// Adds one point for `team`. Returns the team's new score, or `None`
    /// if the team is not on the scoreboard.
    pub fn award_point(&mut self, team: &TeamId) -> Option<u32> {
        let slot = self.slot(team)?;
        self.points[slot] += 1;
        Some(self.points[slot])
    }

    /// Current score of `team`, 0 for teams not on the scoreboard.
    #[must_use]
    pub fn points(&self, team: &TeamId) -> u32 {
        self.slot(team).map_or(0, |slot| self.points[slot])
    }

    /// Both scores in configuration order.
    #[must_use]
    pub fn pair(&self) -> (u32, u32) {
        (self.points[0], self.points[1])
    }

    /// The two teams in configuration order.
    #[must_use]
    pub fn teams(&self) -> &[TeamId; 2] {
        &self.teams
    }

    /// The team at or above `target`, if any.
    #[must_use]
    pub fn leader_reaching(&self, target: u32) -> Option<&TeamId> {
        self.teams
            .iter()
            .zip(self.points)
            .find(|(_, points)| *points >= target)
            .map(|(team, _)| team)
    }

    fn slot(&self, team: &TeamId) -> Option<usize> {
        self.teams.iter().position(|t| t == team)
    }
}

impl fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} for Team {}:Team {}",
            self.points[0], self.points[1], self.teams[0], self.teams[1]
        )
    }
}
