//! Error types raised by roster loading, throw selection and the match loop.
//!
//! Errors are split by recoverability:
//! - [`RosterError`] and [`EmptyTeamError`] are fatal and end the run
//! - [`InvalidSelectionError`] is recoverable; the round is skipped
//! - [`RecordError`] describes why a single character record was rejected

use std::path::PathBuf;

use thiserror::Error;

use crate::simulation::MatchPhase;
use crate::team::TeamId;

/// Failure to assemble a valid roster. Fatal: the match must not start.
#[derive(Debug, Error)]
pub enum RosterError {
    /// A team yielded a number of valid characters other than the required count.
    #[error("team {team} has {found} valid characters, expected exactly {expected}")]
    WrongSize {
        /// Team being loaded.
        team: TeamId,
        /// Number of valid records found.
        found: usize,
        /// Number of records required.
        expected: usize,
    },

    /// The backing storage for a team could not be read.
    #[error("failed to read roster for team {team} at {}", path.display())]
    Io {
        /// Team being loaded.
        team: TeamId,
        /// Location that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// A throw-type selection outside {Low, Mid, High}. Recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid throw selection {input:?}, expected one of Low, Mid, High")]
pub struct InvalidSelectionError {
    /// The raw selection as supplied by the provider.
    pub input: String,
}

impl InvalidSelectionError {
    /// Creates an error for the given raw input.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// A team had no characters available at pairing time. Fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("team {team} has no characters available")]
pub struct EmptyTeamError {
    /// The team with no available characters.
    pub team: TeamId,
}

/// Reasons a character record is rejected during roster ingestion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    /// The name is empty or whitespace.
    #[error("character name is empty")]
    EmptyName,

    /// A stat that must be strictly positive is not.
    #[error("{field} must be positive, got {value}")]
    NonPositive {
        /// Stat name.
        field: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Catching skill outside the 0-10 scale.
    #[error("catching must be within 0..=10, got {value}")]
    CatchingOutOfRange {
        /// Offending value.
        value: f64,
    },

    /// The special ability name is not recognised.
    #[error("unknown special ability {name:?}")]
    UnknownAbility {
        /// Name as written in the record.
        name: String,
    },

    /// The record names a different team than the one being loaded.
    #[error("record belongs to team {found}, expected {expected}")]
    TeamMismatch {
        /// Team being loaded.
        expected: TeamId,
        /// Team named by the record.
        found: TeamId,
    },
}

/// Errors surfaced by the match simulator.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Roster loading failed.
    #[error(transparent)]
    Roster(#[from] RosterError),

    /// A team ran out of characters mid-match.
    #[error(transparent)]
    EmptyTeam(#[from] EmptyTeamError),

    /// The match cannot start because a precondition is not met.
    #[error("match is not ready to start: {reason}")]
    NotReady {
        /// Which precondition failed.
        reason: String,
    },

    /// `start` was called on a match that already left `NotStarted`.
    #[error("match has already started")]
    AlreadyStarted,

    /// A round was requested while the match is not running.
    #[error("match is not running (phase: {phase})")]
    NotRunning {
        /// Current phase.
        phase: MatchPhase,
    },
}

/// Convenience alias for match operations.
pub type Result<T> = std::result::Result<T, MatchError>;
