//! Match events for presentation.
//!
//! The simulator reports progress as a sequence of discrete [`MatchEvent`]s
//! delivered to a [`MatchObserver`]. Events carry plain data; their
//! [`Display`](std::fmt::Display) impl gives a human-readable line whose exact
//! wording is not part of any contract.
//!
//! # Usage
//!
//! [`EventLog`] records everything it is notified of and can be drained
//! with [`EventLog::take_events`]. This is typically used in tests and for
//! replay dumps.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ability::AbilityEffect;
use crate::court::CourtPosition;
use crate::scoring::{ThrowOutcome, ThrowType};
use crate::team::TeamId;

/// Why a match stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// A team reached the winning score.
    TargetScore {
        /// The winning team.
        winner: TeamId,
    },
    /// The round limit was reached.
    RoundLimit,
    /// The stop signal was raised.
    Stopped,
    /// A team had no characters to field.
    EmptyTeam {
        /// The empty team.
        team: TeamId,
    },
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetScore { winner } => write!(f, "Team {winner} wins"),
            Self::RoundLimit => write!(f, "round limit reached"),
            Self::Stopped => write!(f, "match stopped"),
            Self::EmptyTeam { team } => write!(f, "Team {team} has no available characters"),
        }
    }
}

/// A discrete status notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// A team's roster was accepted.
    RosterLoaded {
        /// Team loaded.
        team: TeamId,
        /// Number of characters accepted.
        characters: usize,
    },
    /// The match entered the running phase.
    MatchStarted {
        /// Seed of the random source, when known.
        seed: Option<u64>,
    },
    /// Court position for the round.
    PositionChanged {
        /// 1-based round number.
        round: u64,
        /// Position the round is played at.
        position: CourtPosition,
    },
    /// The two characters facing each other this round.
    Pairing {
        /// Character from the first team.
        first: String,
        /// First character's team.
        first_team: TeamId,
        /// Character from the second team.
        second: String,
        /// Second character's team.
        second_team: TeamId,
    },
    /// An attacker's special ability was applied.
    AbilityTriggered {
        /// Acting character.
        character: String,
        /// What happened.
        effect: AbilityEffect,
    },
    /// The selection provider returned something other than Low/Mid/High.
    InvalidSelection {
        /// Attacker whose turn was wasted.
        character: String,
        /// Raw selection.
        input: String,
    },
    /// A throw was resolved.
    Throw {
        /// Attacker.
        character: String,
        /// Attacker's team.
        team: TeamId,
        /// Throw type used.
        throw: ThrowType,
        /// Result.
        outcome: ThrowOutcome,
    },
    /// Running score after a round.
    ScoreUpdated {
        /// Teams in configuration order.
        teams: [TeamId; 2],
        /// Scores in configuration order.
        points: (u32, u32),
    },
    /// The match ended normally.
    Finished {
        /// Why it ended.
        reason: EndReason,
        /// Final scores in configuration order.
        points: (u32, u32),
    },
    /// The match was cut short.
    Aborted {
        /// Why it was aborted.
        reason: EndReason,
    },
}

impl fmt::Display for MatchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RosterLoaded { team, characters } => {
                write!(f, "{team} loaded successfully with {characters} valid characters.")
            }
            Self::MatchStarted { seed: Some(seed) } => write!(f, "Match started (seed {seed})."),
            Self::MatchStarted { seed: None } => write!(f, "Match started."),
            Self::PositionChanged { position, .. } => write!(f, "Position: {position}"),
            Self::Pairing {
                first,
                first_team,
                second,
                second_team,
            } => write!(f, "{first} from Team {first_team} vs {second} from Team {second_team}"),
            Self::AbilityTriggered { character, effect } => write!(f, "{character} - {effect}"),
            Self::InvalidSelection { character, input } => {
                write!(f, "Invalid selection {input:?} for {character}.")
            }
            Self::Throw {
                character,
                team,
                throw,
                outcome,
            } => match outcome {
                ThrowOutcome::Scored => write!(
                    f,
                    "{character} throws the ball {throw} and scores a point for Team {team}!"
                ),
                ThrowOutcome::Caught => write!(
                    f,
                    "{character} throws the ball {throw}, but it misses! The enemy team catches the ball!"
                ),
                ThrowOutcome::Missed => {
                    write!(f, "{character} throws the ball {throw}, but it misses!")
                }
            },
            Self::ScoreUpdated { teams, points } => write!(
                f,
                "The score is {}:{} for Team {}:Team {}",
                points.0, points.1, teams[0], teams[1]
            ),
            Self::Finished { reason, points } => {
                write!(f, "Match over: {reason}. Final score {}:{}", points.0, points.1)
            }
            Self::Aborted { reason } => write!(f, "Match aborted: {reason}."),
        }
    }
}

/// Receives match events.
pub trait MatchObserver {
    /// Called once per event, in order.
    fn notify(&mut self, event: &MatchEvent);
}

impl<T: MatchObserver + ?Sized> MatchObserver for &mut T {
    fn notify(&mut self, event: &MatchEvent) {
        (**self).notify(event);
    }
}

/// Observer that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl MatchObserver for NullObserver {
    fn notify(&mut self, _event: &MatchEvent) {}
}

/// Observer that records events in order.
///
/// # Example
///
/// ```
/// use prehazovana_core::events::{EventLog, MatchEvent, MatchObserver};
///
/// let mut log = EventLog::new();
/// log.notify(&MatchEvent::MatchStarted { seed: Some(7) });
/// assert_eq!(log.len(), 1);
///
/// let events = log.take_events();
/// assert_eq!(events.len(), 1);
/// assert!(log.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<MatchEvent>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    /// Drains and returns all recorded events.
    pub fn take_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Clears the log.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl MatchObserver for EventLog {
    fn notify(&mut self, event: &MatchEvent) {
        self.events.push(event.clone());
    }
}
