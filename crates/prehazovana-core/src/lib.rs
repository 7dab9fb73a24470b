//! # Přehazovaná Core
//!
//! Match simulation core for Přehazovaná, a volleyball-like game between two
//! teams of two characters each.
//!
//! ## Architecture
//!
//! - **Characters and teams**: stats, special abilities, team morale
//! - **Resolvers**: [`ability::AbilityResolver`] applies special abilities,
//!   [`scoring::ScoringEngine`] resolves throws
//! - **Simulator**: [`simulation::MatchSimulator`] runs the round loop
//!
//! Everything outside the core is a trait seam:
//! [`roster::RosterProvider`] supplies character records,
//! [`selector::ThrowSelector`] supplies throw types, and
//! [`events::MatchObserver`] consumes status events. All randomness comes
//! from one injected [`rng::RandomSource`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use prehazovana_core::{MatchConfig, MatchSimulator, FixedSelector, EventLog, ThrowType};
//!
//! let mut sim = MatchSimulator::seeded(MatchConfig::default().with_target_score(5));
//! sim.load_roster(&provider, &mut EventLog::new())?;
//! let summary = sim.run(&mut FixedSelector(ThrowType::Mid), &mut EventLog::new())?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod ability;
pub mod character;
pub mod config;
pub mod court;
pub mod error;
pub mod events;
pub mod rng;
pub mod roster;
pub mod scoring;
pub mod selector;
pub mod simulation;
pub mod team;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use ability::{AbilityEffect, AbilityResolver};
pub use character::{Character, CharacterRecord, SpecialAbility};
pub use config::MatchConfig;
pub use court::{CourtPosition, Scoreboard};
pub use error::{EmptyTeamError, InvalidSelectionError, MatchError, RecordError, RosterError};
pub use events::{EndReason, EventLog, MatchEvent, MatchObserver, NullObserver};
pub use rng::{RandomSource, SeededRandom};
pub use roster::{InMemoryRosterProvider, Roster, RosterProvider, TEAM_SIZE};
pub use scoring::{ScoringEngine, ThrowOutcome, ThrowType};
pub use selector::{FixedSelector, ScriptedSelector, ThrowSelector};
pub use simulation::{MatchPhase, MatchSimulator, MatchSummary, RoundReport, StopSignal};
pub use team::{Team, TeamId, TeamRegistry};
