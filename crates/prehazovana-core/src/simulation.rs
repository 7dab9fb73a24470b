//! Match simulator with the round loop.
//!
//! The [`MatchSimulator`] owns all match-level state (roster, team registry,
//! scoreboard, court position, phase) and the single random source every
//! draw comes from. One round:
//!
//! 1. **POSITION**: announce the current court position, advance the index
//! 2. **PAIRING**: filter the roster per team, pick one character from each
//! 3. **ROLES**: coin flip decides attacker and defender
//! 4. **SELECTION**: ask the selector for the attacker's throw type
//! 5. **ABILITY**: optionally apply the attacker's ability against the defender
//! 6. **THROW**: resolve the selected throw
//! 7. **SCORE**: award the point, report the score, check the end condition
//!
//! Selection draws no randomness, so asking before the ability changes no
//! outcome. A stop raised during selection aborts the match at once and
//! leaves roster, teams and score untouched.
//!
//! # Phases
//!
//! `NotStarted → Running → (Finished | Aborted)`. A match finishes when the
//! configured target score or round limit is reached; it is aborted when the
//! [`StopSignal`] is raised or a team has nobody to field.
//!
//! # Example
//!
//! ```
//! use prehazovana_core::character::{Character, SpecialAbility};
//! use prehazovana_core::config::MatchConfig;
//! use prehazovana_core::events::EventLog;
//! use prehazovana_core::roster::Roster;
//! use prehazovana_core::rng::SeededRandom;
//! use prehazovana_core::scoring::ThrowType;
//! use prehazovana_core::selector::FixedSelector;
//! use prehazovana_core::simulation::{MatchPhase, MatchSimulator};
//! use prehazovana_core::team::{TeamId, TeamRegistry};
//!
//! let (red, blue) = (TeamId::new("Red"), TeamId::new("Blue"));
//! let player = |name: &str, team: &TeamId| {
//!     Character::new(name, team.clone(), 10.0, 1.8, 5.0, 5.0, SpecialAbility::None)
//! };
//! let roster = Roster::from_characters(vec![
//!     player("Alice", &red),
//!     player("Bob", &red),
//!     player("Cara", &blue),
//!     player("Dana", &blue),
//! ]);
//! let mut teams = TeamRegistry::new();
//! teams.register(&red, 5.0);
//! teams.register(&blue, 5.0);
//!
//! let config = MatchConfig::default().with_target_score(3);
//! let mut sim = MatchSimulator::with_roster(config, roster, teams, SeededRandom::new(42));
//!
//! let summary = sim
//!     .run(&mut FixedSelector(ThrowType::High), &mut EventLog::new())
//!     .unwrap();
//!
//! assert_eq!(summary.phase, MatchPhase::Finished);
//! assert!(summary.points.0 == 3 || summary.points.1 == 3);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::ability::AbilityEffect;
use crate::config::MatchConfig;
use crate::court::{CourtPosition, Scoreboard};
use crate::error::{EmptyTeamError, MatchError, Result};
use crate::events::{EndReason, MatchEvent, MatchObserver};
use crate::rng::{RandomSource, SeededRandom};
use crate::roster::{Roster, RosterProvider, TEAM_SIZE};
use crate::scoring::{ScoringEngine, ThrowOutcome, ThrowType};
use crate::selector::ThrowSelector;
use crate::team::{TeamId, TeamRegistry};

// =============================================================================
// Stop Signal
// =============================================================================

/// Cancellation token for a running match.
///
/// Clones share the same flag, so a front end can keep one clone and raise
/// it while the simulator checks another between rounds.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    /// Creates a lowered signal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks the match to stop before its next round.
    pub fn request_stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// True once a stop was requested.
    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Lowers the signal again.
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

// =============================================================================
// Phase, Report, Summary
// =============================================================================

/// Lifecycle phase of a match.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Roster may still be loaded; no round played.
    NotStarted,
    /// Rounds are being played.
    Running,
    /// Ended by the configured target score or round limit.
    Finished,
    /// Ended by a stop request or a fatal error.
    Aborted,
}

impl fmt::Display for MatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not started"),
            Self::Running => write!(f, "running"),
            Self::Finished => write!(f, "finished"),
            Self::Aborted => write!(f, "aborted"),
        }
    }
}

/// What happened in one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    /// 1-based round number.
    pub round: u64,
    /// Position the round was played at.
    pub position: CourtPosition,
    /// Attacking character.
    pub attacker: String,
    /// Defending character.
    pub defender: String,
    /// Attacker's team.
    pub attacking_team: TeamId,
    /// Result of the attacker's ability, when abilities are enabled.
    pub ability: Option<AbilityEffect>,
    /// Throw type used; `None` when the selection was invalid.
    pub throw: Option<ThrowType>,
    /// Throw result; `None` when no throw was made.
    pub outcome: Option<ThrowOutcome>,
    /// Scores after the round, in configuration order.
    pub points: (u32, u32),
}

impl RoundReport {
    /// True if the attacker's team scored this round.
    #[must_use]
    pub fn scored(&self) -> bool {
        self.outcome.is_some_and(ThrowOutcome::is_score)
    }
}

/// Final state of a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Phase the match ended in.
    pub phase: MatchPhase,
    /// Why it ended.
    pub reason: Option<EndReason>,
    /// Final scores in configuration order.
    pub points: (u32, u32),
    /// Rounds played.
    pub rounds: u64,
    /// Seed of the random source, when known.
    pub seed: Option<u64>,
}

// =============================================================================
// Match Simulator
// =============================================================================

/// Orchestrates a match between two teams.
///
/// Single-threaded: every round is fully resolved before the next begins.
/// The only suspension point is the call into the [`ThrowSelector`].
pub struct MatchSimulator<R: RandomSource = SeededRandom> {
    config: MatchConfig,
    roster: Roster,
    teams: TeamRegistry,
    scoreboard: Scoreboard,
    /// Index into [`CourtPosition::CYCLE`] of the next round's position.
    position: usize,
    phase: MatchPhase,
    rounds: u64,
    end_reason: Option<EndReason>,
    rng: R,
    seed: Option<u64>,
    stop: StopSignal,
    scoring: ScoringEngine,
}

impl<R: RandomSource> fmt::Debug for MatchSimulator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchSimulator")
            .field("config", &self.config)
            .field("roster", &format!("[{} characters]", self.roster.len()))
            .field("teams", &self.teams)
            .field("scoreboard", &self.scoreboard)
            .field("position", &self.position)
            .field("phase", &self.phase)
            .field("rounds", &self.rounds)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

impl MatchSimulator<SeededRandom> {
    /// Creates a simulator whose random source follows `config.seed`
    /// (entropy when unset). The effective seed is always recorded.
    #[must_use]
    pub fn seeded(config: MatchConfig) -> Self {
        let rng = SeededRandom::from_optional_seed(config.seed);
        let seed = rng.seed();
        let mut sim = Self::new(config, rng);
        sim.seed = Some(seed);
        sim
    }
}

impl<R: RandomSource> MatchSimulator<R> {
    /// Creates a simulator with no roster, score 0:0 and position 0.
    #[must_use]
    pub fn new(config: MatchConfig, rng: R) -> Self {
        Self::with_roster(config, Roster::default(), TeamRegistry::new(), rng)
    }

    /// Creates a simulator around an already assembled roster.
    ///
    /// Team sizes are checked by [`start`](Self::start).
    #[must_use]
    pub fn with_roster(config: MatchConfig, roster: Roster, teams: TeamRegistry, rng: R) -> Self {
        let scoreboard = Scoreboard::new(config.teams.clone());
        let seed = config.seed;
        Self {
            config,
            roster,
            teams,
            scoreboard,
            position: 0,
            phase: MatchPhase::NotStarted,
            rounds: 0,
            end_reason: None,
            rng,
            seed,
            stop: StopSignal::new(),
            scoring: ScoringEngine::new(),
        }
    }

    /// Loads the roster for the configured teams from `provider`.
    ///
    /// Emits one [`MatchEvent::RosterLoaded`] per team on success.
    ///
    /// # Errors
    ///
    /// - [`MatchError::AlreadyStarted`] once the match has started
    /// - [`MatchError::Roster`] if the provider fails or a team does not
    ///   have exactly two valid characters
    pub fn load_roster<P, O>(&mut self, provider: &P, observer: &mut O) -> Result<()>
    where
        P: RosterProvider + ?Sized,
        O: MatchObserver + ?Sized,
    {
        if self.phase != MatchPhase::NotStarted {
            return Err(MatchError::AlreadyStarted);
        }
        let (roster, teams) = Roster::load(provider, &self.config.teams)?;
        self.roster = roster;
        self.teams = teams;

        for team in &self.config.teams {
            observer.notify(&MatchEvent::RosterLoaded {
                team: team.clone(),
                characters: self.roster.team_size(team),
            });
        }
        Ok(())
    }

    /// Moves the match from `NotStarted` to `Running`.
    ///
    /// # Errors
    ///
    /// - [`MatchError::AlreadyStarted`] if the match is past `NotStarted`
    /// - [`MatchError::NotReady`] unless each configured team fields exactly
    ///   two characters and is registered
    pub fn start<O: MatchObserver + ?Sized>(&mut self, observer: &mut O) -> Result<()> {
        if self.phase != MatchPhase::NotStarted {
            return Err(MatchError::AlreadyStarted);
        }
        for team in &self.config.teams {
            let size = self.roster.team_size(team);
            if size != TEAM_SIZE {
                return Err(MatchError::NotReady {
                    reason: format!("team {team} fields {size} characters, expected {TEAM_SIZE}"),
                });
            }
            if !self.teams.contains(team) {
                return Err(MatchError::NotReady {
                    reason: format!("team {team} is not registered"),
                });
            }
        }
        let expected = TEAM_SIZE * self.config.teams.len();
        if self.roster.len() != expected {
            return Err(MatchError::NotReady {
                reason: format!(
                    "roster has {} characters, expected {expected}",
                    self.roster.len()
                ),
            });
        }

        self.phase = MatchPhase::Running;
        info!(seed = ?self.seed, teams = ?self.config.teams, "match started");
        observer.notify(&MatchEvent::MatchStarted { seed: self.seed });
        Ok(())
    }

    /// Plays a single round.
    ///
    /// If the selector fails because the stop signal was raised, the match
    /// is aborted and the returned report carries no ability or throw.
    ///
    /// # Errors
    ///
    /// - [`MatchError::NotRunning`] if the match is not running
    /// - [`MatchError::EmptyTeam`] if a team has no characters; the match is
    ///   aborted and the score is left untouched
    pub fn play_round<S, O>(&mut self, selector: &mut S, observer: &mut O) -> Result<RoundReport>
    where
        S: ThrowSelector + ?Sized,
        O: MatchObserver + ?Sized,
    {
        if self.phase != MatchPhase::Running {
            return Err(MatchError::NotRunning { phase: self.phase });
        }

        // POSITION
        self.rounds += 1;
        let round = self.rounds;
        let position = CourtPosition::from_index(self.position);
        self.position = CourtPosition::next_index(self.position);
        observer.notify(&MatchEvent::PositionChanged { round, position });

        // PAIRING
        let [team_a, team_b] = self.config.teams.clone();
        let members_a = self.roster.team_members(&team_a);
        let members_b = self.roster.team_members(&team_b);
        for (team, members) in [(&team_a, &members_a), (&team_b, &members_b)] {
            if members.is_empty() {
                return Err(self.abort_empty_team(team, observer).into());
            }
        }
        let pick_a = members_a[self.rng.pick_index(members_a.len())];
        let pick_b = members_b[self.rng.pick_index(members_b.len())];
        observer.notify(&self.pairing_event(pick_a, pick_b));

        // ROLES
        let (attacker_idx, defender_idx) = if self.rng.coin_flip() {
            (pick_a, pick_b)
        } else {
            (pick_b, pick_a)
        };

        // SELECTION
        let (attacker_name, attacking_team) = self.identity(attacker_idx);
        let (defender_name, _) = self.identity(defender_idx);
        let selection = selector.select_throw(&attacker_name);

        let mut report = RoundReport {
            round,
            position,
            attacker: attacker_name,
            defender: defender_name,
            attacking_team,
            ability: None,
            throw: None,
            outcome: None,
            points: self.scoreboard.pair(),
        };

        // A stop raised by the selector abandons the round with no state change
        if selection.is_err() && self.stop.is_requested() {
            debug!(round, "stop requested during throw selection");
            self.abort(EndReason::Stopped, observer);
            return Ok(report);
        }

        // ABILITY
        if self.config.trigger_abilities {
            report.ability = self.trigger_ability(attacker_idx, defender_idx, observer);
        }

        // THROW
        match selection {
            Ok(throw) => {
                let outcome = match self.roster.get(attacker_idx) {
                    Some(attacker) => self.scoring.resolve_throw(attacker, throw, &mut self.rng),
                    None => ThrowOutcome::Missed,
                };
                // SCORE
                if outcome.is_score() {
                    self.scoreboard.award_point(&report.attacking_team);
                }
                debug!(round, attacker = %report.attacker, %throw, ?outcome, "throw resolved");
                observer.notify(&MatchEvent::Throw {
                    character: report.attacker.clone(),
                    team: report.attacking_team.clone(),
                    throw,
                    outcome,
                });
                report.throw = Some(throw);
                report.outcome = Some(outcome);
            }
            Err(error) => {
                warn!(round, attacker = %report.attacker, %error, "round skipped");
                observer.notify(&MatchEvent::InvalidSelection {
                    character: report.attacker.clone(),
                    input: error.input,
                });
            }
        }

        report.points = self.scoreboard.pair();
        debug!(round, points = ?report.points, "round complete");
        observer.notify(&MatchEvent::ScoreUpdated {
            teams: self.config.teams.clone(),
            points: report.points,
        });

        self.check_end_condition(observer);
        Ok(report)
    }

    /// Starts the match if needed and plays rounds until it finishes, the
    /// stop signal is raised, or a fatal error occurs.
    ///
    /// # Errors
    ///
    /// - any error from [`start`](Self::start)
    /// - [`MatchError::NotRunning`] if the match already ended
    /// - [`MatchError::EmptyTeam`] if a team runs out of characters
    pub fn run<S, O>(&mut self, selector: &mut S, observer: &mut O) -> Result<MatchSummary>
    where
        S: ThrowSelector + ?Sized,
        O: MatchObserver + ?Sized,
    {
        match self.phase {
            MatchPhase::NotStarted => self.start(observer)?,
            MatchPhase::Running => {}
            phase => return Err(MatchError::NotRunning { phase }),
        }

        while self.phase == MatchPhase::Running {
            if self.stop.is_requested() {
                self.abort(EndReason::Stopped, observer);
                break;
            }
            self.play_round(selector, observer)?;
        }

        Ok(self.summary())
    }

    /// Snapshot of the current result.
    #[must_use]
    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            phase: self.phase,
            reason: self.end_reason.clone(),
            points: self.scoreboard.pair(),
            rounds: self.rounds,
            seed: self.seed,
        }
    }

    fn identity(&self, idx: usize) -> (String, TeamId) {
        self.roster
            .get(idx)
            .map(|c| (c.name.clone(), c.team.clone()))
            .unwrap_or_default()
    }

    fn pairing_event(&self, first: usize, second: usize) -> MatchEvent {
        let (first, first_team) = self.identity(first);
        let (second, second_team) = self.identity(second);
        debug!(%first, %second, "pairing");
        MatchEvent::Pairing {
            first,
            first_team,
            second,
            second_team,
        }
    }

    fn trigger_ability<O: MatchObserver + ?Sized>(
        &mut self,
        attacker: usize,
        defender: usize,
        observer: &mut O,
    ) -> Option<AbilityEffect> {
        let (actor, opponent) = self.roster.pair_mut(attacker, defender)?;
        let effect = actor.apply_special_ability(opponent, &mut self.teams, &mut self.rng);
        if effect != AbilityEffect::Inactive {
            debug!(character = %actor.name, %effect, "ability applied");
            observer.notify(&MatchEvent::AbilityTriggered {
                character: actor.name.clone(),
                effect: effect.clone(),
            });
        }
        Some(effect)
    }

    fn check_end_condition<O: MatchObserver + ?Sized>(&mut self, observer: &mut O) {
        if let Some(target) = self.config.target_score {
            if let Some(winner) = self.scoreboard.leader_reaching(target).cloned() {
                self.finish(EndReason::TargetScore { winner }, observer);
                return;
            }
        }
        if self.config.max_rounds.is_some_and(|limit| self.rounds >= limit) {
            self.finish(EndReason::RoundLimit, observer);
        }
    }

    fn finish<O: MatchObserver + ?Sized>(&mut self, reason: EndReason, observer: &mut O) {
        self.phase = MatchPhase::Finished;
        info!(%reason, points = ?self.scoreboard.pair(), rounds = self.rounds, "match finished");
        observer.notify(&MatchEvent::Finished {
            reason: reason.clone(),
            points: self.scoreboard.pair(),
        });
        self.end_reason = Some(reason);
    }

    fn abort<O: MatchObserver + ?Sized>(&mut self, reason: EndReason, observer: &mut O) {
        self.phase = MatchPhase::Aborted;
        info!(%reason, rounds = self.rounds, "match aborted");
        observer.notify(&MatchEvent::Aborted {
            reason: reason.clone(),
        });
        self.end_reason = Some(reason);
    }

    fn abort_empty_team<O: MatchObserver + ?Sized>(
        &mut self,
        team: &TeamId,
        observer: &mut O,
    ) -> EmptyTeamError {
        error!(%team, "team has no available characters");
        self.abort(EndReason::EmptyTeam { team: team.clone() }, observer);
        EmptyTeamError { team: team.clone() }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Current scores.
    #[must_use]
    pub fn score(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Index of the position the next round is played at.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of rounds played so far.
    #[must_use]
    pub fn rounds_played(&self) -> u64 {
        self.rounds
    }

    /// The roster.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The team registry.
    #[must_use]
    pub fn teams(&self) -> &TeamRegistry {
        &self.teams
    }

    /// The match configuration.
    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// A handle that stops the match before its next round.
    #[must_use]
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Seed of the random source, when known.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[cfg(test)]
    pub(crate) fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }
}
