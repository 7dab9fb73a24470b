//! Test helper functions for setting up rosters and simulators.
//!
//! The standard fixture is the demo match:
//!
//! | Team | Character | Catching | Optimism | Ability  |
//! |------|-----------|----------|----------|----------|
//! | Red  | Alice     | 5        | 2        | -        |
//! | Red  | Bob       | 8        | 3        | Rage     |
//! | Blue | Cara      | 3        | 4        | Optimist |
//! | Blue | Dana      | 6        | 5        | -        |
//!
//! Team optimism is seeded from the first character loaded, so Red starts
//! at 2.0 and Blue at 4.0.

use std::collections::VecDeque;

use crate::character::CharacterRecord;
use crate::config::MatchConfig;
use crate::events::NullObserver;
use crate::rng::RandomSource;
use crate::roster::InMemoryRosterProvider;
use crate::simulation::MatchSimulator;
use crate::team::TeamId;

// =============================================================================
// Scripted Randomness
// =============================================================================

/// Random source that replays a fixed list of values.
///
/// Uses the default `pick_index`/`coin_flip` derivations, so:
/// - `pick_index(2)`: `0.0..0.5` picks the first member, `0.5..1.0` the second
/// - `coin_flip`: `< 0.5` makes the first team's pick the attacker
///
/// # Panics
///
/// Panics when a draw is requested after the script is exhausted, which
/// makes unexpected draws visible in tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    values: VecDeque<f64>,
    drawn: usize,
}

impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
            drawn: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        self.drawn += 1;
        self.values
            .pop_front()
            .expect("scripted random source exhausted")
    }
}

// =============================================================================
// Roster Fixtures
// =============================================================================

pub fn red() -> TeamId {
    TeamId::new("Red")
}

pub fn blue() -> TeamId {
    TeamId::new("Blue")
}

/// Builds a valid record with the given catching skill, optimism and ability.
pub fn record(
    name: &str,
    team: &str,
    catching: f64,
    optimism: f64,
    ability: Option<&str>,
) -> CharacterRecord {
    CharacterRecord {
        name: name.to_string(),
        team: team.to_string(),
        stamina: 10.0,
        height: 1.8,
        optimism,
        catching,
        special_ability: ability.map(str::to_string),
    }
}

/// Provider holding the demo match roster.
pub fn demo_provider() -> InMemoryRosterProvider {
    InMemoryRosterProvider::from_records([
        record("Alice", "Red", 5.0, 2.0, None),
        record("Bob", "Red", 8.0, 3.0, Some("Rage")),
        record("Cara", "Blue", 3.0, 4.0, Some("Optimist")),
        record("Dana", "Blue", 6.0, 5.0, None),
    ])
}

/// Simulator with the demo roster loaded and the match started.
pub fn running_simulator<R: RandomSource>(config: MatchConfig, rng: R) -> MatchSimulator<R> {
    let mut sim = MatchSimulator::new(config, rng);
    sim.load_roster(&demo_provider(), &mut NullObserver)
        .expect("demo roster loads");
    sim.start(&mut NullObserver).expect("demo match starts");
    sim
}

// =============================================================================
// Draw Scripts
// =============================================================================

/// Draws that pair `red_pick` with `blue_pick` and pick the attacker side.
///
/// `red_pick`/`blue_pick` are 0 or 1 (roster order within the team).
pub fn pairing_draws(red_pick: usize, blue_pick: usize, red_attacks: bool) -> [f64; 3] {
    let pick = |i: usize| if i == 0 { 0.0 } else { 0.75 };
    [pick(red_pick), pick(blue_pick), if red_attacks { 0.1 } else { 0.9 }]
}
