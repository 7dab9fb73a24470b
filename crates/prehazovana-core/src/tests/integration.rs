//! Integration tests for the full round pipeline.
//!
//! These tests drive the simulator with scripted draws so every pairing,
//! role assignment, ability and throw is known in advance:
//! - Scoring and non-scoring rounds
//! - Ability side effects during a round
//! - Invalid selections, stop requests and empty teams
//! - End conditions

use crate::ability::AbilityEffect;
use crate::config::MatchConfig;
use crate::court::CourtPosition;
use crate::error::{MatchError, RosterError};
use crate::events::{EndReason, EventLog, MatchEvent, NullObserver};
use crate::rng::SeededRandom;
use crate::roster::InMemoryRosterProvider;
use crate::scoring::{ThrowOutcome, ThrowType};
use crate::selector::{FixedSelector, ScriptedSelector};
use crate::simulation::{MatchPhase, MatchSimulator};

use super::helpers::{
    blue, demo_provider, pairing_draws, record, red, running_simulator, ScriptedRandom,
};

fn script(pairing: [f64; 3], rest: &[f64]) -> ScriptedRandom {
    ScriptedRandom::new(pairing.into_iter().chain(rest.iter().copied()))
}

// =============================================================================
// Scoring Rounds
// =============================================================================

#[test]
fn alice_high_throw_scores_for_red() {
    // Alice vs Cara, Alice attacks, hit draw at the 0.90 threshold
    let rng = script(pairing_draws(0, 0, true), &[0.9]);
    let mut sim = running_simulator(MatchConfig::default(), rng);
    let mut log = EventLog::new();

    let report = sim
        .play_round(&mut FixedSelector(ThrowType::High), &mut log)
        .unwrap();

    assert_eq!(report.attacker, "Alice");
    assert_eq!(report.defender, "Cara");
    assert_eq!(report.attacking_team, red());
    assert_eq!(report.ability, Some(AbilityEffect::Inactive));
    assert_eq!(report.outcome, Some(ThrowOutcome::Scored));
    assert!(report.scored());
    assert_eq!(sim.score().points(&red()), 1);
    assert_eq!(sim.score().points(&blue()), 0);
    assert_eq!(report.points, (1, 0));
}

#[test]
fn alice_high_throw_above_threshold_does_not_score() {
    let rng = script(pairing_draws(0, 0, true), &[0.91, 0.99]);
    let mut sim = running_simulator(MatchConfig::default(), rng);

    let report = sim
        .play_round(&mut FixedSelector(ThrowType::High), &mut NullObserver)
        .unwrap();

    assert_eq!(report.outcome, Some(ThrowOutcome::Missed));
    assert_eq!(sim.score().pair(), (0, 0));
}

#[test]
fn round_emits_events_in_order() {
    let rng = script(pairing_draws(0, 1, false), &[0.1]);
    let mut sim = running_simulator(MatchConfig::default(), rng);
    let mut log = EventLog::new();

    sim.play_round(&mut FixedSelector(ThrowType::Low), &mut log)
        .unwrap();

    let events = log.take_events();
    assert_eq!(events.len(), 4);
    assert_eq!(
        events[0],
        MatchEvent::PositionChanged {
            round: 1,
            position: CourtPosition::MiddleBack
        }
    );
    assert!(matches!(
        &events[1],
        MatchEvent::Pairing { first, second, .. } if first == "Alice" && second == "Dana"
    ));
    assert!(matches!(
        &events[2],
        MatchEvent::Throw { character, outcome: ThrowOutcome::Scored, .. } if character == "Dana"
    ));
    assert_eq!(
        events[3],
        MatchEvent::ScoreUpdated {
            teams: [red(), blue()],
            points: (0, 1)
        }
    );
}

// =============================================================================
// Abilities During Rounds
// =============================================================================

#[test]
fn optimist_attacker_boosts_opposing_team_then_gets_caught() {
    // Alice vs Cara, Cara attacks: Optimist, no draw. Throw misses, Alice's
    // side catches (Cara's catching 3 -> 0.3).
    let rng = script(pairing_draws(0, 0, false), &[0.95, 0.2]);
    let mut sim = running_simulator(MatchConfig::default(), rng);
    let mut log = EventLog::new();

    let report = sim
        .play_round(&mut FixedSelector(ThrowType::High), &mut log)
        .unwrap();

    assert_eq!(report.attacker, "Cara");
    assert_eq!(report.outcome, Some(ThrowOutcome::Caught));
    assert_eq!(sim.score().pair(), (0, 0));
    assert_eq!(sim.teams().optimism(&red()), Some(3.0));
    assert_eq!(sim.teams().optimism(&blue()), Some(4.0));
    let cara = sim.roster().find("Cara").unwrap();
    assert!((cara.optimism - 100.0).abs() < f64::EPSILON);

    assert!(log.events().iter().any(|e| matches!(
        e,
        MatchEvent::AbilityTriggered { character, effect: AbilityEffect::Optimist { .. } }
            if character == "Cara"
    )));
}

#[test]
fn rage_attacker_grows_when_team_is_less_optimistic() {
    // Bob vs Dana, Bob attacks; Red (2.0) < Blue (4.0)
    let rng = script(pairing_draws(1, 1, true), &[0.5, 0.9]);
    let mut sim = running_simulator(MatchConfig::default(), rng);

    let report = sim
        .play_round(&mut FixedSelector(ThrowType::Low), &mut NullObserver)
        .unwrap();

    assert_eq!(report.ability, Some(AbilityEffect::Rage { enraged: true }));
    let bob = sim.roster().find("Bob").unwrap();
    assert!((bob.stamina - 12.0).abs() < 1e-9);
    assert!((bob.height - 1.98).abs() < 1e-9);
    assert_eq!(report.outcome, Some(ThrowOutcome::Missed));
}

#[test]
fn joker_draw_happens_before_throw_and_is_not_consumed() {
    let provider = InMemoryRosterProvider::from_records([
        record("Jo", "Red", 5.0, 1.0, Some("Joker")),
        record("Kit", "Red", 5.0, 1.0, Some("Joker")),
        record("Cara", "Blue", 3.0, 4.0, None),
        record("Dana", "Blue", 6.0, 5.0, None),
    ]);
    // Jo vs Cara, Jo attacks, Joker draw 0.2 (triggers), throw hits
    let rng = script(pairing_draws(0, 0, true), &[0.2, 0.3]);
    let mut sim = MatchSimulator::new(MatchConfig::default(), rng);
    sim.load_roster(&provider, &mut NullObserver).unwrap();
    sim.start(&mut NullObserver).unwrap();

    let report = sim
        .play_round(&mut FixedSelector(ThrowType::Low), &mut NullObserver)
        .unwrap();

    assert_eq!(report.ability, Some(AbilityEffect::Joker { triggered: true }));
    assert_eq!(report.outcome, Some(ThrowOutcome::Scored));
    assert_eq!(sim.score().pair(), (1, 0));
}

#[test]
fn abilities_can_be_disabled() {
    let rng = script(pairing_draws(0, 0, false), &[0.1]);
    let mut sim = running_simulator(MatchConfig::default().with_abilities(false), rng);

    let report = sim
        .play_round(&mut FixedSelector(ThrowType::Mid), &mut NullObserver)
        .unwrap();

    assert_eq!(report.ability, None);
    assert_eq!(sim.teams().optimism(&red()), Some(2.0));
    let cara = sim.roster().find("Cara").unwrap();
    assert!((cara.optimism - 4.0).abs() < f64::EPSILON);
}

// =============================================================================
// Invalid Selections, Stop, Empty Teams
// =============================================================================

#[test]
fn invalid_selection_wastes_the_turn() {
    // No throw draws are scripted; resolving a throw would exhaust the script
    let rng = script(pairing_draws(0, 1, true), &[]);
    let mut sim = running_simulator(MatchConfig::default(), rng);
    let mut log = EventLog::new();

    let report = sim
        .play_round(&mut ScriptedSelector::new(["lob"]), &mut log)
        .unwrap();

    assert_eq!(report.throw, None);
    assert_eq!(report.outcome, None);
    assert_eq!(sim.score().pair(), (0, 0));
    assert_eq!(sim.phase(), MatchPhase::Running);
    assert!(log.events().contains(&MatchEvent::InvalidSelection {
        character: "Alice".to_string(),
        input: "lob".to_string(),
    }));
}

#[test]
fn empty_team_aborts_without_touching_score() {
    let rng = script(pairing_draws(0, 0, true), &[0.1]);
    let mut sim = running_simulator(MatchConfig::default(), rng);
    sim.play_round(&mut FixedSelector(ThrowType::High), &mut NullObserver)
        .unwrap();
    assert_eq!(sim.score().pair(), (1, 0));

    assert_eq!(sim.roster_mut().clear_team(&blue()), 2);
    let mut log = EventLog::new();
    let err = sim
        .play_round(&mut FixedSelector(ThrowType::High), &mut log)
        .unwrap_err();

    match err {
        MatchError::EmptyTeam(inner) => assert_eq!(inner.team, blue()),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(sim.score().pair(), (1, 0));
    assert_eq!(sim.phase(), MatchPhase::Aborted);
    assert_eq!(
        log.events().last(),
        Some(&MatchEvent::Aborted {
            reason: EndReason::EmptyTeam { team: blue() }
        })
    );
    assert_eq!(
        sim.summary().reason,
        Some(EndReason::EmptyTeam { team: blue() })
    );
}

#[test]
fn exhausted_script_stops_the_match() {
    let mut sim = running_simulator(MatchConfig::default(), SeededRandom::new(11));
    let stop = sim.stop_signal();
    let mut selector = ScriptedSelector::new(["high", "mid"]).stop_when_exhausted(stop);
    let mut log = EventLog::new();

    let summary = sim.run(&mut selector, &mut log).unwrap();

    assert_eq!(summary.phase, MatchPhase::Aborted);
    assert_eq!(summary.reason, Some(EndReason::Stopped));
    // Two scripted rounds plus the round in which the script ran dry
    assert_eq!(summary.rounds, 3);
    assert!(!log
        .events()
        .iter()
        .any(|e| matches!(e, MatchEvent::InvalidSelection { .. })));
}

#[test]
fn stop_on_last_allowed_round_is_not_a_round_limit_finish() {
    let mut sim = running_simulator(
        MatchConfig::default().with_max_rounds(3),
        SeededRandom::new(11),
    );
    let stop = sim.stop_signal();
    let mut selector = ScriptedSelector::new(["high", "mid"]).stop_when_exhausted(stop);
    let mut log = EventLog::new();

    let summary = sim.run(&mut selector, &mut log).unwrap();

    assert_eq!(summary.phase, MatchPhase::Aborted);
    assert_eq!(summary.reason, Some(EndReason::Stopped));
    assert_eq!(summary.rounds, 3);
    assert!(!log
        .events()
        .iter()
        .any(|e| matches!(e, MatchEvent::Finished { .. })));
    assert_eq!(
        log.events().last(),
        Some(&MatchEvent::Aborted {
            reason: EndReason::Stopped
        })
    );
}

#[test]
fn stop_during_selection_leaves_state_untouched() {
    // Alice vs Cara, Cara (Optimist) attacks; the selector quits at once.
    // Only the pairing draws are scripted.
    let rng = script(pairing_draws(0, 0, false), &[]);
    let mut sim = running_simulator(MatchConfig::default(), rng);
    let stop = sim.stop_signal();
    let mut selector = ScriptedSelector::new(std::iter::empty::<&str>()).stop_when_exhausted(stop);
    let mut log = EventLog::new();

    let report = sim.play_round(&mut selector, &mut log).unwrap();

    assert_eq!(report.attacker, "Cara");
    assert_eq!(report.ability, None);
    assert_eq!(report.throw, None);
    assert_eq!(sim.phase(), MatchPhase::Aborted);
    assert_eq!(sim.score().pair(), (0, 0));
    assert_eq!(sim.teams().optimism(&red()), Some(2.0));
    let cara = sim.roster().find("Cara").unwrap();
    assert!((cara.optimism - 4.0).abs() < f64::EPSILON);
    assert!(!log.events().iter().any(|e| matches!(
        e,
        MatchEvent::AbilityTriggered { .. } | MatchEvent::ScoreUpdated { .. }
    )));
    assert_eq!(sim.summary().reason, Some(EndReason::Stopped));
}

#[test]
fn stop_before_run_plays_no_rounds() {
    let mut sim = running_simulator(MatchConfig::default(), SeededRandom::new(1));
    sim.stop_signal().request_stop();

    let summary = sim
        .run(&mut FixedSelector(ThrowType::High), &mut NullObserver)
        .unwrap();

    assert_eq!(summary.rounds, 0);
    assert_eq!(summary.phase, MatchPhase::Aborted);
}

// =============================================================================
// Lifecycle and End Conditions
// =============================================================================

#[test]
fn load_roster_reports_each_team() {
    let mut sim = MatchSimulator::new(MatchConfig::default(), SeededRandom::new(1));
    let mut log = EventLog::new();
    sim.load_roster(&demo_provider(), &mut log).unwrap();

    assert_eq!(
        log.take_events(),
        vec![
            MatchEvent::RosterLoaded {
                team: red(),
                characters: 2
            },
            MatchEvent::RosterLoaded {
                team: blue(),
                characters: 2
            },
        ]
    );
    assert_eq!(sim.teams().len(), 2);
}

#[test]
fn wrong_roster_size_prevents_match() {
    let provider = InMemoryRosterProvider::from_records([
        record("Alice", "Red", 5.0, 2.0, None),
        record("Cara", "Blue", 3.0, 4.0, None),
        record("Dana", "Blue", 6.0, 5.0, None),
    ]);
    let mut sim = MatchSimulator::new(MatchConfig::default(), SeededRandom::new(1));

    let err = sim.load_roster(&provider, &mut NullObserver).unwrap_err();
    assert!(matches!(
        err,
        MatchError::Roster(RosterError::WrongSize { found: 1, .. })
    ));

    let err = sim.start(&mut NullObserver).unwrap_err();
    assert!(matches!(err, MatchError::NotReady { .. }));
    assert_eq!(sim.phase(), MatchPhase::NotStarted);
}

#[test]
fn start_twice_is_rejected() {
    let mut sim = running_simulator(MatchConfig::default(), SeededRandom::new(1));
    assert!(matches!(
        sim.start(&mut NullObserver),
        Err(MatchError::AlreadyStarted)
    ));
    assert!(matches!(
        sim.load_roster(&demo_provider(), &mut NullObserver),
        Err(MatchError::AlreadyStarted)
    ));
}

#[test]
fn target_score_finishes_match() {
    let mut sim = running_simulator(
        MatchConfig::default().with_target_score(5),
        SeededRandom::new(3),
    );
    let mut log = EventLog::new();

    let summary = sim
        .run(&mut FixedSelector(ThrowType::High), &mut log)
        .unwrap();

    assert_eq!(summary.phase, MatchPhase::Finished);
    let Some(EndReason::TargetScore { winner }) = summary.reason.clone() else {
        panic!("expected a winner, got {:?}", summary.reason);
    };
    assert_eq!(sim.score().points(&winner), 5);
    assert!(summary.points.0 <= 5 && summary.points.1 <= 5);
    assert!(matches!(
        log.events().last(),
        Some(MatchEvent::Finished { .. })
    ));

    // A finished match cannot be resumed
    assert!(matches!(
        sim.run(&mut FixedSelector(ThrowType::High), &mut NullObserver),
        Err(MatchError::NotRunning {
            phase: MatchPhase::Finished
        })
    ));
}

#[test]
fn round_limit_finishes_match() {
    let mut sim = running_simulator(
        MatchConfig::default().with_max_rounds(25),
        SeededRandom::new(8),
    );

    let summary = sim
        .run(&mut FixedSelector(ThrowType::Low), &mut NullObserver)
        .unwrap();

    assert_eq!(summary.phase, MatchPhase::Finished);
    assert_eq!(summary.reason, Some(EndReason::RoundLimit));
    assert_eq!(summary.rounds, 25);
    assert!(summary.points.0 + summary.points.1 <= 25);
}

#[test]
fn position_cycles_through_court() {
    let mut sim = running_simulator(
        MatchConfig::default().with_abilities(false),
        SeededRandom::new(21),
    );
    let mut seen = vec![sim.position()];
    let mut played = Vec::new();

    for _ in 0..7 {
        let report = sim
            .play_round(&mut FixedSelector(ThrowType::Mid), &mut NullObserver)
            .unwrap();
        played.push(report.position);
        seen.push(sim.position());
    }

    assert_eq!(seen, [0, 1, 2, 3, 4, 5, 0, 1]);
    assert_eq!(played[0], CourtPosition::MiddleBack);
    assert_eq!(played[5], CourtPosition::RightBack);
    assert_eq!(played[6], CourtPosition::MiddleBack);
}

#[test]
fn scripted_draw_count_matches_round_shape() {
    // hit: 3 pairing draws + 1 throw draw; miss: 3 + 2
    let mut rng = script(pairing_draws(0, 1, true), &[0.1, 0.0, 0.0, 0.1, 0.95, 0.99]);
    {
        let mut sim = running_simulator(MatchConfig::default(), &mut rng);
        let mut selector = FixedSelector(ThrowType::Low);
        let first = sim.play_round(&mut selector, &mut NullObserver).unwrap();
        assert_eq!(first.outcome, Some(ThrowOutcome::Scored));
        let second = sim.play_round(&mut selector, &mut NullObserver).unwrap();
        assert_eq!(second.outcome, Some(ThrowOutcome::Missed));
    }
    assert_eq!(rng.drawn(), 9);
    assert_eq!(rng.remaining(), 0);
}
