//! Special-ability resolution.
//!
//! The [`AbilityResolver`] applies the acting character's ability against an
//! opposing character. Effects may span two entities: the actor and the
//! opponent's [`Team`](crate::team::Team).
//!
//! | Ability    | Effect                                                             |
//! |------------|--------------------------------------------------------------------|
//! | `None`     | nothing, no random draw                                            |
//! | `Optimist` | actor optimism := 100, opponent team optimism × 1.5                |
//! | `Joker`    | one draw, triggers when `<= 0.35`, no stat change                  |
//! | `Rage`     | stamina × 1.2 and height × 1.1 iff own team optimism < opponent's  |
//!
//! Resolution never fails.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::character::{Character, SpecialAbility};
use crate::rng::RandomSource;
use crate::team::{TeamId, TeamRegistry};

/// Optimism an Optimist sets on itself.
pub const OPTIMIST_MORALE: f64 = 100.0;

/// Multiplier an Optimist applies to the opposing team's optimism.
pub const OPTIMIST_TEAM_BOOST: f64 = 1.5;

/// Probability that a Joker triggers.
pub const JOKER_TRIGGER_CHANCE: f64 = 0.35;

/// Stamina multiplier of an enraged character.
pub const RAGE_STAMINA_FACTOR: f64 = 1.2;

/// Height multiplier of an enraged character.
pub const RAGE_HEIGHT_FACTOR: f64 = 1.1;

/// What an ability application did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AbilityEffect {
    /// The actor has no ability.
    Inactive,
    /// Actor morale reset; the opposing team's morale was amplified.
    Optimist {
        /// Team whose optimism was multiplied.
        boosted_team: TeamId,
        /// That team's optimism after the boost, if the team is registered.
        team_optimism: Option<f64>,
    },
    /// Joker draw result. Exposed for callers; the match loop does not act on it.
    Joker {
        /// Whether the draw triggered.
        triggered: bool,
    },
    /// Rage check result.
    Rage {
        /// Whether stamina and height were increased.
        enraged: bool,
    },
}

impl AbilityEffect {
    /// True when the ability changed state or triggered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        match self {
            Self::Inactive => false,
            Self::Optimist { .. } => true,
            Self::Joker { triggered } => *triggered,
            Self::Rage { enraged } => *enraged,
        }
    }
}

impl fmt::Display for AbilityEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inactive => write!(f, "no ability"),
            Self::Optimist {
                boosted_team,
                team_optimism: Some(value),
            } => write!(f, "Optimist: Team {boosted_team} optimism rises to {value:.2}"),
            Self::Optimist { boosted_team, .. } => {
                write!(f, "Optimist: Team {boosted_team} optimism rises")
            }
            Self::Joker { triggered: true } => write!(f, "Joker triggers"),
            Self::Joker { triggered: false } => write!(f, "Joker stays quiet"),
            Self::Rage { enraged: true } => write!(f, "Rage: stamina and height grow"),
            Self::Rage { enraged: false } => write!(f, "Rage: not provoked"),
        }
    }
}

/// Applies special abilities.
///
/// # Example
///
/// ```
/// use prehazovana_core::ability::{AbilityEffect, AbilityResolver};
/// use prehazovana_core::character::{Character, SpecialAbility};
/// use prehazovana_core::rng::SeededRandom;
/// use prehazovana_core::team::{TeamId, TeamRegistry};
///
/// let red = TeamId::new("Red");
/// let blue = TeamId::new("Blue");
/// let mut teams = TeamRegistry::new();
/// teams.register(&red, 2.0);
/// teams.register(&blue, 4.0);
///
/// let mut cara = Character::new("Cara", blue, 5.0, 1.0, 3.0, 3.0, SpecialAbility::Optimist);
/// let alice = Character::new("Alice", red.clone(), 5.0, 1.0, 2.0, 5.0, SpecialAbility::None);
///
/// let mut rng = SeededRandom::new(1);
/// let effect = AbilityResolver::new().resolve(&mut cara, &alice, &mut teams, &mut rng);
/// assert!(matches!(effect, AbilityEffect::Optimist { .. }));
/// assert_eq!(cara.optimism, 100.0);
/// assert_eq!(teams.optimism(&red), Some(3.0));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AbilityResolver;

impl AbilityResolver {
    /// Creates a resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Applies `actor`'s ability against `opponent`.
    ///
    /// `actor` and `opponent` are distinct borrows, so a character can never
    /// be applied against itself.
    pub fn resolve<R: RandomSource + ?Sized>(
        &self,
        actor: &mut Character,
        opponent: &Character,
        teams: &mut TeamRegistry,
        rng: &mut R,
    ) -> AbilityEffect {
        match actor.ability {
            SpecialAbility::None => AbilityEffect::Inactive,
            SpecialAbility::Optimist => Self::optimist(actor, opponent, teams),
            SpecialAbility::Joker => AbilityEffect::Joker {
                triggered: rng.chance(JOKER_TRIGGER_CHANCE),
            },
            SpecialAbility::Rage => Self::rage(actor, opponent, teams),
        }
    }

    fn optimist(
        actor: &mut Character,
        opponent: &Character,
        teams: &mut TeamRegistry,
    ) -> AbilityEffect {
        actor.optimism = OPTIMIST_MORALE;
        let team_optimism = teams.get_mut(&opponent.team).map(|team| {
            team.optimism *= OPTIMIST_TEAM_BOOST;
            team.optimism
        });
        AbilityEffect::Optimist {
            boosted_team: opponent.team.clone(),
            team_optimism,
        }
    }

    fn rage(actor: &mut Character, opponent: &Character, teams: &TeamRegistry) -> AbilityEffect {
        let provoked = match (teams.optimism(&actor.team), teams.optimism(&opponent.team)) {
            (Some(own), Some(theirs)) => own < theirs,
            _ => false,
        };
        if provoked {
            actor.stamina *= RAGE_STAMINA_FACTOR;
            actor.height *= RAGE_HEIGHT_FACTOR;
        }
        AbilityEffect::Rage { enraged: provoked }
    }
}
