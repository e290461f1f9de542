//! Effect conditions.
//!
//! Conditions guard conditional damage, conditional block, payoffs and play
//! guards. They are a closed set evaluated against the session and the
//! acting combatant.

use serde::{Deserialize, Serialize};

use super::status::StatusKind;
use crate::core::{CombatSession, EntityId, ResourceType};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    AtLeast,
    AtMost,
    Exactly,
}

impl Comparison {
    #[must_use]
    pub fn holds(self, value: u32, threshold: u32) -> bool {
        match self {
            Comparison::AtLeast => value >= threshold,
            Comparison::AtMost => value <= threshold,
            Comparison::Exactly => value == threshold,
        }
    }
}

/// A condition checked at resolution time.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    /// Pool value compared against a threshold.
    ResourceThreshold {
        resource: ResourceType,
        threshold: u32,
        comparison: Comparison,
    },

    /// The acting combatant carries a status.
    HasStatus(StatusKind),

    /// At least one card has been played this turn (including this one).
    CardsPlayedThisTurn,

    /// At least one gadget is active.
    GadgetCount,

    /// This resolution's single-target damage was lethal.
    KillsEnemy,
}

impl Condition {
    /// `pool[resource] >= threshold`.
    #[must_use]
    pub fn at_least(resource: ResourceType, threshold: u32) -> Self {
        Self::ResourceThreshold {
            resource,
            threshold,
            comparison: Comparison::AtLeast,
        }
    }

    /// Evaluate against a context.
    #[must_use]
    pub fn evaluate(&self, ctx: &ConditionContext<'_>) -> bool {
        match self {
            Condition::ResourceThreshold {
                resource,
                threshold,
                comparison,
            } => comparison.holds(ctx.session.resources().get(*resource), *threshold),
            Condition::HasStatus(kind) => ctx
                .session
                .combatant(ctx.actor)
                .is_some_and(|c| c.statuses.has(*kind)),
            Condition::CardsPlayedThisTurn => ctx.session.cards_played_this_turn() > 0,
            Condition::GadgetCount => !ctx.session.gadgets().is_empty(),
            Condition::KillsEnemy => ctx.killed,
        }
    }
}

/// Context for evaluating conditions.
pub struct ConditionContext<'a> {
    /// Current session.
    pub session: &'a CombatSession,
    /// The acting combatant.
    pub actor: EntityId,
    /// Whether the current resolution killed its single target.
    pub killed: bool,
}

impl<'a> ConditionContext<'a> {
    /// Create a context with no kill recorded.
    #[must_use]
    pub fn new(session: &'a CombatSession, actor: EntityId) -> Self {
        Self {
            session,
            actor,
            killed: false,
        }
    }

    /// Set the kill flag (builder pattern).
    #[must_use]
    pub fn with_kill(mut self, killed: bool) -> Self {
        self.killed = killed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::HeroClass;
    use crate::combatants::{Combatant, Enemy, EnemyAbility, Faction, Hero, IntentKind};
    use crate::core::{CombatConfig, CombatRng};
    use crate::effects::CardEffect;

    fn session() -> CombatSession {
        let mut rng = CombatRng::new(1);
        let enemy = Enemy::new(
            Combatant::new(EntityId(2), "Dummy", 10),
            Faction::Undead,
            false,
            vec![EnemyAbility::new("Wait", IntentKind::Buff, 1, CardEffect::new())],
            &mut rng,
        );
        let hero = Hero::new(EntityId(1), "Shade", HeroClass::Stranger, 40);
        CombatSession::new(vec![hero], vec![enemy], CombatConfig::default(), rng)
    }

    #[test]
    fn test_kill_flag() {
        let session = session();
        let ctx = ConditionContext::new(&session, EntityId(1));
        assert!(!Condition::KillsEnemy.evaluate(&ctx));
        assert!(Condition::KillsEnemy.evaluate(&ctx.with_kill(true)));
    }

    #[test]
    fn test_status_and_counters() {
        let session = session();
        let ctx = ConditionContext::new(&session, EntityId(1));

        assert!(!Condition::HasStatus(StatusKind::Hidden).evaluate(&ctx));
        assert!(!Condition::CardsPlayedThisTurn.evaluate(&ctx));
        assert!(!Condition::GadgetCount.evaluate(&ctx));
        assert!(Condition::ResourceThreshold {
            resource: ResourceType::Pages,
            threshold: 0,
            comparison: Comparison::AtMost,
        }
        .evaluate(&ctx));
    }

    #[test]
    fn test_comparisons() {
        assert!(Comparison::AtLeast.holds(5, 5));
        assert!(!Comparison::AtLeast.holds(4, 5));
        assert!(Comparison::AtMost.holds(0, 2));
        assert!(Comparison::Exactly.holds(3, 3));
        assert!(!Comparison::Exactly.holds(2, 3));
    }

    #[test]
    fn test_at_least_builder() {
        assert_eq!(
            Condition::at_least(ResourceType::Ashes, 5),
            Condition::ResourceThreshold {
                resource: ResourceType::Ashes,
                threshold: 5,
                comparison: Comparison::AtLeast,
            }
        );
    }
}
