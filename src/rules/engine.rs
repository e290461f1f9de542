//! Rules engine trait for automated drivers.
//!
//! A `RulesEngine` defines:
//! - What player actions are legal
//! - How actions modify the session
//! - How an encounter ends

use crate::core::{ActionOutcome, CombatPhase, CombatSession, PlayerAction, ResourceType};
use crate::effects::{EffectPrimitive, Side, StatusTarget, TargetSelector};


/// Result of a finished encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CombatOutcome {
    Victory,
    Defeat,
    Retreat,
}

impl CombatOutcome {
    /// The outcome a terminal phase stands for.
    #[must_use]
    pub fn from_phase(phase: CombatPhase) -> Option<Self> {
        match phase {
            CombatPhase::Victory => Some(Self::Victory),
            CombatPhase::Defeat => Some(Self::Defeat),
            CombatPhase::Retreat => Some(Self::Retreat),
            CombatPhase::PlayerTurn | CombatPhase::EnemyTurn => None,
        }
    }

    /// Check if the heroes won.
    #[must_use]
    pub fn is_victory(self) -> bool {
        self == Self::Victory
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: Return empty vec if the player can't act
/// - `apply_action`: Must be deterministic given the session's RNG
/// - `is_terminal`: Return None if the encounter continues
pub trait RulesEngine {
    /// Enumerate every legal player action, with targets expanded.
    fn legal_actions(&self, session: &CombatSession) -> Vec<PlayerAction>;

    /// Apply an action to the session.
    fn apply_action(&mut self, session: &mut CombatSession, action: &PlayerAction) -> ActionOutcome;

    /// Check if the encounter is over.
    fn is_terminal(&self, session: &CombatSession) -> Option<CombatOutcome>;

    // === Convenience Methods ===

    /// Check whether an action is currently legal.
    fn is_legal(&self, session: &CombatSession, action: &PlayerAction) -> bool {
        self.legal_actions(session).contains(action)
    }
}

/// The standard combat rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct CombatRules;

impl CombatRules {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RulesEngine for CombatRules {
    fn legal_actions(&self, session: &CombatSession) -> Vec<PlayerAction> {
        if session.phase() != CombatPhase::PlayerTurn {
            return Vec::new();
        }

        let enemies = TargetSelector::living(Side::Enemies).valid_targets(session);
        let mut actions = Vec::new();

        for card in session.hand().iter().filter(|c| session.can_play(c.instance_id)) {
            let effect = card.effect();
            let targeted = effect.damage_specs().any(|d| !d.area)
                || effect.primitives.iter().any(|p| {
                    matches!(
                        p,
                        EffectPrimitive::ApplyStatus {
                            target: StatusTarget::Target,
                            ..
                        }
                    )
                });
            if targeted {
                actions.extend(enemies.iter().map(|&e| PlayerAction::play(card.instance_id, Some(e))));
            } else {
                actions.push(PlayerAction::play(card.instance_id, None));
            }
        }

        for resource in ResourceType::ALL.into_iter().filter(|&r| session.can_use_baseline(r)) {
            if resource == ResourceType::Blood {
                actions.extend(enemies.iter().map(|&e| PlayerAction::baseline(resource, Some(e))));
            } else {
                actions.push(PlayerAction::baseline(resource, None));
            }
        }

        if session.energy() >= session.config().retreat_cost {
            actions.push(PlayerAction::Retreat);
        }
        actions.push(PlayerAction::EndTurn);
        actions
    }

    fn apply_action(&mut self, session: &mut CombatSession, action: &PlayerAction) -> ActionOutcome {
        match *action {
            PlayerAction::PlayCard { card, target } => session.play_card(card, target),
            PlayerAction::UseBaseline { resource, target } => session.use_baseline_ability(resource, target),
            PlayerAction::EndTurn => session.end_player_turn(),
            PlayerAction::Retreat => session.initiate_retreat(),
        }
    }

    fn is_terminal(&self, session: &CombatSession) -> Option<CombatOutcome> {
        CombatOutcome::from_phase(session.phase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_phase() {
        assert_eq!(CombatOutcome::from_phase(CombatPhase::Victory), Some(CombatOutcome::Victory));
        assert_eq!(CombatOutcome::from_phase(CombatPhase::Retreat), Some(CombatOutcome::Retreat));
        assert_eq!(CombatOutcome::from_phase(CombatPhase::EnemyTurn), None);

        assert!(CombatOutcome::Victory.is_victory());
        assert!(!CombatOutcome::Defeat.is_victory());
    }
}
