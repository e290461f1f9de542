//! Baseline abilities: fixed effects bought with energy and resource,
//! available outside the card system.

use crate::core::{ActionOutcome, CombatPhase, CombatSession, EntityId, PlayerAction, Rejection, ResourceType};
use crate::events::CombatEvent;

impl CombatSession {
    /// Spend energy and resource on a baseline ability.
    ///
    /// - Blood: damage to the chosen living enemy (first living if none)
    /// - Glint: draw cards
    /// - Iron: Block to every living hero
    ///
    /// Ashes and Pages pay the same cost and have no effect yet.
    pub fn use_baseline_ability(&mut self, resource: ResourceType, target: Option<EntityId>) -> ActionOutcome {
        if let Err(reason) = self.check_baseline(resource) {
            return ActionOutcome::Rejected(reason);
        }

        self.record(PlayerAction::baseline(resource, target));
        self.spend_energy(self.config.baseline_energy_cost);
        self.change_resource(resource, -i64::from(self.config.baseline_resource_cost));
        self.emit(CombatEvent::BaselineUsed { resource });

        match resource {
            ResourceType::Blood => {
                if let Some(enemy) = self.card_target(target) {
                    self.deal_damage(None, enemy, self.config.baseline_damage);
                }
            }
            ResourceType::Glint => {
                self.draw_cards(self.config.baseline_draw);
            }
            ResourceType::Iron => {
                for hero in self.living_heroes() {
                    self.grant_block(hero, self.config.baseline_block);
                }
            }
            ResourceType::Ashes | ResourceType::Pages => {}
        }

        let phase = self.check_combat_end();
        self.debug_check();
        ActionOutcome::Applied { phase }
    }

    /// Whether `use_baseline_ability` would accept this resource right now.
    #[must_use]
    pub fn can_use_baseline(&self, resource: ResourceType) -> bool {
        self.check_baseline(resource).is_ok()
    }

    fn check_baseline(&self, resource: ResourceType) -> Result<(), Rejection> {
        if self.phase != CombatPhase::PlayerTurn {
            return Err(Rejection::WrongPhase);
        }
        if self.energy < self.config.baseline_energy_cost {
            return Err(Rejection::InsufficientEnergy);
        }
        if !self.resources.can_afford(resource, self.config.baseline_resource_cost) {
            return Err(Rejection::InsufficientResource);
        }
        Ok(())
    }
}
