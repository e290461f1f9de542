//! Turn scheduler.
//!
//! `PlayerTurn → EnemyTurn → PlayerTurn`, with `Victory`, `Defeat` and
//! `Retreat` absorbing. Ending the player turn runs the whole enemy turn and,
//! if the fight goes on, the next player turn start.

use crate::core::{ActionOutcome, CombatPhase, CombatSession, EntityId, PlayerAction, Rejection};
use crate::effects::status::{DecayPass, StatusKind};
use crate::events::{CombatEvent, HpLossCause};

impl CombatSession {
    /// Begin a player turn.
    ///
    /// In order: turn counter, energy and per-turn counters reset; stale hero
    /// Block is cleared; Regeneration heals; Poison ticks; the hand is drawn;
    /// hero statuses decay; gadgets grant their Block.
    ///
    /// Accepted for the opening turn and after an enemy turn.
    pub fn start_player_turn(&mut self) -> ActionOutcome {
        let opening = self.phase == CombatPhase::PlayerTurn && self.turn == 0;
        if !opening && self.phase != CombatPhase::EnemyTurn {
            return ActionOutcome::Rejected(Rejection::WrongPhase);
        }

        self.turn += 1;
        self.sequence = 0;
        self.set_phase(CombatPhase::PlayerTurn);
        self.energy = self.config.max_energy;
        self.cards_played_this_turn = 0;
        self.next_card_discount = 0;
        self.emit(CombatEvent::TurnStarted { turn: self.turn });

        let heroes = self.living_heroes();
        for &hero in &heroes {
            self.remove_status(hero, StatusKind::Block);
        }
        for &hero in &heroes {
            self.regenerate(hero);
        }
        for &hero in &heroes {
            self.tick_poison(hero);
        }
        if self.check_combat_end().is_terminal() {
            return ActionOutcome::Applied { phase: self.phase };
        }

        self.draw_cards(self.config.hand_size);

        for hero in self.living_heroes() {
            self.decay_statuses(hero, DecayPass::Hero);
        }

        let shield: i64 = self
            .gadgets
            .iter()
            .flat_map(|g| g.per_turn.block_specs())
            .map(|spec| spec.unmodified(&self.resources))
            .sum();
        for hero in self.living_heroes() {
            self.grant_block(hero, shield);
        }

        self.debug_check();
        ActionOutcome::Applied { phase: self.phase }
    }

    /// End the player turn and resolve the enemy turn.
    pub fn end_player_turn(&mut self) -> ActionOutcome {
        if self.phase != CombatPhase::PlayerTurn {
            return ActionOutcome::Rejected(Rejection::WrongPhase);
        }
        self.record(PlayerAction::EndTurn);

        self.gadget_volley();
        self.expire_gadgets();

        let cards = self.piles.discard_hand();
        self.emit(CombatEvent::HandDiscarded { cards });

        for hero in self.heroes.iter().map(|h| h.id()).collect::<Vec<_>>() {
            self.remove_status(hero, StatusKind::Block);
        }

        if !self.check_combat_end().is_terminal() {
            self.set_phase(CombatPhase::EnemyTurn);
            self.run_enemy_turn();
        }

        self.debug_check();
        ActionOutcome::Applied { phase: self.phase }
    }

    /// Withdraw from combat.
    ///
    /// Every living enemy with a damaging intent gets one parting hit of its
    /// base damage on a random living hero. Ends in `Retreat`, or `Defeat`
    /// if that volley leaves no hero standing.
    pub fn initiate_retreat(&mut self) -> ActionOutcome {
        if self.phase != CombatPhase::PlayerTurn {
            return ActionOutcome::Rejected(Rejection::WrongPhase);
        }
        if self.energy < self.config.retreat_cost {
            return ActionOutcome::Rejected(Rejection::InsufficientEnergy);
        }

        self.record(PlayerAction::Retreat);
        self.spend_energy(self.config.retreat_cost);
        self.emit(CombatEvent::RetreatBegan);

        for index in 0..self.enemies.len() {
            let enemy = &self.enemies[index];
            if !enemy.is_alive() {
                continue;
            }
            let (id, damage) = (enemy.id(), enemy.declared_ability().base_damage());
            if let Some(damage) = damage {
                if let Some(hero) = self.choose_any_hero() {
                    self.deal_damage(Some(id), hero, damage);
                }
            }
        }

        if self.heroes.iter().any(|h| h.is_alive()) {
            self.set_phase(CombatPhase::Retreat);
        } else {
            self.set_phase(CombatPhase::Defeat);
        }

        self.debug_check();
        ActionOutcome::Applied { phase: self.phase }
    }

    /// Every gadget fires its per-turn damage at a random living enemy.
    fn gadget_volley(&mut self) {
        let volleys: Vec<(EntityId, i64)> = self
            .gadgets
            .iter()
            .flat_map(|g| g.per_turn.damage_specs().map(move |spec| (g.owner, spec)))
            .map(|(owner, spec)| (owner, spec.unmodified(&self.resources)))
            .collect();

        for (owner, damage) in volleys {
            let Some(target) = self.choose_enemy_target() else {
                break;
            };
            self.deal_damage(Some(owner), target, damage);
        }
    }

    fn expire_gadgets(&mut self) {
        for gadget in &mut self.gadgets {
            gadget.turns_remaining = gadget.turns_remaining.saturating_sub(1);
        }

        let (active, expired): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.gadgets).into_iter().partition(|g| g.turns_remaining > 0);
        self.gadgets = active;
        for gadget in expired {
            self.emit(CombatEvent::GadgetExpired { name: gadget.name });
        }
    }

    /// Enemies act in list order, including any summoned during this turn.
    fn run_enemy_turn(&mut self) {
        let mut index = 0;
        while index < self.enemies.len() {
            if !self.enemies[index].is_alive() {
                index += 1;
                continue;
            }
            let id = self.enemies[index].id();

            self.tick_poison(id);
            if self.enemies[index].is_alive() {
                self.execute_intent(index);
                self.redeclare_intent(index);
            }

            if self.check_combat_end().is_terminal() {
                return;
            }
            index += 1;
        }

        let enemies = self.living_enemies();
        for &enemy in &enemies {
            self.decay_statuses(enemy, DecayPass::Enemy);
        }
        for &enemy in &enemies {
            self.regenerate(enemy);
        }

        if !self.check_combat_end().is_terminal() {
            self.start_player_turn();
        }
    }

    fn regenerate(&mut self, id: EntityId) {
        let stacks = self.combatant(id).map_or(0, |c| c.statuses.stacks(StatusKind::Regeneration));
        if stacks > 0 {
            self.heal(id, stacks);
        }
    }

    fn tick_poison(&mut self, id: EntityId) {
        let Some(combatant) = self.combatant_mut(id) else {
            return;
        };
        let damage = combatant.statuses.tick_poison();
        let cleared = !combatant.statuses.has(StatusKind::Poison);
        if damage > 0 {
            self.lose_hp(id, damage, HpLossCause::Poison);
            if cleared {
                self.emit(CombatEvent::StatusRemoved {
                    target: id,
                    kind: StatusKind::Poison,
                });
            }
        }
    }
}
