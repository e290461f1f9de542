//! Card resolution.
//!
//! `CombatSession::play_card` checks every precondition before touching the
//! session, then walks the card's pipeline in `Stage::ORDER`:
//!
//! 1. pay energy, consume the discount, take the card from hand
//! 2. resolve the target
//! 3. damage (kill payoffs fire here), then the combat-end check
//! 4. block, resources, draw, statuses, payoffs
//! 5. hide, self-damage, gadgets, discount
//! 6. exhaust or discard
//! 7. attacking without hiding breaks Hidden
//! 8. combat-end check
//!
//! A terminal phase after the damage stage skips straight to placing the
//! card.

use crate::cards::CardInstance;
use crate::combatants::DamageReport;
use crate::core::{ActionOutcome, CombatPhase, CombatSession, EntityId, GadgetInstance, PlayerAction, Rejection};
use crate::events::{CombatEvent, HpLossCause};

use super::condition::{Condition, ConditionContext};
use super::effect::{CardEffect, DamageModifier, DamageSpec, EffectPrimitive, Payoff, Stage, StatusTarget};
use super::status::{StatusEffect, StatusKind};
use super::targeting::{Side, TargetSelector};

impl CombatSession {
    /// Play a card from hand.
    ///
    /// Rejections leave the session untouched.
    pub fn play_card(&mut self, card: EntityId, target: Option<EntityId>) -> ActionOutcome {
        let cost = match self.check_playable(card) {
            Ok(cost) => cost,
            Err(reason) => return ActionOutcome::Rejected(reason),
        };
        let Some(instance) = self.piles.take_from_hand(card) else {
            return ActionOutcome::Rejected(Rejection::CardNotInHand);
        };

        self.record(PlayerAction::play(card, target));
        self.spend_energy(cost);
        self.next_card_discount = 0;
        self.cards_played_this_turn += 1;
        self.emit(CombatEvent::CardPlayed {
            card,
            card_id: instance.card_id(),
            owner: instance.owner,
            energy_spent: cost,
        });

        let hid = self.resolve(&instance, target);

        let effect = instance.effect();
        let broke_cover = effect.has_damage() && !hid && !self.phase.is_terminal();
        let owner = instance.owner;
        self.place_resolved(instance);

        if broke_cover {
            self.remove_status(owner, StatusKind::Hidden);
        }

        let phase = self.check_combat_end();
        self.debug_check();
        ActionOutcome::Applied { phase }
    }

    /// Whether `play_card` would accept this card right now.
    #[must_use]
    pub fn can_play(&self, card: EntityId) -> bool {
        self.check_playable(card).is_ok()
    }

    /// Energy the card would cost after the pending discount.
    #[must_use]
    pub fn effective_cost(&self, card: &CardInstance) -> u32 {
        card.cost().saturating_sub(self.next_card_discount)
    }

    /// Returns the effective cost if the card can be played.
    fn check_playable(&self, card: EntityId) -> Result<u32, Rejection> {
        if self.phase != CombatPhase::PlayerTurn {
            return Err(Rejection::WrongPhase);
        }
        let instance = self.piles.in_hand(card).ok_or(Rejection::CardNotInHand)?;

        let cost = self.effective_cost(instance);
        if cost > self.energy {
            return Err(Rejection::InsufficientEnergy);
        }
        if !self.hero(instance.owner).is_some_and(|h| h.is_alive()) {
            return Err(Rejection::OwnerDefeated);
        }
        if let Some(guard) = &instance.definition.play_guard {
            if !guard.evaluate(&ConditionContext::new(self, instance.owner)) {
                return Err(Rejection::PlayGuardUnmet);
            }
        }
        Ok(cost)
    }

    /// Walk the pipeline. Returns whether the owner became Hidden.
    fn resolve(&mut self, instance: &CardInstance, requested: Option<EntityId>) -> bool {
        let owner = instance.owner;
        let effect = instance.effect();
        let target = self.card_target(requested);
        let mut hid = false;

        for stage in Stage::ORDER {
            if stage == Stage::Damage {
                hid |= self.resolve_damage(owner, target, effect);
                if self.check_combat_end().is_terminal() {
                    return hid;
                }
                continue;
            }
            for primitive in effect.in_stage(stage) {
                hid |= self.resolve_primitive(owner, target, primitive);
            }
        }
        hid
    }

    fn resolve_damage(&mut self, owner: EntityId, target: Option<EntityId>, effect: &CardEffect) -> bool {
        let mut hid = false;
        let mut killed = false;

        for spec in effect.damage_specs() {
            let amount = self.card_damage(owner, spec);
            if spec.area {
                for enemy in TargetSelector::living(Side::Enemies).valid_targets(self) {
                    self.strike_enemy(owner, enemy, amount);
                }
            } else if let Some(target) = target.filter(|&t| self.combatant(t).is_some_and(|c| c.is_alive())) {
                killed |= self.strike_enemy(owner, target, amount).lethal;
            }
        }

        for primitive in effect.in_stage(Stage::Payoff) {
            if let EffectPrimitive::Conditional { condition, payoff } = primitive {
                if *condition == Condition::KillsEnemy
                    && condition.evaluate(&ConditionContext::new(self, owner).with_kill(killed))
                {
                    hid |= self.apply_payoff(owner, payoff);
                }
            }
        }
        hid
    }

    /// Outgoing damage for one spec, before the target's Block and Vulnerable.
    fn card_damage(&self, owner: EntityId, spec: &DamageSpec) -> i64 {
        let ctx = ConditionContext::new(self, owner);
        let mut damage = spec.unmodified(&self.resources);

        match &spec.modifier {
            Some(DamageModifier::Add { condition, amount }) if condition.evaluate(&ctx) => damage += amount,
            Some(DamageModifier::Replace { condition, amount }) if condition.evaluate(&ctx) => damage = *amount,
            Some(DamageModifier::PerCardPlayedBefore(per_card)) => {
                damage += per_card * i64::from(self.cards_played_this_turn.saturating_sub(1));
            }
            Some(DamageModifier::PerActiveGadget) => damage *= self.gadgets.len() as i64,
            _ => {}
        }

        let Some(attacker) = self.combatant(owner) else {
            return damage.max(0);
        };
        damage += attacker.strength();
        if attacker.statuses.has(StatusKind::Weak) {
            damage = self.config.weak.apply(damage);
        }
        damage.max(0)
    }

    /// Hit an enemy; its Thorns answer back.
    fn strike_enemy(&mut self, owner: EntityId, enemy: EntityId, amount: i64) -> DamageReport {
        let report = self.deal_damage(Some(owner), enemy, amount);
        let thorns = self.combatant(enemy).map_or(0, |c| c.statuses.stacks(StatusKind::Thorns));
        if thorns > 0 && self.combatant(owner).is_some_and(|c| c.is_alive()) {
            self.deal_damage(Some(enemy), owner, thorns);
        }
        report
    }

    /// Resolve one non-damage primitive. Returns whether the owner hid.
    fn resolve_primitive(&mut self, owner: EntityId, target: Option<EntityId>, primitive: &EffectPrimitive) -> bool {
        match primitive {
            EffectPrimitive::Damage(_) => {}
            EffectPrimitive::Block(spec) => {
                let mut amount = spec.unmodified(&self.resources);
                if let Some(bonus) = &spec.bonus {
                    if bonus.condition.evaluate(&ConditionContext::new(self, owner)) {
                        amount += bonus.amount;
                    }
                }
                self.grant_block(owner, amount);
            }
            EffectPrimitive::Resource { resource, delta } => {
                self.change_resource(*resource, *delta);
            }
            EffectPrimitive::Draw(spec) => {
                let count = spec.count(&self.resources, self.config.default_draw_cap);
                self.draw_cards(count);
            }
            EffectPrimitive::ApplyStatus { target: recipients, status } => {
                for id in self.status_recipients(owner, target, *recipients) {
                    self.apply_status(id, *status);
                }
            }
            EffectPrimitive::Conditional { condition, payoff } => {
                // Kill payoffs already fired during the damage stage.
                if *condition != Condition::KillsEnemy && condition.evaluate(&ConditionContext::new(self, owner)) {
                    return self.apply_payoff(owner, payoff);
                }
            }
            EffectPrimitive::BecomeHidden => {
                self.apply_status(owner, StatusEffect::new(StatusKind::Hidden, 1));
                return true;
            }
            EffectPrimitive::SelfDamage(amount) => {
                self.lose_hp(owner, *amount, HpLossCause::SelfDamage);
            }
            EffectPrimitive::DeployGadget(spec) => {
                self.gadgets.push(GadgetInstance::deploy(spec, owner));
                self.emit(CombatEvent::GadgetDeployed {
                    name: spec.name.clone(),
                    owner,
                    turns: spec.duration,
                });
            }
            EffectPrimitive::DiscountNextCard(amount) => {
                self.next_card_discount += amount;
                self.emit(CombatEvent::DiscountGranted { amount: *amount });
            }
        }
        false
    }

    fn status_recipients(&self, owner: EntityId, target: Option<EntityId>, recipients: StatusTarget) -> Vec<EntityId> {
        match recipients {
            StatusTarget::Owner => vec![owner],
            StatusTarget::Target => target
                .filter(|&t| TargetSelector::living(Side::Enemies).accepts(self, t))
                .into_iter()
                .collect(),
            StatusTarget::AllEnemies => TargetSelector::living(Side::Enemies).valid_targets(self),
            StatusTarget::AllAllies => TargetSelector::living(Side::Heroes).valid_targets(self),
        }
    }

    /// Returns whether the payoff hid the owner.
    fn apply_payoff(&mut self, owner: EntityId, payoff: &Payoff) -> bool {
        for &(resource, delta) in &payoff.resources {
            self.change_resource(resource, delta);
        }
        for status in &payoff.statuses {
            self.apply_status(owner, *status);
        }
        self.draw_cards(payoff.draw);
        if payoff.become_hidden {
            self.apply_status(owner, StatusEffect::new(StatusKind::Hidden, 1));
        }
        payoff.become_hidden
    }

    fn place_resolved(&mut self, card: CardInstance) {
        let id = card.instance_id;
        if card.effect().exhaust {
            self.piles.exhaust(card);
            self.emit(CombatEvent::CardExhausted { card: id });
        } else {
            self.piles.discard(card);
            self.emit(CombatEvent::CardDiscarded { card: id });
        }
    }
}
