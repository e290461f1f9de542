//! Enemy action resolution.
//!
//! An enemy resolves the ability its intent declared: damage first (its
//! Strength added, then Weak), then block and statuses from its own side's
//! point of view, then a summon if the ability is one. The next intent is
//! drawn right after, so it is always inspectable between turns.

use crate::combatants::{DamageReport, IntentKind};
use crate::content::enemies;
use crate::core::{CombatSession, EntityId};
use crate::effects::status::StatusKind;
use crate::effects::{DamageSpec, EffectPrimitive, Side, Stage, StatusTarget, TargetSelector};
use crate::events::CombatEvent;

impl CombatSession {
    /// Resolve the declared ability of the enemy at `index`.
    pub(crate) fn execute_intent(&mut self, index: usize) {
        let enemy = &self.enemies[index];
        let id = enemy.id();
        let faction = enemy.faction;
        let ability = enemy.declared_ability().clone();

        self.emit(CombatEvent::EnemyActed {
            enemy: id,
            ability: ability.name.clone(),
            kind: ability.kind,
        });

        let Some(target) = self.choose_hero_target() else {
            return;
        };

        for spec in ability.effect.damage_specs() {
            let amount = self.enemy_damage(id, spec);
            if spec.area {
                for hero in self.living_heroes() {
                    self.strike_hero(id, hero, amount);
                }
            } else if self.hero(target).is_some_and(|h| h.is_alive()) {
                self.strike_hero(id, target, amount);
            }
        }

        for stage in Stage::ORDER.into_iter().filter(|&s| s != Stage::Damage) {
            for primitive in ability.effect.in_stage(stage) {
                match primitive {
                    EffectPrimitive::Block(spec) => {
                        self.grant_block(id, spec.base);
                    }
                    EffectPrimitive::ApplyStatus { target: recipients, status } => {
                        for recipient in self.enemy_status_recipients(id, target, *recipients) {
                            self.apply_status(recipient, *status);
                        }
                    }
                    _ => {}
                }
            }
        }

        if ability.kind == IntentKind::Summon {
            self.summon(id, faction);
        }
    }

    /// Draw and declare the next intent for the enemy at `index`.
    pub(crate) fn redeclare_intent(&mut self, index: usize) {
        let enemy = &mut self.enemies[index];
        let id = enemy.id();
        let intent = enemy.redeclare(&mut self.rng);
        let (kind, value) = (intent.kind, intent.value);
        self.emit(CombatEvent::IntentDeclared { enemy: id, kind, value });
    }

    /// Ability damage plus Strength, then Weak.
    fn enemy_damage(&self, id: EntityId, spec: &DamageSpec) -> i64 {
        let Some(attacker) = self.combatant(id) else {
            return spec.base.max(0);
        };
        let mut damage = spec.base + attacker.strength();
        if attacker.statuses.has(StatusKind::Weak) {
            damage = self.config.weak.apply(damage);
        }
        damage.max(0)
    }

    /// Hit a hero; its Thorns answer back.
    fn strike_hero(&mut self, enemy: EntityId, hero: EntityId, amount: i64) -> DamageReport {
        let report = self.deal_damage(Some(enemy), hero, amount);
        let thorns = self.combatant(hero).map_or(0, |c| c.statuses.stacks(StatusKind::Thorns));
        if thorns > 0 && self.combatant(enemy).is_some_and(|c| c.is_alive()) {
            self.deal_damage(Some(hero), enemy, thorns);
        }
        report
    }

    /// `Target` is the chosen hero, `AllEnemies` every living hero,
    /// `AllAllies` every living enemy.
    fn enemy_status_recipients(&self, id: EntityId, target: EntityId, recipients: StatusTarget) -> Vec<EntityId> {
        match recipients {
            StatusTarget::Owner => vec![id],
            StatusTarget::Target => Some(target)
                .filter(|&t| TargetSelector::living(Side::Heroes).accepts(self, t))
                .into_iter()
                .collect(),
            StatusTarget::AllEnemies => TargetSelector::living(Side::Heroes).valid_targets(self),
            StatusTarget::AllAllies => TargetSelector::living(Side::Enemies).valid_targets(self),
        }
    }

    /// Append the weakest minion of the summoner's faction.
    fn summon(&mut self, summoner: EntityId, faction: crate::combatants::Faction) {
        let difficulty = self.config.summon_difficulty();
        let id = self.alloc_id();
        if let Some(minion) = enemies::summon(faction, difficulty, id, &mut self.rng) {
            let (kind, value) = (minion.intent.kind, minion.intent.value);
            self.enemies.push(minion);
            self.emit(CombatEvent::Summoned { summoner, enemy: id });
            self.emit(CombatEvent::IntentDeclared { enemy: id, kind, value });
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::cards::{CardDefinition, CardInstance, CardRarity, CardType, HeroClass};
    use crate::combatants::{Combatant, Enemy, EnemyAbility, Faction, Hero, IntentKind};
    use crate::core::{CombatConfig, CombatPhase, CombatRng, CombatSession, EntityId};
    use crate::effects::status::{StatusEffect, StatusKind};
    use crate::effects::{BlockSpec, CardEffect, DamageSpec, StatusTarget};

    fn hero(id: u32) -> Hero {
        let mut hero = Hero::new(EntityId(id), format!("Hero {id}"), HeroClass::Brute, 50);
        for i in 0..5 {
            hero.add_card(CardInstance::new(
                EntityId(id * 100 + i),
                EntityId(id),
                CardDefinition::new("wait", "Wait", CardType::Skill, CardRarity::Basic, 1),
            ));
        }
        hero
    }

    fn session_against(ability: EnemyAbility) -> CombatSession {
        session_with(Faction::Cult, ability)
    }

    fn session_with(faction: Faction, ability: EnemyAbility) -> CombatSession {
        let mut rng = CombatRng::new(9);
        let enemy = Enemy::new(Combatant::new(EntityId(50), "Foe", 40), faction, false, vec![ability], &mut rng);
        let mut session = CombatSession::new(vec![hero(1), hero(2)], vec![enemy], CombatConfig::default(), rng);
        session.start_player_turn();
        session
    }

    fn hp(session: &CombatSession, id: u32) -> i64 {
        session.combatant(EntityId(id)).unwrap().hp()
    }

    #[test]
    fn test_single_target_skips_evasive_heroes() {
        let strike = EnemyAbility::new("Strike", IntentKind::Attack, 1, CardEffect::new().damage(DamageSpec::flat(6)));
        let mut session = session_against(strike);
        session.apply_status(EntityId(1), StatusEffect::timed(StatusKind::Untargetable, 1, 2));

        session.end_player_turn();

        assert_eq!(hp(&session, 1), 50);
        assert_eq!(hp(&session, 2), 44);
    }

    #[test]
    fn test_everyone_evasive_falls_back_to_any() {
        let strike = EnemyAbility::new("Strike", IntentKind::Attack, 1, CardEffect::new().damage(DamageSpec::flat(6)));
        let mut session = session_against(strike);
        session.apply_status(EntityId(1), StatusEffect::new(StatusKind::Hidden, 1));
        session.apply_status(EntityId(2), StatusEffect::new(StatusKind::Hidden, 1));

        session.end_player_turn();

        assert_eq!(hp(&session, 1) + hp(&session, 2), 94);
    }

    #[test]
    fn test_area_attack_with_strength() {
        let scream = EnemyAbility::new("Scream", IntentKind::Attack, 1, CardEffect::new().damage(DamageSpec::flat(6).to_all()));
        let mut session = session_against(scream);
        session.apply_status(EntityId(50), StatusEffect::new(StatusKind::Strength, 2));

        session.end_player_turn();

        assert_eq!(hp(&session, 1), 42);
        assert_eq!(hp(&session, 2), 42);
    }

    #[test]
    fn test_hero_thorns_reflect() {
        let scream = EnemyAbility::new("Scream", IntentKind::Attack, 1, CardEffect::new().damage(DamageSpec::flat(6).to_all()));
        let mut session = session_against(scream);
        session.apply_status(EntityId(1), StatusEffect::new(StatusKind::Thorns, 4));

        session.end_player_turn();

        assert_eq!(session.combatant(EntityId(50)).unwrap().hp(), 36);
    }

    #[test]
    fn test_buff_and_debuff_recipients() {
        let veil = EnemyAbility::new(
            "Veil",
            IntentKind::Buff,
            1,
            CardEffect::new()
                .block(BlockSpec::flat(15))
                .apply(StatusTarget::Owner, StatusEffect::new(StatusKind::Strength, 3))
                .apply(StatusTarget::AllEnemies, StatusEffect::new(StatusKind::Weak, 1)),
        );
        let mut session = session_against(veil);

        session.end_player_turn();

        let foe = session.combatant(EntityId(50)).unwrap();
        assert_eq!(foe.strength(), 3);
        // Enemy Block lasts until the enemy-side decay.
        assert_eq!(foe.block(), 0);
        // Durationless Weak on a hero survives the hero decay pass.
        assert_eq!(session.combatant(EntityId(1)).unwrap().statuses.stacks(StatusKind::Weak), 1);
        assert_eq!(session.combatant(EntityId(2)).unwrap().statuses.stacks(StatusKind::Weak), 1);
        assert!(session.events().iter().any(|e| matches!(
            e,
            crate::events::CombatEvent::BlockGained { target: EntityId(50), amount: 15 }
        )));
    }

    #[test]
    fn test_hero_vulnerable_persists_across_turns() {
        let expose = EnemyAbility::new(
            "Expose",
            IntentKind::Debuff,
            1,
            CardEffect::new().apply(StatusTarget::AllEnemies, StatusEffect::new(StatusKind::Vulnerable, 1)),
        );
        let mut session = session_against(expose);

        session.end_player_turn();
        assert_eq!(session.combatant(EntityId(1)).unwrap().statuses.stacks(StatusKind::Vulnerable), 1);

        session.end_player_turn();
        assert_eq!(session.combatant(EntityId(1)).unwrap().statuses.stacks(StatusKind::Vulnerable), 2);
    }

    #[test]
    fn test_summon_acts_the_turn_it_appears() {
        let call = EnemyAbility::new("Summon", IntentKind::Summon, 1, CardEffect::new());
        let mut session = session_with(Faction::Swarm, call);
        session.drain_events();

        session.end_player_turn();

        assert_eq!(session.enemies().len(), 2);
        let minion = &session.enemies()[1];
        assert_eq!(minion.faction, Faction::Swarm);
        assert!(!minion.is_boss);
        assert_eq!(minion.id(), EntityId(205));
        assert_eq!(session.phase(), CombatPhase::PlayerTurn);

        let actors: Vec<EntityId> = session
            .events()
            .iter()
            .filter_map(|e| match e {
                crate::events::CombatEvent::EnemyActed { enemy, .. } => Some(*enemy),
                _ => None,
            })
            .collect();
        assert_eq!(actors, vec![EntityId(50), EntityId(205)]);
    }
}
