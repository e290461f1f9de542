//! Target selection.
//!
//! - `TargetSelector`: which combatants on a side pass a set of filters
//! - card targets: the requested enemy if alive, else the first living enemy
//! - enemy targets: a uniformly random living hero that is neither
//!   Untargetable nor Hidden, else any living hero

use serde::{Deserialize, Serialize};

use crate::combatants::Combatant;
use crate::core::{CombatSession, EntityId};

/// One side of the battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Heroes,
    Enemies,
}

/// Filters for valid targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetFilter {
    /// HP above zero.
    Alive,
    /// Not Untargetable and not Hidden.
    Targetable,
}

impl TargetFilter {
    fn passes(self, combatant: &Combatant) -> bool {
        match self {
            TargetFilter::Alive => combatant.is_alive(),
            TargetFilter::Targetable => !combatant.is_evasive(),
        }
    }
}

/// Selector for combatants on one side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetSelector {
    side: Side,
    filters: Vec<TargetFilter>,
}

impl TargetSelector {
    /// Every combatant on a side, dead or alive.
    #[must_use]
    pub fn new(side: Side) -> Self {
        Self {
            side,
            filters: Vec::new(),
        }
    }

    /// Living combatants on a side.
    #[must_use]
    pub fn living(side: Side) -> Self {
        Self::new(side).with_filter(TargetFilter::Alive)
    }

    /// Add a filter (builder pattern).
    #[must_use]
    pub fn with_filter(mut self, filter: TargetFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Matching combatants in list order.
    #[must_use]
    pub fn valid_targets(&self, session: &CombatSession) -> Vec<EntityId> {
        let passes = |c: &Combatant| self.filters.iter().all(|f| f.passes(c));
        match self.side {
            Side::Heroes => session
                .heroes()
                .iter()
                .map(|h| &h.combatant)
                .filter(|c| passes(c))
                .map(|c| c.id)
                .collect(),
            Side::Enemies => session
                .enemies()
                .iter()
                .map(|e| &e.combatant)
                .filter(|c| passes(c))
                .map(|c| c.id)
                .collect(),
        }
    }

    /// Check a single id against the selector.
    #[must_use]
    pub fn accepts(&self, session: &CombatSession, id: EntityId) -> bool {
        let on_side = match self.side {
            Side::Heroes => session.hero(id).map(|h| &h.combatant),
            Side::Enemies => session.enemy(id).map(|e| &e.combatant),
        };
        on_side.is_some_and(|c| self.filters.iter().all(|f| f.passes(c)))
    }
}

impl CombatSession {
    /// Resolve a card's single target.
    ///
    /// The requested enemy if it is alive, else the first living enemy.
    #[must_use]
    pub fn card_target(&self, requested: Option<EntityId>) -> Option<EntityId> {
        let living = TargetSelector::living(Side::Enemies);
        requested
            .filter(|&id| living.accepts(self, id))
            .or_else(|| living.valid_targets(self).first().copied())
    }

    /// Pick the hero an enemy's single-target ability hits.
    pub(crate) fn choose_hero_target(&mut self) -> Option<EntityId> {
        let targetable = TargetSelector::living(Side::Heroes)
            .with_filter(TargetFilter::Targetable)
            .valid_targets(self);
        let pool = if targetable.is_empty() {
            TargetSelector::living(Side::Heroes).valid_targets(self)
        } else {
            targetable
        };
        self.rng.choose(&pool).copied()
    }

    /// Pick a uniformly random living enemy (gadget volleys).
    pub(crate) fn choose_enemy_target(&mut self) -> Option<EntityId> {
        let pool = TargetSelector::living(Side::Enemies).valid_targets(self);
        self.rng.choose(&pool).copied()
    }

    /// Pick a uniformly random living hero (retreat volley).
    pub(crate) fn choose_any_hero(&mut self) -> Option<EntityId> {
        let pool = TargetSelector::living(Side::Heroes).valid_targets(self);
        self.rng.choose(&pool).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::HeroClass;
    use crate::combatants::{Enemy, EnemyAbility, Faction, Hero, IntentKind};
    use crate::core::{CombatConfig, CombatRng};
    use crate::effects::status::{StatusEffect, StatusKind};
    use crate::effects::CardEffect;

    fn session() -> CombatSession {
        let mut rng = CombatRng::new(11);
        let heroes = (1..=3)
            .map(|i| Hero::new(EntityId(i), format!("Hero {i}"), HeroClass::Mover, 30))
            .collect();
        let enemies = (10..=11)
            .map(|i| {
                Enemy::new(
                    Combatant::new(EntityId(i), "Foe", 20),
                    Faction::Swarm,
                    false,
                    vec![EnemyAbility::new("Wait", IntentKind::Buff, 1, CardEffect::new())],
                    &mut rng,
                )
            })
            .collect();
        CombatSession::new(heroes, enemies, CombatConfig::default(), rng)
    }

    #[test]
    fn test_card_target_fallback() {
        let mut session = session();

        assert_eq!(session.card_target(Some(EntityId(11))), Some(EntityId(11)));
        assert_eq!(session.card_target(None), Some(EntityId(10)));
        // A hero id is never a card target.
        assert_eq!(session.card_target(Some(EntityId(2))), Some(EntityId(10)));

        session.deal_damage(None, EntityId(10), 50);
        assert_eq!(session.card_target(Some(EntityId(10))), Some(EntityId(11)));

        session.deal_damage(None, EntityId(11), 50);
        assert_eq!(session.card_target(None), None);
    }

    #[test]
    fn test_accepts() {
        let mut session = session();
        session.deal_damage(None, EntityId(10), 50);

        assert!(!TargetSelector::living(Side::Enemies).accepts(&session, EntityId(10)));
        assert!(TargetSelector::new(Side::Enemies).accepts(&session, EntityId(10)));
        assert!(TargetSelector::living(Side::Enemies).accepts(&session, EntityId(11)));
        assert!(!TargetSelector::living(Side::Enemies).accepts(&session, EntityId(1)));
        assert!(!TargetSelector::living(Side::Heroes).accepts(&session, EntityId(11)));
        assert!(!TargetSelector::living(Side::Heroes).accepts(&session, EntityId(99)));
    }

    #[test]
    fn test_valid_targets_in_list_order() {
        let mut session = session();
        session.apply_status(EntityId(2), StatusEffect::new(StatusKind::Hidden, 1));

        assert_eq!(
            TargetSelector::living(Side::Heroes).valid_targets(&session),
            vec![EntityId(1), EntityId(2), EntityId(3)]
        );
        assert_eq!(
            TargetSelector::living(Side::Heroes)
                .with_filter(TargetFilter::Targetable)
                .valid_targets(&session),
            vec![EntityId(1), EntityId(3)]
        );
    }

    #[test]
    fn test_enemies_skip_evasive_heroes() {
        let mut session = session();
        session.apply_status(EntityId(1), StatusEffect::new(StatusKind::Hidden, 1));
        session.apply_status(EntityId(2), StatusEffect::new(StatusKind::Untargetable, 1));

        for _ in 0..20 {
            assert_eq!(session.choose_hero_target(), Some(EntityId(3)));
        }
    }

    #[test]
    fn test_all_evasive_falls_back_to_living() {
        let mut session = session();
        for id in 1..=3 {
            session.apply_status(EntityId(id), StatusEffect::new(StatusKind::Hidden, 1));
        }
        session.deal_damage(None, EntityId(3), 100);

        for _ in 0..20 {
            let target = session.choose_hero_target();
            assert!(matches!(target, Some(EntityId(1)) | Some(EntityId(2))));
        }
    }
}
