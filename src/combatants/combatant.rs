//! Shared combatant state and the damage primitive.
//!
//! Heroes and enemies both wrap a `Combatant`. HP is kept in `[0, max_hp]`
//! by every mutator; the fields are private so nothing can bypass the clamp.

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, Ratio};
use crate::effects::status::{StatusEffect, StatusKind, StatusSet};

/// What a hit did to its target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageReport {
    /// Damage absorbed by Block.
    pub blocked: i64,
    /// HP actually removed.
    pub hp_lost: i64,
    /// Whether HP is at zero after the hit.
    pub lethal: bool,
}

/// Identity, HP and statuses.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Combatant {
    pub id: EntityId,
    pub name: String,
    max_hp: i64,
    hp: i64,
    pub statuses: StatusSet,
}

impl Combatant {
    /// Create a combatant at full HP.
    ///
    /// Panics if `max_hp` is not positive.
    #[must_use]
    pub fn new(id: EntityId, name: impl Into<String>, max_hp: i64) -> Self {
        assert!(max_hp > 0, "Combatant max HP must be positive");
        Self {
            id,
            name: name.into(),
            max_hp,
            hp: max_hp,
            statuses: StatusSet::new(),
        }
    }

    #[must_use]
    pub fn hp(&self) -> i64 {
        self.hp
    }

    #[must_use]
    pub fn max_hp(&self) -> i64 {
        self.max_hp
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Set HP directly, clamped. Used by the mission layer to carry wounds
    /// between encounters.
    pub fn set_hp(&mut self, hp: i64) {
        self.hp = hp.clamp(0, self.max_hp);
    }

    /// Shared damage primitive.
    ///
    /// Negative input counts as zero. Block absorbs first and is removed when
    /// emptied; the remainder is multiplied by `vulnerable` (floored) if the
    /// target is Vulnerable; HP is reduced and clamped at zero.
    pub fn take_damage(&mut self, amount: i64, vulnerable: Ratio) -> DamageReport {
        let mut damage = amount.max(0);

        let blocked = self.statuses.reduce(StatusKind::Block, damage);
        damage -= blocked;

        if self.statuses.has(StatusKind::Vulnerable) {
            damage = vulnerable.apply(damage);
        }

        let hp_lost = self.lose_hp(damage);
        DamageReport {
            blocked,
            hp_lost,
            lethal: !self.is_alive(),
        }
    }

    /// Remove HP directly, bypassing Block and Vulnerable.
    ///
    /// Returns the HP actually lost.
    pub fn lose_hp(&mut self, amount: i64) -> i64 {
        let before = self.hp;
        self.set_hp(self.hp - amount.max(0));
        before - self.hp
    }

    /// Restore HP up to max. Returns the HP actually restored.
    pub fn heal(&mut self, amount: i64) -> i64 {
        let before = self.hp;
        self.set_hp(self.hp + amount.max(0));
        self.hp - before
    }

    /// Add Block stacks. A non-positive amount grants nothing.
    pub fn gain_block(&mut self, amount: i64) -> i64 {
        if amount <= 0 {
            return 0;
        }
        self.statuses.apply(StatusEffect::new(StatusKind::Block, amount));
        amount
    }

    /// Current Block stacks.
    #[must_use]
    pub fn block(&self) -> i64 {
        self.statuses.stacks(StatusKind::Block)
    }

    /// Strength bonus to outgoing damage.
    #[must_use]
    pub fn strength(&self) -> i64 {
        self.statuses.stacks(StatusKind::Strength)
    }

    /// Whether enemy single-target selection should skip this combatant.
    #[must_use]
    pub fn is_evasive(&self) -> bool {
        self.statuses.has(StatusKind::Untargetable) || self.statuses.has(StatusKind::Hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VULNERABLE: Ratio = Ratio::new(3, 2);

    fn dummy(hp: i64) -> Combatant {
        Combatant::new(EntityId(1), "Dummy", hp)
    }

    #[test]
    fn test_block_absorbs_first() {
        let mut target = dummy(30);
        target.gain_block(5);

        let report = target.take_damage(9, VULNERABLE);

        assert_eq!(report.blocked, 5);
        assert_eq!(report.hp_lost, 4);
        assert!(!target.statuses.has(StatusKind::Block));
        assert_eq!(target.hp(), 26);
    }

    #[test]
    fn test_partial_block_keeps_entry() {
        let mut target = dummy(30);
        target.gain_block(10);

        let report = target.take_damage(4, VULNERABLE);

        assert_eq!(report.hp_lost, 0);
        assert_eq!(target.block(), 6);
    }

    #[test]
    fn test_vulnerable_floors() {
        let mut target = dummy(50);
        target.statuses.apply(StatusEffect::new(StatusKind::Vulnerable, 1));

        assert_eq!(target.take_damage(10, VULNERABLE).hp_lost, 15);
        assert_eq!(target.take_damage(7, VULNERABLE).hp_lost, 10);
    }

    #[test]
    fn test_vulnerable_applies_after_block() {
        let mut target = dummy(50);
        target.gain_block(4);
        target.statuses.apply(StatusEffect::new(StatusKind::Vulnerable, 1));

        let report = target.take_damage(10, VULNERABLE);
        assert_eq!(report.blocked, 4);
        assert_eq!(report.hp_lost, 9);
    }

    #[test]
    fn test_hp_clamps() {
        let mut target = dummy(10);

        let report = target.take_damage(25, VULNERABLE);
        assert_eq!(report.hp_lost, 10);
        assert!(report.lethal);
        assert_eq!(target.hp(), 0);

        target.heal(100);
        assert_eq!(target.hp(), 10);

        assert_eq!(target.take_damage(-5, VULNERABLE).hp_lost, 0);
    }

    #[test]
    fn test_gain_block_ignores_non_positive() {
        let mut target = dummy(10);
        assert_eq!(target.gain_block(0), 0);
        assert_eq!(target.gain_block(-3), 0);
        assert!(target.statuses.is_empty());
    }

    #[test]
    #[should_panic(expected = "Combatant max HP must be positive")]
    fn test_zero_max_hp() {
        let _ = Combatant::new(EntityId(1), "Nobody", 0);
    }
}
