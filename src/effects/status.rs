//! Status effects: stacking, decay, and clearing.
//!
//! Every combatant carries a `StatusSet` holding at most one entry per
//! `StatusKind`. Entries always have at least one stack; an entry that
//! would drop to zero stacks is removed instead.
//!
//! ## Stacking
//!
//! Applying a kind that is already present adds stacks and keeps the longer
//! duration. An absent duration is unbounded, so a permanent entry never
//! becomes temporary.
//!
//! ## Decay
//!
//! `decay` runs at the scheduler's fixed turn boundaries. Both passes count
//! timed entries down, remove them at zero and remove durationless Block.
//! Only the enemy pass wears durationless Weak and Vulnerable down by one
//! stack; on heroes they persist until cleared. Everything else persists.
//!
//! Poison is not part of decay; it ticks at the start of its holder's action
//! via `tick_poison`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Buffs and debuffs a combatant can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatusKind {
    // Positive
    Block,
    Strength,
    Hidden,
    Untargetable,

    // Negative
    Vulnerable,
    Weak,
    Poison,
    Marked,

    // Neutral / special
    Thorns,
    Regeneration,
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// A single status entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub stacks: i64,
    /// Turns remaining. `None` = permanent until a rule removes it.
    pub duration: Option<u32>,
}

impl StatusEffect {
    /// A permanent status.
    #[must_use]
    pub const fn new(kind: StatusKind, stacks: i64) -> Self {
        Self {
            kind,
            stacks,
            duration: None,
        }
    }

    /// A status lasting `turns` decay passes.
    #[must_use]
    pub const fn timed(kind: StatusKind, stacks: i64, turns: u32) -> Self {
        Self {
            kind,
            stacks,
            duration: Some(turns),
        }
    }
}

/// Which side a decay pass runs for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecayPass {
    Hero,
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DecayOutcome {
    Kept,
    Removed,
}

/// Per-combatant status collection.
///
/// Insertion order is preserved so snapshots list statuses in the order
/// they were first applied.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusSet {
    entries: SmallVec<[StatusEffect; 4]>,
}

impl StatusSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a status with the stacking rule.
    ///
    /// Applications with fewer than one stack are ignored.
    /// Returns the resulting entry, if any.
    pub fn apply(&mut self, status: StatusEffect) -> Option<StatusEffect> {
        if status.stacks < 1 {
            return self.get(status.kind);
        }

        let result = if let Some(existing) = self.entries.iter_mut().find(|s| s.kind == status.kind) {
            existing.stacks += status.stacks;
            existing.duration = match (existing.duration, status.duration) {
                (Some(a), Some(b)) => Some(a.max(b)),
                _ => None,
            };
            *existing
        } else {
            self.entries.push(status);
            status
        };

        self.debug_check();
        Some(result)
    }

    /// Look up the entry for a kind.
    #[must_use]
    pub fn get(&self, kind: StatusKind) -> Option<StatusEffect> {
        self.entries.iter().find(|s| s.kind == kind).copied()
    }

    /// Check whether a kind is present.
    #[must_use]
    pub fn has(&self, kind: StatusKind) -> bool {
        self.entries.iter().any(|s| s.kind == kind)
    }

    /// Stack count of a kind, 0 when absent.
    #[must_use]
    pub fn stacks(&self, kind: StatusKind) -> i64 {
        self.get(kind).map_or(0, |s| s.stacks)
    }

    /// Remove a kind entirely. Returns the removed entry.
    pub fn remove(&mut self, kind: StatusKind) -> Option<StatusEffect> {
        let pos = self.entries.iter().position(|s| s.kind == kind)?;
        Some(self.entries.remove(pos))
    }

    /// Remove up to `amount` stacks of a kind, dropping the entry at zero.
    ///
    /// Returns how many stacks were removed.
    pub fn reduce(&mut self, kind: StatusKind, amount: i64) -> i64 {
        let Some(pos) = self.entries.iter().position(|s| s.kind == kind) else {
            return 0;
        };

        let entry = &mut self.entries[pos];
        let taken = entry.stacks.min(amount.max(0));
        entry.stacks -= taken;
        if entry.stacks <= 0 {
            self.entries.remove(pos);
        }
        taken
    }

    /// Clear everything (combat start).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Run one decay pass. Returns the kinds that were removed.
    pub fn decay(&mut self, pass: DecayPass) -> Vec<StatusKind> {
        let mut removed = Vec::new();

        self.entries.retain(|effect| {
            let outcome = Self::decay_entry(effect, pass);
            if outcome == DecayOutcome::Removed {
                removed.push(effect.kind);
            }
            outcome == DecayOutcome::Kept
        });

        self.debug_check();
        removed
    }

    fn decay_entry(effect: &mut StatusEffect, pass: DecayPass) -> DecayOutcome {
        if let Some(turns) = effect.duration.as_mut() {
            *turns = turns.saturating_sub(1);
            return if *turns > 0 { DecayOutcome::Kept } else { DecayOutcome::Removed };
        }

        match effect.kind {
            StatusKind::Block => DecayOutcome::Removed,
            StatusKind::Weak | StatusKind::Vulnerable if pass == DecayPass::Enemy => {
                effect.stacks -= 1;
                if effect.stacks > 0 {
                    DecayOutcome::Kept
                } else {
                    DecayOutcome::Removed
                }
            }
            _ => DecayOutcome::Kept,
        }
    }

    /// Poison tick: returns the damage to deal and drops one stack.
    pub fn tick_poison(&mut self) -> i64 {
        let damage = self.stacks(StatusKind::Poison);
        if damage > 0 {
            self.reduce(StatusKind::Poison, 1);
        }
        damage
    }

    /// Iterate over entries in application order.
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.entries.iter()
    }

    /// Number of distinct kinds present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn debug_check(&self) {
        debug_assert!(
            self.entries.iter().all(|s| s.stacks >= 1),
            "Status entry with fewer than one stack: {:?}",
            self.entries
        );
        debug_assert!(
            self.entries
                .iter()
                .enumerate()
                .all(|(i, a)| self.entries[i + 1..].iter().all(|b| b.kind != a.kind)),
            "Duplicate status kinds: {:?}",
            self.entries
        );
    }
}
