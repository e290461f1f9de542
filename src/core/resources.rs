//! The shared five-resource pool.
//!
//! Counters are unsigned, so a negative balance cannot be represented.
//! Spending is all-or-nothing: the balance check precedes the debit.

use serde::{Deserialize, Serialize};

/// The five combat resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceType {
    /// Vitality, sacrifice.
    Blood,
    /// Perception, opportunity.
    Glint,
    /// Destruction, entropy.
    Ashes,
    /// Knowledge, preparation.
    Pages,
    /// Will, endurance.
    Iron,
}

impl ResourceType {
    /// All resources in pool order.
    pub const ALL: [ResourceType; 5] = [
        ResourceType::Blood,
        ResourceType::Glint,
        ResourceType::Ashes,
        ResourceType::Pages,
        ResourceType::Iron,
    ];

    const fn slot(self) -> usize {
        match self {
            ResourceType::Blood => 0,
            ResourceType::Glint => 1,
            ResourceType::Ashes => 2,
            ResourceType::Pages => 3,
            ResourceType::Iron => 4,
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResourceType::Blood => "Blood",
            ResourceType::Glint => "Glint",
            ResourceType::Ashes => "Ashes",
            ResourceType::Pages => "Pages",
            ResourceType::Iron => "Iron",
        };
        f.write_str(name)
    }
}

/// Five independent non-negative counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourcePool {
    counters: [u32; 5],
}

impl ResourcePool {
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current amount of a resource.
    #[must_use]
    pub fn get(&self, resource: ResourceType) -> u32 {
        self.counters[resource.slot()]
    }

    /// Add to a resource.
    pub fn gain(&mut self, resource: ResourceType, amount: u32) {
        let slot = &mut self.counters[resource.slot()];
        *slot = slot.saturating_add(amount);
    }

    /// Check whether `amount` can be spent.
    #[must_use]
    pub fn can_afford(&self, resource: ResourceType, amount: u32) -> bool {
        self.get(resource) >= amount
    }

    /// Spend exactly `amount`, or nothing if the balance is short.
    ///
    /// Returns whether the debit happened.
    pub fn spend(&mut self, resource: ResourceType, amount: u32) -> bool {
        if !self.can_afford(resource, amount) {
            return false;
        }
        self.counters[resource.slot()] -= amount;
        true
    }

    /// Remove up to `amount`, stopping at zero.
    ///
    /// Returns how much was actually removed.
    pub fn drain(&mut self, resource: ResourceType, amount: u32) -> u32 {
        let slot = &mut self.counters[resource.slot()];
        let taken = (*slot).min(amount);
        *slot -= taken;
        taken
    }

    /// Apply a signed delta; negative deltas drain, stopping at zero.
    ///
    /// Returns the signed change actually applied.
    pub fn apply_delta(&mut self, resource: ResourceType, delta: i64) -> i64 {
        if delta >= 0 {
            let amount = u32::try_from(delta).unwrap_or(u32::MAX);
            let before = self.get(resource);
            self.gain(resource, amount);
            i64::from(self.get(resource) - before)
        } else {
            let amount = u32::try_from(delta.unsigned_abs()).unwrap_or(u32::MAX);
            -i64::from(self.drain(resource, amount))
        }
    }

    /// Iterate `(resource, amount)` pairs in pool order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceType, u32)> + '_ {
        ResourceType::ALL.iter().map(move |&r| (r, self.get(r)))
    }
}
