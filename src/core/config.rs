//! Encounter configuration.
//!
//! The mission layer builds a `CombatConfig` per encounter. Defaults match
//! the standard rules: 3 energy, 5-card hands, 3-energy retreat, baseline
//! abilities at 1 energy + 3 resource.

use serde::{Deserialize, Serialize};

/// A damage multiplier expressed as a ratio, applied with floor division.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratio {
    pub numerator: i64,
    pub denominator: i64,
}

impl Ratio {
    /// Create a new ratio.
    ///
    /// Panics if the denominator is not positive.
    #[must_use]
    pub const fn new(numerator: i64, denominator: i64) -> Self {
        assert!(denominator > 0, "Ratio denominator must be positive");
        Self { numerator, denominator }
    }

    /// Scale a non-negative amount, rounding down.
    #[must_use]
    pub fn apply(self, amount: i64) -> i64 {
        (amount.max(0) * self.numerator).div_euclid(self.denominator)
    }
}

/// Complete encounter configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatConfig {
    /// Energy restored at the start of each player turn.
    pub max_energy: u32,

    /// Cards drawn at the start of each player turn.
    pub hand_size: usize,

    /// Energy spent by a retreat.
    pub retreat_cost: u32,

    /// Energy spent by any baseline ability.
    pub baseline_energy_cost: u32,

    /// Resource spent by any baseline ability.
    pub baseline_resource_cost: u32,

    /// Damage dealt by the Blood baseline ability.
    pub baseline_damage: i64,

    /// Cards drawn by the Glint baseline ability.
    pub baseline_draw: usize,

    /// Block granted to each hero by the Iron baseline ability.
    pub baseline_block: i64,

    /// Cap on resource-scaled bonus draws when a card does not set one.
    pub default_draw_cap: usize,

    /// Damage taken multiplier while Vulnerable.
    pub vulnerable: Ratio,

    /// Damage dealt multiplier while Weak.
    pub weak: Ratio,

    /// Encounter difficulty tier (summons use one tier lower).
    pub difficulty: u32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            max_energy: 3,
            hand_size: 5,
            retreat_cost: 3,
            baseline_energy_cost: 1,
            baseline_resource_cost: 3,
            baseline_damage: 8,
            baseline_draw: 2,
            baseline_block: 8,
            default_draw_cap: 10,
            vulnerable: Ratio::new(3, 2),
            weak: Ratio::new(3, 4),
            difficulty: 0,
        }
    }
}

impl CombatConfig {
    /// Create the standard configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-turn energy.
    #[must_use]
    pub fn with_max_energy(mut self, energy: u32) -> Self {
        self.max_energy = energy;
        self
    }

    /// Set the number of cards drawn each turn.
    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    /// Set the retreat energy cost.
    #[must_use]
    pub fn with_retreat_cost(mut self, cost: u32) -> Self {
        self.retreat_cost = cost;
        self
    }

    /// Set the encounter difficulty.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: u32) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Difficulty tier used for mid-combat summons.
    #[must_use]
    pub fn summon_difficulty(&self) -> u32 {
        self.difficulty.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CombatConfig::new();
        assert_eq!(config.max_energy, 3);
        assert_eq!(config.hand_size, 5);
        assert_eq!(config.retreat_cost, 3);
        assert_eq!(config.baseline_energy_cost, 1);
        assert_eq!(config.baseline_resource_cost, 3);
        assert_eq!(config.default_draw_cap, 10);
    }

    #[test]
    fn test_builder() {
        let config = CombatConfig::new()
            .with_max_energy(4)
            .with_hand_size(6)
            .with_retreat_cost(2)
            .with_difficulty(3);

        assert_eq!(config.max_energy, 4);
        assert_eq!(config.hand_size, 6);
        assert_eq!(config.retreat_cost, 2);
        assert_eq!(config.summon_difficulty(), 2);
        assert_eq!(CombatConfig::new().summon_difficulty(), 0);
    }

    #[test]
    fn test_ratio_floors() {
        let vulnerable = Ratio::new(3, 2);
        assert_eq!(vulnerable.apply(10), 15);
        assert_eq!(vulnerable.apply(7), 10);
        assert_eq!(vulnerable.apply(0), 0);
        assert_eq!(vulnerable.apply(-4), 0);

        let weak = Ratio::new(3, 4);
        assert_eq!(weak.apply(10), 7);
        assert_eq!(weak.apply(1), 0);
    }

    #[test]
    fn test_config_json() {
        let config = CombatConfig::new().with_difficulty(2);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: CombatConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    #[should_panic(expected = "Ratio denominator must be positive")]
    fn test_ratio_zero_denominator() {
        let _ = Ratio::new(1, 0);
    }
}
