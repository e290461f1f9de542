//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: cost, type,
//! rarity, class, the effect pipeline and an optional play guard. Per-copy
//! identity (instance id, owning hero) lives in `CardInstance`.

use serde::{Deserialize, Serialize};

use crate::effects::{CardEffect, Condition};

/// Identifier for a card definition, assigned by the `CardCatalog`.
///
/// This identifies the "type" of card (e.g., "Haymaker"),
/// not a specific copy in a deck.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The six hero classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeroClass {
    /// Tank/damage, Blood and Iron scaling.
    Brute,
    /// Damage dealer, Ashes and Blood scaling.
    Blaster,
    /// Gadgets and buildup, Pages and Glint scaling.
    Tinker,
    /// Support and control, Glint and Pages scaling.
    Thinker,
    /// Evasion and utility, Glint and Iron scaling.
    Mover,
    /// Stealth and burst, Ashes and Glint scaling.
    Stranger,
}

impl HeroClass {
    /// All classes in roster order.
    pub const ALL: [HeroClass; 6] = [
        HeroClass::Brute,
        HeroClass::Blaster,
        HeroClass::Tinker,
        HeroClass::Thinker,
        HeroClass::Mover,
        HeroClass::Stranger,
    ];
}

impl std::fmt::Display for HeroClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Attack,
    Skill,
    Power,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardRarity {
    Basic,
    Common,
    Uncommon,
    Rare,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use longwar_combat::cards::{CardDefinition, CardRarity, CardType, HeroClass};
/// use longwar_combat::core::ResourceType;
/// use longwar_combat::effects::{CardEffect, DamageSpec};
///
/// let haymaker = CardDefinition::new("brute_haymaker", "Haymaker", CardType::Attack, CardRarity::Basic, 1)
///     .with_class(HeroClass::Brute)
///     .with_effect(CardEffect::new().damage(DamageSpec::flat(6).scaled(ResourceType::Blood, 1)));
///
/// assert_eq!(haymaker.cost, 1);
/// assert!(haymaker.effect.has_damage());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Catalog identifier. Zero until registered.
    pub id: CardId,

    /// Stable text key (e.g. `"brute_haymaker"`).
    pub key: String,

    /// Card name (for display/debugging).
    pub name: String,

    /// Owning class. `None` for class-less cards such as trauma.
    pub class: Option<HeroClass>,

    pub card_type: CardType,

    pub rarity: CardRarity,

    /// Energy cost.
    pub cost: u32,

    /// The effect pipeline.
    pub effect: CardEffect,

    pub description: String,

    /// Condition that must hold for the card to be playable at all.
    pub play_guard: Option<Condition>,
}

impl CardDefinition {
    /// Create a new card definition with an empty effect.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        card_type: CardType,
        rarity: CardRarity,
        cost: u32,
    ) -> Self {
        Self {
            id: CardId::default(),
            key: key.into(),
            name: name.into(),
            class: None,
            card_type,
            rarity,
            cost,
            effect: CardEffect::new(),
            description: String::new(),
            play_guard: None,
        }
    }

    /// Set the owning class (builder pattern).
    #[must_use]
    pub fn with_class(mut self, class: HeroClass) -> Self {
        self.class = Some(class);
        self
    }

    /// Set the effect pipeline (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: CardEffect) -> Self {
        self.effect = effect;
        self
    }

    /// Set the rules text (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Require a condition before the card can be played (builder pattern).
    #[must_use]
    pub fn with_guard(mut self, guard: Condition) -> Self {
        self.play_guard = Some(guard);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{BlockSpec, CardEffect, DamageSpec};
    use crate::effects::status::StatusKind;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_card_definition_builder() {
        let card = CardDefinition::new("mover_dash", "Dash", CardType::Skill, CardRarity::Basic, 1)
            .with_class(HeroClass::Mover)
            .with_effect(CardEffect::new().block(BlockSpec::flat(5)))
            .with_description("Gain 5 block.");

        assert_eq!(card.name, "Dash");
        assert_eq!(card.class, Some(HeroClass::Mover));
        assert_eq!(card.id, CardId::default());
        assert!(card.play_guard.is_none());
        assert!(!card.effect.has_damage());
    }

    #[test]
    fn test_guard() {
        let card = CardDefinition::new("x", "X", CardType::Attack, CardRarity::Rare, 4)
            .with_effect(CardEffect::new().damage(DamageSpec::flat(50)).exhausting())
            .with_guard(Condition::HasStatus(StatusKind::Hidden));

        assert_eq!(card.play_guard, Some(Condition::HasStatus(StatusKind::Hidden)));
        assert!(card.effect.exhaust);
    }

    #[test]
    fn test_card_definition_serialization() {
        let card = CardDefinition::new("x", "Test", CardType::Skill, CardRarity::Common, 2)
            .with_class(HeroClass::Tinker);

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: CardDefinition = serde_json::from_str(&json).unwrap();

        assert_eq!(card, deserialized);
    }
}
