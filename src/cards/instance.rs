//! Card instances - one physical copy of a card in combat.
//!
//! A `CardInstance` pairs an immutable `CardDefinition` with the identity
//! it has in this encounter: a unique instance id and the hero who owns it.
//! Exactly one pile holds a given instance at any time.

use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, CardId};
use crate::core::entity::EntityId;
use crate::effects::CardEffect;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique entity ID for this copy.
    pub instance_id: EntityId,

    /// Owning hero.
    pub owner: EntityId,

    /// The card's static data.
    pub definition: CardDefinition,
}

impl CardInstance {
    /// Create a card instance.
    #[must_use]
    pub fn new(instance_id: EntityId, owner: EntityId, definition: CardDefinition) -> Self {
        Self {
            instance_id,
            owner,
            definition,
        }
    }

    #[must_use]
    pub fn card_id(&self) -> CardId {
        self.definition.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    #[must_use]
    pub fn cost(&self) -> u32 {
        self.definition.cost
    }

    #[must_use]
    pub fn effect(&self) -> &CardEffect {
        &self.definition.effect
    }
}

impl std::fmt::Display for CardInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.definition.name, self.instance_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardRarity, CardType};

    #[test]
    fn test_instance_accessors() {
        let def = CardDefinition::new("brute_brace", "Brace", CardType::Skill, CardRarity::Basic, 1);
        let card = CardInstance::new(EntityId(7), EntityId(1), def);

        assert_eq!(card.name(), "Brace");
        assert_eq!(card.cost(), 1);
        assert_eq!(card.owner, EntityId(1));
        assert!(card.effect().is_empty());
        assert_eq!(format!("{}", card), "Brace [Entity(7)]");
    }

    #[test]
    fn test_copies_differ_by_identity() {
        let def = CardDefinition::new("brute_brace", "Brace", CardType::Skill, CardRarity::Basic, 1);
        let a = CardInstance::new(EntityId(7), EntityId(1), def.clone());
        let b = CardInstance::new(EntityId(8), EntityId(1), def);

        assert_ne!(a, b);
        assert_eq!(a.card_id(), b.card_id());
    }
}
