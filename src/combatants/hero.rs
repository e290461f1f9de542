//! Heroes: a combatant plus a class and the cards it brings into combat.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::combatant::Combatant;
use crate::cards::{CardInstance, HeroClass};
use crate::core::EntityId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub combatant: Combatant,
    pub class: HeroClass,
    /// Cards owned by this hero.
    pub deck: Vector<CardInstance>,
    /// Negative cards gained from breakdowns; shuffled in with the deck.
    pub trauma: Vector<CardInstance>,
}

impl Hero {
    /// Create a hero with an empty deck.
    #[must_use]
    pub fn new(id: EntityId, name: impl Into<String>, class: HeroClass, max_hp: i64) -> Self {
        Self {
            combatant: Combatant::new(id, name, max_hp),
            class,
            deck: Vector::new(),
            trauma: Vector::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> EntityId {
        self.combatant.id
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.combatant.is_alive()
    }

    /// Add a card to the deck, taking ownership of it.
    ///
    /// Panics if the card belongs to another hero.
    pub fn add_card(&mut self, card: CardInstance) {
        assert_eq!(card.owner, self.id(), "Card {} is owned by another hero", card.instance_id);
        self.deck.push_back(card);
    }

    /// Add a trauma card.
    ///
    /// Panics if the card belongs to another hero.
    pub fn add_trauma(&mut self, card: CardInstance) {
        assert_eq!(card.owner, self.id(), "Card {} is owned by another hero", card.instance_id);
        self.trauma.push_back(card);
    }

    /// Every card this hero contributes to the draw pile.
    pub fn all_cards(&self) -> impl Iterator<Item = &CardInstance> {
        self.deck.iter().chain(self.trauma.iter())
    }
}
