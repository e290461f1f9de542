//! Card catalog for definition lookup.
//!
//! The `CardCatalog` stores every card definition available to an
//! encounter. It assigns `CardId`s on registration and provides lookup by id,
//! by text key, and by class and rarity for deck building.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId, CardRarity, HeroClass};

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use longwar_combat::cards::{CardCatalog, CardDefinition, CardRarity, CardType, HeroClass};
///
/// let mut catalog = CardCatalog::new();
/// let id = catalog.register(
///     CardDefinition::new("mover_dash", "Dash", CardType::Skill, CardRarity::Basic, 1)
///         .with_class(HeroClass::Mover),
/// );
///
/// assert_eq!(catalog.get(id).unwrap().name, "Dash");
/// assert_eq!(catalog.by_key("mover_dash").unwrap().id, id);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, CardDefinition>,
    keys: FxHashMap<String, CardId>,
    /// Registration order, for deterministic iteration.
    order: Vec<CardId>,
    next_id: u32,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    /// Register a card definition, assigning its id.
    ///
    /// Panics if a card with the same key already exists.
    pub fn register(&mut self, mut card: CardDefinition) -> CardId {
        if self.keys.contains_key(&card.key) {
            panic!("Card with key {:?} already registered", card.key);
        }

        let id = CardId::new(self.next_id.max(1));
        self.next_id = id.raw() + 1;
        card.id = id;

        self.keys.insert(card.key.clone(), id);
        self.order.push(id);
        self.cards.insert(id, card);
        id
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Get a card definition by text key.
    #[must_use]
    pub fn by_key(&self, key: &str) -> Option<&CardDefinition> {
        self.keys.get(key).and_then(|id| self.cards.get(id))
    }

    /// Check if a key is registered.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.order.iter().filter_map(|id| self.cards.get(id))
    }

    /// Cards of one class and rarity, in registration order.
    pub fn find_by_class(
        &self,
        class: HeroClass,
        rarity: CardRarity,
    ) -> impl Iterator<Item = &CardDefinition> {
        self.iter()
            .filter(move |c| c.class == Some(class) && c.rarity == rarity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardType;

    fn card(key: &str, class: HeroClass, rarity: CardRarity) -> CardDefinition {
        CardDefinition::new(key, key, CardType::Skill, rarity, 1).with_class(class)
    }

    #[test]
    fn test_register_assigns_sequential_ids() {
        let mut catalog = CardCatalog::new();
        let a = catalog.register(card("a", HeroClass::Brute, CardRarity::Basic));
        let b = catalog.register(card("b", HeroClass::Brute, CardRarity::Common));

        assert_eq!(a, CardId::new(1));
        assert_eq!(b, CardId::new(2));
        assert_eq!(catalog.get(b).unwrap().id, b);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_key_panics() {
        let mut catalog = CardCatalog::new();
        catalog.register(card("a", HeroClass::Brute, CardRarity::Basic));
        catalog.register(card("a", HeroClass::Mover, CardRarity::Basic));
    }

    #[test]
    fn test_find_by_class_keeps_registration_order() {
        let mut catalog = CardCatalog::new();
        catalog.register(card("x1", HeroClass::Tinker, CardRarity::Basic));
        catalog.register(card("y1", HeroClass::Mover, CardRarity::Basic));
        catalog.register(card("x2", HeroClass::Tinker, CardRarity::Basic));
        catalog.register(card("x3", HeroClass::Tinker, CardRarity::Rare));

        let keys: Vec<_> = catalog
            .find_by_class(HeroClass::Tinker, CardRarity::Basic)
            .map(|c| c.key.as_str())
            .collect();
        assert_eq!(keys, vec!["x1", "x2"]);
    }

    #[test]
    fn test_lookup_missing() {
        let catalog = CardCatalog::new();
        assert!(catalog.is_empty());
        assert!(catalog.by_key("nope").is_none());
        assert!(!catalog.contains_key("nope"));
    }
}
