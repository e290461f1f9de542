//! The four card piles and the draw/reshuffle economy.
//!
//! Draw, hand, discard and exhaust are `im::Vector`s so session snapshots
//! share structure. The top of the draw pile is the back of the vector.
//! A card instance lives in exactly one pile; `debug_check` asserts that.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cards::CardInstance;
use crate::core::entity::EntityId;
use crate::core::rng::CombatRng;

/// Which pile a card sits in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pile {
    Draw,
    Hand,
    Discard,
    Exhaust,
}

/// One step of a draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawStep {
    /// Discard was shuffled into the empty draw pile.
    Reshuffled { cards: usize },
    /// A card entered the hand.
    Drawn { card: EntityId, owner: EntityId },
    /// A dead hero's card went straight to discard.
    Redirected { card: EntityId, owner: EntityId },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPiles {
    draw: Vector<CardInstance>,
    hand: Vector<CardInstance>,
    discard: Vector<CardInstance>,
    exhaust: Vector<CardInstance>,
}

impl CardPiles {
    /// Create piles with everything in the draw pile, top last.
    #[must_use]
    pub fn new(draw: impl IntoIterator<Item = CardInstance>) -> Self {
        let piles = Self {
            draw: draw.into_iter().collect(),
            ..Self::default()
        };
        piles.debug_check();
        piles
    }

    #[must_use]
    pub fn draw_pile(&self) -> &Vector<CardInstance> {
        &self.draw
    }

    #[must_use]
    pub fn hand(&self) -> &Vector<CardInstance> {
        &self.hand
    }

    #[must_use]
    pub fn discard_pile(&self) -> &Vector<CardInstance> {
        &self.discard
    }

    #[must_use]
    pub fn exhaust_pile(&self) -> &Vector<CardInstance> {
        &self.exhaust
    }

    /// Cards across all four piles.
    #[must_use]
    pub fn total(&self) -> usize {
        self.draw.len() + self.hand.len() + self.discard.len() + self.exhaust.len()
    }

    /// Find which pile holds a card.
    #[must_use]
    pub fn locate(&self, card: EntityId) -> Option<Pile> {
        let holds = |pile: &Vector<CardInstance>| pile.iter().any(|c| c.instance_id == card);
        if holds(&self.hand) {
            Some(Pile::Hand)
        } else if holds(&self.draw) {
            Some(Pile::Draw)
        } else if holds(&self.discard) {
            Some(Pile::Discard)
        } else if holds(&self.exhaust) {
            Some(Pile::Exhaust)
        } else {
            None
        }
    }

    /// Look up a card in hand.
    #[must_use]
    pub fn in_hand(&self, card: EntityId) -> Option<&CardInstance> {
        self.hand.iter().find(|c| c.instance_id == card)
    }

    /// Remove a card from hand.
    pub fn take_from_hand(&mut self, card: EntityId) -> Option<CardInstance> {
        let pos = self.hand.iter().position(|c| c.instance_id == card)?;
        Some(self.hand.remove(pos))
    }

    /// Put a resolved card on the discard pile.
    pub fn discard(&mut self, card: CardInstance) {
        self.discard.push_back(card);
    }

    /// Remove a card from circulation for the rest of combat.
    pub fn exhaust(&mut self, card: CardInstance) {
        self.exhaust.push_back(card);
    }

    /// Move the whole hand to discard, keeping hand order.
    ///
    /// Returns the number of cards moved.
    pub fn discard_hand(&mut self) -> usize {
        let count = self.hand.len();
        let hand = std::mem::take(&mut self.hand);
        self.discard.append(hand);
        count
    }

    /// Draw up to `count` cards.
    ///
    /// When the draw pile runs dry the discard pile is shuffled into it;
    /// when both are empty drawing stops early. Cards whose owner fails
    /// `owner_alive` go straight to discard and still count as drawn.
    pub fn draw(
        &mut self,
        count: usize,
        rng: &mut CombatRng,
        owner_alive: impl Fn(EntityId) -> bool,
    ) -> Vec<DrawStep> {
        let mut steps = Vec::new();

        for _ in 0..count {
            if self.draw.is_empty() {
                if self.discard.is_empty() {
                    break;
                }
                let cards = self.discard.len();
                let mut shuffled: Vec<_> = std::mem::take(&mut self.discard).into_iter().collect();
                rng.shuffle(&mut shuffled);
                self.draw = shuffled.into_iter().collect();
                steps.push(DrawStep::Reshuffled { cards });
            }

            let Some(card) = self.draw.pop_back() else {
                break;
            };

            let (id, owner) = (card.instance_id, card.owner);
            if owner_alive(owner) {
                self.hand.push_back(card);
                steps.push(DrawStep::Drawn { card: id, owner });
            } else {
                self.discard.push_back(card);
                steps.push(DrawStep::Redirected { card: id, owner });
            }
        }

        self.debug_check();
        steps
    }

    /// Assert that no instance id appears twice across the piles.
    pub fn debug_check(&self) {
        if cfg!(debug_assertions) {
            let mut seen = FxHashSet::default();
            for card in self
                .draw
                .iter()
                .chain(self.hand.iter())
                .chain(self.discard.iter())
                .chain(self.exhaust.iter())
            {
                assert!(
                    seen.insert(card.instance_id),
                    "Card {} is in more than one pile",
                    card.instance_id
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardRarity, CardType};

    fn cards(owner: u32, ids: std::ops::Range<u32>) -> Vec<CardInstance> {
        ids.map(|i| {
            CardInstance::new(
                EntityId(i),
                EntityId(owner),
                CardDefinition::new("test", "Test", CardType::Skill, CardRarity::Basic, 1),
            )
        })
        .collect()
    }

    #[test]
    fn test_draw_from_top() {
        let mut piles = CardPiles::new(cards(1, 10..13));
        let mut rng = CombatRng::new(1);

        let steps = piles.draw(1, &mut rng, |_| true);

        assert_eq!(steps, vec![DrawStep::Drawn { card: EntityId(12), owner: EntityId(1) }]);
        assert_eq!(piles.hand().len(), 1);
        assert_eq!(piles.draw_pile().len(), 2);
    }

    #[test]
    fn test_reshuffle_when_draw_empty() {
        let mut piles = CardPiles::new(Vec::new());
        for card in cards(1, 10..15) {
            piles.discard(card);
        }
        let mut rng = CombatRng::new(1);

        let steps = piles.draw(3, &mut rng, |_| true);

        assert_eq!(steps[0], DrawStep::Reshuffled { cards: 5 });
        assert_eq!(piles.draw_pile().len(), 2);
        assert_eq!(piles.discard_pile().len(), 0);
        assert_eq!(piles.hand().len(), 3);
    }

    #[test]
    fn test_draw_stops_when_both_empty() {
        let mut piles = CardPiles::new(cards(1, 10..12));
        let mut rng = CombatRng::new(1);

        let steps = piles.draw(5, &mut rng, |_| true);

        assert_eq!(steps.len(), 2);
        assert_eq!(piles.hand().len(), 2);
        assert_eq!(piles.total(), 2);
    }

    #[test]
    fn test_dead_owner_redirects_to_discard() {
        let mut draw = cards(1, 10..12);
        draw.extend(cards(2, 20..21));
        let mut piles = CardPiles::new(draw);
        let mut rng = CombatRng::new(1);

        let steps = piles.draw(2, &mut rng, |owner| owner != EntityId(2));

        assert_eq!(steps[0], DrawStep::Redirected { card: EntityId(20), owner: EntityId(2) });
        assert_eq!(piles.hand().len(), 1);
        assert_eq!(piles.discard_pile().len(), 1);
        assert_eq!(piles.locate(EntityId(20)), Some(Pile::Discard));
    }

    #[test]
    fn test_hand_movement() {
        let mut piles = CardPiles::new(cards(1, 10..14));
        let mut rng = CombatRng::new(1);
        piles.draw(3, &mut rng, |_| true);

        let card = piles.take_from_hand(EntityId(13)).unwrap();
        piles.exhaust(card);
        assert_eq!(piles.locate(EntityId(13)), Some(Pile::Exhaust));
        assert!(piles.take_from_hand(EntityId(13)).is_none());

        assert_eq!(piles.discard_hand(), 2);
        assert!(piles.hand().is_empty());
        assert_eq!(piles.total(), 4);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "more than one pile")]
    fn test_duplicate_instance_panics() {
        let mut piles = CardPiles::new(cards(1, 10..11));
        for card in cards(1, 10..11) {
            piles.discard(card);
        }
        piles.debug_check();
    }
}
