//! Hero generation: class base HP, class name pools and starter decks.

use rustc_hash::FxHashSet;

use super::cards::starter_deck;
use crate::cards::{CardCatalog, HeroClass};
use crate::combatants::Hero;
use crate::core::{CombatRng, EntityAllocator};

/// Base HP of a class.
#[must_use]
pub fn base_hp(class: HeroClass) -> i64 {
    match class {
        HeroClass::Brute => 90,
        HeroClass::Blaster => 65,
        HeroClass::Tinker => 70,
        HeroClass::Thinker => 60,
        HeroClass::Mover => 70,
        HeroClass::Stranger => 65,
    }
}

/// The name pool of a class.
#[must_use]
pub fn name_pool(class: HeroClass) -> &'static [&'static str] {
    match class {
        HeroClass::Brute => &[
            "Titan", "Colossus", "Juggernaut", "Goliath", "Rampart", "Fortress", "Bulwark", "Bastion", "Ironclad",
            "Monolith",
        ],
        HeroClass::Blaster => &[
            "Nova", "Radiance", "Sunfire", "Starburst", "Inferno", "Pulse", "Beam", "Flare", "Corona", "Photon",
        ],
        HeroClass::Tinker => &[
            "Gadget", "Cogsworth", "Machina", "Sprocket", "Widget", "Gizmo", "Techne", "Circuit", "Forge",
            "Blueprint",
        ],
        HeroClass::Thinker => &[
            "Oracle", "Sage", "Cerebro", "Insight", "Prophecy", "Axiom", "Theorem", "Logic", "Cipher", "Augur",
        ],
        HeroClass::Mover => &[
            "Flash", "Velocity", "Quickstep", "Blur", "Dash", "Zephyr", "Swift", "Streak", "Bolt", "Rush",
        ],
        HeroClass::Stranger => &[
            "Shadow", "Phantom", "Specter", "Ghost", "Wraith", "Shade", "Whisper", "Veil", "Mirage", "Echo",
        ],
    }
}

/// Hands out unique hero names.
///
/// Unused pool names are picked at random. Once a class's pool is
/// exhausted, a random pool name gets the first free numeric suffix,
/// starting at 2 ("Titan 2").
#[derive(Clone, Debug, Default)]
pub struct NameAllocator {
    used: FxHashSet<String>,
}

impl NameAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a name for a hero of `class`.
    pub fn allocate(&mut self, class: HeroClass, rng: &mut CombatRng) -> String {
        let pool = name_pool(class);
        let available: Vec<&str> = pool.iter().copied().filter(|n| !self.used.contains(*n)).collect();

        let name = match rng.choose(&available) {
            Some(name) => (*name).to_string(),
            None => {
                let base = pool[rng.gen_index(pool.len())];
                (2..)
                    .map(|suffix| format!("{base} {suffix}"))
                    .find(|candidate| !self.used.contains(candidate))
                    .unwrap_or_else(|| base.to_string())
            }
        };

        self.used.insert(name.clone());
        name
    }

    /// Mark a name as taken, e.g. for heroes loaded from elsewhere.
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.used.insert(name.into());
    }

    #[must_use]
    pub fn is_used(&self, name: &str) -> bool {
        self.used.contains(name)
    }
}

/// Build a fresh hero of `class` with a unique name and a starter deck.
pub fn create_hero(
    class: HeroClass,
    catalog: &CardCatalog,
    names: &mut NameAllocator,
    ids: &mut EntityAllocator,
    rng: &mut CombatRng,
) -> Hero {
    let id = ids.alloc();
    let name = names.allocate(class, rng);
    let mut hero = Hero::new(id, name, class, base_hp(class));
    for card in starter_deck(class, catalog, id, ids, rng) {
        hero.add_card(card);
    }
    hero
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::cards::catalog;

    #[test]
    fn test_names_unique_until_pool_exhausted() {
        let mut names = NameAllocator::new();
        let mut rng = CombatRng::new(2);

        let drawn: FxHashSet<String> = (0..10).map(|_| names.allocate(HeroClass::Mover, &mut rng)).collect();

        assert_eq!(drawn.len(), 10);
        assert!(drawn.iter().all(|n| name_pool(HeroClass::Mover).contains(&n.as_str())));
    }

    #[test]
    fn test_exhausted_pool_gets_suffix() {
        let mut names = NameAllocator::new();
        let mut rng = CombatRng::new(2);
        for name in name_pool(HeroClass::Brute) {
            names.reserve(*name);
        }
        names.reserve("Titan 2");

        let name = names.allocate(HeroClass::Brute, &mut rng);

        let (base, suffix) = name.rsplit_once(' ').unwrap();
        assert!(name_pool(HeroClass::Brute).contains(&base));
        let suffix: u32 = suffix.parse().unwrap();
        if base == "Titan" {
            assert_eq!(suffix, 3);
        } else {
            assert_eq!(suffix, 2);
        }
        assert!(names.is_used(&name));
    }

    #[test]
    fn test_create_hero() {
        let catalog = catalog();
        let mut names = NameAllocator::new();
        let mut ids = EntityAllocator::new();
        let mut rng = CombatRng::new(6);

        let hero = create_hero(HeroClass::Brute, &catalog, &mut names, &mut ids, &mut rng);

        assert_eq!(hero.combatant.max_hp(), 90);
        assert_eq!(hero.deck.len(), 5);
        assert!(hero.deck.iter().all(|c| c.owner == hero.id()));
        assert!(names.is_used(&hero.combatant.name));
        assert_eq!(ids.peek().raw(), hero.id().raw() + 6);
    }
}
