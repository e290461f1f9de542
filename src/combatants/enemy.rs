//! Enemies: a combatant plus a faction, a weighted ability table and the
//! currently declared intent.

use serde::{Deserialize, Serialize};

use super::combatant::Combatant;
use crate::core::{CombatRng, EntityId};
use crate::effects::CardEffect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    /// Lovecraftian horrors of the southern states.
    Cult,
    /// Necromancers of the eastern states.
    Undead,
    /// Alien bugs of the western states.
    Swarm,
}

impl Faction {
    pub const ALL: [Faction; 3] = [Faction::Cult, Faction::Undead, Faction::Swarm];
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentKind {
    Attack,
    Block,
    Buff,
    Debuff,
    Summon,
    Special,
}

/// One entry of an enemy's ability table.
///
/// Effects reuse the card pipeline shape, read from the enemy's side:
/// `StatusTarget::Target` is the chosen hero, `AllEnemies` every living hero.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnemyAbility {
    pub name: String,
    pub kind: IntentKind,
    /// Relative selection weight.
    pub weight: u32,
    /// Number shown on the intent preview.
    pub intent_value: Option<i64>,
    pub effect: CardEffect,
}

impl EnemyAbility {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: IntentKind, weight: u32, effect: CardEffect) -> Self {
        Self {
            name: name.into(),
            kind,
            weight,
            intent_value: None,
            effect,
        }
    }

    /// Set the previewed value (builder pattern).
    #[must_use]
    pub fn showing(mut self, value: i64) -> Self {
        self.intent_value = Some(value);
        self
    }

    /// Base damage of the ability, if it attacks.
    #[must_use]
    pub fn base_damage(&self) -> Option<i64> {
        self.effect.damage_specs().next().map(|d| d.base)
    }

    /// Whether the ability hits every living hero.
    #[must_use]
    pub fn is_area(&self) -> bool {
        self.effect.damage_specs().any(|d| d.area)
    }
}

/// The publicly declared next action of an enemy.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Intent {
    pub kind: IntentKind,
    pub value: Option<i64>,
    pub description: String,
    pub area: bool,
    /// Index into the ability table.
    pub ability: usize,
}

impl Intent {
    /// Preview of the ability at `index`.
    #[must_use]
    pub fn preview(index: usize, ability: &EnemyAbility) -> Self {
        Self {
            kind: ability.kind,
            value: ability.intent_value,
            description: ability.name.clone(),
            area: ability.is_area(),
            ability: index,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub combatant: Combatant,
    pub faction: Faction,
    pub is_boss: bool,
    pub abilities: Vec<EnemyAbility>,
    pub intent: Intent,
}

impl Enemy {
    /// Create an enemy and draw its first intent.
    ///
    /// Panics if the ability table is empty.
    pub fn new(
        combatant: Combatant,
        faction: Faction,
        is_boss: bool,
        abilities: Vec<EnemyAbility>,
        rng: &mut CombatRng,
    ) -> Self {
        assert!(!abilities.is_empty(), "Enemy {} has no abilities", combatant.name);
        let index = select_ability(&abilities, rng);
        let intent = Intent::preview(index, &abilities[index]);
        Self {
            combatant,
            faction,
            is_boss,
            abilities,
            intent,
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

    /// The ability the current intent previews.
    #[must_use]
    pub fn declared_ability(&self) -> &EnemyAbility {
        &self.abilities[self.intent.ability]
    }

    /// Draw and declare the next intent.
    pub fn redeclare(&mut self, rng: &mut CombatRng) -> &Intent {
        let index = select_ability(&self.abilities, rng);
        self.intent = Intent::preview(index, &self.abilities[index]);
        &self.intent
    }
}

/// Weighted ability selection.
///
/// Falls back to the first ability when every weight is zero.
pub fn select_ability(abilities: &[EnemyAbility], rng: &mut CombatRng) -> usize {
    let weights: smallvec::SmallVec<[u32; 4]> = abilities.iter().map(|a| a.weight).collect();
    rng.choose_weighted(&weights).unwrap_or(0)
}
