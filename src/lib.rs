//! # longwar-combat
//!
//! Turn-based combat engine for a squad deckbuilding game: heroes play cards
//! from a shared deck against enemies that telegraph their next action.
//!
//! ## Design Principles
//!
//! 1. **One Owner**: A `CombatSession` owns every piece of encounter state
//!    and is mutated in place through its operations.
//!
//! 2. **Deterministic**: All randomness flows through one seeded
//!    `CombatRng`, so a seed and an action sequence reproduce an encounter.
//!
//! 3. **Data-Driven Effects**: Cards, gadgets and enemy abilities share one
//!    typed effect pipeline resolved in a fixed stage order.
//!
//! ## Architecture
//!
//! - **Typed Outcomes**: Illegal actions return a `Rejection` and leave the
//!   session untouched.
//!
//! - **Persistent Data Structures**: Piles and logs use `im-rs`, so cloning a
//!   session for lookahead is cheap.
//!
//! - **Event Log**: Every observable mutation appends a `CombatEvent`.
//!
//! ## Modules
//!
//! - `core`: Entity ids, RNG, configuration, resources, actions, session
//! - `zones`: Draw, hand, discard and exhaust piles
//! - `cards`: Card definitions, instances and the catalog
//! - `combatants`: Heroes and enemies
//! - `effects`: Effect pipeline, statuses, conditions, targeting, resolver
//! - `events`: Combat event log entries
//! - `rules`: Turn scheduler, enemy AI, baseline abilities, `RulesEngine`
//! - `content`: Card, enemy and hero data

pub mod core;
pub mod zones;
pub mod cards;
pub mod combatants;
pub mod effects;
pub mod events;
pub mod rules;
pub mod content;

// Re-export commonly used types
pub use crate::core::{
    ActionOutcome, ActionRecord, CombatConfig, CombatPhase, CombatRng, CombatRngState, CombatSession,
    EntityAllocator, EntityId, GadgetInstance, PlayerAction, Ratio, Rejection, ResourcePool, ResourceType,
};

pub use crate::zones::{CardPiles, Pile};

pub use crate::cards::{CardCatalog, CardDefinition, CardId, CardInstance, CardRarity, CardType, HeroClass};

pub use crate::combatants::{Combatant, DamageReport, Enemy, EnemyAbility, Faction, Hero, Intent, IntentKind};

pub use crate::effects::status::{StatusEffect, StatusKind, StatusSet};
pub use crate::effects::{CardEffect, Condition, DamageModifier, EffectPrimitive, StatusTarget};

pub use crate::events::CombatEvent;

pub use crate::rules::{play_out, AggressivePolicy, CombatOutcome, CombatRules, PlayPolicy, RandomPolicy, RulesEngine};
