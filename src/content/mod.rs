//! Game content.
//!
//! - `cards`: the card catalog, starter decks and trauma cards
//! - `enemies`: faction templates, encounters and summons
//! - `heroes`: class base HP, name allocation and hero creation

pub mod cards;
pub mod enemies;
pub mod heroes;

pub use cards::{catalog, starter_deck, trauma_card};
pub use enemies::{create_enemy, encounter, summon, templates, EnemyTemplate};
pub use heroes::{base_hp, create_hero, NameAllocator};
