//! Heroes and enemies.
//!
//! ## Key Types
//!
//! - `Combatant`: id, name, clamped HP, statuses, and the damage primitive
//! - `Hero`: class, deck and trauma cards
//! - `Enemy`: faction, weighted ability table, declared `Intent`

pub mod combatant;
pub mod hero;
pub mod enemy;

pub use combatant::{Combatant, DamageReport};
pub use hero::Hero;
pub use enemy::{select_ability, Enemy, EnemyAbility, Faction, Intent, IntentKind};
