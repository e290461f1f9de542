//! Card system: definitions, instances, and catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardDefinition`: Static card data and its effect pipeline
//! - `CardInstance`: One copy in combat (instance id, owning hero)
//! - `CardCatalog`: Definition lookup by id, key, class and rarity

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{CardDefinition, CardId, CardRarity, CardType, HeroClass};
pub use instance::CardInstance;
pub use registry::CardCatalog;
