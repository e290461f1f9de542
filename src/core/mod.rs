//! Core combat types: entities, RNG, configuration, resources, actions, session.
//!
//! Everything here is content-agnostic. Card, enemy and hero data live in
//! `content`; the rules that drive a session live in `rules` and `effects`.

pub mod entity;
pub mod rng;
pub mod config;
pub mod resources;
pub mod action;
pub mod state;

pub use entity::{EntityAllocator, EntityId};
pub use rng::{CombatRng, CombatRngState};
pub use config::{CombatConfig, Ratio};
pub use resources::{ResourcePool, ResourceType};
pub use action::{ActionRecord, PlayerAction};
pub use state::{ActionOutcome, CombatPhase, CombatSession, GadgetInstance, Rejection};
