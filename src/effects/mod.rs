//! Effect system for cards, gadgets and enemy abilities.
//!
//! - `CardEffect`: an ordered pipeline of typed `EffectPrimitive`s
//! - `Condition`: the closed set of guards, evaluated via `ConditionContext`
//! - `status`: status kinds, stacking and decay
//! - `targeting`: target selection for both sides
//! - `resolver`: `CombatSession::play_card`, walking a pipeline stage by stage
//!
//! ## Design Philosophy
//!
//! Effects are plain data. Everything a card can do is a variant here, so
//! content tables never carry closures and sessions stay serializable.

mod condition;
mod effect;
mod resolver;
pub mod status;
pub mod targeting;

pub use condition::{Comparison, Condition, ConditionContext};
pub use effect::{
    BlockSpec, CardEffect, ConditionalBonus, DamageModifier, DamageSpec, DrawSpec, EffectPrimitive, GadgetSpec,
    Payoff, Scaling, Stage, StatusTarget,
};
pub use targeting::{Side, TargetFilter, TargetSelector};
